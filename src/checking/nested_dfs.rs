//! The Nested-DFS emptiness checker: the classical Courcoubetis-
//! Vardi-Wolper two-stack algorithm, searching for an accepting lasso in a
//! product automaton.

use std::collections::BTreeSet;

use crate::automaton::Buchi;
use crate::automaton::Product;

/// Search `product` for a reachable state that is both accepting and part
/// of a cycle, returning `(prefix, cycle)` as dense product-state indices.
/// `prefix` leads from an initial state up to (but not including) the
/// accepting state; `cycle` starts at the accepting state and loops back
/// to it (its last element has a transition to its first).
///
/// Successor exploration is sorted by index, which is assigned in
/// deterministic BFS discovery order by [`Product::build`], so two calls
/// on the same product return the same witness.
pub fn find_accepting_lasso<A, B>(product: &Product<A, B>) -> Option<(Vec<usize>, Vec<usize>)>
where
    A: Buchi,
    B: Buchi,
{
    let mut visited: BTreeSet<usize> = BTreeSet::new();
    let mut initial: Vec<usize> = product.initial.clone();
    initial.sort_unstable();

    for s0 in initial {
        if visited.contains(&s0) {
            continue;
        }
        let mut path = Vec::new();
        if let Some(cycle) = outer_dfs(product, s0, &mut visited, &mut path) {
            path.pop(); // drop the accepting state itself: it opens `cycle`, not `prefix`.
            return Some((path, cycle));
        }
    }
    None
}

fn outer_dfs<A, B>(
    product: &Product<A, B>,
    state: usize,
    visited: &mut BTreeSet<usize>,
    path: &mut Vec<usize>,
) -> Option<Vec<usize>>
where
    A: Buchi,
    B: Buchi,
{
    visited.insert(state);
    path.push(state);

    let mut successors: Vec<usize> = product.successors(state).to_vec();
    successors.sort_unstable();
    for succ in successors {
        if !visited.contains(&succ) {
            if let Some(cycle) = outer_dfs(product, succ, visited, path) {
                return Some(cycle);
            }
        }
    }

    if product.is_accepting(state) {
        let mut inner_visited = BTreeSet::new();
        let mut inner_path = Vec::new();
        if let Some(cycle) = inner_dfs(product, state, state, &mut inner_visited, &mut inner_path) {
            return Some(cycle);
        }
    }

    path.pop();
    None
}

fn inner_dfs<A, B>(
    product: &Product<A, B>,
    target: usize,
    state: usize,
    visited: &mut BTreeSet<usize>,
    path: &mut Vec<usize>,
) -> Option<Vec<usize>>
where
    A: Buchi,
    B: Buchi,
{
    visited.insert(state);
    path.push(state);

    let mut successors: Vec<usize> = product.successors(state).to_vec();
    successors.sort_unstable();

    if successors.contains(&target) {
        return Some(path.clone());
    }

    for succ in successors {
        if !visited.contains(&succ) {
            if let Some(cycle) = inner_dfs(product, target, succ, visited, path) {
                return Some(cycle);
            }
        }
    }

    path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::lift::ModelAutomaton;
    use crate::automaton::FormulaAutomaton;
    use crate::formula::Formula;
    use crate::kripke::ExplicitKripke;
    use crate::proposition::test_support::NamedProp;
    use std::collections::BTreeSet as Set;

    fn p(name: &str) -> Formula<NamedProp> {
        Formula::atom(NamedProp::new(name))
    }

    #[test]
    fn single_state_always_p_self_loop_has_no_counterexample_for_g_p() {
        // Negate G(p) -> F(!p); model always has p, so the product should
        // have no accepting cycle: G(p) holds.
        let psi = p("a").globally().not().nnf();
        let fa = FormulaAutomaton::build(&psi);

        let model = ExplicitKripke::builder()
            .state("s0", ["a".to_string()])
            .initial("s0")
            .transition("s0", "s0")
            .build()
            .unwrap();
        let ap: Set<String> = ["a".to_string()].into_iter().collect();
        let ma = ModelAutomaton::new(&model, ap);

        let product = Product::build(&fa, &ma);
        assert!(find_accepting_lasso(&product).is_none());
    }

    #[test]
    fn single_state_never_q_self_loop_finds_counterexample_for_f_q() {
        // Negate F(q) -> G(!q); model never has q, so every run violates
        // F(q): the product must have an accepting cycle.
        let psi = p("q").finally().not().nnf();
        let fa = FormulaAutomaton::build(&psi);

        let model = ExplicitKripke::builder()
            .state("s0", [])
            .initial("s0")
            .transition("s0", "s0")
            .build()
            .unwrap();
        let ap: Set<String> = ["q".to_string()].into_iter().collect();
        let ma = ModelAutomaton::new(&model, ap);

        let product = Product::build(&fa, &ma);
        let (prefix, cycle) = find_accepting_lasso(&product).expect("F(q) should fail");
        assert!(!cycle.is_empty());
        // last(cycle) must transition back to first(cycle).
        let last = *cycle.last().unwrap();
        let first = cycle[0];
        assert!(product.successors(last).contains(&first));
        if let Some(&last_prefix) = prefix.last() {
            assert!(product.successors(last_prefix).contains(&first));
        }
    }
}
