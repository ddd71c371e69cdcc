//! The synchronous product: built on demand via BFS over pairs of states
//! from two Büchi automata, synchronising transitions whose guards are
//! compatible.

use std::collections::{BTreeMap, VecDeque};

use crate::automaton::Buchi;

/// The product of automata `A` and `B`. States are assigned dense indices
/// in discovery order (a `BTreeMap` keyed by the `(A::State, B::State)`
/// pair, so the assignment is deterministic for a given pair of automata).
#[derive(Clone, Debug)]
pub struct Product<A: Buchi, B: Buchi> {
    pub states: Vec<(A::State, B::State)>,
    index_of: BTreeMap<(A::State, B::State), usize>,
    pub initial: Vec<usize>,
    pub transitions: Vec<Vec<usize>>,
    pub accepting: Vec<bool>,
}

impl<A: Buchi, B: Buchi> Product<A, B> {
    /// Explore the reachable product of `a` and `b` from their respective
    /// initial states. A product state is accepting when its `A`
    /// component is (the formula automaton's acceptance condition is the
    /// only one that matters; the model automaton accepts everywhere).
    pub fn build(a: &A, b: &B) -> Product<A, B> {
        let mut states = Vec::new();
        let mut index_of: BTreeMap<(A::State, B::State), usize> = BTreeMap::new();
        let mut transitions: Vec<Vec<usize>> = Vec::new();
        let mut accepting = Vec::new();
        let mut queue: VecDeque<usize> = VecDeque::new();

        let mut intern = |state: (A::State, B::State),
                           states: &mut Vec<(A::State, B::State)>,
                           index_of: &mut BTreeMap<(A::State, B::State), usize>,
                           transitions: &mut Vec<Vec<usize>>,
                           accepting: &mut Vec<bool>,
                           queue: &mut VecDeque<usize>|
         -> usize {
            if let Some(&i) = index_of.get(&state) {
                return i;
            }
            let i = states.len();
            accepting.push(a.is_accepting(&state.0));
            states.push(state.clone());
            transitions.push(Vec::new());
            index_of.insert(state, i);
            queue.push_back(i);
            i
        };

        let mut initial = Vec::new();
        for sa in a.initial_states() {
            for sb in b.initial_states() {
                let i = intern((sa.clone(), sb), &mut states, &mut index_of, &mut transitions, &mut accepting, &mut queue);
                initial.push(i);
            }
        }
        initial.sort_unstable();
        initial.dedup();

        while let Some(i) = queue.pop_front() {
            let (sa, sb) = states[i].clone();
            let succ_a = a.successors(&sa);
            let succ_b = b.successors(&sb);
            let mut out = Vec::new();
            for (guard_a, next_a) in &succ_a {
                for (guard_b, next_b) in &succ_b {
                    if guard_a.compatible(guard_b) {
                        let j = intern(
                            (next_a.clone(), next_b.clone()),
                            &mut states,
                            &mut index_of,
                            &mut transitions,
                            &mut accepting,
                            &mut queue,
                        );
                        out.push(j);
                    }
                }
            }
            out.sort_unstable();
            out.dedup();
            transitions[i] = out;
        }

        Product { states, index_of, initial, transitions, accepting }
    }

    pub fn index_of(&self, state: &(A::State, B::State)) -> Option<usize> {
        self.index_of.get(state).copied()
    }

    pub fn successors(&self, index: usize) -> &[usize] {
        &self.transitions[index]
    }

    pub fn is_accepting(&self, index: usize) -> bool {
        self.accepting[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::lift::ModelAutomaton;
    use crate::automaton::FormulaAutomaton;
    use crate::formula::Formula;
    use crate::kripke::ExplicitKripke;
    use crate::proposition::test_support::NamedProp;
    use std::collections::BTreeSet;

    fn p(name: &str) -> Formula<NamedProp> {
        Formula::atom(NamedProp::new(name))
    }

    #[test]
    fn product_of_atom_and_matching_model_has_an_accepting_reachable_state() {
        // phi = G(a): negate + nnf for the formula automaton as the checker would.
        let phi = p("a").globally().not().nnf();
        let fa = FormulaAutomaton::build(&phi);

        let model = ExplicitKripke::builder()
            .state("s0", ["a".to_string()])
            .initial("s0")
            .transition("s0", "s0")
            .build()
            .unwrap();
        let ap: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        let ma = ModelAutomaton::new(&model, ap);

        let product = Product::build(&fa, &ma);
        assert!(!product.states.is_empty());
        // a loops forever on 'a', negated G(a) can never be witnessed, so no
        // reachable state should be part of an accepting cycle; we merely
        // check the product built without panicking and has self-consistent
        // transition indices.
        for succs in &product.transitions {
            for &s in succs {
                assert!(s < product.states.len());
            }
        }
    }

    #[test]
    fn incompatible_guards_produce_no_transition() {
        let phi = p("a").not().nnf();
        let fa = FormulaAutomaton::build(&phi);

        let model = ExplicitKripke::builder()
            .state("s0", ["a".to_string()])
            .initial("s0")
            .transition("s0", "s0")
            .build()
            .unwrap();
        let ap: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        let ma = ModelAutomaton::new(&model, ap);

        let product = Product::build(&fa, &ma);
        // The formula requires ¬a, the model always has a; no transition
        // should ever be followed from the (only reachable) initial state.
        for &i in &product.initial {
            assert!(product.successors(i).is_empty());
        }
    }
}
