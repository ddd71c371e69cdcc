//! The GBA→BA degeneraliser: the classical index-rotation construction
//! turning `k` acceptance sets into a single one.

use std::collections::BTreeSet;

use crate::automaton::{Buchi, Gba, Guard};
use crate::formula::Formula;
use crate::proposition::Proposition;
use crate::tableau::TableauNode;

/// The degeneralised Büchi automaton for an LTL formula. States are pairs
/// `(q, i)`: `q` indexes a tableau node, `i` is the rotation counter into
/// the `k` acceptance sets of the source GBA.
///
/// The counting construction: a transition out of `(q, i)` advances the
/// rotation to `(i + 1) mod k` when `q` is in the current target set
/// `F_i`, and otherwise leaves it at `i`. A state `(q, i)` is accepting
/// only at `i == 0` and only when `q ∈ F_0` — an infinite run is accepting
/// in the degeneralised automaton exactly when it completes the
/// `F_0, F_1, ..., F_{k-1}` round infinitely often. When `k = 1` the
/// rotation is pinned at `0` forever (`(i + 1) mod 1 == 0`), so acceptance
/// reduces to plain membership in `F_0` at every step.
#[derive(Clone, Debug)]
pub struct FormulaAutomaton<P: Proposition> {
    nodes: Vec<TableauNode<P>>,
    transitions: Vec<Vec<(Guard, usize)>>,
    acceptance: Vec<BTreeSet<usize>>,
    initial_nodes: Vec<usize>,
}

impl<P: Proposition> FormulaAutomaton<P> {
    /// Build the tableau and GBA of `phi` (must be in NNF) and degeneralise.
    pub fn build(phi: &Formula<P>) -> FormulaAutomaton<P> {
        let gba = crate::automaton::gba::build(phi);
        FormulaAutomaton::from_gba(gba)
    }

    pub fn from_gba(gba: Gba<P>) -> FormulaAutomaton<P> {
        let mut adjacency = vec![Vec::new(); gba.nodes.len()];
        for (from, label, to) in gba.transitions {
            adjacency[from].push((label, to));
        }
        FormulaAutomaton {
            nodes: gba.nodes,
            transitions: adjacency,
            acceptance: gba.acceptance,
            initial_nodes: gba.initial,
        }
    }

    fn acceptance_count(&self) -> usize {
        self.acceptance.len().max(1)
    }

    pub fn node(&self, index: usize) -> &TableauNode<P> {
        &self.nodes[index]
    }
}

impl<P: Proposition> Buchi for FormulaAutomaton<P> {
    type State = (usize, usize);

    fn initial_states(&self) -> Vec<(usize, usize)> {
        self.initial_nodes.iter().map(|&q| (q, 0)).collect()
    }

    fn successors(&self, state: &(usize, usize)) -> Vec<(Guard, (usize, usize))> {
        let (q, i) = *state;
        let k = self.acceptance_count();
        let i2 = if self.acceptance[i].contains(&q) { (i + 1) % k } else { i };
        self.transitions[q]
            .iter()
            .map(|(guard, q2)| (guard.clone(), (*q2, i2)))
            .collect()
    }

    fn is_accepting(&self, state: &(usize, usize)) -> bool {
        let (q, i) = *state;
        i == 0 && self.acceptance[0].contains(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposition::test_support::NamedProp;

    fn p(name: &str) -> Formula<NamedProp> {
        Formula::atom(NamedProp::new(name))
    }

    #[test]
    fn single_acceptance_set_pins_rotation_at_zero() {
        let phi = p("a").globally().nnf();
        let ba = FormulaAutomaton::build(&phi);
        for state in ba.initial_states() {
            assert_eq!(state.1, 0);
            for (_, succ) in ba.successors(&state) {
                assert_eq!(succ.1, 0);
            }
        }
    }

    #[test]
    fn until_seed_node_is_not_accepting_before_the_right_operand_holds() {
        // The seed node {a U b} hasn't witnessed b yet, so it must not be
        // accepted merely for sitting at rotation index 0.
        let phi = p("a").until(p("b")).nnf();
        let ba = FormulaAutomaton::build(&phi);
        for state in ba.initial_states() {
            assert!(!ba.is_accepting(&state));
        }
    }

    #[test]
    fn perpetually_deferred_eventuality_is_not_accepting() {
        // F(!a) that never resolves (current = {F !a}, self-looping) must
        // not be accepting just because its rotation index is pinned at 0.
        let phi = p("a").not().finally().nnf();
        let ba = FormulaAutomaton::build(&phi);
        let seed: BTreeSet<Formula<NamedProp>> = [phi.clone()].into_iter().collect();
        let deferring = ba
            .initial_states()
            .into_iter()
            .find(|&(q, _)| ba.node(q).current == seed)
            .expect("the seed node {F !a} must be reachable as an initial state");
        assert!(!ba.is_accepting(&deferring));
    }
}
