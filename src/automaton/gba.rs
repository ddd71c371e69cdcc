//! The GBA acceptance generator: derives one acceptance set per liveness
//! subformula from a tableau.

use std::collections::BTreeSet;

use crate::automaton::Guard;
use crate::formula::{BinaryOp, Formula, UnaryOp};
use crate::proposition::Proposition;
use crate::tableau::{self, Tableau, TableauNode};

/// A generalised Büchi automaton built from a tableau: the tableau's nodes
/// and transitions, plus a family of acceptance sets that must each be
/// visited infinitely often.
#[derive(Clone, Debug)]
pub struct Gba<P: Proposition> {
    pub nodes: Vec<TableauNode<P>>,
    pub initial: Vec<usize>,
    pub transitions: Vec<(usize, Guard, usize)>,
    pub acceptance: Vec<BTreeSet<usize>>,
}

/// Build the tableau of `phi` (which must be in NNF) and derive its
/// generalised acceptance sets.
pub fn build<P: Proposition>(phi: &Formula<P>) -> Gba<P> {
    let Tableau { nodes, initial, transitions } = tableau::build(phi);
    let acceptance = acceptance_sets(phi, &nodes);
    Gba { nodes, initial, transitions, acceptance }
}

/// For every liveness subformula `alpha U beta` (including `F beta`, i.e.
/// `true U beta`) in the closure of `phi`, the acceptance set `{n : beta
/// in n.current or (alpha U beta) not in n.current}`. `R` (and `W`, which
/// shares its one-step unfolding with `U` but is a safety connective) never
/// contribute an acceptance set — Release is explicitly a safety
/// connective, and its two special cases (`true R beta`, `false R beta`)
/// both resolve to "no acceptance set", which is already this function's
/// default for every `R` node.
///
/// If no liveness subformula exists, the GBA has the single trivial
/// acceptance set `Q` (every node).
fn acceptance_sets<P: Proposition>(phi: &Formula<P>, nodes: &[TableauNode<P>]) -> Vec<BTreeSet<usize>> {
    let cl = tableau::closure(phi);
    let mut sets = Vec::new();

    for psi in &cl {
        let beta = match psi {
            Formula::Binary(BinaryOp::U, _, right) => Some(right.as_ref().clone()),
            Formula::Unary(UnaryOp::F, inner) => Some(inner.as_ref().clone()),
            _ => None,
        };
        let Some(beta) = beta else { continue };

        let set: BTreeSet<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.current.contains(&beta) || !node.current.contains(psi))
            .map(|(index, _)| index)
            .collect();
        sets.push(set);
    }

    if sets.is_empty() {
        sets.push((0..nodes.len()).collect());
    }
    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposition::test_support::NamedProp;

    fn p(name: &str) -> Formula<NamedProp> {
        Formula::atom(NamedProp::new(name))
    }

    #[test]
    fn until_produces_one_acceptance_set() {
        let phi = p("a").until(p("b"));
        let gba = build(&phi);
        assert_eq!(gba.acceptance.len(), 1);
        // Every node whose current contains b must be in the acceptance set.
        for (i, node) in gba.nodes.iter().enumerate() {
            if node.current.contains(&p("b")) {
                assert!(gba.acceptance[0].contains(&i));
            }
        }
    }

    #[test]
    fn finally_is_treated_as_liveness() {
        let phi = p("a").finally();
        let gba = build(&phi);
        assert_eq!(gba.acceptance.len(), 1);
    }

    #[test]
    fn globally_has_no_liveness_acceptance_set() {
        let phi = p("a").globally();
        let gba = build(&phi);
        assert_eq!(gba.acceptance.len(), 1);
        assert_eq!(gba.acceptance[0], (0..gba.nodes.len()).collect());
    }

    #[test]
    fn release_never_contributes_an_acceptance_set() {
        let phi = p("a").release(p("b"));
        let gba = build(&phi);
        // No U/F subformula anywhere, so the trivial Q acceptance set applies.
        assert_eq!(gba.acceptance.len(), 1);
        assert_eq!(gba.acceptance[0], (0..gba.nodes.len()).collect());
    }
}
