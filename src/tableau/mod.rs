//! The tableau constructor: builds the graph of maximally-consistent
//! subsets of an NNF formula's closure, via the classical on-the-fly
//! expansion algorithm (Gerth, Peled, Vardi & Wolper 1995).

use std::collections::{BTreeMap, BTreeSet};

use crate::automaton::Guard;
use crate::formula::{BinaryOp, Formula, UnaryOp};
use crate::proposition::Proposition;

/// A node of the tableau: a pair of subsets of the closure. `current`
/// holds formulas that must hold now (including the compound formulas
/// that were decomposed to reach this node, not just their literal
/// consequences — the GBA construction needs these to recognise liveness
/// subformulae). `next` holds obligations for the successor.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TableauNode<P: Proposition> {
    pub current: BTreeSet<Formula<P>>,
    pub next: BTreeSet<Formula<P>>,
}

impl<P: Proposition> TableauNode<P> {
    /// The transition guard this node contributes: atoms that appear
    /// positively in `current` must hold, atoms that appear negated must
    /// not. Atoms `current` is silent on are unconstrained by this guard.
    pub fn guard(&self) -> Guard {
        let mut holds = BTreeSet::new();
        let mut excludes = BTreeSet::new();
        for f in &self.current {
            match f {
                Formula::Atom(p) => {
                    holds.insert(p.id().clone());
                }
                Formula::Unary(UnaryOp::Not, inner) => {
                    if let Formula::Atom(p) = inner.as_ref() {
                        excludes.insert(p.id().clone());
                    }
                }
                _ => {}
            }
        }
        Guard::new(holds, excludes)
    }
}

/// The tableau graph: nodes, initial nodes (by index into `nodes`), and
/// transitions labelled by subsets of AP.
#[derive(Clone, Debug)]
pub struct Tableau<P: Proposition> {
    pub nodes: Vec<TableauNode<P>>,
    pub initial: Vec<usize>,
    pub transitions: Vec<(usize, Guard, usize)>,
}

/// The smallest set containing `phi` and closed under subformulae and
/// single negation; in NNF the dual of a compound formula is its De
/// Morgan-pushed negation, computed directly rather than stored as a
/// literal `not`.
pub fn closure<P: Proposition>(phi: &Formula<P>) -> BTreeSet<Formula<P>> {
    let subs = phi.subformulae();
    let mut out: BTreeSet<Formula<P>> = subs.iter().cloned().collect();
    for sub in &subs {
        out.insert(sub.clone().not().nnf());
    }
    out
}

/// Build the tableau of `phi`, which must already be in negation normal
/// form.
pub fn build<P: Proposition>(phi: &Formula<P>) -> Tableau<P> {
    debug_assert!(phi.is_nnf(), "tableau input must be in negation normal form");

    let mut nodes: BTreeMap<TableauNode<P>, usize> = BTreeMap::new();
    let mut transitions = Vec::new();

    let mut seeds_seen: BTreeSet<BTreeSet<Formula<P>>> = BTreeSet::new();
    let mut pending_seeds: Vec<BTreeSet<Formula<P>>> = Vec::new();

    let initial_seed: BTreeSet<Formula<P>> = std::iter::once(phi.clone()).collect();
    seeds_seen.insert(initial_seed.clone());
    pending_seeds.push(initial_seed.clone());

    let mut initial_indices = Vec::new();
    let mut seed_to_indices: BTreeMap<BTreeSet<Formula<P>>, Vec<usize>> = BTreeMap::new();

    while let Some(seed) = pending_seeds.pop() {
        let mut results = Vec::new();
        expand(seed.iter().cloned().collect(), BTreeSet::new(), BTreeSet::new(), &mut results);

        let mut indices_for_seed = Vec::new();
        for node in results {
            let next_len = nodes.len();
            let index = *nodes.entry(node.clone()).or_insert(next_len);
            indices_for_seed.push(index);

            if seeds_seen.insert(node.next.clone()) {
                pending_seeds.push(node.next.clone());
            }
        }
        seed_to_indices.insert(seed, indices_for_seed);
    }

    if let Some(indices) = seed_to_indices.get(&initial_seed) {
        initial_indices = indices.clone();
    }

    // Wire transitions: every node whose `next` equals some seed transitions
    // to every node produced by expanding that seed.
    let node_list: Vec<TableauNode<P>> = {
        let mut v = vec![TableauNode::default(); nodes.len()];
        for (node, idx) in &nodes {
            v[*idx] = node.clone();
        }
        v
    };
    for (from_index, from_node) in node_list.iter().enumerate() {
        if let Some(to_indices) = seed_to_indices.get(&from_node.next) {
            let guard = from_node.guard();
            for &to_index in to_indices {
                transitions.push((from_index, guard.clone(), to_index));
            }
        }
    }

    Tableau {
        nodes: node_list,
        initial: initial_indices,
        transitions,
    }
}

/// Recursively expand `to_process` (formulas still to be decomposed) into
/// one or more saturated, consistent tableau nodes, appending them to
/// `out`. `done` accumulates every formula proved true at this node
/// (including compound ones); `next` accumulates obligations for the
/// successor.
fn expand<P: Proposition>(
    mut to_process: Vec<Formula<P>>,
    mut done: BTreeSet<Formula<P>>,
    next: BTreeSet<Formula<P>>,
    out: &mut Vec<TableauNode<P>>,
) {
    while let Some(psi) = to_process.pop() {
        if done.contains(&psi) {
            continue;
        }
        match &psi {
            Formula::Bool(true) => continue,
            Formula::Bool(false) => return, // inconsistent: abandon this branch
            Formula::Atom(_) => {
                let complement = psi.clone().not();
                if done.contains(&complement) {
                    return;
                }
                done.insert(psi);
            }
            Formula::Unary(UnaryOp::Not, inner) if matches!(**inner, Formula::Atom(_)) => {
                if done.contains(inner.as_ref()) {
                    return;
                }
                done.insert(psi);
            }
            Formula::Unary(UnaryOp::Not, _) => {
                unreachable!("tableau input must be in negation normal form")
            }
            Formula::Unary(UnaryOp::X, inner) => {
                done.insert(psi.clone());
                let mut next2 = next.clone();
                next2.insert((**inner).clone());
                return expand(to_process, done, next2, out);
            }
            Formula::Unary(UnaryOp::G, inner) => {
                done.insert(psi.clone());
                to_process.push((**inner).clone());
                let mut next2 = next.clone();
                next2.insert(psi.clone());
                return expand(to_process, done, next2, out);
            }
            Formula::Unary(UnaryOp::F, inner) => {
                done.insert(psi.clone());
                // branch A: witnessed now
                let mut to_process_a = to_process.clone();
                to_process_a.push((**inner).clone());
                expand(to_process_a, done.clone(), next.clone(), out);
                // branch B: deferred
                let mut next_b = next.clone();
                next_b.insert(psi.clone());
                return expand(to_process, done, next_b, out);
            }
            Formula::Binary(BinaryOp::And, left, right) => {
                done.insert(psi.clone());
                to_process.push((**left).clone());
                to_process.push((**right).clone());
            }
            Formula::Binary(BinaryOp::Or, left, right) => {
                done.insert(psi.clone());
                let mut to_process_a = to_process.clone();
                to_process_a.push((**left).clone());
                expand(to_process_a, done.clone(), next.clone(), out);
                to_process.push((**right).clone());
                return expand(to_process, done, next, out);
            }
            Formula::Binary(BinaryOp::Implies, left, right) => {
                // Defensive: `implies` should already have been expanded
                // away by `nnf`; treat it as `!left | right` if it wasn't.
                done.insert(psi.clone());
                let mut to_process_a = to_process.clone();
                to_process_a.push((**left).clone().not());
                expand(to_process_a, done.clone(), next.clone(), out);
                to_process.push((**right).clone());
                return expand(to_process, done, next, out);
            }
            Formula::Binary(BinaryOp::U, left, right) => {
                done.insert(psi.clone());
                let mut to_process_a = to_process.clone();
                to_process_a.push((**right).clone());
                expand(to_process_a, done.clone(), next.clone(), out);

                to_process.push((**left).clone());
                let mut next_b = next.clone();
                next_b.insert(psi.clone());
                return expand(to_process, done, next_b, out);
            }
            Formula::Binary(BinaryOp::W, left, right) => {
                done.insert(psi.clone());
                let mut to_process_a = to_process.clone();
                to_process_a.push((**right).clone());
                expand(to_process_a, done.clone(), next.clone(), out);

                to_process.push((**left).clone());
                let mut next_b = next.clone();
                next_b.insert(psi.clone());
                return expand(to_process, done, next_b, out);
            }
            Formula::Binary(BinaryOp::R, left, right) => {
                done.insert(psi.clone());
                to_process.push((**right).clone());

                let mut to_process_a = to_process.clone();
                to_process_a.push((**left).clone());
                expand(to_process_a, done.clone(), next.clone(), out);

                let mut next_b = next.clone();
                next_b.insert(psi.clone());
                return expand(to_process, done, next_b, out);
            }
        }
    }
    out.push(TableauNode { current: done, next });
}
