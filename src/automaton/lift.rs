//! The model→BA lifter: wraps a Kripke structure as a Büchi automaton
//! where every state is accepting and symbols are the labels of the
//! source state.

use std::collections::BTreeSet;

use crate::automaton::{Buchi, Guard};
use crate::kripke::Kripke;
use crate::proposition::Pid;

/// A Kripke structure viewed as a Büchi automaton. All states are
/// accepting (model states carry no notion of acceptance of their own —
/// only the formula automaton's states do).
///
/// Each state's labelling is closed-world over `ap`: an atom in `ap` not
/// present in `labels(state)` is taken to be false there, so the emitted
/// guard excludes it explicitly. This is what lets the product constructor
/// reject a formula transition that requires an atom the model doesn't
/// have, rather than treating it as a don't-care.
///
/// Terminal states (no successors) are given a self-loop labelled by their
/// own labels: LTL is a logic of infinite words, so a state without a
/// continuation would otherwise make every liveness property vacuously
/// fail. This is a known source of spurious acceptance documented in the
/// design notes — not silently changed here.
pub struct ModelAutomaton<'a, K: Kripke> {
    model: &'a K,
    ap: BTreeSet<Pid>,
}

impl<'a, K: Kripke> ModelAutomaton<'a, K> {
    pub fn new(model: &'a K, ap: BTreeSet<Pid>) -> ModelAutomaton<'a, K> {
        ModelAutomaton { model, ap }
    }

    fn guard_for(&self, state: &K::State) -> Guard {
        let holds = self.model.labels(state);
        let excludes = self.ap.difference(&holds).cloned().collect();
        Guard::new(holds, excludes)
    }
}

impl<'a, K: Kripke> Buchi for ModelAutomaton<'a, K> {
    type State = K::State;

    fn initial_states(&self) -> Vec<K::State> {
        self.model.initial_states()
    }

    fn successors(&self, state: &K::State) -> Vec<(Guard, K::State)> {
        let guard = self.guard_for(state);
        let successors = self.model.successors(state);
        if successors.is_empty() {
            vec![(guard, state.clone())]
        } else {
            successors.into_iter().map(|s2| (guard.clone(), s2)).collect()
        }
    }

    fn is_accepting(&self, _state: &K::State) -> bool {
        true
    }
}
