//! The Kripke-structure interface and a small explicit implementation of
//! it used by the demo binary, the integration tests, and hosts that just
//! want to hand the checker a fixed graph.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::Hash;

use crate::error::CheckError;
use crate::proposition::Pid;

/// Abstracts the system under verification: a finite state-transition graph
/// labelled by atomic propositions.
///
/// No state may be produced by [`Kripke::successors`] or
/// [`Kripke::initial_states`] that is absent from [`Kripke::all_states`];
/// violating this is a contract violation surfaced as
/// [`CheckError::InvalidKripkeStructure`] by the orchestrator, not a panic.
pub trait Kripke {
    /// A model state. Must be totally ordered so that exploration order
    /// (and therefore counterexamples) is deterministic.
    type State: Clone + Eq + Hash + Ord + fmt::Debug;

    /// Every state of the model.
    fn all_states(&self) -> Vec<Self::State>;

    /// The non-empty-or-not set of initial states; a subset of
    /// [`Kripke::all_states`].
    fn initial_states(&self) -> Vec<Self::State>;

    /// The successors of `state`; a subset of [`Kripke::all_states`]. An
    /// empty result marks `state` as a *terminal state* (see the model
    /// automaton lifter's handling of terminal states).
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// The atomic propositions true in `state`.
    fn labels(&self, state: &Self::State) -> BTreeSet<Pid>;
}

/// A Kripke structure given as an explicit, in-memory graph over string
/// state names. This is the model type the demo binary's textual model
/// format deserialises into, and the type most unit/integration tests use.
#[derive(Clone, Debug, Default)]
pub struct ExplicitKripke {
    states: Vec<String>,
    initial: BTreeSet<String>,
    successors: BTreeMap<String, Vec<String>>,
    labels: BTreeMap<String, BTreeSet<Pid>>,
}

impl ExplicitKripke {
    pub fn builder() -> ExplicitKripkeBuilder {
        ExplicitKripkeBuilder::default()
    }

    /// Check the structural invariants every `Kripke` implementor must
    /// uphold: initial states and every successor are contained in
    /// `all_states`.
    pub fn validate(&self) -> Result<(), CheckError> {
        let known: BTreeSet<&String> = self.states.iter().collect();
        for s in &self.initial {
            if !known.contains(s) {
                return Err(CheckError::InvalidKripkeStructure(format!(
                    "initial state '{s}' is not in the model's state set"
                )));
            }
        }
        for (s, succs) in &self.successors {
            if !known.contains(s) {
                return Err(CheckError::InvalidKripkeStructure(format!(
                    "state '{s}' has declared successors but is not in the model's state set"
                )));
            }
            for t in succs {
                if !known.contains(t) {
                    return Err(CheckError::InvalidKripkeStructure(format!(
                        "state '{s}' has a successor '{t}' that is not in the model's state set"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Kripke for ExplicitKripke {
    type State = String;

    fn all_states(&self) -> Vec<String> {
        self.states.clone()
    }

    fn initial_states(&self) -> Vec<String> {
        self.initial.iter().cloned().collect()
    }

    fn successors(&self, state: &String) -> Vec<String> {
        self.successors.get(state).cloned().unwrap_or_default()
    }

    fn labels(&self, state: &String) -> BTreeSet<Pid> {
        self.labels.get(state).cloned().unwrap_or_default()
    }
}

/// Builder for [`ExplicitKripke`], mirroring the incremental style the
/// demo binary's model-file loader uses.
#[derive(Default)]
pub struct ExplicitKripkeBuilder {
    model: ExplicitKripke,
}

impl ExplicitKripkeBuilder {
    pub fn state(mut self, name: impl Into<String>, labels: impl IntoIterator<Item = Pid>) -> Self {
        let name = name.into();
        self.model.states.push(name.clone());
        self.model.labels.insert(name, labels.into_iter().collect());
        self
    }

    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.model.initial.insert(name.into());
        self
    }

    pub fn transition(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.model.successors.entry(from.into()).or_default().push(to.into());
        self
    }

    pub fn build(self) -> Result<ExplicitKripke, CheckError> {
        self.model.validate()?;
        Ok(self.model)
    }
}
