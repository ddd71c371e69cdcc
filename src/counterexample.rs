//! The lasso counterexample model.

use std::fmt;

/// A finite prefix leading into a repeating cycle: the witness that some
/// run of a Kripke structure violates the checked formula.
///
/// `prefix` and `cycle` are both sequences of model states. The infinite
/// path `prefix · cycle^ω` is a run of the model. Either may be empty, but
/// not both — see [`Lasso::describe`] for the two degenerate renderings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lasso<S> {
    pub prefix: Vec<S>,
    pub cycle: Vec<S>,
}

impl<S> Lasso<S> {
    pub fn new(prefix: Vec<S>, cycle: Vec<S>) -> Lasso<S> {
        Lasso { prefix, cycle }
    }
}

impl<S: fmt::Display> Lasso<S> {
    /// Render as `s0 -> s1 -> (s2 -> s3)∞`, with an empty-prefix form
    /// `(c0 -> c1)∞` and an empty-cycle form that is just the bare prefix.
    pub fn describe(&self) -> String {
        let prefix_str = self
            .prefix
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        let cycle_str = self
            .cycle
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");

        match (self.prefix.is_empty(), self.cycle.is_empty()) {
            (_, true) => prefix_str,
            (true, false) => format!("({cycle_str})\u{221e}"),
            (false, false) => format!("{prefix_str} -> ({cycle_str})\u{221e}"),
        }
    }
}

impl<S: fmt::Display> fmt::Display for Lasso<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// The outcome of [`crate::checking::check`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CheckResult<S> {
    Holds,
    Fails(Lasso<S>),
}

impl<S> CheckResult<S> {
    pub fn holds(&self) -> bool {
        matches!(self, CheckResult::Holds)
    }

    pub fn counterexample(&self) -> Option<&Lasso<S>> {
        match self {
            CheckResult::Holds => None,
            CheckResult::Fails(lasso) => Some(lasso),
        }
    }
}
