//! Infix string syntax for LTL formulae.
//!
//! The core only ever consumes already-built [`crate::formula::Formula`]
//! values over a host-supplied [`crate::proposition::Proposition`]; it has
//! no notion of a concrete surface syntax. This module provides one
//! convenient, ad hoc syntax so the demo binary and tests don't have to
//! build ASTs by hand: `!`, `&`, `|`, `->`, `X`, `F`, `G`, `U`, `W`, `R`,
//! parentheses, `true`/`false`, and bare identifiers as atoms. It is
//! never called by [`crate::checking::check`] or
//! [`crate::evaluation::evaluate_trace`].

pub mod parser;
pub mod tokenizer;

use std::collections::BTreeSet;
use std::fmt;

use crate::error::PropositionError;
use crate::formula::Formula;
use crate::proposition::{EvaluationContext, Pid, Proposition};

/// Parse an infix formula string into a [`Formula`] over [`NamedAtom`]s.
pub fn parse(input: &str) -> Result<Formula<NamedAtom>, String> {
    let tokens = tokenizer::tokenize(input)?;
    parser::parse_tokens(&tokens)
}

/// An atomic proposition identified by a name, evaluated against the set of
/// names currently true — the concrete atom type this module's parser
/// produces.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NamedAtom(Pid);

impl NamedAtom {
    pub fn new(name: impl Into<Pid>) -> Self {
        NamedAtom(name.into())
    }
}

impl fmt::Display for NamedAtom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An evaluation context that is just the set of currently-true names.
#[derive(Clone, Debug, Default)]
pub struct LabelContext(pub BTreeSet<Pid>);

impl EvaluationContext for LabelContext {}

impl Proposition for NamedAtom {
    type Context = LabelContext;

    fn id(&self) -> &Pid {
        &self.0
    }

    fn evaluate(&self, ctx: &LabelContext) -> Result<bool, PropositionError> {
        Ok(ctx.0.contains(&self.0))
    }
}
