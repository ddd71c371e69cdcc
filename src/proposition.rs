//! Atomic propositions and the evaluation-context abstraction.

use std::fmt;
use std::hash::Hash;

use crate::error::PropositionError;

/// An opaque, hashable, totally-ordered proposition identifier.
///
/// Canonically a string: two propositions with the same PID are
/// interchangeable as far as the core is concerned.
pub type Pid = String;

/// An atomic proposition: a stable identity plus an evaluator against an
/// external state.
///
/// The core only ever compares propositions through [`Proposition::id`];
/// implementors must make `PartialEq`/`Eq`/`Hash` agree with identity
/// (i.e. delegate to `id()`), since [`crate::formula::Formula`] relies on
/// structural equality over its `Atom` leaves to build tableau nodes.
pub trait Proposition: Clone + fmt::Debug + Eq + Hash + Ord {
    /// The host-defined view of external state this proposition evaluates
    /// against, exposed through an [`EvaluationContext`].
    type Context: EvaluationContext;

    /// The proposition's stable identifier.
    fn id(&self) -> &Pid;

    /// Evaluate this proposition's truth value in `ctx`. Must be
    /// deterministic for a given `ctx`.
    fn evaluate(&self, ctx: &Self::Context) -> Result<bool, PropositionError>;
}

/// An opaque view from which propositions extract their typed state.
///
/// The core never inspects a context's contents; it only threads instances
/// through to [`Proposition::evaluate`].
pub trait EvaluationContext {
    /// The index of this context within a trace, if the context is part of
    /// one (used only for diagnostics, never by the core's control flow).
    fn trace_index(&self) -> Option<usize> {
        None
    }
}

/// A [`Proposition`] built from a name, an equality-defining id, and a
/// plain closure — covers the common case described in the design notes
/// without requiring a bespoke type per proposition.
#[derive(Clone)]
pub struct ClosureProposition<Ctx, F> {
    id: Pid,
    eval: std::sync::Arc<F>,
    _ctx: std::marker::PhantomData<fn(&Ctx)>,
}

impl<Ctx, F> ClosureProposition<Ctx, F>
where
    F: Fn(&Ctx) -> Result<bool, PropositionError>,
{
    pub fn new(id: impl Into<Pid>, eval: F) -> Self {
        ClosureProposition {
            id: id.into(),
            eval: std::sync::Arc::new(eval),
            _ctx: std::marker::PhantomData,
        }
    }
}

impl<Ctx, F> fmt::Debug for ClosureProposition<Ctx, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ClosureProposition").field("id", &self.id).finish()
    }
}

impl<Ctx, F> fmt::Display for ClosureProposition<Ctx, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<Ctx, F> PartialEq for ClosureProposition<Ctx, F> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Ctx, F> Eq for ClosureProposition<Ctx, F> {}

impl<Ctx, F> Hash for ClosureProposition<Ctx, F> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<Ctx, F> PartialOrd for ClosureProposition<Ctx, F> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<Ctx, F> Ord for ClosureProposition<Ctx, F> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl<Ctx: EvaluationContext, F> Proposition for ClosureProposition<Ctx, F>
where
    F: Fn(&Ctx) -> Result<bool, PropositionError>,
{
    type Context = Ctx;

    fn id(&self) -> &Pid {
        &self.id
    }

    fn evaluate(&self, ctx: &Ctx) -> Result<bool, PropositionError> {
        (self.eval)(ctx)
    }
}

/// Test-only proposition and context types shared across the crate's unit
/// tests: a named proposition whose identity is its name, evaluated against
/// a set of currently-true names.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::*;
    use std::collections::HashSet;

    #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
    pub struct NamedProp(Pid);

    impl NamedProp {
        pub fn new(name: impl Into<Pid>) -> Self {
            NamedProp(name.into())
        }
    }

    impl fmt::Display for NamedProp {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    /// A context that is simply the set of PIDs true at this instant.
    #[derive(Clone, Debug, Default)]
    pub struct LabelSetContext {
        pub true_labels: HashSet<Pid>,
        pub index: Option<usize>,
    }

    impl LabelSetContext {
        pub fn new(labels: impl IntoIterator<Item = Pid>) -> Self {
            LabelSetContext {
                true_labels: labels.into_iter().collect(),
                index: None,
            }
        }
    }

    impl EvaluationContext for LabelSetContext {
        fn trace_index(&self) -> Option<usize> {
            self.index
        }
    }

    impl Proposition for NamedProp {
        type Context = LabelSetContext;

        fn id(&self) -> &Pid {
            &self.0
        }

        fn evaluate(&self, ctx: &LabelSetContext) -> Result<bool, PropositionError> {
            Ok(ctx.true_labels.contains(&self.0))
        }
    }
}
