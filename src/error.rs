//! Typed error taxonomy for trace evaluation and model checking.

use thiserror::Error;

use crate::proposition::Pid;

/// Errors that can arise while evaluating a proposition against an
/// evaluation context. Shared between [`TraceError`] and [`CheckError`]
/// since both `evaluate_trace` and the orchestrator's fast path call into
/// host-supplied propositions.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PropositionError {
    #[error("evaluation context did not provide the state type expected by proposition '{pid}': expected {expected}, got {actual}")]
    StateTypeMismatch {
        pid: Pid,
        expected: String,
        actual: String,
    },
    #[error("no state is available in the evaluation context for proposition '{pid}'")]
    StateNotAvailable { pid: Pid },
    #[error("proposition '{pid}' failed to evaluate: {detail}")]
    EvaluationFailure { pid: Pid, detail: String },
}

/// Errors produced by [`crate::evaluation::evaluate_trace`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    #[error("cannot evaluate a formula over an empty trace")]
    EmptyTrace,
    #[error("evaluation is inconclusive: {detail}")]
    InconclusiveEvaluation { detail: String },
    #[error("trace index {index} is out of bounds for a trace of length {length}")]
    TraceIndexOutOfBounds { index: usize, length: usize },
    #[error(transparent)]
    Proposition(#[from] PropositionError),
}

/// Errors produced by [`crate::checking::check`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("invalid formula: {0}")]
    InvalidFormula(String),
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("invalid Kripke structure: {0}")]
    InvalidKripkeStructure(String),
    #[error("Büchi automaton conversion failed for formula '{formula}': {reason}")]
    BuchiConversionError { formula: String, reason: String },
    #[error("automaton construction failed: {0}")]
    AutomatonConstructionError(String),
    #[error("cycle detection failed: {0}")]
    CycleDetectionError(String),
    #[error("internal error during stage '{stage}': {detail}")]
    InternalProcessingError { stage: String, detail: String },
    #[error(transparent)]
    Proposition(#[from] PropositionError),
}

impl CheckError {
    /// Wrap an internal error with the name of the stage that produced it,
    /// per the propagation policy: internal-stage failures are wrapped,
    /// user-input problems (like an invalid Kripke structure) are not.
    pub fn internal(stage: &str, detail: impl Into<String>) -> CheckError {
        CheckError::InternalProcessingError {
            stage: stage.to_string(),
            detail: detail.into(),
        }
    }
}
