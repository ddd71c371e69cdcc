//! Finite-trace evaluation by stepwise residual-formula rewriting.

use crate::error::TraceError;
use crate::formula::{BinaryOp, Formula, UnaryOp};
use crate::proposition::Proposition;

/// Evaluate `phi` against `trace`, a non-empty sequence of evaluation
/// contexts, using residual (one-step rewriting) semantics.
///
/// Set `debug` to emit a `tracing` event with the residual formula after
/// every step; useful when diagnosing why a trace was accepted or
/// rejected.
pub fn evaluate_trace<P>(phi: Formula<P>, trace: &[P::Context], debug: bool) -> Result<bool, TraceError>
where
    P: Proposition,
{
    if trace.is_empty() {
        return Err(TraceError::EmptyTrace);
    }

    let mut residual = phi;
    for (index, ctx) in trace.iter().enumerate() {
        residual = step(residual, ctx)?;
        if debug {
            tracing::debug!(index, residual = ?residual, "evaluate_trace: residual after step");
        }
        if let Formula::Bool(b) = residual {
            // Bool is a fixed point of step, so further positions cannot
            // change the answer; stop early.
            return Ok(b);
        }
    }
    resolve_end_of_trace(residual)
}

/// Compute the one-step rewrite of `phi` against a single context: the
/// remaining obligation for the rest of the trace, with Boolean-literal
/// collapses applied eagerly through [`Formula`]'s smart constructors.
///
/// Built directly from the standard unfold equivalences: `Fψ ≡ ψ ∨ XFψ`,
/// `Gψ ≡ ψ ∧ XGψ`, `ψ U χ ≡ χ ∨ (ψ ∧ X(ψ U χ))`, `ψ W χ` with the same
/// one-step shape as `U` (they differ only at end-of-trace), `ψ R χ ≡ χ ∧
/// (ψ ∨ X(ψ R χ))`. Since `X` simply defers its body, plugging these
/// equivalences into `step` reproduces the residual semantics without
/// needing a separate "holds_now" channel.
fn step<P>(phi: Formula<P>, ctx: &P::Context) -> Result<Formula<P>, TraceError>
where
    P: Proposition,
{
    let out = match phi {
        Formula::Bool(b) => Formula::Bool(b),
        Formula::Atom(p) => Formula::Bool(p.evaluate(ctx)?),
        Formula::Unary(UnaryOp::Not, inner) => step(*inner, ctx)?.not(),
        Formula::Unary(UnaryOp::X, inner) => *inner,
        Formula::Unary(UnaryOp::F, inner) => {
            let unfolded = Formula::Unary(UnaryOp::F, inner.clone());
            step(*inner, ctx)?.or(unfolded)
        }
        Formula::Unary(UnaryOp::G, inner) => {
            let unfolded = Formula::Unary(UnaryOp::G, inner.clone());
            step(*inner, ctx)?.and(unfolded)
        }
        Formula::Binary(BinaryOp::And, left, right) => step(*left, ctx)?.and(step(*right, ctx)?),
        Formula::Binary(BinaryOp::Or, left, right) => step(*left, ctx)?.or(step(*right, ctx)?),
        Formula::Binary(BinaryOp::Implies, left, right) => {
            step(*left, ctx)?.not().or(step(*right, ctx)?)
        }
        Formula::Binary(BinaryOp::U, left, right) => {
            let unfolded = Formula::Binary(BinaryOp::U, left.clone(), right.clone());
            let chi_now = step(*right, ctx)?;
            let psi_now = step(*left, ctx)?;
            chi_now.or(psi_now.and(unfolded))
        }
        Formula::Binary(BinaryOp::W, left, right) => {
            let unfolded = Formula::Binary(BinaryOp::W, left.clone(), right.clone());
            let chi_now = step(*right, ctx)?;
            let psi_now = step(*left, ctx)?;
            chi_now.or(psi_now.and(unfolded))
        }
        Formula::Binary(BinaryOp::R, left, right) => {
            let unfolded = Formula::Binary(BinaryOp::R, left.clone(), right.clone());
            let chi_now = step(*right, ctx)?;
            let psi_now = step(*left, ctx)?;
            chi_now.and(psi_now.or(unfolded))
        }
    };
    Ok(out)
}

/// Resolve a residual formula once the trace is exhausted: unmet
/// eventualities (`F`, `U`) fail; vacuously-satisfied safety obligations
/// (`G`, `W`, `R`) succeed; a deferred `X` (or a proposition an `X`
/// deferred evaluation of) is inconclusive.
fn resolve_end_of_trace<P>(phi: Formula<P>) -> Result<bool, TraceError>
where
    P: Proposition,
{
    match phi {
        Formula::Bool(b) => Ok(b),
        Formula::Atom(p) => Err(TraceError::InconclusiveEvaluation {
            detail: format!("proposition '{}' was never evaluated before the trace ended", p.id()),
        }),
        Formula::Unary(UnaryOp::Not, inner) => resolve_end_of_trace(*inner).map(|b| !b),
        Formula::Unary(UnaryOp::X, _) => Err(TraceError::InconclusiveEvaluation {
            detail: "a pending `X` obligation was never checked against a successor state".to_string(),
        }),
        Formula::Unary(UnaryOp::F, _) => Ok(false),
        Formula::Unary(UnaryOp::G, _) => Ok(true),
        Formula::Binary(BinaryOp::And, left, right) => {
            let l = resolve_end_of_trace(*left)?;
            let r = resolve_end_of_trace(*right)?;
            Ok(l && r)
        }
        Formula::Binary(BinaryOp::Or, left, right) => {
            let l = resolve_end_of_trace(*left)?;
            let r = resolve_end_of_trace(*right)?;
            Ok(l || r)
        }
        Formula::Binary(BinaryOp::Implies, left, right) => {
            let l = resolve_end_of_trace(*left)?;
            let r = resolve_end_of_trace(*right)?;
            Ok(!l || r)
        }
        Formula::Binary(BinaryOp::U, _, _) => Ok(false),
        Formula::Binary(BinaryOp::W, _, _) => Ok(true),
        Formula::Binary(BinaryOp::R, _, _) => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposition::test_support::{LabelSetContext, NamedProp};

    fn p(name: &str) -> Formula<NamedProp> {
        Formula::atom(NamedProp::new(name))
    }

    fn ctx<const N: usize>(labels: [&str; N]) -> LabelSetContext {
        LabelSetContext::new(labels.iter().map(|s| s.to_string()))
    }

    #[test]
    fn empty_trace_is_an_error() {
        let result = evaluate_trace(p("p"), &[], false);
        assert_eq!(result, Err(TraceError::EmptyTrace));
    }

    #[test]
    fn pending_x_at_end_of_trace_is_inconclusive() {
        let phi = p("p").next();
        let trace = [ctx(["p"])];
        assert!(matches!(
            evaluate_trace(phi, &trace, false),
            Err(TraceError::InconclusiveEvaluation { .. })
        ));
    }

    #[test]
    fn finally_succeeds_as_soon_as_witnessed() {
        let phi = p("q").finally();
        let trace = [ctx(["p"]), ctx(["p", "q"]), ctx([])];
        assert_eq!(evaluate_trace(phi, &trace, false), Ok(true));
    }

    #[test]
    fn finally_fails_when_never_witnessed() {
        let phi = p("q").finally();
        let trace = [ctx(["p"]), ctx(["p"])];
        assert_eq!(evaluate_trace(phi, &trace, false), Ok(false));
    }

    #[test]
    fn globally_is_vacuously_true_at_end_of_trace() {
        let phi = p("p").globally();
        let trace = [ctx(["p"]), ctx(["p"])];
        assert_eq!(evaluate_trace(phi, &trace, false), Ok(true));
    }

    #[test]
    fn globally_fails_as_soon_as_violated() {
        let phi = p("p").globally();
        let trace = [ctx(["p"]), ctx([]), ctx(["p"])];
        assert_eq!(evaluate_trace(phi, &trace, false), Ok(false));
    }

    #[test]
    fn until_requires_the_right_operand_eventually() {
        let phi = p("p").until(p("r"));
        let no_r = [ctx(["p"]), ctx(["p"]), ctx(["p"])];
        assert_eq!(evaluate_trace(phi.clone(), &no_r, false), Ok(false));

        let with_r = [ctx(["p"]), ctx(["p", "r"])];
        assert_eq!(evaluate_trace(phi, &with_r, false), Ok(true));
    }

    #[test]
    fn weak_until_does_not_require_the_right_operand() {
        let phi = p("p").weak_until(p("r"));
        let trace = [ctx(["p"]), ctx(["p"]), ctx(["p"])];
        assert_eq!(evaluate_trace(phi, &trace, false), Ok(true));
    }

    #[test]
    fn seed_scenario_s7_globally_implies_finally() {
        // G (p -> F q), trace [{p},{p,q},{!p}].
        let phi = p("p").implies(p("q").finally()).globally();
        let trace = [ctx(["p"]), ctx(["p", "q"]), ctx([])];
        assert_eq!(evaluate_trace(phi, &trace, false), Ok(true));
    }
}
