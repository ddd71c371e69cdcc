//! Advisory warnings for formula trees.
//!
//! Validation and pretty-printing warnings are kept out of the core
//! on purpose: this module walks a [`crate::formula::Formula`] and reports
//! patterns a human author probably didn't intend, as plain strings rather
//! than hard errors. It never feeds into [`crate::checking::check`] or
//! [`crate::evaluation::evaluate_trace`] — a formula with warnings is
//! still checked exactly as written.

use crate::formula::{BinaryOp, Formula, UnaryOp};
use crate::proposition::Proposition;

/// Collect advisory warnings about `phi`. Order follows a pre-order walk
/// of the tree; duplicates (the same pattern nested twice) are reported
/// once per occurrence, not deduplicated.
pub fn lint<P: Proposition + std::fmt::Display>(phi: &Formula<P>) -> Vec<String> {
    let mut warnings = Vec::new();
    walk(phi, &mut warnings);
    warnings
}

fn walk<P: Proposition + std::fmt::Display>(phi: &Formula<P>, warnings: &mut Vec<String>) {
    match phi {
        Formula::Bool(b) => {
            warnings.push(format!("formula is the constant '{b}'"));
        }
        Formula::Atom(_) => {}
        Formula::Unary(UnaryOp::Not, inner) => {
            if let Formula::Unary(UnaryOp::Not, _) = inner.as_ref() {
                warnings.push(format!("double negation in '{phi}': write the inner formula directly"));
            }
            walk(inner, warnings);
        }
        Formula::Unary(UnaryOp::F, inner) => {
            if let Formula::Unary(UnaryOp::F, _) = inner.as_ref() {
                warnings.push(format!("redundant nested 'F' in '{phi}': F F p is equivalent to F p"));
            }
            walk(inner, warnings);
        }
        Formula::Unary(UnaryOp::G, inner) => {
            if let Formula::Unary(UnaryOp::G, _) = inner.as_ref() {
                warnings.push(format!("redundant nested 'G' in '{phi}': G G p is equivalent to G p"));
            }
            walk(inner, warnings);
        }
        Formula::Unary(UnaryOp::X, inner) => walk(inner, warnings),
        Formula::Binary(BinaryOp::And, left, right) => {
            if is_negation_of(left, right) {
                warnings.push(format!("'{phi}' is a syntactic contradiction (p & !p)"));
            }
            walk(left, warnings);
            walk(right, warnings);
        }
        Formula::Binary(BinaryOp::Or, left, right) => {
            if is_negation_of(left, right) {
                warnings.push(format!("'{phi}' is a syntactic tautology (p | !p)"));
            }
            walk(left, warnings);
            walk(right, warnings);
        }
        Formula::Binary(_, left, right) => {
            walk(left, warnings);
            walk(right, warnings);
        }
    }
}

/// Whether `left` and `right` are syntactically `psi` and `!psi` (in either
/// order), for some `psi`.
fn is_negation_of<P: Proposition>(left: &Formula<P>, right: &Formula<P>) -> bool {
    matches!(right, Formula::Unary(UnaryOp::Not, inner) if inner.as_ref() == left)
        || matches!(left, Formula::Unary(UnaryOp::Not, inner) if inner.as_ref() == right)
}
