//! Negation normal form rewriting.

use crate::formula::node::Formula;
use crate::formula::operator_enums::{BinaryOp, UnaryOp};
use crate::proposition::Proposition;

impl<P: Proposition> Formula<P> {
    /// Rewrite `self` into negation normal form: `not` pushed to atoms only,
    /// via De Morgan and the LTL dualities. Idempotent and O(|φ|).
    pub fn nnf(self) -> Formula<P> {
        push_negation(self, false)
    }

    /// Whether `self` is already in NNF (no `not` above an atom).
    pub fn is_nnf(&self) -> bool {
        match self {
            Formula::Bool(_) | Formula::Atom(_) => true,
            Formula::Unary(UnaryOp::Not, inner) => matches!(**inner, Formula::Atom(_) | Formula::Bool(_)),
            Formula::Unary(_, inner) => inner.is_nnf(),
            Formula::Binary(BinaryOp::Implies, _, _) => false,
            Formula::Binary(_, left, right) => left.is_nnf() && right.is_nnf(),
        }
    }
}

/// Recursively push a pending negation (`negate`) down through `phi`,
/// producing an NNF tree. `negate = false` just recurses without flipping
/// anything, applying simplifications as it rebuilds the tree bottom-up.
fn push_negation<P: Proposition>(phi: Formula<P>, negate: bool) -> Formula<P> {
    match phi {
        Formula::Bool(b) => Formula::Bool(b ^ negate),
        Formula::Atom(p) => {
            let atom = Formula::Atom(p);
            if negate {
                atom.not()
            } else {
                atom
            }
        }
        Formula::Unary(UnaryOp::Not, inner) => push_negation(*inner, !negate),
        Formula::Unary(UnaryOp::X, inner) => {
            push_negation(*inner, negate).next()
        }
        Formula::Unary(UnaryOp::F, inner) => {
            if negate {
                push_negation(*inner, true).globally()
            } else {
                push_negation(*inner, false).finally()
            }
        }
        Formula::Unary(UnaryOp::G, inner) => {
            if negate {
                push_negation(*inner, true).finally()
            } else {
                push_negation(*inner, false).globally()
            }
        }
        Formula::Binary(BinaryOp::And, left, right) => {
            let l = push_negation(*left, negate);
            let r = push_negation(*right, negate);
            if negate {
                l.or(r)
            } else {
                l.and(r)
            }
        }
        Formula::Binary(BinaryOp::Or, left, right) => {
            let l = push_negation(*left, negate);
            let r = push_negation(*right, negate);
            if negate {
                l.and(r)
            } else {
                l.or(r)
            }
        }
        Formula::Binary(BinaryOp::Implies, left, right) => {
            // psi -> chi === !psi | chi
            let l = push_negation(*left, !negate);
            let r = push_negation(*right, negate);
            if negate {
                l.and(r)
            } else {
                l.or(r)
            }
        }
        Formula::Binary(BinaryOp::U, left, right) => {
            let l = push_negation(*left, negate);
            let r = push_negation(*right, negate);
            if negate {
                l.release(r)
            } else {
                l.until(r)
            }
        }
        Formula::Binary(BinaryOp::R, left, right) => {
            let l = push_negation(*left, negate);
            let r = push_negation(*right, negate);
            if negate {
                l.until(r)
            } else {
                l.release(r)
            }
        }
        Formula::Binary(BinaryOp::W, left, right) => {
            // psi W chi === chi | (psi & G psi), negated via
            // !(psi W chi) === !chi U (!psi & !chi)
            if negate {
                let not_l = push_negation(left.as_ref().clone(), true);
                let not_r = push_negation(right.as_ref().clone(), true);
                not_r.until(not_l.and(not_r.clone()))
            } else {
                let l = push_negation(*left, false);
                let r = push_negation(*right, false);
                l.weak_until(r)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposition::test_support::NamedProp;

    fn p(name: &str) -> Formula<NamedProp> {
        Formula::atom(NamedProp::new(name))
    }

    #[test]
    fn double_negation_cancels() {
        assert_eq!(p("a").not().not().nnf(), p("a"));
    }

    #[test]
    fn negated_and_becomes_or_of_negations() {
        let phi = p("a").and(p("b")).not().nnf();
        assert_eq!(phi, p("a").not().or(p("b").not()));
    }

    #[test]
    fn negated_until_becomes_release() {
        let phi = p("a").until(p("b")).not().nnf();
        assert_eq!(phi, p("a").not().release(p("b").not()));
    }

    #[test]
    fn negated_finally_becomes_globally_of_negation() {
        let phi = p("a").finally().not().nnf();
        assert_eq!(phi, p("a").not().globally());
    }

    #[test]
    fn negated_next_commutes_with_next() {
        let phi = p("a").next().not().nnf();
        assert_eq!(phi, p("a").not().next());
    }

    #[test]
    fn implies_is_expanded() {
        let phi = p("a").implies(p("b")).nnf();
        assert_eq!(phi, p("a").not().or(p("b")));
    }

    #[test]
    fn nnf_is_idempotent() {
        let phi = p("a").implies(p("b").until(p("c"))).not();
        let once = phi.clone().nnf();
        let twice = once.clone().nnf();
        assert_eq!(once, twice);
        assert!(once.is_nnf());
    }
}
