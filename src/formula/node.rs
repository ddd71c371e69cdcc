//! A syntax tree for LTL formulae and functionality for its manipulation.

use crate::formula::operator_enums::{BinaryOp, UnaryOp};
use crate::proposition::{Pid, Proposition};

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// A single LTL formula, parameterised by a host proposition type `P`.
///
/// `P` is compared and hashed only through its [`Proposition::id`]; the
/// core never inspects any other part of `P`. See [`Proposition`] for the
/// contract a host type must uphold.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Formula<P: Proposition> {
    /// A Boolean constant, `true` or `false`.
    Bool(bool),
    /// An atomic proposition.
    Atom(P),
    Unary(UnaryOp, Box<Formula<P>>),
    Binary(BinaryOp, Box<Formula<P>>, Box<Formula<P>>),
}

impl<P: Proposition> Formula<P> {
    /// Construct the `true` constant.
    pub fn tt() -> Formula<P> {
        Formula::Bool(true)
    }

    /// Construct the `false` constant.
    pub fn ff() -> Formula<P> {
        Formula::Bool(false)
    }

    /// Construct an atomic proposition.
    pub fn atom(p: P) -> Formula<P> {
        Formula::Atom(p)
    }

    /// `¬φ`, with the safe simplification `¬¬φ → φ`.
    pub fn not(self) -> Formula<P> {
        match self {
            Formula::Bool(b) => Formula::Bool(!b),
            Formula::Unary(UnaryOp::Not, inner) => *inner,
            other => Formula::Unary(UnaryOp::Not, Box::new(other)),
        }
    }

    /// `X φ` (next).
    pub fn next(self) -> Formula<P> {
        Formula::Unary(UnaryOp::X, Box::new(self))
    }

    /// `F φ` (finally), with the safe simplification `F F φ → F φ`.
    pub fn finally(self) -> Formula<P> {
        match self {
            Formula::Unary(UnaryOp::F, _) => self,
            other => Formula::Unary(UnaryOp::F, Box::new(other)),
        }
    }

    /// `G φ` (globally), with the safe simplification `G G φ → G φ`.
    pub fn globally(self) -> Formula<P> {
        match self {
            Formula::Unary(UnaryOp::G, _) => self,
            other => Formula::Unary(UnaryOp::G, Box::new(other)),
        }
    }

    /// `φ ∧ ψ`, with safe simplifications for `true`/`false` operands and
    /// idempotence (`φ ∧ φ → φ`).
    pub fn and(self, other: Formula<P>) -> Formula<P> {
        match (self, other) {
            (Formula::Bool(false), _) | (_, Formula::Bool(false)) => Formula::Bool(false),
            (Formula::Bool(true), rhs) => rhs,
            (lhs, Formula::Bool(true)) => lhs,
            (lhs, rhs) if lhs == rhs => lhs,
            (lhs, rhs) => Formula::Binary(BinaryOp::And, Box::new(lhs), Box::new(rhs)),
        }
    }

    /// `φ ∨ ψ`, with safe simplifications for `true`/`false` operands and
    /// idempotence (`φ ∨ φ → φ`).
    pub fn or(self, other: Formula<P>) -> Formula<P> {
        match (self, other) {
            (Formula::Bool(true), _) | (_, Formula::Bool(true)) => Formula::Bool(true),
            (Formula::Bool(false), rhs) => rhs,
            (lhs, Formula::Bool(false)) => lhs,
            (lhs, rhs) if lhs == rhs => lhs,
            (lhs, rhs) => Formula::Binary(BinaryOp::Or, Box::new(lhs), Box::new(rhs)),
        }
    }

    /// `φ → ψ`.
    pub fn implies(self, other: Formula<P>) -> Formula<P> {
        Formula::Binary(BinaryOp::Implies, Box::new(self), Box::new(other))
    }

    /// `φ U ψ` (strong until).
    pub fn until(self, other: Formula<P>) -> Formula<P> {
        Formula::Binary(BinaryOp::U, Box::new(self), Box::new(other))
    }

    /// `φ W ψ` (weak until).
    pub fn weak_until(self, other: Formula<P>) -> Formula<P> {
        Formula::Binary(BinaryOp::W, Box::new(self), Box::new(other))
    }

    /// `φ R ψ` (release).
    pub fn release(self, other: Formula<P>) -> Formula<P> {
        Formula::Binary(BinaryOp::R, Box::new(self), Box::new(other))
    }

    /// The height of the syntax tree; atoms and constants have depth 0.
    pub fn depth(&self) -> u32 {
        match self {
            Formula::Bool(_) | Formula::Atom(_) => 0,
            Formula::Unary(_, child) => child.depth() + 1,
            Formula::Binary(_, left, right) => left.depth().max(right.depth()) + 1,
        }
    }

    /// Whether this node is a single literal (`true`, `false`, a proposition,
    /// or its negation) — used by the evaluator to detect residual
    /// convergence without a full recursive scan.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Formula::Bool(_) | Formula::Atom(_)
        ) || matches!(self, Formula::Unary(UnaryOp::Not, inner) if matches!(**inner, Formula::Atom(_)))
    }

    /// Collect every distinct subformula of `self`, including `self`.
    pub fn subformulae(&self) -> HashSet<Formula<P>> {
        let mut out = HashSet::new();
        self.collect_subformulae(&mut out);
        out
    }

    /// The set of proposition identifiers occurring anywhere in `self`.
    pub fn atoms(&self) -> HashSet<Pid> {
        let mut out = HashSet::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms(&self, out: &mut HashSet<Pid>) {
        match self {
            Formula::Bool(_) => {}
            Formula::Atom(p) => {
                out.insert(p.id().clone());
            }
            Formula::Unary(_, child) => child.collect_atoms(out),
            Formula::Binary(_, left, right) => {
                left.collect_atoms(out);
                right.collect_atoms(out);
            }
        }
    }

    fn collect_subformulae(&self, out: &mut HashSet<Formula<P>>) {
        if out.contains(self) {
            return;
        }
        out.insert(self.clone());
        match self {
            Formula::Bool(_) | Formula::Atom(_) => {}
            Formula::Unary(_, child) => child.collect_subformulae(out),
            Formula::Binary(_, left, right) => {
                left.collect_subformulae(out);
                right.collect_subformulae(out);
            }
        }
    }
}

impl<P: Proposition + fmt::Display> fmt::Display for Formula<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Formula::Bool(true) => write!(f, "true"),
            Formula::Bool(false) => write!(f, "false"),
            Formula::Atom(p) => write!(f, "{p}"),
            Formula::Unary(UnaryOp::Not, child) => write!(f, "(!{child})"),
            Formula::Unary(op, child) => write!(f, "({op} {child})"),
            Formula::Binary(op, left, right) => write!(f, "({left} {op} {right})"),
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
    /// Smart constructors apply the safe simplifications the rest of the
    /// AST relies on.
    fn safe_simplifications() {
        assert_eq!(p("a").not().not(), p("a"));
        assert_eq!(p("a").and(Formula::tt()), p("a"));
        assert_eq!(p("a").or(Formula::ff()), p("a"));
        assert_eq!(p("a").and(Formula::ff()), Formula::ff());
        assert_eq!(p("a").or(Formula::tt()), Formula::tt());
        assert_eq!(p("a").finally().finally(), p("a").finally());
        assert_eq!(p("a").globally().globally(), p("a").globally());
        assert_eq!(p("a").clone().and(p("a")), p("a"));
        assert_eq!(p("a").clone().or(p("a")), p("a"));
    }

    #[test]
    fn depth_and_subformulae() {
        let phi = p("a").and(p("b").next()).finally();
        assert_eq!(phi.depth(), 3);
        // a, b, (X b), (a & X b), F(a & X b) => 5 distinct subformulae
        assert_eq!(phi.subformulae().len(), 5);
    }

    #[test]
    fn display_matches_prefix_operator_style() {
        let phi = p("a").until(p("b").not());
        assert_eq!(phi.to_string(), "(a U (!b))");
    }
}
