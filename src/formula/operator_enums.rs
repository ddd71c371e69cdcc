//! Enum structures for the operators and terminals that occur in an LTL formula.

use std::fmt;

/// Enum for all unary operators occurring in an LTL formula.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum UnaryOp {
    Not, // '!'
    X,   // 'X' (next)
    F,   // 'F' (finally / eventually)
    G,   // 'G' (globally / always)
}

/// Enum for all binary operators occurring in an LTL formula.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum BinaryOp {
    And,     // '&'
    Or,      // '|'
    Implies, // '->'
    U,       // 'U' (strong until)
    W,       // 'W' (weak until)
    R,       // 'R' (release)
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "!"),
            c => write!(f, "{c:?}"),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOp::And => write!(f, "&"),
            BinaryOp::Or => write!(f, "|"),
            BinaryOp::Implies => write!(f, "->"),
            c => write!(f, "{c:?}"),
        }
    }
}
