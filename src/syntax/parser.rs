//! Contains functionality regarding parsing formula tokens into a [`Formula`].
//!
//! A recursive-descent parser, one function per precedence level, from
//! weakest-binding (outermost) to strongest-binding (innermost) — the
//! numbering follows the order each level is tried in, not operator
//! strength:
//!  - implies: 1
//!  - or: 2
//!  - and: 3
//!  - binary temporal operators (U, W, R): 4
//!  - unary operators (negation + temporal): 5
//!

use crate::formula::Formula;
use crate::syntax::tokenizer::Token;
use crate::syntax::NamedAtom;

/// Parse a flat token stream into a [`Formula`].
pub fn parse_tokens(tokens: &[Token]) -> Result<Formula<NamedAtom>, String> {
    parse_1_implies(tokens)
}

fn index_of_first(tokens: &[Token], target: &Token) -> Option<usize> {
    tokens.iter().position(|t| t == target)
}

fn index_of_first_binary_temp(tokens: &[Token]) -> Option<usize> {
    tokens.iter().position(|t| matches!(t, Token::U | Token::W | Token::R))
}

fn index_of_first_unary(tokens: &[Token]) -> Option<usize> {
    tokens.iter().position(|t| matches!(t, Token::Not | Token::X | Token::F | Token::G))
}

/// Step 1: extract `->` (right-associative).
fn parse_1_implies(tokens: &[Token]) -> Result<Formula<NamedAtom>, String> {
    Ok(if let Some(i) = index_of_first(tokens, &Token::Implies) {
        parse_2_or(&tokens[..i])?.implies(parse_1_implies(&tokens[(i + 1)..])?)
    } else {
        parse_2_or(tokens)?
    })
}

/// Step 2: extract `|` (right-associative).
fn parse_2_or(tokens: &[Token]) -> Result<Formula<NamedAtom>, String> {
    Ok(if let Some(i) = index_of_first(tokens, &Token::Or) {
        parse_3_and(&tokens[..i])?.or(parse_2_or(&tokens[(i + 1)..])?)
    } else {
        parse_3_and(tokens)?
    })
}

/// Step 3: extract `&` (right-associative).
fn parse_3_and(tokens: &[Token]) -> Result<Formula<NamedAtom>, String> {
    Ok(if let Some(i) = index_of_first(tokens, &Token::And) {
        parse_4_binary_temp(&tokens[..i])?.and(parse_3_and(&tokens[(i + 1)..])?)
    } else {
        parse_4_binary_temp(tokens)?
    })
}

/// Step 4: extract `U`, `W`, `R` (right-associative).
fn parse_4_binary_temp(tokens: &[Token]) -> Result<Formula<NamedAtom>, String> {
    Ok(if let Some(i) = index_of_first_binary_temp(tokens) {
        let left = parse_5_unary(&tokens[..i])?;
        let right = parse_4_binary_temp(&tokens[(i + 1)..])?;
        match &tokens[i] {
            Token::U => left.until(right),
            Token::W => left.weak_until(right),
            Token::R => left.release(right),
            _ => unreachable!(),
        }
    } else {
        parse_5_unary(tokens)?
    })
}

/// Step 5: extract prefix `!`, `X`, `F`, `G`.
fn parse_5_unary(tokens: &[Token]) -> Result<Formula<NamedAtom>, String> {
    Ok(if let Some(i) = index_of_first_unary(tokens) {
        if i > 0 {
            return Err(format!("Unary operator can't be directly preceded by {}.", tokens[i - 1]));
        }
        let inner = parse_5_unary(&tokens[1..])?;
        match &tokens[0] {
            Token::Not => inner.not(),
            Token::X => inner.next(),
            Token::F => inner.finally(),
            Token::G => inner.globally(),
            _ => unreachable!(),
        }
    } else {
        parse_6_terminal(tokens)?
    })
}

/// Step 6: extract terminals (atoms, constants) and recurse into parentheses.
fn parse_6_terminal(tokens: &[Token]) -> Result<Formula<NamedAtom>, String> {
    if tokens.len() != 1 {
        return Err(format!("Unexpected token sequence {tokens:?}, expecting a single formula."));
    }
    match &tokens[0] {
        Token::Bool(b) => Ok(if *b { Formula::tt() } else { Formula::ff() }),
        Token::Atom(name) => Ok(Formula::atom(NamedAtom::new(name.clone()))),
        Token::Tokens(inner) => parse_1_implies(inner),
        other => Err(format!("Unexpected token '{other}', expecting a formula.")),
    }
}
