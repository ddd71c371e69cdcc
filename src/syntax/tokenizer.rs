//! Contains functionality regarding the tokenizing of an infix LTL formula string.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A single token of an infix LTL formula string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    Not,
    And,
    Or,
    Implies,
    X,
    F,
    G,
    U,
    W,
    R,
    Bool(bool),
    Atom(String),
    /// A block of tokens inside a matching pair of parentheses.
    Tokens(Vec<Token>),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Not => write!(f, "!"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::Implies => write!(f, "->"),
            Token::X | Token::F | Token::G | Token::U | Token::W | Token::R => write!(f, "{self:?}"),
            Token::Bool(b) => write!(f, "{b}"),
            Token::Atom(name) => write!(f, "{name}"),
            Token::Tokens(_) => write!(f, "( ... )"),
        }
    }
}

/// Tokenize an infix LTL formula string.
pub fn tokenize(formula: &str) -> Result<Vec<Token>, String> {
    tokenize_recursive(&mut formula.chars().peekable(), true)
}

fn tokenize_recursive(chars: &mut Peekable<Chars>, top_level: bool) -> Result<Vec<Token>, String> {
    let mut out = Vec::new();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '!' => out.push(Token::Not),
            '&' => out.push(Token::And),
            '|' => out.push(Token::Or),
            '-' => {
                if chars.next() == Some('>') {
                    out.push(Token::Implies);
                } else {
                    return Err("Expected '>' after '-'.".to_string());
                }
            }
            '(' => {
                let group = tokenize_recursive(chars, false)?;
                out.push(Token::Tokens(group));
            }
            ')' => {
                return if !top_level {
                    Ok(out)
                } else {
                    Err("Unexpected ')' without opening counterpart.".to_string())
                }
            }
            // reserved single-letter temporal operators, unless they are just
            // the start of a longer proposition name.
            c if is_reserved_letter(c) && !is_valid_in_name_optional(chars.peek()) => {
                out.push(match c {
                    'X' => Token::X,
                    'F' => Token::F,
                    'G' => Token::G,
                    'U' => Token::U,
                    'W' => Token::W,
                    'R' => Token::R,
                    _ => unreachable!(),
                });
            }
            c if is_valid_in_name(c) => {
                let name = c.to_string() + &collect_name(chars);
                out.push(match name.as_str() {
                    "true" | "True" => Token::Bool(true),
                    "false" | "False" => Token::Bool(false),
                    _ => Token::Atom(name),
                });
            }
            _ => return Err(format!("Unexpected char '{c}'.")),
        }
    }

    if top_level {
        Ok(out)
    } else {
        Err("Expected ')' to match a previously encountered opening counterpart.".to_string())
    }
}

fn is_reserved_letter(c: char) -> bool {
    matches!(c, 'X' | 'F' | 'G' | 'U' | 'W' | 'R')
}

fn is_valid_in_name(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_valid_in_name_optional(c: Option<&char>) -> bool {
    c.is_some_and(|c| is_valid_in_name(*c))
}

fn collect_name(chars: &mut Peekable<Chars>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if !is_valid_in_name(c) {
            break;
        }
        name.push(c);
        chars.next();
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_atoms_and_connectives() {
        let tokens = tokenize("p & q | !r").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Atom("p".to_string()),
                Token::And,
                Token::Atom("q".to_string()),
                Token::Or,
                Token::Not,
                Token::Atom("r".to_string()),
            ]
        );
    }

    #[test]
    fn reserved_letters_do_not_split_longer_names() {
        let tokens = tokenize("Foo U Bar").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Atom("Foo".to_string()),
                Token::U,
                Token::Atom("Bar".to_string()),
            ]
        );
    }

    #[test]
    fn groups_parenthesised_blocks() {
        let tokens = tokenize("(p & q) U r").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Tokens(vec![
                    Token::Atom("p".to_string()),
                    Token::And,
                    Token::Atom("q".to_string()),
                ]),
                Token::U,
                Token::Atom("r".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert!(tokenize("(p & q").is_err());
        assert!(tokenize("p & q)").is_err());
    }
}
