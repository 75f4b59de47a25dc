//! Errors raised while parsing a normalized expression.
//!
//! A normalized expression that fails to parse cannot be evaluated, so these errors belong to the
//! [`Evaluation`](asvg_error::Category::Evaluation) category.

use ariadne::Fmt;
use asvg_attrs::ErrorKind;
use asvg_error::EXPR;
use crate::tokenizer::TokenKind;

/// Lists token kinds for a help message.
fn list(kinds: &[TokenKind]) -> String {
    kinds.iter().map(|kind| format!("{:?}", kind)).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("an {} is missing here", "operand".fg(EXPR))],
    category = Evaluation,
)]
pub struct UnexpectedEof;

/// Something follows a complete expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of expression",
    labels = ["the expression ends before this"],
    help = format!("check for a missing {} between the two parts", "operator".fg(EXPR)),
    category = Evaluation,
)]
pub struct ExpectedEof;

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [if expected.is_empty() {
        "this token cannot appear here".to_string()
    } else {
        format!("expected one of: {}", list(expected))
    }],
    help = format!("found {:?}", found),
    category = Evaluation,
)]
pub struct UnexpectedToken {
    pub expected: &'static [TokenKind],
    pub found: TokenKind,
}

/// A parenthesis has no partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis has no partner"],
    help = if *opening {
        "add a `)` after the expression it opens"
    } else {
        "add a `(` before the expression it closes"
    },
    category = Evaluation,
)]
pub struct UnclosedParenthesis {
    /// True for a `(` without a `)`, false for a `)` without a `(`.
    pub opening: bool,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
    category = Evaluation,
)]
pub struct EmptyParenthesis;
