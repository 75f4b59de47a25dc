//! Errors raised while parsing a drawing script.

use ariadne::Fmt;
use asvg_attrs::ErrorKind;
use asvg_error::EXPR;
use crate::tokenizer::TokenKind;

/// A statement did not start with a command call or an assignment.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a command or an assignment",
    labels = [match found {
        Some(kind) => format!("found {:?} here", kind),
        None => "the statement ends here".to_string(),
    }],
    help = format!("statements look like {} or {}", "line([0,0], [1,1])".fg(EXPR), "stroke = \"red\"".fg(EXPR)),
    category = Syntax,
)]
pub struct ExpectedStatement {
    /// The token that was found, if any.
    pub found: Option<TokenKind>,
}

/// Something other than a statement separator followed a statement.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of statement",
    labels = ["I could not understand this part of the statement"],
    help = "separate statements with a new line or `;`",
    category = Syntax,
)]
pub struct ExpectedSeparator;

/// An argument was left empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing argument",
    labels = ["add a value here"],
    category = Syntax,
)]
pub struct ExpectedArgument;

/// A parenthesis or bracket was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unclosed `{}`", opening),
    labels = ["this is never closed"],
    help = format!("add a matching `{}`", if *opening == '(' { ')' } else { ']' }),
    category = Syntax,
)]
pub struct UnclosedDelimiter {
    /// The opening character, `(` or `[`.
    pub opening: char,
}

/// A string literal was not terminated on the same line.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unterminated string",
    labels = ["this string is never closed"],
    help = "add a matching quote before the end of the line",
    category = Syntax,
)]
pub struct UnterminatedString;
