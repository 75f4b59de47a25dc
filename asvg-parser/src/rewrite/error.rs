//! Errors raised while rewriting shorthand notation.

use ariadne::Fmt;
use asvg_attrs::ErrorKind;
use asvg_error::EXPR;

/// An operator is missing one of its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument in `{}` at position {}", text, position),
    labels = [format!("this `{}` needs an operand on its {}", operator.fg(EXPR), if *left { "left" } else { "right" })],
    category = Syntax,
)]
pub struct MissingOperand {
    /// The operator, `^` or `!`.
    pub operator: char,

    /// Whether the missing operand is the left one.
    pub left: bool,

    /// The text being rewritten when the error occurred.
    pub text: String,

    /// The character index of the operator in `text`.
    pub position: usize,
}

/// The character next to an operator cannot start or end an operand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("incorrect syntax in `{}` at position {}", text, position),
    labels = [format!("`{}` cannot be used as an operand of `{}`", found, operator.fg(EXPR))],
    help = "operands must be numbers, names, function calls, or parenthesized expressions",
    category = Syntax,
)]
pub struct UnrecognizedOperand {
    /// The operator, `^` or `!`.
    pub operator: char,

    /// The offending character.
    pub found: char,

    /// The text being rewritten when the error occurred.
    pub text: String,

    /// The character index of the offending character in `text`.
    pub position: usize,
}
