//! Errors raised while compiling an expression.

use ariadne::Fmt;
use asvg_attrs::ErrorKind;
use asvg_error::EXPR;

/// Help text offering the names closest to a misspelled one.
fn suggest(kind: &str, suggestions: &[String]) -> String {
    match suggestions {
        [] => format!("no {kind} has a similar name"),
        [one] => format!("perhaps you meant `{}`", one.fg(EXPR)),
        _ => format!(
            "perhaps you meant one of {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// A name that is neither a parameter, a variable of the context nor a constant.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", name),
    labels = ["this variable"],
    help = suggest("variable", suggestions),
    category = Evaluation,
)]
pub struct UndefinedVariable {
    pub name: String,

    /// Parameters and variables with similar names.
    pub suggestions: Vec<String>,
}

/// A call to a function that is not in the builtin library.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", name),
    labels = ["this function"],
    help = suggest("function", suggestions),
    category = Evaluation,
)]
pub struct UndefinedFunction {
    pub name: String,

    /// Builtin functions with similar names.
    pub suggestions: Vec<String>,
}

/// A call with more arguments than the function accepts.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("too many arguments were given to the `{}` function", name),
    labels = ["this function call", ""],
    help = format!(
        "`{}` accepts up to {} argument(s), but {} were given",
        name.fg(EXPR),
        expected,
        given
    ),
    category = Evaluation,
)]
pub struct TooManyArguments {
    pub name: String,

    /// The maximum number of arguments.
    pub expected: usize,
    pub given: usize,
}

/// A call with fewer arguments than the function needs.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument #{} for the `{}` function", index + 1, name),
    labels = ["this function call", ""],
    help = format!(
        "`{}` needs at least {} argument(s), but {} were given",
        name.fg(EXPR),
        expected,
        given
    ),
    category = Evaluation,
)]
pub struct MissingArgument {
    pub name: String,

    /// Zero-based index of the first missing argument.
    pub index: usize,

    /// The minimum number of arguments.
    pub expected: usize,
    pub given: usize,
}
