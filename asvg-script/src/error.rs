//! Errors raised while running a drawing script.

use ariadne::Fmt;
use asvg_attrs::ErrorKind;
use asvg_error::EXPR;

/// Formats a list of suggested names into a help message.
fn suggest(suggestions: &[String]) -> String {
    match suggestions {
        [] => "no command with a similar name exists".to_string(),
        [one] => format!("did you mean `{}`?", one.fg(EXPR)),
        _ => format!(
            "did you mean one of these? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// The command does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` command does not exist", name),
    labels = ["this command"],
    help = suggest(suggestions),
    category = Evaluation,
)]
pub struct UnknownCommand {
    /// The name of the command.
    pub name: String,

    /// Similarly named commands, if any.
    pub suggestions: Vec<String>,
}

/// Too many arguments were given to a command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("too many arguments were given to the `{}` command", name),
    labels = ["this command", ""],
    help = format!(
        "the `{}` command takes at most {} argument(s); there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given
    ),
    category = Evaluation,
)]
pub struct TooManyArguments {
    pub name: String,
    pub expected: usize,
    pub given: usize,
}

/// A required argument to a command is missing.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument #{} for the `{}` command", index + 1, name),
    labels = ["this command"],
    help = format!(
        "the `{}` command takes at least {} argument(s); there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given
    ),
    category = Evaluation,
)]
pub struct MissingArgument {
    pub name: String,

    /// The index of the first missing argument.
    pub index: usize,

    pub expected: usize,
    pub given: usize,
}

/// A value has the wrong type for where it is used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {}, found {}", expected, found),
    labels = [format!("this is {}", found)],
    help = format!("`{}` requires {} here", context.fg(EXPR), expected),
    category = Evaluation,
)]
pub struct WrongType {
    /// The command or assignment the value was given to.
    pub context: String,

    /// A description of the expected type, such as `a point`.
    pub expected: &'static str,

    /// A description of the value that was found.
    pub found: &'static str,
}
