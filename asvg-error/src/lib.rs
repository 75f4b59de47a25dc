//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that carries an [`ErrorKind`] together with the regions of
//! source code it originated from.

#[cfg(test)]
extern crate self as asvg_error;

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad class an error belongs to.
///
/// Callers can use the category to decide how to present an error without inspecting the
/// concrete [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// The picture was set up with invalid bounds or spacing.
    Configuration,

    /// A shorthand math expression is missing an operand, or a script statement is malformed.
    Syntax,

    /// A normalized expression could not be parsed or evaluated, or a command was used
    /// incorrectly.
    Evaluation,

    /// A style, marker, or placement value is not recognized.
    UnsupportedOperation,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration error"),
            Self::Syntax => write!(f, "syntax error"),
            Self::Evaluation => write!(f, "evaluation error"),
            Self::UnsupportedOperation => write!(f, "unsupported operation"),
        }
    }
}

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// The category this error belongs to.
    fn category(&self) -> Category;

    /// The plain message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// The category of the underlying error kind.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Moves every span of this error onto a single region of an enclosing source.
    ///
    /// Used when an error was raised against text that was extracted from a larger source (for
    /// example, a math argument inside a script statement), and the spans into the extracted
    /// text are meaningless to the caller.
    pub fn relocate(mut self, outer: Range<usize>) -> Self {
        if self.spans.is_empty() {
            self.spans.push(outer);
        } else {
            for span in &mut self.spans {
                *span = outer.clone();
            }
        }
        self
    }

    /// Shifts every span of this error forward by `offset` bytes.
    pub fn offset(mut self, offset: usize) -> Self {
        for span in &mut self.spans {
            *span = span.start + offset..span.end + offset;
        }
        self
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error to standard error, highlighting the given source.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> std::io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use asvg_attrs::ErrorKind;
    use pretty_assertions::assert_eq;

    /// Test error with named fields.
    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown thing: `{}`", name),
        labels = ["here"],
        help = "try something else",
        category = Evaluation,
    )]
    struct UnknownThing {
        name: String,
    }

    /// Test error without fields.
    #[derive(Debug, ErrorKind)]
    #[error(message = "bad bounds", category = Configuration)]
    struct BadBounds;

    #[test]
    fn display_uses_category_and_message() {
        let err = Error::new(vec![3..8], UnknownThing { name: "thing".to_string() });
        assert_eq!(err.category(), Category::Evaluation);
        assert_eq!(err.to_string(), "evaluation error: unknown thing: `thing`");
    }

    #[test]
    fn relocate_replaces_spans() {
        let err = Error::new(vec![0..1, 4..5], BadBounds).relocate(10..20);
        assert_eq!(err.spans, vec![10..20, 10..20]);

        let err = Error::new(vec![], BadBounds).relocate(2..3);
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn offset_shifts_spans() {
        let err = Error::new(vec![0..1, 4..5], BadBounds).offset(10);
        assert_eq!(err.spans, vec![10..11, 14..15]);
    }

    #[test]
    fn report_without_spans() {
        let err = Error::new(vec![], BadBounds);
        let mut out = Vec::new();
        err.build_report("input").write(("input", Source::from("")), &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("bad bounds"));
    }
}
