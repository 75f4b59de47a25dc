//! Errors raised while configuring or drawing a picture.
//!
//! None of these errors carry spans of their own; the script interpreter relocates them onto the
//! statement that caused them.

use ariadne::Fmt;
use asvg_attrs::ErrorKind;
use asvg_error::EXPR;

/// The canvas has no area.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("a {}x{} canvas cannot be drawn on", width, height),
    labels = ["this picture"],
    help = "the width and height of a picture must be positive numbers",
    category = Configuration,
)]
pub struct InvalidCanvas {
    /// The requested width, in pixels.
    pub width: f64,

    /// The requested height, in pixels.
    pub height: f64,
}

/// The horizontal range of the viewport is empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "picture requires at least two numbers: xmin < xmax",
    labels = [format!("xmin is {} and xmax is {} here", xmin, xmax)],
    category = Configuration,
)]
pub struct InvalidXRange {
    pub xmin: f64,
    pub xmax: f64,
}

/// The vertical range of the viewport is empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "picture requires numbers ymin < ymax",
    labels = [format!("ymin is {} and ymax is {} here", ymin, ymax)],
    category = Configuration,
)]
pub struct InvalidYRange {
    pub ymin: f64,
    pub ymax: f64,
}

/// `ymax` was given without `ymin`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "picture requires ymin when ymax is given",
    labels = ["this picture"],
    help = format!("give both bounds, for example: {}", "initPicture(-5, 5, -2, 2)".fg(EXPR)),
    category = Configuration,
)]
pub struct MissingYMin;

/// A tick, grid or slope field spacing is not a positive number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` spacing must be a positive number, but it is {}", name, value),
    labels = ["this spacing"],
    category = Configuration,
)]
pub struct InvalidSpacing {
    /// The name of the spacing.
    pub name: &'static str,

    /// The value that was given.
    pub value: f64,
}

/// A style or layout value is not one of the recognized values.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a recognized {}", value, kind),
    labels = ["this value"],
    help = format!(
        "expected one of: {}",
        expected.iter()
            .map(|s| format!("`{}`", s.fg(EXPR)))
            .collect::<Vec<_>>()
            .join(", ")
    ),
    category = UnsupportedOperation,
)]
pub struct UnsupportedValue {
    /// What the value describes, such as `marker`.
    pub kind: &'static str,

    /// The value that was given.
    pub value: String,

    /// The recognized values.
    pub expected: &'static [&'static str],
}
