//! Renderer-agnostic drawing elements, in device coordinates.

use std::fmt::{self, Display, Formatter};
use super::point::DevicePoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Formats a number the way it is written into path data and attributes: the shortest
/// representation that round-trips, and `0` instead of `-0`.
pub fn fmt_num(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// A single path command, in device coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    MoveTo(DevicePoint),
    LineTo(DevicePoint),

    /// A quadratic Bézier segment whose control point is the reflection of the previous one.
    SmoothQuadTo(DevicePoint),

    /// A cubic Bézier segment: two control points, then the end point.
    CubicTo(DevicePoint, DevicePoint, DevicePoint),

    /// An elliptical arc drawn counter-clockwise on the screen, taking the small arc.
    ArcTo {
        rx: f64,
        ry: f64,
        to: DevicePoint,
    },

    Close,
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let p = |point: &DevicePoint| format!("{},{}", fmt_num(point.0), fmt_num(point.1));
        match self {
            Command::MoveTo(to) => write!(f, "M{}", p(to)),
            Command::LineTo(to) => write!(f, "L{}", p(to)),
            Command::SmoothQuadTo(to) => write!(f, "T{}", p(to)),
            Command::CubicTo(c1, c2, to) => write!(f, "C{} {} {}", p(c1), p(c2), p(to)),
            Command::ArcTo { rx, ry, to } => write!(f, "A{},{} 0 0,0 {}", fmt_num(*rx), fmt_num(*ry), p(to)),
            Command::Close => write!(f, "z"),
        }
    }
}

/// The geometry of a path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathData {
    /// A list of commands built by the primitives.
    Commands(Vec<Command>),

    /// Path data given verbatim by the script, already in device coordinates.
    Raw(String),
}

impl Display for PathData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PathData::Commands(commands) => {
                for (i, command) in commands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", command)?;
                }
                Ok(())
            },
            PathData::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

/// Where the anchor point of text lies, horizontally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl Display for TextAnchor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TextAnchor::Start => write!(f, "start"),
            TextAnchor::Middle => write!(f, "middle"),
            TextAnchor::End => write!(f, "end"),
        }
    }
}

/// The font attributes of a text element.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Font {
    pub style: String,
    pub family: String,
    pub size: f64,
    pub weight: String,
}

/// The shape of an element.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    Path(PathData),
    Circle {
        center: DevicePoint,
        r: f64,
    },
    Ellipse {
        center: DevicePoint,
        rx: f64,
        ry: f64,
    },
    Rect {
        /// The top left corner.
        corner: DevicePoint,
        width: f64,
        height: f64,
        rx: Option<f64>,
        ry: Option<f64>,
    },
    Text {
        position: DevicePoint,
        content: String,
        anchor: TextAnchor,
        font: Font,
    },
}

impl Shape {
    /// Returns the name of the element kind, as used in an SVG document.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Path(_) => "path",
            Shape::Circle { .. } => "circle",
            Shape::Ellipse { .. } => "ellipse",
            Shape::Rect { .. } => "rect",
            Shape::Text { .. } => "text",
        }
    }
}

/// The stroke and fill of an element. Attributes that are [`None`] are left to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paint {
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub stroke_width: Option<f64>,
    pub dash: Option<String>,
}

impl Paint {
    /// Creates paint with the given stroke, fill and stroke width.
    pub fn new(stroke: &str, fill: &str, stroke_width: f64) -> Paint {
        Paint {
            stroke: Some(stroke.to_string()),
            fill: Some(fill.to_string()),
            stroke_width: Some(stroke_width),
            dash: None,
        }
    }

    /// Sets the dash pattern. Returns the paint itself to allow chaining.
    pub fn with_dash(mut self, dash: Option<&str>) -> Paint {
        self.dash = dash.map(str::to_string);
        self
    }
}

/// A drawn element.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    /// The identity of the element, if it is addressable.
    pub id: Option<String>,

    pub shape: Shape,
    pub paint: Paint,
}

impl Element {
    /// Creates an anonymous element.
    pub fn new(shape: Shape, paint: Paint) -> Element {
        Element { id: None, shape, paint }
    }

    /// Sets the identity of the element. Returns the element itself to allow chaining.
    pub fn with_id(mut self, id: Option<&str>) -> Element {
        self.id = id.map(str::to_string);
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn path_data() {
        let data = PathData::Commands(vec![
            Command::MoveTo(DevicePoint(150.0, -0.0)),
            Command::LineTo(DevicePoint(180.5, 70.0)),
            Command::ArcTo { rx: 30.0, ry: 30.0, to: DevicePoint(1.0, 2.0) },
            Command::Close,
        ]);
        assert_eq!(data.to_string(), "M150,0 L180.5,70 A30,30 0 0,0 1,2 z");
    }
}
