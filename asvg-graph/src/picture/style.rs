use asvg_error::Error;
use crate::error::UnsupportedValue;
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The decoration drawn at the endpoints or vertices of lines, paths and arcs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Marker {
    #[default]
    None,

    /// A dot at each endpoint or vertex.
    Dot,

    /// An arrowhead at the end.
    Arrow,

    /// A dot at each endpoint and an arrowhead at the end.
    ArrowDot,
}

impl Marker {
    const NAMES: &'static [&'static str] = &["none", "dot", "arrow", "arrowdot"];

    /// Returns true if the marker draws dots.
    pub fn has_dots(self) -> bool {
        matches!(self, Marker::Dot | Marker::ArrowDot)
    }

    /// Returns true if the marker draws an arrowhead.
    pub fn has_arrow(self) -> bool {
        matches!(self, Marker::Arrow | Marker::ArrowDot)
    }
}

impl FromStr for Marker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Marker::None),
            "dot" => Ok(Marker::Dot),
            "arrow" => Ok(Marker::Arrow),
            "arrowdot" => Ok(Marker::ArrowDot),
            _ => Err(Error::new(vec![], UnsupportedValue {
                kind: "marker",
                value: s.to_string(),
                expected: Marker::NAMES,
            })),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Marker::None => "none",
            Marker::Dot => "dot",
            Marker::Arrow => "arrow",
            Marker::ArrowDot => "arrowdot",
        };
        write!(f, "{}", name)
    }
}

/// The drawing attributes consulted by every primitive.
///
/// Colors are kept as the strings given by the script (color names or `#rrggbb`) and passed
/// through to the output unchanged.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    pub stroke: String,
    pub fill: String,
    pub stroke_width: f64,

    /// The dash pattern, such as `"5 2"`. [`None`] draws solid lines.
    pub dash: Option<String>,

    pub marker: Marker,

    /// The radius of marker dots, in pixels.
    pub marker_size: f64,
    pub marker_stroke: String,
    pub marker_fill: String,
    pub marker_stroke_width: f64,

    pub font_style: String,
    pub font_family: String,

    /// The font size, in pixels. Text offsets are computed from it.
    pub font_size: f64,
    pub font_weight: String,

    /// The outline color of text, or `"none"` to leave it to the renderer.
    pub font_stroke: String,

    /// The color of text, or `"none"` to leave it to the renderer.
    pub font_fill: String,

    /// The radius of the dots drawn by `dot`, in pixels.
    pub dot_radius: f64,

    /// Half the length of axis ticks and of the `+`, `-` and `|` dots, in pixels.
    pub tick_length: f64,

    pub axes_stroke: String,
    pub grid_stroke: String,
}

/// The style restored whenever a picture is initialized:
///
/// | attribute | default |
/// |-----------|---------|
/// | stroke / fill / stroke width | `black` / `none` / `1` |
/// | dash | none |
/// | marker | `none`, size `4`, stroke `black`, fill `yellow`, stroke width `1` |
/// | font | `normal` `sans` `16` `normal`, stroke and fill `none` |
/// | dot radius / tick length | `4` / `4` |
/// | axes stroke / grid stroke | `black` / `grey` |
impl Default for Style {
    fn default() -> Style {
        Style {
            stroke: "black".to_string(),
            fill: "none".to_string(),
            stroke_width: 1.0,
            dash: None,
            marker: Marker::None,
            marker_size: 4.0,
            marker_stroke: "black".to_string(),
            marker_fill: "yellow".to_string(),
            marker_stroke_width: 1.0,
            font_style: "normal".to_string(),
            font_family: "sans".to_string(),
            font_size: 16.0,
            font_weight: "normal".to_string(),
            font_stroke: "none".to_string(),
            font_fill: "none".to_string(),
            dot_radius: 4.0,
            tick_length: 4.0,
            axes_stroke: "black".to_string(),
            grid_stroke: "grey".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use asvg_error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_marker() {
        assert_eq!("arrowdot".parse::<Marker>().unwrap(), Marker::ArrowDot);
        assert!(Marker::ArrowDot.has_dots() && Marker::ArrowDot.has_arrow());
        assert!(!Marker::Arrow.has_dots());

        let err = "star".parse::<Marker>().unwrap_err();
        assert_eq!(err.category(), Category::UnsupportedOperation);
        assert_eq!(err.to_string(), "unsupported operation: `star` is not a recognized marker");
    }
}
