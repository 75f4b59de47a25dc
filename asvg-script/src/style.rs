//! Assignments to style attributes, such as `stroke = "red"`.

use asvg_error::Error;
use asvg_graph::{Marker, Style};
use crate::{error::WrongType, value::Value};

/// The names of the style attributes a script can assign to.
pub const NAMES: &[&str] = &[
    "stroke",
    "fill",
    "strokewidth",
    "strokedasharray",
    "marker",
    "markersize",
    "markerstroke",
    "markerfill",
    "markerstrokewidth",
    "fontstyle",
    "fontfamily",
    "fontsize",
    "fontweight",
    "fontstroke",
    "fontfill",
    "dotradius",
    "ticklength",
    "axesstroke",
    "gridstroke",
];

/// Returns true if `name` is a style attribute.
pub fn is_style(name: &str) -> bool {
    NAMES.contains(&name)
}

fn wrong_type(name: &str, expected: &'static str, found: &Value) -> Error {
    Error::new(vec![], WrongType {
        context: name.to_string(),
        expected,
        found: found.describe(),
    })
}

/// Reads a string attribute. Numbers are accepted and formatted, so `fontweight = 700` works.
fn text(name: &str, value: &Value) -> Result<String, Error> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        Value::Number(_) => Ok(value.to_string()),
        _ => Err(wrong_type(name, "a string", value)),
    }
}

/// Reads a numeric attribute. Numeric strings are accepted, so `fontsize = "20"` works.
fn number(name: &str, value: &Value) -> Result<f64, Error> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Str(s) => s.trim().parse().map_err(|_| wrong_type(name, "a number", value)),
        _ => Err(wrong_type(name, "a number", value)),
    }
}

/// Assigns `value` to the style attribute `name`.
///
/// Nothing is assigned if the value does not fit the attribute. The returned error carries no
/// spans.
pub fn assign(style: &mut Style, name: &str, value: &Value) -> Result<(), Error> {
    match name {
        "stroke" => style.stroke = text(name, value)?,
        "fill" => style.fill = text(name, value)?,
        "strokewidth" => style.stroke_width = number(name, value)?,
        "strokedasharray" => style.dash = match value {
            Value::Null => None,
            Value::Str(s) if s == "none" => None,
            _ => Some(text(name, value)?),
        },
        "marker" => style.marker = text(name, value)?.parse::<Marker>()?,
        "markersize" => style.marker_size = number(name, value)?,
        "markerstroke" => style.marker_stroke = text(name, value)?,
        "markerfill" => style.marker_fill = text(name, value)?,
        "markerstrokewidth" => style.marker_stroke_width = number(name, value)?,
        "fontstyle" => style.font_style = text(name, value)?,
        "fontfamily" => style.font_family = text(name, value)?,
        "fontsize" => style.font_size = number(name, value)?,
        "fontweight" => style.font_weight = text(name, value)?,
        "fontstroke" => style.font_stroke = text(name, value)?,
        "fontfill" => style.font_fill = text(name, value)?,
        "dotradius" => style.dot_radius = number(name, value)?,
        "ticklength" => style.tick_length = number(name, value)?,
        "axesstroke" => style.axes_stroke = text(name, value)?,
        "gridstroke" => style.grid_stroke = text(name, value)?,
        _ => (),
    }
    Ok(())
}
