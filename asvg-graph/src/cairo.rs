//! Replay of a picture onto a [`cairo`](::cairo) context.
//!
//! This module is available with the `cairo` feature. Since cairo can render to many formats,
//! this is the way to turn a picture into a PNG image:
//!
//! ```no_run
//! use asvg_graph::{Picture, PictureOptions};
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut picture = Picture::new(PictureOptions::default())?;
//! picture.init(None, None, None, None)?;
//! picture.axes(&Default::default())?;
//!
//! let surface = asvg_graph::cairo::draw(&picture)?;
//! let mut file = File::create("output.png")?;
//! surface.write_to_png(&mut file)?;
//! # Ok(())
//! # }
//! ```
//!
//! Raw path data given verbatim by a script is not interpreted, and is skipped with a warning.

use ::cairo::{Context, Error, FontSlant, FontWeight, Format, ImageSurface};
use crate::{
    picture::{
        element::{Command, Element, Paint, PathData, Shape},
        point::DevicePoint,
        scene::Scene,
        Picture,
    },
    text_align::ShowTextAnchored,
};
use log::warn;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// An RGB color, with each component between `0.0` and `1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub f64, pub f64, pub f64);

/// Named colors understood by [`parse_color`].
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("brown", (165, 42, 42)),
    ("pink", (255, 192, 203)),
    ("grey", (128, 128, 128)),
    ("gray", (128, 128, 128)),
    ("lightgrey", (211, 211, 211)),
    ("lightgray", (211, 211, 211)),
    ("darkgrey", (169, 169, 169)),
    ("darkgray", (169, 169, 169)),
];

/// Parses a color written as `#rgb`, `#rrggbb` or a common color name. Returns [`None`] for
/// `none` and for anything not understood.
pub fn parse_color(color: &str) -> Option<Rgb> {
    let color = color.trim().to_ascii_lowercase();
    let (r, g, b) = if let Some(hex) = color.strip_prefix('#') {
        let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
        match hex.len() {
            3 => (digit(0, 1)? * 17, digit(1, 1)? * 17, digit(2, 1)? * 17),
            6 => (digit(0, 2)?, digit(2, 2)?, digit(4, 2)?),
            _ => return None,
        }
    } else {
        NAMED_COLORS.iter().find(|(name, _)| *name == color)?.1
    };
    Some(Rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0))
}

/// Resolves an optional paint color. Absent colors use the fallback, `none` means nothing is
/// painted, and unknown colors are painted black.
fn resolve(color: Option<&str>, fallback: Option<Rgb>) -> Option<Rgb> {
    match color {
        None => fallback,
        Some("none") => None,
        Some(color) => parse_color(color).or_else(|| {
            warn!("unknown color `{}`, using black", color);
            Some(Rgb(0.0, 0.0, 0.0))
        }),
    }
}

/// Parses an SVG dash array such as `5 3` or `5,3`.
fn parse_dash(dash: &str) -> Vec<f64> {
    dash.split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|part| part.parse().ok())
        .collect()
}

/// Adds an elliptical arc centered on `(cx, cy)` to the current path.
fn ellipse_arc(
    context: &Context,
    (cx, cy): (f64, f64),
    (rx, ry): (f64, f64),
    (a1, a2): (f64, f64),
    negative: bool,
) -> Result<(), Error> {
    context.save()?;
    context.translate(cx, cy);
    context.scale(rx, ry);
    if negative {
        context.arc_negative(0.0, 0.0, 1.0, a1, a2);
    } else {
        context.arc(0.0, 0.0, 1.0, a1, a2);
    }
    context.restore()
}

/// Adds the small, counter-clockwise elliptical arc from `from` to `to` to the current path,
/// converting the endpoint form of an SVG arc to its center form.
fn arc_to(context: &Context, from: DevicePoint, rx: f64, ry: f64, to: DevicePoint) -> Result<(), Error> {
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 || from == to {
        context.line_to(to.0, to.1);
        return Ok(());
    }

    let x1 = (from.0 - to.0) / 2.0;
    let y1 = (from.1 - to.1) / 2.0;
    let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
    if lambda > 1.0 {
        rx *= lambda.sqrt();
        ry *= lambda.sqrt();
    }

    // large-arc and sweep flags are both zero, so the center is on the negative side
    let num = rx * rx * ry * ry - rx * rx * y1 * y1 - ry * ry * x1 * x1;
    let den = rx * rx * y1 * y1 + ry * ry * x1 * x1;
    let coef = -(num / den).max(0.0).sqrt();
    let cx1 = coef * rx * y1 / ry;
    let cy1 = -coef * ry * x1 / rx;

    let center = (cx1 + (from.0 + to.0) / 2.0, cy1 + (from.1 + to.1) / 2.0);
    let a1 = ((y1 - cy1) / ry).atan2((x1 - cx1) / rx);
    let a2 = ((-y1 - cy1) / ry).atan2((-x1 - cx1) / rx);
    ellipse_arc(context, center, (rx, ry), (a1, a2), true)
}

/// Adds path commands to the current path.
fn trace_commands(context: &Context, commands: &[Command]) -> Result<(), Error> {
    let mut current = DevicePoint(0.0, 0.0);
    let mut start = current;

    // the control point of the previous quadratic segment, if the previous command was one
    let mut quad_control = None;

    for command in commands {
        let mut next_control = None;
        match *command {
            Command::MoveTo(to) => {
                context.move_to(to.0, to.1);
                start = to;
                current = to;
            },
            Command::LineTo(to) => {
                context.line_to(to.0, to.1);
                current = to;
            },
            Command::SmoothQuadTo(to) => {
                let c = match quad_control {
                    Some(DevicePoint(x, y)) => DevicePoint(2.0 * current.0 - x, 2.0 * current.1 - y),
                    None => current,
                };
                context.curve_to(
                    current.0 + 2.0 / 3.0 * (c.0 - current.0),
                    current.1 + 2.0 / 3.0 * (c.1 - current.1),
                    to.0 + 2.0 / 3.0 * (c.0 - to.0),
                    to.1 + 2.0 / 3.0 * (c.1 - to.1),
                    to.0,
                    to.1,
                );
                next_control = Some(c);
                current = to;
            },
            Command::CubicTo(c1, c2, to) => {
                context.curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
                current = to;
            },
            Command::ArcTo { rx, ry, to } => {
                arc_to(context, current, rx, ry, to)?;
                current = to;
            },
            Command::Close => {
                context.close_path();
                current = start;
            },
        }
        quad_control = next_control;
    }
    Ok(())
}

/// Adds a rectangle with optionally rounded corners to the current path.
fn rounded_rect(
    context: &Context,
    corner: DevicePoint,
    (width, height): (f64, f64),
    (rx, ry): (Option<f64>, Option<f64>),
) -> Result<(), Error> {
    let rx = rx.or(ry).unwrap_or(0.0).clamp(0.0, width / 2.0);
    let ry = ry.or(Some(rx)).unwrap_or(0.0).clamp(0.0, height / 2.0);
    if rx == 0.0 || ry == 0.0 {
        context.rectangle(corner.0, corner.1, width, height);
        return Ok(());
    }

    let DevicePoint(x, y) = corner;
    context.new_sub_path();
    ellipse_arc(context, (x + width - rx, y + ry), (rx, ry), (-FRAC_PI_2, 0.0), false)?;
    ellipse_arc(context, (x + width - rx, y + height - ry), (rx, ry), (0.0, FRAC_PI_2), false)?;
    ellipse_arc(context, (x + rx, y + height - ry), (rx, ry), (FRAC_PI_2, PI), false)?;
    ellipse_arc(context, (x + rx, y + ry), (rx, ry), (PI, 1.5 * PI), false)?;
    context.close_path();
    Ok(())
}

/// Fills and strokes the current path with the given paint. Absent fills are black and absent
/// strokes are not drawn, as in an SVG document.
fn apply_paint(context: &Context, paint: &Paint) -> Result<(), Error> {
    if let Some(Rgb(r, g, b)) = resolve(paint.fill.as_deref(), Some(Rgb(0.0, 0.0, 0.0))) {
        context.set_source_rgb(r, g, b);
        context.fill_preserve()?;
    }
    if let Some(Rgb(r, g, b)) = resolve(paint.stroke.as_deref(), None) {
        context.set_source_rgb(r, g, b);
        context.set_line_width(paint.stroke_width.unwrap_or(1.0));
        context.set_dash(&paint.dash.as_deref().map(parse_dash).unwrap_or_default(), 0.0);
        context.stroke_preserve()?;
    }
    context.new_path();
    Ok(())
}

/// Draws one element onto the context.
pub fn draw_element(context: &Context, element: &Element) -> Result<(), Error> {
    context.new_path();
    match &element.shape {
        Shape::Path(PathData::Commands(commands)) => trace_commands(context, commands)?,
        Shape::Path(PathData::Raw(raw)) => {
            warn!("skipping raw path data `{}`", raw);
            return Ok(());
        },
        Shape::Circle { center, r } => context.arc(center.0, center.1, *r, 0.0, TAU),
        Shape::Ellipse { center, rx, ry } => {
            ellipse_arc(context, (center.0, center.1), (*rx, *ry), (0.0, TAU), false)?;
        },
        Shape::Rect { corner, width, height, rx, ry } => {
            rounded_rect(context, *corner, (*width, *height), (*rx, *ry))?;
        },
        Shape::Text { position, content, anchor, font } => {
            let slant = match font.style.as_str() {
                "italic" => FontSlant::Italic,
                "oblique" => FontSlant::Oblique,
                _ => FontSlant::Normal,
            };
            let weight = match font.weight.as_str() {
                "bold" | "bolder" | "600" | "700" | "800" | "900" => FontWeight::Bold,
                _ => FontWeight::Normal,
            };
            context.select_font_face(&font.family, slant, weight);
            context.set_font_size(font.size);

            let fill = resolve(element.paint.fill.as_deref(), Some(Rgb(0.0, 0.0, 0.0)));
            if let Some(Rgb(r, g, b)) = fill {
                context.set_source_rgb(r, g, b);
                context.show_text_anchored(content, (position.0, position.1), *anchor)?;
            }
            return Ok(());
        },
    }
    apply_paint(context, &element.paint)
}

/// Draws every element of the scene onto the context, in order.
pub fn replay(context: &Context, scene: &Scene) -> Result<(), Error> {
    for element in scene.elements() {
        draw_element(context, element)?;
    }
    Ok(())
}

/// Creates an [`ImageSurface`] with the picture's canvas size and draws the picture to it.
///
/// The resulting [`ImageSurface`] can be written to a file or manipulated further.
pub fn draw(picture: &Picture) -> Result<ImageSurface, Error> {
    let viewport = picture.viewport();
    let surface = ImageSurface::create(
        Format::ARgb32,
        viewport.width.ceil() as i32,
        viewport.height.ceil() as i32,
    )?;
    let context = Context::new(&surface)?;
    replay(&context, picture.scene())?;
    Ok(surface)
}
