//! The drawing primitives.

use asvg_error::Error;
use crate::error::UnsupportedValue;
use std::str::FromStr;
use super::{
    element::{Command, Element, Font, Paint, PathData, Shape, TextAnchor},
    point::{DevicePoint, UnitPoint},
    Picture,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the points of a path are connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathKind {
    /// Straight line segments.
    #[default]
    Polyline,

    /// Smooth quadratic segments through every point (`T`).
    Smooth,

    /// Cubic segments, taking the points in groups of two control points and an end point
    /// (`C`). Leftover points are joined with straight segments.
    Cubic,
}

impl FromStr for PathKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "L" => Ok(PathKind::Polyline),
            "T" => Ok(PathKind::Smooth),
            "C" => Ok(PathKind::Cubic),
            _ => Err(Error::new(vec![], UnsupportedValue {
                kind: "path kind",
                value: s.to_string(),
                expected: &["L", "T", "C"],
            })),
        }
    }
}

/// The kind of dot drawn by [`Picture::dot`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DotKind {
    /// A circle filled with the stroke color.
    #[default]
    Closed,

    /// A circle filled with white.
    Open,

    /// A small cross.
    Plus,

    /// A small horizontal tick.
    Minus,

    /// A small vertical tick.
    Bar,
}

impl FromStr for DotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" => Ok(DotKind::Closed),
            "open" => Ok(DotKind::Open),
            "+" => Ok(DotKind::Plus),
            "-" => Ok(DotKind::Minus),
            "|" => Ok(DotKind::Bar),
            _ => Err(Error::new(vec![], UnsupportedValue {
                kind: "dot kind",
                value: s.to_string(),
                expected: &["closed", "open", "+", "-", "|"],
            })),
        }
    }
}

/// Where text is placed relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextPosition {
    Above,
    Below,
    Left,
    Right,
    AboveLeft,
    AboveRight,
    BelowLeft,
    BelowRight,
}

impl TextPosition {
    pub const NAMES: &'static [&'static str] = &[
        "above",
        "below",
        "left",
        "right",
        "aboveleft",
        "aboveright",
        "belowleft",
        "belowright",
    ];

    /// Returns the text anchor, and the offset of the text from its point, in pixels.
    fn layout(position: Option<TextPosition>, font_size: f64) -> (TextAnchor, f64, f64) {
        use TextPosition::*;

        let Some(position) = position else {
            return (TextAnchor::Middle, 0.0, font_size / 3.0);
        };

        let dy = match position {
            Above | AboveLeft | AboveRight => -font_size / 2.0,
            Below | BelowLeft | BelowRight => font_size,
            Left | Right => font_size / 3.0,
        };
        let (anchor, dx) = match position {
            Right | AboveRight | BelowRight => (TextAnchor::Start, font_size / 2.0),
            Left | AboveLeft | BelowLeft => (TextAnchor::End, -font_size / 2.0),
            Above | Below => (TextAnchor::Middle, 0.0),
        };
        (anchor, dx, dy)
    }
}

impl FromStr for TextPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use TextPosition::*;

        match s {
            "above" => Ok(Above),
            "below" => Ok(Below),
            "left" => Ok(Left),
            "right" => Ok(Right),
            "aboveleft" => Ok(AboveLeft),
            "aboveright" => Ok(AboveRight),
            "belowleft" => Ok(BelowLeft),
            "belowright" => Ok(BelowRight),
            _ => Err(Error::new(vec![], UnsupportedValue {
                kind: "text position",
                value: s.to_string(),
                expected: TextPosition::NAMES,
            })),
        }
    }
}

/// The device-space length of an arrowhead, and its half width.
const ARROW_LENGTH: f64 = 15.0;
const ARROW_HALF_WIDTH: f64 = 4.0;

/// The angle, in radians, used to find the start of the arrowhead drawn on a loop.
const LOOP_ARROW_ANGLE: f64 = 1.4;

impl Picture {
    /// Returns the paint of a stroked shape with the current style.
    fn shape_paint(&self) -> Paint {
        Paint::new(&self.style.stroke, &self.style.fill, self.style.stroke_width)
    }

    /// Returns the paint of a stroked line or path with the current style, including dashes.
    fn line_paint(&self) -> Paint {
        self.shape_paint().with_dash(self.style.dash.as_deref())
    }

    /// Draws a marker dot at `p`.
    fn marker_dot(&mut self, p: UnitPoint) {
        let element = Element::new(
            Shape::Circle {
                center: self.viewport.to_device(p),
                r: self.style.marker_size,
            },
            Paint::new(&self.style.marker_stroke, &self.style.marker_fill, self.style.stroke_width),
        );
        self.scene.upsert(element);
    }

    /// Draws a filled arrowhead at `q`, pointing away from `p`. Nothing is drawn if the points
    /// coincide on the canvas.
    pub fn arrowhead(&mut self, p: UnitPoint, q: UnitPoint) {
        let v = self.viewport.to_device(p);
        let w = self.viewport.to_device(q);
        let d = v.distance(w);
        if d <= 1e-8 {
            return;
        }

        let u = ((w.0 - v.0) / d, (w.1 - v.1) / d);
        let up = (-u.1, u.0);
        let commands = vec![
            Command::MoveTo(DevicePoint(
                w.0 - ARROW_LENGTH * u.0 - ARROW_HALF_WIDTH * up.0,
                w.1 - ARROW_LENGTH * u.1 - ARROW_HALF_WIDTH * up.1,
            )),
            Command::LineTo(DevicePoint(w.0 - 3.0 * u.0, w.1 - 3.0 * u.1)),
            Command::LineTo(DevicePoint(
                w.0 - ARROW_LENGTH * u.0 + ARROW_HALF_WIDTH * up.0,
                w.1 - ARROW_LENGTH * u.1 + ARROW_HALF_WIDTH * up.1,
            )),
            Command::Close,
        ];
        let element = Element::new(
            Shape::Path(PathData::Commands(commands)),
            Paint::new(&self.style.stroke, &self.style.stroke, self.style.marker_stroke_width),
        );
        self.scene.upsert(element);
    }

    /// Draws the segment from `p` to `q`, with the current marker.
    pub fn line(&mut self, p: UnitPoint, q: UnitPoint, id: Option<&str>) {
        let commands = vec![
            Command::MoveTo(self.viewport.to_device(p)),
            Command::LineTo(self.viewport.to_device(q)),
        ];
        let element = Element::new(Shape::Path(PathData::Commands(commands)), self.line_paint())
            .with_id(id);
        self.scene.upsert(element);

        let marker = self.style.marker;
        if marker.has_dots() {
            self.marker_dot(p);
            if marker.has_arrow() {
                self.arrowhead(p, q);
            }
            self.marker_dot(q);
        } else if marker.has_arrow() {
            self.arrowhead(p, q);
        }
    }

    /// Draws a path through the given points. With a dot marker, every point gets a dot, except
    /// the control points of cubic segments. Nothing is drawn for an empty list of points.
    pub fn path(&mut self, points: &[UnitPoint], id: Option<&str>, kind: PathKind) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        let mut commands = vec![Command::MoveTo(self.viewport.to_device(*first))];
        match kind {
            PathKind::Polyline => commands.extend(
                rest.iter().map(|p| Command::LineTo(self.viewport.to_device(*p))),
            ),
            PathKind::Smooth => commands.extend(
                rest.iter().map(|p| Command::SmoothQuadTo(self.viewport.to_device(*p))),
            ),
            PathKind::Cubic => {
                let mut chunks = rest.chunks_exact(3);
                for chunk in &mut chunks {
                    commands.push(Command::CubicTo(
                        self.viewport.to_device(chunk[0]),
                        self.viewport.to_device(chunk[1]),
                        self.viewport.to_device(chunk[2]),
                    ));
                }
                commands.extend(
                    chunks.remainder().iter().map(|p| Command::LineTo(self.viewport.to_device(*p))),
                );
            },
        }

        let element = Element::new(Shape::Path(PathData::Commands(commands)), self.line_paint())
            .with_id(id);
        self.scene.upsert(element);

        if self.style.marker.has_dots() {
            for (i, p) in points.iter().enumerate() {
                if kind != PathKind::Cubic || i % 3 == 0 {
                    self.marker_dot(*p);
                }
            }
        }
    }

    /// Draws a path from path data given verbatim, in device coordinates.
    pub fn raw_path(&mut self, data: &str, id: Option<&str>) {
        let element = Element::new(Shape::Path(PathData::Raw(data.to_string())), self.line_paint())
            .with_id(id);
        self.scene.upsert(element);
    }

    /// Draws a smooth curve through the given points.
    pub fn curve(&mut self, points: &[UnitPoint], id: Option<&str>) {
        self.path(points, id, PathKind::Smooth);
    }

    /// Draws a circle. The radius is in x units.
    pub fn circle(&mut self, center: UnitPoint, radius: f64, id: Option<&str>) {
        let element = Element::new(
            Shape::Circle {
                center: self.viewport.to_device(center),
                r: radius * self.viewport.xunitlength,
            },
            self.shape_paint(),
        ).with_id(id);
        self.scene.upsert(element);
    }

    /// Draws an ellipse. The radii are in x and y units.
    pub fn ellipse(&mut self, center: UnitPoint, rx: f64, ry: f64, id: Option<&str>) {
        let element = Element::new(
            Shape::Ellipse {
                center: self.viewport.to_device(center),
                rx: rx * self.viewport.xunitlength,
                ry: ry * self.viewport.yunitlength,
            },
            self.shape_paint(),
        ).with_id(id);
        self.scene.upsert(element);
    }

    /// Draws the rectangle with lower left corner `p` and upper right corner `q`, with corners
    /// optionally rounded by radii in x and y units.
    pub fn rect(&mut self, p: UnitPoint, q: UnitPoint, id: Option<&str>, rx: Option<f64>, ry: Option<f64>) {
        let corner = self.viewport.to_device(UnitPoint(p.0, q.1));
        let element = Element::new(
            Shape::Rect {
                corner,
                width: (q.0 - p.0) * self.viewport.xunitlength,
                height: (q.1 - p.1) * self.viewport.yunitlength,
                rx: rx.map(|rx| rx * self.viewport.xunitlength),
                ry: ry.map(|ry| ry * self.viewport.yunitlength),
            },
            self.shape_paint(),
        ).with_id(id);
        self.scene.upsert(element);
    }

    /// Draws a counter-clockwise arc from `start` to `end`. The radius is in units and defaults
    /// to the distance between the points.
    pub fn arc(&mut self, start: UnitPoint, end: UnitPoint, radius: Option<f64>, id: Option<&str>) {
        let radius = radius.unwrap_or_else(|| (end.0 - start.0).hypot(end.1 - start.1));
        let commands = vec![
            Command::MoveTo(self.viewport.to_device(start)),
            Command::ArcTo {
                rx: radius * self.viewport.xunitlength,
                ry: radius * self.viewport.yunitlength,
                to: self.viewport.to_device(end),
            },
        ];
        let element = Element::new(Shape::Path(PathData::Commands(commands)), self.shape_paint())
            .with_id(id);
        self.scene.upsert(element);

        let marker = self.style.marker;

        // the arrowhead points along the arc, from a point beside the chord's midpoint
        let from = if marker.has_arrow() {
            let u = ((end.1 - start.1) / 4.0, (start.0 - end.0) / 4.0);
            let v = ((end.0 - start.0) / 2.0, (end.1 - start.1) / 2.0);
            start.offset(v.0 + u.0, v.1 + u.1)
        } else {
            start
        };

        if marker.has_dots() {
            self.marker_dot(start);
            if marker.has_arrow() {
                self.arrowhead(from, end);
            }
            self.marker_dot(end);
        } else if marker.has_arrow() {
            self.arrowhead(from, end);
        }
    }

    /// Draws a loop leaving `p` in direction `d` (`(1, 0)` by default) and returning to `p`.
    pub fn loop_(&mut self, p: UnitPoint, d: Option<UnitPoint>, id: Option<&str>) {
        let UnitPoint(dx, dy) = d.unwrap_or(UnitPoint(1.0, 0.0));
        self.path(
            &[p, p.offset(dx, dy), p.offset(-dy, dx), p],
            id,
            PathKind::Cubic,
        );

        if self.style.marker.has_arrow() {
            let (sin, cos) = LOOP_ARROW_ANGLE.sin_cos();
            self.arrowhead(p.offset(cos * dx - sin * dy, sin * dx + cos * dy), p);
        }
    }

    /// Draws a dot, with an optional label placed [`TextPosition::Below`] by default. The label
    /// of a dot with identity `id` has identity `<id>label`.
    pub fn dot(
        &mut self,
        center: UnitPoint,
        kind: DotKind,
        label: Option<&str>,
        position: Option<TextPosition>,
        id: Option<&str>,
    ) {
        let DevicePoint(cx, cy) = self.viewport.to_device(center);
        let tick = self.style.tick_length;
        let horizontal = [
            Command::MoveTo(DevicePoint(cx - tick, cy)),
            Command::LineTo(DevicePoint(cx + tick, cy)),
        ];
        let vertical = [
            Command::MoveTo(DevicePoint(cx, cy - tick)),
            Command::LineTo(DevicePoint(cx, cy + tick)),
        ];

        let element = match kind {
            DotKind::Plus => Element::new(
                Shape::Path(PathData::Commands(horizontal.into_iter().chain(vertical).collect())),
                Paint::new(&self.style.axes_stroke, "none", 0.5),
            ),
            DotKind::Minus => Element::new(
                Shape::Path(PathData::Commands(horizontal.to_vec())),
                Paint::new(&self.style.stroke, "none", self.style.stroke_width),
            ),
            DotKind::Bar => Element::new(
                Shape::Path(PathData::Commands(vertical.to_vec())),
                Paint::new(&self.style.stroke, "none", self.style.stroke_width),
            ),
            DotKind::Closed | DotKind::Open => {
                let fill = if kind == DotKind::Open { "white" } else { self.style.stroke.as_str() };
                Element::new(
                    Shape::Circle { center: DevicePoint(cx, cy), r: self.style.dot_radius },
                    Paint::new(&self.style.stroke, fill, self.style.stroke_width),
                )
            },
        };
        self.scene.upsert(element.with_id(id));

        if let Some(label) = label {
            let label_id = id.map(|id| format!("{}label", id));
            self.text(
                center,
                label,
                Some(position.unwrap_or(TextPosition::Below)),
                label_id.as_deref(),
                None,
            );
        }
    }

    /// Draws text at `p`. Without a position, the text is centered on the point. `font_style`
    /// overrides the current font style for this text only.
    pub fn text(
        &mut self,
        p: UnitPoint,
        content: &str,
        position: Option<TextPosition>,
        id: Option<&str>,
        font_style: Option<&str>,
    ) {
        let style = &self.style;
        let (anchor, dx, dy) = TextPosition::layout(position, style.font_size);
        let DevicePoint(x, y) = self.viewport.to_device(p);
        let visible = |color: &str| (color != "none").then(|| color.to_string());

        let element = Element::new(
            Shape::Text {
                position: DevicePoint(x + dx, y + dy),
                content: content.to_string(),
                anchor,
                font: Font {
                    style: font_style.unwrap_or(style.font_style.as_str()).to_string(),
                    family: style.font_family.clone(),
                    size: style.font_size,
                    weight: style.font_weight.clone(),
                },
            },
            Paint {
                stroke: visible(style.font_stroke.as_str()),
                fill: visible(style.font_fill.as_str()),
                stroke_width: None,
                dash: None,
            },
        ).with_id(id);
        self.scene.upsert(element);
    }
}

#[cfg(test)]
mod tests {
    use asvg_error::Category;
    use assert_float_eq::assert_float_absolute_eq;
    use crate::picture::{opts::PictureOptions, style::Marker};
    use pretty_assertions::assert_eq;
    use super::*;

    /// A picture of the default viewport with no background, so that the scene holds only what
    /// the test draws. One unit is 30 pixels and the origin is at `(150, 100)`.
    fn picture() -> Picture {
        let mut picture = Picture::new(PictureOptions::default().background(None)).unwrap();
        picture.init(None, None, None, None).unwrap();
        picture
    }

    fn path_data(element: &Element) -> String {
        match &element.shape {
            Shape::Path(data) => data.to_string(),
            other => panic!("expected a path, found {:?}", other),
        }
    }

    #[test]
    fn line() {
        let mut picture = picture();
        picture.line(UnitPoint(0.0, 0.0), UnitPoint(1.0, 2.0), Some("a"));
        let element = &picture.scene().elements()[0];
        assert_eq!(element.id.as_deref(), Some("a"));
        assert_eq!(path_data(element), "M150,100 L180,40");
        assert_eq!(element.paint, Paint::new("black", "none", 1.0));
    }

    #[test]
    fn line_upsert() {
        let mut picture = picture();
        picture.line(UnitPoint(0.0, 0.0), UnitPoint(1.0, 2.0), Some("a"));
        picture.line(UnitPoint(0.0, 0.0), UnitPoint(-1.0, 0.0), Some("a"));
        assert_eq!(picture.scene().len(), 1);
        assert_eq!(path_data(picture.scene().get("a").unwrap()), "M150,100 L120,100");
    }

    #[test]
    fn line_markers() {
        let mut picture = picture();
        picture.set_marker(Marker::ArrowDot);
        picture.line(UnitPoint(0.0, 0.0), UnitPoint(1.0, 0.0), None);

        let kinds = picture.scene().elements().iter()
            .map(|element| element.shape.kind())
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec!["path", "circle", "path", "circle"]);

        // the arrowhead's tip is 3 pixels short of the end point
        assert_eq!(path_data(&picture.scene().elements()[2]), "M165,96 L177,100 L165,104 z");
    }

    #[test]
    fn arrowhead_skips_coincident_points() {
        let mut picture = picture();
        picture.arrowhead(UnitPoint(1.0, 1.0), UnitPoint(1.0, 1.0));
        assert!(picture.scene().is_empty());
    }

    #[test]
    fn path_kinds() {
        let mut picture = picture();
        let points = [UnitPoint(0.0, 0.0), UnitPoint(1.0, 0.0), UnitPoint(1.0, 1.0), UnitPoint(0.0, 1.0)];
        picture.path(&points, None, PathKind::Polyline);
        picture.curve(&points, None);
        picture.path(&points, None, PathKind::Cubic);
        picture.path(&[], None, PathKind::Polyline);

        let paths = picture.scene().elements().iter().map(path_data).collect::<Vec<_>>();
        assert_eq!(paths, vec![
            "M150,100 L180,100 L180,70 L150,70",
            "M150,100 T180,100 T180,70 T150,70",
            "M150,100 C180,100 180,70 150,70",
        ]);
    }

    #[test]
    fn path_dots_skip_control_points() {
        let mut picture = picture();
        picture.set_marker(Marker::Dot);
        picture.loop_(UnitPoint(0.0, 0.0), None, None);
        assert_eq!(picture.scene().len(), 3);
    }

    #[test]
    fn circle_and_rect() {
        let mut picture = picture();
        picture.circle(UnitPoint(1.0, 1.0), 2.0, None);
        picture.rect(UnitPoint(0.0, 0.0), UnitPoint(2.0, 1.0), None, Some(0.5), None);

        assert_eq!(picture.scene().elements()[0].shape, Shape::Circle {
            center: DevicePoint(180.0, 70.0),
            r: 60.0,
        });
        assert_eq!(picture.scene().elements()[1].shape, Shape::Rect {
            corner: DevicePoint(150.0, 70.0),
            width: 60.0,
            height: 30.0,
            rx: Some(15.0),
            ry: None,
        });
    }

    #[test]
    fn arc_default_radius() {
        let mut picture = picture();
        picture.arc(UnitPoint(1.0, 0.0), UnitPoint(0.0, 1.0), None, Some("arc"));
        let data = path_data(picture.scene().get("arc").unwrap());
        let radius = 2f64.sqrt() * 30.0;
        assert_eq!(data, format!("M180,100 A{},{} 0 0,0 150,70", radius, radius));
    }

    #[test]
    fn dot_with_label() {
        let mut picture = picture();
        picture.dot(UnitPoint(1.0, 1.0), DotKind::Open, Some("P"), None, Some("p"));
        assert_eq!(picture.scene().len(), 2);
        assert_eq!(picture.scene().get("p").unwrap().paint.fill.as_deref(), Some("white"));

        let Shape::Text { position, anchor, .. } = &picture.scene().get("plabel").unwrap().shape else {
            panic!("expected text");
        };
        assert_eq!(*anchor, TextAnchor::Middle);
        assert_eq!(*position, DevicePoint(180.0, 86.0));
    }

    #[test]
    fn text_positions() {
        let mut picture = picture();
        picture.text(UnitPoint(0.0, 0.0), "a", None, None, None);
        picture.text(UnitPoint(0.0, 0.0), "b", Some(TextPosition::AboveLeft), None, Some("italic"));

        let elements = picture.scene().elements();
        let Shape::Text { position, anchor, .. } = &elements[0].shape else { panic!() };
        assert_eq!(*anchor, TextAnchor::Middle);
        assert_float_absolute_eq!(position.1, 100.0 + 16.0 / 3.0);

        let Shape::Text { position, anchor, font, .. } = &elements[1].shape else { panic!() };
        assert_eq!(*anchor, TextAnchor::End);
        assert_eq!(*position, DevicePoint(142.0, 92.0));
        assert_eq!(font.style, "italic");
        assert_eq!(elements[1].paint.fill, None);
    }

    #[test]
    fn unrecognized_values() {
        for err in [
            "star".parse::<DotKind>().unwrap_err(),
            "middle".parse::<TextPosition>().unwrap_err(),
            "Q".parse::<PathKind>().unwrap_err(),
        ] {
            assert_eq!(err.category(), Category::UnsupportedOperation);
        }
    }
}
