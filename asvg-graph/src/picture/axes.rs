//! Axes, tick marks, grids and axis labels.

use asvg_error::Error;
use crate::error::InvalidSpacing;
use log::{debug, warn};
use super::{
    element::{Command, Element, Paint, PathData, Shape},
    point::{DevicePoint, UnitPoint},
    primitives::TextPosition,
    Picture,
};

/// The maximum number of grid lines, tick marks or labels drawn along one direction of an axis.
const MAX_LINES: usize = 10_000;

/// What [`Picture::axes`] draws. Spacings are in units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Axes {
    /// The spacing of the tick marks on the x-axis. Defaults to `1`.
    pub dx: Option<f64>,

    /// The spacing of the tick marks on the y-axis. Defaults to the same length on the canvas as
    /// the x spacing.
    pub dy: Option<f64>,

    /// Whether to label the tick marks.
    pub labels: bool,

    /// Whether to draw the background grid.
    pub grid: bool,

    /// The spacing of the vertical grid lines. Defaults to the x tick spacing.
    pub gdx: Option<f64>,

    /// The spacing of the horizontal grid lines. Defaults to the y tick spacing.
    pub gdy: Option<f64>,
}

impl Axes {
    /// Only the background grid, with both grid and tick spacing given by `dx` and `dy`.
    pub fn grid(dx: Option<f64>, dy: Option<f64>) -> Axes {
        Axes {
            dx,
            dy,
            labels: false,
            grid: true,
            gdx: dx,
            gdy: dy,
        }
    }
}

/// Spacings set through script variables, which take precedence over the arguments of
/// [`Picture::axes`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleOverrides {
    /// Sets the x tick and grid spacing, and turns on labels and the grid.
    pub xscl: Option<f64>,

    /// Sets the y tick and grid spacing.
    pub yscl: Option<f64>,

    pub xtick: Option<f64>,
    pub ytick: Option<f64>,

    /// Sets the vertical grid spacing, and turns on the grid.
    pub xgrid: Option<f64>,

    /// Sets the horizontal grid spacing.
    pub ygrid: Option<f64>,
}

impl ScaleOverrides {
    /// Returns `axes` with the overrides applied.
    pub fn apply(&self, mut axes: Axes) -> Axes {
        if let Some(xscl) = self.xscl {
            axes.dx = Some(xscl);
            axes.gdx = Some(xscl);
            axes.labels = true;
            axes.grid = true;
        }
        if let Some(yscl) = self.yscl {
            axes.dy = Some(yscl);
            axes.gdy = Some(yscl);
        }
        if let Some(xtick) = self.xtick {
            axes.dx = Some(xtick);
        }
        if let Some(ytick) = self.ytick {
            axes.dy = Some(ytick);
        }
        if let Some(xgrid) = self.xgrid {
            axes.gdx = Some(xgrid);
            axes.grid = true;
        }
        if let Some(ygrid) = self.ygrid {
            axes.gdy = Some(ygrid);
        }
        axes
    }
}

/// Returns the number of decimal places used to label ticks spaced `spacing` units apart.
pub fn label_precision(spacing: f64) -> usize {
    let places = (1.1 - spacing.log10()).floor() + 1.0;
    if places > 0.0 {
        places as usize
    } else {
        0
    }
}

/// Formats a label with the given number of decimal places, then trims trailing zeros and a
/// trailing decimal point.
///
/// ```
/// use asvg_graph::picture::axes::format_label;
///
/// assert_eq!(format_label(2.5, 2), "2.5");
/// assert_eq!(format_label(-3.0, 2), "-3");
/// ```
pub fn format_label(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Returns the positions `origin + k * step` that lie on a canvas of the given extent, walking
/// outward from the origin: first in the positive direction, then in the negative direction.
fn walk_outward(origin: f64, step: f64, extent: f64, include_origin: bool) -> Vec<f64> {
    let mut positions = Vec::new();

    let first = if include_origin { 0.0 } else { 1.0 };
    let mut k = f64::max(first, (-origin / step).ceil());
    while origin + k * step < extent && positions.len() < MAX_LINES {
        positions.push(origin + k * step);
        k += 1.0;
    }

    let mut k = f64::max(1.0, ((origin - extent) / step).floor() + 1.0);
    while origin - k * step > 0.0 && positions.len() < MAX_LINES {
        positions.push(origin - k * step);
        k += 1.0;
    }

    if positions.len() >= MAX_LINES {
        warn!("stopped after {} lines spaced {} pixels apart", MAX_LINES, step);
    }
    positions
}

/// Returns the label values `k * step` for nonzero `k` within `[min, max]`, positive values first.
fn label_values(step: f64, min: f64, max: f64) -> Vec<f64> {
    let mut values = Vec::new();

    let mut k = f64::max(1.0, (min / step).ceil());
    while k * step <= max && values.len() < MAX_LINES {
        values.push(k * step);
        k += 1.0;
    }

    let mut k = f64::max(1.0, (-max / step).ceil());
    while -k * step >= min && values.len() < MAX_LINES {
        values.push(-k * step);
        k += 1.0;
    }
    values
}

fn validate(name: &'static str, value: f64) -> Result<f64, Error> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::new(vec![], InvalidSpacing { name, value }))
    }
}

impl Picture {
    /// Draws the axes through the origin with tick marks, and optionally a background grid and
    /// tick labels. The picture is initialized with default bounds first if needed.
    ///
    /// The grid is drawn first, then the axes and tick marks as one path, then the labels. The
    /// tick length becomes a quarter of the font size.
    pub fn axes(&mut self, axes: &Axes) -> Result<(), Error> {
        self.ensure_init()?;
        let vp = self.viewport;

        let dx = validate("dx", axes.dx.unwrap_or(1.0))?;
        let dy = validate("dy", axes.dy.unwrap_or(dx * vp.xunitlength / vp.yunitlength))?;
        let gdx = validate("gdx", axes.gdx.unwrap_or(dx))?;
        let gdy = validate("gdy", axes.gdy.unwrap_or(dy))?;
        debug!("axes with ticks ({}, {}), grid {:?}, labels {}", dx, dy, axes.grid.then_some((gdx, gdy)), axes.labels);

        self.style.tick_length = self.style.font_size / 4.0;
        let tick = self.style.tick_length;
        let (ax, ay) = (vp.ox, vp.height - vp.oy);

        if axes.grid {
            let mut commands = Vec::new();
            for x in walk_outward(ax, gdx * vp.xunitlength, vp.width, true) {
                commands.push(Command::MoveTo(DevicePoint(x, 0.0)));
                commands.push(Command::LineTo(DevicePoint(x, vp.height)));
            }
            for y in walk_outward(ay, gdy * vp.yunitlength, vp.height, true) {
                commands.push(Command::MoveTo(DevicePoint(0.0, y)));
                commands.push(Command::LineTo(DevicePoint(vp.width, y)));
            }
            self.scene.upsert(Element::new(
                Shape::Path(PathData::Commands(commands)),
                Paint::new(&self.style.grid_stroke, &self.style.fill, 0.5),
            ));
        }

        let mut commands = vec![
            Command::MoveTo(DevicePoint(0.0, ay)),
            Command::LineTo(DevicePoint(vp.width, ay)),
            Command::MoveTo(DevicePoint(ax, 0.0)),
            Command::LineTo(DevicePoint(ax, vp.height)),
        ];
        for x in walk_outward(ax, dx * vp.xunitlength, vp.width, false) {
            commands.push(Command::MoveTo(DevicePoint(x, ay + tick)));
            commands.push(Command::LineTo(DevicePoint(x, ay - tick)));
        }
        for y in walk_outward(ay, dy * vp.yunitlength, vp.height, false) {
            commands.push(Command::MoveTo(DevicePoint(ax + tick, y)));
            commands.push(Command::LineTo(DevicePoint(ax - tick, y)));
        }
        self.scene.upsert(Element::new(
            Shape::Path(PathData::Commands(commands)),
            Paint::new(&self.style.axes_stroke, &self.style.fill, 0.5),
        ));

        if axes.labels {
            let lx = if vp.xmin > 0.0 || vp.xmax < 0.0 { vp.xmin } else { 0.0 };
            let ly = if vp.ymin > 0.0 || vp.ymax < 0.0 { vp.ymin } else { 0.0 };
            let lxp = if ly == 0.0 { TextPosition::Below } else { TextPosition::Above };
            let lyp = if lx == 0.0 { TextPosition::Left } else { TextPosition::Right };

            let precision = label_precision(dx);
            for x in label_values(dx, vp.xmin, vp.xmax) {
                self.text(UnitPoint(x, ly), &format_label(x, precision), Some(lxp), None, None);
            }
            let precision = label_precision(dy);
            for y in label_values(dy, vp.ymin, vp.ymax) {
                self.text(UnitPoint(lx, y), &format_label(y, precision), Some(lyp), None, None);
            }
        }

        Ok(())
    }

    /// Draws a background grid with axes and tick marks, without labels.
    pub fn grid(&mut self, dx: Option<f64>, dy: Option<f64>) -> Result<(), Error> {
        self.axes(&Axes::grid(dx, dy))
    }

    /// Draws nothing, but initializes the picture with default bounds if needed.
    pub fn noaxes(&mut self) -> Result<(), Error> {
        self.ensure_init()
    }
}
