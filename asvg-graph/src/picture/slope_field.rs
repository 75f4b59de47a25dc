//! Slope fields of first order differential equations `dy/dx = g(x, y)`.

use asvg_compute::{compile::{compile_with, CompiledExpr}, ctxt::Ctxt};
use asvg_error::Error;
use asvg_parser::rewrite::ExponentPolicy;
use crate::error::InvalidSpacing;
use log::{debug, warn};
use super::{point::UnitPoint, viewport::Viewport, Picture};

/// The maximum number of grid points visited by one slope field.
const MAX_POINTS: usize = 250_000;

/// Compiles the slope function `g(x, y)` from shorthand notation.
pub fn compile_slope(src: &str, ctxt: &Ctxt, policy: ExponentPolicy) -> Result<CompiledExpr, Error> {
    compile_with(src, &["x", "y"], ctxt, policy)
}

/// Returns the segment of half length `dz` centered on `(x, y)` with slope `m`, or [`None`] if
/// the slope is undefined. Infinite slopes give vertical segments.
pub fn segment(x: f64, y: f64, m: f64, dz: f64) -> Option<(UnitPoint, UnitPoint)> {
    if m.is_nan() {
        return None;
    }

    let (u, v) = if m.is_infinite() {
        (0.0, dz)
    } else {
        let u = dz / (1.0 + m * m).sqrt();
        (u, m * u)
    };
    Some((UnitPoint(x - u, y - v), UnitPoint(x + u, y + v)))
}

/// Returns the values `start + k * step` up to and including `end`.
fn steps(start: f64, step: f64, end: f64) -> impl Iterator<Item = f64> {
    (0..)
        .map(move |k| start + k as f64 * step)
        .take_while(move |&v| v <= end)
}

fn validate(name: &'static str, value: f64) -> Result<(), Error> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::new(vec![], InvalidSpacing { name, value }))
    }
}

impl Picture {
    /// Draws the slope field of `slope`, a function of `x` and `y`, at grid points spaced `dx`
    /// and `dy` units apart, both defaulting to `1`.
    ///
    /// The x values of the grid start at `ceil(xmin / dx)` and the y values at `ceil(ymin / dy)`.
    /// All segments are drawn as a single path. Returns the number of segments drawn.
    pub fn slope_field(
        &mut self,
        slope: &CompiledExpr,
        dx: Option<f64>,
        dy: Option<f64>,
    ) -> Result<usize, Error> {
        let dx = dx.unwrap_or(1.0);
        let dy = dy.unwrap_or(1.0);
        validate("dx", dx)?;
        validate("dy", dy)?;

        let dz = dx.hypot(dy) / 6.0;
        let Viewport { xmin, xmax, ymin, ymax, .. } = self.viewport;
        let mut batch = self.begin_batch();
        let mut visited = 0;

        'grid: for x in steps((xmin / dx).ceil(), dx, xmax) {
            for y in steps((ymin / dy).ceil(), dy, ymax) {
                visited += 1;
                if visited > MAX_POINTS {
                    warn!("slope field truncated after {} grid points", MAX_POINTS);
                    break 'grid;
                }
                if let Some((p, q)) = segment(x, y, slope.eval(&[x, y]), dz) {
                    batch.segment(p, q);
                }
            }
        }

        let drawn = batch.len();
        debug!("slope field with dx = {}, dy = {}: {} segments", dx, dy, drawn);
        self.end_batch(batch, None);
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use asvg_error::Category;
    use assert_float_eq::assert_float_absolute_eq;
    use crate::picture::{element::Shape, opts::PictureOptions};
    use pretty_assertions::assert_eq;
    use super::*;

    fn picture() -> Picture {
        let mut picture = Picture::new(PictureOptions::default().background(None)).unwrap();
        picture.init(None, None, None, None).unwrap();
        picture
    }

    fn slope(src: &str) -> CompiledExpr {
        compile_slope(src, &Ctxt::default(), ExponentPolicy::default()).unwrap()
    }

    #[test]
    fn segment_directions() {
        let (p, q) = segment(1.0, 2.0, 0.0, 0.5).unwrap();
        assert_eq!((p, q), (UnitPoint(0.5, 2.0), UnitPoint(1.5, 2.0)));

        let (p, q) = segment(1.0, 0.0, f64::INFINITY, 0.5).unwrap();
        assert_eq!((p, q), (UnitPoint(1.0, -0.5), UnitPoint(1.0, 0.5)));

        let (p, q) = segment(0.0, 0.0, 1.0, 1.0).unwrap();
        assert_float_absolute_eq!(p.0, -std::f64::consts::FRAC_1_SQRT_2);
        assert_float_absolute_eq!(q.1, std::f64::consts::FRAC_1_SQRT_2);

        assert_eq!(segment(0.0, 0.0, f64::NAN, 1.0), None);
    }

    #[test]
    fn one_path_per_field() {
        // x in -5..=5, y in -3..=3
        let mut picture = picture();
        assert_eq!(picture.slope_field(&slope("x - y"), None, None).unwrap(), 77);
        assert_eq!(picture.scene().len(), 1);
        assert_eq!(picture.scene().elements()[0].shape.kind(), "path");
    }

    #[test]
    fn undefined_slopes_are_skipped() {
        let mut picture = picture();
        assert_eq!(picture.slope_field(&slope("x/y"), None, None).unwrap(), 76);
        assert_eq!(picture.slope_field(&slope("sqrt(x)"), Some(2.0), None).unwrap(), 21);
    }

    #[test]
    fn empty_field_draws_nothing() {
        let mut picture = picture();
        assert_eq!(picture.slope_field(&slope("ln(-1)"), None, None).unwrap(), 0);
        assert!(picture.scene().is_empty());
    }

    #[test]
    fn grid_starts_at_ceiling() {
        let mut picture = Picture::new(PictureOptions::default().background(None)).unwrap();
        picture.init(Some(0.5), Some(2.5), Some(0.5), Some(1.5)).unwrap();
        // ceil(0.5 / 0.5) = 1, so x in {1, 1.5, 2, 2.5} and y in {1, 1.5}
        assert_eq!(picture.slope_field(&slope("0"), Some(0.5), Some(0.5)).unwrap(), 8);
        match &picture.scene().elements()[0].shape {
            Shape::Path(data) => assert!(data.to_string().starts_with("M")),
            other => panic!("expected a path, found {:?}", other),
        }
    }

    #[test]
    fn invalid_spacing() {
        let mut picture = picture();
        let err = picture.slope_field(&slope("x"), Some(0.0), None).unwrap_err();
        assert_eq!(err.category(), Category::Configuration);
        assert!(picture.slope_field(&slope("x"), None, Some(f64::NAN)).is_err());
    }
}
