use asvg_error::Error;
use crate::error::{InvalidCanvas, InvalidXRange, InvalidYRange, MissingYMin};
use super::point::{DevicePoint, UnitPoint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The mapping between a rectangular region of unit coordinates and a fixed-size canvas.
///
/// These are also the attributes persisted on a rendered picture, so that a later render can
/// continue drawing on it without re-initializing (see [`Picture::resume`]).
///
/// [`Picture::resume`]: super::Picture::resume
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    /// The width of the canvas, in pixels.
    pub width: f64,

    /// The height of the canvas, in pixels.
    pub height: f64,

    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,

    /// The number of pixels spanned by one unit on the x-axis.
    pub xunitlength: f64,

    /// The number of pixels spanned by one unit on the y-axis.
    pub yunitlength: f64,

    /// The horizontal distance, in pixels, from the left edge of the canvas to the origin.
    pub ox: f64,

    /// The vertical distance, in pixels, from the bottom edge of the canvas to the origin.
    pub oy: f64,
}

/// The viewport of a 300x200 canvas showing `-5 <= x <= 5`, with isotropic units.
impl Default for Viewport {
    fn default() -> Viewport {
        Viewport::solve(300.0, 200.0, -5.0, 5.0, None, None)
    }
}

impl Viewport {
    /// Creates the viewport of a `width` by `height` canvas showing `xmin <= x <= xmax`.
    ///
    /// - With neither `ymin` nor `ymax`, one unit spans the same number of pixels on both axes
    ///   and the vertical range is centered on the origin.
    /// - With only `ymin`, units are isotropic and `ymax` is solved from the canvas height.
    /// - With both, the vertical unit length is solved from the explicit range.
    ///
    /// Giving `ymax` without `ymin` is an error.
    pub fn new(
        width: f64,
        height: f64,
        xmin: f64,
        xmax: f64,
        ymin: Option<f64>,
        ymax: Option<f64>,
    ) -> Result<Viewport, Error> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(Error::new(vec![], InvalidCanvas { width, height }));
        }
        if !(xmin < xmax && xmin.is_finite() && xmax.is_finite()) {
            return Err(Error::new(vec![], InvalidXRange { xmin, xmax }));
        }
        match (ymin, ymax) {
            (None, Some(_)) => return Err(Error::new(vec![], MissingYMin)),
            (Some(ymin), Some(ymax)) if !(ymin < ymax && ymin.is_finite() && ymax.is_finite()) => {
                return Err(Error::new(vec![], InvalidYRange { ymin, ymax }));
            },
            (Some(ymin), None) if !ymin.is_finite() => {
                return Err(Error::new(vec![], InvalidYRange { ymin, ymax: f64::NAN }));
            },
            _ => {},
        }

        Ok(Viewport::solve(width, height, xmin, xmax, ymin, ymax))
    }

    /// Computes the unit lengths and origin from already validated bounds.
    fn solve(
        width: f64,
        height: f64,
        xmin: f64,
        xmax: f64,
        ymin: Option<f64>,
        ymax: Option<f64>,
    ) -> Viewport {
        let xunitlength = width / (xmax - xmin);
        let ox = -xmin * xunitlength;

        let (ymin, ymax, yunitlength, oy) = match (ymin, ymax) {
            (Some(ymin), Some(ymax)) => {
                let yunitlength = height / (ymax - ymin);
                (ymin, ymax, yunitlength, -ymin * yunitlength)
            },
            (Some(ymin), None) => {
                let ymax = height / xunitlength + ymin;
                (ymin, ymax, xunitlength, -ymin * xunitlength)
            },
            _ => {
                let ymin = -height / (2.0 * xunitlength);
                (ymin, -ymin, xunitlength, height / 2.0)
            },
        };

        Viewport {
            width,
            height,
            xmin,
            xmax,
            ymin,
            ymax,
            xunitlength,
            yunitlength,
            ox,
            oy,
        }
    }

    /// Converts a point in **unit** space to **device** space.
    pub fn to_device(&self, point: UnitPoint) -> DevicePoint {
        DevicePoint(
            point.0 * self.xunitlength + self.ox,
            self.height - point.1 * self.yunitlength - self.oy,
        )
    }

    /// Converts a point in **device** space to **unit** space.
    pub fn from_device(&self, point: DevicePoint) -> UnitPoint {
        UnitPoint(
            (point.0 - self.ox) / self.xunitlength,
            (self.height - point.1 - self.oy) / self.yunitlength,
        )
    }

    /// Returns true if `y` is a finite value within the vertical range of the viewport.
    pub fn contains_y(&self, y: f64) -> bool {
        y.is_finite() && self.ymin <= y && y <= self.ymax
    }
}

#[cfg(test)]
mod tests {
    use asvg_error::Category;
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn isotropic_default() {
        let viewport = Viewport::new(300.0, 200.0, -5.0, 5.0, None, None).unwrap();
        assert_eq!(viewport, Viewport::default());
        assert_float_absolute_eq!(viewport.xunitlength, 30.0);
        assert_float_absolute_eq!(viewport.yunitlength, 30.0);
        assert_float_absolute_eq!(viewport.ymax, 200.0 / 60.0);
        assert_eq!(viewport.to_device(UnitPoint(0.0, 0.0)), DevicePoint(150.0, 100.0));
        assert_eq!(viewport.to_device(UnitPoint(1.0, 1.0)), DevicePoint(180.0, 70.0));
    }

    #[test]
    fn only_ymin() {
        let viewport = Viewport::new(300.0, 200.0, 0.0, 10.0, Some(-1.0), None).unwrap();
        assert_float_absolute_eq!(viewport.yunitlength, 30.0);
        assert_float_absolute_eq!(viewport.ymax, 200.0 / 30.0 - 1.0);
        assert_eq!(viewport.to_device(UnitPoint(0.0, -1.0)), DevicePoint(0.0, 200.0));
    }

    #[test]
    fn anisotropic() {
        let viewport = Viewport::new(400.0, 200.0, -2.0, 2.0, Some(-10.0), Some(10.0)).unwrap();
        assert_float_absolute_eq!(viewport.xunitlength, 100.0);
        assert_float_absolute_eq!(viewport.yunitlength, 10.0);
        assert_eq!(viewport.to_device(UnitPoint(2.0, 10.0)), DevicePoint(400.0, 0.0));
    }

    #[test]
    fn round_trip() {
        let viewport = Viewport::new(400.0, 250.0, -3.0, 7.0, Some(-4.0), Some(2.5)).unwrap();
        for (x, y) in [(0.0, 0.0), (-3.0, 2.5), (1.25, -3.75), (6.9, 0.1)] {
            let back = viewport.from_device(viewport.to_device(UnitPoint(x, y)));
            assert_float_absolute_eq!(back.0, x);
            assert_float_absolute_eq!(back.1, y);
        }
    }

    #[test]
    fn invalid_bounds() {
        let err = Viewport::new(300.0, 200.0, 5.0, 5.0, None, None).unwrap_err();
        assert_eq!(err.category(), Category::Configuration);

        let err = Viewport::new(300.0, 200.0, -5.0, 5.0, Some(1.0), Some(0.0)).unwrap_err();
        assert_eq!(err.category(), Category::Configuration);

        let err = Viewport::new(300.0, 200.0, -5.0, 5.0, None, Some(3.0)).unwrap_err();
        assert_eq!(err.to_string(), "configuration error: picture requires ymin when ymax is given");

        assert!(Viewport::new(0.0, 200.0, -5.0, 5.0, None, None).is_err());
    }
}
