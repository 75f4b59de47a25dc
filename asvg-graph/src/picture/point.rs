#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pair of `(x, y)` values in **unit** coordinates, with y increasing upward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitPoint(pub f64, pub f64);

impl From<(f64, f64)> for UnitPoint {
    fn from((x, y): (f64, f64)) -> UnitPoint {
        UnitPoint(x, y)
    }
}

impl UnitPoint {
    /// Returns the point translated by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> UnitPoint {
        UnitPoint(self.0 + dx, self.1 + dy)
    }
}

/// A pair of `(x, y)` values in **device** coordinates (pixels), with y increasing downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DevicePoint(pub f64, pub f64);

impl From<(f64, f64)> for DevicePoint {
    fn from((x, y): (f64, f64)) -> DevicePoint {
        DevicePoint(x, y)
    }
}

impl DevicePoint {
    /// Returns the distance between two points.
    pub fn distance(self, other: DevicePoint) -> f64 {
        (self.0 - other.0).hypot(self.1 - other.1)
    }
}
