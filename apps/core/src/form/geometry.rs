//! Geometry primitives for joint-angle measurement.
//!
//! Pure 2D math, no allocation. All angles are in degrees.

use serde::{Deserialize, Serialize};

/// A 2D coordinate in image space or normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true when both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Interior angle at `b` formed by the rays `b→a` and `b→c`, in [0, 180].
///
/// The polar angle of each ray is taken with a four-quadrant arctangent, the
/// absolute difference is computed, and a reflex result is folded back with
/// `360 - angle`. The result does not depend on the order of `a` and `c`.
///
/// Degenerate input (a zero-length ray, or any non-finite coordinate) yields 0°.
pub fn angle_at_vertex(a: Point, b: Point, c: Point) -> f64 {
    if !(a.is_finite() && b.is_finite() && c.is_finite()) || a == b || c == b {
        return 0.0;
    }

    let ray_c = (c.y - b.y).atan2(c.x - b.x);
    let ray_a = (a.y - b.y).atan2(a.x - b.x);

    let mut angle = (ray_c - ray_a).to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }

    if angle.is_finite() {
        angle.clamp(0.0, 180.0)
    } else {
        0.0
    }
}
