use serde::{Deserialize, Serialize};

use super::point::{Point, PointExpression};

/// Affine transformation `(a * x + b, c * y + d)` applied to points, optionally followed by
/// scaling.
///
/// ```
/// use carta_types::cartesian::{Point, Transformation};
///
/// let t = Transformation::new(2.0, 5.0, -1.0, 10.0);
/// let p = t.transform([1.0, 2.0], None);
/// assert_eq!(p, Point::new(7.0, 8.0));
/// assert_eq!(t.untransform(p, None), Point::new(1.0, 2.0));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Transformation {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Transformation {
    /// Creates a new transformation.
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Applies the transformation and multiplies the result by `scale` (1 if not set).
    pub fn transform(&self, point: impl Into<PointExpression>, scale: Option<f64>) -> Point {
        let p = point.into().to_point();
        let scale = scale.unwrap_or(1.0);
        Point::new(
            scale * (self.a * p.x + self.b),
            scale * (self.c * p.y + self.d),
        )
    }

    /// Inverse of [`Transformation::transform`].
    pub fn untransform(&self, point: impl Into<PointExpression>, scale: Option<f64>) -> Point {
        let p = point.into().to_point();
        let scale = scale.unwrap_or(1.0);
        Point::new(
            (p.x / scale - self.b) / self.a,
            (p.y / scale - self.d) / self.c,
        )
    }
}

impl From<[f64; 4]> for Transformation {
    fn from([a, b, c, d]: [f64; 4]) -> Self {
        Self::new(a, b, c, d)
    }
}

impl From<Transformation> for [f64; 4] {
    fn from(value: Transformation) -> Self {
        [value.a, value.b, value.c, value.d]
    }
}
