use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::num::{format_num, round_half_up};

/// Point in pixel coordinates.
///
/// All operations return new values and never modify the point they are called on.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a new point with both coordinates rounded to the nearest integer.
    pub fn new_rounded(x: f64, y: f64) -> Self {
        Self::new(round_half_up(x), round_half_up(y))
    }

    /// Sum of two points.
    pub fn add(&self, other: impl Into<PointExpression>) -> Self {
        let other = other.into().to_point();
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Difference of two points.
    pub fn subtract(&self, other: impl Into<PointExpression>) -> Self {
        let other = other.into().to_point();
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Divides both coordinates by `num`.
    pub fn divide_by(&self, num: f64) -> Self {
        Self::new(self.x / num, self.y / num)
    }

    /// Multiplies both coordinates by `num`.
    pub fn multiply_by(&self, num: f64) -> Self {
        Self::new(self.x * num, self.y * num)
    }

    /// Multiplies each coordinate by the matching coordinate of `scale`.
    pub fn scale_by(&self, scale: impl Into<PointExpression>) -> Self {
        let scale = scale.into().to_point();
        Self::new(self.x * scale.x, self.y * scale.y)
    }

    /// Inverse of [`Point::scale_by`].
    pub fn unscale_by(&self, scale: impl Into<PointExpression>) -> Self {
        let scale = scale.into().to_point();
        Self::new(self.x / scale.x, self.y / scale.y)
    }

    /// Rounds both coordinates to the nearest integer, halves going up.
    pub fn round(&self) -> Self {
        Self::new_rounded(self.x, self.y)
    }

    /// Largest integer coordinates not greater than the current ones.
    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Smallest integer coordinates not less than the current ones.
    pub fn ceil(&self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    /// Drops the fractional part of both coordinates.
    pub fn trunc(&self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }

    /// Euclidean distance to the other point.
    pub fn distance_to(&self, other: impl Into<PointExpression>) -> f64 {
        let other = other.into().to_point();
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns true if both coordinates are exactly equal.
    pub fn equals(&self, other: impl Into<PointExpression>) -> bool {
        *self == other.into().to_point()
    }

    /// Returns true if both coordinates of `other` are not greater by absolute value than the ones
    /// of this point.
    pub fn contains(&self, other: impl Into<PointExpression>) -> bool {
        let other = other.into().to_point();
        other.x.abs() <= self.x.abs() && other.y.abs() <= self.y.abs()
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Point({}, {})",
            format_num(self.x, None),
            format_num(self.y, None)
        )
    }
}

/// Any value accepted where a point is expected.
///
/// Only the shapes listed here convert into a point expression, so mixing a number with a
/// string does not compile:
///
/// ```compile_fail
/// use carta_types::cartesian::point;
///
/// let p = point((1.0, "2"));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointExpression {
    /// Ready point.
    Point(Point),
    /// `[x, y]` pair.
    Tuple([f64; 2]),
}

impl PointExpression {
    /// Converts the expression into a point.
    pub fn to_point(self) -> Point {
        match self {
            PointExpression::Point(p) => p,
            PointExpression::Tuple([x, y]) => Point::new(x, y),
        }
    }
}

impl From<Point> for PointExpression {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<&Point> for PointExpression {
    fn from(value: &Point) -> Self {
        Self::Point(*value)
    }
}

impl From<[f64; 2]> for PointExpression {
    fn from(value: [f64; 2]) -> Self {
        Self::Tuple(value)
    }
}

impl From<(f64, f64)> for PointExpression {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Tuple([x, y])
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<PointExpression> for Point {
    fn from(value: PointExpression) -> Self {
        value.to_point()
    }
}

/// Converts any point expression into a [`Point`]. Use [`Point::new`] for separate coordinates.
///
/// ```
/// use carta_types::cartesian::{point, Point};
///
/// assert_eq!(point([1.0, 2.0]), Point::new(1.0, 2.0));
/// assert_eq!(point((1.0, 2.0)), point(Point::new(1.0, 2.0)));
/// ```
pub fn point(expr: impl Into<PointExpression>) -> Point {
    expr.into().to_point()
}

/// Coordinates of a tile: position in the tile grid and zoom level.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    /// Column.
    pub x: f64,
    /// Row.
    pub y: f64,
    /// Zoom level.
    pub z: f64,
}

impl Coords {
    /// Creates new tile coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Position of the tile without the zoom level.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Coords> for Point {
    fn from(value: Coords) -> Self {
        value.point()
    }
}
