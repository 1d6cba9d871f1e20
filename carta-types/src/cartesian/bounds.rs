use serde::{Deserialize, Serialize};

use super::point::{Point, PointExpression};

/// Rectangular area in pixel coordinates.
///
/// A default constructed value is empty: it has no corners until a point is added with
/// [`Bounds::extend`], and all queries return `None` for it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct Bounds {
    corners: Option<(Point, Point)>,
}

/// Two corners of a bounds as `[x, y]` pairs.
pub type BoundsLiteral = [[f64; 2]; 2];

impl Bounds {
    /// Creates the bounds that have `a` and `b` as opposite corners.
    pub fn new(a: impl Into<PointExpression>, b: impl Into<PointExpression>) -> Self {
        Self::default().extend(a).extend(b)
    }

    /// Creates the smallest bounds containing all the points. Empty if there are no points.
    pub fn from_points(points: impl IntoIterator<Item = impl Into<PointExpression>>) -> Self {
        points
            .into_iter()
            .fold(Self::default(), |bounds, p| bounds.extend(p))
    }

    /// Extends the bounds to contain the given point.
    ///
    /// ```
    /// use carta_types::cartesian::{Bounds, Point};
    ///
    /// let bounds = Bounds::default().extend([0.0, 0.0]).extend([10.0, -5.0]);
    /// assert_eq!(bounds.top_left(), Some(Point::new(0.0, -5.0)));
    /// ```
    pub fn extend(self, point: impl Into<PointExpression>) -> Self {
        let p = point.into().to_point();
        let corners = match self.corners {
            None => (p, p),
            Some((min, max)) => (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            ),
        };

        Self {
            corners: Some(corners),
        }
    }

    /// Top-left corner (smallest coordinates).
    pub fn min(&self) -> Option<Point> {
        self.corners.map(|(min, _)| min)
    }

    /// Bottom-right corner (largest coordinates).
    pub fn max(&self) -> Option<Point> {
        self.corners.map(|(_, max)| max)
    }

    /// Center of the bounds, optionally rounded to integer coordinates.
    pub fn center(&self, round: bool) -> Option<Point> {
        let (min, max) = self.corners?;
        let x = (min.x + max.x) / 2.0;
        let y = (min.y + max.y) / 2.0;
        Some(if round {
            Point::new_rounded(x, y)
        } else {
            Point::new(x, y)
        })
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Option<Point> {
        let (min, max) = self.corners?;
        Some(Point::new(min.x, max.y))
    }

    /// Top-right corner.
    pub fn top_right(&self) -> Option<Point> {
        let (min, max) = self.corners?;
        Some(Point::new(max.x, min.y))
    }

    /// Top-left corner, same as [`Bounds::min`].
    pub fn top_left(&self) -> Option<Point> {
        self.min()
    }

    /// Bottom-right corner, same as [`Bounds::max`].
    pub fn bottom_right(&self) -> Option<Point> {
        self.max()
    }

    /// Width and height of the bounds.
    pub fn size(&self) -> Option<Point> {
        let (min, max) = self.corners?;
        Some(max.subtract(min))
    }

    /// Returns true if the point or the whole bounds are inside these bounds (edges included).
    pub fn contains(&self, other: impl Into<BoundsOrPoint>) -> bool {
        let Some((min, max)) = self.corners else {
            return false;
        };

        let (other_min, other_max) = match other.into() {
            BoundsOrPoint::Point(p) => (p, p),
            BoundsOrPoint::Bounds(b) => match b.corners {
                Some(corners) => corners,
                None => return false,
            },
        };

        other_min.x >= min.x && other_max.x <= max.x && other_min.y >= min.y && other_max.y <= max.y
    }

    /// Returns true if the bounds have at least one common point with `other`.
    pub fn intersects(&self, other: impl Into<BoundsExpression>) -> bool {
        self.compare(other, |a, b| a >= b)
    }

    /// Returns true if the intersection of the bounds with `other` is an area.
    pub fn overlaps(&self, other: impl Into<BoundsExpression>) -> bool {
        self.compare(other, |a, b| a > b)
    }

    fn compare(&self, other: impl Into<BoundsExpression>, cmp: impl Fn(f64, f64) -> bool) -> bool {
        let (Some((min, max)), Some((min2, max2))) = (self.corners, other.into().to_bounds().corners)
        else {
            return false;
        };

        let x_intersects = cmp(max2.x, min.x) && cmp(max.x, min2.x);
        let y_intersects = cmp(max2.y, min.y) && cmp(max.y, min2.y);
        x_intersects && y_intersects
    }

    /// Returns false for empty bounds.
    pub fn is_valid(&self) -> bool {
        self.corners.is_some()
    }
}

impl From<Vec<Point>> for Bounds {
    fn from(value: Vec<Point>) -> Self {
        Self::from_points(value)
    }
}

impl From<Bounds> for Vec<Point> {
    fn from(value: Bounds) -> Self {
        match value.corners {
            Some((min, max)) => vec![min, max],
            None => vec![],
        }
    }
}

impl From<BoundsLiteral> for Bounds {
    fn from([a, b]: BoundsLiteral) -> Self {
        Self::new(a, b)
    }
}

/// Any value accepted where bounds are expected.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BoundsExpression {
    /// Ready bounds.
    Bounds(Bounds),
    /// Two corners.
    Literal(BoundsLiteral),
}

impl BoundsExpression {
    /// Converts the expression into bounds.
    pub fn to_bounds(self) -> Bounds {
        match self {
            BoundsExpression::Bounds(b) => b,
            BoundsExpression::Literal(l) => l.into(),
        }
    }
}

impl From<Bounds> for BoundsExpression {
    fn from(value: Bounds) -> Self {
        Self::Bounds(value)
    }
}

impl From<BoundsLiteral> for BoundsExpression {
    fn from(value: BoundsLiteral) -> Self {
        Self::Literal(value)
    }
}

/// Argument of [`Bounds::contains`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BoundsOrPoint {
    /// Bounds to test.
    Bounds(Bounds),
    /// Point to test.
    Point(Point),
}

impl From<Bounds> for BoundsOrPoint {
    fn from(value: Bounds) -> Self {
        Self::Bounds(value)
    }
}

impl From<BoundsLiteral> for BoundsOrPoint {
    fn from(value: BoundsLiteral) -> Self {
        Self::Bounds(value.into())
    }
}

impl From<Point> for BoundsOrPoint {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<[f64; 2]> for BoundsOrPoint {
    fn from(value: [f64; 2]) -> Self {
        Self::Point(value.into())
    }
}

/// Input of the [`bounds`] constructor function.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundsInput {
    /// Two opposite corners.
    Corners(PointExpression, PointExpression),
    /// Any number of points.
    Points(Vec<Point>),
}

impl<A: Into<PointExpression>, B: Into<PointExpression>> From<(A, B)> for BoundsInput {
    fn from((a, b): (A, B)) -> Self {
        Self::Corners(a.into(), b.into())
    }
}

impl From<Vec<Point>> for BoundsInput {
    fn from(value: Vec<Point>) -> Self {
        Self::Points(value)
    }
}

impl From<&[Point]> for BoundsInput {
    fn from(value: &[Point]) -> Self {
        Self::Points(value.to_vec())
    }
}

impl From<BoundsLiteral> for BoundsInput {
    fn from([a, b]: BoundsLiteral) -> Self {
        Self::Corners(a.into(), b.into())
    }
}

/// Creates bounds from two corners or from a list of points.
///
/// ```
/// use carta_types::cartesian::{bounds, Point};
///
/// let by_corners = bounds(([0.0, 10.0], [10.0, 0.0]));
/// let by_points = bounds(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 10.0)]);
/// assert_eq!(by_corners, by_points);
/// ```
pub fn bounds(input: impl Into<BoundsInput>) -> Bounds {
    match input.into() {
        BoundsInput::Corners(a, b) => Bounds::new(a, b),
        BoundsInput::Points(points) => Bounds::from_points(points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_the_same_for_both_constructors() {
        let by_corners = bounds(([0.0, 10.0], [20.0, 0.0]));
        let by_points = bounds(vec![
            Point::new(20.0, 10.0),
            Point::new(5.0, 5.0),
            Point::new(0.0, 0.0),
        ]);
        let by_literal = Bounds::from([[20.0, 0.0], [0.0, 10.0]]);

        for b in [by_corners, by_points, by_literal] {
            assert_eq!(b.top_left(), Some(Point::new(0.0, 0.0)));
            assert_eq!(b.top_right(), Some(Point::new(20.0, 0.0)));
            assert_eq!(b.bottom_left(), Some(Point::new(0.0, 10.0)));
            assert_eq!(b.bottom_right(), Some(Point::new(20.0, 10.0)));
            assert_eq!(b.size(), Some(Point::new(20.0, 10.0)));
            assert_eq!(b.center(false), Some(Point::new(10.0, 5.0)));
        }
    }

    #[test]
    fn empty_bounds() {
        let b = Bounds::default();
        assert!(!b.is_valid());
        assert_eq!(b.center(true), None);
        assert!(!b.contains([0.0, 0.0]));
        assert!(!b.intersects([[0.0, 0.0], [1.0, 1.0]]));
        assert!(bounds(Vec::<Point>::new()).min().is_none());
    }

    #[test]
    fn center_rounding() {
        let b = Bounds::new([0.0, 0.0], [3.0, 3.0]);
        assert_eq!(b.center(false), Some(Point::new(1.5, 1.5)));
        assert_eq!(b.center(true), Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn contains_points_and_bounds() {
        let b = Bounds::new([0.0, 0.0], [10.0, 10.0]);
        assert!(b.contains([10.0, 0.0]));
        assert!(!b.contains([10.1, 0.0]));
        assert!(b.contains([[1.0, 1.0], [10.0, 10.0]]));
        assert!(!b.contains(Bounds::new([1.0, 1.0], [11.0, 10.0])));
    }

    #[test]
    fn touching_bounds_intersect_but_do_not_overlap() {
        let a = Bounds::new([0.0, 0.0], [10.0, 10.0]);
        let touching = Bounds::new([10.0, 0.0], [20.0, 10.0]);
        assert!(a.intersects(touching));
        assert!(!a.overlaps(touching));

        let crossing = Bounds::new([5.0, 5.0], [20.0, 20.0]);
        assert!(a.overlaps(crossing));
        assert!(!a.intersects([[11.0, 0.0], [12.0, 1.0]]));
    }

    #[test]
    fn serializes_as_corner_list() {
        let b = Bounds::new([0.0, 1.0], [2.0, 3.0]);
        let json = serde_json::to_value(b).unwrap();
        assert_eq!(json, serde_json::json!([{"x": 0.0, "y": 1.0}, {"x": 2.0, "y": 3.0}]));
        assert_eq!(serde_json::from_value::<Bounds>(json).unwrap(), b);
    }
}
