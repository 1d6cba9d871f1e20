use serde::{Deserialize, Serialize};

use super::lat_lng::{LatLng, LatLngExpression};

/// Rectangular geographical area given by its south-west and north-east corners.
///
/// A default constructed value is empty: it has no corners until it is extended, and all
/// queries return `None` for it.
///
/// ```
/// use carta_types::geo::{LatLng, LatLngBounds};
///
/// let mut bounds = LatLngBounds::default();
/// bounds.extend([10.0, 20.0]).extend([-10.0, 40.0]);
///
/// assert_eq!(bounds.south_west(), Some(LatLng::new(-10.0, 20.0)));
/// assert_eq!(bounds.to_bbox_string().as_deref(), Some("20,-10,40,10"));
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LatLng>", into = "Vec<LatLng>")]
pub struct LatLngBounds {
    corners: Option<(LatLng, LatLng)>,
}

/// List of `[lat, lng]` pairs the bounds must contain.
pub type LatLngBoundsLiteral = Vec<[f64; 2]>;

impl LatLngBounds {
    /// Creates bounds with the given opposite corners.
    pub fn new(a: impl Into<LatLngExpression>, b: impl Into<LatLngExpression>) -> Self {
        let mut bounds = Self::default();
        bounds.extend(a.into().to_lat_lng()).extend(b.into().to_lat_lng());
        bounds
    }

    /// Creates the smallest bounds containing all the points. Empty if there are no points.
    pub fn from_lat_lngs(points: impl IntoIterator<Item = impl Into<LatLngExpression>>) -> Self {
        let mut bounds = Self::default();
        for p in points {
            bounds.extend(p.into().to_lat_lng());
        }
        bounds
    }

    /// Extends the bounds to contain the given point or bounds. Extending by empty bounds does
    /// nothing.
    pub fn extend(&mut self, other: impl Into<LatLngOrBounds>) -> &mut Self {
        let (sw2, ne2) = match other.into() {
            LatLngOrBounds::LatLng(p) => (p, p),
            LatLngOrBounds::Bounds(b) => match b.corners {
                Some(corners) => corners,
                None => return self,
            },
        };

        self.corners = Some(match self.corners {
            None => (
                LatLng::new(sw2.lat, sw2.lng),
                LatLng::new(ne2.lat, ne2.lng),
            ),
            Some((sw, ne)) => (
                LatLng::new(sw.lat.min(sw2.lat), sw.lng.min(sw2.lng)),
                LatLng::new(ne.lat.max(ne2.lat), ne.lng.max(ne2.lng)),
            ),
        });

        self
    }

    /// Bounds enlarged in every direction by the given ratio of their size. Negative ratio
    /// shrinks the bounds.
    pub fn pad(&self, buffer_ratio: f64) -> Self {
        let Some((sw, ne)) = self.corners else {
            return *self;
        };

        let height_buffer = (sw.lat - ne.lat).abs() * buffer_ratio;
        let width_buffer = (sw.lng - ne.lng).abs() * buffer_ratio;

        Self::new(
            [sw.lat - height_buffer, sw.lng - width_buffer],
            [ne.lat + height_buffer, ne.lng + width_buffer],
        )
    }

    /// Center point of the bounds.
    pub fn center(&self) -> Option<LatLng> {
        let (sw, ne) = self.corners?;
        Some(LatLng::new((sw.lat + ne.lat) / 2.0, (sw.lng + ne.lng) / 2.0))
    }

    /// South-west corner.
    pub fn south_west(&self) -> Option<LatLng> {
        self.corners.map(|(sw, _)| sw)
    }

    /// North-east corner.
    pub fn north_east(&self) -> Option<LatLng> {
        self.corners.map(|(_, ne)| ne)
    }

    /// North-west corner.
    pub fn north_west(&self) -> Option<LatLng> {
        Some(LatLng::new(self.north()?, self.west()?))
    }

    /// South-east corner.
    pub fn south_east(&self) -> Option<LatLng> {
        Some(LatLng::new(self.south()?, self.east()?))
    }

    /// Western longitude.
    pub fn west(&self) -> Option<f64> {
        self.corners.map(|(sw, _)| sw.lng)
    }

    /// Southern latitude.
    pub fn south(&self) -> Option<f64> {
        self.corners.map(|(sw, _)| sw.lat)
    }

    /// Eastern longitude.
    pub fn east(&self) -> Option<f64> {
        self.corners.map(|(_, ne)| ne.lng)
    }

    /// Northern latitude.
    pub fn north(&self) -> Option<f64> {
        self.corners.map(|(_, ne)| ne.lat)
    }

    /// Returns true if the point or the whole bounds are inside these bounds (edges included).
    pub fn contains(&self, other: impl Into<LatLngOrBounds>) -> bool {
        let Some((sw, ne)) = self.corners else {
            return false;
        };

        let (sw2, ne2) = match other.into() {
            LatLngOrBounds::LatLng(p) => (p, p),
            LatLngOrBounds::Bounds(b) => match b.corners {
                Some(corners) => corners,
                None => return false,
            },
        };

        sw2.lat >= sw.lat && ne2.lat <= ne.lat && sw2.lng >= sw.lng && ne2.lng <= ne.lng
    }

    /// Returns true if the bounds have at least one common point with `other`.
    pub fn intersects(&self, other: impl Into<LatLngBoundsExpression>) -> bool {
        self.compare(other, |a, b| a >= b)
    }

    /// Returns true if the intersection of the bounds with `other` is an area.
    pub fn overlaps(&self, other: impl Into<LatLngBoundsExpression>) -> bool {
        self.compare(other, |a, b| a > b)
    }

    fn compare(
        &self,
        other: impl Into<LatLngBoundsExpression>,
        cmp: impl Fn(f64, f64) -> bool,
    ) -> bool {
        let (Some((sw, ne)), Some((sw2, ne2))) =
            (self.corners, other.into().to_lat_lng_bounds().corners)
        else {
            return false;
        };

        let lat_intersects = cmp(ne2.lat, sw.lat) && cmp(ne.lat, sw2.lat);
        let lng_intersects = cmp(ne2.lng, sw.lng) && cmp(ne.lng, sw2.lng);
        lat_intersects && lng_intersects
    }

    /// Bounds in the `west,south,east,north` form used by WMS requests.
    pub fn to_bbox_string(&self) -> Option<String> {
        Some(format!(
            "{},{},{},{}",
            self.west()?,
            self.south()?,
            self.east()?,
            self.north()?
        ))
    }

    /// Returns true if both corners are equal to the ones of `other` within `max_margin`
    /// (see [`LatLng::equals`]). Empty bounds are never equal.
    pub fn equals(&self, other: impl Into<LatLngBoundsExpression>, max_margin: Option<f64>) -> bool {
        let (Some((sw, ne)), Some((sw2, ne2))) =
            (self.corners, other.into().to_lat_lng_bounds().corners)
        else {
            return false;
        };

        sw.equals(sw2, max_margin) && ne.equals(ne2, max_margin)
    }

    /// Returns false for empty bounds.
    pub fn is_valid(&self) -> bool {
        self.corners.is_some()
    }
}

impl From<Vec<LatLng>> for LatLngBounds {
    fn from(value: Vec<LatLng>) -> Self {
        Self::from_lat_lngs(value)
    }
}

impl From<LatLngBounds> for Vec<LatLng> {
    fn from(value: LatLngBounds) -> Self {
        match value.corners {
            Some((sw, ne)) => vec![sw, ne],
            None => vec![],
        }
    }
}

/// Any value accepted where geographical bounds are expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LatLngBoundsExpression {
    /// Ready bounds.
    Bounds(LatLngBounds),
    /// Points to build the bounds from.
    Literal(LatLngBoundsLiteral),
}

impl LatLngBoundsExpression {
    /// Converts the expression into bounds.
    pub fn to_lat_lng_bounds(self) -> LatLngBounds {
        match self {
            LatLngBoundsExpression::Bounds(b) => b,
            LatLngBoundsExpression::Literal(l) => LatLngBounds::from_lat_lngs(l),
        }
    }
}

impl From<LatLngBounds> for LatLngBoundsExpression {
    fn from(value: LatLngBounds) -> Self {
        Self::Bounds(value)
    }
}

impl From<LatLngBoundsLiteral> for LatLngBoundsExpression {
    fn from(value: LatLngBoundsLiteral) -> Self {
        Self::Literal(value)
    }
}

impl From<[[f64; 2]; 2]> for LatLngBoundsExpression {
    fn from(value: [[f64; 2]; 2]) -> Self {
        Self::Literal(value.to_vec())
    }
}

/// Argument of [`LatLngBounds::extend`] and [`LatLngBounds::contains`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LatLngOrBounds {
    /// Single point.
    LatLng(LatLng),
    /// Bounds.
    Bounds(LatLngBounds),
}

impl From<LatLng> for LatLngOrBounds {
    fn from(value: LatLng) -> Self {
        Self::LatLng(value)
    }
}

impl From<[f64; 2]> for LatLngOrBounds {
    fn from(value: [f64; 2]) -> Self {
        Self::LatLng(value.into())
    }
}

impl From<[f64; 3]> for LatLngOrBounds {
    fn from(value: [f64; 3]) -> Self {
        Self::LatLng(value.into())
    }
}

impl From<LatLngBounds> for LatLngOrBounds {
    fn from(value: LatLngBounds) -> Self {
        Self::Bounds(value)
    }
}

impl From<[[f64; 2]; 2]> for LatLngOrBounds {
    fn from([a, b]: [[f64; 2]; 2]) -> Self {
        Self::Bounds(LatLngBounds::new(a, b))
    }
}

/// Input of the [`lat_lng_bounds`] constructor function.
#[derive(Debug, Clone, PartialEq)]
pub enum LatLngBoundsInput {
    /// Two opposite corners.
    Corners(LatLngExpression, LatLngExpression),
    /// Any number of points.
    Points(Vec<LatLngExpression>),
}

impl<A: Into<LatLngExpression>, B: Into<LatLngExpression>> From<(A, B)> for LatLngBoundsInput {
    fn from((a, b): (A, B)) -> Self {
        Self::Corners(a.into(), b.into())
    }
}

impl<T: Into<LatLngExpression>> From<Vec<T>> for LatLngBoundsInput {
    fn from(value: Vec<T>) -> Self {
        Self::Points(value.into_iter().map(Into::into).collect())
    }
}

/// Creates bounds from two corners or from a list of points.
///
/// ```
/// use carta_types::geo::{lat_lng_bounds, LatLng};
///
/// let by_corners = lat_lng_bounds(([10.0, 20.0], LatLng::new(-10.0, 40.0)));
/// let by_points = lat_lng_bounds(vec![[10.0, 40.0], [-10.0, 20.0], [0.0, 30.0]]);
/// assert_eq!(by_corners, by_points);
/// ```
pub fn lat_lng_bounds(input: impl Into<LatLngBoundsInput>) -> LatLngBounds {
    match input.into() {
        LatLngBoundsInput::Corners(a, b) => LatLngBounds::new(a, b),
        LatLngBoundsInput::Points(points) => LatLngBounds::from_lat_lngs(points),
    }
}
