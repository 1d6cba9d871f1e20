use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::datum::Datum;
use super::lat_lng_bounds::LatLngBounds;
use super::traits::{GeoPoint, NewGeoPoint};
use crate::error::CartaTypesError;
use crate::num::{format_num, wrap_num};

/// Default margin used by [`LatLng::equals`].
pub const DEFAULT_MAX_MARGIN: f64 = 1.0e-9;

/// Length of the Earth's equator in meters, used to convert meters into degrees.
const EQUATOR_LENGTH: f64 = 40_075_017.0;

/// Geographical point with an optional altitude.
///
/// ```
/// use carta_types::geo::LatLng;
///
/// let kyiv = LatLng::new(50.45, 30.52);
/// let lviv = LatLng::new(49.84, 24.03);
/// let distance = kyiv.distance_to(lviv);
/// assert!((465_000.0..470_000.0).contains(&distance));
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Altitude in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
}

impl LatLng {
    /// Creates a new point without altitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, alt: None }
    }

    /// Creates a new point with altitude.
    pub const fn with_alt(lat: f64, lng: f64, alt: f64) -> Self {
        Self {
            lat,
            lng,
            alt: Some(alt),
        }
    }

    /// Returns true if both coordinates differ from `other` by no more than `max_margin`
    /// ([`DEFAULT_MAX_MARGIN`] if not given). Altitude is ignored.
    pub fn equals(&self, other: impl Into<LatLngExpression>, max_margin: Option<f64>) -> bool {
        let other = other.into().to_lat_lng();
        let margin = (self.lat - other.lat).abs().max((self.lng - other.lng).abs());
        margin <= max_margin.unwrap_or(DEFAULT_MAX_MARGIN)
    }

    /// Great-circle distance in meters, assuming a spherical Earth.
    pub fn distance_to(&self, other: impl Into<LatLngExpression>) -> f64 {
        let other = other.into().to_lat_lng();
        self.distance(&other, &Datum::EARTH_SPHERE)
            .unwrap_or(f64::NAN)
    }

    /// Same point with longitude wrapped into the `[-180, 180]` range.
    pub fn wrap(&self) -> Self {
        Self {
            lng: wrap_num(self.lng, [-180.0, 180.0], true),
            ..*self
        }
    }

    /// Bounds extending `size_in_meters / 2` meters from the point in every direction.
    pub fn to_bounds(&self, size_in_meters: f64) -> LatLngBounds {
        let lat_accuracy = 180.0 * size_in_meters / EQUATOR_LENGTH;
        let lng_accuracy = lat_accuracy / self.lat.to_radians().cos();

        LatLngBounds::new(
            [self.lat - lat_accuracy, self.lng - lng_accuracy],
            [self.lat + lat_accuracy, self.lng + lng_accuracy],
        )
    }
}

impl Display for LatLng {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LatLng({}, {})",
            format_num(self.lat, None),
            format_num(self.lng, None)
        )
    }
}

impl GeoPoint for LatLng {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lng
    }
}

impl NewGeoPoint for LatLng {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self::new(lat, lon)
    }
}

impl TryFrom<&[f64]> for LatLng {
    type Error = CartaTypesError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        match *value {
            [lat, lng] => Ok(Self::new(lat, lng)),
            [lat, lng, alt] => Ok(Self::with_alt(lat, lng, alt)),
            _ => Err(CartaTypesError::Conversion(format!(
                "lat/lng array must contain 2 or 3 numbers, got {}",
                value.len()
            ))),
        }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

impl From<[f64; 3]> for LatLng {
    fn from([lat, lng, alt]: [f64; 3]) -> Self {
        Self::with_alt(lat, lng, alt)
    }
}

/// Any value accepted where a geographical point is expected.
///
/// An object literal `{"lat": .., "lng": ..}` deserializes into the [`LatLngExpression::LatLng`]
/// variant. A pair of a number and a string does not convert:
///
/// ```compile_fail
/// use carta_types::geo::lat_lng;
///
/// let p = lat_lng((50.0, "30"));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LatLngExpression {
    /// Ready point or object literal.
    LatLng(LatLng),
    /// `[lat, lng]` pair.
    Tuple([f64; 2]),
    /// `[lat, lng, alt]` triple.
    Triple([f64; 3]),
}

impl LatLngExpression {
    /// Converts the expression into a point.
    pub fn to_lat_lng(self) -> LatLng {
        match self {
            LatLngExpression::LatLng(v) => v,
            LatLngExpression::Tuple(v) => v.into(),
            LatLngExpression::Triple(v) => v.into(),
        }
    }
}

impl From<LatLng> for LatLngExpression {
    fn from(value: LatLng) -> Self {
        Self::LatLng(value)
    }
}

impl From<&LatLng> for LatLngExpression {
    fn from(value: &LatLng) -> Self {
        Self::LatLng(*value)
    }
}

impl From<[f64; 2]> for LatLngExpression {
    fn from(value: [f64; 2]) -> Self {
        Self::Tuple(value)
    }
}

impl From<(f64, f64)> for LatLngExpression {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::Tuple([lat, lng])
    }
}

impl From<[f64; 3]> for LatLngExpression {
    fn from(value: [f64; 3]) -> Self {
        Self::Triple(value)
    }
}

impl From<(f64, f64, f64)> for LatLngExpression {
    fn from((lat, lng, alt): (f64, f64, f64)) -> Self {
        Self::Triple([lat, lng, alt])
    }
}

impl From<LatLngExpression> for LatLng {
    fn from(value: LatLngExpression) -> Self {
        value.to_lat_lng()
    }
}

/// Converts any lat/lng expression into a [`LatLng`]. Use [`LatLng::new`] or
/// [`LatLng::with_alt`] for separate coordinates.
pub fn lat_lng(expr: impl Into<LatLngExpression>) -> LatLng {
    expr.into().to_lat_lng()
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn every_shape_produces_the_same_point() {
        let expected = LatLng::new(50.0, 30.0);
        assert_eq!(lat_lng([50.0, 30.0]), expected);
        assert_eq!(lat_lng((50.0, 30.0)), expected);
        assert_eq!(lat_lng(expected), expected);
        assert_eq!(lat_lng((50.0, 30.0, 100.0)).alt, Some(100.0));

        let literal: LatLngExpression = serde_json::from_str(r#"{"lat": 50, "lng": 30}"#).unwrap();
        assert_eq!(literal.to_lat_lng(), expected);
        let tuple: LatLngExpression = serde_json::from_str("[50, 30]").unwrap();
        assert_eq!(tuple.to_lat_lng(), expected);
        assert!(serde_json::from_str::<LatLngExpression>(r#"[50, "30"]"#).is_err());
    }

    #[test]
    fn dynamic_arrays_are_checked() {
        assert_eq!(
            LatLng::try_from([1.0, 2.0].as_slice()).unwrap(),
            LatLng::new(1.0, 2.0)
        );
        assert_matches!(
            LatLng::try_from([1.0].as_slice()),
            Err(CartaTypesError::Conversion(_))
        );
    }

    #[test]
    fn equals_uses_margin() {
        let a = LatLng::new(10.0, 20.0);
        assert!(a.equals([10.0, 20.0 + 1e-10], None));
        assert!(!a.equals([10.0, 20.001], None));
        assert!(a.equals([10.0, 20.001], Some(0.01)));
        assert!(a.equals(LatLng::with_alt(10.0, 20.0, 100.0), None));
    }

    #[test]
    fn distance() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 90.0);
        assert_relative_eq!(
            a.distance_to(b),
            std::f64::consts::FRAC_PI_2 * 6_371_000.0,
            max_relative = 1e-9
        );
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn wrap_longitude() {
        assert_eq!(LatLng::new(10.0, 190.0).wrap(), LatLng::new(10.0, -170.0));
        assert_eq!(LatLng::new(10.0, 180.0).wrap(), LatLng::new(10.0, 180.0));
        assert_eq!(LatLng::new(10.0, -540.0).wrap(), LatLng::new(10.0, -180.0));
    }

    #[test]
    fn to_bounds_is_centered() {
        let p = LatLng::new(0.0, 0.0);
        let bounds = p.to_bounds(EQUATOR_LENGTH / 180.0);
        assert!(bounds.center().unwrap().equals(p, None));
        assert_abs_diff_eq!(bounds.north().unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bounds.east().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn display() {
        assert_eq!(LatLng::new(50.123456789, 30.0).to_string(), "LatLng(50.12346, 30)");
    }
}
