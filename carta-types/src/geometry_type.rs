//! Type tags of GeoJSON objects. See [`GeometryType`] and [`GeoJsonType`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Literal discriminator of a GeoJSON geometry. The tag decides how deep the coordinate array of
/// the geometry is nested.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum GeometryType {
    /// Single position.
    Point,
    /// List of positions.
    MultiPoint,
    /// List of positions forming a line.
    LineString,
    /// List of lines.
    MultiLineString,
    /// List of linear rings, the first one being the exterior.
    Polygon,
    /// List of polygons.
    MultiPolygon,
    /// List of geometries of any type.
    GeometryCollection,
}

impl GeometryType {
    /// All geometry tags in the order they are listed by RFC 7946.
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::MultiPoint,
        GeometryType::LineString,
        GeometryType::MultiLineString,
        GeometryType::Polygon,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    /// The tag as it appears in the `type` member.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Number of array levels in the `coordinates` member, counting a single position as one.
    ///
    /// Geometry collections carry no coordinates and return `None`.
    ///
    /// ```
    /// use carta_types::geometry_type::GeometryType;
    ///
    /// assert_eq!(GeometryType::Point.coordinate_depth(), Some(1));
    /// assert_eq!(GeometryType::Polygon.coordinate_depth(), Some(3));
    /// assert_eq!(GeometryType::GeometryCollection.coordinate_depth(), None);
    /// ```
    pub fn coordinate_depth(&self) -> Option<usize> {
        match self {
            GeometryType::Point => Some(1),
            GeometryType::MultiPoint | GeometryType::LineString => Some(2),
            GeometryType::MultiLineString | GeometryType::Polygon => Some(3),
            GeometryType::MultiPolygon => Some(4),
            GeometryType::GeometryCollection => None,
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownType(s.to_string()))
    }
}

/// Discriminator of any GeoJSON object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeoJsonType {
    /// A feature wrapping a geometry.
    Feature,
    /// A list of features.
    FeatureCollection,
    /// A bare geometry.
    Geometry(GeometryType),
}

impl GeoJsonType {
    /// The tag as it appears in the `type` member.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoJsonType::Feature => "Feature",
            GeoJsonType::FeatureCollection => "FeatureCollection",
            GeoJsonType::Geometry(t) => t.as_str(),
        }
    }
}

impl Display for GeoJsonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GeometryType> for GeoJsonType {
    fn from(value: GeometryType) -> Self {
        Self::Geometry(value)
    }
}

impl FromStr for GeoJsonType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Feature" => Ok(GeoJsonType::Feature),
            "FeatureCollection" => Ok(GeoJsonType::FeatureCollection),
            other => other.parse().map(GeoJsonType::Geometry),
        }
    }
}

/// Returned when a string is not a known GeoJSON type tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown GeoJSON type `{0}`")]
pub struct UnknownType(pub String);
