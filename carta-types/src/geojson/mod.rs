//! GeoJSON interchange model ([RFC 7946](https://datatracker.ietf.org/doc/html/rfc7946)).
//!
//! Every geometry is a separate struct whose `coordinates` member has the nesting depth its tag
//! requires, so a [`Polygon`] can only ever hold rings of positions. [`Geometry`] is the sum of all
//! of them, and [`Feature`] / [`FeatureCollection`] are generic over the geometry they carry.

use serde::{Deserialize, Serialize};

use crate::geometry_type::GeoJsonType;

mod feature;
mod geometry;
mod position;

#[cfg(feature = "geojson")]
mod interop;

pub use feature::{Feature, FeatureCollection, FeatureId, Properties};
pub use geometry::{
    nesting_depth, Geometry, GeometryCollection, GeometryObject, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, TypedGeometry,
};
pub use position::{BBox, Position};

/// Any GeoJSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeoJson {
    /// Bare geometry.
    Geometry(Geometry),
    /// Single feature.
    Feature(Feature),
    /// Feature collection.
    FeatureCollection(FeatureCollection),
}

impl GeoJson {
    /// Type tag of the object.
    pub fn geo_json_type(&self) -> GeoJsonType {
        match self {
            GeoJson::Geometry(g) => GeoJsonType::Geometry(g.geometry_type()),
            GeoJson::Feature(_) => GeoJsonType::Feature,
            GeoJson::FeatureCollection(_) => GeoJsonType::FeatureCollection,
        }
    }

    /// Bounding box stored with the object, if any.
    pub fn bbox(&self) -> Option<&BBox> {
        match self {
            GeoJson::Geometry(g) => g.bbox(),
            GeoJson::Feature(f) => f.bbox.as_ref(),
            GeoJson::FeatureCollection(c) => c.bbox.as_ref(),
        }
    }
}

impl From<Geometry> for GeoJson {
    fn from(value: Geometry) -> Self {
        Self::Geometry(value)
    }
}

impl From<Feature> for GeoJson {
    fn from(value: Feature) -> Self {
        Self::Feature(value)
    }
}

impl From<FeatureCollection> for GeoJson {
    fn from(value: FeatureCollection) -> Self {
        Self::FeatureCollection(value)
    }
}
