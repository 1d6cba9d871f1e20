use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::position::{BBox, Position};
use crate::error::CartaTypesError;
use crate::geometry_type::{GeoJsonType, GeometryType};

macro_rules! geometry_tag {
    ($tag:ident, $name:literal) => {
        #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
        pub(crate) struct $tag;

        impl Serialize for $tag {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($name)
            }
        }

        impl<'de> Deserialize<'de> for $tag {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                if value == $name {
                    Ok($tag)
                } else {
                    Err(D::Error::invalid_value(Unexpected::Str(&value), &$name))
                }
            }
        }
    };
}

geometry_tag!(PointTag, "Point");
geometry_tag!(MultiPointTag, "MultiPoint");
geometry_tag!(LineStringTag, "LineString");
geometry_tag!(MultiLineStringTag, "MultiLineString");
geometry_tag!(PolygonTag, "Polygon");
geometry_tag!(MultiPolygonTag, "MultiPolygon");
geometry_tag!(GeometryCollectionTag, "GeometryCollection");
geometry_tag!(FeatureTag, "Feature");
geometry_tag!(FeatureCollectionTag, "FeatureCollection");

/// Common contract of every GeoJSON geometry, either a concrete tagged struct or [`Geometry`].
pub trait GeometryObject: Serialize + DeserializeOwned + Clone {
    /// Tag of the geometry.
    fn geometry_type(&self) -> GeometryType;
    /// Bounding box stored with the geometry, if any.
    fn bbox(&self) -> Option<&BBox>;
}

/// A geometry struct with a statically known tag.
pub trait TypedGeometry:
    GeometryObject + Into<Geometry> + TryFrom<Geometry, Error = CartaTypesError>
{
    /// Tag every value of this type carries.
    const TYPE: GeometryType;
}

macro_rules! geometry_struct {
    (
        $(#[$meta:meta])*
        $name:ident, $tag:ident, $coords:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(rename = "type")]
            tag: $tag,
            /// Coordinates of the geometry.
            pub coordinates: $coords,
            /// Optional bounding box.
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub bbox: Option<BBox>,
        }

        impl $name {
            /// Creates a new geometry without a bounding box.
            pub fn new(coordinates: $coords) -> Self {
                Self {
                    tag: $tag,
                    coordinates,
                    bbox: None,
                }
            }

            /// Sets the bounding box of the geometry.
            pub fn with_bbox(self, bbox: BBox) -> Self {
                Self {
                    bbox: Some(bbox),
                    ..self
                }
            }
        }

        impl GeometryObject for $name {
            fn geometry_type(&self) -> GeometryType {
                GeometryType::$name
            }

            fn bbox(&self) -> Option<&BBox> {
                self.bbox.as_ref()
            }
        }

        impl TypedGeometry for $name {
            const TYPE: GeometryType = GeometryType::$name;
        }

        impl From<$name> for Geometry {
            fn from(value: $name) -> Self {
                Geometry::$name(value)
            }
        }

        impl TryFrom<Geometry> for $name {
            type Error = CartaTypesError;

            fn try_from(value: Geometry) -> Result<Self, Self::Error> {
                match value {
                    Geometry::$name(v) => Ok(v),
                    other => Err(CartaTypesError::UnexpectedType {
                        expected: GeoJsonType::Geometry(GeometryType::$name),
                        actual: GeoJsonType::Geometry(other.geometry_type()),
                    }),
                }
            }
        }
    };
}

geometry_struct!(
    /// A single position.
    Point,
    PointTag,
    Position
);
geometry_struct!(
    /// A set of positions.
    MultiPoint,
    MultiPointTag,
    Vec<Position>
);
geometry_struct!(
    /// A line through two or more positions.
    LineString,
    LineStringTag,
    Vec<Position>
);
geometry_struct!(
    /// A set of lines.
    MultiLineString,
    MultiLineStringTag,
    Vec<Vec<Position>>
);
geometry_struct!(
    /// Linear rings (closed lines). The first ring is the exterior, the rest are holes.
    Polygon,
    PolygonTag,
    Vec<Vec<Position>>
);
geometry_struct!(
    /// A set of polygons.
    MultiPolygon,
    MultiPolygonTag,
    Vec<Vec<Vec<Position>>>
);

/// Heterogeneous list of geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    #[serde(rename = "type")]
    tag: GeometryCollectionTag,
    /// Member geometries.
    pub geometries: Vec<Geometry>,
    /// Optional bounding box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
}

impl GeometryCollection {
    /// Creates a new collection without a bounding box.
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self {
            tag: GeometryCollectionTag,
            geometries,
            bbox: None,
        }
    }
}

impl GeometryObject for GeometryCollection {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::GeometryCollection
    }

    fn bbox(&self) -> Option<&BBox> {
        self.bbox.as_ref()
    }
}

impl TypedGeometry for GeometryCollection {
    const TYPE: GeometryType = GeometryType::GeometryCollection;
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}

impl TryFrom<Geometry> for GeometryCollection {
    type Error = CartaTypesError;

    fn try_from(value: Geometry) -> Result<Self, Self::Error> {
        match value {
            Geometry::GeometryCollection(v) => Ok(v),
            other => Err(CartaTypesError::UnexpectedType {
                expected: GeoJsonType::Geometry(GeometryType::GeometryCollection),
                actual: GeoJsonType::Geometry(other.geometry_type()),
            }),
        }
    }
}

/// Any GeoJSON geometry, discriminated by its `type` member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[serde(from = "RawGeometry")]
pub enum Geometry {
    /// See [`Point`].
    Point(Point),
    /// See [`MultiPoint`].
    MultiPoint(MultiPoint),
    /// See [`LineString`].
    LineString(LineString),
    /// See [`MultiLineString`].
    MultiLineString(MultiLineString),
    /// See [`Polygon`].
    Polygon(Polygon),
    /// See [`MultiPolygon`].
    MultiPolygon(MultiPolygon),
    /// See [`GeometryCollection`].
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Builds a geometry of the given type from a raw JSON coordinate array, checking that the
    /// array is nested exactly as deep as the type requires.
    ///
    /// ```
    /// use carta_types::geojson::{Geometry, GeometryObject};
    /// use carta_types::geometry_type::GeometryType;
    /// use serde_json::json;
    ///
    /// let polygon = Geometry::from_coordinates(
    ///     GeometryType::Polygon,
    ///     json!([[[0, 0], [1, 0], [1, 1], [0, 0]]]),
    /// )?;
    /// assert_eq!(polygon.geometry_type(), GeometryType::Polygon);
    ///
    /// assert!(Geometry::from_coordinates(GeometryType::Polygon, json!([[0, 0], [1, 1]])).is_err());
    /// # Ok::<(), carta_types::error::CartaTypesError>(())
    /// ```
    pub fn from_coordinates(
        geometry_type: GeometryType,
        coordinates: Value,
    ) -> Result<Self, CartaTypesError> {
        let Some(expected) = geometry_type.coordinate_depth() else {
            return Err(CartaTypesError::Conversion(
                "geometry collection has no coordinates".to_string(),
            ));
        };

        if let Some(actual) = nesting_depth(&coordinates) {
            if actual != expected {
                log::debug!(
                    "Rejected {geometry_type} coordinates nested {actual} levels deep instead of {expected}"
                );
                return Err(CartaTypesError::InvalidNesting {
                    geometry_type,
                    expected,
                    actual,
                });
            }
        }

        let conversion = |e: serde_json::Error| CartaTypesError::Conversion(e.to_string());
        Ok(match geometry_type {
            GeometryType::Point => {
                Point::new(serde_json::from_value(coordinates).map_err(conversion)?).into()
            }
            GeometryType::MultiPoint => {
                MultiPoint::new(serde_json::from_value(coordinates).map_err(conversion)?).into()
            }
            GeometryType::LineString => {
                LineString::new(serde_json::from_value(coordinates).map_err(conversion)?).into()
            }
            GeometryType::MultiLineString => {
                MultiLineString::new(serde_json::from_value(coordinates).map_err(conversion)?)
                    .into()
            }
            GeometryType::Polygon => {
                Polygon::new(serde_json::from_value(coordinates).map_err(conversion)?).into()
            }
            GeometryType::MultiPolygon => {
                MultiPolygon::new(serde_json::from_value(coordinates).map_err(conversion)?).into()
            }
            GeometryType::GeometryCollection => {
                return Err(CartaTypesError::Conversion(
                    "geometry collection has no coordinates".to_string(),
                ))
            }
        })
    }

    /// Iterates over every position of the geometry, descending into collections.
    pub fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            Geometry::Point(v) => Box::new(std::iter::once(&v.coordinates)),
            Geometry::MultiPoint(v) => Box::new(v.coordinates.iter()),
            Geometry::LineString(v) => Box::new(v.coordinates.iter()),
            Geometry::MultiLineString(v) => Box::new(v.coordinates.iter().flatten()),
            Geometry::Polygon(v) => Box::new(v.coordinates.iter().flatten()),
            Geometry::MultiPolygon(v) => Box::new(v.coordinates.iter().flatten().flatten()),
            Geometry::GeometryCollection(v) => {
                Box::new(v.geometries.iter().flat_map(|g| g.positions()))
            }
        }
    }
}

impl GeometryObject for Geometry {
    fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(v) => v.geometry_type(),
            Geometry::MultiPoint(v) => v.geometry_type(),
            Geometry::LineString(v) => v.geometry_type(),
            Geometry::MultiLineString(v) => v.geometry_type(),
            Geometry::Polygon(v) => v.geometry_type(),
            Geometry::MultiPolygon(v) => v.geometry_type(),
            Geometry::GeometryCollection(v) => v.geometry_type(),
        }
    }

    fn bbox(&self) -> Option<&BBox> {
        match self {
            Geometry::Point(v) => v.bbox(),
            Geometry::MultiPoint(v) => v.bbox(),
            Geometry::LineString(v) => v.bbox(),
            Geometry::MultiLineString(v) => v.bbox(),
            Geometry::Polygon(v) => v.bbox(),
            Geometry::MultiPolygon(v) => v.bbox(),
            Geometry::GeometryCollection(v) => v.bbox(),
        }
    }
}

/// Number of nested array levels of a JSON coordinate value. A number has depth 0.
///
/// Returns `None` if the first element chain ends in an empty array: an empty array can stand
/// for any depth, so it is not known.
pub fn nesting_depth(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(1 + nesting_depth(items.first()?)?),
        _ => Some(0),
    }
}

// Internally tagged mirror of `Geometry` used for deserialization, so that an unknown or
// mismatched tag is reported by name instead of failing every untagged variant.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Point {
        coordinates: Position,
        #[serde(default)]
        bbox: Option<BBox>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
        #[serde(default)]
        bbox: Option<BBox>,
    },
    LineString {
        coordinates: Vec<Position>,
        #[serde(default)]
        bbox: Option<BBox>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
        #[serde(default)]
        bbox: Option<BBox>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
        #[serde(default)]
        bbox: Option<BBox>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
        #[serde(default)]
        bbox: Option<BBox>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
        #[serde(default)]
        bbox: Option<BBox>,
    },
}

impl From<RawGeometry> for Geometry {
    fn from(value: RawGeometry) -> Self {
        match value {
            RawGeometry::Point { coordinates, bbox } => Geometry::Point(Point {
                tag: PointTag,
                coordinates,
                bbox,
            }),
            RawGeometry::MultiPoint { coordinates, bbox } => Geometry::MultiPoint(MultiPoint {
                tag: MultiPointTag,
                coordinates,
                bbox,
            }),
            RawGeometry::LineString { coordinates, bbox } => Geometry::LineString(LineString {
                tag: LineStringTag,
                coordinates,
                bbox,
            }),
            RawGeometry::MultiLineString { coordinates, bbox } => {
                Geometry::MultiLineString(MultiLineString {
                    tag: MultiLineStringTag,
                    coordinates,
                    bbox,
                })
            }
            RawGeometry::Polygon { coordinates, bbox } => Geometry::Polygon(Polygon {
                tag: PolygonTag,
                coordinates,
                bbox,
            }),
            RawGeometry::MultiPolygon { coordinates, bbox } => {
                Geometry::MultiPolygon(MultiPolygon {
                    tag: MultiPolygonTag,
                    coordinates,
                    bbox,
                })
            }
            RawGeometry::GeometryCollection { geometries, bbox } => {
                Geometry::GeometryCollection(GeometryCollection {
                    tag: GeometryCollectionTag,
                    geometries,
                    bbox,
                })
            }
        }
    }
}
