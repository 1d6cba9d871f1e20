use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use super::geometry::{FeatureCollectionTag, FeatureTag, Geometry, TypedGeometry};
use super::position::BBox;
use crate::error::CartaTypesError;

/// Open-ended property bag of a feature.
pub type Properties = Map<String, Value>;

/// Identifier of a feature: either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    /// String identifier.
    String(String),
    /// Numeric identifier.
    Number(Number),
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureId::String(v) => f.write_str(v),
            FeatureId::Number(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<u64> for FeatureId {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for FeatureId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// A geometry (or its explicit absence) paired with a property bag and an optional id.
///
/// Both `geometry` and `properties` are always written out, as `null` when absent, and must be
/// present when reading. Any geometry type can be used for `G`, so `Feature<Point>` only accepts
/// point features.
///
/// ```
/// use carta_types::geojson::{Feature, Point, Position};
///
/// let feature: Feature<Point> = serde_json::from_str(
///     r#"{"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}, "properties": null}"#,
/// )?;
/// assert_eq!(feature.geometry.unwrap().coordinates, Position::new(1.0, 2.0));
/// assert!(feature.properties.is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "G: Serialize, P: Serialize",
    deserialize = "G: Deserialize<'de>, P: Deserialize<'de>"
))]
pub struct Feature<G = Geometry, P = Properties> {
    #[serde(rename = "type")]
    tag: FeatureTag,
    /// Geometry of the feature, `None` for features without a location.
    #[serde(deserialize_with = "required_nullable")]
    pub geometry: Option<G>,
    /// Identifier of the feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    /// Properties of the feature, `None` when declared `null`.
    #[serde(deserialize_with = "required_nullable")]
    pub properties: Option<P>,
    /// Optional bounding box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
}

// Treats a missing member as an error while still accepting an explicit `null`.
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

impl<G, P> Feature<G, P> {
    /// Creates a feature with the given geometry and no properties.
    pub fn new(geometry: G) -> Self {
        Self {
            tag: FeatureTag,
            geometry: Some(geometry),
            id: None,
            properties: None,
            bbox: None,
        }
    }

    /// Creates a feature that has no geometry.
    pub fn without_geometry() -> Self {
        Self {
            tag: FeatureTag,
            geometry: None,
            id: None,
            properties: None,
            bbox: None,
        }
    }

    /// Sets the properties of the feature.
    pub fn with_properties(self, properties: P) -> Self {
        Self {
            properties: Some(properties),
            ..self
        }
    }

    /// Sets the id of the feature.
    pub fn with_id(self, id: impl Into<FeatureId>) -> Self {
        Self {
            id: Some(id.into()),
            ..self
        }
    }

    /// Replaces the geometry keeping id, properties and bbox.
    pub fn map_geometry<T>(self, f: impl FnOnce(G) -> T) -> Feature<T, P> {
        Feature {
            tag: FeatureTag,
            geometry: self.geometry.map(f),
            id: self.id,
            properties: self.properties,
            bbox: self.bbox,
        }
    }
}

impl<P> Feature<Geometry, P> {
    /// Narrows the feature to a concrete geometry type.
    ///
    /// Features without geometry narrow to any type.
    pub fn try_narrow<G: TypedGeometry>(self) -> Result<Feature<G, P>, CartaTypesError> {
        let geometry = self.geometry.map(G::try_from).transpose()?;
        Ok(Feature {
            tag: FeatureTag,
            geometry,
            id: self.id,
            properties: self.properties,
            bbox: self.bbox,
        })
    }
}

impl<G: TypedGeometry, P> Feature<G, P> {
    /// Converts a feature with a concrete geometry type into the generic one.
    pub fn widen(self) -> Feature<Geometry, P> {
        self.map_geometry(Into::into)
    }
}

impl<G> Feature<G, Properties> {
    /// Value of a property, if the feature has properties and the key is set.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(key)
    }
}

/// List of features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "G: Serialize, P: Serialize",
    deserialize = "G: Deserialize<'de>, P: Deserialize<'de>"
))]
pub struct FeatureCollection<G = Geometry, P = Properties> {
    #[serde(rename = "type")]
    tag: FeatureCollectionTag,
    /// Member features.
    pub features: Vec<Feature<G, P>>,
    /// Optional bounding box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
}

impl<G, P> FeatureCollection<G, P> {
    /// Creates a new collection.
    pub fn new(features: Vec<Feature<G, P>>) -> Self {
        Self {
            tag: FeatureCollectionTag,
            features,
            bbox: None,
        }
    }
}

impl<G, P> Default for FeatureCollection<G, P> {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl<G, P> FromIterator<Feature<G, P>> for FeatureCollection<G, P> {
    fn from_iter<T: IntoIterator<Item = Feature<G, P>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::geojson::{GeometryObject, LineString, Point, Polygon, Position};
    use crate::geometry_type::GeometryType;

    fn feature_with(geometry: Value, properties: Value) -> Value {
        json!({"type": "Feature", "geometry": geometry, "properties": properties})
    }

    #[test]
    fn properties_accept_map_or_null_for_every_geometry() {
        let geometries = [
            json!({"type": "Point", "coordinates": [1, 2]}),
            json!({"type": "MultiPoint", "coordinates": [[1, 2]]}),
            json!({"type": "LineString", "coordinates": [[1, 2], [3, 4]]}),
            json!({"type": "MultiLineString", "coordinates": [[[1, 2], [3, 4]]]}),
            json!({"type": "Polygon", "coordinates": [[[1, 2], [3, 4], [5, 6], [1, 2]]]}),
            json!({"type": "MultiPolygon", "coordinates": [[[[1, 2], [3, 4], [5, 6], [1, 2]]]]}),
            json!({"type": "GeometryCollection", "geometries": []}),
            Value::Null,
        ];

        for geometry in geometries {
            let with_map: Feature =
                serde_json::from_value(feature_with(geometry.clone(), json!({"name": "a"})))
                    .unwrap();
            assert_eq!(with_map.property("name"), Some(&json!("a")));

            let with_null: Feature =
                serde_json::from_value(feature_with(geometry.clone(), Value::Null)).unwrap();
            assert!(with_null.properties.is_none());

            for wrong in [json!([1, 2]), json!("props"), json!(3)] {
                assert!(
                    serde_json::from_value::<Feature>(feature_with(geometry.clone(), wrong))
                        .is_err()
                );
            }
        }
    }

    #[test]
    fn missing_members_are_not_absence() {
        let no_properties = json!({"type": "Feature", "geometry": null});
        assert!(serde_json::from_value::<Feature>(no_properties).is_err());

        let no_geometry = json!({"type": "Feature", "properties": null});
        assert!(serde_json::from_value::<Feature>(no_geometry).is_err());
    }

    #[test]
    fn absence_is_written_as_null() {
        let feature: Feature = Feature::without_geometry();
        assert_eq!(
            serde_json::to_value(&feature).unwrap(),
            json!({"type": "Feature", "geometry": null, "properties": null})
        );
    }

    #[test]
    fn id_is_string_or_number() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature", "geometry": null, "properties": null, "id": 42
        }))
        .unwrap();
        assert_eq!(feature.id, Some(FeatureId::from(42u64)));

        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature", "geometry": null, "properties": null, "id": "road-1"
        }))
        .unwrap();
        assert_eq!(feature.id.unwrap().to_string(), "road-1");
    }

    #[test]
    fn typed_feature_rejects_other_geometry() {
        let value = feature_with(
            json!({"type": "LineString", "coordinates": [[1, 2], [3, 4]]}),
            Value::Null,
        );
        assert!(serde_json::from_value::<Feature<Point>>(value.clone()).is_err());
        assert!(serde_json::from_value::<Feature<LineString>>(value).is_ok());
    }

    #[test]
    fn narrow_and_widen() {
        let feature: Feature =
            Feature::new(Point::new(Position::new(1.0, 2.0)).into()).with_id("p");
        let narrowed = feature.clone().try_narrow::<Point>().unwrap();
        assert_eq!(narrowed.id, Some(FeatureId::from("p")));
        assert_eq!(narrowed.widen(), feature);

        assert!(feature.try_narrow::<Polygon>().is_err());

        let empty: Feature = Feature::without_geometry();
        assert!(empty.try_narrow::<Polygon>().unwrap().geometry.is_none());
    }

    #[test]
    fn collection_from_iterator() {
        let collection: FeatureCollection = (0..3u64)
            .map(|i| Feature::new(Point::new(Position::new(i as f64, 0.0)).into()).with_id(i))
            .collect();
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 3);

        let parsed: FeatureCollection = serde_json::from_value(value).unwrap();
        assert!(parsed.features.iter().all(|f| f
            .geometry
            .as_ref()
            .is_some_and(|g| g.geometry_type() == GeometryType::Point)));
    }

    #[test]
    fn collection_writes_absent_members_as_null() {
        let Value::Object(properties) = json!({"name": "a"}) else {
            unreachable!()
        };
        let collection: FeatureCollection<Point> = FeatureCollection::new(vec![
            Feature::new(Point::new(Position::new(1.0, 2.0)))
                .with_id(7u64)
                .with_properties(properties),
            Feature::without_geometry(),
        ]);

        let serialized = serde_json::to_string(&collection).unwrap();
        insta::assert_snapshot!(serialized, @r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"id":7,"properties":{"name":"a"}},{"type":"Feature","geometry":null,"properties":null}]}"#);

        let parsed: FeatureCollection<Point> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, collection);
    }
}
