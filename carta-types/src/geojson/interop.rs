//! Conversions between this crate's GeoJSON model and the `geojson` crate.

use geojson::feature::Id;
use geojson::Value;

use super::{
    BBox, Feature, FeatureId, Geometry, GeometryCollection, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, Position,
};
use crate::error::CartaTypesError;

fn position(value: &[f64]) -> Result<Position, CartaTypesError> {
    Position::try_from(value).map_err(|err| {
        log::debug!("Rejected foreign position {value:?}: {err}");
        err
    })
}

fn positions(values: &[Vec<f64>]) -> Result<Vec<Position>, CartaTypesError> {
    values.iter().map(|p| position(p)).collect()
}

fn rings(values: &[Vec<Vec<f64>>]) -> Result<Vec<Vec<Position>>, CartaTypesError> {
    values.iter().map(|r| positions(r)).collect()
}

fn bbox(value: Option<Vec<f64>>) -> Result<Option<BBox>, CartaTypesError> {
    value.map(BBox::try_from).transpose()
}

impl TryFrom<geojson::Geometry> for Geometry {
    type Error = CartaTypesError;

    fn try_from(value: geojson::Geometry) -> Result<Self, Self::Error> {
        let mut geometry: Geometry = match value.value {
            Value::Point(p) => Point::new(position(&p)?).into(),
            Value::MultiPoint(points) => MultiPoint::new(positions(&points)?).into(),
            Value::LineString(line) => LineString::new(positions(&line)?).into(),
            Value::MultiLineString(lines) => MultiLineString::new(rings(&lines)?).into(),
            Value::Polygon(polygon) => Polygon::new(rings(&polygon)?).into(),
            Value::MultiPolygon(polygons) => MultiPolygon::new(
                polygons
                    .iter()
                    .map(|p| rings(p))
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .into(),
            Value::GeometryCollection(geometries) => GeometryCollection::new(
                geometries
                    .into_iter()
                    .map(Geometry::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .into(),
        };

        let bbox = bbox(value.bbox)?;
        match &mut geometry {
            Geometry::Point(g) => g.bbox = bbox,
            Geometry::MultiPoint(g) => g.bbox = bbox,
            Geometry::LineString(g) => g.bbox = bbox,
            Geometry::MultiLineString(g) => g.bbox = bbox,
            Geometry::Polygon(g) => g.bbox = bbox,
            Geometry::MultiPolygon(g) => g.bbox = bbox,
            Geometry::GeometryCollection(g) => g.bbox = bbox,
        }

        Ok(geometry)
    }
}

impl From<Geometry> for geojson::Geometry {
    fn from(value: Geometry) -> Self {
        fn line(positions: Vec<Position>) -> Vec<Vec<f64>> {
            positions.iter().map(Position::to_vec).collect()
        }

        fn lines(rings: Vec<Vec<Position>>) -> Vec<Vec<Vec<f64>>> {
            rings.into_iter().map(line).collect()
        }

        let bbox = crate::geojson::GeometryObject::bbox(&value).map(|b| Vec::from(*b));
        let value = match value {
            Geometry::Point(g) => Value::Point(g.coordinates.to_vec()),
            Geometry::MultiPoint(g) => Value::MultiPoint(line(g.coordinates)),
            Geometry::LineString(g) => Value::LineString(line(g.coordinates)),
            Geometry::MultiLineString(g) => Value::MultiLineString(lines(g.coordinates)),
            Geometry::Polygon(g) => Value::Polygon(lines(g.coordinates)),
            Geometry::MultiPolygon(g) => {
                Value::MultiPolygon(g.coordinates.into_iter().map(lines).collect())
            }
            Geometry::GeometryCollection(g) => Value::GeometryCollection(
                g.geometries.into_iter().map(geojson::Geometry::from).collect(),
            ),
        };

        geojson::Geometry {
            bbox,
            value,
            foreign_members: None,
        }
    }
}

impl TryFrom<geojson::Feature> for Feature {
    type Error = CartaTypesError;

    fn try_from(value: geojson::Feature) -> Result<Self, Self::Error> {
        let mut feature = match value.geometry {
            Some(geometry) => Feature::new(Geometry::try_from(geometry)?),
            None => Feature::without_geometry(),
        };

        feature.id = value.id.map(|id| match id {
            Id::String(s) => FeatureId::String(s),
            Id::Number(n) => FeatureId::Number(n),
        });
        feature.properties = value.properties;
        feature.bbox = bbox(value.bbox)?;

        Ok(feature)
    }
}

impl From<Feature> for geojson::Feature {
    fn from(value: Feature) -> Self {
        geojson::Feature {
            bbox: value.bbox.map(Vec::from),
            geometry: value.geometry.map(geojson::Geometry::from),
            id: value.id.map(|id| match id {
                FeatureId::String(s) => Id::String(s),
                FeatureId::Number(n) => Id::Number(n),
            }),
            properties: value.properties,
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::GeometryObject;
    use crate::geometry_type::GeometryType;

    #[test]
    fn geometry_round_trip() {
        let polygon: Geometry = Polygon::new(vec![vec![
            Position::new(0.0, 0.0),
            Position::new(1.0, 0.0),
            Position::new(1.0, 1.0),
            Position::new(0.0, 0.0),
        ]])
        .into();

        let converted = geojson::Geometry::from(polygon.clone());
        assert!(matches!(converted.value, Value::Polygon(_)));
        assert_eq!(Geometry::try_from(converted).unwrap(), polygon);
    }

    #[test]
    fn position_arity_is_checked() {
        let geometry = geojson::Geometry::new(Value::Point(vec![1.0]));
        assert!(Geometry::try_from(geometry).is_err());
    }

    #[test]
    fn feature_keeps_id_and_properties() {
        let mut properties = serde_json::Map::new();
        properties.insert("name".into(), "a".into());
        let feature = geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(Value::LineString(vec![
                vec![0.0, 0.0],
                vec![1.0, 1.0],
            ]))),
            id: Some(Id::Number(7.into())),
            properties: Some(properties),
            foreign_members: None,
        };

        let converted = Feature::try_from(feature).unwrap();
        assert_eq!(converted.id, Some(FeatureId::from(7u64)));
        assert_eq!(
            converted.geometry.as_ref().map(|g| g.geometry_type()),
            Some(GeometryType::LineString)
        );
        assert_eq!(converted.property("name"), Some(&"a".into()));
    }
}
