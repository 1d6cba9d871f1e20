//! Conversions into the `geo-types` geometries.

use geo_types::{Coord, CoordFloat, LineString};

use crate::cartesian::Point;
use crate::geo::{GeoPoint, LatLng, NewGeoPoint};
use crate::geojson::{Geometry, Position};

impl<T: CoordFloat> GeoPoint for geo_types::Point<T> {
    type Num = T;

    fn lat(&self) -> T {
        self.y()
    }

    fn lon(&self) -> T {
        self.x()
    }
}

impl<T: CoordFloat> NewGeoPoint<T> for geo_types::Point<T> {
    fn latlon(lat: T, lon: T) -> Self {
        geo_types::Point::new(lon, lat)
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(value: LatLng) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

impl From<geo_types::Point<f64>> for LatLng {
    fn from(value: geo_types::Point<f64>) -> Self {
        LatLng::new(value.y(), value.x())
    }
}

impl From<Point> for Coord<f64> {
    fn from(value: Point) -> Self {
        Coord {
            x: value.x,
            y: value.y,
        }
    }
}

impl From<Coord<f64>> for Point {
    fn from(value: Coord<f64>) -> Self {
        Point::new(value.x, value.y)
    }
}

impl From<Position> for Coord<f64> {
    fn from(value: Position) -> Self {
        Coord {
            x: value.x,
            y: value.y,
        }
    }
}

fn line(positions: &[Position]) -> LineString<f64> {
    LineString(positions.iter().map(|&p| p.into()).collect())
}

fn polygon(rings: &[Vec<Position>]) -> geo_types::Polygon<f64> {
    let mut rings = rings.iter().map(|r| line(r));
    let exterior = rings.next().unwrap_or_else(|| LineString(vec![]));
    geo_types::Polygon::new(exterior, rings.collect())
}

impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(value: &Geometry) -> Self {
        match value {
            Geometry::Point(g) => geo_types::Point::from(Coord::from(g.coordinates)).into(),
            Geometry::MultiPoint(g) => geo_types::MultiPoint(
                g.coordinates
                    .iter()
                    .map(|&p| geo_types::Point::from(Coord::from(p)))
                    .collect(),
            )
            .into(),
            Geometry::LineString(g) => line(&g.coordinates).into(),
            Geometry::MultiLineString(g) => {
                geo_types::MultiLineString(g.coordinates.iter().map(|l| line(l)).collect())
                    .into()
            }
            Geometry::Polygon(g) => polygon(&g.coordinates).into(),
            Geometry::MultiPolygon(g) => {
                geo_types::MultiPolygon(g.coordinates.iter().map(|p| polygon(p)).collect())
                    .into()
            }
            Geometry::GeometryCollection(g) => geo_types::Geometry::GeometryCollection(
                geo_types::GeometryCollection(g.geometries.iter().map(Into::into).collect()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::{GeometryCollection, Polygon};

    #[test]
    fn lat_lng_is_lon_lat_point() {
        let p: geo_types::Point<f64> = LatLng::new(50.0, 30.0).into();
        assert_eq!((p.x(), p.y()), (30.0, 50.0));
        assert_eq!(LatLng::from(p), LatLng::new(50.0, 30.0));
        assert_eq!(p.lat(), 50.0);
    }

    #[test]
    fn polygon_keeps_holes() {
        let ring = |d: f64| {
            vec![
                Position::new(0.0, 0.0),
                Position::new(d, 0.0),
                Position::new(d, d),
                Position::new(0.0, 0.0),
            ]
        };
        let geometry: Geometry =
            GeometryCollection::new(vec![Polygon::new(vec![ring(10.0), ring(1.0)]).into()]).into();

        let converted = geo_types::Geometry::from(&geometry);
        let geo_types::Geometry::GeometryCollection(collection) = converted else {
            panic!("expected a collection");
        };
        let geo_types::Geometry::Polygon(polygon) = &collection.0[0] else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.exterior().0.len(), 4);
        assert_eq!(polygon.interiors().len(), 1);
    }
}
