use serde::{Deserialize, Serialize};

use super::lat_lng::LatLng;
use crate::cartesian::{Bounds, Point};
use crate::num::wrap_num;

/// Coordinate reference system: converts geographical coordinates into pixel coordinates for a
/// given zoom level and back.
///
/// The projection math is provided by the map runtime. Only the coordinate wrapping, which
/// depends on nothing but the wrap ranges, has a default implementation.
pub trait Crs {
    /// Projects the point and scales it for the zoom level.
    fn lat_lng_to_point(&self, lat_lng: LatLng, zoom: f64) -> Point;
    /// Inverse of [`Crs::lat_lng_to_point`].
    fn point_to_lat_lng(&self, point: Point, zoom: f64) -> LatLng;
    /// Projects the point into the CRS units.
    fn project(&self, lat_lng: LatLng) -> Point;
    /// Inverse of [`Crs::project`].
    fn unproject(&self, point: Point) -> LatLng;
    /// Scale factor for the zoom level.
    fn scale(&self, zoom: f64) -> f64;
    /// Zoom level for the scale factor.
    fn zoom(&self, scale: f64) -> f64;
    /// Bounds of the whole world in pixels at the zoom level. `None` for infinite systems.
    fn projected_bounds(&self, zoom: f64) -> Option<Bounds>;
    /// Distance between two points in meters.
    fn distance(&self, a: LatLng, b: LatLng) -> f64;
    /// Identifier of the system, e.g. `EPSG:3857`.
    fn code(&self) -> Option<&str>;
    /// Range the longitude is wrapped into.
    fn wrap_lng(&self) -> Option<[f64; 2]>;
    /// Range the latitude is wrapped into.
    fn wrap_lat(&self) -> Option<[f64; 2]>;
    /// Whether the system spans infinitely in every direction.
    fn infinite(&self) -> bool;

    /// Wraps the point coordinates into [`Crs::wrap_lng`] and [`Crs::wrap_lat`] ranges.
    fn wrap_lat_lng(&self, lat_lng: LatLng) -> LatLng {
        LatLng {
            lat: match self.wrap_lat() {
                Some(range) => wrap_num(lat_lng.lat, range, true),
                None => lat_lng.lat,
            },
            lng: match self.wrap_lng() {
                Some(range) => wrap_num(lat_lng.lng, range, true),
                None => lat_lng.lng,
            },
            alt: lat_lng.alt,
        }
    }
}

/// Conversion between geographical coordinates and projected plane coordinates.
pub trait Projection {
    /// Projects a point onto the plane.
    fn project(&self, lat_lng: LatLng) -> Point;
    /// Inverse of [`Projection::project`].
    fn unproject(&self, point: Point) -> LatLng;
    /// Projected bounds of the world.
    fn bounds(&self) -> Bounds;
}

/// Coordinate reference systems known to the map runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// Elliptical Mercator.
    #[serde(rename = "EPSG:3395")]
    Epsg3395,
    /// Web (spherical) Mercator, the default for most tile services.
    #[serde(rename = "EPSG:3857")]
    Epsg3857,
    /// Equirectangular (plate carrée).
    #[serde(rename = "EPSG:4326")]
    Epsg4326,
    /// Base for systems on the Earth's surface, without projection.
    Earth,
    /// Flat cartesian plane, for maps that are not geographical.
    Simple,
}

impl CrsCode {
    /// Identifier of the system, `None` for the abstract ones.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            CrsCode::Epsg3395 => Some("EPSG:3395"),
            CrsCode::Epsg3857 => Some("EPSG:3857"),
            CrsCode::Epsg4326 => Some("EPSG:4326"),
            CrsCode::Earth | CrsCode::Simple => None,
        }
    }

    /// Projection the system uses.
    pub fn projection(&self) -> Option<ProjectionKind> {
        match self {
            CrsCode::Epsg3395 => Some(ProjectionKind::Mercator),
            CrsCode::Epsg3857 => Some(ProjectionKind::SphericalMercator),
            CrsCode::Epsg4326 | CrsCode::Simple => Some(ProjectionKind::LonLat),
            CrsCode::Earth => None,
        }
    }

    /// Longitude wrap range.
    pub fn wrap_lng(&self) -> Option<[f64; 2]> {
        match self {
            CrsCode::Simple => None,
            _ => Some([-180.0, 180.0]),
        }
    }

    /// Whether the system spans infinitely.
    pub fn infinite(&self) -> bool {
        matches!(self, CrsCode::Simple)
    }
}

/// Projections known to the map runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionKind {
    /// Longitude and latitude used as `x` and `y` directly.
    LonLat,
    /// Elliptical Mercator.
    Mercator,
    /// Spherical Mercator.
    SphericalMercator,
}

impl ProjectionKind {
    /// Projected bounds of the world.
    pub fn bounds(&self) -> Bounds {
        match self {
            ProjectionKind::LonLat => Bounds::new([-180.0, -90.0], [180.0, 90.0]),
            ProjectionKind::Mercator => Bounds::new(
                [-20_037_508.342_79, -15_496_570.739_72],
                [20_037_508.342_79, 18_764_656.231_38],
            ),
            ProjectionKind::SphericalMercator => {
                let d = 6_378_137.0 * std::f64::consts::PI;
                Bounds::new([-d, -d], [d, d])
            }
        }
    }
}
