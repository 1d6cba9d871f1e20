//! Geographical coordinates (latitude and longitude) and the contracts of coordinate reference
//! systems.

mod crs;
mod datum;
mod lat_lng;
mod lat_lng_bounds;
mod traits;

pub use crs::{Crs, CrsCode, Projection, ProjectionKind};
pub use datum::Datum;
pub use lat_lng::{lat_lng, LatLng, LatLngExpression, DEFAULT_MAX_MARGIN};
pub use lat_lng_bounds::{
    lat_lng_bounds, LatLngBounds, LatLngBoundsExpression, LatLngBoundsInput, LatLngBoundsLiteral,
    LatLngOrBounds,
};
pub use traits::{GeoPoint, NewGeoPoint};
