//! Value types of the carta map surface.
//!
//! * [`geojson`] is the GeoJSON interchange model. Every geometry type fixes the nesting depth of
//!   its coordinates, and features are generic over the geometry they carry.
//! * [`cartesian`] contains pixel-space values ([`Point`](cartesian::Point),
//!   [`Bounds`](cartesian::Bounds)) and the polyline and polygon helpers working on them.
//! * [`geo`] contains geographical values ([`LatLng`](geo::LatLng),
//!   [`LatLngBounds`](geo::LatLngBounds)) and the contracts of coordinate reference systems.
//!
//! Everything accepting "a point" takes `impl Into<..Expression>`, so the same call works with a
//! ready value, a `[x, y]` array or a tuple:
//!
//! ```
//! use carta_types::geo::{lat_lng_bounds, LatLng};
//!
//! let bounds = lat_lng_bounds(([50.0, 30.0], (51.0, 31.0)));
//! assert!(bounds.contains(LatLng::new(50.5, 30.5)));
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod cartesian;
pub mod error;
pub mod geo;
pub mod geojson;
pub mod geometry_type;
pub mod nested;
pub mod num;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use error::CartaTypesError;
pub use geometry_type::{GeoJsonType, GeometryType, UnknownType};
pub use nested::Nested;
