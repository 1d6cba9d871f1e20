//! Error type used by the crate.

use thiserror::Error;

use crate::geometry_type::{GeoJsonType, GeometryType};

/// Error enum.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CartaTypesError {
    /// Coordinate conversion error.
    #[error("invalid input coordinates: {0}")]
    Conversion(String),
    /// Coordinate array is nested deeper or shallower than the geometry type allows.
    #[error("{geometry_type} expects coordinates nested {expected} levels deep, got {actual}")]
    InvalidNesting {
        /// Geometry type the coordinates were given for.
        geometry_type: GeometryType,
        /// Depth the geometry type requires.
        expected: usize,
        /// Depth of the given coordinates.
        actual: usize,
    },
    /// GeoJSON object has a different type than the one requested.
    #[error("expected {expected} object, got {actual}")]
    UnexpectedType {
        /// Requested type.
        expected: GeoJsonType,
        /// Actual type of the object.
        actual: GeoJsonType,
    },
    /// The operation requires at least one coordinate.
    #[error("at least one coordinate is required")]
    EmptyInput,
}
