//! Error type used by the crate.

use carta_types::error::CartaTypesError;
use thiserror::Error;

/// Carta error type.
#[derive(Debug, Error)]
pub enum CartaError {
    /// Invalid coordinates or GeoJSON payload.
    #[error(transparent)]
    Types(#[from] CartaTypesError),
    /// Options contradict each other or have values out of the allowed range.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A template refers to a key that has no value.
    #[error("{0}")]
    Template(String),
    /// Options or data could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Item not found.
    #[error("item not found")]
    NotFound,
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}
