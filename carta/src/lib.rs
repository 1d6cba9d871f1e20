//! Carta is a typed surface of a slippy-map runtime: the option bags, events, layers, controls
//! and the map of an interactive web map, described as Rust types and traits.
//!
//! # Quick start
//!
//! Options are closed structs. They can be built in code or read from JSON, and unknown fields
//! are rejected either way:
//!
//! ```
//! use carta::layer::{tile_url, TileLayerOptions, TileUrlContext};
//! use carta::options::Options;
//! use carta::carta_types::cartesian::Coords;
//! use std::collections::HashMap;
//!
//! let options = TileLayerOptions::from_json(r#"{"subdomains": "abc", "maxZoom": 19}"#).unwrap();
//! let url = tile_url(
//!     "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
//!     Coords::new(1.0, 2.0, 3.0),
//!     &options,
//!     &TileUrlContext::default(),
//!     &HashMap::<String, String>::new(),
//! )
//! .unwrap();
//! assert_eq!(url, "https://a.tile.openstreetmap.org/3/1/2.png");
//!
//! assert!(TileLayerOptions::from_json(r#"{"maxZom": 19}"#).is_err());
//! ```
//!
//! # Main components
//!
//! * [`Backend`] is the runtime: it creates maps, layers and controls, and names their concrete
//!   types.
//! * [`layer`] describes every kind of layer as a set of capabilities ([`layer::Layer`],
//!   [`layer::Styled`], [`layer::PopupBindable`]...). Tile url templates, WMS requests and the
//!   conversion of GeoJSON into layers are implemented here, on top of the runtime.
//! * [`control`] does the same for controls, and keeps the state the controls display
//!   (attributions, listed layers, scale bars).
//! * [`map::Map`] holds layers and controls. Coordinate conversions are provided on top of the
//!   coordinate reference system of the map.
//! * [`event`] contains the events fired by all runtime objects and the [`event::Evented`]
//!   capability to listen to them.
//!
//! Geometric value types and the GeoJSON model live in the [`carta_types`] crate, re-exported
//! here.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod backend;
pub mod control;
pub mod dom;
pub mod error;
pub mod event;
pub mod layer;
pub mod map;
pub mod options;
pub mod util;

pub use backend::Backend;
pub use carta_types;
pub use error::CartaError;

#[cfg(test)]
mod tests;
