use carta_types::cartesian::{Coords, Point};
use carta_types::geo::{LatLng, LatLngBounds};
use carta_types::GeometryType;
use serde_json::Value;

use super::{EventType, ObjectId};
use crate::dom::{ElementRef, NativeEventRef};

/// Event without payload.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
}

/// Mouse interaction with the map or a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// Geographical point of the pointer.
    pub latlng: LatLng,
    /// Pixel position of the pointer relative to the map layer.
    pub layer_point: Point,
    /// Pixel position of the pointer relative to the map container.
    pub container_point: Point,
    /// Native event.
    pub original_event: NativeEventRef,
}

/// Key press while the map is focused.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// Native event.
    pub original_event: NativeEventRef,
}

/// Result of a successful geolocation.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// Detected position.
    pub latlng: LatLng,
    /// Area the user is in, based on the accuracy.
    pub bounds: LatLngBounds,
    /// Accuracy in meters.
    pub accuracy: f64,
    /// Height above the WGS84 ellipsoid in meters.
    pub altitude: f64,
    /// Accuracy of the altitude in meters.
    pub altitude_accuracy: f64,
    /// Direction of travel in degrees clockwise from north.
    pub heading: f64,
    /// Speed in meters per second.
    pub speed: f64,
    /// Time of the detection.
    pub timestamp: f64,
}

/// Failure reported by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// Error message.
    pub message: String,
    /// Error code, if any.
    pub code: i32,
}

/// Layer added to or removed from a map or group.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// The layer.
    pub layer: ObjectId,
}

/// Layer switched with the layers control.
#[derive(Debug, Clone, PartialEq)]
pub struct LayersControlEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// The layer.
    pub layer: ObjectId,
    /// Name of the layer in the control.
    pub name: String,
}

/// Tile lifecycle event of a grid layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// Tile element.
    pub tile: ElementRef,
    /// Position of the tile in the grid.
    pub coords: Coords,
}

/// A tile failed to load.
#[derive(Debug, Clone, PartialEq)]
pub struct TileErrorEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// Tile element.
    pub tile: ElementRef,
    /// Position of the tile in the grid.
    pub coords: Coords,
    /// Description of the failure.
    pub error: String,
}

impl TileErrorEvent {
    /// The tile part of the event.
    pub fn as_tile_event(&self) -> TileEvent {
        TileEvent {
            event_type: self.event_type.clone(),
            target: self.target,
            tile: self.tile,
            coords: self.coords,
        }
    }
}

/// Map container changed size.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// Size before the change.
    pub old_size: Point,
    /// Size after the change.
    pub new_size: Point,
}

/// Event related to a layer created from a GeoJSON feature.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// The layer.
    pub layer: ObjectId,
    /// Properties of the feature.
    pub properties: Value,
    /// Type of the feature geometry.
    pub geometry_type: GeometryType,
    /// Id of the feature.
    pub id: String,
}

/// Popup opened or closed.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// The popup.
    pub popup: ObjectId,
}

/// Tooltip opened or closed.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// The tooltip.
    pub tooltip: ObjectId,
}

/// Dragging ended.
#[derive(Debug, Clone, PartialEq)]
pub struct DragEndEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// Distance in pixels the object was dragged.
    pub distance: f64,
}

/// Zoom animation started.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomAnimEvent {
    /// Event name.
    pub event_type: EventType,
    /// Object that fired the event.
    pub target: ObjectId,
    /// Center of the map at the end of the animation.
    pub center: LatLng,
    /// Zoom level at the end of the animation.
    pub zoom: f64,
    /// Whether the layers should skip updating during the animation.
    pub no_update: bool,
}
