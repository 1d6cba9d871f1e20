use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EventKind;

macro_rules! event_types {
    ($($(#[$doc:meta])* $variant:ident => $name:literal, $kind:ident;)*) => {
        /// Name of an event fired by the runtime.
        ///
        /// The name decides which payload the event carries, see [`EventType::payload_kind`].
        /// Events the runtime does not know about are [`EventType::Custom`].
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(into = "String", from = "String")]
        pub enum EventType {
            $($(#[$doc])* $variant,)*
            /// Event fired by application code.
            Custom(String),
        }

        impl EventType {
            /// The name of the event as the runtime spells it.
            pub fn as_str(&self) -> &str {
                match self {
                    $(EventType::$variant => $name,)*
                    EventType::Custom(name) => name,
                }
            }

            /// Kind of the payload the event carries. Custom events carry the base payload unless
            /// the code firing them says otherwise.
            pub fn payload_kind(&self) -> EventKind {
                match self {
                    $(EventType::$variant => EventKind::$kind,)*
                    EventType::Custom(_) => EventKind::Base,
                }
            }
        }

        impl FromStr for EventType {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $($name => EventType::$variant,)*
                    other => EventType::Custom(other.to_string()),
                })
            }
        }
    };
}

event_types! {
    /// Mouse click (or tap).
    Click => "click", Mouse;
    /// Double click.
    DblClick => "dblclick", Mouse;
    /// Mouse button pressed.
    MouseDown => "mousedown", Mouse;
    /// Mouse button released.
    MouseUp => "mouseup", Mouse;
    /// Mouse entered the object.
    MouseOver => "mouseover", Mouse;
    /// Mouse left the object.
    MouseOut => "mouseout", Mouse;
    /// Mouse moved over the object.
    MouseMove => "mousemove", Mouse;
    /// Right click.
    ContextMenu => "contextmenu", Mouse;
    /// Fired before a click, before the popup-closing logic runs.
    PreClick => "preclick", Mouse;
    /// Key pressed while the map has focus.
    KeyPress => "keypress", Keyboard;
    /// Key pressed down while the map has focus.
    KeyDown => "keydown", Keyboard;
    /// Key released while the map has focus.
    KeyUp => "keyup", Keyboard;
    /// Geolocation succeeded.
    LocationFound => "locationfound", Location;
    /// Geolocation failed.
    LocationError => "locationerror", Error;
    /// Layer added to the map or group.
    LayerAdd => "layeradd", Layer;
    /// Layer removed from the map or group.
    LayerRemove => "layerremove", Layer;
    /// Base layer switched with the layers control.
    BaseLayerChange => "baselayerchange", LayersControl;
    /// Overlay selected with the layers control.
    OverlayAdd => "overlayadd", LayersControl;
    /// Overlay deselected with the layers control.
    OverlayRemove => "overlayremove", LayersControl;
    /// Tile removed from the grid.
    TileUnload => "tileunload", Tile;
    /// Tile requested.
    TileLoadStart => "tileloadstart", Tile;
    /// Tile loaded.
    TileLoad => "tileload", Tile;
    /// Tile failed to load.
    TileError => "tileerror", TileError;
    /// Map container resized.
    Resize => "resize", Resize;
    /// Popup opened.
    PopupOpen => "popupopen", Popup;
    /// Popup closed.
    PopupClose => "popupclose", Popup;
    /// Tooltip opened.
    TooltipOpen => "tooltipopen", Tooltip;
    /// Tooltip closed.
    TooltipClose => "tooltipclose", Tooltip;
    /// Dragging ended.
    DragEnd => "dragend", DragEnd;
    /// Zoom animation started.
    ZoomAnim => "zoomanim", ZoomAnim;
    /// Layer added to a map.
    Add => "add", Base;
    /// Layer removed from a map.
    Remove => "remove", Base;
    /// Map initialized, or all visible tiles or the image loaded.
    Load => "load", Base;
    /// Map destroyed.
    Unload => "unload", Base;
    /// Map view needs to be redrawn completely.
    ViewReset => "viewreset", Base;
    /// Zoom change started.
    ZoomStart => "zoomstart", Base;
    /// Zoom level changes.
    Zoom => "zoom", Base;
    /// Zoom change ended.
    ZoomEnd => "zoomend", Base;
    /// Map or marker started moving.
    MoveStart => "movestart", Base;
    /// Map or marker moves.
    Move => "move", Base;
    /// Map or marker stopped moving.
    MoveEnd => "moveend", Base;
    /// The number of zoom levels changed.
    ZoomLevelsChange => "zoomlevelschange", Base;
    /// Popup started panning the map to fit.
    AutoPanStart => "autopanstart", Base;
    /// Grid layer started loading tiles.
    Loading => "loading", Base;
    /// Dragging started.
    DragStart => "dragstart", Base;
    /// Dragging in progress.
    Drag => "drag", Base;
    /// Image failed to load.
    Error => "error", Base;
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(v) => v,
            Err(never) => match never {},
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        EventType::from(value.as_str())
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for name in ["click", "tileerror", "zoomanim", "baselayerchange", "moveend"] {
            assert_eq!(EventType::from(name).as_str(), name);
        }
        assert_eq!(EventType::from("tileerror"), EventType::TileError);
        assert_eq!(
            EventType::from("my-event"),
            EventType::Custom("my-event".into())
        );
    }

    #[test]
    fn payload_kinds() {
        assert_eq!(EventType::Click.payload_kind(), EventKind::Mouse);
        assert_eq!(EventType::TileError.payload_kind(), EventKind::TileError);
        assert_eq!(EventType::LocationError.payload_kind(), EventKind::Error);
        assert_eq!(EventType::OverlayAdd.payload_kind(), EventKind::LayersControl);
        assert_eq!(EventType::ZoomEnd.payload_kind(), EventKind::Base);
        assert_eq!(EventType::Custom("x".into()).payload_kind(), EventKind::Base);
    }

    #[test]
    fn serializes_as_name() {
        assert_eq!(
            serde_json::to_string(&EventType::DblClick).unwrap(),
            "\"dblclick\""
        );
        let parsed: EventType = serde_json::from_str("\"popupopen\"").unwrap();
        assert_eq!(parsed, EventType::PopupOpen);
    }
}
