use ahash::AHashMap;

use crate::dom::ElementRef;

/// Pane holding all the other panes.
pub const MAP_PANE: &str = "mapPane";
/// Pane of tile layers.
pub const TILE_PANE: &str = "tilePane";
/// Pane of vector layers and image overlays.
pub const OVERLAY_PANE: &str = "overlayPane";
/// Pane of marker shadows.
pub const SHADOW_PANE: &str = "shadowPane";
/// Pane of marker icons.
pub const MARKER_PANE: &str = "markerPane";
/// Pane of tooltips.
pub const TOOLTIP_PANE: &str = "tooltipPane";
/// Pane of popups.
pub const POPUP_PANE: &str = "popupPane";

/// Names of the panes every map has, bottom to top.
pub const DEFAULT_PANES: [&str; 7] = [
    MAP_PANE,
    TILE_PANE,
    OVERLAY_PANE,
    SHADOW_PANE,
    MARKER_PANE,
    TOOLTIP_PANE,
    POPUP_PANE,
];

/// Z-index of a default pane, `None` for the map pane and unknown names.
pub fn default_pane_z_index(name: &str) -> Option<i32> {
    match name {
        TILE_PANE => Some(200),
        OVERLAY_PANE => Some(400),
        SHADOW_PANE => Some(500),
        MARKER_PANE => Some(600),
        TOOLTIP_PANE => Some(650),
        POPUP_PANE => Some(700),
        _ => None,
    }
}

/// Elements of the panes every map has.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultMapPanes {
    /// Pane holding all the other panes.
    pub map_pane: ElementRef,
    /// Tile layers.
    pub tile_pane: ElementRef,
    /// Vector layers and image overlays.
    pub overlay_pane: ElementRef,
    /// Marker shadows.
    pub shadow_pane: ElementRef,
    /// Marker icons.
    pub marker_pane: ElementRef,
    /// Tooltips.
    pub tooltip_pane: ElementRef,
    /// Popups.
    pub popup_pane: ElementRef,
}

impl DefaultMapPanes {
    /// The pane with the name.
    pub fn get(&self, name: &str) -> Option<ElementRef> {
        match name {
            MAP_PANE => Some(self.map_pane),
            TILE_PANE => Some(self.tile_pane),
            OVERLAY_PANE => Some(self.overlay_pane),
            SHADOW_PANE => Some(self.shadow_pane),
            MARKER_PANE => Some(self.marker_pane),
            TOOLTIP_PANE => Some(self.tooltip_pane),
            POPUP_PANE => Some(self.popup_pane),
            _ => None,
        }
    }
}

/// All panes of a map: the default ones and the ones created with
/// [`Map::create_pane`](super::Map::create_pane).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPanes {
    defaults: DefaultMapPanes,
    custom: AHashMap<String, ElementRef>,
}

impl MapPanes {
    /// Creates the set with only the default panes.
    pub fn new(defaults: DefaultMapPanes) -> Self {
        Self {
            defaults,
            custom: AHashMap::new(),
        }
    }

    /// The default panes.
    pub fn defaults(&self) -> &DefaultMapPanes {
        &self.defaults
    }

    /// Registers a custom pane. A custom pane cannot shadow a default one, so `false` is
    /// returned and nothing changes if the name is taken by a default pane.
    pub fn insert(&mut self, name: impl Into<String>, pane: ElementRef) -> bool {
        let name = name.into();
        if self.defaults.get(&name).is_some() {
            log::warn!("Pane {name} already exists");
            return false;
        }

        self.custom.insert(name, pane);
        true
    }

    /// The pane with the name.
    pub fn get(&self, name: &str) -> Option<ElementRef> {
        self.defaults
            .get(name)
            .or_else(|| self.custom.get(name).copied())
    }

    /// Names of the custom panes in no particular order.
    pub fn custom_names(&self) -> impl Iterator<Item = &str> {
        self.custom.keys().map(String::as_str)
    }
}

/// Pane given by its name or element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneRef {
    /// Name of the pane.
    Name(String),
    /// The pane element.
    Element(ElementRef),
}

impl From<&str> for PaneRef {
    fn from(value: &str) -> Self {
        PaneRef::Name(value.to_string())
    }
}

impl From<ElementRef> for PaneRef {
    fn from(value: ElementRef) -> Self {
        PaneRef::Element(value)
    }
}
