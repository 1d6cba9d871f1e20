//! Layers are the objects drawn on the map.
//!
//! Instead of a single inheritance chain, every layer kind is described as a set of independent
//! capabilities ([`Layer`], [`PopupBindable`], [`Styled`], [`PathGeometry`], ...). A concrete kind
//! such as [`Polyline`] is a trait with the capabilities it needs as supertraits, adding only the
//! operations that are specific to it.
//!
//! Layers are implemented by the runtime ([`Backend`]). This module defines their contracts,
//! their options and the parts of their behaviour that need no runtime (tile url templates, WMS
//! requests, GeoJSON conversions).

use std::sync::Arc;

use carta_types::geo::{LatLng, LatLngBounds, LatLngExpression};
use maybe_sync::{MaybeSend, MaybeSync};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::dom::ElementRef;
use crate::event::{Event, EventHandlerMap, EventType, Evented, Listeners, ObjectId};
use crate::options::{impl_options, impl_options_projection, Callback};

mod geojson;
mod grid;
mod group;
mod icon;
mod image_overlay;
mod marker;
mod overlay;
mod path;
mod renderer;
pub mod svg;

pub use geojson::{
    apply_style, as_feature, coords_to_lat_lng, coords_to_lat_lngs, features_to_layers,
    geometry_to_layer, lat_lng_to_coords, lat_lngs_to_coords, parse_geo_json, CoordsToLatLngFn,
    FeatureFilterFn, GeoJsonLayer, GeoJsonOptions, GeoJsonStyle, GeometryOrFeature,
    OnEachFeatureFn, PointToLayerFn, StyleFn,
};
pub use grid::{
    tile_key, tile_url, wms_tile_url, DoneCallback, GridLayer, GridLayerOptions, Subdomains,
    TileLayer, TileLayerOptions, TileSize, TileUrlContext, WmsOptions, WmsParams, WmsTileLayer,
    DEFAULT_MAX_ZOOM, DEFAULT_SUBDOMAINS, DEFAULT_TILE_SIZE,
};
pub use group::{FeatureGroup, LayerGroup};
pub use icon::{
    BaseIconOptions, DefaultIconOptions, DivIconOptions, False, Icon, IconHtml, IconOptions,
    MarkerIcon, DIV_ICON_CLASS,
};
pub use image_overlay::{ImageOverlay, ImageOverlayOptions};
pub use marker::{Marker, MarkerOptions};
pub use overlay::{
    Direction, DivOverlay, DivOverlayOptions, Popup, PopupOptions, Tooltip, TooltipOptions,
};
pub use path::{
    Circle, CircleMarker, CircleMarkerOptions, FillRule, LatLngOrList, LineCap, LineJoin, Path,
    PathOptions, Polygon, Polyline, PolylineOptions, Rectangle,
};
pub use renderer::{Renderer, RendererOptions};

/// Options shared by all layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LayerOptions {
    /// Map pane the layer is added to.
    pub pane: Option<String>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
}

impl_options!(LayerOptions { pane, attribution });

/// Options of layers reacting to the mouse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct InteractiveLayerOptions {
    /// Map pane the layer is added to.
    pub pane: Option<String>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Whether the layer fires mouse events. Otherwise the events go to the map.
    pub interactive: Option<bool>,
    /// Whether mouse events of the layer also reach the map.
    pub bubbling_mouse_events: Option<bool>,
}

impl_options!(InteractiveLayerOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events
});
impl_options_projection!(InteractiveLayerOptions => LayerOptions { pane, attribution });

/// Content of a popup or tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// HTML string.
    Html(String),
    /// Element inserted as is.
    Element(ElementRef),
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Html(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Html(value)
    }
}

impl From<ElementRef> for Content {
    fn from(value: ElementRef) -> Self {
        Content::Element(value)
    }
}

/// Function computing the content of a popup or tooltip from the layer it is bound to.
pub type ContentFn = dyn Fn(ObjectId) -> Content + Send + Sync;

/// Content given directly or computed when the overlay opens.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    /// Fixed content.
    Static(Content),
    /// Content computed from the source layer.
    Dynamic(Callback<ContentFn>),
}

impl ContentSource {
    /// Creates a source computing the content with the function.
    pub fn dynamic(f: impl Fn(ObjectId) -> Content + Send + Sync + 'static) -> Self {
        ContentSource::Dynamic(Callback(Arc::new(f)))
    }

    /// The content for the source layer.
    pub fn resolve(&self, source: ObjectId) -> Content {
        match self {
            ContentSource::Static(content) => content.clone(),
            ContentSource::Dynamic(f) => f(source),
        }
    }
}

impl From<Content> for ContentSource {
    fn from(value: Content) -> Self {
        ContentSource::Static(value)
    }
}

impl From<&str> for ContentSource {
    fn from(value: &str) -> Self {
        ContentSource::Static(value.into())
    }
}

impl From<String> for ContentSource {
    fn from(value: String) -> Self {
        ContentSource::Static(value.into())
    }
}

impl From<ElementRef> for ContentSource {
    fn from(value: ElementRef) -> Self {
        ContentSource::Static(value.into())
    }
}

/// What to bind to a layer as a popup or tooltip: content for a new overlay, or a ready overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding<T> {
    /// Content of a new overlay.
    Content(ContentSource),
    /// Existing overlay.
    Overlay(T),
}

impl<T> From<ContentSource> for Binding<T> {
    fn from(value: ContentSource) -> Self {
        Binding::Content(value)
    }
}

impl<T> From<Content> for Binding<T> {
    fn from(value: Content) -> Self {
        Binding::Content(value.into())
    }
}

impl<T> From<&str> for Binding<T> {
    fn from(value: &str) -> Self {
        Binding::Content(value.into())
    }
}

impl<T> From<String> for Binding<T> {
    fn from(value: String) -> Self {
        Binding::Content(value.into())
    }
}

/// Where a layer is added to.
pub enum LayerTarget<'a, B: Backend> {
    /// Directly to the map.
    Map(&'a mut B::Map),
    /// To a layer group.
    Group(&'a mut B::LayerGroup),
}

/// Object that can be added to a map.
pub trait Layer<B: Backend>: Evented + MaybeSend + MaybeSync {
    /// Adds the layer to the map or group.
    fn add_to(&mut self, target: LayerTarget<'_, B>) -> &mut Self;
    /// Removes the layer from the map it is on.
    fn remove(&mut self) -> &mut Self;
    /// Removes the layer from the given map.
    fn remove_from(&mut self, map: &mut B::Map) -> &mut Self;
    /// The pane with the name, or the pane of the layer.
    fn pane(&self, name: Option<&str>) -> Option<ElementRef>;
    /// Creates the elements of the layer. Called by the map when the layer is added.
    fn on_add(&mut self, map: &mut B::Map) -> &mut Self;
    /// Removes the elements of the layer. Called by the map when the layer is removed.
    fn on_remove(&mut self, map: &mut B::Map) -> &mut Self;
    /// Map events the layer listens to while it is on the map.
    fn events(&self) -> Option<EventHandlerMap> {
        None
    }
    /// Attribution of the layer.
    fn attribution(&self) -> Option<String> {
        None
    }
    /// Called before [`Layer::on_add`], before the map fires `layeradd`.
    fn before_add(&mut self, _map: &mut B::Map) -> &mut Self {
        self
    }
}

/// Layer that can have a popup.
pub trait PopupBindable<B: Backend> {
    /// Binds a popup. It opens on click.
    fn bind_popup(
        &mut self,
        content: impl Into<Binding<B::Popup>>,
        options: Option<overlay::PopupOptions>,
    ) -> &mut Self;
    /// Removes the bound popup.
    fn unbind_popup(&mut self) -> &mut Self;
    /// Opens the bound popup at the point, or at the layer position.
    fn open_popup(&mut self, lat_lng: Option<LatLngExpression>) -> &mut Self;
    /// Closes the bound popup.
    fn close_popup(&mut self) -> &mut Self;
    /// Opens the bound popup if it is closed, closes it otherwise.
    fn toggle_popup(&mut self) -> &mut Self;
    /// Whether the bound popup is open.
    fn is_popup_open(&self) -> bool;
    /// Replaces the content of the bound popup.
    fn set_popup_content(&mut self, content: impl Into<Binding<B::Popup>>) -> &mut Self;
    /// The bound popup.
    fn popup(&self) -> Option<&B::Popup>;
}

/// Layer that can have a tooltip.
pub trait TooltipBindable<B: Backend> {
    /// Binds a tooltip. It opens on hover.
    fn bind_tooltip(
        &mut self,
        content: impl Into<Binding<B::Tooltip>>,
        options: Option<overlay::TooltipOptions>,
    ) -> &mut Self;
    /// Removes the bound tooltip.
    fn unbind_tooltip(&mut self) -> &mut Self;
    /// Opens the bound tooltip at the point, or at the layer position.
    fn open_tooltip(&mut self, lat_lng: Option<LatLngExpression>) -> &mut Self;
    /// Closes the bound tooltip.
    fn close_tooltip(&mut self) -> &mut Self;
    /// Opens the bound tooltip if it is closed, closes it otherwise.
    fn toggle_tooltip(&mut self) -> &mut Self;
    /// Whether the bound tooltip is open.
    fn is_tooltip_open(&self) -> bool;
    /// Replaces the content of the bound tooltip.
    fn set_tooltip_content(&mut self, content: impl Into<Binding<B::Tooltip>>) -> &mut Self;
    /// The bound tooltip.
    fn tooltip(&self) -> Option<&B::Tooltip>;
}

/// Layer drawn in an order relative to its siblings.
pub trait Stackable {
    /// Draws the layer above its siblings.
    fn bring_to_front(&mut self) -> &mut Self;
    /// Draws the layer below its siblings.
    fn bring_to_back(&mut self) -> &mut Self;
}

/// Layer with adjustable opacity.
pub trait Translucent {
    /// Sets the opacity, `0.0` to `1.0`.
    fn set_opacity(&mut self, opacity: f64) -> &mut Self;
}

/// Layer with an explicit z-index.
pub trait ZIndexed {
    /// Sets the z-index.
    fn set_z_index(&mut self, z_index: i32) -> &mut Self;
}

/// Layer drawn with a path style.
pub trait Styled {
    /// Changes the style. Only the fields set in `style` change.
    fn set_style(&mut self, style: PathOptions) -> &mut Self;
}

/// Layer placed at a single point.
pub trait PointLocated {
    /// Position of the layer.
    fn lat_lng(&self) -> LatLng;
    /// Moves the layer.
    fn set_lat_lng(&mut self, lat_lng: impl Into<LatLngExpression>) -> &mut Self;
}

/// Layer made of lines or rings of points.
pub trait PathGeometry {
    /// The points, nested as they were given.
    fn lat_lngs(&self) -> carta_types::Nested<LatLng>;
    /// Replaces the points.
    fn set_lat_lngs(&mut self, lat_lngs: carta_types::Nested<LatLng>) -> &mut Self;
    /// Whether the layer has no points.
    fn is_empty(&self) -> bool;
    /// Centroid of the layer, `None` if it has no points.
    fn center(&self) -> Option<LatLng>;
    /// Adds points to the end of the (first) line.
    fn add_lat_lng(&mut self, lat_lng: impl Into<LatLngOrList>) -> &mut Self;
}

/// Layer covering an area.
pub trait Bounded {
    /// Area covered by the layer.
    fn bounds(&self) -> LatLngBounds;
}

/// Layer that can be exported as GeoJSON.
pub trait GeoJsonExport {
    /// GeoJSON object the layer exports to.
    type Output: Serialize;

    /// Exports the layer.
    fn to_geo_json(&self) -> Self::Output;
}

/// Layer represented by a single element.
pub trait ElementBacked {
    /// The element, `None` while the layer is not on a map.
    fn element(&self) -> Option<ElementRef>;
}

impl<T: Evented> Evented for Arc<RwLock<T>> {
    fn id(&self) -> ObjectId {
        self.read().id()
    }

    fn on(&mut self, listeners: impl Into<Listeners>) -> &mut Self {
        self.write().on(listeners);
        self
    }

    fn off(&mut self, listeners: impl Into<Listeners>) -> &mut Self {
        self.write().off(listeners);
        self
    }

    fn off_type(&mut self, event_type: &EventType) -> &mut Self {
        self.write().off_type(event_type);
        self
    }

    fn off_all(&mut self) -> &mut Self {
        self.write().off_all();
        self
    }

    fn once(&mut self, listeners: impl Into<Listeners>) -> &mut Self {
        self.write().once(listeners);
        self
    }

    fn fire(&mut self, event: Event, propagate: bool) -> &mut Self {
        self.write().fire(event, propagate);
        self
    }

    fn listens(&self, event_type: &EventType) -> bool {
        self.read().listens(event_type)
    }

    fn add_event_parent(&mut self, parent: ObjectId) -> &mut Self {
        self.write().add_event_parent(parent);
        self
    }

    fn remove_event_parent(&mut self, parent: ObjectId) -> &mut Self {
        self.write().remove_event_parent(parent);
        self
    }
}

impl<B: Backend, T: Layer<B> + 'static> Layer<B> for Arc<RwLock<T>> {
    fn add_to(&mut self, target: LayerTarget<'_, B>) -> &mut Self {
        self.write().add_to(target);
        self
    }

    fn remove(&mut self) -> &mut Self {
        self.write().remove();
        self
    }

    fn remove_from(&mut self, map: &mut B::Map) -> &mut Self {
        self.write().remove_from(map);
        self
    }

    fn pane(&self, name: Option<&str>) -> Option<ElementRef> {
        self.read().pane(name)
    }

    fn on_add(&mut self, map: &mut B::Map) -> &mut Self {
        self.write().on_add(map);
        self
    }

    fn on_remove(&mut self, map: &mut B::Map) -> &mut Self {
        self.write().on_remove(map);
        self
    }

    fn events(&self) -> Option<EventHandlerMap> {
        self.read().events()
    }

    fn attribution(&self) -> Option<String> {
        self.read().attribution()
    }

    fn before_add(&mut self, map: &mut B::Map) -> &mut Self {
        self.write().before_add(map);
        self
    }
}
