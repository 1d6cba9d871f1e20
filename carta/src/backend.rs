//! The runtime contract.
//!
//! A [`Backend`] is the map runtime the crate describes. It names the concrete type of every
//! runtime object through associated types, which ties the capability traits together (a
//! marker's popup is a `B::Popup`, a layer is added to a `B::Map`, ...), and creates the objects
//! with its factory methods.

use carta_types::geo::{Crs, CrsCode, LatLng, LatLngBoundsExpression, LatLngExpression};
use carta_types::geojson::GeoJson;
use carta_types::Nested;
use maybe_sync::{MaybeSend, MaybeSync};

use crate::control::{
    AttributionControl, AttributionControlOptions, LayersControl, LayersControlOptions,
    LayersObject, ScaleControl, ScaleControlOptions, ZoomControl, ZoomControlOptions,
};
use crate::dom::{BrowserFeatures, DomEvent, DomUtil, Draggable, ElementRef};
use crate::error::CartaError;
use crate::event::ObjectId;
use crate::layer::{
    Circle, CircleMarker, CircleMarkerOptions, DefaultIconOptions, DivIconOptions, FeatureGroup,
    GeoJsonLayer, GeoJsonOptions, GridLayer, GridLayerOptions, Icon, IconOptions, ImageOverlay,
    ImageOverlayOptions, Layer, LayerGroup, LayerOptions, Marker, MarkerOptions, Polygon,
    Polyline, PolylineOptions, Popup, PopupOptions, Rectangle, Renderer, RendererOptions,
    TileLayer, TileLayerOptions, Tooltip, TooltipOptions, WmsOptions, WmsTileLayer,
};
use crate::map::{Handler, Map, MapContainer, MapOptions};
use crate::util::Scheduler;

/// The map runtime.
pub trait Backend: Sized + MaybeSend + MaybeSync + 'static {
    /// Any layer. Every concrete layer converts into it, so it can be stored in groups and
    /// passed to the map.
    type AnyLayer: Layer<Self>
        + Clone
        + From<Self::Marker>
        + From<Self::Polyline>
        + From<Self::Polygon>
        + From<Self::Rectangle>
        + From<Self::CircleMarker>
        + From<Self::Circle>
        + From<Self::LayerGroup>
        + From<Self::FeatureGroup>
        + From<Self::GeoJson>
        + From<Self::GridLayer>
        + From<Self::TileLayer>
        + From<Self::WmsTileLayer>
        + From<Self::ImageOverlay>
        + From<Self::Popup>
        + From<Self::Tooltip>
        + From<Self::Renderer>;

    /// Map.
    type Map: Map<Self>;
    /// Marker.
    type Marker: Marker<Self>;
    /// Polyline.
    type Polyline: Polyline<Self>;
    /// Polygon.
    type Polygon: Polygon<Self>;
    /// Rectangle.
    type Rectangle: Rectangle<Self>;
    /// Circle marker.
    type CircleMarker: CircleMarker<Self>;
    /// Circle.
    type Circle: Circle<Self>;
    /// Layer group.
    type LayerGroup: LayerGroup<Self>;
    /// Feature group.
    type FeatureGroup: FeatureGroup<Self>;
    /// GeoJSON layer.
    type GeoJson: GeoJsonLayer<Self>;
    /// Grid layer.
    type GridLayer: GridLayer<Self>;
    /// Tile layer.
    type TileLayer: TileLayer<Self>;
    /// WMS tile layer.
    type WmsTileLayer: WmsTileLayer<Self>;
    /// Image overlay.
    type ImageOverlay: ImageOverlay<Self>;
    /// Popup.
    type Popup: Popup<Self>;
    /// Tooltip.
    type Tooltip: Tooltip<Self>;
    /// Path renderer (SVG or canvas).
    type Renderer: Renderer<Self>;
    /// Marker icon.
    type Icon: Icon;
    /// Map interaction handler.
    type Handler: Handler;
    /// Drag helper of an element.
    type Draggable: Draggable;
    /// Zoom control.
    type ZoomControl: ZoomControl<Self>;
    /// Attribution control.
    type AttributionControl: AttributionControl<Self>;
    /// Layers control.
    type LayersControl: LayersControl<Self>;
    /// Scale control.
    type ScaleControl: ScaleControl<Self>;
    /// Coordinate reference system.
    type Crs: Crs;
    /// Element helpers.
    type DomUtil: DomUtil;
    /// Native event helpers.
    type DomEvent: DomEvent;
    /// Event loop helpers.
    type Scheduler: Scheduler;

    /// Creates a map in the container.
    ///
    /// Fails if the container does not exist or the options are invalid.
    fn map(
        &self,
        container: impl Into<MapContainer>,
        options: Option<MapOptions>,
    ) -> Result<Self::Map, CartaError>;

    /// Creates a marker at the position.
    fn marker(
        &self,
        lat_lng: impl Into<LatLngExpression>,
        options: Option<MarkerOptions>,
    ) -> Self::Marker;

    /// Creates a polyline through the points. Nested points give several lines.
    fn polyline(&self, lat_lngs: Nested<LatLng>, options: Option<PolylineOptions>)
        -> Self::Polyline;

    /// Creates a polygon from its rings. Doubly nested rings give several polygons.
    fn polygon(&self, lat_lngs: Nested<LatLng>, options: Option<PolylineOptions>)
        -> Self::Polygon;

    /// Creates a rectangle covering the bounds.
    fn rectangle(
        &self,
        bounds: impl Into<LatLngBoundsExpression>,
        options: Option<PolylineOptions>,
    ) -> Self::Rectangle;

    /// Creates a circle marker at the position.
    fn circle_marker(
        &self,
        lat_lng: impl Into<LatLngExpression>,
        options: Option<CircleMarkerOptions>,
    ) -> Self::CircleMarker;

    /// Creates a circle around the position. The radius option is in meters.
    fn circle(
        &self,
        lat_lng: impl Into<LatLngExpression>,
        options: Option<CircleMarkerOptions>,
    ) -> Self::Circle;

    /// Creates a layer group holding the layers.
    fn layer_group(
        &self,
        layers: Vec<Self::AnyLayer>,
        options: Option<LayerOptions>,
    ) -> Self::LayerGroup;

    /// Creates a feature group holding the layers.
    fn feature_group(&self, layers: Vec<Self::AnyLayer>) -> Self::FeatureGroup;

    /// Creates a GeoJSON layer, adding the layers of `data` if given.
    fn geo_json(&self, data: Option<GeoJson>, options: Option<GeoJsonOptions<Self>>)
        -> Self::GeoJson;

    /// Creates a grid layer.
    fn grid_layer(&self, options: Option<GridLayerOptions>) -> Self::GridLayer;

    /// Creates a tile layer loading tiles from the url template.
    fn tile_layer(&self, url_template: &str, options: Option<TileLayerOptions>) -> Self::TileLayer;

    /// Creates a WMS tile layer requesting tiles from the service.
    fn tile_layer_wms(
        &self,
        base_url: &str,
        options: Option<WmsOptions>,
    ) -> Result<Self::WmsTileLayer, CartaError>;

    /// Creates an image overlay.
    fn image_overlay(
        &self,
        image_url: &str,
        bounds: impl Into<LatLngBoundsExpression>,
        options: Option<ImageOverlayOptions>,
    ) -> Self::ImageOverlay;

    /// Creates a popup, bound to the source layer if given.
    fn popup(&self, options: Option<PopupOptions>, source: Option<ObjectId>) -> Self::Popup;

    /// Creates a tooltip, bound to the source layer if given.
    fn tooltip(&self, options: Option<TooltipOptions>, source: Option<ObjectId>)
        -> Self::Tooltip;

    /// Creates an image icon.
    fn icon(&self, options: IconOptions) -> Result<Self::Icon, CartaError>;

    /// Creates the default marker icon.
    fn default_icon(&self, options: Option<DefaultIconOptions>) -> Self::Icon;

    /// Creates an icon made of an element.
    fn div_icon(&self, options: Option<DivIconOptions>) -> Self::Icon;

    /// Creates an SVG renderer.
    fn svg(&self, options: Option<RendererOptions>) -> Self::Renderer;

    /// Creates a canvas renderer.
    fn canvas(&self, options: Option<RendererOptions>) -> Self::Renderer;

    /// Creates a zoom control.
    fn control_zoom(&self, options: Option<ZoomControlOptions>) -> Self::ZoomControl;

    /// Creates an attribution control.
    fn control_attribution(
        &self,
        options: Option<AttributionControlOptions>,
    ) -> Self::AttributionControl;

    /// Creates a layers control listing the base layers and overlays.
    fn control_layers(
        &self,
        base_layers: Option<LayersObject<Self>>,
        overlays: Option<LayersObject<Self>>,
        options: Option<LayersControlOptions>,
    ) -> Self::LayersControl;

    /// Creates a scale control.
    fn control_scale(&self, options: Option<ScaleControlOptions>) -> Self::ScaleControl;

    /// Makes the element draggable by `drag_start_target` (the element itself if not given).
    fn draggable(
        &self,
        element: ElementRef,
        drag_start_target: Option<ElementRef>,
        prevent_outline: bool,
    ) -> Self::Draggable;

    /// The coordinate reference system with the code.
    fn crs(&self, code: CrsCode) -> Self::Crs;

    /// Element helpers.
    fn dom_util(&self) -> &Self::DomUtil;

    /// Native event helpers.
    fn dom_event(&self) -> &Self::DomEvent;

    /// Event loop helpers.
    fn scheduler(&self) -> &Self::Scheduler;

    /// Features of the environment.
    fn browser(&self) -> BrowserFeatures;
}
