use carta_types::geo::{lat_lng, LatLng, LatLngBoundsExpression, LatLngExpression};
use carta_types::geojson::{Feature, Geometry, Point};
use serde::{Deserialize, Serialize};

use super::{
    Bounded, ElementBacked, GeoJsonExport, InteractiveLayerOptions, Layer, LayerOptions,
    PathGeometry, PointLocated, PopupBindable, Stackable, Styled, TooltipBindable,
};
use crate::backend::Backend;
use crate::event::ObjectId;
use crate::options::{impl_options, impl_options_projection};

/// Shape at the end of a stroke.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat end at the end point.
    Butt,
    /// Round end.
    Round,
    /// Flat end extended past the end point.
    Square,
    /// Value of the parent element.
    Inherit,
}

/// Shape at the corners of a stroke.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// Sharp corner.
    Miter,
    /// Rounded corner.
    Round,
    /// Cut corner.
    Bevel,
    /// Value of the parent element.
    Inherit,
}

/// How the inside of a self-intersecting shape is decided.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    /// Non-zero winding rule.
    Nonzero,
    /// Even-odd rule.
    Evenodd,
    /// Value of the parent element.
    Inherit,
}

/// Style of vector layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PathOptions {
    /// Map pane the layer is added to.
    pub pane: Option<String>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Whether the layer fires mouse events.
    pub interactive: Option<bool>,
    /// Whether mouse events of the layer also reach the map.
    pub bubbling_mouse_events: Option<bool>,
    /// Whether the outline is drawn.
    pub stroke: Option<bool>,
    /// Outline color.
    pub color: Option<String>,
    /// Outline width in pixels.
    pub weight: Option<f64>,
    /// Outline opacity.
    pub opacity: Option<f64>,
    /// Line ends.
    pub line_cap: Option<LineCap>,
    /// Line corners.
    pub line_join: Option<LineJoin>,
    /// Dash pattern, e.g. `"5, 10"`.
    pub dash_array: Option<String>,
    /// Distance into the dash pattern to start at.
    pub dash_offset: Option<String>,
    /// Whether the inside is filled.
    pub fill: Option<bool>,
    /// Fill color, the outline color by default.
    pub fill_color: Option<String>,
    /// Fill opacity.
    pub fill_opacity: Option<f64>,
    /// Fill rule.
    pub fill_rule: Option<FillRule>,
    /// Renderer drawing the layer, by its id.
    #[serde(skip)]
    pub renderer: Option<ObjectId>,
    /// Class name added to the element.
    pub class_name: Option<String>,
}

impl_options!(PathOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
    stroke,
    color,
    weight,
    opacity,
    line_cap,
    line_join,
    dash_array,
    dash_offset,
    fill,
    fill_color,
    fill_opacity,
    fill_rule,
    renderer,
    class_name,
});
impl_options_projection!(PathOptions => LayerOptions { pane, attribution });
impl_options_projection!(PathOptions => InteractiveLayerOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
});

/// Options of polylines and polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PolylineOptions {
    /// Map pane the layer is added to.
    pub pane: Option<String>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Whether the layer fires mouse events.
    pub interactive: Option<bool>,
    /// Whether mouse events of the layer also reach the map.
    pub bubbling_mouse_events: Option<bool>,
    /// Whether the outline is drawn.
    pub stroke: Option<bool>,
    /// Outline color.
    pub color: Option<String>,
    /// Outline width in pixels.
    pub weight: Option<f64>,
    /// Outline opacity.
    pub opacity: Option<f64>,
    /// Line ends.
    pub line_cap: Option<LineCap>,
    /// Line corners.
    pub line_join: Option<LineJoin>,
    /// Dash pattern.
    pub dash_array: Option<String>,
    /// Distance into the dash pattern to start at.
    pub dash_offset: Option<String>,
    /// Whether the inside is filled.
    pub fill: Option<bool>,
    /// Fill color.
    pub fill_color: Option<String>,
    /// Fill opacity.
    pub fill_opacity: Option<f64>,
    /// Fill rule.
    pub fill_rule: Option<FillRule>,
    /// Renderer drawing the layer, by its id.
    #[serde(skip)]
    pub renderer: Option<ObjectId>,
    /// Class name added to the element.
    pub class_name: Option<String>,
    /// How much to simplify the line on each zoom level, in pixels.
    pub smooth_factor: Option<f64>,
    /// Disables clipping the line to the visible area.
    pub no_clip: Option<bool>,
}

impl_options!(PolylineOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
    stroke,
    color,
    weight,
    opacity,
    line_cap,
    line_join,
    dash_array,
    dash_offset,
    fill,
    fill_color,
    fill_opacity,
    fill_rule,
    renderer,
    class_name,
    smooth_factor,
    no_clip,
});
impl_options_projection!(PolylineOptions => PathOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
    stroke,
    color,
    weight,
    opacity,
    line_cap,
    line_join,
    dash_array,
    dash_offset,
    fill,
    fill_color,
    fill_opacity,
    fill_rule,
    renderer,
    class_name,
});

/// Options of circles and circle markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CircleMarkerOptions {
    /// Map pane the layer is added to.
    pub pane: Option<String>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Whether the layer fires mouse events.
    pub interactive: Option<bool>,
    /// Whether mouse events of the layer also reach the map.
    pub bubbling_mouse_events: Option<bool>,
    /// Whether the outline is drawn.
    pub stroke: Option<bool>,
    /// Outline color.
    pub color: Option<String>,
    /// Outline width in pixels.
    pub weight: Option<f64>,
    /// Outline opacity.
    pub opacity: Option<f64>,
    /// Line ends.
    pub line_cap: Option<LineCap>,
    /// Line corners.
    pub line_join: Option<LineJoin>,
    /// Dash pattern.
    pub dash_array: Option<String>,
    /// Distance into the dash pattern to start at.
    pub dash_offset: Option<String>,
    /// Whether the inside is filled.
    pub fill: Option<bool>,
    /// Fill color.
    pub fill_color: Option<String>,
    /// Fill opacity.
    pub fill_opacity: Option<f64>,
    /// Fill rule.
    pub fill_rule: Option<FillRule>,
    /// Renderer drawing the layer, by its id.
    #[serde(skip)]
    pub renderer: Option<ObjectId>,
    /// Class name added to the element.
    pub class_name: Option<String>,
    /// Radius, in pixels for circle markers and in meters for circles.
    pub radius: Option<f64>,
}

fn non_negative_radius(options: &CircleMarkerOptions) -> Result<(), crate::error::CartaError> {
    match options.radius {
        Some(r) if r.is_nan() || r < 0.0 => Err(crate::error::CartaError::Configuration(format!(
            "radius must not be negative, got {r}"
        ))),
        _ => Ok(()),
    }
}

impl_options!(CircleMarkerOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
    stroke,
    color,
    weight,
    opacity,
    line_cap,
    line_join,
    dash_array,
    dash_offset,
    fill,
    fill_color,
    fill_opacity,
    fill_rule,
    renderer,
    class_name,
    radius,
} validate = non_negative_radius);
impl_options_projection!(CircleMarkerOptions => PathOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
    stroke,
    color,
    weight,
    opacity,
    line_cap,
    line_join,
    dash_array,
    dash_offset,
    fill,
    fill_color,
    fill_opacity,
    fill_rule,
    renderer,
    class_name,
});

/// One point or a list of points, see [`PathGeometry::add_lat_lng`].
#[derive(Debug, Clone, PartialEq)]
pub enum LatLngOrList {
    /// Single point.
    One(LatLng),
    /// Points in order.
    List(Vec<LatLng>),
}

impl LatLngOrList {
    /// The points in order.
    pub fn into_vec(self) -> Vec<LatLng> {
        match self {
            LatLngOrList::One(p) => vec![p],
            LatLngOrList::List(list) => list,
        }
    }
}

impl From<LatLng> for LatLngOrList {
    fn from(value: LatLng) -> Self {
        LatLngOrList::One(value)
    }
}

impl From<LatLngExpression> for LatLngOrList {
    fn from(value: LatLngExpression) -> Self {
        LatLngOrList::One(value.into())
    }
}

impl From<[f64; 2]> for LatLngOrList {
    fn from(value: [f64; 2]) -> Self {
        LatLngOrList::One(value.into())
    }
}

impl<T: Into<LatLngExpression>> From<Vec<T>> for LatLngOrList {
    fn from(value: Vec<T>) -> Self {
        LatLngOrList::List(value.into_iter().map(lat_lng).collect())
    }
}

/// Vector layer: outline and fill drawn by a renderer.
pub trait Path<B: Backend>:
    Layer<B> + PopupBindable<B> + TooltipBindable<B> + Styled + Stackable + ElementBacked
{
    /// Redraws the layer, e.g. after its points were changed in place.
    fn redraw(&mut self) -> &mut Self;
    /// Current style.
    fn style(&self) -> &PathOptions;
}

/// Line through a list of points, or several lines.
pub trait Polyline<B: Backend>:
    Path<B> + PathGeometry + Bounded + GeoJsonExport<Output = Feature<Geometry>>
{
    /// Options the layer was created with.
    fn options(&self) -> &PolylineOptions;
}

/// Area bounded by rings, the first ring being the outline and the rest holes. Several polygons
/// can be given as one layer.
pub trait Polygon<B: Backend>: Polyline<B> {}

/// Polygon given by its bounds.
pub trait Rectangle<B: Backend>: Polygon<B> {
    /// Changes the bounds.
    fn set_bounds(&mut self, bounds: impl Into<LatLngBoundsExpression>) -> &mut Self;
}

/// Circle of a fixed size in pixels.
pub trait CircleMarker<B: Backend>:
    Path<B> + PointLocated + GeoJsonExport<Output = Feature<Point>>
{
    /// Changes the radius.
    fn set_radius(&mut self, radius: f64) -> &mut Self;
    /// Radius, in pixels for circle markers and in meters for circles.
    fn radius(&self) -> f64;
}

/// Circle of a fixed size in meters.
pub trait Circle<B: Backend>: CircleMarker<B> + Bounded {}
