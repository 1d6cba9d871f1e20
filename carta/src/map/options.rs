use std::fmt::Formatter;

use carta_types::cartesian::{Point, PointExpression};
use carta_types::geo::{CrsCode, LatLngBoundsExpression, LatLngExpression};
use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CartaError;
use crate::event::ObjectId;
use crate::options::{impl_options, impl_options_projection};

/// Whether a zoom interaction is enabled. [`Zoom::Center`] zooms to the center of the view
/// instead of the pointer position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Zoom {
    /// Enabled or disabled.
    Enabled(bool),
    /// Enabled, zooming to the center of the view.
    Center,
}

impl Zoom {
    /// Whether the interaction is enabled.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Zoom::Enabled(false))
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Zoom::Enabled(true)
    }
}

impl From<bool> for Zoom {
    fn from(value: bool) -> Self {
        Zoom::Enabled(value)
    }
}

impl Serialize for Zoom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Zoom::Enabled(v) => serializer.serialize_bool(*v),
            Zoom::Center => serializer.serialize_str("center"),
        }
    }
}

struct ZoomVisitor;

impl Visitor<'_> for ZoomVisitor {
    type Value = Zoom;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a boolean or \"center\"")
    }

    fn visit_bool<E: Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Zoom::Enabled(v))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            "center" => Ok(Zoom::Center),
            other => Err(E::custom(format!("unknown zoom mode `{other}`"))),
        }
    }
}

impl<'de> Deserialize<'de> for Zoom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ZoomVisitor)
    }
}

/// Options of a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MapOptions {
    /// Whether paths are drawn on a canvas instead of SVG by default.
    pub prefer_canvas: Option<bool>,
    /// Whether the attribution control is added.
    pub attribution_control: Option<bool>,
    /// Whether the zoom control is added.
    pub zoom_control: Option<bool>,
    /// Whether clicking the map closes open popups.
    pub close_popup_on_click: Option<bool>,
    /// Zoom levels are rounded to a multiple of this. `0` disables rounding.
    pub zoom_snap: Option<f64>,
    /// Zoom change of the zoom buttons and keyboard.
    pub zoom_delta: Option<f64>,
    /// Whether the map follows the size of the window.
    pub track_resize: Option<bool>,
    /// Whether shift-drag zooms to the dragged box.
    pub box_zoom: Option<bool>,
    /// Double click zoom.
    pub double_click_zoom: Option<Zoom>,
    /// Whether the map can be dragged.
    pub dragging: Option<bool>,
    /// Coordinate reference system.
    pub crs: Option<CrsCode>,
    /// Initial center.
    pub center: Option<LatLngExpression>,
    /// Initial zoom level.
    pub zoom: Option<f64>,
    /// Minimum zoom level.
    pub min_zoom: Option<f64>,
    /// Maximum zoom level.
    pub max_zoom: Option<f64>,
    /// Layers added initially.
    #[serde(skip)]
    pub layers: Option<Vec<ObjectId>>,
    /// The view cannot be moved out of these bounds.
    pub max_bounds: Option<LatLngBoundsExpression>,
    /// Default renderer of paths.
    #[serde(skip)]
    pub renderer: Option<ObjectId>,
    /// Whether tiles fade in.
    pub fade_animation: Option<bool>,
    /// Whether markers animate with the zoom.
    pub marker_zoom_animation: Option<bool>,
    /// Largest offset of a CSS 3d transform before the map resets it.
    #[serde(rename = "transform3DLimit")]
    pub transform_3d_limit: Option<f64>,
    /// Whether zoom changes are animated.
    pub zoom_animation: Option<bool>,
    /// Zoom changes larger than this are not animated.
    pub zoom_animation_threshold: Option<f64>,
    /// Whether the map keeps moving after a drag.
    pub inertia: Option<bool>,
    /// Deceleration of the inertia movement in px/s².
    pub inertia_deceleration: Option<f64>,
    /// Maximum speed of the inertia movement in px/s.
    pub inertia_max_speed: Option<f64>,
    /// Curvature of the pan animation.
    pub ease_linearity: Option<f64>,
    /// Whether the view jumps to the original world copy when dragged past it.
    pub world_copy_jump: Option<bool>,
    /// How solid the max bounds are while dragging, `0.0` to `1.0`.
    pub max_bounds_viscosity: Option<f64>,
    /// Whether the map reacts to the keyboard.
    pub keyboard: Option<bool>,
    /// Pan distance of the arrow keys in pixels.
    pub keyboard_pan_delta: Option<f64>,
    /// Wheel zoom.
    pub scroll_wheel_zoom: Option<Zoom>,
    /// Time in milliseconds wheel events are collected before zooming.
    pub wheel_debounce_time: Option<f64>,
    /// Wheel pixels per zoom level.
    pub wheel_px_per_zoom_level: Option<f64>,
    /// Whether taps are converted to clicks on mobile.
    pub tap: Option<bool>,
    /// Pointer movement in pixels that still counts as a tap.
    pub tap_tolerance: Option<f64>,
    /// Pinch zoom.
    pub touch_zoom: Option<Zoom>,
    /// Whether zooming past the zoom limits bounces back.
    pub bounce_at_zoom_limits: Option<bool>,
}

impl_options!(MapOptions {
    prefer_canvas,
    attribution_control,
    zoom_control,
    close_popup_on_click,
    zoom_snap,
    zoom_delta,
    track_resize,
    box_zoom,
    double_click_zoom,
    dragging,
    crs,
    center,
    zoom,
    min_zoom,
    max_zoom,
    layers,
    max_bounds,
    renderer,
    fade_animation,
    marker_zoom_animation,
    transform_3d_limit,
    zoom_animation,
    zoom_animation_threshold,
    inertia,
    inertia_deceleration,
    inertia_max_speed,
    ease_linearity,
    world_copy_jump,
    max_bounds_viscosity,
    keyboard,
    keyboard_pan_delta,
    scroll_wheel_zoom,
    wheel_debounce_time,
    wheel_px_per_zoom_level,
    tap,
    tap_tolerance,
    touch_zoom,
    bounce_at_zoom_limits,
} validate = check_map);

fn check_map(options: &MapOptions) -> Result<(), CartaError> {
    if let (Some(min), Some(max)) = (options.min_zoom, options.max_zoom) {
        if min > max {
            return Err(CartaError::Configuration(format!(
                "minZoom ({min}) is greater than maxZoom ({max})"
            )));
        }
    }

    if let Some(snap) = options.zoom_snap {
        if snap < 0.0 {
            return Err(CartaError::Configuration(format!(
                "zoomSnap cannot be negative, got {snap}"
            )));
        }
    }

    if let Some(viscosity) = options.max_bounds_viscosity {
        if !(0.0..=1.0).contains(&viscosity) {
            return Err(CartaError::Configuration(format!(
                "maxBoundsViscosity must be between 0 and 1, got {viscosity}"
            )));
        }
    }

    if options.center.is_some() != options.zoom.is_some() {
        log::warn!("Map view is set only when both center and zoom are given");
    }

    Ok(())
}

impl MapOptions {
    /// Options with the values the runtime uses for missing fields. Fields without a default
    /// (view, zoom limits, max bounds, layers, renderer) stay unset.
    pub fn with_defaults() -> Self {
        Self {
            prefer_canvas: Some(false),
            attribution_control: Some(true),
            zoom_control: Some(true),
            close_popup_on_click: Some(true),
            zoom_snap: Some(1.0),
            zoom_delta: Some(1.0),
            track_resize: Some(true),
            box_zoom: Some(true),
            double_click_zoom: Some(Zoom::Enabled(true)),
            dragging: Some(true),
            crs: Some(CrsCode::Epsg3857),
            fade_animation: Some(true),
            marker_zoom_animation: Some(true),
            transform_3d_limit: Some(8_388_608.0),
            zoom_animation: Some(true),
            zoom_animation_threshold: Some(4.0),
            inertia: Some(true),
            inertia_deceleration: Some(3400.0),
            inertia_max_speed: Some(f64::INFINITY),
            ease_linearity: Some(0.2),
            world_copy_jump: Some(false),
            max_bounds_viscosity: Some(0.0),
            keyboard: Some(true),
            keyboard_pan_delta: Some(80.0),
            scroll_wheel_zoom: Some(Zoom::Enabled(true)),
            wheel_debounce_time: Some(40.0),
            wheel_px_per_zoom_level: Some(60.0),
            tap: Some(true),
            tap_tolerance: Some(15.0),
            touch_zoom: Some(Zoom::Enabled(true)),
            bounce_at_zoom_limits: Some(true),
            ..Default::default()
        }
    }
}

/// Options of a zoom change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ZoomOptions {
    /// Whether the change is animated. `None` lets the map decide.
    pub animate: Option<bool>,
}

impl_options!(ZoomOptions { animate });

/// Options of a pan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PanOptions {
    /// Whether the pan is animated. `None` animates only short pans.
    pub animate: Option<bool>,
    /// Duration of the animation in seconds.
    pub duration: Option<f64>,
    /// Curvature of the animation.
    pub ease_linearity: Option<f64>,
    /// Whether `movestart` is not fired.
    pub no_move_start: Option<bool>,
}

impl_options!(PanOptions {
    animate,
    duration,
    ease_linearity,
    no_move_start
});

/// Options of a view change that may zoom and pan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ZoomPanOptions {
    /// Whether the change is animated.
    pub animate: Option<bool>,
    /// Duration of the pan animation in seconds.
    pub duration: Option<f64>,
    /// Curvature of the pan animation.
    pub ease_linearity: Option<f64>,
    /// Whether `movestart` is not fired.
    pub no_move_start: Option<bool>,
}

impl_options!(ZoomPanOptions {
    animate,
    duration,
    ease_linearity,
    no_move_start
});
impl_options_projection!(ZoomPanOptions => ZoomOptions { animate });
impl_options_projection!(ZoomPanOptions => PanOptions {
    animate,
    duration,
    ease_linearity,
    no_move_start
});

impl From<&ZoomOptions> for ZoomPanOptions {
    fn from(value: &ZoomOptions) -> Self {
        Self {
            animate: value.animate,
            ..Default::default()
        }
    }
}

impl From<&PanOptions> for ZoomPanOptions {
    fn from(value: &PanOptions) -> Self {
        Self {
            animate: value.animate,
            duration: value.duration,
            ease_linearity: value.ease_linearity,
            no_move_start: value.no_move_start,
        }
    }
}

/// Options of fitting the view to bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FitBoundsOptions {
    /// Whether the change is animated.
    pub animate: Option<bool>,
    /// Duration of the pan animation in seconds.
    pub duration: Option<f64>,
    /// Curvature of the pan animation.
    pub ease_linearity: Option<f64>,
    /// Whether `movestart` is not fired.
    pub no_move_start: Option<bool>,
    /// Padding at the top left corner of the view in pixels.
    pub padding_top_left: Option<PointExpression>,
    /// Padding at the bottom right corner of the view in pixels.
    pub padding_bottom_right: Option<PointExpression>,
    /// Padding at both corners, used where a corner padding is not set.
    pub padding: Option<PointExpression>,
    /// The view is not zoomed in further than this.
    pub max_zoom: Option<f64>,
}

impl_options!(FitBoundsOptions {
    animate,
    duration,
    ease_linearity,
    no_move_start,
    padding_top_left,
    padding_bottom_right,
    padding,
    max_zoom,
});
impl_options_projection!(FitBoundsOptions => ZoomPanOptions {
    animate,
    duration,
    ease_linearity,
    no_move_start
});

impl FitBoundsOptions {
    /// Effective padding at the top left and bottom right corners.
    pub fn paddings(&self) -> (Point, Point) {
        let resolve = |corner: Option<PointExpression>| {
            corner
                .or(self.padding)
                .map(PointExpression::to_point)
                .unwrap_or_default()
        };

        (
            resolve(self.padding_top_left),
            resolve(self.padding_bottom_right),
        )
    }
}

/// Options of geolocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LocateOptions {
    /// Whether the location is tracked continuously until `stop_locate`.
    pub watch: Option<bool>,
    /// Whether the view is moved to the found location.
    pub set_view: Option<bool>,
    /// Maximum zoom of the view set to the location.
    pub max_zoom: Option<f64>,
    /// Time in milliseconds to wait for the location.
    pub timeout: Option<f64>,
    /// Maximum age in milliseconds of a cached location.
    pub maximum_age: Option<f64>,
    /// Whether a more precise location is requested.
    pub enable_high_accuracy: Option<bool>,
}

impl_options!(LocateOptions {
    watch,
    set_view,
    max_zoom,
    timeout,
    maximum_age,
    enable_high_accuracy,
});

/// How the view changes when the container size is recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvalidateSizeOptions {
    /// Whether the change is animated.
    Animate(bool),
    /// Options of the change.
    Options(ZoomPanOptions),
}

impl Default for InvalidateSizeOptions {
    fn default() -> Self {
        InvalidateSizeOptions::Animate(false)
    }
}

impl From<bool> for InvalidateSizeOptions {
    fn from(value: bool) -> Self {
        InvalidateSizeOptions::Animate(value)
    }
}

impl From<ZoomPanOptions> for InvalidateSizeOptions {
    fn from(value: ZoomPanOptions) -> Self {
        InvalidateSizeOptions::Options(value)
    }
}
