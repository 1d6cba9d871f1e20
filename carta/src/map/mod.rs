//! The map: the central runtime object that holds layers and controls, owns the view (center
//! and zoom) and converts between geographical, layer and container coordinates.
//!
//! Moving the view, managing panes and reacting to input is done by the runtime. Coordinate
//! conversions and the derived view operations only need the CRS and the view state, so they
//! are provided methods of [`Map`] built on a few required getters.

use carta_types::cartesian::{Bounds, Point, PointExpression};
use carta_types::error::CartaTypesError;
use carta_types::geo::{
    Crs, LatLng, LatLngBounds, LatLngBoundsExpression, LatLngExpression,
};
use maybe_sync::{MaybeSend, MaybeSync};

use crate::backend::Backend;
use crate::control::Control;
use crate::dom::{ElementOrId, ElementRef, NativeEventRef};
use crate::error::CartaError;
use crate::event::{Evented, ObjectId};
use crate::layer::{Content, PopupOptions, TooltipOptions};

mod handler;
mod options;
mod panes;

pub use handler::{Handler, MapHandlerName};
pub use options::{
    FitBoundsOptions, InvalidateSizeOptions, LocateOptions, MapOptions, PanOptions, Zoom,
    ZoomOptions, ZoomPanOptions,
};
pub use panes::{
    default_pane_z_index, DefaultMapPanes, MapPanes, PaneRef, DEFAULT_PANES, MAP_PANE,
    MARKER_PANE, OVERLAY_PANE, POPUP_PANE, SHADOW_PANE, TILE_PANE, TOOLTIP_PANE,
};

/// Element a map is created in, given directly or by its id.
pub type MapContainer = ElementOrId;

/// Bounds of the whole world as `[[south, west], [north, east]]`.
pub const WORLD_BOUNDS: [[f64; 2]; 2] = [[-90.0, -180.0], [90.0, 180.0]];

/// Popup or tooltip to open on the map: an existing one, or content for a new one.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenOverlay<T, O> {
    /// Existing overlay.
    Overlay(T),
    /// Content of a new overlay.
    Content {
        /// Content of the overlay.
        content: Content,
        /// Position of the overlay.
        lat_lng: LatLng,
        /// Options of the overlay.
        options: Option<O>,
    },
}

impl<T, O> OpenOverlay<T, O> {
    /// Content of a new overlay at the position.
    pub fn content(content: impl Into<Content>, lat_lng: impl Into<LatLngExpression>) -> Self {
        OpenOverlay::Content {
            content: content.into(),
            lat_lng: lat_lng.into().to_lat_lng(),
            options: None,
        }
    }
}

/// Point given in container pixels or as a geographical position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointOrLatLng {
    /// Container point.
    Point(Point),
    /// Geographical position.
    LatLng(LatLng),
}

impl From<Point> for PointOrLatLng {
    fn from(value: Point) -> Self {
        PointOrLatLng::Point(value)
    }
}

impl From<LatLng> for PointOrLatLng {
    fn from(value: LatLng) -> Self {
        PointOrLatLng::LatLng(value)
    }
}

impl From<LatLngExpression> for PointOrLatLng {
    fn from(value: LatLngExpression) -> Self {
        PointOrLatLng::LatLng(value.to_lat_lng())
    }
}

/// The map.
pub trait Map<B: Backend>: Evented + MaybeSend + MaybeSync {
    /// Options the map was created with.
    fn options(&self) -> &MapOptions;
    /// Coordinate reference system of the map.
    fn crs(&self) -> &B::Crs;

    /// Renderer the path is drawn with.
    fn renderer(&mut self, layer: ObjectId) -> &mut B::Renderer;
    /// Adds the control to the map.
    fn add_control(&mut self, control: &mut impl Control<B>) -> &mut Self;
    /// Removes the control from the map.
    fn remove_control(&mut self, control: &mut impl Control<B>) -> &mut Self;
    /// Adds the layer to the map.
    fn add_layer(&mut self, layer: impl Into<B::AnyLayer>) -> &mut Self;
    /// Removes the layer with the id. Unknown ids are ignored.
    fn remove_layer(&mut self, id: ObjectId) -> &mut Self;
    /// Whether the layer with the id is on the map.
    fn has_layer(&self, id: ObjectId) -> bool;
    /// Calls `f` with every layer on the map.
    fn each_layer(&mut self, f: &mut dyn FnMut(&mut B::AnyLayer)) -> &mut Self;

    /// Opens a popup, closing the previously opened one.
    fn open_popup(&mut self, popup: OpenOverlay<B::Popup, PopupOptions>) -> &mut Self;
    /// Closes the popup with the id, or the open popup.
    fn close_popup(&mut self, popup: Option<ObjectId>) -> &mut Self;
    /// Opens a tooltip.
    fn open_tooltip(&mut self, tooltip: OpenOverlay<B::Tooltip, TooltipOptions>) -> &mut Self;
    /// Closes the tooltip with the id.
    fn close_tooltip(&mut self, tooltip: Option<ObjectId>) -> &mut Self;

    /// Moves the view.
    fn set_view(
        &mut self,
        center: impl Into<LatLngExpression>,
        zoom: f64,
        options: Option<ZoomPanOptions>,
    ) -> &mut Self;
    /// Pans the view by the offset in pixels.
    fn pan_by(&mut self, offset: impl Into<PointExpression>) -> &mut Self;
    /// Restricts the view to the bounds.
    fn set_max_bounds(&mut self, bounds: impl Into<LatLngBoundsExpression>) -> &mut Self;
    /// Sets the minimum zoom level.
    fn set_min_zoom(&mut self, zoom: f64) -> &mut Self;
    /// Sets the maximum zoom level.
    fn set_max_zoom(&mut self, zoom: f64) -> &mut Self;
    /// Pans the view back into the bounds if it is outside of them.
    fn pan_inside_bounds(
        &mut self,
        bounds: impl Into<LatLngBoundsExpression>,
        options: Option<PanOptions>,
    ) -> &mut Self;
    /// Recomputes the size of the container, e.g. after it was resized.
    fn invalidate_size(&mut self, options: Option<InvalidateSizeOptions>) -> &mut Self;
    /// Stops the current view animation.
    fn stop(&mut self) -> &mut Self;
    /// Moves the view with a zoom out and in animation.
    fn fly_to(
        &mut self,
        lat_lng: impl Into<LatLngExpression>,
        zoom: Option<f64>,
        options: Option<ZoomPanOptions>,
    ) -> &mut Self;
    /// Fits the view to the bounds with a zoom out and in animation.
    fn fly_to_bounds(
        &mut self,
        bounds: impl Into<LatLngBoundsExpression>,
        options: Option<FitBoundsOptions>,
    ) -> &mut Self;

    /// Registers an interaction handler under the name.
    fn add_handler(&mut self, name: &str, handler: B::Handler) -> &mut Self;
    /// Handler registered under the name.
    fn handler(&mut self, name: MapHandlerName) -> Option<&mut B::Handler>;
    /// The zoom control, if the map has one.
    fn zoom_control(&mut self) -> Option<&mut B::ZoomControl>;
    /// Destroys the map and clears all its listeners.
    fn remove(&mut self) -> &mut Self;

    /// Creates a custom pane inside `container`, or inside the map pane.
    fn create_pane(&mut self, name: &str, container: Option<ElementRef>) -> ElementRef;
    /// The pane with the name, or the element itself.
    fn pane(&self, pane: PaneRef) -> Option<ElementRef>;
    /// All panes.
    fn panes(&self) -> &MapPanes;
    /// Element of the map.
    fn container(&self) -> ElementRef;
    /// Calls `f` once the map has a view, immediately if it already has one.
    fn when_ready(&mut self, f: Box<dyn FnOnce() + Send>) -> &mut Self;

    /// Center of the view.
    fn center(&self) -> LatLng;
    /// Zoom level of the view.
    fn zoom(&self) -> f64;
    /// Geographical bounds of the view.
    fn bounds(&self) -> LatLngBounds;
    /// Minimum zoom level: the option, or the one of the layers.
    fn min_zoom(&self) -> f64;
    /// Maximum zoom level: the option, or the one of the layers.
    fn max_zoom(&self) -> f64;
    /// Size of the container in pixels.
    fn size(&self) -> Point;
    /// Bounds of the view in projected pixel coordinates.
    fn pixel_bounds(&self) -> Bounds;
    /// Projected pixel coordinates of the top left corner of the layer coordinate system.
    fn pixel_origin(&self) -> Point;
    /// Offset of the map pane from the container.
    fn map_pane_position(&self) -> Point;
    /// Position of the mouse event relative to the container.
    fn mouse_event_to_container_point(&self, event: NativeEventRef) -> Point;

    /// Starts geolocation. The result comes as a `locationfound` or `locationerror` event.
    fn locate(&mut self, options: Option<LocateOptions>) -> &mut Self;
    /// Stops geolocation started with `watch`.
    fn stop_locate(&mut self) -> &mut Self;

    /// Changes the zoom level keeping the center.
    fn set_zoom(&mut self, zoom: f64, options: Option<ZoomPanOptions>) -> &mut Self {
        let center = self.center();
        self.set_view(center, zoom, options)
    }

    /// Zooms in by `delta`, by the `zoom_delta` option if not given.
    fn zoom_in(&mut self, delta: Option<f64>, options: Option<ZoomOptions>) -> &mut Self {
        let delta = delta.unwrap_or_else(|| self.options().zoom_delta.unwrap_or(1.0));
        let zoom = self.zoom() + delta;
        self.set_zoom(zoom, options.as_ref().map(ZoomPanOptions::from))
    }

    /// Zooms out by `delta`, by the `zoom_delta` option if not given.
    fn zoom_out(&mut self, delta: Option<f64>, options: Option<ZoomOptions>) -> &mut Self {
        let delta = delta.unwrap_or_else(|| self.options().zoom_delta.unwrap_or(1.0));
        let zoom = self.zoom() - delta;
        self.set_zoom(zoom, options.as_ref().map(ZoomPanOptions::from))
    }

    /// Changes the zoom level keeping the point at the same place in the container.
    fn set_zoom_around(
        &mut self,
        position: impl Into<PointOrLatLng>,
        zoom: f64,
        options: Option<ZoomOptions>,
    ) -> &mut Self {
        let scale = self.zoom_scale(zoom, None);
        let view_half = self.size().divide_by(2.0);
        let container_point = match position.into() {
            PointOrLatLng::Point(p) => p,
            PointOrLatLng::LatLng(lat_lng) => self.lat_lng_to_container_point(lat_lng),
        };
        let center_offset = container_point
            .subtract(view_half)
            .multiply_by(1.0 - 1.0 / scale);
        let new_center = self.container_point_to_lat_lng(view_half.add(center_offset));

        self.set_view(
            new_center,
            zoom,
            options.as_ref().map(ZoomPanOptions::from),
        )
    }

    /// Center and zoom of the largest view showing the whole bounds with the paddings.
    fn bounds_center_zoom(
        &self,
        bounds: impl Into<LatLngBoundsExpression>,
        options: &FitBoundsOptions,
    ) -> Result<(LatLng, f64), CartaError> {
        let bounds = bounds.into().to_lat_lng_bounds();
        let (padding_top_left, padding_bottom_right) = options.paddings();

        let mut zoom =
            self.bounds_zoom_padded(bounds, false, padding_top_left.add(padding_bottom_right))?;
        if let Some(max_zoom) = options.max_zoom {
            zoom = zoom.min(max_zoom);
        }

        let (Some(south_west), Some(north_east)) = (bounds.south_west(), bounds.north_east())
        else {
            return Err(CartaTypesError::EmptyInput.into());
        };

        if zoom.is_infinite() {
            return Ok((bounds.center().unwrap_or(south_west), zoom));
        }

        let padding_offset = padding_bottom_right.subtract(padding_top_left).divide_by(2.0);
        let sw_point = self.project(south_west, Some(zoom));
        let ne_point = self.project(north_east, Some(zoom));
        let center = self.unproject(
            sw_point.add(ne_point).divide_by(2.0).add(padding_offset),
            Some(zoom),
        );

        Ok((center, zoom))
    }

    /// Fits the view to the bounds.
    fn fit_bounds(
        &mut self,
        bounds: impl Into<LatLngBoundsExpression>,
        options: Option<FitBoundsOptions>,
    ) -> Result<&mut Self, CartaError> {
        let options = options.unwrap_or_default();
        let (center, zoom) = self.bounds_center_zoom(bounds, &options)?;
        Ok(self.set_view(center, zoom, Some(ZoomPanOptions::from(&options))))
    }

    /// Fits the view to the whole world.
    fn fit_world(&mut self, options: Option<FitBoundsOptions>) -> Result<&mut Self, CartaError> {
        self.fit_bounds(WORLD_BOUNDS, options)
    }

    /// Pans the view to the point keeping the zoom.
    fn pan_to(
        &mut self,
        lat_lng: impl Into<LatLngExpression>,
        options: Option<PanOptions>,
    ) -> &mut Self {
        let zoom = self.zoom();
        self.set_view(lat_lng, zoom, options.as_ref().map(ZoomPanOptions::from))
    }

    /// Largest zoom level showing the whole bounds, or the smallest zoom level at which the view
    /// fits inside the bounds if `inside` is set.
    fn bounds_zoom(
        &self,
        bounds: impl Into<LatLngBoundsExpression>,
        inside: bool,
    ) -> Result<f64, CartaError> {
        self.bounds_zoom_padded(bounds.into().to_lat_lng_bounds(), inside, Point::default())
    }

    /// [`Map::bounds_zoom`] for a view smaller by `padding`.
    fn bounds_zoom_padded(
        &self,
        bounds: LatLngBounds,
        inside: bool,
        padding: Point,
    ) -> Result<f64, CartaError> {
        let (Some(north_west), Some(south_east)) = (bounds.north_west(), bounds.south_east())
        else {
            return Err(CartaTypesError::EmptyInput.into());
        };

        let zoom = self.zoom();
        let size = self.size().subtract(padding);
        let bounds_size = Bounds::new(
            self.project(south_east, Some(zoom)),
            self.project(north_west, Some(zoom)),
        )
        .size()
        .unwrap_or_default();

        let scale_x = size.x / bounds_size.x;
        let scale_y = size.y / bounds_size.y;
        let scale = if inside {
            scale_x.max(scale_y)
        } else {
            scale_x.min(scale_y)
        };

        let mut zoom = self.scale_zoom(scale, Some(zoom));
        let snap = self.options().zoom_snap.unwrap_or(1.0);
        if snap > 0.0 {
            // Levels within 1% of a snap level are not moved to the next one.
            zoom = (zoom / (snap / 100.0)).round() * (snap / 100.0);
            zoom = if inside {
                (zoom / snap).ceil() * snap
            } else {
                (zoom / snap).floor() * snap
            };
        }

        Ok(zoom.min(self.max_zoom()).max(self.min_zoom()))
    }

    /// Bounds of the world in projected pixels at the zoom level, the current one if not given.
    /// `None` for infinite coordinate systems.
    fn pixel_world_bounds(&self, zoom: Option<f64>) -> Option<Bounds> {
        self.crs()
            .projected_bounds(zoom.unwrap_or_else(|| self.zoom()))
    }

    /// Scale factor between two zoom levels. `from_zoom` is the current zoom if not given.
    fn zoom_scale(&self, to_zoom: f64, from_zoom: Option<f64>) -> f64 {
        let from_zoom = from_zoom.unwrap_or_else(|| self.zoom());
        self.crs().scale(to_zoom) / self.crs().scale(from_zoom)
    }

    /// Zoom level reached by scaling `from_zoom` (the current zoom if not given) by `scale`.
    fn scale_zoom(&self, scale: f64, from_zoom: Option<f64>) -> f64 {
        let from_zoom = from_zoom.unwrap_or_else(|| self.zoom());
        let zoom = self.crs().zoom(scale * self.crs().scale(from_zoom));
        if zoom.is_nan() {
            f64::INFINITY
        } else {
            zoom
        }
    }

    /// Projected pixel coordinates of the point at the zoom level, the current one if not
    /// given.
    fn project(&self, lat_lng: impl Into<LatLngExpression>, zoom: Option<f64>) -> Point {
        let zoom = zoom.unwrap_or_else(|| self.zoom());
        self.crs()
            .lat_lng_to_point(lat_lng.into().to_lat_lng(), zoom)
    }

    /// Inverse of [`Map::project`].
    fn unproject(&self, point: impl Into<PointExpression>, zoom: Option<f64>) -> LatLng {
        let zoom = zoom.unwrap_or_else(|| self.zoom());
        self.crs().point_to_lat_lng(point.into().to_point(), zoom)
    }

    /// Geographical position of the layer point.
    fn layer_point_to_lat_lng(&self, point: impl Into<PointExpression>) -> LatLng {
        let projected = point.into().to_point().add(self.pixel_origin());
        self.unproject(projected, None)
    }

    /// Layer point of the geographical position.
    fn lat_lng_to_layer_point(&self, lat_lng: impl Into<LatLngExpression>) -> Point {
        self.project(lat_lng, None)
            .round()
            .subtract(self.pixel_origin())
    }

    /// The point with the coordinates wrapped into the ranges of the CRS.
    fn wrap_lat_lng(&self, lat_lng: impl Into<LatLngExpression>) -> LatLng {
        self.crs().wrap_lat_lng(lat_lng.into().to_lat_lng())
    }

    /// The bounds moved so that their center is wrapped into the ranges of the CRS. The size is
    /// kept, so the bounds may still cross the antimeridian.
    fn wrap_lat_lng_bounds(&self, bounds: LatLngBounds) -> LatLngBounds {
        let (Some(center), Some(south_west), Some(north_east)) =
            (bounds.center(), bounds.south_west(), bounds.north_east())
        else {
            return bounds;
        };

        let wrapped = self.crs().wrap_lat_lng(center);
        let lat_shift = center.lat - wrapped.lat;
        let lng_shift = center.lng - wrapped.lng;
        if lat_shift == 0.0 && lng_shift == 0.0 {
            return bounds;
        }

        LatLngBounds::new(
            LatLng::new(south_west.lat - lat_shift, south_west.lng - lng_shift),
            LatLng::new(north_east.lat - lat_shift, north_east.lng - lng_shift),
        )
    }

    /// Distance between the points in meters.
    fn distance(
        &self,
        a: impl Into<LatLngExpression>,
        b: impl Into<LatLngExpression>,
    ) -> f64 {
        self.crs()
            .distance(a.into().to_lat_lng(), b.into().to_lat_lng())
    }

    /// Layer point of the container point.
    fn container_point_to_layer_point(&self, point: impl Into<PointExpression>) -> Point {
        point.into().to_point().subtract(self.map_pane_position())
    }

    /// Container point of the layer point.
    fn layer_point_to_container_point(&self, point: impl Into<PointExpression>) -> Point {
        point.into().to_point().add(self.map_pane_position())
    }

    /// Geographical position of the container point.
    fn container_point_to_lat_lng(&self, point: impl Into<PointExpression>) -> LatLng {
        self.layer_point_to_lat_lng(self.container_point_to_layer_point(point))
    }

    /// Container point of the geographical position.
    fn lat_lng_to_container_point(&self, lat_lng: impl Into<LatLngExpression>) -> Point {
        self.layer_point_to_container_point(self.lat_lng_to_layer_point(lat_lng))
    }

    /// Layer point of the mouse event.
    fn mouse_event_to_layer_point(&self, event: NativeEventRef) -> Point {
        self.container_point_to_layer_point(self.mouse_event_to_container_point(event))
    }

    /// Geographical position of the mouse event.
    fn mouse_event_to_lat_lng(&self, event: NativeEventRef) -> LatLng {
        self.layer_point_to_lat_lng(self.mouse_event_to_layer_point(event))
    }
}
