//! Tile layers: options, url templates and WMS requests.

use carta_types::cartesian::{Bounds, Coords, Point};
use carta_types::geo::{CrsCode, LatLngBoundsExpression};
use carta_types::CartaTypesError;
use serde::{Deserialize, Serialize};

use super::{Layer, LayerOptions, Stackable, Translucent, ZIndexed};
use crate::backend::Backend;
use crate::dom::ElementRef;
use crate::error::CartaError;
use crate::options::{impl_options, impl_options_projection};
use crate::util::{get_param_string, template, TemplateData};

/// Tile size in pixels when none is given.
pub const DEFAULT_TILE_SIZE: f64 = 256.0;
/// Highest zoom level of tile layers when none is given.
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;
/// Subdomains of tile servers when none are given.
pub const DEFAULT_SUBDOMAINS: &str = "abc";

/// Size of the tiles: the same width and height, or a point.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileSize {
    /// Square tiles.
    Uniform(f64),
    /// Width and height.
    Point(Point),
}

impl TileSize {
    /// Size as a point.
    pub fn to_point(self) -> Point {
        match self {
            TileSize::Uniform(s) => Point::new(s, s),
            TileSize::Point(p) => p,
        }
    }

    fn half(self) -> Self {
        match self {
            TileSize::Uniform(s) => TileSize::Uniform((s / 2.0).floor()),
            TileSize::Point(p) => TileSize::Point(p.divide_by(2.0).floor()),
        }
    }
}

impl Default for TileSize {
    fn default() -> Self {
        TileSize::Uniform(DEFAULT_TILE_SIZE)
    }
}

impl From<f64> for TileSize {
    fn from(value: f64) -> Self {
        TileSize::Uniform(value)
    }
}

impl From<Point> for TileSize {
    fn from(value: Point) -> Self {
        TileSize::Point(value)
    }
}

/// Key identifying a tile among the loaded tiles of a layer.
pub fn tile_key(coords: Coords) -> String {
    format!("{}:{}:{}", coords.x, coords.y, coords.z)
}

/// Options of a grid layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GridLayerOptions {
    /// Size of the tiles.
    pub tile_size: Option<TileSize>,
    /// Opacity of the tiles.
    pub opacity: Option<f64>,
    /// Whether tiles are loaded only after panning ends.
    pub update_when_idle: Option<bool>,
    /// Whether tiles are loaded during zoom animation.
    pub update_when_zooming: Option<bool>,
    /// Minimum time between tile loads while panning, in milliseconds.
    pub update_interval: Option<f64>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Z-index of the tile container.
    pub z_index: Option<i32>,
    /// Tiles are only loaded inside these bounds.
    pub bounds: Option<LatLngBoundsExpression>,
    /// Lowest zoom level the layer is shown at.
    pub min_zoom: Option<f64>,
    /// Highest zoom level the layer is shown at.
    pub max_zoom: Option<f64>,
    /// Whether the layer is not repeated across the antimeridian.
    pub no_wrap: Option<bool>,
    /// Map pane the layer is added to.
    pub pane: Option<String>,
    /// Class name added to the tile container.
    pub class_name: Option<String>,
    /// Rows and columns of tiles kept loaded outside the view.
    pub keep_buffer: Option<u32>,
}

fn check_grid_zoom(min_zoom: Option<f64>, max_zoom: Option<f64>) -> Result<(), CartaError> {
    match (min_zoom, max_zoom) {
        (Some(min), Some(max)) if min > max => Err(CartaError::Configuration(format!(
            "minZoom ({min}) is greater than maxZoom ({max})"
        ))),
        _ => Ok(()),
    }
}

fn check_grid(options: &GridLayerOptions) -> Result<(), CartaError> {
    check_grid_zoom(options.min_zoom, options.max_zoom)
}

impl_options!(GridLayerOptions {
    tile_size,
    opacity,
    update_when_idle,
    update_when_zooming,
    update_interval,
    attribution,
    z_index,
    bounds,
    min_zoom,
    max_zoom,
    no_wrap,
    pane,
    class_name,
    keep_buffer,
} validate = check_grid);
impl_options_projection!(GridLayerOptions => LayerOptions { pane, attribution });

/// Subdomains a tile url template rotates through with `{s}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subdomains {
    /// Every character is a subdomain.
    Chars(String),
    /// List of subdomains.
    List(Vec<String>),
}

impl Subdomains {
    /// The subdomains in order.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Subdomains::Chars(s) => s.chars().map(String::from).collect(),
            Subdomains::List(list) => list.clone(),
        }
    }
}

impl Default for Subdomains {
    fn default() -> Self {
        Subdomains::Chars(DEFAULT_SUBDOMAINS.into())
    }
}

impl From<&str> for Subdomains {
    fn from(value: &str) -> Self {
        Subdomains::Chars(value.into())
    }
}

impl From<Vec<String>> for Subdomains {
    fn from(value: Vec<String>) -> Self {
        Subdomains::List(value)
    }
}

impl From<Vec<&str>> for Subdomains {
    fn from(value: Vec<&str>) -> Self {
        Subdomains::List(value.into_iter().map(String::from).collect())
    }
}

/// Options of a tile layer loading images from a url template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TileLayerOptions {
    /// Size of the tiles.
    pub tile_size: Option<TileSize>,
    /// Opacity of the tiles.
    pub opacity: Option<f64>,
    /// Whether tiles are loaded only after panning ends.
    pub update_when_idle: Option<bool>,
    /// Whether tiles are loaded during zoom animation.
    pub update_when_zooming: Option<bool>,
    /// Minimum time between tile loads while panning, in milliseconds.
    pub update_interval: Option<f64>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Z-index of the tile container.
    pub z_index: Option<i32>,
    /// Tiles are only loaded inside these bounds.
    pub bounds: Option<LatLngBoundsExpression>,
    /// Lowest zoom level the layer is shown at.
    pub min_zoom: Option<f64>,
    /// Highest zoom level the layer is shown at.
    pub max_zoom: Option<f64>,
    /// Whether the layer is not repeated across the antimeridian.
    pub no_wrap: Option<bool>,
    /// Map pane the layer is added to.
    pub pane: Option<String>,
    /// Class name added to the tile container.
    pub class_name: Option<String>,
    /// Rows and columns of tiles kept loaded outside the view.
    pub keep_buffer: Option<u32>,
    /// Highest zoom level the server has tiles for. Tiles are scaled above it.
    pub max_native_zoom: Option<f64>,
    /// Lowest zoom level the server has tiles for. Tiles are scaled below it.
    pub min_native_zoom: Option<f64>,
    /// Subdomains for `{s}`.
    pub subdomains: Option<Subdomains>,
    /// Url of the image shown in place of tiles that failed to load.
    pub error_tile_url: Option<String>,
    /// Added to the zoom level in tile urls.
    pub zoom_offset: Option<f64>,
    /// Whether the tile rows are numbered from the south (TMS services).
    pub tms: Option<bool>,
    /// Whether the zoom level in tile urls counts down from `max_zoom`.
    pub zoom_reverse: Option<bool>,
    /// Whether four tiles of the next zoom level are loaded in place of one on retina screens.
    pub detect_retina: Option<bool>,
    /// Whether the tiles are requested with CORS.
    pub cross_origin: Option<bool>,
}

fn check_tile_layer(options: &TileLayerOptions) -> Result<(), CartaError> {
    check_grid_zoom(options.min_zoom, options.max_zoom)?;
    if let Some(Subdomains::List(list)) = &options.subdomains {
        if list.is_empty() {
            return Err(CartaError::Configuration("subdomains must not be empty".into()));
        }
    }
    Ok(())
}

impl_options!(TileLayerOptions {
    tile_size,
    opacity,
    update_when_idle,
    update_when_zooming,
    update_interval,
    attribution,
    z_index,
    bounds,
    min_zoom,
    max_zoom,
    no_wrap,
    pane,
    class_name,
    keep_buffer,
    max_native_zoom,
    min_native_zoom,
    subdomains,
    error_tile_url,
    zoom_offset,
    tms,
    zoom_reverse,
    detect_retina,
    cross_origin,
} validate = check_tile_layer);
impl_options_projection!(TileLayerOptions => LayerOptions { pane, attribution });
impl_options_projection!(TileLayerOptions => GridLayerOptions {
    tile_size,
    opacity,
    update_when_idle,
    update_when_zooming,
    update_interval,
    attribution,
    z_index,
    bounds,
    min_zoom,
    max_zoom,
    no_wrap,
    pane,
    class_name,
    keep_buffer,
});

impl TileLayerOptions {
    /// Subdomains for `{s}`, `a`, `b` and `c` if not set.
    pub fn subdomain_list(&self) -> Vec<String> {
        self.subdomains.clone().unwrap_or_default().to_list()
    }

    /// Options the layer actually uses on a screen with the given density.
    ///
    /// With `detect_retina` on a retina screen the tiles are shown at half size and the zoom
    /// levels are shifted by one, so tiles of the next zoom level fill the view.
    pub fn adjusted_for_retina(self, retina: bool) -> Self {
        let max_zoom = self.max_zoom.unwrap_or(DEFAULT_MAX_ZOOM);
        if !(self.detect_retina == Some(true) && retina && max_zoom > 0.0) {
            return self;
        }

        let mut min_zoom = self.min_zoom.unwrap_or(0.0);
        let mut max_zoom = max_zoom;
        let mut zoom_offset = self.zoom_offset.unwrap_or(0.0);
        if self.zoom_reverse == Some(true) {
            zoom_offset -= 1.0;
            min_zoom += 1.0;
        } else {
            zoom_offset += 1.0;
            max_zoom -= 1.0;
        }

        Self {
            tile_size: Some(self.tile_size.unwrap_or_default().half()),
            min_zoom: Some(min_zoom.max(0.0)),
            max_zoom: Some(max_zoom),
            zoom_offset: Some(zoom_offset),
            ..self
        }
    }

    /// Zoom level written into tile urls for tiles of the given zoom level.
    pub fn zoom_for_url(&self, tile_zoom: f64) -> f64 {
        let zoom = if self.zoom_reverse == Some(true) {
            self.max_zoom.unwrap_or(DEFAULT_MAX_ZOOM) - tile_zoom
        } else {
            tile_zoom
        };
        zoom + self.zoom_offset.unwrap_or(0.0)
    }

    /// Subdomain of the tile.
    pub fn subdomain(&self, coords: Coords) -> String {
        let list = self.subdomain_list();
        if list.is_empty() {
            return String::new();
        }
        let index = ((coords.x + coords.y).abs() as usize) % list.len();
        list[index].clone()
    }
}

/// What a tile url depends on besides the layer options.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TileUrlContext {
    /// Whether the screen is high density.
    pub retina: bool,
    /// Row of the last tile of the world at the zoom level of the tile. `None` if the map CRS is
    /// infinite, in which case `{-y}` is not available.
    pub max_tile_y: Option<f64>,
}

struct TileUrlData<'a, E> {
    values: Vec<(&'static str, String)>,
    extra: &'a E,
}

impl<E: TemplateData> TemplateData for TileUrlData<'_, E> {
    fn value(&self, key: &str) -> Option<String> {
        self.extra.value(key).or_else(|| {
            self.values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
        })
    }
}

/// Builds the url of a tile from the url template.
///
/// The template can use `{s}` (subdomain), `{x}`, `{y}`, `{z}`, `{r}` (`@2x` on retina screens)
/// and `{-y}` (row counted from the south). Values from `extra` are available too and take
/// precedence over the built-in ones.
///
/// ```
/// use std::collections::HashMap;
/// use carta::carta_types::cartesian::Coords;
/// use carta::layer::{tile_url, TileLayerOptions, TileUrlContext};
///
/// let url = tile_url(
///     "https://{s}.tile.example.org/{z}/{x}/{y}{r}.png?key={key}",
///     Coords::new(3.0, 5.0, 4.0),
///     &TileLayerOptions::default(),
///     &TileUrlContext { retina: true, max_tile_y: Some(15.0) },
///     &HashMap::from([("key".to_string(), "abc".to_string())]),
/// )
/// .unwrap();
/// assert_eq!(url, "https://c.tile.example.org/4/3/5@2x.png?key=abc");
/// ```
pub fn tile_url(
    url_template: &str,
    coords: Coords,
    options: &TileLayerOptions,
    context: &TileUrlContext,
    extra: &impl TemplateData,
) -> Result<String, CartaError> {
    let mut values = vec![
        ("r", if context.retina { "@2x" } else { "" }.to_string()),
        ("s", options.subdomain(coords)),
        ("x", coords.x.to_string()),
        ("y", coords.y.to_string()),
        ("z", options.zoom_for_url(coords.z).to_string()),
    ];

    if let Some(max_y) = context.max_tile_y {
        let inverted_y = (max_y - coords.y).to_string();
        if options.tms == Some(true) {
            values[3].1 = inverted_y.clone();
        }
        values.push(("-y", inverted_y));
    }

    template(url_template, TileUrlData { values, extra })
}

/// Options of a WMS tile layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WmsOptions {
    /// Size of the tiles.
    pub tile_size: Option<TileSize>,
    /// Opacity of the tiles.
    pub opacity: Option<f64>,
    /// Whether tiles are loaded only after panning ends.
    pub update_when_idle: Option<bool>,
    /// Whether tiles are loaded during zoom animation.
    pub update_when_zooming: Option<bool>,
    /// Minimum time between tile loads while panning, in milliseconds.
    pub update_interval: Option<f64>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Z-index of the tile container.
    pub z_index: Option<i32>,
    /// Tiles are only loaded inside these bounds.
    pub bounds: Option<LatLngBoundsExpression>,
    /// Lowest zoom level the layer is shown at.
    pub min_zoom: Option<f64>,
    /// Highest zoom level the layer is shown at.
    pub max_zoom: Option<f64>,
    /// Whether the layer is not repeated across the antimeridian.
    pub no_wrap: Option<bool>,
    /// Map pane the layer is added to.
    pub pane: Option<String>,
    /// Class name added to the tile container.
    pub class_name: Option<String>,
    /// Rows and columns of tiles kept loaded outside the view.
    pub keep_buffer: Option<u32>,
    /// Highest zoom level the server has tiles for.
    pub max_native_zoom: Option<f64>,
    /// Lowest zoom level the server has tiles for.
    pub min_native_zoom: Option<f64>,
    /// Subdomains for `{s}`.
    pub subdomains: Option<Subdomains>,
    /// Url of the image shown in place of tiles that failed to load.
    pub error_tile_url: Option<String>,
    /// Added to the zoom level in tile urls.
    pub zoom_offset: Option<f64>,
    /// Whether the tile rows are numbered from the south.
    pub tms: Option<bool>,
    /// Whether the zoom level in tile urls counts down from `max_zoom`.
    pub zoom_reverse: Option<bool>,
    /// Whether tiles are loaded at double resolution on retina screens.
    pub detect_retina: Option<bool>,
    /// Whether the tiles are requested with CORS.
    pub cross_origin: Option<bool>,
    /// Comma-separated WMS layers.
    pub layers: Option<String>,
    /// Comma-separated WMS styles.
    pub styles: Option<String>,
    /// Image format.
    pub format: Option<String>,
    /// Whether the server returns images with transparency.
    pub transparent: Option<bool>,
    /// WMS service version.
    pub version: Option<String>,
    /// CRS of the requests, the map CRS by default.
    pub crs: Option<CrsCode>,
    /// Whether the request parameter names are uppercase.
    pub uppercase: Option<bool>,
}

impl_options!(WmsOptions {
    tile_size,
    opacity,
    update_when_idle,
    update_when_zooming,
    update_interval,
    attribution,
    z_index,
    bounds,
    min_zoom,
    max_zoom,
    no_wrap,
    pane,
    class_name,
    keep_buffer,
    max_native_zoom,
    min_native_zoom,
    subdomains,
    error_tile_url,
    zoom_offset,
    tms,
    zoom_reverse,
    detect_retina,
    cross_origin,
    layers,
    styles,
    format,
    transparent,
    version,
    crs,
    uppercase,
} validate = check_wms);
impl_options_projection!(WmsOptions => TileLayerOptions {
    tile_size,
    opacity,
    update_when_idle,
    update_when_zooming,
    update_interval,
    attribution,
    z_index,
    bounds,
    min_zoom,
    max_zoom,
    no_wrap,
    pane,
    class_name,
    keep_buffer,
    max_native_zoom,
    min_native_zoom,
    subdomains,
    error_tile_url,
    zoom_offset,
    tms,
    zoom_reverse,
    detect_retina,
    cross_origin,
});

fn check_wms(options: &WmsOptions) -> Result<(), CartaError> {
    check_tile_layer(&TileLayerOptions::from(options))
}

/// Parameters of WMS `GetMap` requests. `layers` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WmsParams {
    /// Image format.
    pub format: Option<String>,
    /// Comma-separated WMS layers.
    pub layers: String,
    /// Request name.
    pub request: Option<String>,
    /// Service name.
    pub service: Option<String>,
    /// Comma-separated WMS styles.
    pub styles: Option<String>,
    /// WMS service version.
    pub version: Option<String>,
    /// Whether the server returns images with transparency.
    pub transparent: Option<bool>,
    /// Width of the requested images.
    pub width: Option<f64>,
    /// Height of the requested images.
    pub height: Option<f64>,
}

impl_options!(WmsParams {
    required: [layers],
    format,
    request,
    service,
    styles,
    version,
    transparent,
    width,
    height,
} validate = has_layers);

fn has_layers(params: &WmsParams) -> Result<(), CartaError> {
    if params.layers.trim().is_empty() {
        Err(CartaError::Configuration("WMS layers are required".into()))
    } else {
        Ok(())
    }
}

impl WmsParams {
    /// Parameters of a layer created with the options: the standard `GetMap` parameters, the
    /// WMS fields of the options and the image size.
    pub fn from_options(options: &WmsOptions, retina: bool) -> Self {
        let tile_size = options.tile_size.unwrap_or_default().to_point();
        let scale = if options.detect_retina == Some(true) && retina {
            2.0
        } else {
            1.0
        };

        Self {
            format: Some(options.format.clone().unwrap_or_else(|| "image/jpeg".into())),
            layers: options.layers.clone().unwrap_or_default(),
            request: Some("GetMap".into()),
            service: Some("WMS".into()),
            styles: Some(options.styles.clone().unwrap_or_default()),
            version: Some(options.version.clone().unwrap_or_else(|| "1.1.1".into())),
            transparent: Some(options.transparent.unwrap_or(false)),
            width: Some(tile_size.x * scale),
            height: Some(tile_size.y * scale),
        }
    }

    /// Version as a number, e.g. `1.3` for `1.3.0`. `0.0` if the version is not set or can not
    /// be read.
    pub fn version_number(&self) -> f64 {
        let Some(version) = &self.version else {
            return 0.0;
        };

        let mut end = 0;
        let mut seen_dot = false;
        for (i, c) in version.char_indices() {
            match c {
                '0'..='9' => end = i + 1,
                '.' if !seen_dot => seen_dot = true,
                _ => break,
            }
        }
        version[..end].parse().unwrap_or(0.0)
    }

    /// Name of the CRS parameter: `crs` since WMS 1.3, `srs` before.
    pub fn projection_key(&self) -> &'static str {
        if self.version_number() >= 1.3 {
            "crs"
        } else {
            "srs"
        }
    }

    /// Query string of the parameters, to be appended to `existing_url`. The CRS code is added
    /// under [`WmsParams::projection_key`].
    pub fn to_query(&self, crs: CrsCode, existing_url: Option<&str>, uppercase: bool) -> String {
        let mut params: Vec<(&str, String)> = vec![];
        let optional = [
            ("service", self.service.clone()),
            ("request", self.request.clone()),
            ("layers", Some(self.layers.clone())),
            ("styles", self.styles.clone()),
            ("format", self.format.clone()),
            ("transparent", self.transparent.map(|t| t.to_string())),
            ("version", self.version.clone()),
            ("width", self.width.map(|w| w.to_string())),
            ("height", self.height.map(|h| h.to_string())),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.push((key, value));
            }
        }
        if let Some(code) = crs.code() {
            params.push((self.projection_key(), code.to_string()));
        }

        get_param_string(params, existing_url, uppercase)
    }
}

/// Builds the url of a WMS tile.
///
/// `tile_bounds` are the bounds of the tile projected into the CRS units. `crs` is the CRS of the
/// layer options, or the map CRS if the options have none.
pub fn wms_tile_url(
    base_url: &str,
    coords: Coords,
    options: &WmsOptions,
    params: &WmsParams,
    crs: CrsCode,
    tile_bounds: &Bounds,
    context: &TileUrlContext,
) -> Result<String, CartaError> {
    let min = tile_bounds.min().ok_or(CartaTypesError::EmptyInput)?;
    let max = tile_bounds.max().ok_or(CartaTypesError::EmptyInput)?;
    let bbox = if params.version_number() >= 1.3 && crs == CrsCode::Epsg4326 {
        [min.y, min.x, max.y, max.x]
    } else {
        [min.x, min.y, max.x, max.y]
    };
    let bbox = bbox.map(|v| v.to_string()).join(",");

    let uppercase = options.uppercase == Some(true);
    let url = tile_url(
        base_url,
        coords,
        &TileLayerOptions::from(options),
        context,
        &serde_json::Map::new(),
    )?;
    let query = params.to_query(crs, Some(&url), uppercase);
    let bbox_key = if uppercase { "&BBOX=" } else { "&bbox=" };

    Ok(format!("{url}{query}{bbox_key}{bbox}"))
}

/// Reports the result of loading a tile: an error message, or the loaded tile element.
pub type DoneCallback = Box<dyn FnOnce(Option<String>, Option<ElementRef>) + Send>;

/// Layer made of tiles.
pub trait GridLayer<B: Backend>: Layer<B> + Stackable + Translucent + ZIndexed {
    /// Element holding the tiles.
    fn container(&self) -> Option<ElementRef>;
    /// Whether some tiles in view are still loading.
    fn is_loading(&self) -> bool;
    /// Reloads all tiles.
    fn redraw(&mut self) -> &mut Self;
    /// Size of the tiles in pixels.
    fn tile_size(&self) -> Point;
    /// Creates the element of a tile. `done` is called once the tile is ready, or right away if
    /// the tile is drawn synchronously.
    fn create_tile(&mut self, coords: Coords, done: DoneCallback) -> ElementRef;
}

/// Grid layer loading images from a url template.
pub trait TileLayer<B: Backend>: GridLayer<B> {
    /// Replaces the url template and reloads the tiles, unless `no_redraw` is set.
    fn set_url(&mut self, url: &str, no_redraw: bool) -> &mut Self;
    /// Url of the tile.
    fn tile_url(&self, coords: Coords) -> Result<String, CartaError>;
    /// Options of the layer.
    fn options(&self) -> &TileLayerOptions;
}

/// Tile layer requesting images from a WMS service.
pub trait WmsTileLayer<B: Backend>: TileLayer<B> {
    /// Changes the request parameters. Only the fields set in `params` change. The tiles are
    /// reloaded unless `no_redraw` is set.
    fn set_params(&mut self, params: WmsParams, no_redraw: bool) -> &mut Self;
    /// Current request parameters.
    fn wms_params(&self) -> &WmsParams;
    /// Options of the layer.
    fn wms_options(&self) -> &WmsOptions;
}
