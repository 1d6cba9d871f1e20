//! Conversion of GeoJSON data into layers and back.

use std::fmt::{Debug, Formatter};

use carta_types::geo::LatLng;
use carta_types::geojson::{Feature, GeoJson, Geometry, Point, Position, Properties};
use carta_types::Nested;
use serde::{Deserialize, Serialize};

use super::{FeatureGroup, LayerOptions, PathOptions, PolylineOptions, Styled};
use crate::backend::Backend;
use crate::error::CartaError;
use crate::event::ObjectId;
use crate::options::{Callback, Options};

/// Creates the layer of a point feature.
pub type PointToLayerFn<B> = dyn Fn(&Feature<Point>, LatLng) -> <B as Backend>::AnyLayer + Send + Sync;
/// Computes the style of a feature.
pub type StyleFn = dyn Fn(Option<&Feature>) -> PathOptions + Send + Sync;
/// Called for every feature once its layer is created.
pub type OnEachFeatureFn<B> = dyn Fn(&Feature, &mut <B as Backend>::AnyLayer) + Send + Sync;
/// Decides whether a feature is shown.
pub type FeatureFilterFn = dyn Fn(&Feature) -> bool + Send + Sync;
/// Converts a GeoJSON position into a geographical point.
pub type CoordsToLatLngFn = dyn Fn(Position) -> LatLng + Send + Sync;

/// Style of the vector layers of a GeoJSON layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeoJsonStyle {
    /// Same style for every feature.
    Static(PathOptions),
    /// Style computed per feature.
    #[serde(skip)]
    Function(Callback<StyleFn>),
}

impl GeoJsonStyle {
    /// Creates a style computed with the function.
    pub fn function(f: impl Fn(Option<&Feature>) -> PathOptions + Send + Sync + 'static) -> Self {
        GeoJsonStyle::Function(Callback(std::sync::Arc::new(f)))
    }

    /// Style of the feature.
    pub fn resolve(&self, feature: Option<&Feature>) -> PathOptions {
        match self {
            GeoJsonStyle::Static(style) => style.clone(),
            GeoJsonStyle::Function(f) => f(feature),
        }
    }
}

impl From<PathOptions> for GeoJsonStyle {
    fn from(value: PathOptions) -> Self {
        GeoJsonStyle::Static(value)
    }
}

/// Options of a GeoJSON layer.
///
/// Only `pane`, `attribution` and a static `style` can be read from JSON. The callbacks are set
/// in code.
#[derive(Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields, bound = "")]
pub struct GeoJsonOptions<B: Backend> {
    /// Map pane the layers are added to.
    pub pane: Option<String>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Creates the layers of point features. Markers are created if not set.
    #[serde(skip)]
    pub point_to_layer: Option<Callback<PointToLayerFn<B>>>,
    /// Style of lines and polygons.
    pub style: Option<GeoJsonStyle>,
    /// Called for every feature once its layer is created, e.g. to bind a popup.
    #[serde(skip)]
    pub on_each_feature: Option<Callback<OnEachFeatureFn<B>>>,
    /// Features it returns `false` for are skipped.
    #[serde(skip)]
    pub filter: Option<Callback<FeatureFilterFn>>,
    /// Converts positions into points, [`coords_to_lat_lng`] if not set.
    #[serde(skip)]
    pub coords_to_lat_lng: Option<Callback<CoordsToLatLngFn>>,
}

impl<B: Backend> Default for GeoJsonOptions<B> {
    fn default() -> Self {
        Self {
            pane: None,
            attribution: None,
            point_to_layer: None,
            style: None,
            on_each_feature: None,
            filter: None,
            coords_to_lat_lng: None,
        }
    }
}

impl<B: Backend> Clone for GeoJsonOptions<B> {
    fn clone(&self) -> Self {
        Self {
            pane: self.pane.clone(),
            attribution: self.attribution.clone(),
            point_to_layer: self.point_to_layer.clone(),
            style: self.style.clone(),
            on_each_feature: self.on_each_feature.clone(),
            filter: self.filter.clone(),
            coords_to_lat_lng: self.coords_to_lat_lng.clone(),
        }
    }
}

impl<B: Backend> PartialEq for GeoJsonOptions<B> {
    fn eq(&self, other: &Self) -> bool {
        self.pane == other.pane
            && self.attribution == other.attribution
            && self.point_to_layer == other.point_to_layer
            && self.style == other.style
            && self.on_each_feature == other.on_each_feature
            && self.filter == other.filter
            && self.coords_to_lat_lng == other.coords_to_lat_lng
    }
}

impl<B: Backend> Debug for GeoJsonOptions<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoJsonOptions")
            .field("pane", &self.pane)
            .field("attribution", &self.attribution)
            .field("point_to_layer", &self.point_to_layer)
            .field("style", &self.style)
            .field("on_each_feature", &self.on_each_feature)
            .field("filter", &self.filter)
            .field("coords_to_lat_lng", &self.coords_to_lat_lng)
            .finish()
    }
}

impl<B: Backend> Options for GeoJsonOptions<B> {
    fn merged(self, other: Self) -> Self {
        Self {
            pane: other.pane.or(self.pane),
            attribution: other.attribution.or(self.attribution),
            point_to_layer: other.point_to_layer.or(self.point_to_layer),
            style: other.style.or(self.style),
            on_each_feature: other.on_each_feature.or(self.on_each_feature),
            filter: other.filter.or(self.filter),
            coords_to_lat_lng: other.coords_to_lat_lng.or(self.coords_to_lat_lng),
        }
    }
}

impl<B: Backend> From<&GeoJsonOptions<B>> for LayerOptions {
    fn from(value: &GeoJsonOptions<B>) -> Self {
        Self {
            pane: value.pane.clone(),
            attribution: value.attribution.clone(),
        }
    }
}

impl<B: Backend> GeoJsonOptions<B> {
    /// Sets the function creating the layers of point features.
    pub fn with_point_to_layer(
        self,
        f: impl Fn(&Feature<Point>, LatLng) -> B::AnyLayer + Send + Sync + 'static,
    ) -> Self {
        Self {
            point_to_layer: Some(Callback(std::sync::Arc::new(f))),
            ..self
        }
    }

    /// Sets the function called for every created layer.
    pub fn with_on_each_feature(
        self,
        f: impl Fn(&Feature, &mut B::AnyLayer) + Send + Sync + 'static,
    ) -> Self {
        Self {
            on_each_feature: Some(Callback(std::sync::Arc::new(f))),
            ..self
        }
    }

    /// Sets the feature filter.
    pub fn with_filter(self, f: impl Fn(&Feature) -> bool + Send + Sync + 'static) -> Self {
        Self {
            filter: Some(Callback(std::sync::Arc::new(f))),
            ..self
        }
    }

    /// Sets the position conversion.
    pub fn with_coords_to_lat_lng(self, f: impl Fn(Position) -> LatLng + Send + Sync + 'static) -> Self {
        Self {
            coords_to_lat_lng: Some(Callback(std::sync::Arc::new(f))),
            ..self
        }
    }

    fn convert(&self, position: Position) -> LatLng {
        match &self.coords_to_lat_lng {
            Some(f) => f(position),
            None => coords_to_lat_lng(position),
        }
    }

    fn path_options(&self) -> PolylineOptions {
        PolylineOptions {
            pane: self.pane.clone(),
            attribution: self.attribution.clone(),
            ..Default::default()
        }
    }
}

/// Converts a GeoJSON position (longitude first) into a geographical point.
pub fn coords_to_lat_lng(position: Position) -> LatLng {
    LatLng {
        lat: position.y,
        lng: position.x,
        alt: position.z,
    }
}

/// Converts nested positions keeping the nesting. `convert` is used in place of
/// [`coords_to_lat_lng`] if given.
pub fn coords_to_lat_lngs(
    coords: impl Into<Nested<Position>>,
    convert: Option<&dyn Fn(Position) -> LatLng>,
) -> Nested<LatLng> {
    match convert {
        Some(f) => coords.into().map(f),
        None => coords.into().map(coords_to_lat_lng),
    }
}

/// Converts a geographical point into a GeoJSON position.
pub fn lat_lng_to_coords(lat_lng: LatLng) -> Position {
    Position {
        x: lat_lng.lng,
        y: lat_lng.lat,
        z: lat_lng.alt,
    }
}

/// Converts nested points keeping the nesting. If `closed` is set, the first position of every
/// ring is repeated at its end, as GeoJSON polygons require.
pub fn lat_lngs_to_coords(lat_lngs: &Nested<LatLng>, closed: bool) -> Nested<Position> {
    let ring = |points: &Vec<LatLng>| {
        let mut coords: Vec<Position> = points.iter().copied().map(lat_lng_to_coords).collect();
        if closed {
            if let Some(first) = coords.first().copied() {
                coords.push(first);
            }
        }
        coords
    };

    match lat_lngs {
        Nested::Flat(points) => Nested::Flat(ring(points)),
        Nested::Rings(rings) => Nested::Rings(rings.iter().map(ring).collect()),
        Nested::Multi(polygons) => Nested::Multi(
            polygons
                .iter()
                .map(|rings| rings.iter().map(ring).collect())
                .collect(),
        ),
    }
}

/// A bare geometry or a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryOrFeature {
    /// Bare geometry.
    Geometry(Geometry),
    /// Feature.
    Feature(Feature),
}

impl From<Geometry> for GeometryOrFeature {
    fn from(value: Geometry) -> Self {
        GeometryOrFeature::Geometry(value)
    }
}

impl From<Feature> for GeometryOrFeature {
    fn from(value: Feature) -> Self {
        GeometryOrFeature::Feature(value)
    }
}

/// Wraps a bare geometry into a feature with empty properties. Features are returned as they
/// are.
pub fn as_feature(object: impl Into<GeometryOrFeature>) -> Feature {
    match object.into() {
        GeometryOrFeature::Feature(feature) => feature,
        GeometryOrFeature::Geometry(geometry) => {
            Feature::new(geometry).with_properties(Properties::new())
        }
    }
}

fn point_layer<B: Backend>(
    backend: &B,
    feature: &Feature,
    position: Position,
    options: &GeoJsonOptions<B>,
) -> B::AnyLayer {
    let lat_lng = options.convert(position);
    match &options.point_to_layer {
        Some(f) => {
            let point = feature.clone().map_geometry(|_| Point::new(position));
            f(&point, lat_lng)
        }
        None => backend.marker(lat_lng, None).into(),
    }
}

/// Creates the layer of a feature.
///
/// Points become markers (or whatever `point_to_layer` creates), line strings polylines, polygons
/// polygons, and multi points and geometry collections feature groups of those. Returns `None`
/// for features without geometry.
pub fn geometry_to_layer<B: Backend>(
    backend: &B,
    feature: &Feature,
    options: &GeoJsonOptions<B>,
) -> Option<B::AnyLayer> {
    let Some(geometry) = &feature.geometry else {
        log::debug!("Skipping GeoJSON feature {:?} without geometry", feature.id);
        return None;
    };

    let convert = |p: Position| options.convert(p);
    let layer = match geometry {
        Geometry::Point(point) => point_layer(backend, feature, point.coordinates, options),
        Geometry::MultiPoint(points) => {
            let layers = points
                .coordinates
                .iter()
                .map(|&p| point_layer(backend, feature, p, options))
                .collect();
            backend.feature_group(layers).into()
        }
        Geometry::LineString(line) => backend
            .polyline(
                coords_to_lat_lngs(line.coordinates.clone(), Some(&convert)),
                Some(options.path_options()),
            )
            .into(),
        Geometry::MultiLineString(lines) => backend
            .polyline(
                coords_to_lat_lngs(lines.coordinates.clone(), Some(&convert)),
                Some(options.path_options()),
            )
            .into(),
        Geometry::Polygon(polygon) => backend
            .polygon(
                coords_to_lat_lngs(polygon.coordinates.clone(), Some(&convert)),
                Some(options.path_options()),
            )
            .into(),
        Geometry::MultiPolygon(polygons) => backend
            .polygon(
                coords_to_lat_lngs(polygons.coordinates.clone(), Some(&convert)),
                Some(options.path_options()),
            )
            .into(),
        Geometry::GeometryCollection(collection) => {
            let layers = collection
                .geometries
                .iter()
                .filter_map(|g| {
                    let mut member = Feature::new(g.clone());
                    member.properties = feature.properties.clone();
                    geometry_to_layer(backend, &member, options)
                })
                .collect();
            backend.feature_group(layers).into()
        }
    };

    Some(layer)
}

/// Creates the layers of all features of the GeoJSON object.
///
/// Feature collections are flattened and features rejected by the filter are skipped. For every
/// created layer `reset_style` is called first, then the `on_each_feature` callback. The layers
/// are returned with the features they were created from.
pub fn features_to_layers<B: Backend>(
    backend: &B,
    data: impl Into<GeoJson>,
    options: &GeoJsonOptions<B>,
    mut reset_style: impl FnMut(&Feature, &mut B::AnyLayer),
) -> Vec<(Feature, B::AnyLayer)> {
    let features = match data.into() {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![as_feature(geometry)],
    };

    let mut layers = vec![];
    for feature in features {
        if let Some(filter) = &options.filter {
            if !filter(&feature) {
                continue;
            }
        }

        let Some(mut layer) = geometry_to_layer(backend, &feature, options) else {
            continue;
        };

        reset_style(&feature, &mut layer);
        if let Some(on_each_feature) = &options.on_each_feature {
            on_each_feature(&feature, &mut layer);
        }
        layers.push((feature, layer));
    }

    layers
}

/// Feature group created from GeoJSON data.
pub trait GeoJsonLayer<B: Backend>: FeatureGroup<B> {
    /// Adds the layers of all features of the data.
    fn add_data(&mut self, data: impl Into<GeoJson>) -> &mut Self;
    /// Restores the style of the layer to the one given by the layer options.
    fn reset_style(&mut self, layer: ObjectId) -> &mut Self;
    /// Changes the style of all vector layers.
    fn set_geo_json_style(&mut self, style: GeoJsonStyle) -> &mut Self;
    /// Options of the layer.
    fn options(&self) -> &GeoJsonOptions<B>;
}

/// Applies the style of the feature to the layer, if the layer can be styled.
pub fn apply_style<L: Styled>(layer: &mut L, feature: Option<&Feature>, style: &GeoJsonStyle) {
    layer.set_style(style.resolve(feature));
}

/// Reads GeoJSON data from a JSON string.
pub fn parse_geo_json(json: &str) -> Result<GeoJson, CartaError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use carta_types::geojson::LineString;
    use serde_json::json;

    use super::*;

    #[test]
    fn positions_are_longitude_first() {
        assert_eq!(
            coords_to_lat_lng(Position::new(30.5, 50.4)),
            LatLng::new(50.4, 30.5)
        );
        assert_eq!(
            coords_to_lat_lng(Position::with_z(1.0, 2.0, 3.0)),
            LatLng::with_alt(2.0, 1.0, 3.0)
        );
        assert_eq!(
            lat_lng_to_coords(LatLng::new(50.4, 30.5)),
            Position::new(30.5, 50.4)
        );
    }

    #[test]
    fn nesting_is_kept() {
        let rings = vec![vec![Position::new(0.0, 0.0), Position::new(1.0, 0.0)]];
        let lat_lngs = coords_to_lat_lngs(rings, None);
        assert_eq!(lat_lngs.depth(), 2);

        let swap = |p: Position| LatLng::new(p.x, p.y);
        let swapped = coords_to_lat_lngs(vec![Position::new(5.0, 6.0)], Some(&swap));
        assert_eq!(swapped, Nested::Flat(vec![LatLng::new(5.0, 6.0)]));
    }

    #[test]
    fn closed_rings_repeat_first_point() {
        let ring = Nested::Rings(vec![vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
        ]]);
        let Nested::Rings(coords) = lat_lngs_to_coords(&ring, true) else {
            panic!("nesting changed");
        };
        assert_eq!(coords[0].len(), 4);
        assert_eq!(coords[0][0], coords[0][3]);

        let open = lat_lngs_to_coords(&ring, false);
        assert_eq!(open.iter().count(), 3);
        assert_eq!(
            lat_lngs_to_coords(&Nested::Flat(vec![]), true),
            Nested::Flat(vec![])
        );
    }

    #[test]
    fn geometry_is_wrapped_into_feature() {
        let line: Geometry = LineString::new(vec![Position::new(0.0, 0.0)]).into();
        let feature = as_feature(line.clone());
        assert_eq!(feature.geometry, Some(line));
        assert_eq!(feature.properties, Some(Properties::new()));

        let existing: Feature =
            Feature::new(Geometry::from(Point::new(Position::new(1.0, 1.0)))).with_id(7u64);
        assert_eq!(as_feature(existing.clone()), existing);
    }

    #[test]
    fn static_and_computed_styles() {
        let style = GeoJsonStyle::from(PathOptions {
            color: Some("red".into()),
            ..Default::default()
        });
        assert_eq!(style.resolve(None).color.as_deref(), Some("red"));

        let by_party = GeoJsonStyle::function(|feature| {
            let color = match feature.and_then(|f| f.property("party")) {
                Some(v) if v == "Republican" => "#ff0000",
                _ => "#0000ff",
            };
            PathOptions {
                color: Some(color.into()),
                ..Default::default()
            }
        });
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": null,
            "properties": {"party": "Republican"}
        }))
        .unwrap();
        assert_eq!(by_party.resolve(Some(&feature)).color.as_deref(), Some("#ff0000"));
        assert_eq!(by_party.resolve(None).color.as_deref(), Some("#0000ff"));
    }

    #[test]
    fn parses_any_object() {
        let data = parse_geo_json(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(matches!(data, GeoJson::FeatureCollection(_)));
        assert!(parse_geo_json(r#"{"type": "Circle"}"#).is_err());
    }
}
