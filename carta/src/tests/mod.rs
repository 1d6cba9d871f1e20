use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use carta_types::cartesian::{Coords, Point};
use carta_types::geo::{LatLng, LatLngBounds};
use carta_types::geojson::{Feature, GeoJson, Geometry};
use carta_types::{CartaTypesError, Nested};
use serde_json::json;

use crate::backend::Backend;
use crate::control::{
    Control, ControlPosition, LayersControl, LayersControlOptions, LayersObject, Prefix,
};
use crate::dom::{DomEvent, DomListeners, DomUtil, ElementRef, NativeEventRef};
use crate::error::CartaError;
use crate::event::{handler, Event, EventType, Evented, TileErrorEvent};
use crate::layer::{
    Bounded, CircleMarker, CircleMarkerOptions, DivOverlay, False, GeoJsonExport, GeoJsonLayer,
    GeoJsonOptions, GeoJsonStyle, GridLayer, Layer, LayerGroup, LayerTarget, Marker, MarkerOptions,
    Path, PathGeometry, PathOptions, PointLocated, Polyline, PopupBindable, Rectangle, Styled,
    TileLayer, TileLayerOptions, TooltipBindable, WmsOptions, WmsParams, WmsTileLayer,
};
use crate::map::{Handler, Map, MapHandlerName, MapOptions};
use crate::options::Options;
use crate::util::Scheduler;


use runtime::{AnyTestLayer, TestBackend, MAP_SIZE};

fn counter(map: &mut impl Evented, event_type: EventType) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    map.on((
        event_type,
        handler(move |_| {
            c.fetch_add(1, Ordering::Relaxed);
        }),
    ));
    count
}

/// Styles any path, whatever its concrete kind.
fn highlight<B: Backend>(path: &mut impl Path<B>) {
    path.set_style(PathOptions {
        color: Some("yellow".into()),
        weight: Some(5.0),
        ..Default::default()
    })
    .bring_to_front();
}

fn total_points<B: Backend>(line: &impl Polyline<B>) -> usize {
    line.lat_lngs().iter().count()
}

#[test]
fn every_path_kind_shares_path_capabilities() {
    let backend = TestBackend::new();

    let mut line = backend.polyline(
        vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)].into(),
        Some(crate::layer::PolylineOptions {
            color: Some("red".into()),
            ..Default::default()
        }),
    );
    let mut rectangle = backend.rectangle([[0.0, 0.0], [2.0, 3.0]], None);
    let mut circle = backend.circle_marker(
        [10.0, 20.0],
        Some(CircleMarkerOptions {
            radius: Some(4.0),
            ..Default::default()
        }),
    );

    highlight(&mut line);
    highlight(&mut rectangle);
    highlight(&mut circle);

    assert_eq!(line.style().color.as_deref(), Some("yellow"));
    assert_eq!(line.style().weight, Some(5.0));
    assert_eq!(rectangle.style().color.as_deref(), Some("yellow"));
    assert_eq!(circle.style().color.as_deref(), Some("yellow"));
    assert_eq!(circle.radius(), 4.0);

    assert_eq!(total_points(&line), 2);
    assert_eq!(total_points(&rectangle), 4);
    assert_eq!(line.options().color.as_deref(), Some("red"));
}

#[test]
fn polyline_geometry_is_editable() {
    let backend = TestBackend::new();
    let mut line = backend.polyline(Nested::Flat(vec![]), None);
    assert!(line.is_empty());
    assert_eq!(line.center(), None);

    line.add_lat_lng(LatLng::new(0.0, 0.0))
        .add_lat_lng(LatLng::new(2.0, 4.0));
    assert!(!line.is_empty());
    assert_eq!(line.center(), Some(LatLng::new(1.0, 2.0)));
    assert_eq!(line.redraws, 2);

    line.set_lat_lngs(vec![vec![LatLng::new(0.0, 0.0)], vec![LatLng::new(5.0, 5.0)]].into());
    assert_eq!(line.lat_lngs().depth(), 2);
    assert!(line.bounds().contains(LatLng::new(3.0, 3.0)));
}

#[test]
fn rectangle_bounds_are_its_corners() {
    let backend = TestBackend::new();
    let mut rectangle = backend.rectangle([[1.0, 1.0], [0.0, 0.0]], None);
    let bounds = rectangle.bounds();
    assert_eq!(bounds.south_west(), Some(LatLng::new(0.0, 0.0)));
    assert_eq!(bounds.north_east(), Some(LatLng::new(1.0, 1.0)));

    rectangle.set_bounds(LatLngBounds::new([10.0, 10.0], [20.0, 30.0]));
    assert_eq!(rectangle.bounds().north_east(), Some(LatLng::new(20.0, 30.0)));

    let exported = rectangle.to_geo_json();
    let Some(Geometry::Polygon(polygon)) = exported.geometry else {
        panic!("rectangle did not export a polygon");
    };
    assert_eq!(polygon.coordinates[0].len(), 5);
    assert_eq!(polygon.coordinates[0][0], polygon.coordinates[0][4]);
}

#[test]
fn circle_bounds_depend_on_radius_units() {
    let backend = TestBackend::new();
    let options = CircleMarkerOptions {
        radius: Some(1000.0),
        ..Default::default()
    };
    let marker = backend.circle_marker([50.0, 30.0], Some(options.clone()));
    let circle = backend.circle([50.0, 30.0], Some(options));

    let marker_bounds = marker.bounds();
    assert_eq!(marker_bounds.south_west(), marker_bounds.north_east());

    let circle_bounds = circle.bounds();
    let (Some(south), Some(north)) = (circle_bounds.south(), circle_bounds.north()) else {
        panic!("empty circle bounds");
    };
    // 2 km of latitude.
    assert_abs_diff_eq!(north - south, 0.018, epsilon = 0.001);
}

#[test]
fn marker_capabilities() {
    let backend = TestBackend::new();
    let mut marker = backend.marker(
        (50.0, 30.0),
        Some(MarkerOptions {
            draggable: Some(true),
            title: Some("Kyiv".into()),
            ..Default::default()
        }),
    );

    assert_eq!(marker.lat_lng(), LatLng::new(50.0, 30.0));
    marker.set_lat_lng([51.0, 31.0]).set_z_index_offset(100.0);
    assert_eq!(marker.lat_lng(), LatLng::new(51.0, 31.0));
    assert_eq!(marker.z_index_offset, 100.0);
    assert_eq!(marker.options().title.as_deref(), Some("Kyiv"));

    let dragging = marker.dragging().expect("draggable marker has a handler");
    dragging.enable();
    assert!(dragging.hooked);
    dragging.disable();
    assert!(!dragging.enabled() && !dragging.hooked);

    let exported = marker.to_geo_json();
    assert_eq!(
        serde_json::to_value(&exported).unwrap(),
        json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [31.0, 51.0]},
            "properties": {}
        })
    );
}

#[test]
fn popup_follows_the_layer() {
    let backend = TestBackend::new();
    let mut marker = backend.marker([50.0, 30.0], None);
    assert!(!marker.is_popup_open());

    marker.bind_popup("<b>Hello</b>", None).open_popup(None);
    assert!(marker.is_popup_open());
    let popup = marker.popup().expect("popup is bound");
    assert_eq!(popup.lat_lng(), Some(LatLng::new(50.0, 30.0)));
    assert_eq!(popup.source, Some(marker.id()));

    marker.toggle_popup();
    assert!(!marker.is_popup_open());

    marker.set_popup_content("<i>Bye</i>");
    let content = marker
        .popup()
        .and_then(|p| p.content())
        .map(|c| c.resolve(marker.id()));
    assert_eq!(content, Some(crate::layer::Content::Html("<i>Bye</i>".into())));

    marker.unbind_popup();
    assert!(marker.popup().is_none());
}

#[test]
fn tooltip_opens_at_path_center() {
    let backend = TestBackend::new();
    let mut line = backend.polyline(
        vec![LatLng::new(0.0, 0.0), LatLng::new(10.0, 10.0)].into(),
        None,
    );
    line.bind_tooltip("road", None)
        .open_tooltip(None);

    let tooltip = line.tooltip().expect("tooltip is bound");
    assert!(tooltip.is_open());
    assert_eq!(tooltip.lat_lng(), Some(LatLng::new(5.0, 5.0)));
    assert_eq!(tooltip.opacity, 0.9);

    line.open_tooltip(Some([1.0, 2.0].into()));
    assert_eq!(line.tooltip().and_then(|t| t.lat_lng()), Some(LatLng::new(1.0, 2.0)));
}

#[test]
fn map_adds_layers_once_and_fires_events() {
    let _ = env_logger::builder().is_test(true).try_init();

    let backend = TestBackend::new();
    let mut map = backend.test_map(MapOptions::default());
    let added = counter(&mut map, EventType::LayerAdd);
    let removed = counter(&mut map, EventType::LayerRemove);

    let mut marker = backend.marker([0.0, 0.0], None);
    marker.add_to(LayerTarget::Map(&mut map));
    map.add_layer(marker.clone());
    assert!(map.has_layer(marker.id()));
    assert_eq!(added.load(Ordering::Relaxed), 1);

    let mut on_map = 0;
    map.each_layer(&mut |layer| {
        if layer.as_point().is_some_and(|p| p.is_on_map()) {
            on_map += 1;
        }
    });
    assert_eq!(on_map, 1);

    marker.remove_from(&mut map);
    assert!(!map.has_layer(marker.id()));
    assert_eq!(removed.load(Ordering::Relaxed), 1);

    map.remove_layer(marker.id());
    assert_eq!(removed.load(Ordering::Relaxed), 1);
}

#[test]
fn once_listeners_fire_once() {
    let backend = TestBackend::new();
    let mut marker = backend.marker([0.0, 0.0], None);
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    marker.once((
        EventType::Click,
        handler(move |_| {
            c.fetch_add(1, Ordering::Relaxed);
        }),
    ));
    assert!(marker.listens(&EventType::Click));

    let id = marker.id();
    marker.fire(Event::base(EventType::Click, id), false);
    marker.fire(Event::base(EventType::Click, id), false);
    assert_eq!(count.load(Ordering::Relaxed), 1);
    assert!(!marker.listens(&EventType::Click));
}

#[test]
fn attributions_follow_layers() {
    let backend = TestBackend::new();
    let mut map = backend.test_map(MapOptions::default());
    let tiles = backend.tile_layer(
        "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        Some(TileLayerOptions {
            attribution: Some("&copy; OpenStreetMap".into()),
            ..Default::default()
        }),
    );
    let id = tiles.id();

    map.add_layer(tiles);
    let control = map.attribution_control.as_ref().expect("control is added");
    assert!(control.attribution_html().ends_with("&copy; OpenStreetMap"));

    map.remove_layer(id);
    let control = map.attribution_control.as_mut().expect("control is added");
    assert!(!control.attribution_html().contains("OpenStreetMap"));

    crate::control::AttributionControl::set_prefix(control, Prefix::Disabled(False));
    assert_eq!(control.attribution_html(), "");
}

#[test]
fn map_without_default_controls() {
    let backend = TestBackend::new();
    let mut map = backend.test_map(MapOptions {
        zoom_control: Some(false),
        attribution_control: Some(false),
        dragging: Some(false),
        ..Default::default()
    });
    assert!(map.zoom_control().is_none());
    assert!(map.attribution_control.is_none());

    let dragging = map.handler(MapHandlerName::Dragging).expect("handler exists");
    assert!(!dragging.enabled());
    let scroll = map.handler(MapHandlerName::ScrollWheelZoom).expect("handler exists");
    assert!(scroll.enabled());
}

#[test]
fn map_requires_existing_container() {
    let backend = TestBackend::new();
    assert!(matches!(backend.map("missing", None), Err(CartaError::NotFound)));
    assert!(matches!(
        backend.map(
            "map",
            Some(MapOptions {
                min_zoom: Some(10.0),
                max_zoom: Some(2.0),
                ..Default::default()
            })
        ),
        Err(CartaError::Configuration(_))
    ));
}

#[test]
fn view_is_clamped_to_zoom_limits() {
    let backend = TestBackend::new();
    let mut map = backend.test_map(MapOptions {
        center: Some([10.0, 20.0].into()),
        zoom: Some(3.0),
        max_zoom: Some(5.0),
        ..Default::default()
    });
    let zoom_ends = counter(&mut map, EventType::ZoomEnd);
    let move_ends = counter(&mut map, EventType::MoveEnd);

    map.zoom_in(None, None);
    assert_eq!(map.zoom(), 4.0);
    map.set_zoom(12.0, None);
    assert_eq!(map.zoom(), 5.0);
    map.set_max_zoom(8.0).set_min_zoom(6.0);
    assert_eq!(map.zoom(), 6.0);
    map.pan_to([0.0, 0.0], None);
    assert_eq!(map.center(), LatLng::new(0.0, 0.0));

    assert_eq!(zoom_ends.load(Ordering::Relaxed), 3);
    assert_eq!(move_ends.load(Ordering::Relaxed), 4);
}

#[test]
fn fit_bounds_shows_the_whole_area() {
    let backend = TestBackend::new();
    let mut map = backend.test_map(MapOptions::default());

    let bounds = LatLngBounds::new([0.0, 0.0], [10.0, 20.0]);
    map.fit_bounds(bounds, None).unwrap();
    assert!(map.bounds().contains(bounds));
    assert_eq!(map.center(), LatLng::new(5.0, 10.0));

    assert_matches!(
        map.fit_bounds(LatLngBounds::default(), None),
        Err(CartaError::Types(CartaTypesError::EmptyInput))
    );
}

#[test]
fn coordinate_conversions_round_trip() {
    let backend = TestBackend::new();
    let map = backend.test_map(MapOptions {
        center: Some([0.0, 0.0].into()),
        zoom: Some(1.0),
        ..Default::default()
    });

    assert_eq!(map.project([10.0, 20.0], Some(0.0)), Point::new(20.0, -10.0));
    assert_eq!(map.unproject([20.0, -10.0], Some(0.0)), LatLng::new(10.0, 20.0));

    let center = map.lat_lng_to_container_point(LatLng::new(0.0, 0.0));
    assert_eq!(center, MAP_SIZE.divide_by(2.0));
    assert_eq!(map.container_point_to_lat_lng(center), LatLng::new(0.0, 0.0));

    let event = NativeEventRef(1);
    backend.dom.set_pointer(event, Point::new(220.0, 150.0));
    assert_eq!(map.mouse_event_to_lat_lng(event), LatLng::new(0.0, 10.0));
}

#[test]
fn panning_the_pane_moves_layer_points() {
    let backend = TestBackend::new();
    let mut map = backend.test_map(MapOptions {
        zoom: Some(2.0),
        ..Default::default()
    });

    let before = map.lat_lng_to_layer_point(LatLng::new(0.0, 0.0));
    map.move_pane([10.0, 5.0]);
    let after = map.lat_lng_to_layer_point(LatLng::new(0.0, 0.0));
    assert_eq!(before.subtract(after), Point::new(10.0, 5.0));
    assert_eq!(map.map_pane_position(), Point::new(10.0, 5.0));

    map.resize(Point::new(800.0, 600.0));
    assert_eq!(map.size(), Point::new(800.0, 600.0));
    assert_eq!(map.pixel_bounds().size(), Some(Point::new(800.0, 600.0)));
}

#[test]
fn groups_hold_any_layer() {
    let backend = TestBackend::new();
    let marker = backend.marker([1.0, 1.0], None);
    let line = backend.polyline(
        vec![LatLng::new(0.0, 0.0), LatLng::new(4.0, 2.0)].into(),
        None,
    );
    let marker_id = marker.id();

    let mut group = backend.feature_group(vec![marker.into(), line.into()]);
    assert_eq!(group.layers().len(), 2);
    assert!(group.has_layer(marker_id));
    assert_eq!(group.layer_id(group.layer(marker_id).expect("layer is in group")), marker_id);

    let bounds = group.bounds();
    assert_eq!(bounds.south_west(), Some(LatLng::new(0.0, 0.0)));
    assert_eq!(bounds.north_east(), Some(LatLng::new(4.0, 2.0)));

    group.set_style(PathOptions {
        opacity: Some(0.5),
        ..Default::default()
    });
    let mut styled = 0;
    group.each_layer(&mut |layer| {
        if layer.style().and_then(|s| s.opacity) == Some(0.5) {
            styled += 1;
        }
    });
    assert_eq!(styled, 2);

    let GeoJson::FeatureCollection(collection) = group.to_geo_json() else {
        panic!("group did not export a collection");
    };
    assert_eq!(collection.features.len(), 2);

    group.remove_layer(marker_id);
    assert!(!group.has_layer(marker_id));
    group.clear_layers();
    assert!(group.layers().is_empty());
}

#[test]
fn groups_can_be_nested_and_added_to_map() {
    let backend = TestBackend::new();
    let mut map = backend.test_map(MapOptions::default());
    let inner = backend.layer_group(vec![backend.marker([0.0, 0.0], None).into()], None);
    let mut outer = backend.layer_group(vec![], None);
    let mut inner_layer: AnyTestLayer = inner.into();
    inner_layer.add_to(LayerTarget::Group(&mut outer));
    assert_eq!(outer.layers().len(), 1);
    assert!(outer.layers()[0].as_group().is_some());

    outer.set_z_index(3);
    assert_eq!(outer.z_index, Some(3));

    let id = outer.id();
    map.add_layer(outer);
    assert!(map.has_layer(id));
}

#[test]
fn geo_json_layer_creates_layers_per_geometry_type() {
    let _ = env_logger::builder().is_test(true).try_init();

    let data: GeoJson = serde_json::from_value(json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 1,
                "geometry": {"type": "Point", "coordinates": [30.5, 50.4]},
                "properties": {"name": "Kyiv"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
                "properties": {"kind": "road"}
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                },
                "properties": null
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "Point", "coordinates": [1.0, 2.0]},
                        {"type": "Point", "coordinates": [3.0, 4.0]}
                    ]
                },
                "properties": {}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"skipped": true}
            }
        ]
    }))
    .unwrap();

    let created = Arc::new(AtomicUsize::new(0));
    let c = created.clone();
    let options = GeoJsonOptions::<TestBackend>::default()
        .with_on_each_feature(move |_, _| {
            c.fetch_add(1, Ordering::Relaxed);
        });
    let layer = backend_geo_json(Some(data), options);

    assert_eq!(created.load(Ordering::Relaxed), 4);
    let layers = layer.layers();
    assert_eq!(layers.len(), 4);
    assert!(layers[0].as_point().is_some());
    assert!(layers[1].as_path().is_some_and(|p| !p.closed));
    assert!(layers[2].as_path().is_some_and(|p| p.closed));
    assert_eq!(layers[3].as_group().map(|g| g.layers().len()), Some(2));

    let kyiv = layer.feature_of(layers[0].id()).expect("feature is kept");
    assert_eq!(kyiv.property("name"), Some(&json!("Kyiv")));
    let point = layers[0].as_point().expect("point layer");
    assert_eq!(point.lat_lng(), LatLng::new(50.4, 30.5));
    assert_eq!(
        point.feature().and_then(|f| f.id.clone()),
        Some(carta_types::geojson::FeatureId::Number(1.into()))
    );
}

fn backend_geo_json(data: Option<GeoJson>, options: GeoJsonOptions<TestBackend>) -> runtime::TestGroup {
    TestBackend::new().geo_json(data, Some(options))
}

#[test]
fn geo_json_filter_and_point_to_layer() {
    let backend = TestBackend::new();
    let point_backend = backend.clone();
    let options = GeoJsonOptions::<TestBackend>::default()
        .with_filter(|feature| feature.property("visible") != Some(&json!(false)))
        .with_point_to_layer(move |_, lat_lng| {
            point_backend
                .circle_marker(
                    lat_lng,
                    Some(CircleMarkerOptions {
                        radius: Some(8.0),
                        ..Default::default()
                    }),
                )
                .into()
        });
    let mut layer = backend.geo_json(None, Some(options));

    let visible = Feature::new(Geometry::from(carta_types::geojson::Point::new(
        carta_types::geojson::Position::new(1.0, 2.0),
    )))
    .with_properties(serde_json::Map::new());
    let mut hidden = visible.clone();
    hidden.properties = Some(
        json!({"visible": false})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    );

    layer.add_data(visible).add_data(hidden);
    assert_eq!(layer.layers().len(), 1);
    let point = layer.layers()[0].as_point().expect("circle marker");
    assert_eq!(point.radius, 8.0);
    assert_eq!(point.lat_lng, LatLng::new(2.0, 1.0));
}

#[test]
fn geo_json_style_is_applied_and_reset() {
    let backend = TestBackend::new();
    let style = GeoJsonStyle::function(|feature| {
        let color = match feature.and_then(|f| f.property("kind")) {
            Some(kind) if kind == "road" => "black",
            _ => "green",
        };
        PathOptions {
            color: Some(color.into()),
            ..Default::default()
        }
    });
    let options = GeoJsonOptions {
        style: Some(style),
        ..Default::default()
    };
    let data: GeoJson = serde_json::from_value(json!({
        "type": "Feature",
        "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
        "properties": {"kind": "road"}
    }))
    .unwrap();

    let mut layer = backend.geo_json(Some(data), Some(options));
    let id = layer.layers()[0].id();
    let color = |layer: &runtime::TestGroup| {
        layer.layers()[0]
            .style()
            .and_then(|s| s.color.clone())
    };
    assert_eq!(color(&layer).as_deref(), Some("black"));

    layer.set_geo_json_style(GeoJsonStyle::from(PathOptions {
        color: Some("red".into()),
        ..Default::default()
    }));
    assert_eq!(color(&layer).as_deref(), Some("red"));

    layer.reset_style(id);
    assert_eq!(color(&layer).as_deref(), Some("black"));
}

#[test]
fn tile_layer_urls() {
    let backend = TestBackend::new();
    let mut tiles = backend.tile_layer(
        "https://{s}.tile.example.org/{z}/{x}/{y}.png",
        Some(TileLayerOptions {
            subdomains: Some(crate::layer::Subdomains::Chars("ab".into())),
            ..Default::default()
        }),
    );
    assert_eq!(
        tiles.tile_url(Coords::new(1.0, 2.0, 3.0)).unwrap(),
        "https://b.tile.example.org/3/1/2.png"
    );
    assert_eq!(tiles.tile_size(), Point::new(256.0, 256.0));

    tiles.set_url("https://tiles.example.org/{z}/{x}/{-y}.png", false);
    assert_eq!(tiles.redraws, 1);
    assert_eq!(
        tiles.tile_url(Coords::new(1.0, 1.0, 2.0)).unwrap(),
        "https://tiles.example.org/2/1/2.png"
    );

    tiles.set_url("https://tiles.example.org/{z}/{x}/{y}.png?key={key}", true);
    assert_eq!(tiles.redraws, 1);
    assert_matches!(
        tiles.tile_url(Coords::new(0.0, 0.0, 0.0)),
        Err(CartaError::Template(_))
    );

    let done = Arc::new(AtomicUsize::new(0));
    let d = done.clone();
    tiles.create_tile(
        Coords::new(0.0, 0.0, 1.0),
        Box::new(move |error, tile| {
            assert!(error.is_none());
            assert!(tile.is_some());
            d.fetch_add(1, Ordering::Relaxed);
        }),
    );
    assert_eq!(done.load(Ordering::Relaxed), 1);
}

#[test]
fn tile_errors_reach_layer_listeners() {
    let backend = TestBackend::new();
    let mut tiles = backend.tile_layer("https://tiles.example.org/{z}/{x}/{y}.png", None);
    let received = Arc::new(parking_lot::Mutex::new(None));
    let r = received.clone();
    tiles.on((
        EventType::TileError,
        handler(move |event| {
            if let Event::TileError(payload) = event {
                *r.lock() = Some(payload.clone());
            }
        }),
    ));
    let loads = counter(&mut tiles, EventType::TileLoad);

    let id = tiles.id();
    let coords = Coords::new(3.0, 4.0, 5.0);
    tiles.fire(
        Event::TileError(TileErrorEvent {
            event_type: EventType::TileError,
            target: id,
            tile: ElementRef(42),
            coords,
            error: "connection refused".into(),
        }),
        false,
    );

    let payload = received.lock().take().unwrap();
    assert_eq!(payload.target, id);
    assert_eq!(payload.tile, ElementRef(42));
    assert_eq!(payload.coords, coords);
    assert_eq!(payload.error, "connection refused");

    let tile = payload.as_tile_event();
    assert_eq!(tile.event_type, EventType::TileError);
    assert_eq!((tile.tile, tile.coords), (ElementRef(42), coords));
    assert_eq!(loads.load(Ordering::Relaxed), 0);
}

#[test]
fn wms_layer_requests_tile_bounds() {
    let backend = TestBackend::new();
    assert_matches!(
        backend.tile_layer_wms("https://wms.example.org/wms", None),
        Err(CartaError::Configuration(_))
    );

    let mut wms = backend
        .tile_layer_wms(
            "https://wms.example.org/wms",
            Some(WmsOptions {
                layers: Some("roads".into()),
                transparent: Some(true),
                ..Default::default()
            }),
        )
        .unwrap();
    assert_eq!(wms.wms_params().layers, "roads");
    assert_eq!(wms.wms_params().width, Some(256.0));

    let url = wms.tile_url(Coords::new(0.0, 0.0, 0.0)).unwrap();
    assert!(url.starts_with("https://wms.example.org/wms?service=WMS&request=GetMap"));
    assert!(url.contains("layers=roads"));
    assert!(url.contains("transparent=true"));
    assert!(url.contains("srs=EPSG%3A3857"));
    assert!(url.contains("&bbox="));

    wms.set_params(
        WmsParams {
            layers: "rivers".into(),
            ..Default::default()
        },
        false,
    );
    assert!(wms.tile_url(Coords::new(0.0, 0.0, 0.0)).unwrap().contains("layers=rivers"));
    assert!(wms.wms_options().transparent == Some(true));
    assert_eq!(wms.redraws, 1);
}

#[test]
fn layers_control_lists_layers_in_order() {
    let backend = TestBackend::new();
    let streets = backend.tile_layer("streets/{z}/{x}/{y}.png", None);
    let satellite = backend.tile_layer("satellite/{z}/{x}/{y}.png", None);
    let cities = backend.layer_group(vec![], None);
    let cities_id = cities.id();

    let mut base_layers = LayersObject::<TestBackend>::new();
    base_layers
        .insert("Streets", streets)
        .insert("Satellite", satellite);
    let mut overlays = LayersObject::<TestBackend>::new();
    overlays.insert("Cities", cities);

    let mut control = backend.control_layers(
        Some(base_layers),
        Some(overlays),
        Some(LayersControlOptions {
            position: Some(ControlPosition::BottomLeft),
            ..Default::default()
        }),
    );
    assert_eq!(control.position(), ControlPosition::BottomLeft);

    let names: Vec<_> = control.layers().base_layers().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Streets", "Satellite"]);
    assert_eq!(control.layers().overlays().count(), 1);

    control.remove_layer(cities_id).expand();
    assert_eq!(control.layers().overlays().count(), 0);
    assert!(control.expanded);

    let mut map = backend.test_map(MapOptions::default());
    control.add_to(&mut map);
    let container = control.container().expect("control is on the map");
    assert!(map.controls.contains(&container));
    assert!(backend.dom.has_class(container, "leaflet-bottom"));

    map.remove_control(&mut control);
    assert!(control.container().is_none());
    assert!(map.controls.is_empty());
}

#[test]
fn dom_listeners_are_split_by_whitespace() {
    let backend = TestBackend::new();
    let element = backend.dom.element();
    let noop: crate::dom::DomEventHandler = Arc::new(|_| {});

    backend
        .dom_event()
        .on(element, DomListeners::Single("click  dblclick".into(), noop.clone()));
    assert_eq!(backend.dom.listeners.lock().len(), 2);

    backend
        .dom_event()
        .off(element, DomListeners::Single("click".into(), noop));
    assert_eq!(
        *backend.dom.listeners.lock(),
        vec![(element, "dblclick".to_string())]
    );

    backend.dom_event().stop(NativeEventRef(7));
    assert_eq!(*backend.dom.stopped.lock(), vec![NativeEventRef(7)]);
}

#[test]
fn animation_frames_run_when_requested() {
    let backend = TestBackend::new();
    let ran = Arc::new(AtomicUsize::new(0));

    let r = ran.clone();
    backend.scheduler().request_anim_frame(
        Box::new(move |_| {
            r.fetch_add(1, Ordering::Relaxed);
        }),
        false,
    );
    let r = ran.clone();
    let cancelled = backend.scheduler().request_anim_frame(
        Box::new(move |_| {
            r.fetch_add(10, Ordering::Relaxed);
        }),
        false,
    );
    backend.scheduler().cancel_anim_frame(cancelled);

    assert_eq!(backend.scheduler.run_frames(16.0), 1);
    assert_eq!(ran.load(Ordering::Relaxed), 1);
    assert_eq!(backend.scheduler.run_frames(32.0), 0);
}

#[test]
fn shared_layers_are_evented() {
    let backend = TestBackend::new();
    let shared = Arc::new(parking_lot::RwLock::new(backend.marker([0.0, 0.0], None)));
    let mut handle = shared.clone();

    let count = counter(&mut handle, EventType::Click);
    let id = handle.id();
    handle.fire(Event::base(EventType::Click, id), false);
    assert_eq!(count.load(Ordering::Relaxed), 1);
    assert_eq!(shared.read().id(), id);
}

fn accepts_empty_object<T: Options + Default + PartialEq + std::fmt::Debug>() {
    let name = std::any::type_name::<T>();
    assert_eq!(T::from_json("{}").unwrap(), T::default(), "{name}");
    assert!(T::default().validate().is_ok(), "{name}");
}

#[test]
fn every_options_bag_accepts_empty_object() {
    use crate::control::{
        AttributionControlOptions, ControlOptions, ScaleControlOptions, ZoomControlOptions,
    };
    use crate::layer::{
        BaseIconOptions, DefaultIconOptions, DivIconOptions, DivOverlayOptions, GridLayerOptions,
        ImageOverlayOptions, InteractiveLayerOptions, LayerOptions, PolylineOptions,
        PopupOptions, RendererOptions, TooltipOptions,
    };
    use crate::map::{FitBoundsOptions, LocateOptions, PanOptions, ZoomOptions, ZoomPanOptions};

    accepts_empty_object::<ControlOptions>();
    accepts_empty_object::<ZoomControlOptions>();
    accepts_empty_object::<AttributionControlOptions>();
    accepts_empty_object::<LayersControlOptions>();
    accepts_empty_object::<ScaleControlOptions>();
    accepts_empty_object::<MapOptions>();
    accepts_empty_object::<ZoomOptions>();
    accepts_empty_object::<PanOptions>();
    accepts_empty_object::<ZoomPanOptions>();
    accepts_empty_object::<FitBoundsOptions>();
    accepts_empty_object::<LocateOptions>();
    accepts_empty_object::<LayerOptions>();
    accepts_empty_object::<InteractiveLayerOptions>();
    accepts_empty_object::<GridLayerOptions>();
    accepts_empty_object::<TileLayerOptions>();
    accepts_empty_object::<WmsOptions>();
    accepts_empty_object::<ImageOverlayOptions>();
    accepts_empty_object::<PathOptions>();
    accepts_empty_object::<PolylineOptions>();
    accepts_empty_object::<CircleMarkerOptions>();
    accepts_empty_object::<RendererOptions>();
    accepts_empty_object::<DivOverlayOptions>();
    accepts_empty_object::<PopupOptions>();
    accepts_empty_object::<TooltipOptions>();
    accepts_empty_object::<BaseIconOptions>();
    accepts_empty_object::<DefaultIconOptions>();
    accepts_empty_object::<DivIconOptions>();
    accepts_empty_object::<MarkerOptions>();
}

#[test]
fn options_with_required_fields_reject_empty_object() {
    use crate::layer::IconOptions;

    assert_matches!(
        IconOptions::from_json("{}"),
        Err(CartaError::Json(e)) if e.to_string().contains("iconUrl")
    );
    assert_matches!(
        IconOptions::default().validate(),
        Err(CartaError::Configuration(_))
    );
    assert!(IconOptions::from_json(r#"{"iconUrl": "pin.png"}"#).is_ok());

    assert_matches!(
        WmsParams::from_json("{}"),
        Err(CartaError::Json(e)) if e.to_string().contains("layers")
    );
    assert_matches!(
        WmsParams::default().validate(),
        Err(CartaError::Configuration(_))
    );
    assert!(WmsParams::from_json(r#"{"layers": "roads"}"#).is_ok());
}
