use carta_types::geojson::{Feature, Point};
use serde::{Deserialize, Serialize};

use super::{
    ElementBacked, GeoJsonExport, InteractiveLayerOptions, Layer, LayerOptions, MarkerIcon,
    PointLocated, PopupBindable, TooltipBindable, Translucent,
};
use crate::backend::Backend;
use crate::error::CartaError;
use crate::options::{impl_options, impl_options_projection};

/// Options of a marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MarkerOptions {
    /// Map pane the marker is added to.
    pub pane: Option<String>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Whether the marker fires mouse events.
    pub interactive: Option<bool>,
    /// Whether mouse events of the marker also reach the map.
    pub bubbling_mouse_events: Option<bool>,
    /// Icon of the marker, the stock icon by default.
    pub icon: Option<MarkerIcon>,
    /// Old name of `interactive`.
    pub clickable: Option<bool>,
    /// Whether the marker can be dragged.
    pub draggable: Option<bool>,
    /// Whether the marker can be focused and clicked with the keyboard.
    pub keyboard: Option<bool>,
    /// Browser tooltip text.
    pub title: Option<String>,
    /// Alternative text of the icon image.
    pub alt: Option<String>,
    /// Added to the z-index of the marker.
    pub z_index_offset: Option<f64>,
    /// Opacity, `0.0` to `1.0`.
    pub opacity: Option<f64>,
    /// Whether the marker is drawn above the others while hovered.
    pub rise_on_hover: Option<bool>,
    /// Z-index offset used with `rise_on_hover`.
    pub rise_offset: Option<f64>,
}

fn check_marker(options: &MarkerOptions) -> Result<(), CartaError> {
    if options.clickable.is_some() {
        log::warn!("Marker option `clickable` is deprecated, use `interactive` instead");
    }
    match options.opacity {
        Some(o) if !(0.0..=1.0).contains(&o) => Err(CartaError::Configuration(format!(
            "marker opacity must be between 0 and 1, got {o}"
        ))),
        _ => Ok(()),
    }
}

impl_options!(MarkerOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
    icon,
    clickable,
    draggable,
    keyboard,
    title,
    alt,
    z_index_offset,
    opacity,
    rise_on_hover,
    rise_offset,
} validate = check_marker);
impl_options_projection!(MarkerOptions => LayerOptions { pane, attribution });
impl_options_projection!(MarkerOptions => InteractiveLayerOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
});

impl MarkerOptions {
    /// Whether the marker reacts to the mouse. `clickable` is used if `interactive` is not set.
    pub fn is_interactive(&self) -> bool {
        self.interactive.or(self.clickable).unwrap_or(true)
    }
}

/// Icon placed at a point.
pub trait Marker<B: Backend>:
    Layer<B>
    + PopupBindable<B>
    + TooltipBindable<B>
    + PointLocated
    + Translucent
    + ElementBacked
    + GeoJsonExport<Output = Feature<Point>>
{
    /// Changes the z-index offset.
    fn set_z_index_offset(&mut self, offset: f64) -> &mut Self;
    /// Replaces the icon.
    fn set_icon(&mut self, icon: MarkerIcon) -> &mut Self;
    /// Dragging handler, present while the marker is on a map.
    fn dragging(&mut self) -> Option<&mut B::Handler>;
    /// Options the marker was created with.
    fn options(&self) -> &MarkerOptions;
    /// Feature the marker was created from by a GeoJSON layer.
    fn feature(&self) -> Option<&Feature<Point>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::layer::{DivIconOptions, IconOptions};
    use crate::options::Options;

    #[test]
    fn clickable_is_accepted() {
        let _ = env_logger::builder().is_test(true).try_init();

        let options = MarkerOptions::from_json(r#"{"clickable": false}"#).unwrap();
        assert!(!options.is_interactive());

        let options = MarkerOptions {
            interactive: Some(true),
            clickable: Some(false),
            ..Default::default()
        };
        assert!(options.is_interactive());
        assert!(MarkerOptions::default().is_interactive());
    }

    #[test]
    fn opacity_is_checked() {
        assert_matches!(
            MarkerOptions::from_json(r#"{"opacity": 1.5}"#),
            Err(CartaError::Configuration(_))
        );
    }

    #[test]
    fn icon_is_replaced_as_a_whole() {
        let options = MarkerOptions {
            icon: Some(IconOptions::new("a.png").into()),
            title: Some("A".into()),
            ..Default::default()
        };
        let merged = options.merged(MarkerOptions {
            icon: Some(DivIconOptions::default().into()),
            ..Default::default()
        });
        assert_matches!(merged.icon, Some(MarkerIcon::Div(_)));
        assert_eq!(merged.title.as_deref(), Some("A"));
    }

    #[test]
    fn icon_from_json() {
        let options =
            MarkerOptions::from_json(r#"{"icon": {"icon": {"iconUrl": "pin.png"}}, "zIndexOffset": 100}"#)
                .unwrap();
        assert_matches!(options.icon, Some(MarkerIcon::Icon(ref i)) if i.icon_url == "pin.png");
        assert_eq!(options.z_index_offset, Some(100.0));
    }
}
