use carta_types::geo::LatLngBoundsExpression;
use serde::{Deserialize, Serialize};

use super::{
    Bounded, ElementBacked, InteractiveLayerOptions, Layer, LayerOptions, Stackable, Translucent,
};
use crate::backend::Backend;
use crate::options::{impl_options, impl_options_projection};

/// Options of an image overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageOverlayOptions {
    /// Map pane the overlay is added to.
    pub pane: Option<String>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// Whether the image fires mouse events.
    pub interactive: Option<bool>,
    /// Whether mouse events of the image also reach the map.
    pub bubbling_mouse_events: Option<bool>,
    /// Opacity, `0.0` to `1.0`.
    pub opacity: Option<f64>,
    /// Alternative text of the image.
    pub alt: Option<String>,
    /// Whether the image is requested with CORS.
    pub cross_origin: Option<bool>,
    /// Class name added to the image.
    pub class_name: Option<String>,
}

impl_options!(ImageOverlayOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
    opacity,
    alt,
    cross_origin,
    class_name,
});
impl_options_projection!(ImageOverlayOptions => LayerOptions { pane, attribution });
impl_options_projection!(ImageOverlayOptions => InteractiveLayerOptions {
    pane,
    attribution,
    interactive,
    bubbling_mouse_events,
});

/// Image stretched over geographical bounds.
pub trait ImageOverlay<B: Backend>:
    Layer<B> + Stackable + Translucent + Bounded + ElementBacked
{
    /// Replaces the image.
    fn set_url(&mut self, url: &str) -> &mut Self;
    /// Moves the image to the bounds.
    fn set_bounds(&mut self, bounds: impl Into<LatLngBoundsExpression>) -> &mut Self;
    /// Url of the image.
    fn url(&self) -> &str;
    /// Options of the overlay.
    fn options(&self) -> &ImageOverlayOptions;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    #[test]
    fn options() {
        let options = ImageOverlayOptions::from_json(
            r#"{"opacity": 0.5, "alt": "Newark", "interactive": true, "crossOrigin": true}"#,
        )
        .unwrap();
        assert_eq!(options.opacity, Some(0.5));
        assert_eq!(
            InteractiveLayerOptions::from(&options).interactive,
            Some(true)
        );
        assert!(ImageOverlayOptions::from_json(r#"{"url": "a.png"}"#).is_err());
    }
}
