//! Controls are the UI elements placed in the corners of the map: zoom buttons, attribution,
//! layer switcher and scale.
//!
//! As with layers, the elements themselves are created by the runtime. This module defines the
//! control contracts, their options and the bookkeeping that needs no runtime (which
//! attributions to show, which layers the switcher lists, the scale bar labels).

use maybe_sync::{MaybeSend, MaybeSync};
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::dom::ElementRef;
use crate::options::{impl_options, impl_options_projection};

mod attribution;
mod layers;
mod scale;

pub use attribution::{
    AttributionControl, AttributionControlOptions, Attributions, Prefix, DEFAULT_PREFIX,
};
pub use layers::{
    LayerEntry, LayersControl, LayersControlOptions, LayersList, LayersObject, SectionVisibility,
};
pub use scale::{
    imperial_scale, metric_scale, round_num, scale_lines, ScaleControl, ScaleControlOptions,
    ScaleLine, FEET_PER_METER, FEET_PER_MILE,
};

/// Corner of the map a control is placed in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    #[default]
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

impl ControlPosition {
    /// All corners.
    pub const ALL: [ControlPosition; 4] = [
        ControlPosition::TopLeft,
        ControlPosition::TopRight,
        ControlPosition::BottomLeft,
        ControlPosition::BottomRight,
    ];

    /// Name of the position, e.g. `topleft`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }

    /// Classes of the corner container holding the controls at this position.
    pub fn corner_class(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "leaflet-top leaflet-left",
            ControlPosition::TopRight => "leaflet-top leaflet-right",
            ControlPosition::BottomLeft => "leaflet-bottom leaflet-left",
            ControlPosition::BottomRight => "leaflet-bottom leaflet-right",
        }
    }

    /// Whether controls added later are placed above the earlier ones in this corner.
    pub fn stacks_upwards(&self) -> bool {
        matches!(
            self,
            ControlPosition::BottomLeft | ControlPosition::BottomRight
        )
    }
}

/// Options shared by all controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ControlOptions {
    /// Corner of the control. Top right if not set.
    pub position: Option<ControlPosition>,
}

impl_options!(ControlOptions { position });

/// UI element placed in a corner of the map.
pub trait Control<B: Backend>: MaybeSend + MaybeSync {
    /// Corner of the control.
    fn position(&self) -> ControlPosition;
    /// Moves the control to another corner.
    fn set_position(&mut self, position: ControlPosition) -> &mut Self;
    /// Element of the control, `None` while it is not on a map.
    fn container(&self) -> Option<ElementRef>;
    /// Adds the control to the map.
    fn add_to(&mut self, map: &mut B::Map) -> &mut Self;
    /// Removes the control from its map.
    fn remove(&mut self) -> &mut Self;
    /// Creates the element of the control. Called by the map when the control is added.
    fn on_add(&mut self, map: &mut B::Map) -> ElementRef;
    /// Cleans up when the control is removed.
    fn on_remove(&mut self, _map: &mut B::Map) {}
}

/// Options of the zoom control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ZoomControlOptions {
    /// Corner of the control. Top left if not set.
    pub position: Option<ControlPosition>,
    /// Text of the zoom in button.
    pub zoom_in_text: Option<String>,
    /// Title of the zoom in button.
    pub zoom_in_title: Option<String>,
    /// Text of the zoom out button.
    pub zoom_out_text: Option<String>,
    /// Title of the zoom out button.
    pub zoom_out_title: Option<String>,
}

impl_options!(ZoomControlOptions {
    position,
    zoom_in_text,
    zoom_in_title,
    zoom_out_text,
    zoom_out_title,
});
impl_options_projection!(ZoomControlOptions => ControlOptions { position });

impl ZoomControlOptions {
    /// Options with every field set to the value the runtime uses when it is missing.
    pub fn with_defaults() -> Self {
        Self {
            position: Some(ControlPosition::TopLeft),
            zoom_in_text: Some("+".into()),
            zoom_in_title: Some("Zoom in".into()),
            zoom_out_text: Some("&#x2212;".into()),
            zoom_out_title: Some("Zoom out".into()),
        }
    }
}

/// Which of the zoom buttons are disabled at the zoom level: `(zoom_in, zoom_out)`.
///
/// The buttons are also disabled while the map is disabled.
pub fn zoom_buttons_disabled(
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    map_disabled: bool,
) -> (bool, bool) {
    (
        map_disabled || zoom >= max_zoom,
        map_disabled || zoom <= min_zoom,
    )
}

/// Zoom in and zoom out buttons.
pub trait ZoomControl<B: Backend>: Control<B> {
    /// Options of the control.
    fn options(&self) -> &ZoomControlOptions;
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CartaError;
    use crate::options::Options;

    #[test]
    fn positions() {
        let options = ControlOptions::from_json(r#"{"position": "bottomleft"}"#).unwrap();
        assert_eq!(options.position, Some(ControlPosition::BottomLeft));
        assert!(ControlPosition::BottomLeft.stacks_upwards());
        assert!(!ControlPosition::TopLeft.stacks_upwards());
        assert_eq!(
            ControlPosition::BottomRight.corner_class(),
            "leaflet-bottom leaflet-right"
        );
        assert_eq!(ControlPosition::default().as_str(), "topright");

        assert_matches!(
            ControlOptions::from_json(r#"{"position": "center"}"#),
            Err(CartaError::Json(_))
        );
    }

    #[test]
    fn zoom_defaults_merge() {
        let options = ZoomControlOptions::with_defaults().merged(
            ZoomControlOptions::from_json(r#"{"zoomInTitle": "Closer"}"#).unwrap(),
        );
        assert_eq!(options.zoom_in_title.as_deref(), Some("Closer"));
        assert_eq!(options.zoom_out_text.as_deref(), Some("&#x2212;"));
        assert_eq!(
            ControlOptions::from(&options).position,
            Some(ControlPosition::TopLeft)
        );
    }

    #[test]
    fn zoom_buttons() {
        assert_eq!(zoom_buttons_disabled(5.0, 0.0, 18.0, false), (false, false));
        assert_eq!(zoom_buttons_disabled(18.0, 0.0, 18.0, false), (true, false));
        assert_eq!(zoom_buttons_disabled(0.0, 0.0, 18.0, false), (false, true));
        assert_eq!(zoom_buttons_disabled(5.0, 0.0, 18.0, true), (true, true));
    }
}
