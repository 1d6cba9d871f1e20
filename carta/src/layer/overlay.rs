use carta_types::cartesian::PointExpression;
use carta_types::geo::{LatLng, LatLngExpression};
use serde::{Deserialize, Serialize};

use super::{ContentSource, ElementBacked, Layer, LayerOptions, Stackable, Translucent};
use crate::backend::Backend;
use crate::error::CartaError;
use crate::options::{impl_options, impl_options_projection};

/// Options shared by popups and tooltips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DivOverlayOptions {
    /// Offset of the overlay from its anchor point.
    pub offset: Option<PointExpression>,
    /// Whether the overlay is animated while zooming.
    pub zoom_animation: Option<bool>,
    /// Class name added to the container.
    pub class_name: Option<String>,
    /// Map pane the overlay is added to.
    pub pane: Option<String>,
}

impl_options!(DivOverlayOptions {
    offset,
    zoom_animation,
    class_name,
    pane,
});

impl From<&DivOverlayOptions> for LayerOptions {
    fn from(value: &DivOverlayOptions) -> Self {
        Self {
            pane: value.pane.clone(),
            attribution: None,
        }
    }
}

/// Options of a popup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PopupOptions {
    /// Offset of the popup tip from its anchor point.
    pub offset: Option<PointExpression>,
    /// Whether the popup is animated while zooming.
    pub zoom_animation: Option<bool>,
    /// Class name added to the container.
    pub class_name: Option<String>,
    /// Map pane the popup is added to.
    pub pane: Option<String>,
    /// Maximum width in pixels.
    pub max_width: Option<f64>,
    /// Minimum width in pixels.
    pub min_width: Option<f64>,
    /// Height in pixels above which the content scrolls.
    pub max_height: Option<f64>,
    /// Whether the map is panned so the opened popup is fully visible.
    pub auto_pan: Option<bool>,
    /// Margin from the top left corner of the map kept when auto panning.
    pub auto_pan_padding_top_left: Option<PointExpression>,
    /// Margin from the bottom right corner of the map kept when auto panning.
    pub auto_pan_padding_bottom_right: Option<PointExpression>,
    /// Margin kept on both corners when auto panning.
    pub auto_pan_padding: Option<PointExpression>,
    /// Whether the map can not be panned so the popup leaves the view.
    pub keep_in_view: Option<bool>,
    /// Whether the popup has a close button.
    pub close_button: Option<bool>,
    /// Whether opening another popup closes this one.
    pub auto_close: Option<bool>,
    /// Whether clicking on the map closes the popup.
    pub close_on_click: Option<bool>,
}

fn check_popup(options: &PopupOptions) -> Result<(), CartaError> {
    if let (Some(min), Some(max)) = (options.min_width, options.max_width) {
        if min > max {
            return Err(CartaError::Configuration(format!(
                "popup minWidth ({min}) is greater than maxWidth ({max})"
            )));
        }
    }
    Ok(())
}

impl_options!(PopupOptions {
    offset,
    zoom_animation,
    class_name,
    pane,
    max_width,
    min_width,
    max_height,
    auto_pan,
    auto_pan_padding_top_left,
    auto_pan_padding_bottom_right,
    auto_pan_padding,
    keep_in_view,
    close_button,
    auto_close,
    close_on_click,
} validate = check_popup);
impl_options_projection!(PopupOptions => DivOverlayOptions {
    offset,
    zoom_animation,
    class_name,
    pane,
});

/// Where a tooltip opens relative to its anchor.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Right of the anchor.
    Right,
    /// Left of the anchor.
    Left,
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Centered on the anchor.
    Center,
    /// Left or right, whichever side of the map the anchor is on.
    #[default]
    Auto,
}

/// Options of a tooltip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TooltipOptions {
    /// Offset of the tooltip from its anchor point.
    pub offset: Option<PointExpression>,
    /// Whether the tooltip is animated while zooming.
    pub zoom_animation: Option<bool>,
    /// Class name added to the container.
    pub class_name: Option<String>,
    /// Map pane the tooltip is added to.
    pub pane: Option<String>,
    /// Where the tooltip opens.
    pub direction: Option<Direction>,
    /// Whether the tooltip is always shown instead of on hover.
    pub permanent: Option<bool>,
    /// Whether the tooltip follows the mouse.
    pub sticky: Option<bool>,
    /// Whether the tooltip reacts to the mouse.
    pub interactive: Option<bool>,
    /// Opacity, `0.0` to `1.0`.
    pub opacity: Option<f64>,
}

impl_options!(TooltipOptions {
    offset,
    zoom_animation,
    class_name,
    pane,
    direction,
    permanent,
    sticky,
    interactive,
    opacity,
});
impl_options_projection!(TooltipOptions => DivOverlayOptions {
    offset,
    zoom_animation,
    class_name,
    pane,
});

/// Layer showing HTML content at a point: the base of popups and tooltips.
pub trait DivOverlay<B: Backend>: Layer<B> + Stackable + ElementBacked {
    /// Anchor point, `None` until set or opened on a layer.
    fn lat_lng(&self) -> Option<LatLng>;
    /// Moves the overlay.
    fn set_lat_lng(&mut self, lat_lng: impl Into<LatLngExpression>) -> &mut Self;
    /// Content as it was set.
    fn content(&self) -> Option<&ContentSource>;
    /// Replaces the content.
    fn set_content(&mut self, content: impl Into<ContentSource>) -> &mut Self;
    /// Redraws the overlay after its content changed.
    fn update(&mut self);
    /// Whether the overlay is on a map.
    fn is_open(&self) -> bool;
}

/// Overlay with content opened on click.
pub trait Popup<B: Backend>: DivOverlay<B> {
    /// Adds the popup to the map, closing the previous popup.
    fn open_on(&mut self, map: &mut B::Map) -> &mut Self;
    /// Options of the popup.
    fn options(&self) -> &PopupOptions;
}

/// Small overlay with content opened on hover.
pub trait Tooltip<B: Backend>: DivOverlay<B> + Translucent {
    /// Options of the tooltip.
    fn options(&self) -> &TooltipOptions;
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::options::Options;

    #[test]
    fn popup_options() {
        let options = PopupOptions::from_json(
            r#"{"maxWidth": 400, "autoPanPadding": [5, 5], "className": "wide", "closeOnClick": false}"#,
        )
        .unwrap();
        assert_eq!(options.max_width, Some(400.0));
        assert_eq!(options.auto_pan_padding, Some([5.0, 5.0].into()));

        let base = DivOverlayOptions::from(&options);
        assert_eq!(base.class_name.as_deref(), Some("wide"));
        assert_eq!(LayerOptions::from(&base).pane, None);
    }

    #[test]
    fn popup_widths_are_checked() {
        assert_matches!(
            PopupOptions::from_json(r#"{"minWidth": 300, "maxWidth": 100}"#),
            Err(CartaError::Configuration(_))
        );
    }

    #[test]
    fn tooltip_direction() {
        let options = TooltipOptions::from_json(r#"{"direction": "top", "permanent": true}"#).unwrap();
        assert_eq!(options.direction, Some(Direction::Top));
        assert_eq!(Direction::default(), Direction::Auto);
        assert!(TooltipOptions::from_json(r#"{"direction": "up"}"#).is_err());
        assert!(TooltipOptions::from_json(r#"{"maxWidth": 100}"#).is_err());
    }
}
