use serde::{Deserialize, Serialize};

use super::{Layer, LayerOptions};
use crate::backend::Backend;
use crate::error::CartaError;
use crate::options::{impl_options, impl_options_projection};

/// Options of a vector renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RendererOptions {
    /// Map pane the renderer is added to.
    pub pane: Option<String>,
    /// Attribution shown in the attribution control.
    pub attribution: Option<String>,
    /// How much the drawn area extends past the view, relative to the view size.
    pub padding: Option<f64>,
}

fn non_negative_padding(options: &RendererOptions) -> Result<(), CartaError> {
    match options.padding {
        Some(p) if p.is_nan() || p < 0.0 => Err(CartaError::Configuration(format!(
            "renderer padding must not be negative, got {p}"
        ))),
        _ => Ok(()),
    }
}

impl_options!(RendererOptions {
    pane,
    attribution,
    padding
} validate = non_negative_padding);
impl_options_projection!(RendererOptions => LayerOptions { pane, attribution });

impl RendererOptions {
    /// Padding with the default of one tenth of the view.
    pub fn padding_or_default(&self) -> f64 {
        self.padding.unwrap_or(0.1)
    }
}

/// Layer drawing vector layers, either as SVG or on a canvas.
pub trait Renderer<B: Backend>: Layer<B> {
    /// Options of the renderer.
    fn options(&self) -> &RendererOptions;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    #[test]
    fn padding() {
        assert_eq!(RendererOptions::default().padding_or_default(), 0.1);
        let options = RendererOptions::from_json(r#"{"padding": 0.5}"#).unwrap();
        assert_eq!(options.padding_or_default(), 0.5);
        assert!(RendererOptions::from_json(r#"{"padding": -1}"#).is_err());
    }
}
