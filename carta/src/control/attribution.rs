use serde::{Deserialize, Serialize};

use super::{Control, ControlOptions, ControlPosition};
use crate::backend::Backend;
use crate::error::CartaError;
use crate::layer::False;
use crate::options::{impl_options, impl_options_projection};

/// Prefix the runtime shows before the attributions when none is configured.
pub const DEFAULT_PREFIX: &str =
    r#"<a href="http://leafletjs.com" title="A JS library for interactive maps">Leaflet</a>"#;

/// Text shown before the attributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prefix {
    /// HTML shown before the attributions.
    Text(String),
    /// `false`: no prefix.
    Disabled(False),
}

impl Prefix {
    /// The prefix text, `None` if it is disabled or empty.
    pub fn text(&self) -> Option<&str> {
        match self {
            Prefix::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Prefix::Text(DEFAULT_PREFIX.to_string())
    }
}

impl From<&str> for Prefix {
    fn from(value: &str) -> Self {
        Prefix::Text(value.to_string())
    }
}

/// Options of the attribution control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AttributionControlOptions {
    /// Corner of the control. Bottom right if not set.
    pub position: Option<ControlPosition>,
    /// Text before the attributions.
    pub prefix: Option<Prefix>,
}

impl_options!(AttributionControlOptions { position, prefix });
impl_options_projection!(AttributionControlOptions => ControlOptions { position });

impl AttributionControlOptions {
    /// Options with every field set to the value the runtime uses when it is missing.
    pub fn with_defaults() -> Self {
        Self {
            position: Some(ControlPosition::BottomRight),
            prefix: Some(Prefix::default()),
        }
    }
}

/// Attribution texts of the layers on the map.
///
/// Several layers can have the same attribution, so every text is counted and shown while at
/// least one layer added it. Texts are shown in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributions {
    entries: Vec<(String, usize)>,
}

impl Attributions {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the text. Empty texts are ignored.
    pub fn add(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }

        match self.entries.iter_mut().find(|(t, _)| t == text) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((text.to_string(), 1)),
        }

        self
    }

    /// Removes one occurrence of the text.
    ///
    /// Removing a text that was never added is an error, but it changes nothing.
    pub fn remove(&mut self, text: &str) -> Result<&mut Self, CartaError> {
        if text.is_empty() {
            return Ok(self);
        }

        match self
            .entries
            .iter_mut()
            .find(|(t, count)| t == text && *count > 0)
        {
            Some((_, count)) => {
                *count -= 1;
                Ok(self)
            }
            None => Err(CartaError::NotFound),
        }
    }

    /// Texts that are currently shown.
    pub fn visible(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(text, _)| text.as_str())
            .collect()
    }

    /// Whether nothing is shown except the prefix.
    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }

    /// Content of the control: the prefix and the attributions separated by ` | `, the
    /// attributions separated by `, `.
    pub fn html(&self, prefix: Option<&Prefix>) -> String {
        let attributions = self.visible();

        let mut parts = vec![];
        if let Some(prefix) = prefix.and_then(Prefix::text) {
            parts.push(prefix.to_string());
        }
        if !attributions.is_empty() {
            parts.push(attributions.join(", "));
        }

        parts.join(" | ")
    }
}

/// Control showing the prefix and the attributions of the layers on the map.
pub trait AttributionControl<B: Backend>: Control<B> {
    /// Replaces the prefix.
    fn set_prefix(&mut self, prefix: impl Into<Prefix>) -> &mut Self;
    /// Adds an attribution text.
    fn add_attribution(&mut self, text: &str) -> &mut Self;
    /// Removes an attribution text.
    fn remove_attribution(&mut self, text: &str) -> &mut Self;
    /// Options of the control.
    fn options(&self) -> &AttributionControlOptions;
}
