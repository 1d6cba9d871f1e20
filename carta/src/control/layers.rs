use serde::{Deserialize, Serialize};

use super::{Control, ControlOptions, ControlPosition};
use crate::backend::Backend;
use crate::event::ObjectId;
use crate::options::{impl_options, impl_options_projection};

/// Options of the layers control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LayersControlOptions {
    /// Corner of the control. Top right if not set.
    pub position: Option<ControlPosition>,
    /// Whether the list is shown only while the pointer is over the control icon.
    pub collapsed: Option<bool>,
    /// Whether the control assigns increasing z-indices to the layers in the order they were
    /// added.
    pub auto_z_index: Option<bool>,
    /// Whether the base layers list is hidden when there is only one base layer.
    pub hide_single_base: Option<bool>,
}

impl_options!(LayersControlOptions {
    position,
    collapsed,
    auto_z_index,
    hide_single_base,
});
impl_options_projection!(LayersControlOptions => ControlOptions { position });

/// Layers by the name shown in the layers control, in the order they were inserted.
pub struct LayersObject<B: Backend> {
    entries: Vec<(String, B::AnyLayer)>,
}

impl<B: Backend> LayersObject<B> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Adds the layer under the name. A layer already having the name is replaced in place.
    pub fn insert(&mut self, name: impl Into<String>, layer: impl Into<B::AnyLayer>) -> &mut Self {
        let name = name.into();
        let layer = layer.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = layer,
            None => self.entries.push((name, layer)),
        }

        self
    }

    /// The layer with the name.
    pub fn get(&self, name: &str) -> Option<&B::AnyLayer> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, layer)| layer)
    }

    /// Names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Names and layers in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &B::AnyLayer)> {
        self.entries.iter().map(|(name, layer)| (name.as_str(), layer))
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no layers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<B: Backend> Default for LayersObject<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Clone for LayersObject<B> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<B: Backend> IntoIterator for LayersObject<B> {
    type Item = (String, B::AnyLayer);
    type IntoIter = std::vec::IntoIter<(String, B::AnyLayer)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<B: Backend, N: Into<String>, L: Into<B::AnyLayer>> FromIterator<(N, L)> for LayersObject<B> {
    fn from_iter<T: IntoIterator<Item = (N, L)>>(iter: T) -> Self {
        let mut object = Self::new();
        for (name, layer) in iter {
            object.insert(name, layer);
        }
        object
    }
}

/// Layer listed in the layers control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerEntry {
    /// Id of the layer.
    pub id: ObjectId,
    /// Name shown next to the switch.
    pub name: String,
    /// Overlays are toggled with a checkbox, base layers are switched with radio buttons.
    pub overlay: bool,
}

/// Which parts of the layers control list are displayed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SectionVisibility {
    /// Base layers list.
    pub base_layers: bool,
    /// Separator between base layers and overlays.
    pub separator: bool,
}

/// Layers listed in the layers control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayersList {
    entries: Vec<LayerEntry>,
    last_z_index: i32,
}

impl LayersList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the layer. A layer that is already listed gets the new name and kind.
    ///
    /// Returns the z-index the layer should get if z-indices are assigned automatically.
    pub fn add(
        &mut self,
        id: ObjectId,
        name: impl Into<String>,
        overlay: bool,
        auto_z_index: bool,
    ) -> Option<i32> {
        let entry = LayerEntry {
            id,
            name: name.into(),
            overlay,
        };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }

        if auto_z_index {
            self.last_z_index += 1;
            Some(self.last_z_index)
        } else {
            None
        }
    }

    /// Removes the layer. Returns the removed entry.
    pub fn remove(&mut self, id: ObjectId) -> Option<LayerEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// The entry of the layer.
    pub fn get(&self, id: ObjectId) -> Option<&LayerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Base layers in order.
    pub fn base_layers(&self) -> impl Iterator<Item = &LayerEntry> {
        self.entries.iter().filter(|e| !e.overlay)
    }

    /// Overlays in order.
    pub fn overlays(&self) -> impl Iterator<Item = &LayerEntry> {
        self.entries.iter().filter(|e| e.overlay)
    }

    /// Which parts of the list are displayed.
    pub fn visibility(&self, hide_single_base: bool) -> SectionVisibility {
        let base_count = self.base_layers().count();
        let overlays_present = self.overlays().next().is_some();
        let base_present = base_count > 0 && (!hide_single_base || base_count > 1);

        SectionVisibility {
            base_layers: !hide_single_base || base_present,
            separator: overlays_present && base_present,
        }
    }
}

/// Control switching base layers and toggling overlays.
pub trait LayersControl<B: Backend>: Control<B> {
    /// Adds a base layer with the name.
    fn add_base_layer(&mut self, layer: impl Into<B::AnyLayer>, name: &str) -> &mut Self;
    /// Adds an overlay with the name.
    fn add_overlay(&mut self, layer: impl Into<B::AnyLayer>, name: &str) -> &mut Self;
    /// Removes the layer from the control. The layer stays on the map.
    fn remove_layer(&mut self, id: ObjectId) -> &mut Self;
    /// Shows the list.
    fn expand(&mut self) -> &mut Self;
    /// Hides the list.
    fn collapse(&mut self) -> &mut Self;
    /// Layers listed in the control.
    fn layers(&self) -> &LayersList;
    /// Options of the control.
    fn options(&self) -> &LayersControlOptions;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    #[test]
    fn options() {
        let options = LayersControlOptions::from_json(
            r#"{"collapsed": false, "hideSingleBase": true, "position": "topleft"}"#,
        )
        .unwrap();
        assert_eq!(options.collapsed, Some(false));
        assert_eq!(
            ControlOptions::from(options).position,
            Some(ControlPosition::TopLeft)
        );
        assert!(LayersControlOptions::from_json(r#"{"sortLayers": true}"#).is_err());
    }

    #[test]
    fn list_order_and_z_index() {
        let mut list = LayersList::new();
        assert_eq!(list.add(ObjectId(1), "Streets", false, true), Some(1));
        assert_eq!(list.add(ObjectId(2), "Cities", true, true), Some(2));
        assert_eq!(list.add(ObjectId(3), "Satellite", false, false), None);

        let names: Vec<_> = list.base_layers().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Streets", "Satellite"]);

        list.add(ObjectId(1), "Roads", false, false);
        assert_eq!(list.get(ObjectId(1)).map(|e| e.name.as_str()), Some("Roads"));
        assert_eq!(list.base_layers().count(), 2);

        assert_eq!(list.remove(ObjectId(2)).map(|e| e.overlay), Some(true));
        assert_eq!(list.remove(ObjectId(2)), None);
    }

    #[test]
    fn section_visibility() {
        let mut list = LayersList::new();
        list.add(ObjectId(1), "Streets", false, false);
        list.add(ObjectId(2), "Cities", true, false);

        assert_eq!(
            list.visibility(false),
            SectionVisibility {
                base_layers: true,
                separator: true
            }
        );
        assert_eq!(
            list.visibility(true),
            SectionVisibility {
                base_layers: false,
                separator: false
            }
        );

        list.add(ObjectId(3), "Satellite", false, false);
        assert_eq!(
            list.visibility(true),
            SectionVisibility {
                base_layers: true,
                separator: true
            }
        );
    }
}
