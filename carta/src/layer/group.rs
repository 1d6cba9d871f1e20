use carta_types::geojson::GeoJson;

use super::{Bounded, GeoJsonExport, Layer, Stackable, Styled};
use crate::backend::Backend;
use crate::event::{Evented, ObjectId};

/// Layer holding other layers. Adding the group to a map adds all of them.
pub trait LayerGroup<B: Backend>: Layer<B> + GeoJsonExport<Output = GeoJson> {
    /// Adds a layer. It is shown on the map if the group is.
    fn add_layer(&mut self, layer: impl Into<B::AnyLayer>) -> &mut Self;
    /// Removes the layer with the id. Unknown ids are ignored.
    fn remove_layer(&mut self, id: ObjectId) -> &mut Self;
    /// Whether the layer with the id is in the group.
    fn has_layer(&self, id: ObjectId) -> bool;
    /// Removes all layers.
    fn clear_layers(&mut self) -> &mut Self;
    /// Calls `f` with every layer of the group, in the order they were added.
    fn each_layer(&mut self, f: &mut dyn FnMut(&mut B::AnyLayer)) -> &mut Self;
    /// The layer with the id.
    fn layer(&self, id: ObjectId) -> Option<&B::AnyLayer>;
    /// All layers of the group, in the order they were added.
    fn layers(&self) -> Vec<&B::AnyLayer>;
    /// Sets the z-index of every layer of the group.
    fn set_z_index(&mut self, z_index: i32) -> &mut Self;

    /// Id the group uses for the layer.
    fn layer_id(&self, layer: &impl Evented) -> ObjectId {
        layer.id()
    }
}

/// Layer group that forwards the mouse events of its layers and can style all of them at once.
pub trait FeatureGroup<B: Backend>: LayerGroup<B> + Styled + Stackable + Bounded {}
