use crate::{
    layers::base::ImageLayer,
    traits::{LayerRegistry, RenderScaleLayer},
};

use crate::prelude::HashMap;

/// In-memory layer registry keyed by layer name
pub struct LayerManager {
    layers: HashMap<String, ImageLayer>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
        }
    }

    /// Adds a layer, replacing any layer with the same name
    pub fn add_layer(&mut self, layer: ImageLayer) {
        self.layers.insert(layer.name().to_string(), layer);
    }

    /// Removes a layer by name
    pub fn remove_layer(&mut self, name: &str) -> Option<ImageLayer> {
        self.layers.remove(name)
    }

    /// Gets a reference to a layer by name
    pub fn get_layer_by_name(&self, name: &str) -> Option<&ImageLayer> {
        self.layers.get(name)
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerRegistry for LayerManager {
    fn has_layer(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    fn with_layer_mut<F, R>(&mut self, name: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn RenderScaleLayer) -> R,
    {
        self.layers
            .get_mut(name)
            .map(|layer| f(layer as &mut dyn RenderScaleLayer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut manager = LayerManager::new();
        manager.add_layer(ImageLayer::new("BANC EM"));

        assert!(manager.has_layer("BANC EM"));
        assert!(!manager.has_layer("banc em"));
    }

    #[test]
    fn test_with_layer_mut() {
        let mut manager = LayerManager::new();
        manager.add_layer(ImageLayer::new("BANC EM"));

        let applied = manager.with_layer_mut("BANC EM", |layer| layer.set_render_scale_target(4.0));
        assert!(applied.is_some());
        assert_eq!(
            manager
                .get_layer_by_name("BANC EM")
                .map(|l| l.render_scale_target()),
            Some(4.0)
        );

        let missing = manager.with_layer_mut("other", |layer| layer.set_render_scale_target(4.0));
        assert!(missing.is_none());
    }

    #[test]
    fn test_replace_and_remove() {
        let mut manager = LayerManager::new();
        manager.add_layer(ImageLayer::new("em"));
        manager.add_layer(ImageLayer::new("em").with_render_scale_target(2.0));
        assert_eq!(manager.len(), 1);
        assert_eq!(
            manager.get_layer_by_name("em").map(|l| l.render_scale_target()),
            Some(2.0)
        );

        assert!(manager.remove_layer("em").is_some());
        assert!(manager.is_empty());
        assert!(!manager.has_layer("em"));
    }
}
