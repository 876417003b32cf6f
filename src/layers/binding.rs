use crate::core::resolution::Resolution;
use crate::traits::LayerRegistry;

/// Pushes resolution values onto one named layer of the host registry.
///
/// A missing layer is skipped without retry; the next transition will try
/// again.
pub struct LayerBinding<L: LayerRegistry> {
    registry: L,
    layer_name: String,
}

impl<L: LayerRegistry> LayerBinding<L> {
    pub fn new(registry: L, layer_name: impl Into<String>) -> Self {
        Self {
            registry,
            layer_name: layer_name.into(),
        }
    }

    pub fn layer_name(&self) -> &str {
        &self.layer_name
    }

    pub fn registry(&self) -> &L {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut L {
        &mut self.registry
    }

    /// Sets the layer's render scale target. Returns whether the layer was found.
    pub fn apply_to_layer(&mut self, value: Resolution) -> bool {
        let target = f64::from(value.value());
        let applied = self
            .registry
            .with_layer_mut(&self.layer_name, |layer| {
                layer.set_render_scale_target(target)
            })
            .is_some();

        if !applied {
            log::debug!(
                "Layer '{}' not found, skipping render scale {}",
                self.layer_name,
                value
            );
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{base::ImageLayer, manager::LayerManager};
    use crate::traits::RenderScaleLayer;

    fn target_of(binding: &LayerBinding<LayerManager>) -> Option<f64> {
        binding
            .registry()
            .get_layer_by_name(binding.layer_name())
            .map(|l| l.render_scale_target())
    }

    #[test]
    fn test_apply_sets_render_scale() {
        let mut layers = LayerManager::new();
        layers.add_layer(ImageLayer::new("BANC EM"));
        let mut binding = LayerBinding::new(layers, "BANC EM");

        assert!(binding.apply_to_layer(Resolution::LowZoomedOut));
        assert_eq!(target_of(&binding), Some(4.0));

        assert!(binding.apply_to_layer(Resolution::High));
        assert_eq!(target_of(&binding), Some(1.0));
    }

    #[test]
    fn test_missing_layer_is_noop() {
        let mut binding = LayerBinding::new(LayerManager::new(), "BANC EM");
        assert!(!binding.apply_to_layer(Resolution::LowZoomedIn));

        // Self-corrects once the layer shows up
        binding.registry_mut().add_layer(ImageLayer::new("BANC EM"));
        assert!(binding.apply_to_layer(Resolution::LowZoomedIn));
        assert_eq!(target_of(&binding), Some(2.0));
    }
}
