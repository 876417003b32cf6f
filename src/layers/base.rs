use crate::traits::RenderScaleLayer;

/// In-memory image layer, the stand-in for a host layer outside the browser
#[derive(Debug, Clone)]
pub struct ImageLayer {
    name: String,
    /// Slice view render scale target, 1.0 is full detail
    render_scale_target: f64,
}

impl ImageLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            render_scale_target: 1.0,
        }
    }

    pub fn with_render_scale_target(mut self, value: f64) -> Self {
        self.render_scale_target = value;
        self
    }
}

impl RenderScaleLayer for ImageLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn render_scale_target(&self) -> f64 {
        self.render_scale_target
    }

    fn set_render_scale_target(&mut self, value: f64) {
        self.render_scale_target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_is_full_detail() {
        let layer = ImageLayer::new("BANC EM");
        assert_eq!(layer.name(), "BANC EM");
        assert_eq!(layer.render_scale_target(), 1.0);
    }

    #[test]
    fn test_set_render_scale_target() {
        let mut layer = ImageLayer::new("em").with_render_scale_target(2.0);
        assert_eq!(layer.render_scale_target(), 2.0);

        layer.set_render_scale_target(4.0);
        assert_eq!(layer.render_scale_target(), 4.0);
    }
}
