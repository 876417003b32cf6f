//! Seams between the switcher and the page it lives in
//!
//! The host viewer, the browser storage and the DOM are all external. Each
//! is reached through one of these traits so the decision logic can run
//! against in-memory fakes as well as against the real page.

use crate::Result;

/// Callback fired with the new zoom factor on every zoom change
pub type ZoomCallback = Box<dyn FnMut(f64)>;

/// Callback fired when the toggle control is clicked
pub type ClickCallback = Box<dyn FnMut()>;

/// Durable string key-value storage (browser local storage on the web)
pub trait PreferenceStore {
    /// Read the raw stored string, `None` when the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing whatever was there
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// An image layer exposing a mutable render scale target
pub trait RenderScaleLayer {
    /// Layer name as shown in the host's layer list
    fn name(&self) -> &str;

    /// Current render scale target
    fn render_scale_target(&self) -> f64;

    /// Set the render scale target
    fn set_render_scale_target(&mut self, value: f64);
}

/// The host's registry of layers, looked up by name
pub trait LayerRegistry {
    /// Whether a layer with this name currently resolves
    fn has_layer(&self, name: &str) -> bool;

    /// Applies a function to the named layer, `None` when it is absent
    fn with_layer_mut<F, R>(&mut self, name: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn RenderScaleLayer) -> R;
}

/// The host's zoom observable
pub trait ZoomSource {
    /// Whether the change notification source exists yet
    fn is_available(&self) -> bool;

    /// Current zoom factor
    fn zoom(&self) -> f64;

    /// Register a change listener. Listeners live as long as the page.
    fn subscribe(&mut self, callback: ZoomCallback) -> Result<()>;
}

/// A single clickable control with a text label
pub trait ToggleControl {
    /// Set the visible text
    fn set_label(&mut self, text: &str);

    /// Current visible text
    fn label(&self) -> String;

    /// Attach the click handler
    fn on_click(&mut self, handler: ClickCallback) -> Result<()>;
}

/// The part of the host UI that can hold the toggle control
pub trait UiHost {
    type Control: ToggleControl;

    /// Whether the top bar container exists
    fn top_bar_ready(&self, top_bar_class: &str) -> bool;

    /// Create the control and insert it into the top bar right before the
    /// anchor element (or at the end when the anchor is missing)
    fn mount_toggle(&mut self, top_bar_class: &str, anchor_class: &str) -> Result<Self::Control>;
}
