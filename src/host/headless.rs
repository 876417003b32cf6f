//! In-memory host for running the switcher outside a browser
//!
//! [`HeadlessHost`] plays the viewer page: a toolbar that may or may not
//! exist yet, a layer list, a zoom factor with change listeners, and local
//! storage. Every handle it hands out shares the same page state, so tests
//! and the companion app can drive clicks and zoom changes and then inspect
//! what the switcher did.

use crate::{
    layers::{base::ImageLayer, manager::LayerManager},
    persistence::MemoryStore,
    switcher::HostBindings,
    traits::{
        ClickCallback, LayerRegistry, RenderScaleLayer, ToggleControl, UiHost, ZoomCallback,
        ZoomSource,
    },
    Error, Result,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Element id given to the mounted toggle in the toolbar listing
pub const TOGGLE_ELEMENT: &str = "resolution-toggle";

#[derive(Default)]
struct PageState {
    /// Toolbar children by class, `None` until the toolbar exists
    toolbar: Option<Vec<String>>,
    top_bar_class: String,
    layers: LayerManager,
    zoom: Option<f64>,
    zoom_listeners: Vec<ZoomCallback>,
    toggle: Option<Rc<RefCell<ToggleState>>>,
}

#[derive(Default)]
struct ToggleState {
    label: String,
    handler: Option<ClickCallback>,
}

/// A simulated viewer page
#[derive(Clone, Default)]
pub struct HeadlessHost {
    page: Rc<RefCell<PageState>>,
    storage: MemoryStore,
}

impl HeadlessHost {
    /// Empty page: no toolbar, no layers, no navigation state
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with the toolbar, navigation and the named layer already present
    pub fn ready(top_bar_class: &str, anchor_class: &str, layer_name: &str, zoom: f64) -> Self {
        let host = Self::new();
        host.show_toolbar(top_bar_class, &[anchor_class]);
        host.add_layer(ImageLayer::new(layer_name));
        host.set_navigation(zoom);
        host
    }

    /// Creates the toolbar with the given child element classes
    pub fn show_toolbar(&self, top_bar_class: &str, children: &[&str]) {
        let mut page = self.page.borrow_mut();
        page.top_bar_class = top_bar_class.to_string();
        page.toolbar = Some(children.iter().map(|c| c.to_string()).collect());
    }

    pub fn add_layer(&self, layer: ImageLayer) {
        self.page.borrow_mut().layers.add_layer(layer);
    }

    pub fn remove_layer(&self, name: &str) -> Option<ImageLayer> {
        self.page.borrow_mut().layers.remove_layer(name)
    }

    /// Makes the navigation state (and its zoom notifications) available
    pub fn set_navigation(&self, zoom: f64) {
        self.page.borrow_mut().zoom = Some(zoom);
    }

    /// Changes the zoom factor and notifies every listener
    pub fn set_zoom(&self, zoom: f64) {
        let mut listeners = {
            let mut page = self.page.borrow_mut();
            page.zoom = Some(zoom);
            std::mem::take(&mut page.zoom_listeners)
        };

        for listener in listeners.iter_mut() {
            listener(zoom);
        }

        let mut page = self.page.borrow_mut();
        listeners.append(&mut page.zoom_listeners);
        page.zoom_listeners = listeners;
    }

    /// Clicks the mounted toggle. Returns `false` if there is nothing to click.
    pub fn click_toggle(&self) -> bool {
        let Some(toggle) = self.page.borrow().toggle.clone() else {
            return false;
        };
        let Some(mut handler) = toggle.borrow_mut().handler.take() else {
            return false;
        };

        handler();

        let mut state = toggle.borrow_mut();
        if state.handler.is_none() {
            state.handler = Some(handler);
        }
        true
    }

    /// Text on the mounted toggle
    pub fn toggle_label(&self) -> Option<String> {
        let toggle = self.page.borrow().toggle.clone()?;
        let label = toggle.borrow().label.clone();
        Some(label)
    }

    /// Toolbar children in order, including the mounted toggle
    pub fn toolbar_children(&self) -> Option<Vec<String>> {
        self.page.borrow().toolbar.clone()
    }

    pub fn render_scale_target(&self, layer_name: &str) -> Option<f64> {
        self.page
            .borrow()
            .layers
            .get_layer_by_name(layer_name)
            .map(|layer| layer.render_scale_target())
    }

    pub fn zoom_listener_count(&self) -> usize {
        self.page.borrow().zoom_listeners.len()
    }

    pub fn storage(&self) -> MemoryStore {
        self.storage.clone()
    }

    pub fn layers(&self) -> HeadlessLayers {
        HeadlessLayers(self.page.clone())
    }

    pub fn navigation(&self) -> HeadlessNavigation {
        HeadlessNavigation(self.page.clone())
    }

    pub fn toolbar(&self) -> HeadlessToolbar {
        HeadlessToolbar(self.page.clone())
    }

    /// All collaborators the switcher needs, backed by this page
    pub fn bindings(
        &self,
    ) -> HostBindings<MemoryStore, HeadlessLayers, HeadlessToolbar, HeadlessNavigation> {
        HostBindings {
            store: self.storage(),
            layers: self.layers(),
            ui: self.toolbar(),
            zoom: self.navigation(),
        }
    }
}

/// The page's layer registry
pub struct HeadlessLayers(Rc<RefCell<PageState>>);

impl LayerRegistry for HeadlessLayers {
    fn has_layer(&self, name: &str) -> bool {
        self.0.borrow().layers.has_layer(name)
    }

    fn with_layer_mut<F, R>(&mut self, name: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn RenderScaleLayer) -> R,
    {
        self.0.borrow_mut().layers.with_layer_mut(name, f)
    }
}

/// The page's navigation state
#[derive(Clone)]
pub struct HeadlessNavigation(Rc<RefCell<PageState>>);

impl ZoomSource for HeadlessNavigation {
    fn is_available(&self) -> bool {
        self.0.borrow().zoom.is_some()
    }

    fn zoom(&self) -> f64 {
        self.0.borrow().zoom.unwrap_or(1.0)
    }

    fn subscribe(&mut self, callback: ZoomCallback) -> Result<()> {
        let mut page = self.0.borrow_mut();
        if page.zoom.is_none() {
            return Err(Error::Host("navigation state not available".to_string()));
        }
        page.zoom_listeners.push(callback);
        Ok(())
    }
}

/// The page's top bar
pub struct HeadlessToolbar(Rc<RefCell<PageState>>);

impl UiHost for HeadlessToolbar {
    type Control = HeadlessToggle;

    fn top_bar_ready(&self, top_bar_class: &str) -> bool {
        let page = self.0.borrow();
        page.toolbar.is_some() && page.top_bar_class == top_bar_class
    }

    fn mount_toggle(&mut self, top_bar_class: &str, anchor_class: &str) -> Result<HeadlessToggle> {
        if !self.top_bar_ready(top_bar_class) {
            return Err(Error::Dom(format!("no element with class '{}'", top_bar_class)));
        }

        let mut page = self.0.borrow_mut();
        let toggle = Rc::new(RefCell::new(ToggleState::default()));
        page.toggle = Some(toggle.clone());

        if let Some(children) = page.toolbar.as_mut() {
            let position = children
                .iter()
                .position(|child| child == anchor_class)
                .unwrap_or(children.len());
            children.insert(position, TOGGLE_ELEMENT.to_string());
        }

        Ok(HeadlessToggle(toggle))
    }
}

/// The mounted toggle button
pub struct HeadlessToggle(Rc<RefCell<ToggleState>>);

impl ToggleControl for HeadlessToggle {
    fn set_label(&mut self, text: &str) {
        self.0.borrow_mut().label = text.to_string();
    }

    fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    fn on_click(&mut self, handler: ClickCallback) -> Result<()> {
        self.0.borrow_mut().handler = Some(handler);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_toggle_mounts_before_anchor() {
        let host = HeadlessHost::new();
        host.show_toolbar("top", &["left", "anchor", "right"]);

        let mut toolbar = host.toolbar();
        assert!(toolbar.top_bar_ready("top"));
        assert!(!toolbar.top_bar_ready("other"));
        toolbar.mount_toggle("top", "anchor").unwrap();

        assert_eq!(
            host.toolbar_children().unwrap(),
            vec!["left", TOGGLE_ELEMENT, "anchor", "right"]
        );
    }

    #[test]
    fn test_toggle_appended_without_anchor() {
        let host = HeadlessHost::new();
        host.show_toolbar("top", &["left"]);
        host.toolbar().mount_toggle("top", "anchor").unwrap();
        assert_eq!(host.toolbar_children().unwrap(), vec!["left", TOGGLE_ELEMENT]);
    }

    #[test]
    fn test_mount_without_toolbar_fails() {
        let host = HeadlessHost::new();
        assert!(host.toolbar().mount_toggle("top", "anchor").is_err());
    }

    #[test]
    fn test_zoom_listeners_receive_changes() {
        let host = HeadlessHost::new();
        let mut navigation = host.navigation();
        assert!(!navigation.is_available());
        assert!(navigation.subscribe(Box::new(|_| {})).is_err());

        host.set_navigation(1.0);
        let seen = Rc::new(Cell::new(0.0));
        let sink = seen.clone();
        navigation.subscribe(Box::new(move |z| sink.set(z))).unwrap();

        host.set_zoom(3.5);
        assert_eq!(seen.get(), 3.5);
        assert_eq!(navigation.zoom(), 3.5);
        assert_eq!(host.zoom_listener_count(), 1);
    }

    #[test]
    fn test_click_invokes_handler() {
        let host = HeadlessHost::new();
        assert!(!host.click_toggle());

        host.show_toolbar("top", &[]);
        let mut toggle = host.toolbar().mount_toggle("top", "anchor").unwrap();
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        toggle
            .on_click(Box::new(move || counter.set(counter.get() + 1)))
            .unwrap();

        assert!(host.click_toggle());
        assert!(host.click_toggle());
        assert_eq!(clicks.get(), 2);
    }
}
