//! Browser bindings for a live Neuroglancer page
//!
//! The viewer is reached through the page's global `viewer` object, the
//! toolbar through the DOM and persistence through `window.localStorage`.
//! Every lookup on the viewer is optional: a missing object just means the
//! page is not ready yet (or the layer is gone).

use crate::{
    core::config::SwitcherConfig,
    runtime::spawn_local,
    switcher::{HostBindings, Switcher},
    traits::{
        ClickCallback, LayerRegistry, PreferenceStore, RenderScaleLayer, ToggleControl, UiHost,
        ZoomCallback, ZoomSource,
    },
    Error, Result,
};
use js_sys::{Function, Reflect};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Document, Element, Storage};

thread_local! {
    /// Keeps the installed controller alive for the lifetime of the page
    static INSTALLED: RefCell<Option<Rc<dyn Any>>> = RefCell::new(None);
}

fn js_error(context: &str, value: JsValue) -> String {
    format!("{}: {:?}", context, value)
}

/// `target[key]`, treating `undefined` and `null` as absent
fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn global_viewer() -> Option<JsValue> {
    property(&js_sys::global(), "viewer")
}

/// `viewer.navigationState.zoomFactor`
fn zoom_factor() -> Option<JsValue> {
    let viewer = global_viewer()?;
    let navigation = property(&viewer, "navigationState")?;
    property(&navigation, "zoomFactor")
}

/// `window.localStorage`
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::Storage("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| Error::Storage(js_error("localStorage unavailable", e)))?
            .ok_or_else(|| Error::Storage("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| Error::Storage(js_error("getItem failed", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| Error::Storage(js_error("setItem failed", e)))
    }
}

/// `viewer.layerManager`
#[derive(Clone, Copy, Default)]
pub struct NeuroglancerLayers;

impl NeuroglancerLayers {
    /// `viewer.layerManager.getLayerByName(name).layer_.sliceViewRenderScaleTarget`
    fn render_scale_target(name: &str) -> Option<JsValue> {
        let viewer = global_viewer()?;
        let manager = property(&viewer, "layerManager")?;
        let lookup: Function = property(&manager, "getLayerByName")?.dyn_into().ok()?;
        let managed = lookup.call1(&manager, &JsValue::from_str(name)).ok()?;
        if managed.is_undefined() || managed.is_null() {
            return None;
        }
        let layer = property(&managed, "layer_")?;
        property(&layer, "sliceViewRenderScaleTarget")
    }
}

impl LayerRegistry for NeuroglancerLayers {
    fn has_layer(&self, name: &str) -> bool {
        Self::render_scale_target(name).is_some()
    }

    fn with_layer_mut<F, R>(&mut self, name: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn RenderScaleLayer) -> R,
    {
        let target = Self::render_scale_target(name)?;
        let mut layer = WebLayer {
            name: name.to_string(),
            target,
        };
        Some(f(&mut layer))
    }
}

/// A viewer image layer seen through its render scale trackable value
struct WebLayer {
    name: String,
    target: JsValue,
}

impl RenderScaleLayer for WebLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn render_scale_target(&self) -> f64 {
        property(&self.target, "value")
            .and_then(|value| value.as_f64())
            .unwrap_or(1.0)
    }

    fn set_render_scale_target(&mut self, value: f64) {
        if let Err(e) = Reflect::set(
            &self.target,
            &JsValue::from_str("value"),
            &JsValue::from_f64(value),
        ) {
            log::warn!("Setting render scale on '{}' failed: {:?}", self.name, e);
        }
    }
}

/// `viewer.navigationState.zoomFactor`
#[derive(Clone, Copy, Default)]
pub struct NeuroglancerNavigation;

impl NeuroglancerNavigation {
    /// `zoomFactor.changed` together with its `add` function
    fn changed_signal() -> Option<(JsValue, Function)> {
        let changed = property(&zoom_factor()?, "changed")?;
        let add: Function = property(&changed, "add")?.dyn_into().ok()?;
        Some((changed, add))
    }
}

impl ZoomSource for NeuroglancerNavigation {
    fn is_available(&self) -> bool {
        Self::changed_signal().is_some()
    }

    fn zoom(&self) -> f64 {
        zoom_factor()
            .and_then(|zoom| property(&zoom, "value"))
            .and_then(|value| value.as_f64())
            .unwrap_or(1.0)
    }

    fn subscribe(&mut self, mut callback: ZoomCallback) -> Result<()> {
        let (changed, add) = Self::changed_signal()
            .ok_or_else(|| Error::Host("zoomFactor.changed not available".to_string()))?;

        let navigation = *self;
        let listener = Closure::<dyn FnMut()>::new(move || callback(navigation.zoom()));
        add.call1(&changed, listener.as_ref())
            .map_err(|e| Error::Host(js_error("zoomFactor.changed.add failed", e)))?;

        // The signal holds the listener for the rest of the page's life
        listener.forget();
        Ok(())
    }
}

/// The viewer's top bar in the document
pub struct DomToolbar {
    document: Document,
}

impl DomToolbar {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| Error::Dom("no document".to_string()))?;
        Ok(Self { document })
    }

    fn first_by_class(&self, class: &str) -> Option<Element> {
        self.document.get_elements_by_class_name(class).item(0)
    }
}

impl UiHost for DomToolbar {
    type Control = DomToggleButton;

    fn top_bar_ready(&self, top_bar_class: &str) -> bool {
        self.document
            .get_elements_by_class_name(top_bar_class)
            .length()
            > 0
    }

    fn mount_toggle(&mut self, top_bar_class: &str, anchor_class: &str) -> Result<DomToggleButton> {
        let top_bar = self
            .first_by_class(top_bar_class)
            .ok_or_else(|| Error::Dom(format!("no element with class '{}'", top_bar_class)))?;

        // insertBefore only accepts a direct child as reference
        let anchor = self
            .first_by_class(anchor_class)
            .filter(|anchor| anchor.parent_element().as_ref() == Some(&top_bar));

        let button = self
            .document
            .create_element("button")
            .map_err(|e| Error::Dom(js_error("createElement failed", e)))?;
        top_bar
            .insert_before(&button, anchor.as_deref())
            .map_err(|e| Error::Dom(js_error("insertBefore failed", e)))?;

        Ok(DomToggleButton {
            element: button,
            listener: None,
        })
    }
}

/// The `<button>` element in the top bar
pub struct DomToggleButton {
    element: Element,
    listener: Option<Closure<dyn FnMut()>>,
}

impl ToggleControl for DomToggleButton {
    fn set_label(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn label(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn on_click(&mut self, mut handler: ClickCallback) -> Result<()> {
        let listener = Closure::<dyn FnMut()>::new(move || handler());
        self.element
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(|e| Error::Dom(js_error("addEventListener failed", e)))?;
        self.listener = Some(listener);
        Ok(())
    }
}

/// Writes `log` records to the browser console
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!(
            "[resolution-switcher] {} {}",
            record.level(),
            record.args()
        ));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Routes `log` output to the console. Later calls are ignored.
pub fn init_console_logger(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Module initialisation hook
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    init_console_logger(log::LevelFilter::Info);
}

/// Installs the switcher on the current page.
///
/// `config_json` may override any field of the default configuration.
/// Returns once polling has started; installation happens when the viewer
/// is ready.
#[wasm_bindgen(js_name = startResolutionSwitcher)]
pub fn start_resolution_switcher(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    let to_js = |e: Error| JsValue::from_str(&e.to_string());

    let config = match config_json {
        Some(json) => SwitcherConfig::from_json(&json).map_err(to_js)?,
        None => SwitcherConfig::default(),
    };
    let bindings = HostBindings {
        store: LocalStorageStore::open().map_err(to_js)?,
        layers: NeuroglancerLayers,
        ui: DomToolbar::new().map_err(to_js)?,
        zoom: NeuroglancerNavigation,
    };

    let mut switcher = Switcher::new(config, bindings);
    spawn_local(async move {
        match switcher.run().await {
            Ok(controller) => {
                let controller: Rc<dyn Any> = controller;
                INSTALLED.with(|installed| *installed.borrow_mut() = Some(controller));
            }
            Err(e) => log::error!("Resolution switcher failed to install: {}", e),
        }
    });

    Ok(())
}
