//! Wiring of the switcher into a host page
//!
//! [`Switcher`] holds the host collaborators until the readiness gate
//! fires, then mounts the button, seeds and applies the persisted
//! resolution, and subscribes to zoom changes.

use crate::{
    controller::{ResolutionController, SharedController},
    core::{config::SwitcherConfig, state::ResolutionState},
    layers::binding::LayerBinding,
    persistence::ResolutionPreference,
    readiness::{ReadinessCheck, ReadinessGate},
    traits::{LayerRegistry, PreferenceStore, UiHost, ZoomSource},
    ui::button::create_button,
    Error, Result,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// The host-side collaborators the switcher is installed into
pub struct HostBindings<S, L, U, Z> {
    pub store: S,
    pub layers: L,
    pub ui: U,
    pub zoom: Z,
}

pub struct Switcher<S, L, U, Z>
where
    S: PreferenceStore + 'static,
    L: LayerRegistry + 'static,
    U: UiHost,
    U::Control: 'static,
    Z: ZoomSource + Clone + 'static,
{
    config: SwitcherConfig,
    gate: ReadinessGate,
    pending: Option<HostBindings<S, L, U, Z>>,
    controller: Option<SharedController<S, L, U::Control>>,
}

impl<S, L, U, Z> Switcher<S, L, U, Z>
where
    S: PreferenceStore + 'static,
    L: LayerRegistry + 'static,
    U: UiHost,
    U::Control: 'static,
    Z: ZoomSource + Clone + 'static,
{
    pub fn new(config: SwitcherConfig, bindings: HostBindings<S, L, U, Z>) -> Self {
        Self {
            config,
            gate: ReadinessGate::new(),
            pending: Some(bindings),
            controller: None,
        }
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    pub fn gate(&self) -> &ReadinessGate {
        &self.gate
    }

    pub fn is_installed(&self) -> bool {
        self.controller.is_some()
    }

    /// The controller, once installed
    pub fn controller(&self) -> Option<SharedController<S, L, U::Control>> {
        self.controller.clone()
    }

    /// Takes one readiness probe and installs on the first ready one.
    ///
    /// Returns the controller on the tick that installed it, `None` on every
    /// other tick.
    pub fn tick(&mut self) -> Result<Option<SharedController<S, L, U::Control>>> {
        let check = probe(&self.config, self.pending.as_ref());
        if !self.gate.poll(check) {
            return Ok(None);
        }
        self.install().map(Some)
    }

    /// Polls on the configured interval until the host is ready, then
    /// installs. Waits forever if the host never becomes ready.
    pub async fn run(&mut self) -> Result<SharedController<S, L, U::Control>> {
        if let Some(controller) = &self.controller {
            return Ok(controller.clone());
        }

        let interval = self.config.poll_interval();
        let config = &self.config;
        let pending = &self.pending;
        self.gate
            .wait_until_ready(interval, || probe(config, pending.as_ref()))
            .await;

        self.install()
    }

    fn install(&mut self) -> Result<SharedController<S, L, U::Control>> {
        let HostBindings {
            store,
            layers,
            mut ui,
            mut zoom,
        } = self
            .pending
            .take()
            .ok_or_else(|| Error::Host("switcher already installed".to_string()))?;

        let config = &self.config;
        let preference = ResolutionPreference::new(store, config.storage_key.clone());
        let initial = preference.load();
        let button = create_button(
            &mut ui,
            &config.top_bar_class,
            &config.anchor_class,
            initial,
        )?;

        let controller = Rc::new(RefCell::new(ResolutionController::from_parts(
            ResolutionState::with_threshold(initial, config.zoom_threshold),
            preference,
            LayerBinding::new(layers, config.layer_name.clone()),
            button,
        )));
        controller.borrow_mut().sync();

        let click_target = Rc::downgrade(&controller);
        let click_zoom = zoom.clone();
        controller
            .borrow_mut()
            .button_mut()
            .on_click(Box::new(move || {
                with_controller(&click_target, |c| {
                    c.toggle(click_zoom.zoom());
                })
            }))?;

        let zoom_target = Rc::downgrade(&controller);
        zoom.subscribe(Box::new(move |factor| {
            with_controller(&zoom_target, |c| {
                c.reconcile_zoom(factor);
            })
        }))?;

        log::info!(
            "Resolution switcher installed for layer '{}'",
            config.layer_name
        );
        self.controller = Some(controller.clone());
        Ok(controller)
    }
}

fn probe<S, L, U, Z>(config: &SwitcherConfig, bindings: Option<&HostBindings<S, L, U, Z>>) -> ReadinessCheck
where
    L: LayerRegistry,
    U: UiHost,
    Z: ZoomSource,
{
    match bindings {
        Some(b) => ReadinessCheck {
            top_bar: b.ui.top_bar_ready(&config.top_bar_class),
            zoom_source: b.zoom.is_available(),
            layer: b.layers.has_layer(&config.layer_name),
        },
        None => ReadinessCheck::default(),
    }
}

/// Runs `f` on the controller if it is still alive and not already borrowed
fn with_controller<T, F>(target: &Weak<RefCell<T>>, f: F)
where
    F: FnOnce(&mut T),
{
    let Some(controller) = target.upgrade() else {
        return;
    };
    match controller.try_borrow_mut() {
        Ok(mut controller) => f(&mut controller),
        Err(_) => log::warn!("Dropping re-entrant resolution event"),
    };
}
