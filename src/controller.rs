//! The single owner of the current resolution
//!
//! Every transition goes through [`ResolutionController::apply`], which
//! persists the value, pushes it to the layer and then to the button label
//! before returning.

use crate::{
    core::{config::SwitcherConfig, resolution::Resolution, state::ResolutionState},
    layers::binding::LayerBinding,
    persistence::ResolutionPreference,
    traits::{LayerRegistry, PreferenceStore, ToggleControl},
    ui::button::ResolutionButton,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Controller shared between the click and zoom callbacks
pub type SharedController<S, L, C> = Rc<RefCell<ResolutionController<S, L, C>>>;

pub struct ResolutionController<S, L, C>
where
    S: PreferenceStore,
    L: LayerRegistry,
    C: ToggleControl,
{
    state: ResolutionState,
    preference: ResolutionPreference<S>,
    layer: LayerBinding<L>,
    button: ResolutionButton<C>,
}

impl<S, L, C> ResolutionController<S, L, C>
where
    S: PreferenceStore,
    L: LayerRegistry,
    C: ToggleControl,
{
    /// Seeds the state from the persisted preference and renders its label.
    ///
    /// Nothing is written to the layer or storage until [`Self::sync`] or a
    /// transition runs.
    pub fn new(config: &SwitcherConfig, store: S, layers: L, control: C) -> Self {
        let preference = ResolutionPreference::new(store, config.storage_key.clone());
        let initial = preference.load();
        Self::from_parts(
            ResolutionState::with_threshold(initial, config.zoom_threshold),
            preference,
            LayerBinding::new(layers, config.layer_name.clone()),
            ResolutionButton::new(control, initial),
        )
    }

    /// Assembles a controller from already built collaborators
    pub fn from_parts(
        state: ResolutionState,
        preference: ResolutionPreference<S>,
        layer: LayerBinding<L>,
        mut button: ResolutionButton<C>,
    ) -> Self {
        log::info!("Starting at resolution {}", state.current());
        button.update_label(state.current());

        Self {
            state,
            preference,
            layer,
            button,
        }
    }

    pub fn current(&self) -> Resolution {
        self.state.current()
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    pub fn preference(&self) -> &ResolutionPreference<S> {
        &self.preference
    }

    pub fn layer(&self) -> &LayerBinding<L> {
        &self.layer
    }

    pub fn button(&self) -> &ResolutionButton<C> {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut ResolutionButton<C> {
        &mut self.button
    }

    /// User toggle at the live zoom factor. Always transitions.
    pub fn toggle(&mut self, zoom: f64) -> Resolution {
        let next = self.state.next_on_toggle(zoom);
        log::debug!("Toggle at zoom {:.3}: {} -> {}", zoom, self.current(), next);
        self.apply(next);
        next
    }

    /// Host zoom change. Returns the new value if a transition happened.
    pub fn reconcile_zoom(&mut self, zoom: f64) -> Option<Resolution> {
        let next = self.state.next_on_zoom(zoom)?;
        log::debug!(
            "Zoom {:.3} crossed threshold: {} -> {}",
            zoom,
            self.current(),
            next
        );
        self.apply(next);
        Some(next)
    }

    /// Re-applies the current value to storage, layer and label
    pub fn sync(&mut self) {
        self.apply(self.current());
    }

    /// Makes `value` current: storage first, then the layer, then the label.
    pub fn apply(&mut self, value: Resolution) {
        self.state.set_current(value);

        if let Err(e) = self.preference.save(value) {
            log::warn!("Could not persist resolution {}: {}", value, e);
        }
        self.layer.apply_to_layer(value);
        self.button.update_label(value);
    }
}
