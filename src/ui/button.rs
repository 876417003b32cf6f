use crate::{
    core::resolution::Resolution,
    traits::{ClickCallback, ToggleControl, UiHost},
    Result,
};

/// The toggle button in the viewer's top bar.
///
/// Holds no resolution of its own; the label is rewritten from whatever
/// value the controller pushes.
pub struct ResolutionButton<C: ToggleControl> {
    control: C,
}

impl<C: ToggleControl> ResolutionButton<C> {
    /// Wraps an already mounted control and renders `initial`
    pub fn new(mut control: C, initial: Resolution) -> Self {
        control.set_label(&initial.label());
        Self { control }
    }

    /// Sets the label to `"<value>px"`, skipping the write when unchanged
    pub fn update_label(&mut self, value: Resolution) {
        let label = value.label();
        if self.control.label() != label {
            self.control.set_label(&label);
        }
    }

    pub fn label(&self) -> String {
        self.control.label()
    }

    pub fn on_click(&mut self, handler: ClickCallback) -> Result<()> {
        self.control.on_click(handler)
    }

    pub fn control(&self) -> &C {
        &self.control
    }
}

/// Mounts the control in the top bar and renders the current label
pub fn create_button<U: UiHost>(
    ui: &mut U,
    top_bar_class: &str,
    anchor_class: &str,
    initial: Resolution,
) -> Result<ResolutionButton<U::Control>> {
    let control = ui.mount_toggle(top_bar_class, anchor_class)?;
    log::debug!("Mounted resolution toggle in '{}'", top_bar_class);
    Ok(ResolutionButton::new(control, initial))
}
