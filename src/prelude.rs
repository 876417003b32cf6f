//! Prelude module for common resolution switcher types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use resolution_switcher::prelude::*;`

pub use crate::core::{
    config::{SwitcherConfig, SwitcherProfile},
    resolution::Resolution,
    state::ResolutionState,
};

pub use crate::controller::{ResolutionController, SharedController};

pub use crate::layers::{base::ImageLayer, binding::LayerBinding, manager::LayerManager};

pub use crate::persistence::{MemoryStore, ResolutionPreference};

pub use crate::readiness::{ReadinessCheck, ReadinessGate};

pub use crate::switcher::{HostBindings, Switcher};

pub use crate::traits::{
    LayerRegistry, PreferenceStore, RenderScaleLayer, ToggleControl, UiHost, ZoomSource,
};

pub use crate::host::headless::HeadlessHost;

pub use crate::{Result, SwitcherError};

pub use std::{future::Future, time::Duration};

pub use fxhash::FxHashMap as HashMap;
