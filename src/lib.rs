//! # Resolution Switcher
//!
//! A zoom-aware image quality toggle for web-hosted volume viewers.
//!
//! One button in the viewer's top bar flips a named image layer between full
//! resolution and a low-resolution tier. The low tier follows the zoom level
//! while it is engaged, and the user's last choice survives page reloads.
//!
//! The host viewer, its DOM and the browser storage are reached through the
//! traits in [`traits`]; [`host::headless`] provides in-memory versions and
//! `host::web` (feature `wasm`) binds them to a live Neuroglancer page.

pub mod controller;
pub mod core;
pub mod host;
pub mod layers;
pub mod persistence;
pub mod prelude;
pub mod readiness;
pub mod runtime;
pub mod switcher;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{SwitcherConfig, SwitcherProfile},
    resolution::Resolution,
    state::ResolutionState,
};

pub use controller::{ResolutionController, SharedController};

pub use layers::{base::ImageLayer, binding::LayerBinding, manager::LayerManager};

pub use persistence::{MemoryStore, ResolutionPreference};

pub use readiness::{ReadinessCheck, ReadinessGate};

pub use switcher::{HostBindings, Switcher};

pub use ui::button::ResolutionButton;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, SwitcherError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum SwitcherError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Host error: {0}")]
    Host(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid resolution value: {0}")]
    InvalidResolution(i64),
}

/// Error type alias for convenience
pub type Error = SwitcherError;

/// Initialises `env_logger` for native tools, defaulting to `info`
#[cfg(feature = "debug")]
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
