//! Configuration for the resolution switcher
//!
//! Every fixed value the switcher relies on (storage key, layer name, DOM
//! class names, poll interval, zoom threshold) lives here so the same engine
//! can be pointed at another viewer deployment through a preset or a partial
//! JSON override.

use crate::core::constants::{
    ANCHOR_CLASS, LAYER_NAME, POLL_INTERVAL_MS, STORAGE_KEY, TOP_BAR_CLASS, ZOOM_THRESHOLD,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SwitcherProfile {
    /// The BANC EM deployment the script was written for
    #[default]
    Banc,
    Custom(SwitcherConfig),
}

impl SwitcherProfile {
    pub fn resolve(&self) -> SwitcherConfig {
        match self {
            Self::Banc => SwitcherConfig {
                storage_key: STORAGE_KEY.to_string(),
                layer_name: LAYER_NAME.to_string(),
                top_bar_class: TOP_BAR_CLASS.to_string(),
                anchor_class: ANCHOR_CLASS.to_string(),
                poll_interval_ms: POLL_INTERVAL_MS,
                zoom_threshold: ZOOM_THRESHOLD,
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitcherConfig {
    /// Key under which the last resolution is persisted
    pub storage_key: String,
    /// Name of the image layer in the host's layer registry
    pub layer_name: String,
    /// Class of the toolbar container the button goes into
    pub top_bar_class: String,
    /// Class of the toolbar element the button is inserted before
    pub anchor_class: String,
    /// Readiness poll interval
    pub poll_interval_ms: u64,
    /// Zoom factor above which the zoomed-in low tier is used
    pub zoom_threshold: f64,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        SwitcherProfile::Banc.resolve()
    }
}

impl SwitcherConfig {
    /// Parses a (possibly partial) JSON object, filling gaps with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn with_layer_name(mut self, name: impl Into<String>) -> Self {
        self.layer_name = name.into();
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the poll interval, rounded to whole milliseconds and at least 1 ms
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = u64::try_from(interval.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(Error::Config("storage_key must not be empty".to_string()));
        }
        if self.layer_name.is_empty() {
            return Err(Error::Config("layer_name must not be empty".to_string()));
        }
        if self.top_bar_class.is_empty() {
            return Err(Error::Config("top_bar_class must not be empty".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if !self.zoom_threshold.is_finite() || self.zoom_threshold <= 0.0 {
            return Err(Error::Config(format!(
                "zoom_threshold must be a positive number, got {}",
                self.zoom_threshold
            )));
        }
        Ok(())
    }
}
