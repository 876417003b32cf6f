//! Core constants taken from the deployed userscript.
//! Keeping them in a single place makes it easier to retarget another viewer.

/// Full-quality render scale target.
pub const HIGH_RES: u32 = 1;

/// Low-quality tier used while zoomed in past the threshold.
pub const LOW_RES_ZOOMED_IN: u32 = 2;

/// Low-quality tier used at or below the threshold.
pub const LOW_RES_ZOOMED_OUT: u32 = 4;

/// Zoom factor above which the zoomed-in low tier applies.
pub const ZOOM_THRESHOLD: f64 = 2.0;

/// Local storage key holding the last chosen resolution.
pub const STORAGE_KEY: &str = "kk-image-resolution";

/// Image layer whose render scale is switched.
pub const LAYER_NAME: &str = "BANC EM";

/// Class of the viewer's top bar container.
pub const TOP_BAR_CLASS: &str = "neuroglancer-viewer-top-row";

/// Class of the element the toggle button is inserted in front of.
pub const ANCHOR_CLASS: &str = "neuroglancer-annotation-tool-status";

/// Readiness poll interval in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 50;

/// Suffix appended to the numeric tier on the button label.
pub const LABEL_SUFFIX: &str = "px";
