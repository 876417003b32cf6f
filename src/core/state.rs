//! Toggle / zoom reconciliation state machine
//!
//! The machine only decides transitions. Applying a decided value to storage,
//! the layer and the button is the controller's job.

use crate::core::constants::ZOOM_THRESHOLD;
use crate::core::resolution::Resolution;

/// Current resolution plus the zoom threshold that selects the low tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionState {
    current: Resolution,
    zoom_threshold: f64,
}

impl ResolutionState {
    pub fn new(initial: Resolution) -> Self {
        Self::with_threshold(initial, ZOOM_THRESHOLD)
    }

    pub fn with_threshold(initial: Resolution, zoom_threshold: f64) -> Self {
        Self {
            current: initial,
            zoom_threshold,
        }
    }

    pub fn current(&self) -> Resolution {
        self.current
    }

    pub fn zoom_threshold(&self) -> f64 {
        self.zoom_threshold
    }

    pub fn appropriate_low_tier(&self, zoom: f64) -> Resolution {
        Resolution::appropriate_low_tier_with(zoom, self.zoom_threshold)
    }

    /// Next value after a user toggle at `zoom`. Always a transition.
    pub fn next_on_toggle(&self, zoom: f64) -> Resolution {
        if self.current.is_high() {
            self.appropriate_low_tier(zoom)
        } else {
            Resolution::High
        }
    }

    /// Next value after a zoom change, or `None` when nothing should change.
    ///
    /// Zoom changes never move a high-quality setting to low quality.
    pub fn next_on_zoom(&self, zoom: f64) -> Option<Resolution> {
        if self.current.is_high() {
            return None;
        }

        let tier = self.appropriate_low_tier(zoom);
        (tier != self.current).then_some(tier)
    }

    /// Records a completed transition
    pub fn set_current(&mut self, value: Resolution) {
        self.current = value;
    }
}

impl Default for ResolutionState {
    fn default() -> Self {
        Self::new(Resolution::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_from_high_picks_zoom_tier() {
        let state = ResolutionState::new(Resolution::High);
        assert_eq!(state.next_on_toggle(1.0), Resolution::LowZoomedOut);
        assert_eq!(state.next_on_toggle(5.0), Resolution::LowZoomedIn);
        assert_eq!(state.next_on_toggle(2.0), Resolution::LowZoomedOut);
    }

    #[test]
    fn test_toggle_from_low_returns_high() {
        for low in [Resolution::LowZoomedIn, Resolution::LowZoomedOut] {
            let state = ResolutionState::new(low);
            for zoom in [0.5, 2.0, 3.0, 100.0] {
                assert_eq!(state.next_on_toggle(zoom), Resolution::High);
            }
        }
    }

    #[test]
    fn test_zoom_never_leaves_high() {
        let state = ResolutionState::new(Resolution::High);
        for zoom in [0.1, 1.0, 2.0, 2.5, 10.0] {
            assert_eq!(state.next_on_zoom(zoom), None);
        }
    }

    #[test]
    fn test_zoom_retunes_low_tier() {
        let state = ResolutionState::new(Resolution::LowZoomedOut);
        assert_eq!(state.next_on_zoom(3.0), Some(Resolution::LowZoomedIn));
        assert_eq!(state.next_on_zoom(1.0), None);

        let state = ResolutionState::new(Resolution::LowZoomedIn);
        assert_eq!(state.next_on_zoom(1.0), Some(Resolution::LowZoomedOut));
        assert_eq!(state.next_on_zoom(3.0), None);
    }

    #[test]
    fn test_custom_threshold() {
        let state = ResolutionState::with_threshold(Resolution::High, 4.0);
        assert_eq!(state.next_on_toggle(3.0), Resolution::LowZoomedOut);
        assert_eq!(state.next_on_toggle(4.5), Resolution::LowZoomedIn);
    }
}
