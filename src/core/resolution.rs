use crate::core::constants::{
    HIGH_RES, LABEL_SUFFIX, LOW_RES_ZOOMED_IN, LOW_RES_ZOOMED_OUT, ZOOM_THRESHOLD,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Render scale tier applied to the image layer.
///
/// Lower numeric values mean sharper rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum Resolution {
    #[default]
    High,
    LowZoomedIn,
    LowZoomedOut,
}

impl Resolution {
    /// Numeric render scale target for this tier
    pub fn value(self) -> u32 {
        match self {
            Self::High => HIGH_RES,
            Self::LowZoomedIn => LOW_RES_ZOOMED_IN,
            Self::LowZoomedOut => LOW_RES_ZOOMED_OUT,
        }
    }

    /// Maps a numeric tier back to a resolution, rejecting anything outside the closed set
    pub fn from_value(value: u32) -> Result<Self> {
        match value {
            HIGH_RES => Ok(Self::High),
            LOW_RES_ZOOMED_IN => Ok(Self::LowZoomedIn),
            LOW_RES_ZOOMED_OUT => Ok(Self::LowZoomedOut),
            other => Err(Error::InvalidResolution(other as i64)),
        }
    }

    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    pub fn is_low(self) -> bool {
        !self.is_high()
    }

    /// Button text, always `"<value>px"`
    pub fn label(self) -> String {
        format!("{}{}", self.value(), LABEL_SUFFIX)
    }

    /// Low tier appropriate for `zoom`, using the default threshold.
    pub fn appropriate_low_tier(zoom: f64) -> Self {
        Self::appropriate_low_tier_with(zoom, ZOOM_THRESHOLD)
    }

    /// Low tier appropriate for `zoom`.
    ///
    /// The threshold itself belongs to the zoomed-out side. NaN never
    /// compares greater and therefore also picks the zoomed-out tier.
    pub fn appropriate_low_tier_with(zoom: f64, threshold: f64) -> Self {
        if zoom > threshold {
            Self::LowZoomedIn
        } else {
            Self::LowZoomedOut
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<u32> for Resolution {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<Resolution> for u32 {
    fn from(resolution: Resolution) -> Self {
        resolution.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_values() {
        assert_eq!(Resolution::High.value(), 1);
        assert_eq!(Resolution::LowZoomedIn.value(), 2);
        assert_eq!(Resolution::LowZoomedOut.value(), 4);
        assert_eq!(Resolution::default(), Resolution::High);
    }

    #[test]
    fn test_from_value_rejects_unknown_tiers() {
        assert_eq!(Resolution::from_value(4).unwrap(), Resolution::LowZoomedOut);
        assert!(Resolution::from_value(0).is_err());
        assert!(Resolution::from_value(3).is_err());
    }

    #[test]
    fn test_appropriate_low_tier_boundary() {
        assert_eq!(Resolution::appropriate_low_tier(2.0), Resolution::LowZoomedOut);
        assert_eq!(Resolution::appropriate_low_tier(2.01), Resolution::LowZoomedIn);
        assert_eq!(Resolution::appropriate_low_tier(1.0), Resolution::LowZoomedOut);
        assert_eq!(Resolution::appropriate_low_tier(5.0), Resolution::LowZoomedIn);
        assert_eq!(Resolution::appropriate_low_tier(f64::NAN), Resolution::LowZoomedOut);
    }

    #[test]
    fn test_label() {
        assert_eq!(Resolution::High.label(), "1px");
        assert_eq!(Resolution::LowZoomedIn.label(), "2px");
        assert_eq!(Resolution::LowZoomedOut.label(), "4px");
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&Resolution::LowZoomedOut).unwrap();
        assert_eq!(json, "4");
        let back: Resolution = serde_json::from_str("2").unwrap();
        assert_eq!(back, Resolution::LowZoomedIn);
        assert!(serde_json::from_str::<Resolution>("3").is_err());
    }
}
