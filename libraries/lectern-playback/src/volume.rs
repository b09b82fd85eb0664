//! Volume level for the bound media resource
//!
//! The platform player takes a linear level in `[0.0, 1.0]`. Values outside
//! that range are clamped on construction, so a stored `Volume` is always valid.

use serde::{Deserialize, Serialize};

/// Below this the level is treated as muted
const MUTE_THRESHOLD: f64 = 0.001;

/// Linear volume level, guaranteed to be within `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Volume(f64);

impl Volume {
    /// Silence
    pub const MIN: Volume = Volume(0.0);

    /// Full level
    pub const MAX: Volume = Volume(1.0);

    /// Create a volume level, clamping to `[0.0, 1.0]`
    ///
    /// `NaN` maps to silence. Callers that must ignore `NaN` instead should use
    /// [`Volume::try_new`].
    pub fn new(level: f64) -> Self {
        Self::try_new(level).unwrap_or(Self::MIN)
    }

    /// Create a volume level, or `None` if `level` is `NaN`
    pub fn try_new(level: f64) -> Option<Self> {
        if level.is_nan() {
            None
        } else {
            Some(Self(level.clamp(0.0, 1.0)))
        }
    }

    /// Get the level
    pub fn level(self) -> f64 {
        self.0
    }

    /// Check if effectively silent
    pub fn is_muted(self) -> bool {
        self.0 < MUTE_THRESHOLD
    }

    /// Level as a whole percentage, for display
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<f64> for Volume {
    fn from(level: f64) -> Self {
        Self::new(level)
    }
}

impl From<Volume> for f64 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(Volume::new(1.7).level(), 1.0);
        assert_eq!(Volume::new(-0.2).level(), 0.0);
        assert_eq!(Volume::new(f64::INFINITY).level(), 1.0);
        assert_eq!(Volume::new(f64::NEG_INFINITY).level(), 0.0);
        assert_eq!(Volume::new(0.35).level(), 0.35);
    }

    #[test]
    fn nan_is_rejected() {
        assert!(Volume::try_new(f64::NAN).is_none());
        assert_eq!(Volume::new(f64::NAN), Volume::MIN);
    }

    #[test]
    fn muted_below_threshold() {
        assert!(Volume::new(0.0).is_muted());
        assert!(Volume::new(0.0005).is_muted());
        assert!(!Volume::new(0.01).is_muted());
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(Volume::new(0.333).percent(), 33);
        assert_eq!(Volume::MAX.percent(), 100);
    }

    #[test]
    fn deserializing_clamps() {
        let volume: Volume = serde_json::from_str("4.0").unwrap();
        assert_eq!(volume, Volume::MAX);
    }
}
