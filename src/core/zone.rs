// core/zone.rs

// Maps a resolved distance reading onto a social zone. Thresholds come from
// configuration; the classifier itself is a pure function of the reading.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ProxemicsError, Result};

/// Discretized proximity band around the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Zone {
    /// Further than the far threshold
    Far,
    /// Between the near and far thresholds
    Medium,
    /// At or inside the near threshold
    Near,
    /// No valid reading yet, or idle after a neutral reset
    #[default]
    Unknown,
}

impl Zone {
    /// Returns true for the three real zones
    pub fn is_known(self) -> bool {
        !matches!(self, Zone::Unknown)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Zone::Far => "far",
            Zone::Medium => "medium",
            Zone::Near => "near",
            Zone::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Distance thresholds in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneThresholds {
    /// Readings strictly above this are Far
    pub far_above_m: f64,
    /// Readings at or below this are Near
    pub near_at_or_below_m: f64,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        ZoneThresholds {
            far_above_m: 1.5,
            near_at_or_below_m: 0.7,
        }
    }
}

impl ZoneThresholds {
    /// Rejects non-finite, non-positive or inverted thresholds
    pub fn validate(&self) -> Result<()> {
        let finite = self.far_above_m.is_finite() && self.near_at_or_below_m.is_finite();
        if !finite || self.near_at_or_below_m <= 0.0 {
            return Err(ProxemicsError::ConfigError(format!(
                "zone thresholds must be finite and positive (near={}, far={})",
                self.near_at_or_below_m, self.far_above_m
            )));
        }
        if self.near_at_or_below_m >= self.far_above_m {
            return Err(ProxemicsError::ConfigError(format!(
                "near threshold {} must be below far threshold {}",
                self.near_at_or_below_m, self.far_above_m
            )));
        }
        Ok(())
    }
}

/// Pure distance-to-zone classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneClassifier {
    thresholds: ZoneThresholds,
}

impl ZoneClassifier {
    /// Creates a classifier over the given thresholds
    pub fn new(thresholds: ZoneThresholds) -> Self {
        ZoneClassifier { thresholds }
    }

    /// Returns the thresholds in use
    pub fn thresholds(&self) -> ZoneThresholds {
        self.thresholds
    }

    /// Classifies a reading. Missing, non-finite and negative readings are Unknown.
    /// Boundary values belong to the closer zone.
    pub fn classify(&self, meters: Option<f64>) -> Zone {
        let Some(meters) = meters else {
            return Zone::Unknown;
        };
        if !meters.is_finite() || meters < 0.0 {
            return Zone::Unknown;
        }

        if meters > self.thresholds.far_above_m {
            Zone::Far
        } else if meters > self.thresholds.near_at_or_below_m {
            Zone::Medium
        } else {
            Zone::Near
        }
    }
}

// Weaknesses:
// - No hysteresis; a user standing on a boundary flips zones on every sample
//   and each flip is a fresh entry downstream. Debounce lives with the sensor.
