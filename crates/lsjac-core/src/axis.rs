//! Shared frequency axis.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Evenly spaced frequency grid, inclusive of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyGrid {
    /// First frequency (GHz).
    #[serde(default = "FrequencyGrid::default_start")]
    pub start: f64,
    /// Last frequency (GHz).
    #[serde(default = "FrequencyGrid::default_stop")]
    pub stop: f64,
    /// Number of points.
    #[serde(default = "FrequencyGrid::default_points")]
    pub points: usize,
}

impl FrequencyGrid {
    fn default_start() -> f64 {
        90.0
    }
    fn default_stop() -> f64 {
        110.0
    }
    fn default_points() -> usize {
        1001
    }

    pub fn new(start: f64, stop: f64, points: usize) -> Self {
        Self {
            start,
            stop,
            points,
        }
    }

    /// Check the grid describes a usable axis.
    pub fn validate(&self) -> Result<()> {
        if self.points == 0 {
            return Err(Error::InvalidConfig(
                "frequency grid needs at least one point".to_string(),
            ));
        }
        if !self.start.is_finite() || !self.stop.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "frequency grid bounds must be finite, got {}..{}",
                self.start, self.stop
            )));
        }
        Ok(())
    }

    /// Grid values.
    pub fn values(&self) -> Vec<f64> {
        match self.points {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let step = (self.stop - self.start) / (n - 1) as f64;
                (0..n).map(|i| self.start + step * i as f64).collect()
            }
        }
    }
}

impl Default for FrequencyGrid {
    fn default() -> Self {
        Self {
            start: Self::default_start(),
            stop: Self::default_stop(),
            points: Self::default_points(),
        }
    }
}
