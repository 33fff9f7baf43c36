use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::physics::constants::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_SPEED_MULTIPLIER, DEFAULT_TIME_STEP, SOLAR_MASS,
};

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

/// Knobs fixed for the lifetime of one simulation. The effective per-step
/// advance is `time_step * speed_multiplier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub time_step: f64,             // s
    pub speed_multiplier: f64,
    pub trajectory_capacity: usize, // positions kept per body
    pub history_capacity: usize,    // global snapshots kept
    pub central_mass: f64,          // kg
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            trajectory_capacity: DEFAULT_HISTORY_CAPACITY,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            central_mass: SOLAR_MASS,
        }
    }
}

impl SimConfig {
    /// Simulated seconds per step.
    pub fn effective_dt(&self) -> f64 {
        self.time_step * self.speed_multiplier
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        if !(self.speed_multiplier.is_finite() && self.speed_multiplier > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "speed_multiplier must be positive, got {}",
                self.speed_multiplier
            )));
        }
        if self.trajectory_capacity == 0 || self.history_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "trajectory and history capacities must be non-zero".into(),
            ));
        }
        if !(self.central_mass.is_finite() && self.central_mass > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "central_mass must be positive, got {}",
                self.central_mass
            )));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading simulation config");
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
