//! Run configuration — everything a run needs, validated before tick 0.
//!
//! Defaults reproduce the rotating-gravity granular demo: a 10 x 10 x 26
//! domain split along X, 1 ms ticks for 24 simulated seconds, 50 output
//! frames per second, and four gravity rotations at t = 2, 8, 12, 16 s.

use crate::checkpoint::ParamMutation;
use crate::error::{SimError, SimResult};
use crate::types::{Axis, Tick, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One scheduled parameter change, given in simulated seconds and
/// converted to a trigger tick against the run's tick duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointConfig {
    pub at_time:  f64,
    pub mutation: ParamMutation,
}

impl CheckpointConfig {
    pub fn trigger_tick(&self, tick_duration: f64) -> Tick {
        (self.at_time / tick_duration).ceil() as Tick
    }
}

/// Settings the driver forwards verbatim to the engine's iterative
/// solver before the first step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SolverSettings {
    pub max_iterations: u64,
    pub tolerance:      f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self { max_iterations: 100, tolerance: 1e-3 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tick_duration: f64,
    pub time_end:      f64,
    pub output_fps:    f64,
    pub gravity:       Vec3,
    pub domain_lower:  Vec3,
    pub domain_upper:  Vec3,
    pub split_axis:    Axis,
    pub checkpoints:   Vec<CheckpointConfig>,
    pub solver:        SolverSettings,
}

impl Default for SimConfig {
    fn default() -> Self {
        let rotations = [
            (2.0, Vec3::new(-5.0, 0.0, -10.0)),
            (8.0, Vec3::new(0.0, 5.0, -10.0)),
            (12.0, Vec3::new(5.0, 0.0, -10.0)),
            (16.0, Vec3::new(0.0, -5.0, -10.0)),
        ];
        Self {
            tick_duration: 1e-3,
            time_end:      24.0,
            output_fps:    50.0,
            gravity:       Vec3::new(0.01, 0.01, -9.8),
            domain_lower:  Vec3::new(-5.0, -5.0, -1.0),
            domain_upper:  Vec3::new(5.0, 5.0, 25.0),
            split_axis:    Axis::X,
            checkpoints:   rotations
                .into_iter()
                .map(|(at_time, gravity)| CheckpointConfig {
                    at_time,
                    mutation: ParamMutation::SetGravity { gravity },
                })
                .collect(),
            solver: SolverSettings::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SimConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Total tick count for the run: ceil(time_end / tick_duration).
    pub fn total_ticks(&self) -> Tick {
        (self.time_end / self.tick_duration).ceil() as Tick
    }

    /// The full configuration-error taxonomy, checked before the run
    /// begins. A run never starts on an invalid configuration.
    pub fn validate(&self) -> SimResult<()> {
        if self.tick_duration <= 0.0 || !self.tick_duration.is_finite() {
            return Err(SimError::NonPositiveTickDuration { value: self.tick_duration });
        }
        if self.time_end <= 0.0 || !self.time_end.is_finite() {
            return Err(SimError::Other(anyhow::anyhow!(
                "time_end must be positive, got {}",
                self.time_end
            )));
        }
        if self.output_fps <= 0.0 || !self.output_fps.is_finite() {
            return Err(SimError::InvalidOutputRate { value: self.output_fps });
        }
        let strictly_below = self.domain_lower.x < self.domain_upper.x
            && self.domain_lower.y < self.domain_upper.y
            && self.domain_lower.z < self.domain_upper.z;
        if !strictly_below {
            return Err(SimError::InvalidBounds {
                lower: self.domain_lower,
                upper: self.domain_upper,
            });
        }
        Ok(())
    }
}
