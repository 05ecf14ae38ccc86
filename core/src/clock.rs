//! Simulation clock — owns tick state and simulated elapsed time.
//!
//! RULE: elapsed_time == current_tick * tick_duration, always.
//! The clock recomputes elapsed time from the tick count on every
//! advance instead of accumulating increments, so a 24-million-tick
//! run carries no floating-point drift.

use crate::error::{SimError, SimResult};
use crate::types::Tick;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub current_tick:  Tick,
    pub tick_duration: f64,
    pub elapsed_time:  f64,
}

impl SimClock {
    /// A clock at tick 0. Fails on a non-positive tick duration.
    pub fn new(tick_duration: f64) -> SimResult<Self> {
        if tick_duration <= 0.0 || !tick_duration.is_finite() {
            return Err(SimError::NonPositiveTickDuration { value: tick_duration });
        }
        Ok(Self {
            current_tick:  0,
            tick_duration,
            elapsed_time:  0.0,
        })
    }

    /// Advance one tick. Returns the new tick number.
    /// Only the step scheduler calls this, once per tick; the clock is
    /// monotonic and never reset during a run.
    pub fn advance(&mut self) -> Tick {
        self.current_tick += 1;
        self.elapsed_time = self.current_tick as f64 * self.tick_duration;
        self.current_tick
    }
}
