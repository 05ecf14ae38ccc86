//! Output scheduling — when to persist a frame, and what to call it.
//!
//! The driver decides WHEN a frame fires; serializing body state is the
//! sink's concern. A failed frame write is a warning, never a run abort:
//! output is diagnostic, not correctness-bearing.

use crate::error::{SimError, SimResult};
use crate::physics::FrameState;
use crate::types::{FrameIndex, Tick};
use serde::{Deserialize, Serialize};

/// One fired output sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OutputEvent {
    pub frame_index:  FrameIndex,
    pub tick:         Tick,
    pub elapsed_time: f64,
}

/// The out-of-scope persistence collaborator.
pub trait FrameSink {
    fn write_frame(
        &mut self,
        directory: &str,
        basename: &str,
        event: &OutputEvent,
        frame: &FrameState,
    ) -> std::io::Result<()>;
}

#[derive(Debug)]
pub struct OutputScheduler {
    sample_interval_ticks: Tick,
    next_frame:            FrameIndex,
}

impl OutputScheduler {
    /// sample_interval_ticks = ceil((1/tick_duration) / frames_per_second),
    /// clamped to a minimum of 1: a requested rate above the tick rate
    /// samples every tick. A non-positive rate is a configuration error.
    pub fn new(tick_duration: f64, frames_per_second: f64) -> SimResult<Self> {
        if tick_duration <= 0.0 || !tick_duration.is_finite() {
            return Err(SimError::NonPositiveTickDuration { value: tick_duration });
        }
        if frames_per_second <= 0.0 || !frames_per_second.is_finite() {
            return Err(SimError::InvalidOutputRate { value: frames_per_second });
        }
        let interval = ((1.0 / tick_duration) / frames_per_second).ceil().max(1.0) as Tick;
        Ok(Self {
            sample_interval_ticks: interval,
            next_frame:            0,
        })
    }

    pub fn sample_interval_ticks(&self) -> Tick {
        self.sample_interval_ticks
    }

    pub fn should_sample(&self, tick: Tick) -> bool {
        tick % self.sample_interval_ticks == 0
    }

    /// The frame index for the sample that just fired. Strictly
    /// increasing from 0, bumped once per fired sample.
    pub fn next_frame_index(&mut self) -> FrameIndex {
        let frame = self.next_frame;
        self.next_frame += 1;
        frame
    }

    pub fn frames_emitted(&self) -> u64 {
        self.next_frame
    }
}

/// Directory for persisted frames, selected by how many ranks the run
/// spans: single-rank runs are reference runs.
pub fn frame_directory(node_count: usize) -> &'static str {
    if node_count == 1 {
        "reference"
    } else {
        "granular"
    }
}

/// Frame file basename; no extension is mandated here.
pub fn frame_basename(frame_index: FrameIndex) -> String {
    format!("data{frame_index}")
}
