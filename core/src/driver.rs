//! The simulation driver — the heart of the run.
//!
//! PHASE ORDER within a tick (fixed, documented, never reordered):
//!   1. Apply due checkpoints
//!   2. Output decision, frame write on a sample tick
//!   3. Physics step (boundary exchange happens inside)
//!   4. Telemetry sample and print
//!
//! RULES:
//!   - Every rank runs the identical phase order, so all ranks observe
//!     the same checkpoint state during the same tick.
//!   - The clock and the checkpoint scheduler belong to this driver
//!     alone; nothing else mutates them.
//!   - A failed physics step aborts the run. A failed frame write does
//!     not.

use crate::checkpoint::CheckpointScheduler;
use crate::clock::SimClock;
use crate::config::{SimConfig, SolverSettings};
use crate::context::RunContext;
use crate::error::SimResult;
use crate::output::{frame_basename, frame_directory, FrameSink, OutputEvent, OutputScheduler};
use crate::physics::PhysicsEngine;
use crate::telemetry::TelemetryAggregator;
use crate::types::Tick;

/// Advances simulated time in lockstep, invoking the tick body exactly
/// once per tick in strictly increasing order. Owns the clock.
pub struct StepScheduler {
    clock: SimClock,
}

impl StepScheduler {
    pub fn new(tick_duration: f64) -> SimResult<Self> {
        Ok(Self { clock: SimClock::new(tick_duration)? })
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// For tick in 0..total_ticks, invoke `on_tick(tick, clock)` once,
    /// then advance the clock. The first error aborts the run; there is
    /// no retry and no tick skipping.
    pub fn run<F>(&mut self, total_ticks: Tick, mut on_tick: F) -> SimResult<()>
    where
        F: FnMut(Tick, &SimClock) -> SimResult<()>,
    {
        for tick in 0..total_ticks {
            debug_assert_eq!(tick, self.clock.current_tick);
            on_tick(tick, &self.clock)?;
            self.clock.advance();
        }
        Ok(())
    }
}

/// End-of-run accounting, printed by the runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks_run:           Tick,
    pub frames_written:      u64,
    pub frames_failed:       u64,
    pub checkpoints_applied: usize,
}

pub struct SimDriver {
    ctx:         RunContext,
    scheduler:   StepScheduler,
    checkpoints: CheckpointScheduler,
    output:      OutputScheduler,
    solver:      SolverSettings,
    total_ticks: Tick,
}

impl SimDriver {
    /// Build a fully wired driver from a validated configuration.
    pub fn from_config(config: &SimConfig, ctx: RunContext) -> SimResult<Self> {
        config.validate()?;

        let scheduler = StepScheduler::new(config.tick_duration)?;
        let output = OutputScheduler::new(config.tick_duration, config.output_fps)?;

        let mut checkpoints = CheckpointScheduler::new();
        for entry in &config.checkpoints {
            checkpoints.register(entry.trigger_tick(config.tick_duration), entry.mutation.clone());
        }

        Ok(Self {
            ctx,
            scheduler,
            checkpoints,
            output,
            solver: config.solver,
            total_ticks: config.total_ticks(),
        })
    }

    pub fn total_ticks(&self) -> Tick {
        self.total_ticks
    }

    pub fn clock(&self) -> &SimClock {
        self.scheduler.clock()
    }

    /// Run the whole simulation against the engine and sink.
    ///
    /// Configuration and engine errors propagate and terminate the run;
    /// sink errors are logged and the run continues.
    pub fn run(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        sink: &mut dyn FrameSink,
    ) -> SimResult<RunSummary> {
        engine.configure_solver(self.solver);

        let telemetry = TelemetryAggregator::new(self.ctx, engine);
        if self.ctx.is_master() {
            println!("{}", telemetry.header());
        }

        let directory = frame_directory(self.ctx.node_count);
        let mut frames_failed: u64 = 0;

        let Self { scheduler, checkpoints, output, total_ticks, .. } = self;

        scheduler.run(*total_ticks, |tick, clock| {
            // Phase 1: checkpoints.
            checkpoints.apply_due(tick, engine)?;

            // Phase 2: output.
            if output.should_sample(tick) {
                let event = OutputEvent {
                    frame_index:  output.next_frame_index(),
                    tick,
                    elapsed_time: clock.elapsed_time,
                };
                let basename = frame_basename(event.frame_index);
                let frame = engine.frame_state();
                if let Err(err) = sink.write_frame(directory, &basename, &event, &frame) {
                    frames_failed += 1;
                    log::warn!(
                        "tick={tick} frame {} not persisted: {err} (run continues)",
                        event.frame_index
                    );
                }
            }

            // Phase 3: physics step.
            engine.step(tick, clock.tick_duration)?;

            // Phase 4: telemetry.
            let sample = telemetry.sample(clock, engine);
            println!("{}", telemetry.render(&sample));

            Ok(())
        })?;

        Ok(RunSummary {
            ticks_run:           self.scheduler.clock().current_tick,
            frames_written:      self.output.frames_emitted() - frames_failed,
            frames_failed,
            checkpoints_applied: self.checkpoints.applied_count(),
        })
    }
}
