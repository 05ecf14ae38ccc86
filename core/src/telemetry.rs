//! Per-tick performance telemetry, one diagnostic row per rank.
//!
//! RULE: The row shape never changes. Every declared timer and counter
//! key appears in every sample; a key the engine did not report this
//! tick reads as zero, never omitted. Rendering is local to each rank —
//! no cross-rank reduction, and interleaving of printed rows across
//! ranks is explicitly unordered.

use crate::clock::SimClock;
use crate::context::RunContext;
use crate::physics::{PhysicsEngine, SolverDiagnostics};
use crate::types::{NodeId, Tick};

/// Engine phase timers sampled every tick, in render order.
pub const TIMER_KEYS: [&str; 8] = [
    "step",
    "exchange",
    "send",
    "recv",
    "broad_phase",
    "narrow_phase",
    "solve",
    "update",
];

/// Engine counters sampled every tick, in render order.
pub const COUNTER_KEYS: [&str; 2] = ["bodies", "contacts"];

/// One tick's snapshot for one rank. Lives only long enough to render.
#[derive(Debug, Clone)]
pub struct TelemetrySample {
    pub node_id:       NodeId,
    pub tick:          Tick,
    pub elapsed_time:  f64,
    pub tick_duration: f64,
    /// (key, seconds) pairs, one per TIMER_KEYS entry, in order.
    pub timers:        Vec<(&'static str, f64)>,
    /// (key, value) pairs, one per COUNTER_KEYS entry, in order.
    pub counts:        Vec<(&'static str, i64)>,
    pub solver:        SolverDiagnostics,
}

pub struct TelemetryAggregator {
    ctx: RunContext,
    /// Capability, queried once at startup. Engines without iterative-
    /// solver diagnostics render zeros in those columns.
    has_solver_diagnostics: bool,
}

impl TelemetryAggregator {
    pub fn new(ctx: RunContext, engine: &dyn PhysicsEngine) -> Self {
        let has_solver_diagnostics = engine.solver_diagnostics().is_some();
        if !has_solver_diagnostics {
            log::debug!(
                "rank {}: engine reports no solver diagnostics; columns render as zero",
                ctx.rank
            );
        }
        Self { ctx, has_solver_diagnostics }
    }

    pub fn sample(&self, clock: &SimClock, engine: &dyn PhysicsEngine) -> TelemetrySample {
        let timers = TIMER_KEYS
            .iter()
            .map(|&key| (key, engine.timer(key).unwrap_or(0.0)))
            .collect();
        let counts = COUNTER_KEYS
            .iter()
            .map(|&key| (key, engine.counter(key).unwrap_or(0)))
            .collect();
        let solver = if self.has_solver_diagnostics {
            engine.solver_diagnostics().unwrap_or_default()
        } else {
            SolverDiagnostics::default()
        };
        TelemetrySample {
            node_id: self.ctx.rank,
            tick: clock.current_tick,
            elapsed_time: clock.elapsed_time,
            tick_duration: clock.tick_duration,
            timers,
            counts,
            solver,
        }
    }

    /// One fixed-width pipe-delimited row: rank, elapsed time, tick
    /// duration, then every timer and counter in declaration order.
    pub fn render(&self, sample: &TelemetrySample) -> String {
        let mut row = format!(
            "{}| {:10.5} | {:8.6}",
            sample.node_id, sample.elapsed_time, sample.tick_duration
        );
        for (_, seconds) in &sample.timers {
            row.push_str(&format!(" | {seconds:8.4}"));
        }
        for (_, value) in &sample.counts {
            row.push_str(&format!(" | {value:7}"));
        }
        row.push_str(&format!(
            " | {:7} | {:8.4}",
            sample.solver.iterations, sample.solver.residual
        ));
        row
    }

    /// Column header matching render(), printed once at startup.
    pub fn header(&self) -> String {
        let mut row = String::from("rank|    elapsed |  dt");
        for key in TIMER_KEYS {
            row.push_str(&format!(" | {key:>8}"));
        }
        for key in COUNTER_KEYS {
            row.push_str(&format!(" | {key:>7}"));
        }
        row.push_str(" |   iters | residual");
        row
    }
}
