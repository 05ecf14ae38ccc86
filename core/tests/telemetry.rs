//! Telemetry row shape: the full declared key set every tick, zeros for
//! unreported keys, and the startup-time solver-diagnostics capability.

mod common;

use common::{new_log, RecordingEngine};
use granular_core::clock::SimClock;
use granular_core::context::RunContext;
use granular_core::physics::SolverDiagnostics;
use granular_core::telemetry::{TelemetryAggregator, COUNTER_KEYS, TIMER_KEYS};

fn clock_at(tick: u64, dt: f64) -> SimClock {
    let mut clock = SimClock::new(dt).expect("clock");
    for _ in 0..tick {
        clock.advance();
    }
    clock
}

#[test]
fn sample_always_carries_the_full_declared_key_set() {
    let ctx = RunContext::new(2, 4, 1).expect("ctx");
    let mut engine = RecordingEngine::new(new_log());
    // Engine reports only a subset this tick.
    engine.timers.insert("broad_phase", 0.012);
    engine.timers.insert("solve", 0.034);
    engine.counters.insert("bodies", 441);

    let aggregator = TelemetryAggregator::new(ctx, &engine);
    let sample = aggregator.sample(&clock_at(10, 1e-3), &engine);

    let timer_keys: Vec<&str> = sample.timers.iter().map(|&(k, _)| k).collect();
    let counter_keys: Vec<&str> = sample.counts.iter().map(|&(k, _)| k).collect();
    assert_eq!(timer_keys, TIMER_KEYS.to_vec());
    assert_eq!(counter_keys, COUNTER_KEYS.to_vec());

    // Reported keys carry their values; absent keys are zero, never
    // omitted.
    let get = |k: &str| sample.timers.iter().find(|&&(key, _)| key == k).unwrap().1;
    assert_eq!(get("broad_phase"), 0.012);
    assert_eq!(get("solve"), 0.034);
    assert_eq!(get("exchange"), 0.0);
    assert_eq!(get("narrow_phase"), 0.0);

    let bodies = sample.counts.iter().find(|&&(k, _)| k == "bodies").unwrap().1;
    let contacts = sample.counts.iter().find(|&&(k, _)| k == "contacts").unwrap().1;
    assert_eq!(bodies, 441);
    assert_eq!(contacts, 0);

    assert_eq!(sample.node_id, 2);
    assert_eq!(sample.tick, 10);
}

#[test]
fn missing_solver_capability_renders_zeros_with_same_shape() {
    let ctx = RunContext::single(1).expect("ctx");
    let plain = RecordingEngine::new(new_log());
    let mut iterative = RecordingEngine::new(new_log());
    iterative.diagnostics = Some(SolverDiagnostics { residual: 4.2e-4, iterations: 37 });

    let agg_plain = TelemetryAggregator::new(ctx, &plain);
    let agg_iter = TelemetryAggregator::new(ctx, &iterative);
    let clock = clock_at(5, 1e-3);

    let s_plain = agg_plain.sample(&clock, &plain);
    let s_iter = agg_iter.sample(&clock, &iterative);

    assert_eq!(s_plain.solver, SolverDiagnostics::default());
    assert_eq!(s_iter.solver.iterations, 37);
    assert_eq!(s_iter.solver.residual, 4.2e-4);

    // Same row shape either way: identical field counts.
    let row_plain = agg_plain.render(&s_plain);
    let row_iter = agg_iter.render(&s_iter);
    assert_eq!(
        row_plain.matches('|').count(),
        row_iter.matches('|').count()
    );
}

#[test]
fn render_leads_with_rank_and_matches_header_width() {
    let ctx = RunContext::new(3, 8, 1).expect("ctx");
    let engine = RecordingEngine::new(new_log());
    let aggregator = TelemetryAggregator::new(ctx, &engine);

    let sample = aggregator.sample(&clock_at(0, 1e-3), &engine);
    let row = aggregator.render(&sample);

    assert!(row.starts_with("3|"), "row must lead with the rank: {row}");
    // rank, elapsed, dt, 8 timers, 2 counters, iterations, residual.
    assert_eq!(row.matches('|').count(), 2 + TIMER_KEYS.len() + COUNTER_KEYS.len() + 2);
    assert_eq!(
        aggregator.header().matches('|').count(),
        row.matches('|').count()
    );
}
