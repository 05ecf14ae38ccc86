//! Lockstep properties of the step scheduler: exactly-once, strictly
//! increasing tick delivery, drift-free clock, fatal abort on error.

use granular_core::driver::StepScheduler;
use granular_core::error::{SimError, SimResult};

#[test]
fn delivers_every_tick_exactly_once_in_order() {
    const TOTAL: u64 = 5000;

    let mut scheduler = StepScheduler::new(1e-3).expect("scheduler");
    let mut seen = Vec::new();

    scheduler
        .run(TOTAL, |tick, _clock| {
            seen.push(tick);
            Ok(())
        })
        .expect("run");

    assert_eq!(seen.len() as u64, TOTAL);
    for (i, tick) in seen.iter().enumerate() {
        assert_eq!(i as u64, *tick, "tick delivered out of order at index {i}");
    }
}

#[test]
fn clock_matches_tick_times_duration_without_drift() {
    const TOTAL: u64 = 24_000;
    const DT: f64 = 1e-3;

    let mut scheduler = StepScheduler::new(DT).expect("scheduler");
    scheduler
        .run(TOTAL, |tick, clock| {
            // On-tick sees the pre-advance clock.
            assert_eq!(clock.current_tick, tick);
            assert_eq!(clock.elapsed_time, tick as f64 * DT);
            Ok(())
        })
        .expect("run");

    let clock = scheduler.clock();
    assert_eq!(clock.current_tick, TOTAL);
    // Exact, not approximate: elapsed time is recomputed per tick, not
    // accumulated.
    assert_eq!(clock.elapsed_time, TOTAL as f64 * DT);
}

#[test]
fn error_from_tick_body_aborts_the_run() {
    let mut scheduler = StepScheduler::new(1e-3).expect("scheduler");
    let mut delivered = Vec::new();

    let result: SimResult<()> = scheduler.run(100, |tick, _clock| {
        delivered.push(tick);
        if tick == 42 {
            return Err(SimError::Engine {
                tick,
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    });

    match result {
        Err(SimError::Engine { tick, .. }) => assert_eq!(tick, 42),
        other => panic!("expected engine failure at tick 42, got {other:?}"),
    }
    // Ticks 0..=42 ran; nothing after the failure did. No retry, no skip.
    assert_eq!(delivered, (0..=42).collect::<Vec<_>>());
    // The failed tick never advanced the clock.
    assert_eq!(scheduler.clock().current_tick, 42);
}

#[test]
fn rejects_non_positive_tick_duration() {
    assert!(matches!(
        StepScheduler::new(0.0),
        Err(SimError::NonPositiveTickDuration { .. })
    ));
    assert!(matches!(
        StepScheduler::new(-1e-3),
        Err(SimError::NonPositiveTickDuration { .. })
    ));
}
