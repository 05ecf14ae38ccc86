//! Checkpoint scheduling — tick-indexed, one-time parameter mutations.
//!
//! RULE: A mutation fires on exact tick equality only. A run that starts
//! past a trigger tick (a restart, a shortened schedule) skips that
//! mutation forever; there is no catch-up. Each entry applies at most
//! once for the lifetime of the scheduler.
//!
//! Entries sharing a trigger tick apply in registration order.

use crate::error::SimResult;
use crate::physics::PhysicsEngine;
use crate::types::{Tick, Vec3};
use serde::{Deserialize, Serialize};

/// A parameter change applied to the engine at a trigger tick.
/// Variants are added as the engine surface grows — never reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamMutation {
    SetGravity { gravity: Vec3 },
}

impl ParamMutation {
    fn apply(&self, engine: &mut dyn PhysicsEngine) {
        match self {
            ParamMutation::SetGravity { gravity } => engine.set_gravity(*gravity),
        }
    }

    fn describe(&self) -> String {
        match self {
            ParamMutation::SetGravity { gravity } => format!("set gravity to {gravity}"),
        }
    }
}

#[derive(Debug, Clone)]
struct CheckpointEntry {
    trigger_tick: Tick,
    mutation:     ParamMutation,
    applied:      bool,
}

#[derive(Debug, Default)]
pub struct CheckpointScheduler {
    entries: Vec<CheckpointEntry>,
}

impl CheckpointScheduler {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register a mutation to fire at `trigger_tick`. Call at setup, in
    /// the order mutations should apply when ticks collide.
    pub fn register(&mut self, trigger_tick: Tick, mutation: ParamMutation) {
        self.entries.push(CheckpointEntry {
            trigger_tick,
            mutation,
            applied: false,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.entries.iter().filter(|e| e.applied).count()
    }

    /// Apply every pending entry whose trigger tick equals `tick`,
    /// in registration order. Returns how many applied.
    ///
    /// Re-entrant safe: a second call for the same tick applies nothing.
    pub fn apply_due(&mut self, tick: Tick, engine: &mut dyn PhysicsEngine) -> SimResult<usize> {
        let mut applied = 0;
        for entry in &mut self.entries {
            if entry.applied || entry.trigger_tick != tick {
                continue;
            }
            log::info!("tick={tick} checkpoint: {}", entry.mutation.describe());
            entry.mutation.apply(engine);
            entry.applied = true;
            applied += 1;
        }
        Ok(applied)
    }
}
