//! A minimal reference engine behind the physics seam.
//!
//! Bodies fall under gravity and stop at the domain floor. There is no
//! contact solver here — this engine exists to exercise the driver end
//! to end and to produce reference frames, not to resolve collisions.
//! It reports real wall-clock step timers and body counts, and has no
//! iterative-solver diagnostics capability.

use granular_core::error::{SimError, SimResult};
use granular_core::physics::{
    BodyDescriptor, BodyState, FrameState, PhysicsEngine, SolverDiagnostics,
};
use granular_core::types::{Axis, BodyId, Tick, Vec3};
use std::collections::HashMap;
use std::time::Instant;

struct Body {
    position: Vec3,
    velocity: Vec3,
    fixed:    bool,
}

pub struct BallisticEngine {
    gravity:      Vec3,
    floor_z:      Option<f64>,
    bodies:       Vec<Body>,
    timers:       HashMap<&'static str, f64>,
    worker_count: usize,
}

impl BallisticEngine {
    /// Worker count is fixed at startup; this engine runs its update
    /// loop serially but carries the count for diagnostics.
    pub fn new(worker_count: usize) -> Self {
        Self {
            gravity: Vec3::ZERO,
            floor_z: None,
            bodies: Vec::new(),
            timers: HashMap::new(),
            worker_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl PhysicsEngine for BallisticEngine {
    fn configure_domain(&mut self, lower: Vec3, upper: Vec3, _axis: Axis) -> SimResult<()> {
        let strictly_below =
            lower.x < upper.x && lower.y < upper.y && lower.z < upper.z;
        if !strictly_below {
            return Err(SimError::InvalidBounds { lower, upper });
        }
        self.floor_z = Some(lower.z);
        Ok(())
    }

    fn add_body(&mut self, body: &BodyDescriptor) -> SimResult<BodyId> {
        self.bodies.push(Body {
            position: body.position,
            velocity: Vec3::ZERO,
            fixed:    body.fixed,
        });
        Ok(self.bodies.len() as BodyId - 1)
    }

    fn step(&mut self, _tick: Tick, tick_duration: f64) -> SimResult<()> {
        let started = Instant::now();
        let floor = self.floor_z.unwrap_or(f64::NEG_INFINITY);

        for body in self.bodies.iter_mut().filter(|b| !b.fixed) {
            body.velocity += self.gravity.scaled(tick_duration);
            body.position += body.velocity.scaled(tick_duration);
            if body.position.z < floor {
                body.position.z = floor;
                body.velocity = Vec3::ZERO;
            }
        }

        let elapsed = started.elapsed().as_secs_f64();
        self.timers.insert("step", elapsed);
        self.timers.insert("update", elapsed);
        Ok(())
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    fn timer(&self, name: &str) -> Option<f64> {
        self.timers.get(name).copied()
    }

    fn counter(&self, name: &str) -> Option<i64> {
        match name {
            "bodies" => Some(self.bodies.len() as i64),
            _ => None,
        }
    }

    fn solver_diagnostics(&self) -> Option<SolverDiagnostics> {
        None
    }

    fn frame_state(&self) -> FrameState {
        FrameState {
            bodies: self
                .bodies
                .iter()
                .enumerate()
                .map(|(i, b)| BodyState {
                    body_id:  i as BodyId,
                    position: b.position,
                    velocity: b.velocity,
                })
                .collect(),
        }
    }
}
