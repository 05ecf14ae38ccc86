//! The physics-engine seam — everything the driver needs from the
//! distributed contact solver, and nothing more.
//!
//! RULE: The driver never reaches past this trait. Collision detection,
//! contact force models, and the bilateral solver live behind `step()`;
//! boundary exchange between ranks happens inside `step()` as well, and
//! `step()` returns only once this tick is globally consistent.

use crate::config::SolverSettings;
use crate::error::SimResult;
use crate::types::{Axis, BodyId, Tick, Vec3};
use serde::{Deserialize, Serialize};

/// Surface material shared by bodies, SMC penalty-contact parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub youngs_modulus: f64,
    pub friction:       f64,
    pub restitution:    f64,
    pub adhesion:       f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Sphere { radius: f64 },
    /// An axis-aligned box panel given by half extents, offset from the
    /// body position.
    Box { half_extents: Vec3, offset: Vec3 },
}

/// Everything the engine needs to admit a body into the domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub mass:     f64,
    pub position: Vec3,
    pub fixed:    bool,
    pub material: Material,
    pub shapes:   Vec<Shape>,
}

impl BodyDescriptor {
    /// A free sphere of the given radius.
    pub fn sphere(mass: f64, radius: f64, position: Vec3, material: Material) -> Self {
        Self {
            mass,
            position,
            fixed: false,
            material,
            shapes: vec![Shape::Sphere { radius }],
        }
    }

    /// A fixed multi-panel body (e.g. a containing bin).
    pub fn fixed_panels(position: Vec3, material: Material, shapes: Vec<Shape>) -> Self {
        Self {
            mass: 1.0,
            position,
            fixed: true,
            material,
            shapes,
        }
    }
}

/// Kinematic state of one body, as handed to the output sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyState {
    pub body_id:  BodyId,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// One tick's body snapshot for the local rank.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FrameState {
    pub bodies: Vec<BodyState>,
}

/// Optional solver diagnostics, present only on iterative solvers.
/// Queried once at startup; engines without it render as zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolverDiagnostics {
    pub residual:   f64,
    pub iterations: u64,
}

/// The contract the external distributed engine must fulfill.
pub trait PhysicsEngine {
    /// Install the global bounding box and split axis. Called once,
    /// before any body is added.
    fn configure_domain(&mut self, lower: Vec3, upper: Vec3, axis: Axis) -> SimResult<()>;

    fn add_body(&mut self, body: &BodyDescriptor) -> SimResult<BodyId>;

    /// Install iterative-solver settings. Called once before the first
    /// step; engines without an iterative solver may ignore it.
    fn configure_solver(&mut self, _settings: SolverSettings) {}

    /// Advance the physics state by one tick of `tick_duration`.
    /// Fatal on solver divergence; the driver does not retry.
    fn step(&mut self, tick: Tick, tick_duration: f64) -> SimResult<()>;

    fn set_gravity(&mut self, gravity: Vec3);

    /// Elapsed seconds for a named internal phase timer this tick, or
    /// None when the engine did not record that phase.
    fn timer(&self, name: &str) -> Option<f64>;

    /// A named integer counter (body count, contact count), or None.
    fn counter(&self, name: &str) -> Option<i64>;

    /// Capability query: iterative-solver diagnostics, if this engine
    /// has them. Callers treat the answer as fixed for the whole run.
    fn solver_diagnostics(&self) -> Option<SolverDiagnostics>;

    /// Snapshot of this rank's bodies for the output sink.
    fn frame_state(&self) -> FrameState;
}
