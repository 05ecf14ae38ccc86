//! Shared test doubles: a recording physics engine and a recording
//! frame sink. Both append to one shared event log so tests can assert
//! the exact phase order the driver enforces within a tick.

#![allow(dead_code)]

use granular_core::config::SolverSettings;
use granular_core::error::{SimError, SimResult};
use granular_core::output::{FrameSink, OutputEvent};
use granular_core::physics::{
    BodyDescriptor, BodyState, FrameState, PhysicsEngine, SolverDiagnostics,
};
use granular_core::types::{Axis, BodyId, Tick, Vec3};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct RecordingEngine {
    pub log:             EventLog,
    pub gravity:         Vec3,
    /// (tick the mutation became visible at, new gravity).
    pub gravity_history: Vec<(Tick, Vec3)>,
    pub stepped:         Vec<Tick>,
    pub fail_at:         Option<Tick>,
    pub timers:          HashMap<&'static str, f64>,
    pub counters:        HashMap<&'static str, i64>,
    pub diagnostics:     Option<SolverDiagnostics>,
    pub solver_settings: Option<SolverSettings>,
    bodies:              Vec<BodyDescriptor>,
}

impl RecordingEngine {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            gravity: Vec3::ZERO,
            gravity_history: Vec::new(),
            stepped: Vec::new(),
            fail_at: None,
            timers: HashMap::new(),
            counters: HashMap::new(),
            diagnostics: None,
            solver_settings: None,
            bodies: Vec::new(),
        }
    }

    /// The tick the next step() call will receive.
    fn upcoming_tick(&self) -> Tick {
        self.stepped.last().map(|t| t + 1).unwrap_or(0)
    }
}

impl PhysicsEngine for RecordingEngine {
    fn configure_domain(&mut self, _lower: Vec3, _upper: Vec3, _axis: Axis) -> SimResult<()> {
        self.log.borrow_mut().push("configure_domain".to_string());
        Ok(())
    }

    fn add_body(&mut self, body: &BodyDescriptor) -> SimResult<BodyId> {
        self.bodies.push(body.clone());
        Ok(self.bodies.len() as BodyId - 1)
    }

    fn configure_solver(&mut self, settings: SolverSettings) {
        self.log.borrow_mut().push("configure_solver".to_string());
        self.solver_settings = Some(settings);
    }

    fn step(&mut self, tick: Tick, _tick_duration: f64) -> SimResult<()> {
        if self.fail_at == Some(tick) {
            return Err(SimError::Engine {
                tick,
                reason: "solver divergence (scripted)".to_string(),
            });
        }
        self.log.borrow_mut().push(format!("step {tick}"));
        self.stepped.push(tick);
        Ok(())
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        let tick = self.upcoming_tick();
        self.log.borrow_mut().push(format!("gravity {tick} {gravity}"));
        self.gravity = gravity;
        self.gravity_history.push((tick, gravity));
    }

    fn timer(&self, name: &str) -> Option<f64> {
        self.timers.get(name).copied()
    }

    fn counter(&self, name: &str) -> Option<i64> {
        self.counters.get(name).copied()
    }

    fn solver_diagnostics(&self) -> Option<SolverDiagnostics> {
        self.diagnostics
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
                    velocity: Vec3::ZERO,
                })
                .collect(),
        }
    }
}

pub struct RecordingSink {
    pub log:    EventLog,
    pub frames: Vec<OutputEvent>,
    pub dirs:   Vec<String>,
    pub names:  Vec<String>,
    pub fail:   bool,
}

impl RecordingSink {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            frames: Vec::new(),
            dirs: Vec::new(),
            names: Vec::new(),
            fail: false,
        }
    }
}

impl FrameSink for RecordingSink {
    fn write_frame(
        &mut self,
        directory: &str,
        basename: &str,
        event: &OutputEvent,
        _frame: &FrameState,
    ) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "sink full (scripted)",
            ));
        }
        self.log.borrow_mut().push(format!("frame {}", event.tick));
        self.frames.push(*event);
        self.dirs.push(directory.to_string());
        self.names.push(basename.to_string());
        Ok(())
    }
}
