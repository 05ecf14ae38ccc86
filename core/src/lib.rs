//! granular-core — driver for a bulk-synchronous, spatially-partitioned
//! rigid-body simulation.
//!
//! The driver owns scheduling and orchestration only: lockstep time
//! advance, tick-triggered parameter mutations, periodic frame output,
//! domain-partition configuration, and per-rank telemetry. Contact
//! mechanics, body migration, and inter-rank messaging live behind the
//! [`physics::PhysicsEngine`] trait.

pub mod checkpoint;
pub mod clock;
pub mod config;
pub mod context;
pub mod domain;
pub mod driver;
pub mod error;
pub mod output;
pub mod physics;
pub mod telemetry;
pub mod types;
