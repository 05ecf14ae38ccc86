use crate::types::{Axis, Tick, Vec3};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid domain bounds: lower {lower} must be strictly below upper {upper} on every axis")]
    InvalidBounds { lower: Vec3, upper: Vec3 },

    #[error("tick duration must be positive, got {value}")]
    NonPositiveTickDuration { value: f64 },

    #[error("node count must be at least 1, got {value}")]
    InvalidNodeCount { value: usize },

    #[error("thread count must be at least 1, got {value}")]
    InvalidThreadCount { value: usize },

    #[error("output rate must be positive and finite, got {value} frames/s")]
    InvalidOutputRate { value: f64 },

    #[error("rank {rank} is out of range for {node_count} node(s)")]
    RankOutOfRange { rank: usize, node_count: usize },

    #[error("point {coord} is outside the domain [{lower}, {upper}] on the {axis:?} axis")]
    PointOutsideDomain { coord: f64, lower: f64, upper: f64, axis: Axis },

    #[error("engine failure at tick {tick}: {reason}")]
    Engine { tick: Tick, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
