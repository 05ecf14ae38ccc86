//! Run context — rank, node count, and worker-thread count.
//!
//! RULE: No ambient process-wide state. Every component that needs to
//! know which rank it is on, or how many ranks the run spans, receives
//! this value at construction. It is built once in main and never
//! mutated afterwards.

use crate::error::{SimError, SimResult};
use crate::types::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    pub rank:             NodeId,
    pub node_count:       usize,
    pub threads_per_node: usize,
}

impl RunContext {
    pub fn new(rank: NodeId, node_count: usize, threads_per_node: usize) -> SimResult<Self> {
        if node_count < 1 {
            return Err(SimError::InvalidNodeCount { value: node_count });
        }
        if threads_per_node < 1 {
            return Err(SimError::InvalidThreadCount { value: threads_per_node });
        }
        if rank >= node_count {
            return Err(SimError::RankOutOfRange { rank, node_count });
        }
        Ok(Self { rank, node_count, threads_per_node })
    }

    /// A single-process context: rank 0 of 1.
    pub fn single(threads_per_node: usize) -> SimResult<Self> {
        Self::new(0, 1, threads_per_node)
    }

    pub fn is_master(&self) -> bool {
        self.rank == 0
    }
}
