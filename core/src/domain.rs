//! Domain decomposition — one contiguous spatial slice per node.
//!
//! RULE: The subdomains partition the global extent exactly. Interior
//! boundaries are computed by interpolation from the endpoints, never
//! by repeated addition of the slice width, so the last subdomain's
//! upper bound equals the global upper bound bit-for-bit.
//!
//! Ownership convention: each slice is closed-open on the split axis,
//! except the last, which is closed-closed so the global upper endpoint
//! has an owner.

use crate::error::{SimError, SimResult};
use crate::types::{Axis, NodeId, Vec3};
use serde::{Deserialize, Serialize};

/// One node's slice of the global domain along the split axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subdomain {
    pub node_id:     NodeId,
    pub axis:        Axis,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Immutable for the duration of a run; built once at startup.
/// No re-partitioning or rebalancing happens here.
#[derive(Debug, Clone)]
pub struct DomainPartitioner {
    global_lower: Vec3,
    global_upper: Vec3,
    axis:         Axis,
    subdomains:   Vec<Subdomain>,
}

impl DomainPartitioner {
    pub fn configure(
        global_lower: Vec3,
        global_upper: Vec3,
        axis: Axis,
        node_count: usize,
    ) -> SimResult<Self> {
        if node_count < 1 {
            return Err(SimError::InvalidNodeCount { value: node_count });
        }
        let strictly_below = global_lower.x < global_upper.x
            && global_lower.y < global_upper.y
            && global_lower.z < global_upper.z;
        if !strictly_below {
            return Err(SimError::InvalidBounds { lower: global_lower, upper: global_upper });
        }

        let lo = global_lower.component(axis);
        let hi = global_upper.component(axis);

        // boundary[i] for i in 0..=node_count. Endpoints are assigned,
        // not computed, so they are exact.
        let mut boundaries = Vec::with_capacity(node_count + 1);
        boundaries.push(lo);
        for i in 1..node_count {
            boundaries.push(lo + (hi - lo) * i as f64 / node_count as f64);
        }
        boundaries.push(hi);

        let subdomains = (0..node_count)
            .map(|i| Subdomain {
                node_id:     i,
                axis,
                lower_bound: boundaries[i],
                upper_bound: boundaries[i + 1],
            })
            .collect();

        Ok(Self { global_lower, global_upper, axis, subdomains })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn global_lower(&self) -> Vec3 {
        self.global_lower
    }

    pub fn global_upper(&self) -> Vec3 {
        self.global_upper
    }

    pub fn subdomains(&self) -> &[Subdomain] {
        &self.subdomains
    }

    pub fn subdomain(&self, node: NodeId) -> Option<&Subdomain> {
        self.subdomains.get(node)
    }

    /// The node whose slice contains `point` on the split axis.
    ///
    /// Boundary points belong to the lower-indexed subdomain's successor
    /// (closed-open), except the global upper endpoint, which belongs to
    /// the last subdomain. A point off the extent is a configuration
    /// error, never clamped.
    pub fn owner_of(&self, point: Vec3) -> SimResult<NodeId> {
        let coord = point.component(self.axis);
        let lo = self.global_lower.component(self.axis);
        let hi = self.global_upper.component(self.axis);
        // Negated containment so NaN lands on the error path too.
        if !(coord >= lo && coord <= hi) {
            return Err(SimError::PointOutsideDomain {
                coord,
                lower: lo,
                upper: hi,
                axis: self.axis,
            });
        }

        for sub in &self.subdomains {
            if coord >= sub.lower_bound && coord < sub.upper_bound {
                return Ok(sub.node_id);
            }
        }
        // coord == hi: the last subdomain is closed-closed.
        Ok(self.subdomains.len() - 1)
    }

    /// One line per subdomain, for startup diagnostics.
    pub fn describe(&self) -> String {
        self.subdomains
            .iter()
            .map(|s| {
                format!(
                    "node {} owns [{:.6}, {:.6}) on {:?}",
                    s.node_id, s.lower_bound, s.upper_bound, s.axis
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
