//! Slab pool statistics

use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a slab pool's counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Total number of nodes the pool was built with
    pub capacity: usize,
    /// Nodes currently on the free stack
    pub free: usize,
    /// Nodes currently handed out
    pub in_use: usize,
    /// Highest in-use count observed
    pub peak_in_use: usize,
    /// Successful allocations since construction
    pub total_allocations: u64,
    /// Nodes returned since construction
    pub total_frees: u64,
    /// Allocations that failed (pool empty or wait expired)
    pub allocation_failures: u64,
}

impl PoolStats {
    /// True when free + in-use accounts for every node
    pub fn is_balanced(&self) -> bool {
        self.free + self.in_use == self.capacity
    }
}
