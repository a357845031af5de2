//! Packet buffer pool statistics

use serde::{Deserialize, Serialize};

use crate::pool::PoolStats;

/// Combined snapshot of the two slab pools backing a packet buffer pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PktBufPoolStats {
    /// Packet block pool counters
    pub blocks: PoolStats,
    /// Buffer shell pool counters
    pub bufs: PoolStats,
}
