//! Fixed-capacity slab pools
//!
//! A slab pool pre-allocates every node it will ever hand out and recycles
//! them through a free stack, so steady-state allocation never touches the
//! global allocator. Pools back both the packet blocks and the packet
//! buffer shells, and are safe to share across threads.

pub mod slab;
pub mod stats;

pub use slab::SlabPool;
pub use stats::PoolStats;
