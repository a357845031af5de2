//! Packet block and packet buffer engine
//!
//! A packet buffer is an ordered chain of fixed-capacity blocks holding one
//! logical variable-length byte sequence. Headers are prepended in O(1)
//! against reserved headroom, a cursor gives sequential and random I/O
//! across block boundaries, and `set_contiguous` coalesces a prefix into a
//! single block for header parsing. Blocks and buffer shells both come from
//! slab pools and return there when the buffer drops.

pub mod block;
pub mod buffer;
pub mod config;
pub mod cursor;
pub mod pool;
pub mod shared;
pub mod stats;

pub use block::PktBlock;
pub use buffer::PktBuf;
pub use config::PktBufConfig;
pub use cursor::Cursor;
pub use pool::PktBufPool;
pub use shared::SharedPktBuf;
pub use stats::PktBufPoolStats;
