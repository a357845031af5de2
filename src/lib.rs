//! # pktbuf - pooled packet-buffer engine
//!
//! The data-plane core of a minimal TCP/IP stack: chained packet buffers
//! over a fixed-capacity slab pool, plus the bounded blocking queue the
//! stack's threads hand those buffers around with.
//!
//! ## Features
//!
//! - **Slab pools**: every block and buffer struct is pre-allocated and
//!   recycled; the steady state never touches the global allocator
//! - **Non-contiguous buffers**: one logical byte sequence over a chain of
//!   fixed-capacity blocks, with headroom/tailroom for O(1) header growth
//! - **Cursor I/O**: sequential and random read/write/fill/copy across
//!   block boundaries, with atomic size validation
//! - **Contiguity on demand**: `set_contiguous` coalesces a prefix into a
//!   single block so header parsers see flat bytes
//! - **Backpressure**: pool allocation and queue send/recv block, time out
//!   or fail fast per call site; receive-style paths never stall
//! - **Ownership-checked lifecycle**: buffers are single-owner values,
//!   shared explicitly via a counted handle; use-after-release does not
//!   compile
//!
//! ## Example
//!
//! ```
//! use pktbuf::{PktBufPool, WaitPolicy};
//!
//! let pool = PktBufPool::with_defaults().unwrap();
//!
//! let mut buf = pool.alloc(200, WaitPolicy::NoWait).unwrap();
//! buf.add_header(14, true).unwrap();          // room for an Ethernet header
//! assert_eq!(buf.total_size(), 214);
//!
//! buf.fill(0xAB, 214).unwrap();
//! buf.reset_cursor();
//! let mut first = [0u8; 4];
//! buf.read(&mut first).unwrap();
//! assert_eq!(first, [0xAB; 4]);
//!
//! drop(buf); // every block returns to the pool
//! assert_eq!(pool.block_free_count(), pool.config().block_count);
//! ```

pub mod error;
pub mod pktbuf;
pub mod pool;
pub mod queue;
pub mod sync;

pub use error::{PktBufError, Result};
pub use pktbuf::{Cursor, PktBlock, PktBuf, PktBufConfig, PktBufPool, PktBufPoolStats, SharedPktBuf};
pub use pool::{PoolStats, SlabPool};
pub use queue::{BoundedQueue, SendError};
pub use sync::WaitPolicy;
