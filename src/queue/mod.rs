//! Bounded blocking queues for inter-thread handoff
//!
//! Packet buffers and control messages both travel between threads through
//! the same fixed-capacity FIFO. Capacity is the backpressure mechanism: a
//! full queue pushes the cost back onto the producer, which chooses between
//! failing fast, waiting, or waiting with a deadline.

pub mod bounded;

pub use bounded::{BoundedQueue, SendError};
