//! Error types and handling for the packet buffer engine

/// Result type alias for pktbuf operations
pub type Result<T> = std::result::Result<T, PktBufError>;

/// Error types for pools, queues and buffer shaping/I/O
#[derive(Debug, thiserror::Error)]
pub enum PktBufError {
    /// Pool has no free nodes left (non-blocking allocation path)
    #[error("out of memory: pool '{pool}' exhausted")]
    OutOfMemory { pool: String },

    /// Requested size exceeds what the buffer or block layout can satisfy
    #[error("size error: requested {requested}, limit {limit}")]
    Size { requested: usize, limit: usize },

    /// Queue is at capacity (non-blocking send path)
    #[error("queue full: {queue}")]
    Full { queue: String },

    /// Queue has no items (non-blocking recv path)
    #[error("queue empty: {queue}")]
    Empty { queue: String },

    /// A blocking wait expired before the resource became available
    #[error("timed out after {waited_ms} ms")]
    Timeout { waited_ms: u64 },

    /// Invalid parameters or configuration
    #[error("invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },
}

impl PktBufError {
    /// Create an out-of-memory error for the named pool
    pub fn out_of_memory(pool: impl Into<String>) -> Self {
        Self::OutOfMemory { pool: pool.into() }
    }

    /// Create a size error
    pub fn size(requested: usize, limit: usize) -> Self {
        Self::Size { requested, limit }
    }

    /// Create a queue-full error
    pub fn full(queue: impl Into<String>) -> Self {
        Self::Full {
            queue: queue.into(),
        }
    }

    /// Create a queue-empty error
    pub fn empty(queue: impl Into<String>) -> Self {
        Self::Empty {
            queue: queue.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(waited_ms: u64) -> Self {
        Self::Timeout { waited_ms }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PktBufError::out_of_memory("block_pool");
        assert!(matches!(err, PktBufError::OutOfMemory { .. }));

        let err = PktBufError::size(135, 128);
        assert!(matches!(
            err,
            PktBufError::Size {
                requested: 135,
                limit: 128
            }
        ));

        let err = PktBufError::full("in_queue");
        assert!(matches!(err, PktBufError::Full { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = PktBufError::size(256, 128);
        let display = format!("{}", err);
        assert!(display.contains("size error"));
        assert!(display.contains("256"));

        let err = PktBufError::invalid_parameter("capacity", "must be non-zero");
        let display = format!("{}", err);
        assert!(display.contains("capacity"));
    }
}
