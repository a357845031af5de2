//! Packet buffer pool configuration

use serde::{Deserialize, Serialize};

use crate::error::{PktBufError, Result};

/// Configuration for a [`PktBufPool`](super::PktBufPool)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PktBufConfig {
    /// Payload capacity of each block in bytes
    pub block_size: usize,
    /// Total number of blocks in the pool
    pub block_count: usize,
    /// Total number of packet buffers that may be live at once
    pub buf_count: usize,
}

impl Default for PktBufConfig {
    fn default() -> Self {
        Self {
            block_size: 128,
            block_count: 100,
            buf_count: 100,
        }
    }
}

impl PktBufConfig {
    /// Set block payload capacity
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    /// Set total block count
    pub fn with_block_count(mut self, count: usize) -> Self {
        self.block_count = count;
        self
    }

    /// Set total buffer count
    pub fn with_buf_count(mut self, count: usize) -> Self {
        self.buf_count = count;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(PktBufError::invalid_parameter(
                "block_size",
                "block size cannot be zero",
            ));
        }

        if self.block_count == 0 {
            return Err(PktBufError::invalid_parameter(
                "block_count",
                "block count cannot be zero",
            ));
        }

        if self.buf_count == 0 {
            return Err(PktBufError::invalid_parameter(
                "buf_count",
                "buffer count cannot be zero",
            ));
        }

        Ok(())
    }

    /// Total payload bytes the block pool will hold
    pub fn total_payload_bytes(&self) -> usize {
        self.block_size * self.block_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PktBufConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.block_size, 128);
        assert_eq!(config.total_payload_bytes(), 12800);
    }

    #[test]
    fn test_builder_and_validation() {
        let config = PktBufConfig::default()
            .with_block_size(256)
            .with_block_count(32)
            .with_buf_count(8);
        assert!(config.validate().is_ok());

        let bad = PktBufConfig::default().with_block_size(0);
        assert!(bad.validate().is_err());
    }
}
