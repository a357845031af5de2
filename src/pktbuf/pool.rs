//! Packet buffer pool - pooled allocation of blocks and buffer shells

use std::collections::VecDeque;
use std::sync::Arc;

use log::debug;

use crate::error::Result;
use crate::pool::SlabPool;
use crate::sync::WaitPolicy;

use super::block::PktBlock;
use super::buffer::PktBuf;
use super::config::PktBufConfig;
use super::stats::PktBufPoolStats;

/// Block-filling strategy for a fresh chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Growth {
    /// Used bytes flush against the payload tail; headroom up front
    Front,
    /// Used bytes flush against the payload front; tailroom at the back
    Tail,
}

/// Reusable packet-buffer struct, pooled alongside the blocks
///
/// Recycles the chain container between buffer lifetimes so a steady-state
/// alloc/free cycle does not grow the heap.
#[derive(Debug, Default)]
pub(crate) struct BufShell {
    pub(crate) chain: VecDeque<Box<PktBlock>>,
}

/// The pair of slab pools every packet buffer draws from
///
/// One pool of fixed-capacity payload blocks, one pool of buffer shells.
/// Buffers hold an `Arc` back to their pool and return everything on drop,
/// so `free(alloc(n))` always restores both free counts.
#[derive(Debug)]
pub struct PktBufPool {
    config: PktBufConfig,
    blocks: SlabPool<PktBlock>,
    shells: SlabPool<BufShell>,
}

impl PktBufPool {
    /// Create a pool from the given configuration
    pub fn new(config: PktBufConfig) -> Result<Arc<Self>> {
        config.validate()?;

        let block_size = config.block_size;
        let blocks = SlabPool::new("pktbuf.blocks", config.block_count, || {
            PktBlock::new(block_size)
        })?;
        let shells = SlabPool::new("pktbuf.bufs", config.buf_count, BufShell::default)?;

        debug!(
            "pktbuf pool ready: {} blocks x {} bytes, {} buffers",
            config.block_count, config.block_size, config.buf_count
        );

        Ok(Arc::new(Self {
            config,
            blocks,
            shells,
        }))
    }

    /// Create a pool with the default configuration
    pub fn with_defaults() -> Result<Arc<Self>> {
        Self::new(PktBufConfig::default())
    }

    /// Allocate a packet buffer holding exactly `size` used bytes
    ///
    /// The chain is built with front-growth layout (headroom reserved in the
    /// head block for header prepends). Allocation is all-or-nothing: if the
    /// block pool runs dry mid-chain, every block already taken goes back
    /// and the error propagates with the pool unchanged.
    pub fn alloc(self: &Arc<Self>, size: usize, wait: WaitPolicy) -> Result<PktBuf> {
        let shell = match self.shells.alloc(wait) {
            Ok(shell) => shell,
            Err(e) => return Err(e),
        };

        match self.alloc_chain(size, Growth::Front, wait) {
            Ok(chain) => Ok(PktBuf::from_parts(Arc::clone(self), shell, chain)),
            Err(e) => {
                self.shells.free(shell);
                Err(e)
            }
        }
    }

    /// Pool configuration
    pub fn config(&self) -> &PktBufConfig {
        &self.config
    }

    /// Payload capacity of one block
    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    /// Free blocks currently in the block pool
    pub fn block_free_count(&self) -> usize {
        self.blocks.free_count()
    }

    /// Free buffer shells currently in the shell pool
    pub fn buf_free_count(&self) -> usize {
        self.shells.free_count()
    }

    /// Snapshot of both backing pools
    pub fn stats(&self) -> PktBufPoolStats {
        PktBufPoolStats {
            blocks: self.blocks.stats(),
            bufs: self.shells.stats(),
        }
    }

    /// Allocate a chain of blocks totalling exactly `size` used bytes,
    /// in logical order (head block first)
    ///
    /// All-or-nothing: on failure every block already taken is returned.
    pub(crate) fn alloc_chain(
        &self,
        size: usize,
        growth: Growth,
        wait: WaitPolicy,
    ) -> Result<Vec<Box<PktBlock>>> {
        let block_size = self.config.block_size;
        let mut blocks = Vec::with_capacity(size.div_ceil(block_size));
        let mut remaining = size;

        while remaining > 0 {
            let chunk = remaining.min(block_size);
            let mut blk = match self.blocks.alloc(wait) {
                Ok(blk) => blk,
                Err(e) => {
                    for taken in blocks {
                        self.free_block(taken);
                    }
                    return Err(e);
                }
            };

            match growth {
                Growth::Front => blk.set_front_growth(chunk),
                Growth::Tail => blk.set_tail_growth(chunk),
            }
            blocks.push(blk);
            remaining -= chunk;
        }

        // Front growth prepends each block, so the partially filled block
        // ends up holding the first logical bytes.
        if growth == Growth::Front {
            blocks.reverse();
        }

        Ok(blocks)
    }

    /// Allocate a single block laid out for `used` front-growth bytes
    pub(crate) fn alloc_block(&self, used: usize, wait: WaitPolicy) -> Result<Box<PktBlock>> {
        let mut blk = self.blocks.alloc(wait)?;
        blk.set_front_growth(used);
        Ok(blk)
    }

    /// Return one block to the block pool
    pub(crate) fn free_block(&self, mut blk: Box<PktBlock>) {
        blk.recycle();
        self.blocks.free(blk);
    }

    /// Return a buffer shell to the shell pool
    pub(crate) fn free_shell(&self, shell: Box<BufShell>) {
        self.shells.free(shell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_layouts() {
        let pool = PktBufPool::with_defaults().unwrap();

        let chain = pool
            .alloc_chain(300, Growth::Front, WaitPolicy::NoWait)
            .unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].used(), 44);
        assert_eq!(chain[0].headroom(), 84);
        assert_eq!(chain[1].used(), 128);
        assert_eq!(chain[2].used(), 128);

        let tail_chain = pool
            .alloc_chain(300, Growth::Tail, WaitPolicy::NoWait)
            .unwrap();
        assert_eq!(tail_chain.len(), 3);
        assert_eq!(tail_chain[0].used(), 128);
        assert_eq!(tail_chain[2].used(), 44);
        assert_eq!(tail_chain[2].tailroom(), 84);

        for blk in chain.into_iter().chain(tail_chain) {
            pool.free_block(blk);
        }
        assert_eq!(pool.block_free_count(), 100);
    }

    #[test]
    fn test_chain_exhaustion_rolls_back() {
        let config = PktBufConfig::default().with_block_count(2);
        let pool = PktBufPool::new(config).unwrap();

        let err = pool
            .alloc_chain(500, Growth::Tail, WaitPolicy::NoWait)
            .unwrap_err();
        assert!(matches!(err, crate::PktBufError::OutOfMemory { .. }));
        assert_eq!(pool.block_free_count(), 2);
    }
}
