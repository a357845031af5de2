//! Packet buffer - an ordered chain of blocks holding one logical byte sequence

use std::collections::VecDeque;
use std::sync::Arc;

use crate::error::{PktBufError, Result};
use crate::sync::WaitPolicy;

use super::block::PktBlock;
use super::cursor::Cursor;
use super::pool::{BufShell, Growth, PktBufPool};
use super::shared::SharedPktBuf;

/// A variable-length byte sequence stored as a chain of pooled blocks
///
/// The head block holds the first logical byte. Headers grow the front of
/// the chain, payload grows the back; `total_size` is always the sum of the
/// blocks' used regions. The buffer owns its blocks exclusively - sharing
/// goes through [`SharedPktBuf`] - and dropping it returns every block and
/// the buffer shell to the pool it came from.
///
/// None of the operations here block or lock: concurrent access to one
/// buffer must be serialized by the caller. Shaping operations
/// ([`add_header`](Self::add_header), [`remove_header`](Self::remove_header),
/// [`resize`](Self::resize), [`join`](Self::join),
/// [`set_contiguous`](Self::set_contiguous)) reset the cursor to position 0.
#[derive(Debug)]
pub struct PktBuf {
    pub(crate) chain: VecDeque<Box<PktBlock>>,
    pub(crate) total: usize,
    pub(crate) cursor: Cursor,
    shell: Option<Box<BufShell>>,
    pool: Arc<PktBufPool>,
}

impl PktBuf {
    pub(crate) fn from_parts(
        pool: Arc<PktBufPool>,
        mut shell: Box<BufShell>,
        blocks: Vec<Box<PktBlock>>,
    ) -> Self {
        // Reuse the shell's chain allocation from its previous lifetime.
        let mut chain = std::mem::take(&mut shell.chain);
        chain.extend(blocks);
        let total = chain.iter().map(|blk| blk.used()).sum();

        Self {
            chain,
            total,
            cursor: Cursor::default(),
            shell: Some(shell),
            pool,
        }
    }

    /// Total bytes of data across the chain
    pub fn total_size(&self) -> usize {
        self.total
    }

    /// Check if the buffer holds no data
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of blocks in the chain
    pub fn block_count(&self) -> usize {
        self.chain.len()
    }

    /// Headroom available in the head block
    pub fn headroom(&self) -> usize {
        self.chain.front().map(|blk| blk.headroom()).unwrap_or(0)
    }

    /// Bytes of data in the head block (the contiguous prefix length)
    pub fn contiguous_len(&self) -> usize {
        self.chain.front().map(|blk| blk.used()).unwrap_or(0)
    }

    /// Convert into a shared, reference-counted handle
    pub fn into_shared(self) -> SharedPktBuf {
        SharedPktBuf::new(self)
    }

    /// Prepend `size` header bytes ahead of the current data
    ///
    /// Uses the head block's headroom when it suffices (O(1), no
    /// allocation). Otherwise, with `contiguous` the whole header must fit
    /// in one freshly prepended block (`Size` error if it exceeds the block
    /// capacity); without it, remaining headroom is drained into the header
    /// first and a chain is prepended for the residual. On any error the
    /// buffer is unchanged.
    pub fn add_header(&mut self, size: usize, contiguous: bool) -> Result<()> {
        if size == 0 {
            return Ok(());
        }

        if let Some(first) = self.chain.front_mut() {
            if first.headroom() >= size {
                first.grow_front(size);
                self.total += size;
                self.reset_cursor();
                return Ok(());
            }
        }

        if contiguous {
            let block_size = self.pool.block_size();
            if size > block_size {
                return Err(PktBufError::size(size, block_size));
            }
            let blk = self.pool.alloc_block(size, WaitPolicy::NoWait)?;
            self.chain.push_front(blk);
        } else {
            // Headroom is strictly less than `size` here.
            let drained = self.headroom();
            let residual = size - drained;

            // Take the residual chain before touching the head block so a
            // pool failure leaves the buffer untouched.
            let blocks = self
                .pool
                .alloc_chain(residual, Growth::Front, WaitPolicy::NoWait)?;

            if let Some(first) = self.chain.front_mut() {
                first.grow_front(drained);
            }
            for blk in blocks.into_iter().rev() {
                self.chain.push_front(blk);
            }
        }

        self.total += size;
        self.reset_cursor();
        Ok(())
    }

    /// Strip `size` bytes off the front of the buffer
    ///
    /// Fails with `Size` if the buffer holds fewer than `size` bytes.
    pub fn remove_header(&mut self, size: usize) -> Result<()> {
        if size > self.total {
            return Err(PktBufError::size(size, self.total));
        }

        let mut remaining = size;
        while remaining > 0 {
            let Some(first) = self.chain.front_mut() else {
                break;
            };

            if first.used() > remaining {
                first.shrink_front(remaining);
                self.total -= remaining;
                remaining = 0;
            } else if let Some(blk) = self.chain.pop_front() {
                let used = blk.used();
                self.pool.free_block(blk);
                self.total -= used;
                remaining -= used;
            }
        }

        self.reset_cursor();
        Ok(())
    }

    /// Grow or shrink the buffer to exactly `to_size` bytes
    ///
    /// Growth extends the tail block in place where tailroom allows, then
    /// appends a tail-growth chain for the remainder; shrinking trims the
    /// chain from the back, freeing every block past the new tail. Resizing
    /// to zero frees the whole chain.
    pub fn resize(&mut self, to_size: usize) -> Result<()> {
        if to_size == self.total {
            return Ok(());
        }

        if self.total == 0 {
            let blocks = self
                .pool
                .alloc_chain(to_size, Growth::Tail, WaitPolicy::NoWait)?;
            self.chain.extend(blocks);
        } else if to_size == 0 {
            while let Some(blk) = self.chain.pop_front() {
                self.pool.free_block(blk);
            }
        } else if to_size > self.total {
            let delta = to_size - self.total;
            let tailroom = self.chain.back().map(|blk| blk.tailroom()).unwrap_or(0);

            if tailroom >= delta {
                if let Some(last) = self.chain.back_mut() {
                    last.grow_tail(delta);
                }
            } else {
                let blocks = self.pool.alloc_chain(
                    delta - tailroom,
                    Growth::Tail,
                    WaitPolicy::NoWait,
                )?;
                if let Some(last) = self.chain.back_mut() {
                    last.grow_tail(tailroom);
                }
                self.chain.extend(blocks);
            }
        } else {
            self.shrink_to(to_size)?;
        }

        self.total = to_size;
        self.reset_cursor();
        Ok(())
    }

    fn shrink_to(&mut self, to_size: usize) -> Result<()> {
        let mut running = 0usize;
        let mut cut = None;
        for (idx, blk) in self.chain.iter().enumerate() {
            running += blk.used();
            if running >= to_size {
                cut = Some((idx, blk.used() - (running - to_size)));
                break;
            }
        }

        let Some((idx, keep)) = cut else {
            return Err(PktBufError::size(to_size, self.total));
        };

        self.chain[idx].trim_tail_to(keep);
        while self.chain.len() > idx + 1 {
            if let Some(blk) = self.chain.pop_back() {
                self.pool.free_block(blk);
            }
        }
        Ok(())
    }

    /// Append every block of `src` to this buffer's tail
    ///
    /// Taking `src` by value is the "no other owner" precondition: a shared
    /// buffer cannot be joined. The emptied source returns its shell to the
    /// pool immediately. Both buffers must come from the same pool.
    pub fn join(&mut self, mut src: PktBuf) -> Result<()> {
        if !Arc::ptr_eq(&self.pool, &src.pool) {
            return Err(PktBufError::invalid_parameter(
                "src",
                "buffers belong to different pools",
            ));
        }

        while let Some(blk) = src.chain.pop_front() {
            self.total += blk.used();
            self.chain.push_back(blk);
        }
        src.total = 0;

        self.reset_cursor();
        Ok(())
    }

    /// Guarantee the first `size` bytes occupy a single block
    ///
    /// Fails with `Size` if `size` exceeds one block's capacity or the
    /// buffer's total size. When the head block is short, its data is
    /// compacted to the payload front and bytes are pulled from subsequent
    /// blocks (freeing each one it drains) until the prefix is contiguous.
    pub fn set_contiguous(&mut self, size: usize) -> Result<()> {
        let block_size = self.pool.block_size();
        if size > block_size {
            return Err(PktBufError::size(size, block_size));
        }
        if size > self.total {
            return Err(PktBufError::size(size, self.total));
        }
        if size == 0 || self.contiguous_len() >= size {
            return Ok(());
        }

        if let Some(first) = self.chain.front_mut() {
            first.compact();
        }

        let mut needed = size - self.contiguous_len();
        while needed > 0 {
            let Some(mut src) = self.chain.remove(1) else {
                return Err(PktBufError::size(size, self.total));
            };

            let n = needed.min(src.used());
            if let Some(first) = self.chain.front_mut() {
                first.extend_from_slice(&src.data()[..n]);
            }
            src.shrink_front(n);
            needed -= n;

            if src.used() == 0 {
                self.pool.free_block(src);
            } else {
                self.chain.insert(1, src);
            }
        }

        self.reset_cursor();
        Ok(())
    }

    /// Verify the chain bookkeeping (test support)
    #[cfg(test)]
    pub(crate) fn check_invariant(&self) -> bool {
        self.total == self.chain.iter().map(|blk| blk.used()).sum::<usize>()
    }
}

impl Drop for PktBuf {
    fn drop(&mut self) {
        while let Some(blk) = self.chain.pop_front() {
            self.pool.free_block(blk);
        }
        if let Some(mut shell) = self.shell.take() {
            shell.chain = std::mem::take(&mut self.chain);
            self.pool.free_shell(shell);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{PktBufPool, WaitPolicy};

    #[test]
    fn test_total_matches_chain_after_shaping() {
        let pool = PktBufPool::with_defaults().unwrap();
        let mut buf = pool.alloc(300, WaitPolicy::NoWait).unwrap();
        assert!(buf.check_invariant());

        buf.add_header(40, false).unwrap();
        assert!(buf.check_invariant());

        buf.remove_header(17).unwrap();
        assert!(buf.check_invariant());

        buf.resize(500).unwrap();
        assert!(buf.check_invariant());

        let piece = pool.alloc(90, WaitPolicy::NoWait).unwrap();
        buf.join(piece).unwrap();
        assert!(buf.check_invariant());

        buf.set_contiguous(120).unwrap();
        assert!(buf.check_invariant());
        assert_eq!(buf.total_size(), 590);
    }

    #[test]
    fn test_join_transfers_every_block() {
        let pool = PktBufPool::with_defaults().unwrap();
        let mut dst = pool.alloc(100, WaitPolicy::NoWait).unwrap();
        let src = pool.alloc(200, WaitPolicy::NoWait).unwrap();
        let src_blocks = src.block_count();

        dst.join(src).unwrap();
        assert_eq!(dst.total_size(), 300);
        assert_eq!(dst.block_count(), 1 + src_blocks);
        // The source's shell went straight back to the pool.
        assert_eq!(pool.buf_free_count(), 99);
    }
}
