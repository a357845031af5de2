//! Cursor-based sequential and random I/O over a packet buffer chain
//!
//! The cursor is an (absolute position, block index, offset into the
//! block's used region) triple. `block == chain.len()` is the end sentinel.
//! Every bulk operation pre-validates the request against the bytes
//! remaining from the cursor and fails atomically - no partial transfer.

use crate::error::{PktBufError, Result};

use super::buffer::PktBuf;

/// Read/write position inside a packet buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Absolute byte position in `[0, total_size]`
    pub(crate) pos: usize,
    /// Index of the current block; chain length means "end"
    pub(crate) block: usize,
    /// Offset into the current block's used region
    pub(crate) offset: usize,
}

impl PktBuf {
    /// Move the cursor back to the first byte
    pub fn reset_cursor(&mut self) {
        self.cursor = Cursor::default();
    }

    /// Current absolute cursor position
    pub fn position(&self) -> usize {
        self.cursor.pos
    }

    /// Bytes between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.total - self.cursor.pos
    }

    /// Bytes left in the cursor's current block
    fn block_remaining(&self) -> usize {
        match self.chain.get(self.cursor.block) {
            Some(blk) => blk.used() - self.cursor.offset,
            None => 0,
        }
    }

    /// Step the cursor forward by `step` bytes, relinking past block
    /// boundaries; `step` must not exceed the current block's remainder
    fn bump(&mut self, step: usize) {
        self.cursor.pos += step;
        self.cursor.offset += step;
        if let Some(blk) = self.chain.get(self.cursor.block) {
            if self.cursor.offset >= blk.used() {
                self.cursor.block += 1;
                self.cursor.offset = 0;
            }
        }
    }

    /// Move the cursor forward by `n` bytes
    ///
    /// Fails with `Size` if fewer than `n` bytes remain.
    pub fn advance(&mut self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(PktBufError::size(n, self.remaining()));
        }

        let mut left = n;
        while left > 0 {
            let step = left.min(self.block_remaining());
            self.bump(step);
            left -= step;
        }
        Ok(())
    }

    /// Position the cursor at an absolute offset
    ///
    /// A target behind the current position rewinds to the head and replays
    /// forward (blocks carry no backward link); a target ahead walks forward
    /// incrementally. Fails with `Size` outside `[0, total_size)`.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset == self.cursor.pos {
            return Ok(());
        }
        if offset >= self.total {
            return Err(PktBufError::size(offset, self.total));
        }

        if offset < self.cursor.pos {
            self.reset_cursor();
            self.advance(offset)
        } else {
            let ahead = offset - self.cursor.pos;
            self.advance(ahead)
        }
    }

    /// Copy `src` into the buffer at the cursor, advancing it
    ///
    /// Fails with `Size` (and copies nothing) when `src` is longer than the
    /// bytes remaining from the cursor.
    pub fn write(&mut self, src: &[u8]) -> Result<()> {
        if src.len() > self.remaining() {
            return Err(PktBufError::size(src.len(), self.remaining()));
        }

        let mut copied = 0;
        while copied < src.len() {
            let chunk = (src.len() - copied).min(self.block_remaining());
            let offset = self.cursor.offset;
            if let Some(blk) = self.chain.get_mut(self.cursor.block) {
                blk.data_mut()[offset..offset + chunk]
                    .copy_from_slice(&src[copied..copied + chunk]);
            }
            self.bump(chunk);
            copied += chunk;
        }
        Ok(())
    }

    /// Copy bytes from the cursor into `dst`, advancing it
    ///
    /// Fails with `Size` (and copies nothing) when `dst` is longer than the
    /// bytes remaining from the cursor.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<()> {
        if dst.len() > self.remaining() {
            return Err(PktBufError::size(dst.len(), self.remaining()));
        }

        let mut copied = 0;
        while copied < dst.len() {
            let chunk = (dst.len() - copied).min(self.block_remaining());
            let offset = self.cursor.offset;
            if let Some(blk) = self.chain.get(self.cursor.block) {
                dst[copied..copied + chunk]
                    .copy_from_slice(&blk.data()[offset..offset + chunk]);
            }
            self.bump(chunk);
            copied += chunk;
        }
        Ok(())
    }

    /// Copy `n` bytes from `src`'s cursor to this buffer's cursor,
    /// advancing both in lockstep
    ///
    /// Each chunk is bounded by both buffers' current-block remainders.
    /// Fails with `Size` (and copies nothing) when either side has fewer
    /// than `n` bytes remaining.
    pub fn copy_from(&mut self, src: &mut PktBuf, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(PktBufError::size(n, self.remaining()));
        }
        if n > src.remaining() {
            return Err(PktBufError::size(n, src.remaining()));
        }

        let mut left = n;
        while left > 0 {
            let chunk = left
                .min(self.block_remaining())
                .min(src.block_remaining());

            let src_off = src.cursor.offset;
            let dst_off = self.cursor.offset;
            if let (Some(dst_blk), Some(src_blk)) = (
                self.chain.get_mut(self.cursor.block),
                src.chain.get(src.cursor.block),
            ) {
                dst_blk.data_mut()[dst_off..dst_off + chunk]
                    .copy_from_slice(&src_blk.data()[src_off..src_off + chunk]);
            }

            self.bump(chunk);
            src.bump(chunk);
            left -= chunk;
        }
        Ok(())
    }

    /// Write `n` copies of `value` at the cursor, advancing it
    ///
    /// Same chunking and atomic pre-validation as [`write`](Self::write).
    pub fn fill(&mut self, value: u8, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(PktBufError::size(n, self.remaining()));
        }

        let mut left = n;
        while left > 0 {
            let chunk = left.min(self.block_remaining());
            let offset = self.cursor.offset;
            if let Some(blk) = self.chain.get_mut(self.cursor.block) {
                blk.data_mut()[offset..offset + chunk].fill(value);
            }
            self.bump(chunk);
            left -= chunk;
        }
        Ok(())
    }
}
