//! Packet block - one fixed-capacity payload node of a buffer chain

use std::fmt;

/// A fixed-capacity payload node with movable head/tail free regions
///
/// The used region sits at `data_start..data_start + used` inside the
/// payload. Free bytes ahead of it are headroom (cheap prepend), free bytes
/// behind it are tailroom (cheap append). `data_start + used <= capacity`
/// always holds.
pub struct PktBlock {
    /// Payload storage, capacity fixed at pool construction
    payload: Box<[u8]>,
    /// Offset of the first used byte
    data_start: usize,
    /// Bytes currently holding data
    used: usize,
}

impl PktBlock {
    /// Create an empty block with the given payload capacity
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            payload: vec![0u8; capacity].into_boxed_slice(),
            data_start: 0,
            used: 0,
        }
    }

    /// Payload capacity in bytes
    pub fn capacity(&self) -> usize {
        self.payload.len()
    }

    /// Bytes currently holding data
    pub fn used(&self) -> usize {
        self.used
    }

    /// Unused bytes ahead of the used region
    pub fn headroom(&self) -> usize {
        self.data_start
    }

    /// Unused bytes behind the used region
    pub fn tailroom(&self) -> usize {
        self.payload.len() - self.data_start - self.used
    }

    /// The used region as a slice
    pub fn data(&self) -> &[u8] {
        &self.payload[self.data_start..self.data_start + self.used]
    }

    /// The used region as a mutable slice
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.payload[self.data_start..self.data_start + self.used]
    }

    /// Lay out `n` used bytes flush against the payload tail, reserving
    /// headroom at the front
    pub(crate) fn set_front_growth(&mut self, n: usize) {
        debug_assert!(n <= self.payload.len());
        self.data_start = self.payload.len() - n;
        self.used = n;
    }

    /// Lay out `n` used bytes flush against the payload front, reserving
    /// tailroom at the back
    pub(crate) fn set_tail_growth(&mut self, n: usize) {
        debug_assert!(n <= self.payload.len());
        self.data_start = 0;
        self.used = n;
    }

    /// Extend the used region forward into headroom by `n` bytes
    pub(crate) fn grow_front(&mut self, n: usize) {
        debug_assert!(n <= self.data_start);
        self.data_start -= n;
        self.used += n;
    }

    /// Shrink the used region from the front by `n` bytes
    pub(crate) fn shrink_front(&mut self, n: usize) {
        debug_assert!(n <= self.used);
        self.data_start += n;
        self.used -= n;
    }

    /// Extend the used region backward into tailroom by `n` bytes
    pub(crate) fn grow_tail(&mut self, n: usize) {
        debug_assert!(n <= self.tailroom());
        self.used += n;
    }

    /// Trim the used region down to `n` bytes, dropping its tail
    pub(crate) fn trim_tail_to(&mut self, n: usize) {
        debug_assert!(n <= self.used);
        self.used = n;
    }

    /// Slide the used region to the payload front, freeing all headroom
    /// into tailroom
    pub(crate) fn compact(&mut self) {
        if self.data_start > 0 {
            self.payload
                .copy_within(self.data_start..self.data_start + self.used, 0);
            self.data_start = 0;
        }
    }

    /// Append bytes into the tailroom
    pub(crate) fn extend_from_slice(&mut self, src: &[u8]) {
        debug_assert!(src.len() <= self.tailroom());
        let start = self.data_start + self.used;
        self.payload[start..start + src.len()].copy_from_slice(src);
        self.used += src.len();
    }

    /// Clear layout state before the block returns to its pool
    pub(crate) fn recycle(&mut self) {
        self.data_start = 0;
        self.used = 0;
    }
}

impl fmt::Debug for PktBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PktBlock")
            .field("capacity", &self.payload.len())
            .field("data_start", &self.data_start)
            .field("used", &self.used)
            .finish()
    }
}
