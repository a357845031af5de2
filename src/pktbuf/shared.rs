//! Shared ownership of a packet buffer
//!
//! The engine's buffers are single-owner values; fan-out to multiple
//! consumers goes through this handle instead of a manual reference count.
//! Cloning the handle is the "incRef", dropping the last clone returns the
//! blocks to the pool, and a released buffer is simply unreachable - there
//! is no "use after free" error to detect at runtime.

use std::sync::{Arc, Mutex, MutexGuard};

use super::buffer::PktBuf;

/// A reference-counted handle to a packet buffer
///
/// The engine itself never locks a buffer; the mutex here is the
/// caller-side serialization required for buffers touched by more than one
/// thread. Single-threaded fan-out pays one uncontended lock per access.
#[derive(Debug, Clone)]
pub struct SharedPktBuf {
    inner: Arc<Mutex<PktBuf>>,
}

impl SharedPktBuf {
    /// Wrap a buffer for shared ownership
    pub fn new(buf: PktBuf) -> Self {
        Self {
            inner: Arc::new(Mutex::new(buf)),
        }
    }

    /// Lock the buffer for exclusive access
    pub fn lock(&self) -> MutexGuard<'_, PktBuf> {
        self.inner.lock().unwrap()
    }

    /// Number of live handles to this buffer
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Reclaim exclusive ownership if this is the last handle
    pub fn try_unwrap(self) -> Result<PktBuf, SharedPktBuf> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap()),
            Err(inner) => Err(SharedPktBuf { inner }),
        }
    }
}
