//! Bounded queue implementation - fixed ring with producer/consumer backpressure

use std::fmt;
use std::sync::{Condvar, Mutex};
use std::time::Instant;

use log::debug;

use crate::error::{PktBufError, Result};
use crate::sync::WaitPolicy;

/// A fixed-capacity FIFO of owned items with blocking send/recv
///
/// One mutex guards the ring; `not_full` and `not_empty` condition variables
/// carry the two backpressure directions, each waited on in a predicate
/// loop. A freshly built queue reports zero items available, and items come
/// out in exactly the order they went in.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    /// Queue name, used in errors and logging
    name: String,
    /// Slot count, fixed at construction
    capacity: usize,
    /// Ring storage and indices
    inner: Mutex<Ring<T>>,
    /// Signalled once per removed item
    not_full: Condvar,
    /// Signalled once per inserted item
    not_empty: Condvar,
}

#[derive(Debug)]
struct Ring<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    count: usize,
}

/// A `send` that could not take the item; hands it back to the caller
pub struct SendError<T> {
    /// The rejected item, untouched
    pub item: T,
    /// Why the send failed (`Full` or `Timeout`)
    pub error: PktBufError,
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "send failed: {}", self.error)
    }
}

impl<T> std::error::Error for SendError<T> {}

impl<T> BoundedQueue<T> {
    /// Create a queue with room for `capacity` items
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self> {
        let name = name.into();
        if capacity == 0 {
            return Err(PktBufError::invalid_parameter(
                "capacity",
                "queue must hold at least one item",
            ));
        }

        let slots: Box<[Option<T>]> = (0..capacity).map(|_| None).collect();

        debug!("bounded queue '{}' ready with {} slots", name, capacity);

        Ok(Self {
            name,
            capacity,
            inner: Mutex::new(Ring {
                slots,
                head: 0,
                count: 0,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        })
    }

    /// Append an item at the tail
    ///
    /// When the queue is full, `NoWait` fails with `Full` immediately and the
    /// blocking policies wait for a consumer, failing with `Timeout` on
    /// expiry. Either way the rejected item comes back inside the error.
    pub fn send(&self, item: T, wait: WaitPolicy) -> std::result::Result<(), SendError<T>> {
        let deadline = wait.deadline();
        let mut ring = self.inner.lock().unwrap();

        loop {
            if ring.count < self.capacity {
                let tail = (ring.head + ring.count) % self.capacity;
                ring.slots[tail] = Some(item);
                ring.count += 1;
                drop(ring);
                self.not_empty.notify_one();
                return Ok(());
            }

            if !wait.blocks() {
                return Err(SendError {
                    item,
                    error: PktBufError::full(&self.name),
                });
            }

            match deadline {
                None => {
                    ring = self.not_full.wait(ring).unwrap();
                }
                Some(dl) => {
                    let now = Instant::now();
                    if now >= dl {
                        return Err(SendError {
                            item,
                            error: PktBufError::timeout(wait.timeout_millis()),
                        });
                    }
                    let (guard, _) = self.not_full.wait_timeout(ring, dl - now).unwrap();
                    ring = guard;
                }
            }
        }
    }

    /// Remove the item at the head
    ///
    /// `NoWait` fails with `Empty` when there is nothing queued; the blocking
    /// policies wait for a producer, failing with `Timeout` on expiry.
    pub fn recv(&self, wait: WaitPolicy) -> Result<T> {
        let deadline = wait.deadline();
        let mut ring = self.inner.lock().unwrap();

        loop {
            if ring.count > 0 {
                let head = ring.head;
                let item = ring.slots[head].take();
                ring.head = (head + 1) % self.capacity;
                ring.count -= 1;
                drop(ring);
                self.not_full.notify_one();
                // A populated slot between head and tail is an invariant.
                return Ok(item.unwrap());
            }

            if !wait.blocks() {
                return Err(PktBufError::empty(&self.name));
            }

            match deadline {
                None => {
                    ring = self.not_empty.wait(ring).unwrap();
                }
                Some(dl) => {
                    let now = Instant::now();
                    if now >= dl {
                        return Err(PktBufError::timeout(wait.timeout_millis()));
                    }
                    let (guard, _) = self.not_empty.wait_timeout(ring, dl - now).unwrap();
                    ring = guard;
                }
            }
        }
    }

    /// Number of items currently queued
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().count
    }

    /// Check if the queue holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the queue is at capacity
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Slot count the queue was built with
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Queue name
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_rejects_zero_capacity() {
        assert!(BoundedQueue::<u32>::new("empty", 0).is_err());
    }

    #[test]
    fn test_new_queue_reports_empty() {
        let q: BoundedQueue<u32> = BoundedQueue::new("fresh", 8).unwrap();
        assert!(q.is_empty());
        assert!(matches!(
            q.recv(WaitPolicy::NoWait).unwrap_err(),
            PktBufError::Empty { .. }
        ));
    }

    #[test]
    fn test_full_send_returns_item() {
        let q = BoundedQueue::new("tiny", 1).unwrap();
        q.send(7u32, WaitPolicy::NoWait).unwrap();

        let err = q.send(9u32, WaitPolicy::NoWait).unwrap_err();
        assert_eq!(err.item, 9);
        assert!(matches!(err.error, PktBufError::Full { .. }));
    }

    #[test]
    fn test_fifo_order_with_wraparound() {
        let q = BoundedQueue::new("ring", 3).unwrap();
        for i in 0..3u32 {
            q.send(i, WaitPolicy::NoWait).unwrap();
        }
        assert_eq!(q.recv(WaitPolicy::NoWait).unwrap(), 0);
        q.send(3, WaitPolicy::NoWait).unwrap();

        for expected in 1..4u32 {
            assert_eq!(q.recv(WaitPolicy::NoWait).unwrap(), expected);
        }
        assert!(q.is_empty());
    }

    #[test]
    fn test_recv_timeout_expires() {
        let q: BoundedQueue<u32> = BoundedQueue::new("idle", 2).unwrap();
        let err = q.recv(WaitPolicy::millis(10)).unwrap_err();
        assert!(matches!(err, PktBufError::Timeout { .. }));
    }
}
