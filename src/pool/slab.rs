//! Slab pool implementation - fixed-size node allocation with backpressure

use std::sync::{Condvar, Mutex};
use std::time::Instant;

use log::{debug, warn};

use crate::error::{PktBufError, Result};
use crate::sync::WaitPolicy;

use super::stats::PoolStats;

/// A pool of pre-allocated nodes recycled through a free stack
///
/// Every node is boxed once at construction; `alloc` pops a node and `free`
/// pushes it back, both under a single mutex. Blocking allocation waits on a
/// condition variable in a predicate loop, so a node freed elsewhere (or a
/// timeout) is the only thing that releases a waiter. At every point
/// `free + in-use == capacity`.
#[derive(Debug)]
pub struct SlabPool<T> {
    /// Pool name, used in errors and logging
    name: String,
    /// Total node count, fixed at construction
    capacity: usize,
    /// Free stack and counters
    inner: Mutex<Inner<T>>,
    /// Signalled once per freed node
    available: Condvar,
}

#[derive(Debug)]
struct Inner<T> {
    free: Vec<Box<T>>,
    in_use: usize,
    peak_in_use: usize,
    total_allocations: u64,
    total_frees: u64,
    allocation_failures: u64,
}

impl<T> SlabPool<T> {
    /// Create a pool of `count` nodes produced by `factory`
    pub fn new(name: impl Into<String>, count: usize, factory: impl Fn() -> T) -> Result<Self> {
        let name = name.into();
        if count == 0 {
            return Err(PktBufError::invalid_parameter(
                "count",
                "pool must hold at least one node",
            ));
        }

        let mut free = Vec::with_capacity(count);
        for _ in 0..count {
            free.push(Box::new(factory()));
        }

        debug!("slab pool '{}' ready with {} nodes", name, count);

        Ok(Self {
            name,
            capacity: count,
            inner: Mutex::new(Inner {
                free,
                in_use: 0,
                peak_in_use: 0,
                total_allocations: 0,
                total_frees: 0,
                allocation_failures: 0,
            }),
            available: Condvar::new(),
        })
    }

    /// Take a node from the pool
    ///
    /// `WaitPolicy::NoWait` fails with `OutOfMemory` the moment the free
    /// stack is empty and must be used from any context that cannot stall.
    /// The blocking policies wait for a `free` elsewhere, subject to the
    /// deadline; expiry fails with `Timeout`.
    pub fn alloc(&self, wait: WaitPolicy) -> Result<Box<T>> {
        let deadline = wait.deadline();
        let mut inner = self.inner.lock().unwrap();

        loop {
            if let Some(node) = inner.free.pop() {
                inner.in_use += 1;
                inner.total_allocations += 1;
                if inner.in_use > inner.peak_in_use {
                    inner.peak_in_use = inner.in_use;
                }
                return Ok(node);
            }

            if !wait.blocks() {
                inner.allocation_failures += 1;
                warn!("slab pool '{}' exhausted ({} nodes)", self.name, self.capacity);
                return Err(PktBufError::out_of_memory(&self.name));
            }

            match deadline {
                None => {
                    inner = self.available.wait(inner).unwrap();
                }
                Some(dl) => {
                    let now = Instant::now();
                    if now >= dl {
                        inner.allocation_failures += 1;
                        return Err(PktBufError::timeout(wait.timeout_millis()));
                    }
                    let (guard, _) = self.available.wait_timeout(inner, dl - now).unwrap();
                    inner = guard;
                }
            }
        }
    }

    /// Return a node to the pool and wake one waiter
    pub fn free(&self, node: Box<T>) {
        let mut inner = self.inner.lock().unwrap();
        inner.free.push(node);
        inner.in_use = inner.in_use.saturating_sub(1);
        inner.total_frees += 1;
        drop(inner);

        // Wake outside the lock so the waiter can take it immediately.
        self.available.notify_one();
    }

    /// Number of nodes currently on the free stack
    pub fn free_count(&self) -> usize {
        self.inner.lock().unwrap().free.len()
    }

    /// Total node count the pool was built with
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pool name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the pool counters
    pub fn stats(&self) -> PoolStats {
        let inner = self.inner.lock().unwrap();
        PoolStats {
            capacity: self.capacity,
            free: inner.free.len(),
            in_use: inner.in_use,
            peak_in_use: inner.peak_in_use,
            total_allocations: inner.total_allocations,
            total_frees: inner.total_frees,
            allocation_failures: inner.allocation_failures,
        }
    }
}
