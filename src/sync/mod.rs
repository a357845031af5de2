//! Blocking policies shared by the slab pool and the bounded queue
//!
//! Both primitives are single-monitor designs: one mutex guarding the state,
//! condition variables for waiters, predicate loops around every wait. The
//! policy below selects between a non-blocking probe, an unbounded wait and
//! a deadline wait.

use std::time::{Duration, Instant};

/// How long an allocation or queue operation may block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Never block; fail immediately if the resource is unavailable.
    ///
    /// Mandatory for receive-path and interrupt-like contexts that must not
    /// stall.
    NoWait,
    /// Block until the resource becomes available
    Forever,
    /// Block up to the given duration, then fail with a timeout
    Timeout(Duration),
}

impl WaitPolicy {
    /// Convenience constructor for a millisecond timeout
    pub fn millis(ms: u64) -> Self {
        Self::Timeout(Duration::from_millis(ms))
    }

    /// Absolute deadline for this policy, if it has one
    pub(crate) fn deadline(&self) -> Option<Instant> {
        match self {
            WaitPolicy::Timeout(d) => Some(Instant::now() + *d),
            _ => None,
        }
    }

    /// Whether this policy permits blocking at all
    pub fn blocks(&self) -> bool {
        !matches!(self, WaitPolicy::NoWait)
    }

    /// Millisecond budget for timeout errors (0 for the other policies)
    pub(crate) fn timeout_millis(&self) -> u64 {
        match self {
            WaitPolicy::Timeout(d) => d.as_millis() as u64,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_policy_blocks() {
        assert!(!WaitPolicy::NoWait.blocks());
        assert!(WaitPolicy::Forever.blocks());
        assert!(WaitPolicy::millis(10).blocks());
    }

    #[test]
    fn test_deadline_only_for_timeout() {
        assert!(WaitPolicy::NoWait.deadline().is_none());
        assert!(WaitPolicy::Forever.deadline().is_none());
        assert!(WaitPolicy::millis(5).deadline().is_some());
    }
}
