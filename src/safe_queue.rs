//! SafeQueue: an unbounded FIFO serialized behind a single [`Lock`].
//!
//! `push` never blocks and never fails; consumers choose between blocking
//! [`pop`](SafeQueue::pop), polling [`try_pop`](SafeQueue::try_pop), and
//! bounded-wait [`pop_timeout`](SafeQueue::pop_timeout). Popping an empty
//! queue is an explicit outcome under every policy, never a read past the
//! logical end. Dropping the queue destroys every element still queued.

use std::collections::VecDeque;
use std::sync::Condvar;
use std::time::Duration;

use thiserror::Error;

use crate::lock::Lock;

/// Error for popping from an empty queue without blocking.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("pop from empty queue")]
pub struct EmptyError;

/// Error for a bounded-wait pop that saw no element before the deadline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("timed out waiting for queue element")]
pub struct TimedOutError;

/// Thread-safe FIFO queue; unbounded, no backpressure.
pub struct SafeQueue<T> {
    slots: Lock<VecDeque<T>>,
    available: Condvar,
}

impl<T> SafeQueue<T> {
    pub fn new() -> Self {
        Self {
            slots: Lock::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }

    /// Append `value` at the tail and wake one blocked popper.
    pub fn push(&self, value: T) {
        self.slots.acquire().push_back(value);
        self.available.notify_one();
    }

    /// Remove and return the head element, blocking until one is available.
    ///
    /// FIFO order is preserved as observed by `push`: values pushed by one
    /// thread are popped in that thread's push order. The lock is not held
    /// while suspended.
    pub fn pop(&self) -> T {
        let mut slots = self
            .slots
            .acquire()
            .wait_while(&self.available, |q| q.is_empty());
        // Non-empty is guaranteed by the wait predicate while still locked.
        slots.pop_front().unwrap()
    }

    /// Remove and return the head element, or fail if the queue is empty.
    pub fn try_pop(&self) -> Result<T, EmptyError> {
        self.slots.acquire().pop_front().ok_or(EmptyError)
    }

    /// Like [`pop`](Self::pop), giving up once `dur` has elapsed with the
    /// queue still empty.
    pub fn pop_timeout(&self, dur: Duration) -> Result<T, TimedOutError> {
        let (mut slots, timed_out) =
            self.slots
                .acquire()
                .wait_timeout_while(&self.available, dur, |q| q.is_empty());
        if timed_out {
            return Err(TimedOutError);
        }
        slots.pop_front().ok_or(TimedOutError)
    }

    /// Current queue length. A snapshot: stale as soon as it returns when
    /// mutators run concurrently.
    pub fn len(&self) -> usize {
        self.slots.acquire().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.acquire().is_empty()
    }
}

impl<T> Default for SafeQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SafeQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeQueue")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
