//! Per-container mutual exclusion.
//!
//! `Lock<T>` owns the state it guards: the only way to reach `T` is through
//! `acquire()`, which returns an RAII guard, so release happens on every
//! exit path including panics. Compound container operations are written as
//! single critical sections, which is why the lock is deliberately
//! non-reentrant; re-acquiring from the thread that already holds the guard
//! deadlocks, same as `std::sync::Mutex`.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Mutual-exclusion primitive that owns the guarded state.
pub struct Lock<T> {
    inner: Mutex<T>,
}

/// RAII ownership of a [`Lock`]; dereferences to the guarded state.
pub struct LockGuard<'a, T>(MutexGuard<'a, T>);

impl<T> Lock<T> {
    /// Create a lock guarding `value`.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Block until exclusive ownership is obtained.
    ///
    /// A panic while a previous guard was held does not disable the lock:
    /// the poisoned state is recovered, since every container invariant is
    /// re-established before its critical section ends.
    pub fn acquire(&self) -> LockGuard<'_, T> {
        LockGuard(self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }

}

impl<'a, T> LockGuard<'a, T> {
    /// Atomically release the lock and suspend on `cv` until `cond` returns
    /// false, reacquiring before each check and before returning.
    pub fn wait_while<F>(self, cv: &Condvar, cond: F) -> LockGuard<'a, T>
    where
        F: FnMut(&mut T) -> bool,
    {
        LockGuard(
            cv.wait_while(self.0, cond)
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Like [`wait_while`](Self::wait_while) with a bounded wait. The
    /// returned flag is true when the wait gave up because `dur` elapsed
    /// while `cond` still held.
    pub fn wait_timeout_while<F>(
        self,
        cv: &Condvar,
        dur: Duration,
        cond: F,
    ) -> (LockGuard<'a, T>, bool)
    where
        F: FnMut(&mut T) -> bool,
    {
        let (guard, result) = cv
            .wait_timeout_while(self.0, dur, cond)
            .unwrap_or_else(PoisonError::into_inner);
        (LockGuard(guard), result.timed_out())
    }
}

impl<T> std::ops::Deref for LockGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> std::ops::DerefMut for LockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Lock<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lock").field("inner", &self.inner).finish()
    }
}

impl<T: Default> Default for Lock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
