//! SharedPtr: a handle over an intrusively counted pointee.
//!
//! Construction takes ownership of the pointee (count 0 → 1), clone
//! increments, drop decrements; the thread whose decrement reaches zero
//! frees the allocation, exactly once. Moving a `SharedPtr` transfers the
//! handle without touching the count.

use core::fmt;
use core::marker::PhantomData;
use core::ops::Deref;
use core::ptr::NonNull;

use crate::ref_count::RefCounted;

/// Shared-ownership pointer to a [`RefCounted`] object.
pub struct SharedPtr<T: RefCounted> {
    ptr: NonNull<T>,
    _marker: PhantomData<T>,
}

// A SharedPtr hands out &T from any thread it lands on, so the pointee must
// be both Send (the last handle may free it on another thread) and Sync.
unsafe impl<T: RefCounted + Send + Sync> Send for SharedPtr<T> {}
unsafe impl<T: RefCounted + Send + Sync> Sync for SharedPtr<T> {}

impl<T: RefCounted> SharedPtr<T> {
    /// Allocate `value` and take the first ownership of it.
    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }

    /// Take the first ownership of an already boxed pointee.
    pub fn from_box(value: Box<T>) -> Self {
        let ptr = NonNull::from(Box::leak(value));
        // Count is 0 until the first handle exists; this is that handle.
        unsafe { ptr.as_ref() }.ref_count().increment();
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Number of live handles to the pointee. Diagnostic snapshot only; by
    /// the time it returns another thread may have cloned or dropped.
    pub fn handle_count(this: &Self) -> usize {
        this.deref().ref_count().get()
    }

    /// Whether two handles point at the same object.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.ptr == other.ptr
    }
}

impl<T: RefCounted> Clone for SharedPtr<T> {
    fn clone(&self) -> Self {
        self.deref().ref_count().increment();
        Self {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }
}

impl<T: RefCounted> Drop for SharedPtr<T> {
    fn drop(&mut self) {
        // Safety: a live handle keeps the allocation alive, and decrement
        // returns true for exactly one of the handles ever created.
        if unsafe { self.ptr.as_ref() }.ref_count().decrement() {
            drop(unsafe { Box::from_raw(self.ptr.as_ptr()) });
        }
    }
}

impl<T: RefCounted> Deref for SharedPtr<T> {
    type Target = T;
    fn deref(&self) -> &T {
        // Safety: the handle's own count keeps the pointee alive.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T: RefCounted + fmt::Debug> fmt::Debug for SharedPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.deref(), f)
    }
}
