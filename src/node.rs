//! Node: shared ownership for payload types that know nothing about
//! reference counting.
//!
//! A `Node<T>` boxes `T` behind a private carrier that embeds the
//! [`RefCount`]; the carrier, not `T`, implements [`RefCounted`]. Cloning a
//! node (including the copies a container makes) increments the shared
//! count; dropping decrements; when the last handle drops, the carrier is
//! freed and invokes `T`'s [`Release`] hook. The default hook frees the
//! payload; a pool type overrides it to reclaim the allocation instead.

use core::fmt;
use core::ops::Deref;
use core::ptr::NonNull;

use crate::ref_count::{RefCount, RefCounted};
use crate::shared_ptr::SharedPtr;

/// Release hook invoked when the last handle to a payload drops.
///
/// The default disposes of the payload by dropping the box. Override to
/// return the allocation to a pool instead.
pub trait Release {
    fn release(self: Box<Self>) {}
}

// Carrier owning the raw payload pointer plus the count that governs it.
// The payload pointer is exclusive: only the carrier's drop touches it.
struct Carrier<T: Release> {
    count: RefCount,
    data: NonNull<T>,
}

unsafe impl<T: Release> RefCounted for Carrier<T> {
    fn ref_count(&self) -> &RefCount {
        &self.count
    }
}

// The carrier is just a counted owner of T; it moves/shares exactly as a
// `Box<T>` plus an atomic would.
unsafe impl<T: Release + Send> Send for Carrier<T> {}
unsafe impl<T: Release + Sync> Sync for Carrier<T> {}

impl<T: Release> Drop for Carrier<T> {
    fn drop(&mut self) {
        // Safety: the carrier exclusively owns `data`; SharedPtr drops the
        // carrier exactly once, on the zero transition.
        unsafe { Box::from_raw(self.data.as_ptr()) }.release();
    }
}

/// Shared handle to a heap-allocated `T`, freed (or reclaimed) via `T`'s
/// [`Release`] hook when the last handle drops.
pub struct Node<T: Release> {
    carrier: SharedPtr<Carrier<T>>,
}

impl<T: Release> Node<T> {
    /// Allocate `payload` and bind the first handle to it.
    pub fn new(payload: T) -> Self {
        Self::from_box(Box::new(payload))
    }

    /// Bind the first handle to an already boxed payload.
    pub fn from_box(payload: Box<T>) -> Self {
        let data = NonNull::from(Box::leak(payload));
        Self {
            carrier: SharedPtr::new(Carrier {
                count: RefCount::new(),
                data,
            }),
        }
    }

    /// Access the payload without transferring ownership.
    pub fn data(&self) -> &T {
        // Safety: the carrier (kept alive by this handle) owns the payload
        // and only frees it after the last handle drops.
        unsafe { self.carrier.data.as_ref() }
    }

    /// Number of live handles sharing this payload. Diagnostic snapshot
    /// only; meaningful at quiescent points (no concurrent clone/drop).
    pub fn handle_count(&self) -> usize {
        SharedPtr::handle_count(&self.carrier)
    }

    /// Whether two handles share the same payload.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        SharedPtr::ptr_eq(&this.carrier, &other.carrier)
    }
}

impl<T: Release> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            carrier: self.carrier.clone(),
        }
    }
}

impl<T: Release> Deref for Node<T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.data()
    }
}

impl<T: Release + fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.data(), f)
    }
}
