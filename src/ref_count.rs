//! Atomic intrusive reference counting.
//!
//! `RefCount` lives inside the object it protects (no separate control
//! block). The count starts at 0 — no handle owns the object until the
//! first increment — and is mutated only through atomic read-modify-write,
//! so handles may be cloned and dropped while no container lock is held.
//! Exactly one thread observes the decrement that reaches zero; that thread
//! is the one that frees the object.

use core::sync::atomic::{
    fence, AtomicUsize,
    Ordering::{Acquire, Relaxed, Release},
};

// Past this many live handles something has leaked increments; abort before
// the count can wrap. Matches the refcount ceiling `Arc` enforces.
const MAX_REFCOUNT: usize = isize::MAX as usize;

/// Atomic strong count embedded in the object whose lifetime it governs.
#[derive(Debug)]
pub struct RefCount {
    count: AtomicUsize,
}

impl RefCount {
    /// New count with no owners yet.
    pub const fn new() -> Self {
        Self {
            count: AtomicUsize::new(0),
        }
    }

    /// Atomically add one owner.
    ///
    /// Relaxed suffices: a new handle is only ever created through an
    /// existing live one (or at construction), so no ordering with the
    /// pointee's contents is needed here.
    pub fn increment(&self) {
        let old = self.count.fetch_add(1, Relaxed);
        if old > MAX_REFCOUNT {
            std::process::abort();
        }
    }

    /// Atomically drop one owner; returns true exactly when this call took
    /// the count to zero.
    ///
    /// The caller that receives `true` owns the object exclusively and must
    /// free it; no other thread can observe the zero transition. Release on
    /// the decrement orders all prior use of the object before the final
    /// Acquire fence, so the freeing thread sees every other thread's
    /// writes.
    pub fn decrement(&self) -> bool {
        debug_assert!(self.count.load(Relaxed) > 0, "RefCount underflow");
        if self.count.fetch_sub(1, Release) == 1 {
            fence(Acquire);
            true
        } else {
            false
        }
    }

    /// Diagnostic snapshot of the count. Inherently racy: never use it to
    /// decide whether an object is about to be freed.
    pub fn get(&self) -> usize {
        self.count.load(Relaxed)
    }
}

impl Default for RefCount {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability marking a type as a carrier of its own [`RefCount`].
///
/// Implemented by carrier types only; arbitrary code should share ownership
/// through [`Node`](crate::Node) instead of implementing this directly.
///
/// # Safety
///
/// The returned counter must be embedded in (or live exactly as long as)
/// `self`, and must govern the allocation [`SharedPtr`](crate::SharedPtr)
/// frees on the zero transition. Returning a counter shared with any other
/// object makes `SharedPtr` free the pointee while handles to the other
/// object still exist.
pub unsafe trait RefCounted {
    fn ref_count(&self) -> &RefCount;
}
