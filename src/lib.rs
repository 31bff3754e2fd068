//! guarded: lock-guarded collections and intrusive reference-counted nodes
//! for multithreaded producer/consumer code.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: provide two small, independently verifiable primitives — mutex-
//!   serialized containers and an intrusive shared-ownership pointer — so
//!   heap payloads can flow between threads through a queue without manual
//!   lifetime management.
//! - Layers:
//!   - Lock<T>: per-container mutual exclusion that owns the guarded state;
//!     `acquire()` yields an RAII guard, and the guard can suspend on a
//!     `Condvar` for blocking operations.
//!   - SafeMap<K, V, S> / SafeQueue<T>: containers whose every operation is
//!     one bounded critical section under the container's own Lock.
//!   - RefCount / RefCounted: an atomic strong count embedded in the object
//!     it protects, with a single-winner zero transition.
//!   - SharedPtr<T>: handle over any RefCounted pointee; clone increments,
//!     drop decrements, the thread that observes zero frees.
//!   - Node<T>: adapter that grants an arbitrary `T` shared ownership by
//!     boxing it behind an internal counted carrier; the carrier runs `T`'s
//!     release hook when the last handle drops.
//!
//! Constraints
//! - One Lock per container instance; no two containers share one.
//! - The reference count is the only shared mutable state outside any lock;
//!   it is mutated exclusively through atomic read-modify-write.
//! - `len()` on either container is a snapshot: stale the moment it returns
//!   when mutators run concurrently.
//! - Compound container operations are written as single critical sections,
//!   so the Lock never needs to be reentrant.
//!
//! Why this split?
//! - Localize invariants: mutual exclusion lives entirely in `lock`, count
//!   arithmetic entirely in `ref_count`; the containers and pointers above
//!   them are plain safe composition.
//! - Minimize unsafe: raw-pointer handling is confined to `shared_ptr` and
//!   the private carrier in `node`.
//!
//! Blocking policy
//! - `SafeQueue::pop` blocks until an element arrives (the natural fit for
//!   producer/consumer pipelines); `try_pop` and `pop_timeout` are the
//!   non-blocking and bounded-wait alternatives. Popping an empty queue is
//!   never undefined behavior.
//!
//! Overflow semantics
//! - Reference-count overflow aborts the process rather than continue
//!   unsafely, matching `Arc`.

mod lock;
mod node;
mod ref_count;
mod safe_map;
mod safe_map_proptest;
mod safe_queue;
mod shared_ptr;

// Public surface
pub use lock::{Lock, LockGuard};
pub use node::{Node, Release};
pub use ref_count::{RefCount, RefCounted};
pub use safe_map::SafeMap;
pub use safe_queue::{EmptyError, SafeQueue, TimedOutError};
pub use shared_ptr::SharedPtr;
