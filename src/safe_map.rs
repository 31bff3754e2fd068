//! SafeMap: a key-value container serialized behind a single [`Lock`].
//!
//! Every operation takes `&self` and holds the map's lock for its full
//! duration, so any number of threads may share one instance. Lookups copy
//! the value out; callers never share ownership with the map. Compound
//! operations (find-then-erase) run inside one critical section so no other
//! thread can interleave between the check and the mutation.

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::HashMap;
use std::collections::hash_map::RandomState;

use crate::lock::Lock;

/// Thread-safe key-value container; unordered, unique keys.
pub struct SafeMap<K, V, S = RandomState> {
    entries: Lock<HashMap<K, V, S>>,
}

impl<K, V> SafeMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for SafeMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> SafeMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            entries: Lock::new(HashMap::with_hasher(hasher)),
        }
    }

    /// Insert `value` under `key`, overwriting any existing entry. Whether
    /// the key was already present is not surfaced.
    pub fn insert(&self, key: K, value: V) {
        self.entries.acquire().insert(key, value);
    }

    /// Erase the entry for `key` and return its value, or `None` if absent.
    ///
    /// The lookup and the erase happen in one critical section; a concurrent
    /// insert or remove of the same key cannot interleave between them.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.acquire().remove(key)
    }

    /// Return a copy of the value for `key`, or `None` if absent.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.entries.acquire().get(key).cloned()
    }

    /// Existence check only.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.acquire().contains_key(key)
    }

    /// Current number of entries. A snapshot: stale as soon as it returns
    /// when mutators run concurrently.
    pub fn len(&self) -> usize {
        self.entries.acquire().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.acquire().is_empty()
    }

    /// Remove every entry in one critical section.
    pub fn clear(&self) {
        self.entries.acquire().clear();
    }
}

impl<K, V, S> std::fmt::Debug for SafeMap<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeMap").finish_non_exhaustive()
    }
}
