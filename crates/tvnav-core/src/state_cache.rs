#![forbid(unsafe_code)]

//! Capacity-bounded keyed cache for per-view UI state.
//!
//! Over a session lasting days, per-view state (one scroll offset per
//! library ever visited, for example) would grow without bound: nothing in
//! the app ever revisits old keys to clean them up. This cache bounds that
//! memory with plain insertion-order (FIFO) eviction — deliberately not
//! LRU, so reads stay cheap and side-effect-free and no timestamp
//! bookkeeping is needed. A *write* to an existing key re-inserts it at the
//! newest position; a read never changes anything.
//!
//! Values are stored as `Option<V>`: `None` is a real entry meaning
//! "explicitly cleared / known empty", distinct from an absent key.

use tracing::trace;

/// Default maximum number of cached entries.
pub const STATE_CACHE_CAPACITY: usize = 180;

/// Insertion-ordered `String → Option<V>` map with FIFO eviction.
///
/// Backed by a plain vector: insertion order *is* the eviction policy, the
/// capacity is small, and reads are scan-only. Writes are O(capacity) worst
/// case, which is noise at this size.
#[derive(Debug, Clone)]
pub struct KeyedStateCache<V> {
    entries: Vec<(String, Option<V>)>,
    capacity: usize,
}

impl<V> KeyedStateCache<V> {
    /// Cache with the default capacity of [`STATE_CACHE_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(STATE_CACHE_CAPACITY)
    }

    /// Cache bounded to `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Insert or replace an entry, moving it to the newest position.
    ///
    /// After insertion, the oldest-remaining entries are evicted until the
    /// count is back within capacity. Re-upserting an existing key never
    /// grows the cache.
    pub fn upsert(&mut self, key: impl Into<String>, value: Option<V>) {
        let key = key.into();
        if let Some(position) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(position);
        }
        self.entries.push((key, value));
        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            trace!(evicted = overflow, capacity = self.capacity, "state cache eviction");
            self.entries.drain(..overflow);
        }
    }

    /// Remove a single entry.
    ///
    /// Returns `false` (and touches nothing) when the key is absent, so
    /// callers that react to changes can detect the no-op cheaply.
    pub fn clear(&mut self, key: &str) -> bool {
        match self.entries.iter().position(|(k, _)| k == key) {
            Some(position) => {
                self.entries.remove(position);
                true
            }
            None => false,
        }
    }

    /// Remove every entry.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Look up an entry.
    ///
    /// The outer `Option` distinguishes an absent key from a present entry;
    /// the inner one carries the "explicitly cleared" `None` convention.
    pub fn get(&self, key: &str) -> Option<Option<&V>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_ref())
    }

    /// Whether an entry exists for `key` (even an explicitly-cleared one).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in insertion order, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Current entry count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum entry count before eviction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<V> Default for KeyedStateCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
