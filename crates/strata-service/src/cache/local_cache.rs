//! Bounded in-process cache tier.

use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct Entry {
    value: Arc<[u8]>,
    cost: u32,
}

/// Point-in-time counters for a [`LocalCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entry_count: u64,
    /// Aggregate cost of the resident entries.
    pub weighted_size: u64,
}

/// Cost-bounded key to bytes store.
///
/// Backed by moka's TinyLFU admission with LRU eviction: once the cache is
/// full, a newly written key is only admitted if it has been seen more often
/// than the entry it would displace, so single-use keys do not push out
/// frequently read ones. There is no time-based expiry.
pub struct LocalCache {
    inner: Cache<String, Entry>,
    max_cost: u64,
    buffer_items: u64,
    writes: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LocalCache {
    /// Creates a cache holding at most `max_cost` total cost.
    ///
    /// `num_counters` is the frequency-counter sizing hint, about ten per
    /// expected entry; it presizes the table. After every `buffer_items`
    /// writes the pending admission and eviction work is applied.
    #[must_use]
    pub fn new(max_cost: u64, num_counters: u64, buffer_items: u64) -> Self {
        let expected_entries = usize::try_from(num_counters / 10).unwrap_or(usize::MAX);

        let inner = Cache::builder()
            .max_capacity(max_cost)
            .initial_capacity(expected_entries)
            .weigher(|_key: &String, entry: &Entry| entry.cost)
            .build();

        Self {
            inner,
            max_cost,
            buffer_items: buffer_items.max(1),
            writes: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the value for `key`, if resident.
    pub fn get(&self, key: &str) -> Option<Arc<[u8]>> {
        match self.inner.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Offers `value` for admission with the given cost.
    ///
    /// The write may be rejected or later evicted by the admission policy.
    pub fn set(&self, key: &str, value: impl Into<Arc<[u8]>>, cost: u64) {
        let entry = Entry {
            value: value.into(),
            cost: u32::try_from(cost).unwrap_or(u32::MAX),
        };
        self.inner.insert(key.to_owned(), entry);

        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % self.buffer_items == 0 {
            self.inner.run_pending_tasks();
        }
    }

    /// Removes `key`.
    pub fn delete(&self, key: &str) {
        self.inner.invalidate(key);
    }

    /// Applies buffered admission and eviction work now.
    pub fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks();
    }

    /// Configured cost budget.
    #[must_use]
    pub const fn max_cost(&self) -> u64 {
        self.max_cost
    }

    #[must_use]
    pub fn stats(&self) -> LocalCacheStats {
        LocalCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.inner.entry_count(),
            weighted_size: self.inner.weighted_size(),
        }
    }
}

impl std::fmt::Debug for LocalCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCache")
            .field("max_cost", &self.max_cost)
            .field("buffer_items", &self.buffer_items)
            .field("stats", &self.stats())
            .finish()
    }
}
