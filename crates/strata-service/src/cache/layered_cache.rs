//! Local-then-remote cache composition.

use super::{CacheError, LocalCache, RemoteCache};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Counters for a [`LayeredCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayeredCacheStats {
    pub local_hits: u64,
    pub remote_hits: u64,
    pub misses: u64,
    /// Remote failures and timeouts that were absorbed.
    pub remote_errors: u64,
}

#[derive(Debug, Default)]
struct Counters {
    local_hits: AtomicU64,
    remote_hits: AtomicU64,
    misses: AtomicU64,
    remote_errors: AtomicU64,
}

/// Two-tier cache: a [`LocalCache`] in front of an optional [`RemoteCache`].
///
/// Reads check the local tier, then the remote tier, copying remote hits
/// into the local tier. Writes and deletes go to both tiers independently.
/// The tiers may disagree for a while; a later miss-then-fill repairs it.
///
/// Every remote call is bounded by `remote_timeout`. Remote errors,
/// timeouts and cancellations read as misses and are never returned.
pub struct LayeredCache {
    local: LocalCache,
    remote: Option<Arc<dyn RemoteCache>>,
    ttl: Duration,
    remote_timeout: Duration,
    counters: Counters,
}

impl LayeredCache {
    /// Creates a local-only cache. `ttl` applies to the remote tier once one
    /// is attached.
    #[must_use]
    pub fn new(local: LocalCache, ttl: Duration, remote_timeout: Duration) -> Self {
        Self {
            local,
            remote: None,
            ttl,
            remote_timeout,
            counters: Counters::default(),
        }
    }

    /// Attaches a remote tier.
    #[must_use]
    pub fn with_remote(mut self, remote: Arc<dyn RemoteCache>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Returns true if a remote tier is attached.
    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// The local tier.
    #[must_use]
    pub const fn local(&self) -> &LocalCache {
        &self.local
    }

    /// Looks `key` up in the local tier, then the remote tier.
    ///
    /// Never calls anything but the cache tiers; a miss is `None`.
    pub async fn get(&self, key: &str) -> Option<Arc<[u8]>> {
        if let Some(value) = self.local.get(key) {
            self.counters.local_hits.fetch_add(1, Ordering::Relaxed);
            return Some(value);
        }

        if let Some(remote) = &self.remote {
            match self.bounded(remote.get(key)).await {
                Ok(bytes) => {
                    self.counters.remote_hits.fetch_add(1, Ordering::Relaxed);
                    let cost = bytes.len() as u64;
                    let value: Arc<[u8]> = bytes.into();
                    self.local.set(key, Arc::clone(&value), cost);
                    return Some(value);
                }
                Err(e) if e.is_miss() => {}
                Err(e) => {
                    self.counters.remote_errors.fetch_add(1, Ordering::Relaxed);
                    warn!("Remote cache get failed for key '{}': {}", key, e);
                }
            }
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Stores `value` in the local tier and, if attached, the remote tier.
    ///
    /// A remote failure does not undo the local write.
    pub async fn set(&self, key: &str, value: Vec<u8>) {
        let cost = value.len() as u64;
        let value: Arc<[u8]> = value.into();
        self.local.set(key, Arc::clone(&value), cost);

        if let Some(remote) = &self.remote {
            if let Err(e) = self.bounded(remote.set(key, &value, self.ttl)).await {
                self.counters.remote_errors.fetch_add(1, Ordering::Relaxed);
                warn!("Remote cache set failed for key '{}': {}", key, e);
            }
        }
    }

    /// Removes `key` from both tiers, best-effort on the remote one.
    pub async fn delete(&self, key: &str) {
        self.local.delete(key);

        if let Some(remote) = &self.remote {
            if let Err(e) = self.bounded(remote.delete(key)).await {
                self.counters.remote_errors.fetch_add(1, Ordering::Relaxed);
                warn!("Remote cache delete failed for key '{}': {}", key, e);
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> LayeredCacheStats {
        LayeredCacheStats {
            local_hits: self.counters.local_hits.load(Ordering::Relaxed),
            remote_hits: self.counters.remote_hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            remote_errors: self.counters.remote_errors.load(Ordering::Relaxed),
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, CacheError>>,
    ) -> Result<T, CacheError> {
        tokio::time::timeout(self.remote_timeout, call)
            .await
            .map_err(|_| CacheError::Timeout(self.remote_timeout))?
    }
}

impl std::fmt::Debug for LayeredCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredCache")
            .field("local", &self.local)
            .field("has_remote", &self.has_remote())
            .field("ttl", &self.ttl)
            .field("remote_timeout", &self.remote_timeout)
            .finish_non_exhaustive()
    }
}
