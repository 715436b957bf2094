//! Remote cache tier interface.

use super::CacheError;
use async_trait::async_trait;
use std::time::Duration;

/// Shared key/value store used as the second cache tier.
///
/// Implementations report an absent key as [`CacheError::Miss`] and any
/// connectivity problem as another variant. Callers treat all errors as a
/// miss.
#[async_trait]
pub trait RemoteCache: Send + Sync {
    /// Fetches the bytes stored under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, CacheError>;

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
