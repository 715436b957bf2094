//! Cache-internal errors.

use std::time::Duration;
use thiserror::Error;

/// Errors raised inside the cache subsystem.
///
/// None of these reach service callers; [`LayeredCache`](super::LayeredCache)
/// turns every one of them into a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The key is not present in the tier.
    #[error("cache miss")]
    Miss,

    /// The tier could not be reached.
    #[error("remote cache unavailable: {0}")]
    Unavailable(String),

    /// The tier did not answer in time.
    #[error("remote cache call timed out after {0:?}")]
    Timeout(Duration),

    /// A cached payload could not be encoded or decoded.
    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    /// Returns true for the not-found kind.
    #[must_use]
    pub const fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }
}
