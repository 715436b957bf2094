//! Two-tier caching infrastructure for the service layer.
//!
//! [`LayeredCache`] fronts a bounded in-process [`LocalCache`] with an
//! optional shared [`RemoteCache`]. Failures of the remote tier are absorbed
//! and read as misses, so the cache never changes what a caller sees.

pub mod cache_keys;
mod error;
mod generation;
mod layered_cache;
mod local_cache;
mod redis_cache;
mod remote_cache;

pub use error::CacheError;
pub use generation::ListGeneration;
pub use layered_cache::{LayeredCache, LayeredCacheStats};
pub use local_cache::{LocalCache, LocalCacheStats};
pub use redis_cache::RedisRemoteCache;
pub use remote_cache::RemoteCache;
