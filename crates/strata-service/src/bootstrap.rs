//! Builds the service stack from configuration.

use crate::cache::{LayeredCache, LocalCache, RedisRemoteCache};
use crate::r#impl::{CachedUserService, UserServiceImpl};
use crate::user_service::UserService;
use std::sync::Arc;
use strata_config::{AppConfig, CacheConfig, RedisConfig};
use strata_core::StrataResult;
use strata_repository::UserRepository;
use tracing::info;

/// Builds the layered cache, or `None` when caching is disabled.
///
/// The remote tier is attached only when Redis is enabled.
pub fn build_layered_cache(
    cache: &CacheConfig,
    redis: &RedisConfig,
) -> StrataResult<Option<Arc<LayeredCache>>> {
    if !cache.enabled {
        info!("User cache disabled");
        return Ok(None);
    }

    let local = LocalCache::new(cache.max_cost, cache.num_counters, cache.buffer_items);
    let mut layered = LayeredCache::new(local, cache.ttl(), cache.remote_timeout());

    if redis.enabled {
        let remote = RedisRemoteCache::from_config(redis)?;
        layered = layered.with_remote(Arc::new(remote));
        info!(
            "User cache: local max_cost={} + redis ttl={}s",
            cache.max_cost, cache.ttl_secs
        );
    } else {
        info!("User cache: local only, max_cost={}", cache.max_cost);
    }

    Ok(Some(Arc::new(layered)))
}

/// Builds the user service over `repository`, cached when configured.
pub fn build_user_service<R: UserRepository + 'static>(
    config: &AppConfig,
    repository: Arc<R>,
) -> StrataResult<Arc<dyn UserService>> {
    let base: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(repository));
    let cache = build_layered_cache(&config.cache, &config.redis)?;
    Ok(CachedUserService::wrap(base, cache))
}
