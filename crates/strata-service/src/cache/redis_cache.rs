//! Redis-backed remote cache tier.

use super::{CacheError, RemoteCache};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, PoolConfig, Runtime};
use std::sync::Arc;
use std::time::Duration;
use strata_config::RedisConfig;
use strata_core::{StrataError, StrataResult};
use tracing::debug;

/// Redis cache tier over a `deadpool-redis` connection pool.
#[derive(Clone)]
pub struct RedisRemoteCache {
    pool: Arc<Pool>,
}

impl RedisRemoteCache {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Builds a pool from configuration.
    ///
    /// No connection is opened until the first call.
    pub fn from_config(config: &RedisConfig) -> StrataResult<Self> {
        let mut redis_cfg = Config::from_url(&config.url);
        redis_cfg.pool = Some(PoolConfig::new(config.pool_size));

        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| StrataError::Cache(format!("Failed to create Redis pool: {}", e)))?;

        Ok(Self::new(Arc::new(pool)))
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Unavailable(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl RemoteCache for RedisRemoteCache {
    async fn get(&self, key: &str) -> Result<Vec<u8>, CacheError> {
        let mut conn = self.get_conn().await?;
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(|e| {
            CacheError::Unavailable(format!("Failed to get key '{}': {}", key, e))
        })?;

        match value {
            Some(bytes) => {
                debug!("Redis hit for key '{}'", key);
                Ok(bytes)
            }
            None => {
                debug!("Redis miss for key '{}'", key);
                Err(CacheError::Miss)
            }
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            CacheError::Unavailable(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Cached key '{}' in Redis with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            CacheError::Unavailable(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}' from Redis: {}", key, deleted > 0);
        Ok(())
    }
}

impl std::fmt::Debug for RedisRemoteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRemoteCache")
            .field("status", &self.pool.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_is_lazy() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            pool_size: 2,
            enabled: true,
        };
        let cache = RedisRemoteCache::from_config(&config).unwrap();
        assert_eq!(cache.pool.status().max_size, 2);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            pool_size: 1,
            enabled: true,
        };
        let cache = RedisRemoteCache::from_config(&config).unwrap();
        let err = cache.get("k").await.unwrap_err();
        assert!(matches!(err, CacheError::Unavailable(_)));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = RedisConfig {
            url: "not a url".to_string(),
            pool_size: 1,
            enabled: true,
        };
        assert!(RedisRemoteCache::from_config(&config).is_err());
    }
}
