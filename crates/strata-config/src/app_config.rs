//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use strata_core::telemetry::TelemetryConfig;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Redis configuration.
    #[serde(default)]
    pub redis: RedisConfig,

    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "strata".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Two-tier cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the caching decorator around the user service.
    pub enabled: bool,
    /// Maximum aggregate cost (bytes) held by the local tier.
    pub max_cost: u64,
    /// Frequency-counter sizing hint, roughly ten times the expected entry count.
    pub num_counters: u64,
    /// Number of writes after which pending admission work is applied.
    pub buffer_items: u64,
    /// Remote tier TTL in seconds.
    pub ttl_secs: u64,
    /// Upper bound for a single remote tier call in milliseconds.
    pub remote_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_cost: 10_000,
            num_counters: 100_000,
            buffer_items: 64,
            ttl_secs: 300, // 5 minutes
            remote_timeout_ms: 250,
        }
    }
}

impl CacheConfig {
    /// Returns the remote TTL as a Duration.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Returns the remote call timeout as a Duration.
    #[must_use]
    pub const fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }
}

/// Redis configuration for the remote cache tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis URL.
    pub url: String,
    /// Connection pool size.
    pub pool_size: usize,
    /// Enable the remote tier; when false the cache is local-only.
    pub enabled: bool,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            pool_size: 10,
            enabled: false,
        }
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Use the in-process repository.
    pub in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { in_memory: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_defaults() {
        let cache = CacheConfig::default();
        assert!(cache.enabled);
        assert_eq!(cache.max_cost, 10_000);
        assert_eq!(cache.num_counters, 100_000);
        assert_eq!(cache.buffer_items, 64);
        assert_eq!(cache.ttl(), Duration::from_secs(300));
        assert_eq!(cache.remote_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_redis_disabled_by_default() {
        assert!(!RedisConfig::default().enabled);
    }

    #[test]
    fn test_partial_cache_section_keeps_defaults() {
        let cache: CacheConfig = serde_json::from_str(r#"{"max_cost": 42}"#).unwrap();
        assert_eq!(cache.max_cost, 42);
        assert_eq!(cache.buffer_items, 64);
    }
}
