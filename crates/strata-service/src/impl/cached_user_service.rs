//! Cache-aware decorator over a [`UserService`].

use crate::cache::{cache_keys, CacheError, LayeredCache, ListGeneration};
use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::user_service::{TxFn, UserService};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strata_core::{Page, PageRequest, StrataResult, User, UserId};
use tracing::{debug, warn};

/// Cached form of one list page.
#[derive(Serialize)]
struct ListBundleRef<'a> {
    #[serde(rename = "u")]
    users: &'a [User],
    #[serde(rename = "t")]
    total: u64,
}

#[derive(Deserialize)]
struct ListBundle {
    #[serde(rename = "u")]
    users: Vec<User>,
    #[serde(rename = "t")]
    total: u64,
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CacheError> {
    Ok(serde_json::to_vec(value)?)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CacheError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read-through, write-through caching around a base [`UserService`].
///
/// Single users live under `user:get:<id>`. List pages live under keys that
/// embed the current [`ListGeneration`]; every successful create, update or
/// delete bumps it, so earlier pages are never read again. Only successful
/// results are cached, and a base-service error leaves the cache untouched.
pub struct CachedUserService {
    base: Arc<dyn UserService>,
    cache: Arc<LayeredCache>,
    generation: Arc<ListGeneration>,
}

impl CachedUserService {
    /// Creates a decorator with its own generation counter.
    pub fn new(base: Arc<dyn UserService>, cache: Arc<LayeredCache>) -> Self {
        Self::with_generation(base, cache, Arc::new(ListGeneration::new()))
    }

    /// Creates a decorator sharing an existing generation counter.
    pub fn with_generation(
        base: Arc<dyn UserService>,
        cache: Arc<LayeredCache>,
        generation: Arc<ListGeneration>,
    ) -> Self {
        Self {
            base,
            cache,
            generation,
        }
    }

    /// Wraps `base` when a cache is configured and returns it unchanged
    /// otherwise.
    pub fn wrap(base: Arc<dyn UserService>, cache: Option<Arc<LayeredCache>>) -> Arc<dyn UserService> {
        match cache {
            Some(cache) => Arc::new(Self::new(base, cache)),
            None => base,
        }
    }

    /// Current list generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.current()
    }

    /// The underlying cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<LayeredCache> {
        &self.cache
    }

    async fn cached_user(&self, id: UserId) -> Option<User> {
        let key = cache_keys::user_by_id(id);
        let bytes = self.cache.get(&key).await?;
        match decode(&bytes) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Discarding undecodable cache entry '{}': {}", key, e);
                None
            }
        }
    }

    async fn store_user(&self, user: &User) {
        match encode(user) {
            Ok(bytes) => self.cache.set(&cache_keys::user_by_id(user.id), bytes).await,
            Err(e) => warn!("Failed to encode user {} for cache: {}", user.id, e),
        }
    }

    async fn evict_user(&self, id: UserId) {
        self.cache.delete(&cache_keys::user_by_id(id)).await;
    }
}

#[async_trait]
impl UserService for CachedUserService {
    async fn create_user(&self, request: CreateUserRequest) -> StrataResult<User> {
        let user = self.base.create_user(request).await?;
        self.generation.bump();
        self.store_user(&user).await;
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> StrataResult<User> {
        if let Some(user) = self.cached_user(id).await {
            debug!("Cache hit for user {}", id);
            return Ok(user);
        }

        let user = self.base.get_user(id).await?;
        self.store_user(&user).await;
        Ok(user)
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> StrataResult<User> {
        let user = self.base.update_user(id, request).await?;
        self.evict_user(id).await;
        self.generation.bump();
        self.store_user(&user).await;
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> StrataResult<()> {
        self.base.delete_user(id).await?;
        self.evict_user(id).await;
        self.generation.bump();
        Ok(())
    }

    async fn list_users(&self, page: PageRequest) -> StrataResult<Page<User>> {
        let key = cache_keys::user_list(self.generation.current(), page);

        if let Some(bytes) = self.cache.get(&key).await {
            match decode::<ListBundle>(&bytes) {
                Ok(bundle) => {
                    debug!("Cache hit for '{}'", key);
                    return Ok(Page::new(bundle.users, page.page(), page.size(), bundle.total));
                }
                Err(e) => warn!("Discarding undecodable cache entry '{}': {}", key, e),
            }
        }

        let result = self.base.list_users(page).await?;

        let bundle = ListBundleRef {
            users: &result.content,
            total: result.total_elements(),
        };
        match encode(&bundle) {
            Ok(bytes) => self.cache.set(&key, bytes).await,
            Err(e) => warn!("Failed to encode '{}' for cache: {}", key, e),
        }

        Ok(result)
    }

    async fn with_tx(&self, f: TxFn) -> StrataResult<()> {
        self.base.with_tx(f).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LocalCache;
    use crate::r#impl::UserServiceImpl;
    use crate::user_service::tx_fn;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use strata_core::StrataError;
    use strata_repository::{InMemoryUserRepository, UnitOfWork};

    /// Base service that counts reads.
    struct CountingService {
        inner: UserServiceImpl<InMemoryUserRepository>,
        gets: AtomicUsize,
        lists: AtomicUsize,
    }

    impl CountingService {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                inner: UserServiceImpl::new(Arc::new(InMemoryUserRepository::new())),
                gets: AtomicUsize::new(0),
                lists: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl UserService for CountingService {
        async fn create_user(&self, request: CreateUserRequest) -> StrataResult<User> {
            self.inner.create_user(request).await
        }

        async fn get_user(&self, id: UserId) -> StrataResult<User> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get_user(id).await
        }

        async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> StrataResult<User> {
            self.inner.update_user(id, request).await
        }

        async fn delete_user(&self, id: UserId) -> StrataResult<()> {
            self.inner.delete_user(id).await
        }

        async fn list_users(&self, page: PageRequest) -> StrataResult<Page<User>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            self.inner.list_users(page).await
        }

        async fn with_tx(&self, f: TxFn) -> StrataResult<()> {
            self.inner.with_tx(f).await
        }
    }

    fn layered() -> Arc<LayeredCache> {
        Arc::new(LayeredCache::new(
            LocalCache::new(1_000_000, 100_000, 1),
            Duration::from_secs(300),
            Duration::from_millis(50),
        ))
    }

    fn cached(base: &Arc<CountingService>) -> CachedUserService {
        CachedUserService::new(base.clone(), layered())
    }

    #[test]
    fn test_wrap_without_cache_returns_base() {
        let base: Arc<dyn UserService> = CountingService::new();
        let wrapped = CachedUserService::wrap(Arc::clone(&base), None);
        assert!(Arc::ptr_eq(&base, &wrapped));
    }

    #[test]
    fn test_list_bundle_format() {
        let user = User::new("Jane", strata_core::Email::new("jane@x.com").unwrap());
        let users = vec![user];
        let json = serde_json::to_value(ListBundleRef {
            users: &users,
            total: 7,
        })
        .unwrap();

        assert_eq!(json["t"], 7);
        assert_eq!(json["u"][0]["name"], "Jane");

        let bundle: ListBundle = serde_json::from_value(json).unwrap();
        assert_eq!(bundle.users, users);
        assert_eq!(bundle.total, 7);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let base = CountingService::new();
        let service = cached(&base);
        let jane = service
            .create_user(CreateUserRequest::new("Jane", "jane@x.com"))
            .await
            .unwrap();

        service
            .cache()
            .set(&cache_keys::user_by_id(jane.id), b"{not json".to_vec())
            .await;

        assert_eq!(service.get_user(jane.id).await.unwrap(), jane);
        assert_eq!(base.gets.load(Ordering::SeqCst), 1);

        // Refilled with a good payload.
        assert_eq!(service.get_user(jane.id).await.unwrap(), jane);
        assert_eq!(base.gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_undecodable_list_entry_is_a_miss() {
        let base = CountingService::new();
        let service = cached(&base);
        let key = cache_keys::user_list(0, PageRequest::first());
        service.cache().set(&key, b"\xff\x00".to_vec()).await;

        assert!(service.list_users(PageRequest::first()).await.unwrap().is_empty());
        assert_eq!(base.lists.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let base = CountingService::new();
        let service = cached(&base);
        let id = UserId::new();

        for _ in 0..2 {
            let err = service.get_user(id).await.unwrap_err();
            assert!(matches!(err, StrataError::NotFound { .. }));
        }
        assert_eq!(base.gets.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_mutations_leave_generation_alone() {
        let base = CountingService::new();
        let service = cached(&base);

        assert!(service
            .create_user(CreateUserRequest::new("", "jane@x.com"))
            .await
            .is_err());
        assert!(service
            .update_user(UserId::new(), UpdateUserRequest::rename("x"))
            .await
            .is_err());
        assert!(service.delete_user(UserId::new()).await.is_err());

        assert_eq!(service.generation(), 0);
    }

    #[tokio::test]
    async fn test_failed_mutations_keep_cached_entry() {
        let base = CountingService::new();
        let service = cached(&base);
        let jane = service
            .create_user(CreateUserRequest::new("Jane", "jane@x.com"))
            .await
            .unwrap();
        service
            .create_user(CreateUserRequest::new("Bob", "bob@x.com"))
            .await
            .unwrap();

        let key = cache_keys::user_by_id(jane.id);
        let before = service.cache().get(&key).await.unwrap();
        let generation = service.generation();

        let err = service
            .update_user(jane.id, UpdateUserRequest::rename("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, StrataError::Validation(_)));

        let err = service
            .update_user(jane.id, UpdateUserRequest::change_email("bob@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StrataError::Conflict(_)));

        assert_eq!(service.cache().get(&key).await.unwrap(), before);
        assert_eq!(service.generation(), generation);

        // Removed behind the decorator's back, so the cached entry outlives it.
        base.inner.delete_user(jane.id).await.unwrap();
        let err = service.delete_user(jane.id).await.unwrap_err();
        assert!(matches!(err, StrataError::NotFound { .. }));

        assert_eq!(service.cache().get(&key).await.unwrap(), before);
        assert_eq!(service.generation(), generation);
    }

    #[test]
    fn test_codec_errors_are_cache_errors() {
        let err = decode::<User>(b"{not json").unwrap_err();
        assert!(matches!(err, CacheError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_with_tx_is_passed_through() {
        async fn create(uow: Arc<dyn UnitOfWork>) -> StrataResult<()> {
            let user = User::new("Jane", strata_core::Email::new("jane@x.com")?);
            uow.user_repository().save(&user).await?;
            Ok(())
        }

        let base = CountingService::new();
        let service = cached(&base);
        service.with_tx(tx_fn(create)).await.unwrap();

        assert_eq!(service.generation(), 0);
        let page = base.inner.list_users(PageRequest::first()).await.unwrap();
        assert_eq!(page.total_elements(), 1);
    }
}
