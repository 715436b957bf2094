use super::table::VersionedTable;
use super::unit_of_work::InMemoryUnitOfWork;
use crate::traits::{UnitOfWork, UserRepository};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use strata_core::{Page, PageRequest, StrataResult, User, UserId};
use tracing::debug;

/// Thread-safe in-memory user repository.
///
/// Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<VersionedTable>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> StrataResult<User> {
        debug!("Saving user: {}", user.id);
        let mut inner = self.inner.write();
        inner.table.insert(user)?;
        inner.version += 1;
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: UserId) -> StrataResult<Option<User>> {
        Ok(self.inner.read().table.get(id))
    }

    async fn update(&self, user: &User) -> StrataResult<User> {
        debug!("Updating user: {}", user.id);
        let mut inner = self.inner.write();
        let updated = inner.table.update(user)?;
        inner.version += 1;
        Ok(updated)
    }

    async fn delete(&self, id: UserId) -> StrataResult<bool> {
        debug!("Deleting user: {}", id);
        let mut inner = self.inner.write();
        let deleted = inner.table.soft_delete(id);
        if deleted {
            inner.version += 1;
        }
        Ok(deleted)
    }

    async fn find_all(&self, page: PageRequest) -> StrataResult<Page<User>> {
        Ok(self.inner.read().table.page(page))
    }

    async fn begin_tx(&self) -> StrataResult<Arc<dyn UnitOfWork>> {
        Ok(Arc::new(InMemoryUnitOfWork::begin(Arc::clone(&self.inner))))
    }
}
