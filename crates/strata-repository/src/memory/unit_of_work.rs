use super::table::{UserTable, VersionedTable};
use crate::traits::{UnitOfWork, UserRepository};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use strata_core::{Page, PageRequest, StrataError, StrataResult, User, UserId};
use tracing::{debug, warn};

/// Unit of work over an [`InMemoryUserRepository`](super::InMemoryUserRepository).
///
/// Writes go to a private snapshot of the table. Commit publishes the
/// snapshot only if nothing else was committed since `begin`; otherwise it
/// fails with `Conflict`. Once committed or rolled back the unit of work
/// rejects further use.
#[derive(Debug)]
pub struct InMemoryUnitOfWork {
    parent: Arc<RwLock<VersionedTable>>,
    base_version: u64,
    staged: StagedUserRepository,
}

#[derive(Debug)]
struct StagedUserRepository {
    // `None` once the unit of work has finished.
    table: Mutex<Option<UserTable>>,
}

impl InMemoryUnitOfWork {
    pub(crate) fn begin(parent: Arc<RwLock<VersionedTable>>) -> Self {
        let (base_version, snapshot) = {
            let guard = parent.read();
            (guard.version, guard.table.clone())
        };
        debug!("Began unit of work at version {}", base_version);
        Self {
            parent,
            base_version,
            staged: StagedUserRepository {
                table: Mutex::new(Some(snapshot)),
            },
        }
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn user_repository(&self) -> &dyn UserRepository {
        &self.staged
    }

    fn commit(&self) -> StrataResult<()> {
        let staged = self.staged.table.lock().take().ok_or_else(finished)?;

        let mut parent = self.parent.write();
        if parent.version != self.base_version {
            warn!(
                "Unit of work conflict: began at version {}, current {}",
                self.base_version, parent.version
            );
            return Err(StrataError::conflict("concurrent modification, transaction aborted"));
        }
        parent.table = staged;
        parent.version += 1;
        debug!("Committed unit of work at version {}", parent.version);
        Ok(())
    }

    fn rollback(&self) -> StrataResult<()> {
        if self.staged.table.lock().take().is_some() {
            debug!("Rolled back unit of work");
        }
        Ok(())
    }
}

fn finished() -> StrataError {
    StrataError::conflict("unit of work already finished")
}

impl StagedUserRepository {
    fn with_table<T>(&self, f: impl FnOnce(&mut UserTable) -> StrataResult<T>) -> StrataResult<T> {
        let mut guard = self.table.lock();
        let table = guard.as_mut().ok_or_else(finished)?;
        f(table)
    }
}

#[async_trait]
impl UserRepository for StagedUserRepository {
    async fn save(&self, user: &User) -> StrataResult<User> {
        self.with_table(|table| table.insert(user))
    }

    async fn find_by_id(&self, id: UserId) -> StrataResult<Option<User>> {
        self.with_table(|table| Ok(table.get(id)))
    }

    async fn update(&self, user: &User) -> StrataResult<User> {
        self.with_table(|table| table.update(user))
    }

    async fn delete(&self, id: UserId) -> StrataResult<bool> {
        self.with_table(|table| Ok(table.soft_delete(id)))
    }

    async fn find_all(&self, page: PageRequest) -> StrataResult<Page<User>> {
        self.with_table(|table| Ok(table.page(page)))
    }
}
