//! Repository trait definitions.

use async_trait::async_trait;
use std::sync::Arc;
use strata_core::{Page, PageRequest, StrataError, StrataResult, User, UserId};

/// User repository trait.
///
/// Soft-deleted users are invisible to every read.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Saves a new user.
    ///
    /// Fails with `Conflict` if the id or a live user's email is taken.
    async fn save(&self, user: &User) -> StrataResult<User>;

    /// Finds a live user by ID.
    async fn find_by_id(&self, id: UserId) -> StrataResult<Option<User>>;

    /// Updates an existing live user.
    ///
    /// Fails with `NotFound` if the user is missing or deleted.
    async fn update(&self, user: &User) -> StrataResult<User>;

    /// Soft-deletes a user by ID.
    ///
    /// Returns `false` if there was no live user to delete.
    async fn delete(&self, id: UserId) -> StrataResult<bool>;

    /// Lists live users, newest first.
    async fn find_all(&self, page: PageRequest) -> StrataResult<Page<User>>;

    /// Starts a unit of work.
    async fn begin_tx(&self) -> StrataResult<Arc<dyn UnitOfWork>> {
        Err(StrataError::unsupported("transactions not supported"))
    }
}

/// A transactional scope over the repository.
///
/// Writes made through [`UnitOfWork::user_repository`] become visible to
/// the parent repository only after [`UnitOfWork::commit`].
pub trait UnitOfWork: Send + Sync {
    /// Repository view bound to this unit of work.
    fn user_repository(&self) -> &dyn UserRepository;

    /// Publishes staged writes.
    fn commit(&self) -> StrataResult<()>;

    /// Discards staged writes.
    fn rollback(&self) -> StrataResult<()>;
}
