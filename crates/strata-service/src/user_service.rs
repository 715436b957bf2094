//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use strata_core::{BoxFuture, Page, PageRequest, StrataResult, User, UserId};
use strata_repository::UnitOfWork;

/// Work run inside [`UserService::with_tx`].
///
/// Returning `Ok` commits, returning `Err` rolls back.
pub type TxFn = Box<dyn FnOnce(Arc<dyn UnitOfWork>) -> BoxFuture<'static, ()> + Send>;

/// Boxes an async closure or `async fn` into a [`TxFn`].
pub fn tx_fn<F, Fut>(f: F) -> TxFn
where
    F: FnOnce(Arc<dyn UnitOfWork>) -> Fut + Send + 'static,
    Fut: Future<Output = StrataResult<()>> + Send + 'static,
{
    Box::new(move |uow| Box::pin(f(uow)))
}

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> StrataResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> StrataResult<User>;

    /// Applies a partial update to a user.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> StrataResult<User>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> StrataResult<()>;

    /// Lists users with pagination.
    async fn list_users(&self, page: PageRequest) -> StrataResult<Page<User>>;

    /// Runs `f` inside a unit of work.
    async fn with_tx(&self, f: TxFn) -> StrataResult<()>;
}
