//! Base user service backed directly by a repository.

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::user_service::{TxFn, UserService};
use async_trait::async_trait;
use std::sync::Arc;
use strata_core::validation::rules;
use strata_core::{
    Email, Page, PageRequest, StrataError, StrataResult, User, UserId, ValidateExt,
};
use strata_repository::UserRepository;
use tracing::{debug, info, warn};

/// User service implementation.
pub struct UserServiceImpl<R: UserRepository> {
    user_repository: Arc<R>,
}

impl<R: UserRepository> UserServiceImpl<R> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    async fn load(&self, id: UserId) -> StrataResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StrataError::not_found("User", id))
    }
}

fn normalize_name(name: &str) -> StrataResult<String> {
    rules::not_blank(name).map_err(|_| StrataError::validation("name: Name must not be blank"))?;
    Ok(name.trim().to_string())
}

#[async_trait]
impl<R: UserRepository + 'static> UserService for UserServiceImpl<R> {
    async fn create_user(&self, request: CreateUserRequest) -> StrataResult<User> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;
        let name = normalize_name(&request.name)?;
        let email = Email::new(request.email)?;

        let saved_user = self.user_repository.save(&User::new(name, email)).await?;

        info!("User created: {}", saved_user.id);
        Ok(saved_user)
    }

    async fn get_user(&self, id: UserId) -> StrataResult<User> {
        debug!("Getting user: {}", id);
        self.load(id).await
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> StrataResult<User> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self.load(id).await?;

        if let Some(name) = request.name.as_deref() {
            user.rename(normalize_name(name)?);
        }
        if let Some(email) = request.email {
            user.change_email(Email::new(email)?);
        }

        let updated_user = self.user_repository.update(&user).await?;

        info!("User updated: {}", id);
        Ok(updated_user)
    }

    async fn delete_user(&self, id: UserId) -> StrataResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(StrataError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }

    async fn list_users(&self, page: PageRequest) -> StrataResult<Page<User>> {
        debug!("Listing users, page: {}, size: {}", page.page(), page.size());
        self.user_repository.find_all(page).await
    }

    async fn with_tx(&self, f: TxFn) -> StrataResult<()> {
        let uow = self.user_repository.begin_tx().await?;

        if let Err(e) = f(Arc::clone(&uow)).await {
            if let Err(rollback_err) = uow.rollback() {
                warn!("Rollback failed: {}", rollback_err);
            }
            return Err(e);
        }

        if let Err(e) = uow.commit() {
            if let Err(rollback_err) = uow.rollback() {
                warn!("Rollback after failed commit failed: {}", rollback_err);
            }
            return Err(e);
        }

        debug!("Transaction committed");
        Ok(())
    }
}
