//! User service - account lookups, role checks, and deletion.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{grants_admin, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_by_username(&self, username: &str) -> AppResult<User>;

    async fn get_by_email(&self, email: &str) -> AppResult<User>;

    /// Role names assigned to the user. An unknown username yields an
    /// empty list, not an error.
    async fn roles(&self, username: &str) -> AppResult<Vec<String>>;

    /// Whether the user holds any role that grants admin access.
    async fn is_admin(&self, username: &str) -> AppResult<bool>;

    /// Delete the account; profile and role rows follow via FK cascade.
    async fn delete(&self, username: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn roles(&self, username: &str) -> AppResult<Vec<String>> {
        let user = match self.uow.users().find_by_username(username).await? {
            Some(user) => user,
            None => return Ok(Vec::new()),
        };
        self.uow.roles().role_names_for_user(user.id).await
    }

    async fn is_admin(&self, username: &str) -> AppResult<bool> {
        let roles = self.roles(username).await?;
        Ok(grants_admin(&roles))
    }

    async fn delete(&self, username: &str) -> AppResult<()> {
        let user = self
            .uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or(AppError::NotFound)?;
        self.uow.users().delete(user.id).await
    }
}
