//! User repository: lookups and column updates on the `usuario` table.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, Unchanged,
};
use uuid::Uuid;

use super::entities::usuario::{self, Entity as Usuario};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Read/write access to user accounts outside of transactions.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Update a single account column by its schema name. Only columns in
    /// the profile field map are ever passed here.
    async fn update_column(&self, username: &str, column: &str, value: &str) -> AppResult<()>;

    /// Remove the account row; role and profile rows follow via FK cascade.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation of [`UserRepository`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = Usuario::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = Usuario::find()
            .filter(usuario::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = Usuario::find()
            .filter(usuario::Column::Correo.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(result.map(User::from))
    }

    async fn update_column(&self, username: &str, column: &str, value: &str) -> AppResult<()> {
        let existing = Usuario::find()
            .filter(usuario::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active = usuario::ActiveModel {
            id_usuario: Unchanged(existing.id_usuario),
            ..Default::default()
        };
        match column {
            "correo" => active.correo = Set(value.to_string()),
            "instagram" => active.instagram = Set(some_or_null(value)),
            "linkedin" => active.linkedin = Set(some_or_null(value)),
            "website" => active.website = Set(some_or_null(value)),
            "github" => active.github = Set(some_or_null(value)),
            other => {
                return Err(AppError::validation(format!(
                    "'{}' is not an account column",
                    other
                )))
            }
        }

        Usuario::update(active)
            .exec(&self.db)
            .await
            .map_err(|e| AppError::from_db("User", e))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = Usuario::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Empty strings clear optional link columns instead of storing "".
fn some_or_null(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
