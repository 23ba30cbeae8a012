//! Role repository: resolves the role names attached to a user.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::entities::rol::{self, Entity as Rol};
use super::entities::usuario_rol::{self, Entity as UsuarioRol};
use crate::errors::{AppError, AppResult};

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Names of every role assigned to the user, in no particular order.
    async fn role_names_for_user(&self, user_id: Uuid) -> AppResult<Vec<String>>;
}

/// SeaORM-backed implementation of [`RoleRepository`].
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn role_names_for_user(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        let role_ids: Vec<Uuid> = UsuarioRol::find()
            .filter(usuario_rol::Column::IdUsuario.eq(user_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|assignment| assignment.id_rol)
            .collect();

        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let names = Rol::find()
            .filter(rol::Column::IdRol.is_in(role_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|role| role.nombre)
            .collect();

        Ok(names)
    }
}
