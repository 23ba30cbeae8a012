//! `usuario` table entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usuario")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_usuario: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub correo: String,
    pub contrasena_hash: String,
    pub estado_cuenta: String,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::User {
    fn from(m: Model) -> Self {
        Self {
            id: m.id_usuario,
            username: m.username,
            email: m.correo,
            password_hash: m.contrasena_hash,
            account_status: m.estado_cuenta,
            instagram: m.instagram,
            linkedin: m.linkedin,
            website: m.website,
            github: m.github,
            created_at: m.created_at,
        }
    }
}
