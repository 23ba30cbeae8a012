//! `perfil_admin` table entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "perfil_admin")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_admin: Uuid,
    pub nombre: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::AdminProfile {
    fn from(m: Model) -> Self {
        Self {
            user_id: m.id_admin,
            name: m.nombre,
        }
    }
}
