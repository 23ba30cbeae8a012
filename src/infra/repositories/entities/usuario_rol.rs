//! `usuario_rol` join-table entity (composite primary key).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usuario_rol")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_usuario: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_rol: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
