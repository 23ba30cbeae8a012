//! `perfil_proveedor` table entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "perfil_proveedor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_proveedor: Uuid,
    pub tipo_proveedor: String,
    #[sea_orm(unique)]
    pub identificacion_nit: String,
    pub nombre_legal: Option<String>,
    pub nombres_apellidos: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub ciudad: Option<String>,
    pub portafolio_resumen: Option<String>,
    pub score: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::ProviderProfile {
    fn from(m: Model) -> Self {
        Self {
            user_id: m.id_proveedor,
            provider_type: m.tipo_proveedor,
            tax_id: m.identificacion_nit,
            legal_name: m.nombre_legal,
            full_name: m.nombres_apellidos,
            phone: m.telefono,
            address: m.direccion,
            city: m.ciudad,
            portfolio_summary: m.portafolio_resumen,
            score: m.score,
        }
    }
}
