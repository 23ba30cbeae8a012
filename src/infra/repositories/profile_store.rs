//! Role-profile repository: provider and admin profile lookups, provider
//! field updates, and the joined provider listing.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    Unchanged,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::entities::perfil_admin::Entity as PerfilAdmin;
use super::entities::perfil_proveedor::{self, Entity as PerfilProveedor};
use super::entities::usuario::{self, Entity as Usuario};
use crate::domain::{AdminProfile, ProviderListing, ProviderProfile};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Read/write access to role profiles outside of transactions.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn provider_by_user(&self, user_id: Uuid) -> AppResult<Option<ProviderProfile>>;

    async fn admin_by_user(&self, user_id: Uuid) -> AppResult<Option<AdminProfile>>;

    /// Update a single provider column by its schema name.
    async fn update_provider_column(
        &self,
        user_id: Uuid,
        column: &str,
        value: &str,
    ) -> AppResult<()>;

    /// Page of providers joined with their account fields, plus the total
    /// provider count.
    async fn list_providers(
        &self,
        params: &PaginationParams,
    ) -> AppResult<(Vec<ProviderListing>, u64)>;
}

/// SeaORM-backed implementation of [`ProfileRepository`].
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn provider_by_user(&self, user_id: Uuid) -> AppResult<Option<ProviderProfile>> {
        let result = PerfilProveedor::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(result.map(ProviderProfile::from))
    }

    async fn admin_by_user(&self, user_id: Uuid) -> AppResult<Option<AdminProfile>> {
        let result = PerfilAdmin::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(result.map(AdminProfile::from))
    }

    async fn update_provider_column(
        &self,
        user_id: Uuid,
        column: &str,
        value: &str,
    ) -> AppResult<()> {
        let existing = PerfilProveedor::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active = perfil_proveedor::ActiveModel {
            id_proveedor: Unchanged(existing.id_proveedor),
            ..Default::default()
        };
        match column {
            "nombres_apellidos" => active.nombres_apellidos = Set(some_or_null(value)),
            "identificacion_nit" => active.identificacion_nit = Set(value.to_string()),
            "telefono" => active.telefono = Set(some_or_null(value)),
            "direccion" => active.direccion = Set(some_or_null(value)),
            "ciudad" => active.ciudad = Set(some_or_null(value)),
            "portafolio_resumen" => active.portafolio_resumen = Set(some_or_null(value)),
            other => {
                return Err(AppError::validation(format!(
                    "'{}' is not a provider column",
                    other
                )))
            }
        }

        PerfilProveedor::update(active)
            .exec(&self.db)
            .await
            .map_err(|e| AppError::from_db("Provider tax ID", e))?;
        Ok(())
    }

    async fn list_providers(
        &self,
        params: &PaginationParams,
    ) -> AppResult<(Vec<ProviderListing>, u64)> {
        let paginator = PerfilProveedor::find()
            .order_by_asc(perfil_proveedor::Column::IdProveedor)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let providers = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        // Second query instead of a per-row lookup for the account fields
        let ids: Vec<Uuid> = providers.iter().map(|p| p.id_proveedor).collect();
        let users: HashMap<Uuid, usuario::Model> = Usuario::find()
            .filter(usuario::Column::IdUsuario.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id_usuario, u))
            .collect();

        let listings = providers
            .into_iter()
            .filter_map(|p| {
                users.get(&p.id_proveedor).map(|u| ProviderListing {
                    username: u.username.clone(),
                    email: u.correo.clone(),
                    account_status: u.estado_cuenta.clone(),
                    full_name: p.nombres_apellidos.clone().unwrap_or_default(),
                    tax_id: p.identificacion_nit.clone(),
                    city: p.ciudad.clone().unwrap_or_default(),
                    provider_type: p.tipo_proveedor.clone(),
                    score: p.score,
                })
            })
            .collect();

        Ok((listings, total))
    }
}

fn some_or_null(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
