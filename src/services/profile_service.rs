//! Profile service: the profile resolver, field updates, and the admin
//! provider listing.
//!
//! Field updates are routed through a static field map instead of
//! interpolating caller input into queries. Every editable field names its
//! backing table and column; anything absent from the map is rejected.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{ProfileView, ProviderListing, RoleProfileFields};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Which table an editable profile field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    Usuario,
    PerfilProveedor,
}

/// Editable profile fields and the table each one belongs to. Account-level
/// fields (email, social links) live on `usuario`; the rest belong to the
/// provider profile. Admin profiles have no editable fields.
pub static FIELD_MAP: Lazy<HashMap<&'static str, FieldTarget>> = Lazy::new(|| {
    HashMap::from([
        ("correo", FieldTarget::Usuario),
        ("instagram", FieldTarget::Usuario),
        ("linkedin", FieldTarget::Usuario),
        ("website", FieldTarget::Usuario),
        ("github", FieldTarget::Usuario),
        ("nombres_apellidos", FieldTarget::PerfilProveedor),
        ("identificacion_nit", FieldTarget::PerfilProveedor),
        ("telefono", FieldTarget::PerfilProveedor),
        ("direccion", FieldTarget::PerfilProveedor),
        ("ciudad", FieldTarget::PerfilProveedor),
        ("portafolio_resumen", FieldTarget::PerfilProveedor),
    ])
});

/// Startup sanity check: the map must be non-empty and must never route a
/// password or identifier column.
pub fn validate_field_map() -> AppResult<()> {
    const FORBIDDEN: &[&str] = &["contrasena_hash", "id_usuario", "username", "id_proveedor"];

    if FIELD_MAP.is_empty() {
        return Err(AppError::configuration("profile field map is empty"));
    }
    for field in FORBIDDEN {
        if FIELD_MAP.contains_key(field) {
            return Err(AppError::configuration(format!(
                "profile field map must not expose '{}'",
                field
            )));
        }
    }
    Ok(())
}

/// Profile service trait for dependency injection.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Resolve the full profile view for a username.
    ///
    /// The user row must exist; the role profile may not. A user with
    /// neither profile resolves with zero-value profile fields rather
    /// than an error.
    async fn resolve(&self, username: &str) -> AppResult<ProfileView>;

    /// Update one editable field, routed through the field map.
    async fn update_field(&self, username: &str, field: &str, value: &str) -> AppResult<()>;

    /// Paginated provider listing for the admin dashboard.
    async fn list_providers(
        &self,
        params: PaginationParams,
    ) -> AppResult<Paginated<ProviderListing>>;
}

/// Concrete implementation of ProfileService using Unit of Work.
pub struct ProfileManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProfileManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProfileService for ProfileManager<U> {
    async fn resolve(&self, username: &str) -> AppResult<ProfileView> {
        let user = self
            .uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or(AppError::NotFound)?;

        // Provider first, then admin, then the zero-value fallback
        let fields = if let Some(provider) = self.uow.profiles().provider_by_user(user.id).await? {
            RoleProfileFields::from(provider)
        } else if let Some(admin) = self.uow.profiles().admin_by_user(user.id).await? {
            RoleProfileFields::from(admin)
        } else {
            tracing::warn!(username = %username, "user has no role profile");
            RoleProfileFields::default()
        };

        Ok(ProfileView::assemble(user, fields))
    }

    async fn update_field(&self, username: &str, field: &str, value: &str) -> AppResult<()> {
        let target = FIELD_MAP
            .get(field)
            .copied()
            .ok_or_else(|| AppError::validation(format!("'{}' is not an editable field", field)))?;

        match target {
            FieldTarget::Usuario => self.uow.users().update_column(username, field, value).await,
            FieldTarget::PerfilProveedor => {
                let user = self
                    .uow
                    .users()
                    .find_by_username(username)
                    .await?
                    .ok_or(AppError::NotFound)?;
                self.uow
                    .profiles()
                    .update_provider_column(user.id, field, value)
                    .await
            }
        }
    }

    async fn list_providers(
        &self,
        params: PaginationParams,
    ) -> AppResult<Paginated<ProviderListing>> {
        let (listings, total) = self.uow.profiles().list_providers(&params).await?;
        Ok(Paginated::new(listings, params.page, params.limit(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_map_routes_account_fields_to_usuario() {
        for field in ["correo", "instagram", "linkedin", "website", "github"] {
            assert_eq!(FIELD_MAP.get(field), Some(&FieldTarget::Usuario));
        }
    }

    #[test]
    fn field_map_routes_provider_fields_to_profile() {
        for field in [
            "nombres_apellidos",
            "identificacion_nit",
            "telefono",
            "direccion",
            "ciudad",
            "portafolio_resumen",
        ] {
            assert_eq!(FIELD_MAP.get(field), Some(&FieldTarget::PerfilProveedor));
        }
    }

    #[test]
    fn field_map_never_exposes_credentials() {
        assert!(!FIELD_MAP.contains_key("contrasena_hash"));
        assert!(!FIELD_MAP.contains_key("username"));
        assert!(validate_field_map().is_ok());
    }
}
