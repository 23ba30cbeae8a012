//! Write-side seam for the registration transaction.
//!
//! Every row the registration flow creates goes through this trait, so the
//! step sequence can run against an in-memory store in tests and against a
//! live database transaction in production.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppResult;

/// Account row staged by the registration flow.
#[derive(Debug, Clone)]
pub struct NewUserRow {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub account_status: String,
}

/// Provider-profile row staged by the registration flow.
#[derive(Debug, Clone)]
pub struct NewProviderRow {
    pub provider_type: String,
    pub tax_id: String,
    pub legal_name: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub portfolio_summary: Option<String>,
}

/// Writes performed while registering an account. Implementations stage all
/// rows inside one transaction; a failed step leaves nothing behind.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Insert the account row and return its generated id.
    async fn insert_user(&mut self, row: NewUserRow) -> AppResult<Uuid>;

    async fn insert_admin_profile(&mut self, user_id: Uuid, name: Option<String>)
        -> AppResult<()>;

    async fn insert_provider_profile(&mut self, user_id: Uuid, row: NewProviderRow)
        -> AppResult<()>;

    /// Look up a role id by its exact name.
    async fn find_role_id(&mut self, name: &str) -> AppResult<Option<Uuid>>;

    async fn assign_role(&mut self, user_id: Uuid, role_id: Uuid) -> AppResult<()>;
}
