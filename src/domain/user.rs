//! User domain entity and registration types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ACCOUNT_STATUS_ACTIVE, DEFAULT_PROVIDER_TYPE};

/// User account row, role-agnostic. The role-specific extension lives in
/// a provider or admin profile keyed to `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub account_status: String,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.account_status == ACCOUNT_STATUS_ACTIVE
    }
}

/// Everything the registration orchestrator needs to create an account,
/// its role profile, and its role assignment in one transaction.
///
/// The username is pre-generated by the caller (see
/// [`crate::domain::generate_username`]); uniqueness is enforced by the
/// store, not by the generator.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    // Provider-specific fields, ignored for admins
    pub legal_name: Option<String>,
    pub full_name: Option<String>,
    pub tax_id: Option<String>,
    pub provider_phone: Option<String>,
    pub address: Option<String>,
    pub portfolio_summary: Option<String>,
    pub provider_type: String,
    pub is_admin: bool,
}

impl NewRegistration {
    /// Minimal registration with defaults for the optional fields.
    pub fn new(username: String, password: String, email: String) -> Self {
        Self {
            username,
            password,
            email,
            name: None,
            phone: None,
            city: None,
            legal_name: None,
            full_name: None,
            tax_id: None,
            provider_phone: None,
            address: None,
            portfolio_summary: None,
            provider_type: DEFAULT_PROVIDER_TYPE.to_string(),
            is_admin: false,
        }
    }

    /// Display name for the provider profile: the explicit full name wins,
    /// then the basic name field.
    pub fn provider_display_name(&self) -> Option<String> {
        self.full_name.clone().or_else(|| self.name.clone())
    }

    /// Phone for the provider profile: provider-specific field wins.
    pub fn provider_phone(&self) -> Option<String> {
        self.provider_phone.clone().or_else(|| self.phone.clone())
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Generated username
    #[schema(example = "p-maria-9f86d081")]
    pub username: String,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account status
    #[schema(example = "activo")]
    pub account_status: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            account_status: user.account_status,
            created_at: user.created_at,
        }
    }
}
