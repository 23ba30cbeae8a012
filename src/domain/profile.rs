//! Role profiles and the resolved profile view.
//!
//! Every registered user carries exactly one role profile: the provider
//! profile (vendors, with tax ID and portfolio) or the admin profile
//! (minimal). The resolver combines the user row with whichever exists
//! into a [`ProfileView`], falling back to zero values when neither does
//! (a degraded, not erroneous, state).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ADMIN_ROLE_ALIASES, TEMP_NIT_PREFIX};
use crate::domain::User;

/// Vendor-role extension, one-to-one with a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub user_id: Uuid,
    pub provider_type: String,
    pub tax_id: String,
    pub legal_name: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub portfolio_summary: Option<String>,
    pub score: i64,
}

/// Admin-role extension, one-to-one with a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    pub user_id: Uuid,
    pub name: Option<String>,
}

/// Role-profile fields shared by the resolver regardless of which
/// profile table they came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct RoleProfileFields {
    pub full_name: String,
    pub tax_id: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub portfolio_summary: String,
    pub score: i64,
}

impl From<ProviderProfile> for RoleProfileFields {
    fn from(p: ProviderProfile) -> Self {
        Self {
            full_name: p.full_name.unwrap_or_default(),
            tax_id: p.tax_id,
            phone: p.phone.unwrap_or_default(),
            address: p.address.unwrap_or_default(),
            city: p.city.unwrap_or_default(),
            portfolio_summary: p.portfolio_summary.unwrap_or_default(),
            score: p.score,
        }
    }
}

impl From<AdminProfile> for RoleProfileFields {
    fn from(a: AdminProfile) -> Self {
        Self {
            full_name: a.name.unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// Normalized profile record returned to callers. Named fields replace the
/// positional tuples the early revisions passed around.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfileView {
    #[schema(example = "p-maria-9f86d081")]
    pub username: String,
    #[schema(example = "Maria")]
    pub display_name: String,
    pub email: String,
    pub account_status: String,
    pub instagram: String,
    pub linkedin: String,
    pub website: String,
    pub github: String,
    #[serde(flatten)]
    pub profile: RoleProfileFields,
}

impl ProfileView {
    /// Combine a user row with its (possibly absent) role-profile fields.
    pub fn assemble(user: User, profile: RoleProfileFields) -> Self {
        Self {
            display_name: display_name(&user.username),
            username: user.username,
            email: user.email,
            account_status: user.account_status,
            instagram: user.instagram.unwrap_or_default(),
            linkedin: user.linkedin.unwrap_or_default(),
            website: user.website.unwrap_or_default(),
            github: user.github.unwrap_or_default(),
            profile,
        }
    }
}

/// Provider row joined with its account fields, for the admin dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderListing {
    pub username: String,
    pub email: String,
    pub account_status: String,
    pub full_name: String,
    pub tax_id: String,
    pub city: String,
    pub provider_type: String,
    pub score: i64,
}

/// Derive a display name from a generated username.
///
/// Generated usernames look like `p-maria-9f86d081`; the middle segment is
/// the holder's first name and gets capitalized (first char upper, rest
/// lower). Usernames without a dash are returned as-is.
pub fn display_name(username: &str) -> String {
    match username.split('-').nth(1) {
        Some(segment) if !segment.is_empty() => {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => username.to_string(),
            }
        }
        _ => username.to_string(),
    }
}

/// Synthesize a placeholder tax ID from the user id: `TEMP-` plus the last
/// six characters of the dash-stripped identifier.
pub fn synthesize_tax_id(user_id: Uuid) -> String {
    let simple = user_id.simple().to_string();
    let suffix = &simple[simple.len() - 6..];
    format!("{}{}", TEMP_NIT_PREFIX, suffix)
}

/// Whether a set of role names grants admin access. Names are trimmed and
/// lowercased before comparison; a user with no roles is never an admin.
pub fn grants_admin<S: AsRef<str>>(roles: &[S]) -> bool {
    roles
        .iter()
        .map(|r| r.as_ref().trim().to_lowercase())
        .any(|r| ADMIN_ROLE_ALIASES.contains(&r.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_from_generated_username() {
        assert_eq!(display_name("p-maria-9f86d081"), "Maria");
        assert_eq!(display_name("a-juan-abc123"), "Juan");
    }

    #[test]
    fn display_name_normalizes_mixed_case() {
        assert_eq!(display_name("p-MArIa-9f86d081"), "Maria");
        assert_eq!(display_name("a-JUAN-abc123"), "Juan");
    }

    #[test]
    fn display_name_falls_back_to_raw_username() {
        assert_eq!(display_name("plainuser"), "plainuser");
    }

    #[test]
    fn synthesized_tax_id_has_six_char_suffix() {
        let id = Uuid::new_v4();
        let nit = synthesize_tax_id(id);
        assert!(nit.starts_with(TEMP_NIT_PREFIX));
        assert_eq!(nit.len(), TEMP_NIT_PREFIX.len() + 6);
        assert!(!nit.contains('-') || nit.matches('-').count() == 1);
    }

    #[test]
    fn admin_aliases_are_normalized() {
        assert!(grants_admin(&["Admin"]));
        assert!(grants_admin(&["  ADMINISTRADOR  "]));
        assert!(grants_admin(&["administrator"]));
        assert!(!grants_admin(&["Proveedor"]));
        assert!(!grants_admin::<&str>(&[]));
    }

    #[test]
    fn provider_fields_default_missing_values() {
        let p = ProviderProfile {
            user_id: Uuid::new_v4(),
            provider_type: "Persona".into(),
            tax_id: "900123456".into(),
            legal_name: None,
            full_name: Some("Maria Lopez".into()),
            phone: None,
            address: None,
            city: Some("Bogota".into()),
            portfolio_summary: None,
            score: 7,
        };
        let fields = RoleProfileFields::from(p);
        assert_eq!(fields.full_name, "Maria Lopez");
        assert_eq!(fields.phone, "");
        assert_eq!(fields.city, "Bogota");
        assert_eq!(fields.score, 7);
    }
}
