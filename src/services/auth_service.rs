//! Authentication service: registration, unified login, and JWT issuance.
//!
//! Registration is the one multi-table workflow in the system. The step
//! sequence lives in [`execute_registration`], generic over the
//! [`RegistrationStore`] seam, and runs inside a single database
//! transaction in production. A failure at any step leaves no rows behind.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{
    Config, ACCOUNT_STATUS_ACTIVE, CLAIM_ROLE_ADMIN, CLAIM_ROLE_PROVIDER, ROLE_ADMIN,
    ROLE_PROVEEDOR, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER,
};
use crate::domain::{grants_admin, synthesize_tax_id, NewRegistration, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{NewProviderRow, NewUserRow, RegistrationStore, UnitOfWork};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    /// Username of the authenticated account
    #[schema(example = "p-maria-9f86d081")]
    pub username: String,
}

/// Which credential the caller supplied for login. The two lookups are
/// never mixed: an email is only matched against emails, a username only
/// against usernames.
#[derive(Debug, Clone)]
pub enum LoginIdentity {
    Email(String),
    Username(String),
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account with its role profile and role assignment.
    /// Returns the generated user id.
    async fn register(&self, registration: NewRegistration) -> AppResult<Uuid>;

    /// Login with either credential and return a JWT token.
    async fn login(&self, identity: LoginIdentity, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Run the registration step sequence against a store.
///
/// Steps, in order: insert the account row, insert exactly one role
/// profile (admin or provider), resolve the role id by name, assign the
/// role. A provider with no tax ID gets a synthesized placeholder derived
/// from the new account id. A missing role row is a deployment problem
/// and maps to [`AppError::Configuration`], never a silent skip.
pub async fn execute_registration<S: RegistrationStore>(
    store: &mut S,
    registration: &NewRegistration,
    password_hash: String,
) -> AppResult<Uuid> {
    let user_id = store
        .insert_user(NewUserRow {
            username: registration.username.clone(),
            email: registration.email.clone(),
            password_hash,
            account_status: ACCOUNT_STATUS_ACTIVE.to_string(),
        })
        .await?;

    let role_name = if registration.is_admin {
        store
            .insert_admin_profile(user_id, registration.name.clone())
            .await?;
        ROLE_ADMIN
    } else {
        let tax_id = match &registration.tax_id {
            Some(nit) if !nit.trim().is_empty() => nit.trim().to_string(),
            _ => synthesize_tax_id(user_id),
        };
        store
            .insert_provider_profile(
                user_id,
                NewProviderRow {
                    provider_type: registration.provider_type.clone(),
                    tax_id,
                    legal_name: registration.legal_name.clone(),
                    full_name: registration.provider_display_name(),
                    phone: registration.provider_phone(),
                    address: registration.address.clone(),
                    city: registration.city.clone(),
                    portfolio_summary: registration.portfolio_summary.clone(),
                },
            )
            .await?;
        ROLE_PROVEEDOR
    };

    let role_id = store.find_role_id(role_name).await?.ok_or_else(|| {
        AppError::configuration(format!("role '{}' is not seeded in the database", role_name))
    })?;
    store.assign_role(user_id, role_id).await?;

    Ok(user_id)
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, role: &str, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
        username: user.username.clone(),
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: NewRegistration) -> AppResult<Uuid> {
        if self
            .uow
            .users()
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User"));
        }

        // Hash outside the transaction; argon2 is deliberately slow
        let password_hash = Password::new(&registration.password)?.into_string();

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut store = ctx.registration();
                    execute_registration(&mut store, &registration, password_hash).await
                })
            })
            .await
    }

    async fn login(&self, identity: LoginIdentity, password: String) -> AppResult<TokenResponse> {
        let user_result = match &identity {
            LoginIdentity::Email(email) => self.uow.users().find_by_email(email).await?,
            LoginIdentity::Username(username) => {
                self.uow.users().find_by_username(username).await?
            }
        };

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid accounts.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        let user = user_result.as_ref().unwrap();

        let roles = self.uow.roles().role_names_for_user(user.id).await?;
        let role = if grants_admin(&roles) {
            CLAIM_ROLE_ADMIN
        } else {
            CLAIM_ROLE_PROVIDER
        };

        generate_token(user, role, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
