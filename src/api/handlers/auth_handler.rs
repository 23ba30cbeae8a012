//! Authentication handlers: registration and unified login.

use apalis::prelude::Storage;
use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{display_name, generate_username, NewRegistration};
use crate::errors::{AppError, AppResult};
use crate::jobs::EmailJob;
use crate::services::{LoginIdentity, TokenResponse};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "maria@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// First name; seeds the generated username
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Maria")]
    pub name: String,
    /// Register as admin instead of provider
    #[serde(default)]
    pub is_admin: bool,
    // Provider profile fields, all optional
    #[schema(example = "Maria Lopez")]
    pub full_name: Option<String>,
    /// Tax ID (NIT); a placeholder is synthesized when omitted
    #[schema(example = "900123456-7")]
    pub tax_id: Option<String>,
    pub legal_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[schema(example = "Bogota")]
    pub city: Option<String>,
    pub portfolio_summary: Option<String>,
    #[schema(example = "Persona")]
    pub provider_type: Option<String>,
}

/// User login request. Exactly one of `email` or `username` is required.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "maria@example.com")]
    pub email: Option<String>,
    #[schema(example = "p-maria-9f86d081")]
    pub username: Option<String>,
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Registration response
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub id: Uuid,
    /// Generated username; also sent in the welcome email
    #[schema(example = "p-maria-9f86d081")]
    pub username: String,
    pub email: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let username = generate_username(&payload.name, payload.is_admin);

    let registration = NewRegistration {
        username: username.clone(),
        password: payload.password,
        email: payload.email.clone(),
        name: Some(payload.name),
        phone: None,
        city: payload.city,
        legal_name: payload.legal_name,
        full_name: payload.full_name,
        tax_id: payload.tax_id,
        provider_phone: payload.phone,
        address: payload.address,
        portfolio_summary: payload.portfolio_summary,
        provider_type: payload
            .provider_type
            .unwrap_or_else(|| crate::config::DEFAULT_PROVIDER_TYPE.to_string()),
        is_admin: payload.is_admin,
    };

    let user_id = state.auth_service.register(registration).await?;

    // Best effort: a broken queue must not undo a committed registration
    if let Some(queue) = &state.email_queue {
        let job = EmailJob::welcome(&payload.email, &username, &display_name(&username));
        if let Err(e) = queue.clone().push(job).await {
            tracing::error!(error = %e, username = %username, "failed to enqueue welcome email");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user_id,
            username,
            email: payload.email,
        }),
    ))
}

/// Login with email or username and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let identity = match (payload.email, payload.username) {
        (Some(email), None) => LoginIdentity::Email(email),
        (None, Some(username)) => LoginIdentity::Username(username),
        _ => {
            return Err(AppError::validation(
                "supply exactly one of 'email' or 'username'",
            ))
        }
    };

    let token = state.auth_service.login(identity, payload.password).await?;
    Ok(Json(token))
}
