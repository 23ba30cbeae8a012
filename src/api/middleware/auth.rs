//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, CLAIM_ROLE_ADMIN};
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl CurrentUser {
    /// Whether the token carried the admin role claim.
    pub fn is_admin(&self) -> bool {
        self.role == CLAIM_ROLE_ADMIN
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        id: claims.sub,
        username: claims.username,
        role: claims.role,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Admin gate for privileged routes. The token claim is a hint only; the
/// database remains the source of truth for role membership.
pub async fn require_admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    if !state.user_service.is_admin(&user.username).await? {
        tracing::warn!(username = %user.username, "admin claim without admin role");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
