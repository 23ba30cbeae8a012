//! Admin handlers: provider listing and account deletion.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get},
    Router,
};

use crate::api::AppState;
use crate::domain::ProviderListing;
use crate::errors::AppResult;
use crate::types::{NoContent, Paginated, PaginationParams};

/// Create admin routes (behind JWT auth + admin gate)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/providers", get(list_providers))
        .route("/users/:username", delete(delete_user))
}

/// List registered providers with their account fields
#[utoipa::path(
    get,
    path = "/admin/providers",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-indexed"),
        ("per_page" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated provider listing"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_providers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ProviderListing>>> {
    let page = state.profile_service.list_providers(params).await?;
    Ok(Json(page))
}

/// Delete a user account and everything attached to it
#[utoipa::path(
    delete,
    path = "/admin/users/{username}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username of the account to delete")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No such account")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<NoContent> {
    state.user_service.delete(&username).await?;
    tracing::info!(username = %username, "account deleted by admin");
    Ok(NoContent)
}
