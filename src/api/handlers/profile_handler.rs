//! Profile handlers: the resolved profile view, field updates, and the
//! profile picture.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::ProfileView;
use crate::errors::AppResult;
use crate::services::StoredPicture;
use crate::types::MessageResponse;

/// Single-field profile update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFieldRequest {
    /// Schema name of the field to update
    #[validate(length(min = 1, message = "Field name is required"))]
    #[schema(example = "ciudad")]
    pub field: String,
    /// New value; empty clears optional fields
    #[schema(example = "Medellin")]
    pub value: String,
}

/// Profile picture upload (base64-encoded image)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UploadPictureRequest {
    #[validate(length(min = 1, message = "Image payload is required"))]
    pub image_base64: String,
}

/// Profile picture response. `image_base64` is set for uploaded pictures,
/// `placeholder` for accounts that never uploaded one.
#[derive(Debug, Serialize, ToSchema)]
pub struct PictureResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "static/img/profile.png")]
    pub placeholder: Option<String>,
}

/// Create profile routes (all behind JWT auth)
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).post(update_field))
        .route("/picture", get(get_picture).post(upload_picture))
}

/// Get the authenticated user's resolved profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Resolved profile", body = ProfileView),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileView>> {
    let view = state.profile_service.resolve(&user.username).await?;
    Ok(Json(view))
}

/// Update one editable profile field
#[utoipa::path(
    post,
    path = "/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateFieldRequest,
    responses(
        (status = 200, description = "Field updated"),
        (status = 400, description = "Unknown or non-editable field"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn update_field(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateFieldRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .profile_service
        .update_field(&user.username, &payload.field, &payload.value)
        .await?;
    Ok(Json(MessageResponse::new("Profile updated")))
}

/// Get the authenticated user's profile picture
#[utoipa::path(
    get,
    path = "/profile/picture",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored picture or placeholder", body = PictureResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_picture(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<PictureResponse>> {
    let response = match state.picture_service.fetch(&user.username).await? {
        StoredPicture::Uploaded(payload) => PictureResponse {
            image_base64: Some(payload),
            placeholder: None,
        },
        StoredPicture::Placeholder(path) => PictureResponse {
            image_base64: None,
            placeholder: Some(path.to_string()),
        },
    };
    Ok(Json(response))
}

/// Upload or replace the authenticated user's profile picture
#[utoipa::path(
    post,
    path = "/profile/picture",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UploadPictureRequest,
    responses(
        (status = 200, description = "Picture stored"),
        (status = 400, description = "Payload is not valid base64"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn upload_picture(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UploadPictureRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .picture_service
        .store(&user.username, &payload.image_base64)
        .await?;
    Ok(Json(MessageResponse::new("Picture stored")))
}
