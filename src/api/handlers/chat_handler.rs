//! Chat handlers: conversation pass-through and one-shot summarization.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::ChatTurn;
use crate::types::MessageResponse;

/// Chat message request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChatMessageRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    #[schema(example = "¿Cómo registro mi portafolio?")]
    pub message: String,
}

/// Document summarization request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SummarizeRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

/// Model reply
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    pub reply: String,
}

/// Create chat routes (all behind JWT auth)
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(history))
        .route("/message", post(send_message))
        .route("/reset", post(reset))
        .route("/summarize", post(summarize))
}

/// Get the current conversation history
#[utoipa::path(
    get,
    path = "/chat/history",
    tag = "Chat",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Conversation turns, oldest first", body = [ChatTurn]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn history(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ChatTurn>>> {
    let turns = state.chat_service.history(&user.username).await?;
    Ok(Json(turns))
}

/// Send a message and get the model's reply
#[utoipa::path(
    post,
    path = "/chat/message",
    tag = "Chat",
    security(("bearer_auth" = [])),
    request_body = ChatMessageRequest,
    responses(
        (status = 200, description = "Model reply", body = ChatReply),
        (status = 400, description = "Empty message"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ChatMessageRequest>,
) -> AppResult<Json<ChatReply>> {
    let reply = state
        .chat_service
        .send_message(&user.username, payload.message)
        .await?;
    Ok(Json(ChatReply { reply }))
}

/// Drop the current conversation
#[utoipa::path(
    post,
    path = "/chat/reset",
    tag = "Chat",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Conversation dropped"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn reset(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<MessageResponse>> {
    state.chat_service.reset(&user.username).await?;
    Ok(Json(MessageResponse::new("Conversation reset")))
}

/// Summarize a document outside the conversation
#[utoipa::path(
    post,
    path = "/chat/summarize",
    tag = "Chat",
    security(("bearer_auth" = [])),
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary", body = ChatReply),
        (status = 400, description = "Empty text"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn summarize(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SummarizeRequest>,
) -> AppResult<Json<ChatReply>> {
    let reply = state.chat_service.summarize(payload.text).await?;
    Ok(Json(ChatReply { reply }))
}
