//! Chat service: pass-through to the generative model with per-user
//! history kept in Redis.
//!
//! Histories live under a TTL so idle conversations expire on their own,
//! and are capped at a fixed number of turns. The model client is behind
//! the [`GenerativeModel`] trait so tests can script replies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{MAX_SUMMARY_CHARS, MODEL_SYSTEM_CONTEXT, MODEL_TEMPERATURE};
use crate::errors::{AppError, AppResult};
use crate::infra::Cache;

/// One turn of a conversation. `role` is either `user` or `model`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub role: String,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            text: text.into(),
        }
    }
}

/// Generative model client abstraction.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate the next model turn for a conversation. The last entry in
    /// `history` is the pending user message.
    async fn generate(&self, history: &[ChatTurn]) -> AppResult<String>;
}

/// HTTP client for the Gemini generateContent API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model_name: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model_name: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model_name,
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, history: &[ChatTurn]) -> AppResult<String> {
        let contents: Vec<_> = history
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role,
                    "parts": [{ "text": turn.text }],
                })
            })
            .collect();

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model_name, self.api_key
        );

        let body = json!({
            "contents": contents,
            "systemInstruction": {
                "parts": [{ "text": MODEL_SYSTEM_CONTEXT }],
            },
            "generationConfig": {
                "temperature": MODEL_TEMPERATURE,
            },
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Model request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, detail = %detail, "model call rejected");
            return Err(AppError::internal(format!(
                "Model call failed with status {}",
                status
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Model response unreadable: {}", e)))?;

        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::internal("Model response missing text candidate"))
    }
}

/// Chat service trait for dependency injection.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Current conversation for a user, oldest turn first.
    async fn history(&self, username: &str) -> AppResult<Vec<ChatTurn>>;

    /// Append a user message, call the model, store both turns, and
    /// return the model's reply.
    async fn send_message(&self, username: &str, message: String) -> AppResult<String>;

    /// Drop the user's conversation.
    async fn reset(&self, username: &str) -> AppResult<()>;

    /// One-shot summarization of a document, outside any conversation.
    async fn summarize(&self, text: String) -> AppResult<String>;
}

/// Concrete implementation of ChatService backed by Redis and a model
/// client. Built without a model when no API key is configured; chat
/// calls then fail with a configuration error instead of at startup.
pub struct ChatEngine {
    cache: Cache,
    model: Option<Arc<dyn GenerativeModel>>,
}

impl ChatEngine {
    pub fn new(cache: Cache, model: Option<Arc<dyn GenerativeModel>>) -> Self {
        Self { cache, model }
    }

    fn model(&self) -> AppResult<&Arc<dyn GenerativeModel>> {
        self.model
            .as_ref()
            .ok_or_else(|| AppError::configuration("generative model API key is not configured"))
    }
}

#[async_trait]
impl ChatService for ChatEngine {
    async fn history(&self, username: &str) -> AppResult<Vec<ChatTurn>> {
        self.cache.get_chat_history(username).await
    }

    async fn send_message(&self, username: &str, message: String) -> AppResult<String> {
        let message = message.trim().to_string();
        if message.is_empty() {
            return Err(AppError::validation("message is empty"));
        }
        let model = self.model()?;

        let mut turns = self.cache.get_chat_history(username).await?;
        turns.push(ChatTurn::user(message));

        let reply = model.generate(&turns).await?;
        turns.push(ChatTurn::model(reply.clone()));

        self.cache.set_chat_history(username, &turns).await?;
        Ok(reply)
    }

    async fn reset(&self, username: &str) -> AppResult<()> {
        self.cache.delete_chat_history(username).await
    }

    async fn summarize(&self, text: String) -> AppResult<String> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(AppError::validation("nothing to summarize"));
        }
        let model = self.model()?;

        // Cap by characters, respecting char boundaries
        let capped: String = text.chars().take(MAX_SUMMARY_CHARS).collect();
        let prompt = format!(
            "Resume el siguiente documento de forma concisa:\n\n{}",
            capped
        );

        model.generate(&[ChatTurn::user(prompt)]).await
    }
}
