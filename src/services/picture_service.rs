//! Profile picture service: base64 payloads keyed by username.

use async_trait::async_trait;
use base64::Engine;
use std::sync::Arc;

use crate::config::PLACEHOLDER_PICTURE_PATH;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// What a picture fetch resolves to: an uploaded payload or the bundled
/// placeholder path.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredPicture {
    Uploaded(String),
    Placeholder(&'static str),
}

/// Picture service trait for dependency injection.
#[async_trait]
pub trait PictureService: Send + Sync {
    /// Store (insert or replace) a user's picture. The payload must be
    /// valid base64; the decoded bytes are not inspected further.
    async fn store(&self, username: &str, image_base64: &str) -> AppResult<()>;

    /// Fetch a user's picture, falling back to the placeholder.
    async fn fetch(&self, username: &str) -> AppResult<StoredPicture>;
}

/// Concrete implementation of PictureService using Unit of Work.
pub struct PictureManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PictureManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PictureService for PictureManager<U> {
    async fn store(&self, username: &str, image_base64: &str) -> AppResult<()> {
        if image_base64.is_empty() {
            return Err(AppError::validation("image payload is empty"));
        }
        base64::engine::general_purpose::STANDARD
            .decode(image_base64)
            .map_err(|_| AppError::validation("image payload is not valid base64"))?;

        // Only existing accounts get a picture row
        self.uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.pictures().upsert(username, image_base64).await
    }

    async fn fetch(&self, username: &str) -> AppResult<StoredPicture> {
        match self.uow.pictures().fetch(username).await? {
            Some(payload) => Ok(StoredPicture::Uploaded(payload)),
            None => Ok(StoredPicture::Placeholder(PLACEHOLDER_PICTURE_PATH)),
        }
    }
}
