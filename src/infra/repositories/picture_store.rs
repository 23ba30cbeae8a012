//! Profile-picture repository: one base64 payload per username, upserted.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use super::entities::pfp::{self, Entity as Pfp};
use crate::errors::{AppError, AppResult};

#[async_trait]
pub trait PictureRepository: Send + Sync {
    /// Insert or replace the stored picture for a username.
    async fn upsert(&self, username: &str, image_base64: &str) -> AppResult<()>;

    /// Stored picture payload, if one was ever uploaded.
    async fn fetch(&self, username: &str) -> AppResult<Option<String>>;
}

/// SeaORM-backed implementation of [`PictureRepository`].
pub struct PictureStore {
    db: DatabaseConnection,
}

impl PictureStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PictureRepository for PictureStore {
    async fn upsert(&self, username: &str, image_base64: &str) -> AppResult<()> {
        let row = pfp::ActiveModel {
            username: Set(username.to_string()),
            image_base64: Set(image_base64.to_string()),
        };

        Pfp::insert(row)
            .on_conflict(
                OnConflict::column(pfp::Column::Username)
                    .update_column(pfp::Column::ImageBase64)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn fetch(&self, username: &str) -> AppResult<Option<String>> {
        let result = Pfp::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(result.map(|row| row.image_base64))
    }
}
