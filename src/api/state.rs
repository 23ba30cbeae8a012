//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use apalis_sql::postgres::PostgresStorage;
use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::jobs::EmailJob;
use crate::services::{
    AuthService, ChatService, PictureService, ProfileService, ServiceContainer, Services,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub profile_service: Arc<dyn ProfileService>,
    pub picture_service: Arc<dyn PictureService>,
    pub chat_service: Arc<dyn ChatService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
    /// Queue for outbound emails; absent when the job backend is disabled.
    /// A full queue never fails a request, enqueue errors are logged.
    pub email_queue: Option<PostgresStorage<EmailJob>>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: crate::config::Config,
        email_queue: Option<PostgresStorage<EmailJob>>,
    ) -> Self {
        let container = Arc::new(Services::from_connection(
            database.get_connection(),
            cache.as_ref().clone(),
            config,
        ));

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            profile_service: container.profiles(),
            picture_service: container.pictures(),
            chat_service: container.chat(),
            cache,
            database,
            email_queue,
        }
    }
}
