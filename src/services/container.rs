//! Service Container - Centralized service access.
//!
//! Handlers depend on the [`ServiceContainer`] trait rather than concrete
//! services, so tests can swap in scripted implementations.

use std::sync::Arc;

use super::{AuthService, ChatService, PictureService, ProfileService, UserService};
use crate::config::Config;
use crate::infra::{Cache, Persistence};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn profiles(&self) -> Arc<dyn ProfileService>;

    fn pictures(&self) -> Arc<dyn PictureService>;

    fn chat(&self) -> Arc<dyn ChatService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    profile_service: Arc<dyn ProfileService>,
    picture_service: Arc<dyn PictureService>,
    chat_service: Arc<dyn ChatService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        profile_service: Arc<dyn ProfileService>,
        picture_service: Arc<dyn PictureService>,
        chat_service: Arc<dyn ChatService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            profile_service,
            picture_service,
            chat_service,
        }
    }

    /// Create service container from database connection, cache, and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, cache: Cache, config: Config) -> Self {
        use super::{
            Authenticator, ChatEngine, GeminiClient, PictureManager, ProfileManager, UserManager,
        };

        let model: Option<Arc<dyn super::GenerativeModel>> = config
            .gemini_api_key
            .clone()
            .map(|key| {
                Arc::new(GeminiClient::new(key, config.model_name.clone()))
                    as Arc<dyn super::GenerativeModel>
            });
        if model.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; chat endpoints will refuse requests");
        }

        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let user_service = Arc::new(UserManager::new(uow.clone()));
        let profile_service = Arc::new(ProfileManager::new(uow.clone()));
        let picture_service = Arc::new(PictureManager::new(uow));
        let chat_service = Arc::new(ChatEngine::new(cache, model));

        Self {
            auth_service,
            user_service,
            profile_service,
            picture_service,
            chat_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileService> {
        self.profile_service.clone()
    }

    fn pictures(&self) -> Arc<dyn PictureService> {
        self.picture_service.clone()
    }

    fn chat(&self) -> Arc<dyn ChatService> {
        self.chat_service.clone()
    }
}
