//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod chat_service;
pub mod container;
mod picture_service;
mod profile_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{
    execute_registration, AuthService, Authenticator, Claims, LoginIdentity, TokenResponse,
};
pub use chat_service::{ChatEngine, ChatService, ChatTurn, GeminiClient, GenerativeModel};
pub use picture_service::{PictureManager, PictureService, StoredPicture};
pub use profile_service::{
    validate_field_map, FieldTarget, ProfileManager, ProfileService, FIELD_MAP,
};
pub use user_service::{UserManager, UserService};
