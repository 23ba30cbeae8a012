//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{admin_handler, auth_handler, chat_handler, profile_handler};
use crate::domain::{ProfileView, ProviderListing, RoleProfileFields, UserResponse};
use crate::services::{ChatTurn, TokenResponse};

/// OpenAPI documentation for the vendor platform API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Apex Vendor API",
        version = "0.1.0",
        description = "Vendor marketplace backend: role-based registration, profiles, and assistant chat",
        contact(name = "API Support", email = "support@apexvendor.example")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Profile endpoints
        profile_handler::get_profile,
        profile_handler::update_field,
        profile_handler::get_picture,
        profile_handler::upload_picture,
        // Admin endpoints
        admin_handler::list_providers,
        admin_handler::delete_user,
        // Chat endpoints
        chat_handler::history,
        chat_handler::send_message,
        chat_handler::reset,
        chat_handler::summarize,
    ),
    components(
        schemas(
            // Domain types
            UserResponse,
            ProfileView,
            RoleProfileFields,
            ProviderListing,
            ChatTurn,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::RegisterResponse,
            TokenResponse,
            // Profile types
            profile_handler::UpdateFieldRequest,
            profile_handler::UploadPictureRequest,
            profile_handler::PictureResponse,
            // Chat types
            chat_handler::ChatMessageRequest,
            chat_handler::SummarizeRequest,
            chat_handler::ChatReply,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Profile", description = "Profile resolution and updates"),
        (name = "Admin", description = "Privileged management operations"),
        (name = "Chat", description = "Assistant conversation and summarization")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
