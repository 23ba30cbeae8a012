//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod chat_handler;
pub mod profile_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use chat_handler::chat_routes;
pub use profile_handler::profile_routes;
