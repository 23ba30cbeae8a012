//! Domain layer - Core business entities and logic
//!
//! Contains the user account, role profiles, password value object, and
//! the username generator. No infrastructure concerns.

mod password;
mod profile;
mod user;
mod username;

pub use password::Password;
pub use profile::{
    display_name, grants_admin, synthesize_tax_id, AdminProfile, ProfileView, ProviderListing,
    ProviderProfile, RoleProfileFields,
};
pub use user::{NewRegistration, User, UserResponse};
pub use username::generate_username;
