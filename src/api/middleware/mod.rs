//! HTTP middleware: authentication, admin gating, and rate limiting.

mod auth;
mod rate_limit;

pub use auth::{auth_middleware, require_admin_middleware, CurrentUser};
pub use rate_limit::{rate_limit_auth_middleware, rate_limit_middleware, RateLimitError};
