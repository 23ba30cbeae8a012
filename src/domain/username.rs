//! Username generation.
//!
//! Produces `{prefix}-{name}-{token}` usernames where the token is the
//! leading hex of a SHA-256 digest over random input. Tokens are
//! pseudo-unique only; the registration path tolerates a unique-constraint
//! violation on insert.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::config::{USERNAME_PREFIX_ADMIN, USERNAME_PREFIX_PROVIDER, USERNAME_TOKEN_LENGTH};

/// Generate a username for a new account.
///
/// `name` is reduced to its lowercased first word so `"Maria Lopez"`
/// becomes `p-maria-<token>`.
pub fn generate_username(name: &str, is_admin: bool) -> String {
    let prefix = if is_admin {
        USERNAME_PREFIX_ADMIN
    } else {
        USERNAME_PREFIX_PROVIDER
    };
    let formatted = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .next()
        .unwrap_or("user")
        .to_string();

    format!("{}-{}-{}", prefix, formatted, random_token())
}

/// First [`USERNAME_TOKEN_LENGTH`] hex chars of SHA-256 over 16 random
/// alphanumerics.
fn random_token() -> String {
    let random_str: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();

    let digest = Sha256::digest(random_str.as_bytes());
    let hex = digest.iter().map(|b| format!("{:02x}", b)).collect::<String>();
    hex[..USERNAME_TOKEN_LENGTH].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_username_format() {
        let username = generate_username("Maria Lopez", false);
        let parts: Vec<&str> = username.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "p");
        assert_eq!(parts[1], "maria");
        assert_eq!(parts[2].len(), USERNAME_TOKEN_LENGTH);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn admin_username_uses_admin_prefix() {
        let username = generate_username("Juan", true);
        assert!(username.starts_with("a-juan-"));
    }

    #[test]
    fn empty_name_falls_back() {
        let username = generate_username("   ", false);
        assert!(username.starts_with("p-user-"));
    }

    #[test]
    fn tokens_differ_between_calls() {
        let a = generate_username("Ana", false);
        let b = generate_username("Ana", false);
        assert_ne!(a, b);
    }
}
