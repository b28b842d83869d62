//! Credential check against the fixed user list.
//!
//! A stateless lookup: exact username and plaintext password equality (a
//! known weakness, kept deliberately). There is no session store - the
//! returned token is computed deterministically from the user identifier
//! and is neither random, time-limited, nor revocable.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use thiserror::Error;

use artiva_core::{User, UserId};

/// Errors raised by the credential check.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// A successful login response.
#[derive(Debug, Clone, Serialize)]
pub struct Login {
    /// The matched user's identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Role label.
    pub role: String,
    /// Opaque deterministic token.
    pub token: String,
}

/// Stateless credential check over the fixed user list.
pub struct AuthService {
    users: Vec<User>,
}

impl AuthService {
    /// Create the service over a fixed user list.
    #[must_use]
    pub const fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Check a username/password pair against the user list.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any mismatch - wrong
    /// username, wrong password, or both. A token is never produced for a
    /// mismatch.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Login, AuthError> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(username = %user.username, "login succeeded");
        Ok(Login {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role.clone(),
            token: Self::token_for(&user.id),
        })
    }

    /// The opaque token for a user identifier.
    ///
    /// Base64 of `artiva:<id>` - deterministic by design.
    #[must_use]
    pub fn token_for(id: &UserId) -> String {
        BASE64.encode(format!("artiva:{id}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(vec![
            User {
                id: UserId::new("1"),
                username: "admin".to_owned(),
                password: "terracotta".to_owned(),
                role: "admin".to_owned(),
            },
            User {
                id: UserId::new("2"),
                username: "editor".to_owned(),
                password: "maiolica".to_owned(),
                role: "editor".to_owned(),
            },
        ])
    }

    #[test]
    fn test_authenticate_success_embeds_user_id_in_token() {
        let login = service().authenticate("admin", "terracotta").unwrap();

        assert_eq!(login.id, UserId::new("1"));
        assert_eq!(login.role, "admin");

        let decoded = BASE64.decode(&login.token).unwrap();
        let decoded = String::from_utf8(decoded).unwrap();
        assert!(decoded.contains('1'));
    }

    #[test]
    fn test_token_is_deterministic() {
        let a = service().authenticate("admin", "terracotta").unwrap();
        let b = service().authenticate("admin", "terracotta").unwrap();
        assert_eq!(a.token, b.token);
    }

    #[test]
    fn test_every_mismatch_combination_is_rejected() {
        let service = service();

        for (username, password) in [
            ("admin", "wrong"),
            ("nobody", "terracotta"),
            ("nobody", "wrong"),
            ("admin", ""),
            ("", ""),
            // Right password, wrong user's account
            ("editor", "terracotta"),
        ] {
            let result = service.authenticate(username, password);
            assert!(
                matches!(result, Err(AuthError::InvalidCredentials)),
                "expected rejection for {username:?}/{password:?}"
            );
        }
    }
}
