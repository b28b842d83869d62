//! User domain type.
//!
//! Users come from a fixed seed list compiled into the server. They are
//! never persisted to disk and are not mutable at runtime.

use super::id::UserId;

/// A backend user from the fixed seed list.
///
/// The password is stored and compared in plaintext - a known weakness of
/// the credential check, kept deliberately. Implements `Debug` manually to
/// redact it.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Role label, e.g. `"admin"`.
    pub role: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let user = User {
            id: UserId::new("u-1"),
            username: "admin".to_owned(),
            password: "hunter2".to_owned(),
            role: "admin".to_owned(),
        };

        let debug_output = format!("{user:?}");
        assert!(debug_output.contains("admin"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }
}
