//! The signed-in identity as reported by the auth provider.

use serde::{Deserialize, Serialize};

/// Current authenticated user.
///
/// Owned by the auth provider; the core only reads the id (to scope book
/// queries) and the email (for display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Opaque user id, stamped on every book as its owner.
    pub id: String,
    pub email: String,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}
