//! Auth provider trait abstraction.
//!
//! Wraps the credential-based authentication service. The core only reads
//! the current session and asks the provider to sign in, sign up and sign
//! out; session storage and token refresh belong to the provider.

use async_trait::async_trait;

use crate::error::AuthError;
use crate::models::SessionUser;

/// Trait for the authentication service.
///
/// # Example
///
/// ```ignore
/// use bookshelf::traits::AuthProvider;
///
/// async fn owner_id<A: AuthProvider + ?Sized>(auth: &A) -> Result<String, AuthError> {
///     auth.current_user()
///         .map(|user| user.id)
///         .ok_or(AuthError::NotSignedIn)
/// }
/// ```
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, or `None` when unauthenticated.
    fn current_user(&self) -> Option<SessionUser>;

    /// Sign in with email and password; the new session becomes current.
    ///
    /// Fails with `UserNotFound`, `WrongPassword`, `InvalidEmail` or `Other`.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError>;

    /// Create an account; the new session becomes current.
    ///
    /// Fails with `EmailInUse`, `InvalidEmail`, `WeakPassword` or `Other`.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SessionUser, AuthError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
