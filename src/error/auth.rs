//! Authentication-related error types.
//!
//! The variants mirror the failure codes the credential service reports for
//! sign-in (`user-not-found`, `wrong-password`, `invalid-email`), sign-up
//! (`email-already-in-use`, `invalid-email`, `weak-password`) and sign-out.

use thiserror::Error;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No account exists for the email.
    #[error("no user registered for this email")]
    UserNotFound,

    /// The password does not match the account.
    #[error("wrong password")]
    WrongPassword,

    /// The email is not a well-formed address.
    #[error("invalid email address")]
    InvalidEmail,

    /// Sign-up with an email that already has an account.
    #[error("email already in use")]
    EmailInUse,

    /// Sign-up password below the provider's minimum length.
    #[error("password shorter than {min_len} characters")]
    WeakPassword { min_len: usize },

    /// An operation needed a session and there is none.
    #[error("not signed in")]
    NotSignedIn,

    /// Any other provider failure.
    #[error("authentication failed: {message}")]
    Other { message: String },
}

impl AuthError {
    /// Map a provider error code (e.g. `auth/wrong-password`) to a variant.
    pub fn from_code(code: &str, min_password_len: usize) -> Self {
        match code.trim_start_matches("auth/") {
            "user-not-found" => AuthError::UserNotFound,
            "wrong-password" => AuthError::WrongPassword,
            "invalid-email" => AuthError::InvalidEmail,
            "email-already-in-use" => AuthError::EmailInUse,
            "weak-password" => AuthError::WeakPassword {
                min_len: min_password_len,
            },
            other => AuthError::Other {
                message: other.to_string(),
            },
        }
    }

    /// Check if this error means the session is gone.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, AuthError::NotSignedIn)
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::UserNotFound => {
                "Email not found. Use an email that is already registered.".to_string()
            }
            AuthError::WrongPassword => "Wrong password. Try again.".to_string(),
            AuthError::InvalidEmail => "The email format is not valid.".to_string(),
            AuthError::EmailInUse => "This email is already in use. Use another one.".to_string(),
            AuthError::WeakPassword { min_len } => format!(
                "Password is too weak. Use at least {} characters.",
                min_len
            ),
            AuthError::NotSignedIn => "You are not signed in. Please sign in again.".to_string(),
            AuthError::Other { .. } => "Something went wrong. Try again.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => "E_AUTH_USER_NOT_FOUND",
            AuthError::WrongPassword => "E_AUTH_WRONG_PASSWORD",
            AuthError::InvalidEmail => "E_AUTH_INVALID_EMAIL",
            AuthError::EmailInUse => "E_AUTH_EMAIL_IN_USE",
            AuthError::WeakPassword { .. } => "E_AUTH_WEAK_PASSWORD",
            AuthError::NotSignedIn => "E_AUTH_NOT_SIGNED_IN",
            AuthError::Other { .. } => "E_AUTH_OTHER",
        }
    }
}
