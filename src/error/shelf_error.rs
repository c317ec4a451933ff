//! Unified error type for the bookshelf core.
//!
//! `ShelfError` wraps every error kind a view-model can report, so callers
//! can present any failure the same way: a notice titled by category with
//! the kind's user message.

use thiserror::Error;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::not_found::NotFoundError;
use super::persistence::PersistenceError;
use super::subscription::SubscriptionError;
use super::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShelfError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl ShelfError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShelfError::Auth(_) => ErrorCategory::Auth,
            ShelfError::Subscription(_) => ErrorCategory::Network,
            ShelfError::Persistence(_) => ErrorCategory::Server,
            ShelfError::Validation(_) | ShelfError::NotFound(_) => ErrorCategory::User,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ShelfError::Auth(err) => err.user_message(),
            ShelfError::Subscription(err) => err.user_message(),
            ShelfError::Persistence(err) => err.user_message(),
            ShelfError::Validation(err) => err.user_message(),
            ShelfError::NotFound(err) => err.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ShelfError::Auth(err) => err.error_code(),
            ShelfError::Subscription(err) => err.error_code(),
            ShelfError::Persistence(err) => err.error_code(),
            ShelfError::Validation(err) => err.error_code(),
            ShelfError::NotFound(err) => err.error_code(),
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ShelfError::Validation(_))
    }
}
