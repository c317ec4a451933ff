//! Errors from the live book query.

use thiserror::Error;

/// The live query stopped with a provider error.
///
/// Terminal for the subscription that produced it: the list view-model
/// stops updating and only a fresh `activate` starts a new one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("live query failed: {message}")]
pub struct SubscriptionError {
    pub message: String,
}

impl SubscriptionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        "Failed to fetch books.".to_string()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        "E_LIVE_QUERY"
    }
}
