//! Local validation failures, raised before any remote call.

use thiserror::Error;

use crate::models::{MAX_RATING, MIN_RATING};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title, author or genre missing.
    #[error("missing-fields")]
    MissingFields,

    /// Rating not a whole number in 1..=5.
    #[error("invalid-rating")]
    InvalidRating,
}

impl ValidationError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingFields => "Title, author and genre are required.".to_string(),
            ValidationError::InvalidRating => format!(
                "Enter a number from {} to {}.",
                MIN_RATING, MAX_RATING
            ),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "E_INPUT_MISSING",
            ValidationError::InvalidRating => "E_INPUT_RATING",
        }
    }
}
