//! Raised when the edit screen is opened without a usable book.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("book not found")]
pub struct NotFoundError;

impl NotFoundError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        "Book data not found.".to_string()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        "E_BOOK_NOT_FOUND"
    }
}
