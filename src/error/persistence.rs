//! Errors from writes against the book store.

use std::fmt;
use thiserror::Error;

/// Which write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteOp::Create => "create",
            WriteOp::Update => "update",
            WriteOp::Delete => "delete",
        })
    }
}

/// A create, update or delete the backend did not accept.
///
/// The cause is opaque to the core; `message` carries whatever the provider
/// reported, for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The addressed document does not exist (update or delete).
    #[error("{op} failed: no document with id '{id}'")]
    MissingDocument { op: WriteOp, id: String },

    /// The provider rejected or failed the write.
    #[error("{op} failed: {message}")]
    Rejected { op: WriteOp, message: String },
}

impl PersistenceError {
    pub fn rejected(op: WriteOp, message: impl Into<String>) -> Self {
        PersistenceError::Rejected {
            op,
            message: message.into(),
        }
    }

    pub fn op(&self) -> WriteOp {
        match self {
            PersistenceError::MissingDocument { op, .. } | PersistenceError::Rejected { op, .. } => {
                *op
            }
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self.op() {
            WriteOp::Create => "Something went wrong while saving the book.".to_string(),
            WriteOp::Update => "Failed to save your changes.".to_string(),
            WriteOp::Delete => "Failed to delete the book.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            PersistenceError::MissingDocument { .. } => "E_STORE_MISSING_DOC",
            PersistenceError::Rejected { op: WriteOp::Create, .. } => "E_STORE_CREATE",
            PersistenceError::Rejected { op: WriteOp::Update, .. } => "E_STORE_UPDATE",
            PersistenceError::Rejected { op: WriteOp::Delete, .. } => "E_STORE_DELETE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_operation() {
        let err = PersistenceError::MissingDocument {
            op: WriteOp::Delete,
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "delete failed: no document with id 'abc'");

        let err = PersistenceError::rejected(WriteOp::Create, "permission denied");
        assert_eq!(err.to_string(), "create failed: permission denied");
    }

    #[test]
    fn test_user_message_per_operation() {
        assert!(PersistenceError::rejected(WriteOp::Create, "x")
            .user_message()
            .contains("saving the book"));
        assert!(PersistenceError::rejected(WriteOp::Update, "x")
            .user_message()
            .contains("changes"));
        assert_eq!(
            PersistenceError::rejected(WriteOp::Update, "x").error_code(),
            "E_STORE_UPDATE"
        );
    }
}
