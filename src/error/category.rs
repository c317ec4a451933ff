//! Error category classification for unified error handling.
//!
//! Categories decide how a failure is presented (notice title, recovery
//! hint). No category triggers an automatic retry; retrying is always an
//! explicit user action.

use std::fmt;

/// High-level categorization of errors for presentation decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Sign-in, sign-up or sign-out problems, or no active session.
    Auth,

    /// The live connection to the backend failed.
    Network,

    /// The backend rejected or failed a write.
    Server,

    /// The user has to correct something before trying again.
    User,
}

impl ErrorCategory {
    /// Whether the user can sensibly repeat the same action unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "auth",
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::User => "user",
        }
    }

    /// Title for the notice shown to the user.
    pub fn notice_title(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "Sign-in problem",
            ErrorCategory::Network => "Connection problem",
            ErrorCategory::Server => "Error",
            ErrorCategory::User => "Check your input",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "Check your email and password, then sign in again.",
            ErrorCategory::Network => "Reopen the list once your connection is back.",
            ErrorCategory::Server => "Try the action again.",
            ErrorCategory::User => "Correct the highlighted fields and try again.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_categories() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
    }

    #[test]
    fn test_display_matches_as_str() {
        for category in [
            ErrorCategory::Auth,
            ErrorCategory::Network,
            ErrorCategory::Server,
            ErrorCategory::User,
        ] {
            assert_eq!(category.to_string(), category.as_str());
            assert!(!category.notice_title().is_empty());
            assert!(!category.recovery_hint().is_empty());
        }
    }
}
