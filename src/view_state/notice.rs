//! Dismissible notices shown over a screen.

use chrono::{DateTime, Utc};

use crate::error::ShelfError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A blocking, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    /// Error code, for errors only
    pub code: Option<&'static str>,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
            code: None,
            raised_at: Utc::now(),
        }
    }

    pub fn from_error(err: &ShelfError) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: err.category().notice_title().to_string(),
            message: err.user_message(),
            code: Some(err.error_code()),
            raised_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
