//! Backend connection configuration.
//!
//! The backend project parameters are fixed per deployment. They can be
//! built in code, read from the JSON file the hosting console exports, and
//! overridden from the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default collection holding book documents.
pub const DEFAULT_BOOKS_COLLECTION: &str = "books";

/// Minimum password length the credential service accepts by default.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

/// Errors from loading or validating a [`BackendConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Connection parameters of the backend project.
///
/// # Example
///
/// ```ignore
/// use bookshelf::config::BackendConfig;
///
/// let config = BackendConfig::default()
///     .with_project_id("reading-list")
///     .with_min_password_len(8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendConfig {
    /// Backend project id; the in-memory store labels its logs with it
    pub project_id: String,
    /// Public API key of the project. Only hosted adapters send it; the
    /// in-memory backend ignores it and it is never logged.
    pub api_key: String,
    /// Domain of the credential service; the in-memory auth labels its logs
    /// with it
    pub auth_domain: String,
    /// Collection holding book documents (default: "books")
    pub books_collection: String,
    /// Shortest password sign-up accepts (default: 6)
    pub min_password_len: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: String::new(),
            auth_domain: String::new(),
            books_collection: DEFAULT_BOOKS_COLLECTION.to_string(),
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}

impl BackendConfig {
    /// Create a new BackendConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_auth_domain(mut self, auth_domain: impl Into<String>) -> Self {
        self.auth_domain = auth_domain.into();
        self
    }

    pub fn with_books_collection(mut self, collection: impl Into<String>) -> Self {
        self.books_collection = collection.into();
        self
    }

    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    /// Read a JSON config file (camelCase keys, missing keys defaulted).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BackendConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `BOOKSHELF_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().overlay_env()
    }

    /// Override fields from `BOOKSHELF_*` environment variables that are set.
    pub fn overlay_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(v) = std::env::var("BOOKSHELF_PROJECT_ID") {
            self.project_id = v;
        }
        if let Ok(v) = std::env::var("BOOKSHELF_API_KEY") {
            self.api_key = v;
        }
        if let Ok(v) = std::env::var("BOOKSHELF_AUTH_DOMAIN") {
            self.auth_domain = v;
        }
        if let Ok(v) = std::env::var("BOOKSHELF_COLLECTION") {
            self.books_collection = v;
        }
        if let Ok(v) = std::env::var("BOOKSHELF_MIN_PASSWORD_LEN") {
            self.min_password_len = v.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "BOOKSHELF_MIN_PASSWORD_LEN",
                value: v.clone(),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.books_collection.trim().is_empty() {
            return Err(ConfigError::Invalid("books collection name is empty"));
        }
        if self.min_password_len == 0 {
            return Err(ConfigError::Invalid("minimum password length must be positive"));
        }
        Ok(())
    }
}
