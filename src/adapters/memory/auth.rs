//! In-memory auth provider.
//!
//! Keeps accounts and the current session in process memory and reports the
//! same failure causes as the hosted credential service. Used by tests and
//! for running the core without a backend.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::lock;
use crate::config::BackendConfig;
use crate::error::AuthError;
use crate::models::SessionUser;
use crate::traits::AuthProvider;

#[derive(Debug, Clone)]
struct Account {
    id: String,
    email: String,
    password: String,
}

/// In-memory auth provider.
///
/// # Example
///
/// ```ignore
/// use bookshelf::adapters::memory::InMemoryAuth;
/// use bookshelf::traits::AuthProvider;
///
/// let auth = InMemoryAuth::new();
/// auth.sign_up("reader@example.com", "secret1").await?;
/// assert!(auth.current_user().is_some());
///
/// auth.sign_out().await?;
/// assert!(auth.current_user().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryAuth {
    /// Accounts keyed by lowercased email
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    /// Current session
    current: Arc<Mutex<Option<SessionUser>>>,
    /// Shortest password sign-up accepts
    min_password_len: usize,
    /// Credential service domain this provider stands in for
    auth_domain: String,
    /// Whether sign-out should fail
    sign_out_should_fail: Arc<Mutex<bool>>,
    /// Whether every call should fail as if the service were unreachable
    unavailable: Arc<Mutex<bool>>,
}

impl InMemoryAuth {
    /// Create a provider with no accounts, using default config.
    pub fn new() -> Self {
        Self::with_config(&BackendConfig::default())
    }

    pub fn with_config(config: &BackendConfig) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            current: Arc::new(Mutex::new(None)),
            min_password_len: config.min_password_len,
            auth_domain: config.auth_domain.clone(),
            sign_out_should_fail: Arc::new(Mutex::new(false)),
            unavailable: Arc::new(Mutex::new(false)),
        }
    }

    /// Register an account directly, without signing in. Returns its id.
    pub fn add_account(&self, email: &str, password: &str) -> String {
        let account = Account {
            id: Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let id = account.id.clone();
        lock(&self.accounts).insert(normalize(email), account);
        id
    }

    /// Replace the current session without going through sign-in.
    pub fn set_current_user(&self, user: Option<SessionUser>) {
        *lock(&self.current) = user;
    }

    /// Configure whether sign-out should fail.
    pub fn set_sign_out_should_fail(&self, should_fail: bool) {
        *lock(&self.sign_out_should_fail) = should_fail;
    }

    /// Configure whether every call should fail with `AuthError::Other`.
    pub fn set_unavailable(&self, unavailable: bool) {
        *lock(&self.unavailable) = unavailable;
    }

    /// Domain of the credential service; only used to label logs.
    pub fn auth_domain(&self) -> &str {
        &self.auth_domain
    }

    pub fn account_count(&self) -> usize {
        lock(&self.accounts).len()
    }

    fn check_available(&self) -> Result<(), AuthError> {
        if *lock(&self.unavailable) {
            return Err(AuthError::Other {
                message: "auth service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// One `@`, a non-empty local part, a dotted domain, no whitespace.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("Invalid email regex pattern")
});

fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

#[async_trait]
impl AuthProvider for InMemoryAuth {
    fn current_user(&self) -> Option<SessionUser> {
        lock(&self.current).clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        self.check_available()?;
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        let account = lock(&self.accounts)
            .get(&normalize(email))
            .cloned()
            .ok_or(AuthError::UserNotFound)?;
        if account.password != password {
            return Err(AuthError::WrongPassword);
        }

        let user = SessionUser::new(account.id, account.email);
        *lock(&self.current) = Some(user.clone());
        tracing::info!(user_id = %user.id, auth_domain = %self.auth_domain, "signed in");
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        self.check_available()?;
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }
        if lock(&self.accounts).contains_key(&normalize(email)) {
            return Err(AuthError::EmailInUse);
        }
        if password.chars().count() < self.min_password_len {
            return Err(AuthError::WeakPassword {
                min_len: self.min_password_len,
            });
        }

        let id = self.add_account(email, password);
        let user = SessionUser::new(id, email.trim());
        *lock(&self.current) = Some(user.clone());
        tracing::info!(user_id = %user.id, auth_domain = %self.auth_domain, "account created");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.check_available()?;
        if *lock(&self.sign_out_should_fail) {
            return Err(AuthError::Other {
                message: "sign-out rejected".to_string(),
            });
        }
        if let Some(user) = lock(&self.current).take() {
            tracing::info!(user_id = %user.id, auth_domain = %self.auth_domain, "signed out");
        }
        Ok(())
    }
}
