//! Login and registration forms.

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::models::SessionUser;
use crate::traits::AuthProvider;
use crate::view_state::{Notice, Route};

/// Email/password pair plus submission state, shared by both forms.
#[derive(Debug, Clone, Default)]
struct Credentials {
    email: String,
    password: String,
    loading: bool,
    error: Option<String>,
}

impl Credentials {
    /// Run `call` unless a submission is already in flight.
    ///
    /// Returns `None` when ignored or failed; the failure text is kept in
    /// `error`.
    async fn submit<F, Fut>(&mut self, operation: &str, call: F) -> Option<SessionUser>
    where
        F: FnOnce(String, String) -> Fut,
        Fut: std::future::Future<Output = Result<SessionUser, AuthError>>,
    {
        if self.loading {
            return None;
        }
        self.error = None;
        self.loading = true;
        let result = call(self.email.trim().to_string(), self.password.clone()).await;
        self.loading = false;

        match result {
            Ok(user) => {
                self.email.clear();
                self.password.clear();
                Some(user)
            }
            Err(err) => {
                warn!(operation, code = err.error_code(), "{}", err);
                self.error = Some(err.user_message());
                None
            }
        }
    }
}

/// View-model behind the login screen.
pub struct LoginForm {
    auth: Arc<dyn AuthProvider>,
    fields: Credentials,
}

impl LoginForm {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            auth,
            fields: Credentials::default(),
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.fields.password = password.into();
    }

    pub fn email(&self) -> &str {
        &self.fields.email
    }

    pub fn password(&self) -> &str {
        &self.fields.password
    }

    pub fn is_loading(&self) -> bool {
        self.fields.loading
    }

    /// Message for the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.fields.error.as_deref()
    }

    /// Sign in. `Some(Route::Home)` on success.
    pub async fn submit(&mut self) -> Option<Route> {
        let auth = Arc::clone(&self.auth);
        let user = self
            .fields
            .submit("sign_in", |email, password| async move {
                auth.sign_in(&email, &password).await
            })
            .await?;
        info!(user_id = %user.id, "login succeeded");
        Some(Route::Home)
    }
}

/// View-model behind the registration screen.
pub struct RegisterForm {
    auth: Arc<dyn AuthProvider>,
    fields: Credentials,
    notice: Option<Notice>,
}

impl RegisterForm {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            auth,
            fields: Credentials::default(),
            notice: None,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.fields.password = password.into();
    }

    pub fn email(&self) -> &str {
        &self.fields.email
    }

    pub fn password(&self) -> &str {
        &self.fields.password
    }

    pub fn is_loading(&self) -> bool {
        self.fields.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.fields.error.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Create the account. `Some(Route::Login)` on success.
    pub async fn submit(&mut self) -> Option<Route> {
        let auth = Arc::clone(&self.auth);
        let user = self
            .fields
            .submit("sign_up", |email, password| async move {
                auth.sign_up(&email, &password).await
            })
            .await?;
        info!(user_id = %user.id, "registration succeeded");
        self.notice = Some(Notice::info("Success", "Account created!"));
        Some(Route::Login)
    }
}
