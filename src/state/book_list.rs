//! Book list view-model
//!
//! Owns the live, owner-scoped book query and everything derived from it:
//! the filtered list, the summary counts, and the delete/logout intents.
//!
//! ```text
//! Loading ──snapshot──▶ Active ◀──snapshot / filter change──┐
//!    │                    │ └────────────────────────────────┘
//!    └──query error──▶ Error ◀──query error──┘
//! ```
//!
//! Error is terminal for the current subscription; a new `activate` starts
//! over in Loading.

use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{AuthError, ResultExt, ShelfError, SubscriptionError};
use crate::models::{BookRecord, Genre};
use crate::traits::{
    AuthProvider, BookStore, LiveQuery, SnapshotEvent, SnapshotStream, SubscriptionHandle,
    SubscriptionWatch,
};
use crate::view_state::{BookCounts, BookFilter, DerivedView, Notice, Route};

/// Lifecycle of the list's live query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListPhase {
    /// Waiting for the first snapshot
    #[default]
    Loading,
    /// At least one snapshot applied
    Active,
    /// The query failed; no further updates
    Error(SubscriptionError),
}

/// What handling one push did to the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PushOutcome {
    Applied,
    Stopped,
}

/// View-model behind the home screen.
///
/// The book set is replaced wholesale by every snapshot; the view-model
/// never patches it locally, not even after its own deletes.
pub struct BookListViewModel {
    store: Arc<dyn BookStore>,
    auth: Arc<dyn AuthProvider>,
    phase: ListPhase,
    /// Latest snapshot, in provider order
    books: Vec<BookRecord>,
    filter: BookFilter,
    view: DerivedView,
    owner_id: Option<String>,
    user_email: Option<String>,
    snapshots: Option<SnapshotStream>,
    watch: Option<SubscriptionWatch>,
    notice: Option<Notice>,
}

impl BookListViewModel {
    pub fn new(store: Arc<dyn BookStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            store,
            auth,
            phase: ListPhase::Loading,
            books: Vec::new(),
            filter: BookFilter::default(),
            view: DerivedView::default(),
            owner_id: None,
            user_email: None,
            snapshots: None,
            watch: None,
            notice: None,
        }
    }

    /// Start the live query for `owner_id`.
    ///
    /// Any previous query is detached first. The returned handle controls
    /// the subscription: drop or cancel it when the screen goes away.
    pub fn activate(&mut self, owner_id: &str) -> SubscriptionHandle {
        self.detach();

        let LiveQuery { snapshots, handle } = self.store.subscribe(owner_id);
        self.snapshots = Some(snapshots);
        self.watch = Some(handle.watch());
        self.owner_id = Some(owner_id.to_string());
        self.phase = ListPhase::Loading;
        self.books.clear();
        self.recompute();

        info!(owner_id, "book list subscribed");
        handle
    }

    /// Activate for the signed-in user, remembering their email for display.
    pub fn activate_current_user(&mut self) -> Result<SubscriptionHandle, AuthError> {
        let user = self.auth.current_user().ok_or(AuthError::NotSignedIn)?;
        self.user_email = Some(user.email.clone());
        Ok(self.activate(&user.id))
    }

    /// Wait for the next push and apply it.
    ///
    /// Returns `false` once the subscription has stopped (disposed, failed,
    /// or closed by the provider); further calls return immediately.
    pub async fn next_event(&mut self) -> bool {
        if !self.is_subscribed() {
            self.detach();
            return false;
        }
        let Some(snapshots) = self.snapshots.as_mut() else {
            return false;
        };
        let event = snapshots.next().await;
        self.handle_push(event) == PushOutcome::Applied
    }

    /// Apply every push already delivered, without waiting.
    ///
    /// Returns how many snapshots were applied.
    pub fn poll_snapshots(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.snapshots.as_mut().and_then(SnapshotStream::try_recv) {
            match self.handle_push(Some(event)) {
                PushOutcome::Applied => applied += 1,
                PushOutcome::Stopped => break,
            }
        }
        applied
    }

    fn handle_push(&mut self, event: Option<SnapshotEvent>) -> PushOutcome {
        let still_active = self.watch.as_ref().is_some_and(SubscriptionWatch::is_active);
        if !still_active {
            if event.is_some() {
                warn!("dropping snapshot delivered after the subscription was disposed");
            }
            self.detach();
            return PushOutcome::Stopped;
        }

        match event {
            Some(Ok(books)) => {
                info!(count = books.len(), "snapshot applied");
                self.books = books;
                self.phase = ListPhase::Active;
                self.recompute();
                PushOutcome::Applied
            }
            Some(Err(err)) => {
                error!(code = err.error_code(), "{}", err);
                self.phase = ListPhase::Error(err);
                self.detach();
                PushOutcome::Stopped
            }
            None => {
                debug!("live query closed by provider");
                self.detach();
                PushOutcome::Stopped
            }
        }
    }

    fn detach(&mut self) {
        self.snapshots = None;
        self.watch = None;
    }

    fn recompute(&mut self) {
        self.view = DerivedView::compute(&self.books, &self.filter);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
        debug!(search = %self.filter.search, "search changed");
        self.recompute();
    }

    /// `None` shows every genre.
    pub fn set_genre_filter(&mut self, genre: Option<Genre>) {
        self.filter.genre = genre;
        debug!(?genre, "genre filter changed");
        self.recompute();
    }

    pub fn filter(&self) -> &BookFilter {
        &self.filter
    }

    /// Filtered books in snapshot order, with their counts.
    pub fn derived_view(&self) -> &DerivedView {
        &self.view
    }

    pub fn counts(&self) -> BookCounts {
        self.view.counts
    }

    /// The unfiltered latest snapshot.
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    /// Whether pushes are still being received.
    pub fn is_subscribed(&self) -> bool {
        self.snapshots.is_some() && self.watch.as_ref().is_some_and(SubscriptionWatch::is_active)
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Route to the add screen.
    pub fn add_route(&self) -> Route {
        Route::AddBook
    }

    /// Route to the edit screen for a book in the current snapshot.
    pub fn edit_route(&self, id: &str) -> Option<Route> {
        self.books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .map(Route::EditBook)
    }

    /// Ask the store to delete `id`.
    ///
    /// The book stays listed until a snapshot without it arrives. A failure
    /// is only logged: the unchanged list is what the user sees.
    pub async fn delete_book(&self, id: &str) {
        let result = self
            .store
            .delete(id)
            .await
            .map_err(ShelfError::from)
            .log_failure("delete_book");
        if result.is_ok() {
            info!(book_id = id, "book deleted");
        }
    }

    /// Sign out and detach from the live query.
    ///
    /// On failure the session and the subscription are left as they were,
    /// and the error is reported as a notice.
    pub async fn logout(&mut self) -> Result<Route, AuthError> {
        match self.auth.sign_out().await {
            Ok(()) => {
                self.detach();
                self.user_email = None;
                info!("logged out");
                Ok(Route::Login)
            }
            Err(err) => {
                warn!(code = err.error_code(), "logout failed: {}", err);
                self.notice = Some(Notice::from_error(&ShelfError::from(err.clone())));
                Err(err)
            }
        }
    }
}
