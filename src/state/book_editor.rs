//! Add/edit book view-model
//!
//! Holds a draft of the book being written and commits it through the
//! [`BookStore`]. Committing an edit that marks a book finished without a
//! rating is a two-step affair:
//!
//! ```text
//! Idle ──save──▶ Committing ──▶ Idle
//!   │                ▲
//!   └─save (done,    │ submit_rating (valid)
//!     no rating)─▶ AwaitingRating ──cancel_rating──▶ Idle
//! ```

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{
    AuthError, NotFoundError, ResultExt, ShelfError, ShelfResult, ValidationError,
};
use crate::models::{
    parse_rating, BookRecord, BookUpdate, Genre, NewBook, ReadingStatus, UnknownGenre,
    MAX_RATING, MIN_RATING,
};
use crate::traits::{AuthProvider, BookStore};
use crate::view_state::{Notice, Route};

/// The form as the user is filling it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: Option<Genre>,
    pub status: ReadingStatus,
    /// 0 means unrated
    pub rating: u8,
}

/// Draft fields that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CheckedFields {
    title: String,
    author: String,
    genre: Genre,
}

impl BookDraft {
    fn from_record(record: &BookRecord) -> Self {
        Self {
            title: record.title.clone(),
            author: record.author.clone(),
            genre: Some(record.genre),
            status: record.status,
            rating: record.rating,
        }
    }

    /// Title and author must be non-blank and a genre chosen.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.checked().map(|_| ())
    }

    fn checked(&self) -> Result<CheckedFields, ValidationError> {
        let title = self.title.trim();
        let author = self.author.trim();
        match self.genre {
            Some(genre) if !title.is_empty() && !author.is_empty() => Ok(CheckedFields {
                title: title.to_string(),
                author: author.to_string(),
                genre,
            }),
            _ => Err(ValidationError::MissingFields),
        }
    }

    /// A finished book has to carry a rating in 1..=5 before it can be
    /// stored. A stale out-of-range rating from the document counts as none.
    fn needs_rating(&self) -> bool {
        self.status.is_done() && !(MIN_RATING..=MAX_RATING).contains(&self.rating)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitState {
    #[default]
    Idle,
    /// Waiting for the user to supply a rating
    AwaitingRating,
    /// A write is in flight
    Committing,
}

/// Result of a save or rating submission that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The write went through; `route` is where to go next.
    Saved { id: String, route: Route },
    /// Nothing written yet; prompt for a rating.
    RatingRequired,
    /// Not accepted in the current state.
    Ignored,
}

/// View-model behind the add and edit screens.
pub struct BookEditor {
    store: Arc<dyn BookStore>,
    /// Only needed to stamp the owner on new books
    auth: Option<Arc<dyn AuthProvider>>,
    mode: EditorMode,
    draft: BookDraft,
    state: CommitState,
    notice: Option<Notice>,
}

impl BookEditor {
    /// An empty form for adding a book.
    pub fn for_create(store: Arc<dyn BookStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            store,
            auth: Some(auth),
            mode: EditorMode::Create,
            draft: BookDraft::default(),
            state: CommitState::Idle,
            notice: None,
        }
    }

    /// A form prefilled from `record`.
    ///
    /// Fails when no record was handed over, or it has no id.
    pub fn for_edit(
        store: Arc<dyn BookStore>,
        record: Option<&BookRecord>,
    ) -> Result<Self, NotFoundError> {
        let record = record.filter(|r| !r.id.is_empty()).ok_or(NotFoundError)?;
        debug!(book_id = %record.id, "editing book");
        Ok(Self {
            store,
            auth: None,
            mode: EditorMode::Edit {
                id: record.id.clone(),
            },
            draft: BookDraft::from_record(record),
            state: CommitState::Idle,
            notice: None,
        })
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_create(&self) -> bool {
        self.mode == EditorMode::Create
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn state(&self) -> CommitState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == CommitState::Committing
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The draft is frozen while a rating prompt or a write is pending.
    fn draft_locked(&self) -> bool {
        if self.state != CommitState::Idle {
            debug!(state = ?self.state, "draft change ignored");
            return true;
        }
        false
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if !self.draft_locked() {
            self.draft.title = title.into();
        }
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        if !self.draft_locked() {
            self.draft.author = author.into();
        }
    }

    pub fn set_genre(&mut self, genre: Option<Genre>) {
        if !self.draft_locked() {
            self.draft.genre = genre;
        }
    }

    /// Set the genre from a picker label; blank clears it.
    pub fn set_genre_label(&mut self, label: &str) -> Result<(), UnknownGenre> {
        let genre = Genre::parse_optional(label)?;
        if !self.draft_locked() {
            self.draft.genre = genre;
        }
        Ok(())
    }

    /// Edit only. Going back to not-finished drops the rating.
    pub fn set_status(&mut self, status: ReadingStatus) {
        if self.is_create() || self.draft_locked() {
            return;
        }
        self.draft.status = status;
        if !status.is_done() {
            self.draft.rating = 0;
        }
    }

    /// Edit only. Anything but a whole number in 1..=5 leaves the book unrated.
    pub fn set_rating_input(&mut self, input: &str) {
        if self.is_create() || self.draft_locked() {
            return;
        }
        self.draft.rating = parse_rating(input).unwrap_or(0);
    }

    /// Validate and commit the draft.
    ///
    /// Ignored unless idle. Editing a finished book with no rating returns
    /// [`CommitOutcome::RatingRequired`] without writing; follow up with
    /// [`submit_rating`](Self::submit_rating) or
    /// [`cancel_rating`](Self::cancel_rating).
    pub async fn save(&mut self) -> ShelfResult<CommitOutcome> {
        if self.state != CommitState::Idle {
            debug!(state = ?self.state, "save ignored");
            return Ok(CommitOutcome::Ignored);
        }

        let fields = match self.draft.checked() {
            Ok(fields) => fields,
            Err(err) => return self.fail(err.into(), "save_book"),
        };

        match self.mode.clone() {
            EditorMode::Create => self.commit_create(fields).await,
            EditorMode::Edit { id } => {
                if self.draft.needs_rating() {
                    debug!(book_id = %id, "rating required before commit");
                    self.state = CommitState::AwaitingRating;
                    return Ok(CommitOutcome::RatingRequired);
                }
                self.commit_update(&id, fields).await
            }
        }
    }

    /// Supply the rating asked for by [`CommitOutcome::RatingRequired`] and
    /// commit.
    ///
    /// An invalid rating is reported and the prompt stays open.
    pub async fn submit_rating(&mut self, input: &str) -> ShelfResult<CommitOutcome> {
        let EditorMode::Edit { id } = self.mode.clone() else {
            return Ok(CommitOutcome::Ignored);
        };
        if self.state != CommitState::AwaitingRating {
            return Ok(CommitOutcome::Ignored);
        }

        let rating = match parse_rating(input) {
            Ok(rating) => rating,
            Err(err) => return self.fail(err.into(), "submit_rating"),
        };
        let fields = match self.draft.checked() {
            Ok(fields) => fields,
            Err(err) => return self.fail(err.into(), "submit_rating"),
        };
        self.draft.rating = rating;
        self.state = CommitState::Idle;
        self.commit_update(&id, fields).await
    }

    /// Dismiss the rating prompt without writing anything.
    pub fn cancel_rating(&mut self) {
        if self.state == CommitState::AwaitingRating {
            debug!("rating prompt cancelled");
            self.state = CommitState::Idle;
        }
    }

    async fn commit_create(&mut self, fields: CheckedFields) -> ShelfResult<CommitOutcome> {
        let owner = self.auth.as_ref().and_then(|auth| auth.current_user());
        let Some(owner) = owner else {
            return self.fail(AuthError::NotSignedIn.into(), "create_book");
        };

        self.state = CommitState::Committing;
        let book = NewBook::unread(fields.title, fields.author, fields.genre, owner.id);
        let result = self.store.create(book).await;
        self.state = CommitState::Idle;

        match result {
            Ok(id) => {
                info!(book_id = %id, "book created");
                self.draft = BookDraft::default();
                self.notice = Some(Notice::info("Success", "Book added."));
                Ok(CommitOutcome::Saved {
                    id,
                    route: Route::Back,
                })
            }
            Err(err) => self.fail(err.into(), "create_book"),
        }
    }

    async fn commit_update(&mut self, id: &str, fields: CheckedFields) -> ShelfResult<CommitOutcome> {
        let update = BookUpdate::new(
            fields.title,
            fields.author,
            fields.genre,
            self.draft.status,
            self.draft.rating,
        );
        if let Err(err) = update.validate() {
            return self.fail(err.into(), "update_book");
        }

        self.state = CommitState::Committing;
        let result = self.store.update(id, update).await;
        self.state = CommitState::Idle;

        match result {
            Ok(()) => {
                info!(book_id = id, "book updated");
                self.notice = Some(Notice::info("Success", "Book updated."));
                Ok(CommitOutcome::Saved {
                    id: id.to_string(),
                    route: Route::Back,
                })
            }
            Err(err) => self.fail(err.into(), "update_book"),
        }
    }

    /// Report `err` as a notice. The draft and commit state are kept.
    fn fail(&mut self, err: ShelfError, operation: &str) -> ShelfResult<CommitOutcome> {
        self.notice = Some(Notice::from_error(&err));
        Err(err).log_failure(operation)
    }
}
