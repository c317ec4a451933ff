//! View-models
//!
//! Each screen of the reading list owns one of these:
//! - [`BookListViewModel`]: live book list, filters, counts, delete, logout
//! - [`BookEditor`]: add/edit form with the rating prompt
//! - [`LoginForm`] / [`RegisterForm`]: credential forms
//!
//! View-models talk to the backend only through [`crate::traits`], and
//! report navigation as [`crate::view_state::Route`] values.

mod auth_forms;
mod book_editor;
mod book_list;

pub use auth_forms::{LoginForm, RegisterForm};
pub use book_editor::{BookDraft, BookEditor, CommitOutcome, CommitState, EditorMode};
pub use book_list::{BookListViewModel, ListPhase};
