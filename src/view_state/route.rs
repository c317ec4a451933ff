//! Navigation targets returned by view-models.
//!
//! View-models never navigate themselves; an intent that should move the
//! user elsewhere returns a `Route` and the presentation layer acts on it.

use crate::models::BookRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Register,
    /// The book list.
    Home,
    AddBook,
    EditBook(BookRecord),
    /// Pop the current screen.
    Back,
}

impl Route {
    /// Whether this route needs a signed-in user.
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Home | Route::AddBook | Route::EditBook(_))
    }
}
