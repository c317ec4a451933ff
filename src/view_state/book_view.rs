//! Read-only views of the book list
//!
//! These types are computed from the list view-model's book set and handed
//! to the presentation layer. Nothing here mutates the set.

use crate::models::{BookRecord, Genre, ReadingStatus};

// ============================================================================
// BookFilter
// ============================================================================

/// Search text plus optional genre restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Raw search text as typed
    pub search: String,
    /// `None` shows every genre
    pub genre: Option<Genre>,
}

impl BookFilter {
    /// Title or author contains the search text (case-insensitive), and the
    /// genre matches when one is selected.
    pub fn matches(&self, book: &BookRecord) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = book.title.to_lowercase().contains(&needle)
            || book.author.to_lowercase().contains(&needle);
        let matches_genre = self.genre.map_or(true, |g| book.genre == g);
        matches_search && matches_genre
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.genre.is_none()
    }
}

// ============================================================================
// BookCounts
// ============================================================================

/// Summary counts over the filtered books.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl BookCounts {
    pub fn from_books<'a>(books: impl IntoIterator<Item = &'a BookRecord>) -> Self {
        let (total, completed) = books.into_iter().fold((0, 0), |(total, done), book| {
            (total + 1, done + usize::from(book.status.is_done()))
        });
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

// ============================================================================
// DerivedView
// ============================================================================

/// Filtered books in snapshot order, with their counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedView {
    pub books: Vec<BookRecord>,
    pub counts: BookCounts,
}

impl DerivedView {
    pub fn compute(books: &[BookRecord], filter: &BookFilter) -> Self {
        let books: Vec<BookRecord> = books.iter().filter(|b| filter.matches(b)).cloned().collect();
        let counts = BookCounts::from_books(&books);
        Self { books, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Display rows for the filtered books.
    pub fn rows(&self) -> Vec<BookRow> {
        self.books.iter().map(BookRow::from_record).collect()
    }
}

// ============================================================================
// BookRow
// ============================================================================

/// Display projection of one book in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: &'static str,
    pub status: &'static str,
    /// One star per rating point; only for finished books
    pub stars: Option<String>,
    pub cover_uri: Option<String>,
}

impl BookRow {
    pub fn from_record(book: &BookRecord) -> Self {
        let stars = match book.status {
            ReadingStatus::Done => Some("⭐".repeat(usize::from(book.rating))),
            ReadingStatus::NotDone => None,
        };
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.display_name(),
            status: book.status.display_name(),
            stars,
            cover_uri: book.cover_image.clone(),
        }
    }
}
