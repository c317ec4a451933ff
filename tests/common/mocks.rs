//! Backend doubles for integration tests.
//!
//! Re-exports the in-memory adapters and adds helpers for the snapshot
//! shapes tests push by hand.

pub use bookshelf::adapters::memory::{InMemoryAuth, InMemoryBookStore};
pub use bookshelf::traits::{AuthProvider, BookStore};

use bookshelf::models::{BookRecord, Genre, NewBook};

/// A record with a fixed id, for snapshots pushed with `push_snapshot`.
pub fn record_with_id(id: &str, title: &str, owner_id: &str) -> BookRecord {
    NewBook::unread(title, "Unknown", Genre::Novel, owner_id).into_record(id)
}
