//! Common test utilities for integration tests.
//!
//! Fixtures for books and users, plus a harness wiring the view-models to
//! the in-memory backend.
//!
//! # Example
//!
//! ```ignore
//! use common::TestShelf;
//!
//! let shelf = TestShelf::signed_in();
//! shelf.seed_book("Dune", "Herbert", Genre::Novel);
//! let mut list = shelf.list();
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use bookshelf::models::{BookRecord, Genre, NewBook, ReadingStatus, SessionUser};
use bookshelf::state::{BookEditor, BookListViewModel};
use std::sync::Arc;

pub const TEST_USER_ID: &str = "test-user-id";
pub const TEST_EMAIL: &str = "reader@example.com";
pub const TEST_PASSWORD: &str = "secret1";

/// The signed-in user every harness starts with.
pub fn test_user() -> SessionUser {
    SessionUser::new(TEST_USER_ID, TEST_EMAIL)
}

/// An unread book owned by the test user.
pub fn unread_book(title: &str, author: &str, genre: Genre) -> NewBook {
    NewBook::unread(title, author, genre, TEST_USER_ID)
}

/// A finished, rated book owned by the test user.
pub fn finished_book(title: &str, author: &str, genre: Genre, rating: u8) -> NewBook {
    let mut book = unread_book(title, author, genre);
    book.status = ReadingStatus::Done;
    book.rating = rating;
    book
}

/// Backend plus the handles tests use to poke it.
pub struct TestShelf {
    pub store: InMemoryBookStore,
    pub auth: InMemoryAuth,
}

impl TestShelf {
    /// No session.
    pub fn signed_out() -> Self {
        Self {
            store: InMemoryBookStore::new(),
            auth: InMemoryAuth::new(),
        }
    }

    /// Session for [`test_user`].
    pub fn signed_in() -> Self {
        let shelf = Self::signed_out();
        shelf.auth.set_current_user(Some(test_user()));
        shelf
    }

    pub fn seed(&self, book: NewBook) -> String {
        self.store.seed(book)
    }

    pub fn seed_book(&self, title: &str, author: &str, genre: Genre) -> String {
        self.seed(unread_book(title, author, genre))
    }

    pub fn record(&self, id: &str) -> BookRecord {
        self.store.record(id).expect("record should exist")
    }

    pub fn list(&self) -> BookListViewModel {
        BookListViewModel::new(Arc::new(self.store.clone()), Arc::new(self.auth.clone()))
    }

    pub fn create_editor(&self) -> BookEditor {
        BookEditor::for_create(Arc::new(self.store.clone()), Arc::new(self.auth.clone()))
    }

    pub fn edit_editor(&self, id: &str) -> BookEditor {
        let record = self.record(id);
        BookEditor::for_edit(Arc::new(self.store.clone()), Some(&record))
            .expect("editor should open")
    }
}
