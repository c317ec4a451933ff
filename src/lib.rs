//! Bookshelf - view-models for a personal reading list
//!
//! The crate holds the client-side core of a reading-list app: a live,
//! owner-scoped book list with search, genre filter and counts, and an
//! add/edit form that asks for a rating before a book is stored as
//! finished. Backends plug in through the traits in [`traits`]; an
//! in-memory implementation lives in [`adapters::memory`].

pub mod adapters;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod traits;
pub mod view_state;
