//! In-process backend implementing both trait seams.
//!
//! - [`InMemoryAuth`] - Accounts and session in memory
//! - [`InMemoryBookStore`] - Books with owner-scoped live queries
//!
//! Both expose knobs for failure injection so tests can drive every error
//! path of the view-models.

pub mod auth;
pub mod book_store;

pub use auth::InMemoryAuth;
pub use book_store::InMemoryBookStore;

use std::sync::{Mutex, MutexGuard};

/// Lock ignoring poisoning; the guarded state stays usable after a panic in
/// another test thread.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
