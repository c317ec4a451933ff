//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`InMemoryAuth`] - In-process auth provider
//! - [`InMemoryBookStore`] - In-process document store with live queries
//!
//! The hosted backend is reached through adapters implementing the same
//! traits; the core only ever sees `crate::traits`.

pub mod memory;

pub use memory::{InMemoryAuth, InMemoryBookStore};
