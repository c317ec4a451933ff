//! Trait abstractions for the managed backend.
//!
//! The core never talks to the backend directly. It depends on these two
//! seams, which production code implements over the hosted services and
//! tests implement with [`crate::adapters::memory`].
//!
//! # Traits
//!
//! - [`AuthProvider`] - Session lookup, sign-in, sign-up and sign-out
//! - [`BookStore`] - Owner-scoped live queries and book writes

pub mod auth;
pub mod book_store;

pub use auth::AuthProvider;
pub use book_store::{
    BookStore, LiveQuery, SnapshotEvent, SnapshotStream, SubscriptionHandle, SubscriptionWatch,
};
