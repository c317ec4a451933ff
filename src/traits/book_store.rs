//! Book store trait abstraction.
//!
//! Wraps the document database: owner-scoped live queries plus create,
//! update and delete by id. A live query pushes the full, current result set
//! on every change; there is no incremental patching at this seam.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

use crate::error::{PersistenceError, SubscriptionError};
use crate::models::{BookRecord, BookUpdate, NewBook};

/// One push from a live query: the full result set, or the error that ended
/// the query.
pub type SnapshotEvent = Result<Vec<BookRecord>, SubscriptionError>;

/// Owning handle of a live query.
///
/// Dropping the handle, or calling [`cancel`](Self::cancel), stops delivery.
/// Tie it to the lifetime of the screen that consumes the query.
#[must_use = "dropping the handle cancels the subscription"]
#[derive(Debug)]
pub struct SubscriptionHandle {
    live: Arc<AtomicBool>,
}

impl SubscriptionHandle {
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// A read-only view of this handle's liveness.
    pub fn watch(&self) -> SubscriptionWatch {
        SubscriptionWatch {
            live: Arc::clone(&self.live),
        }
    }

    pub fn is_active(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Stop delivery. Idempotent.
    pub fn cancel(&self) {
        self.live.store(false, Ordering::Release);
    }
}

impl Default for SubscriptionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Shared, read-only liveness flag of a [`SubscriptionHandle`].
///
/// Held by the provider (to stop pushing) and by the consumer (to drop
/// snapshots that were already in flight when the handle went away).
#[derive(Debug, Clone)]
pub struct SubscriptionWatch {
    live: Arc<AtomicBool>,
}

impl SubscriptionWatch {
    pub fn is_active(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Stream of snapshot pushes from one live query.
#[derive(Debug)]
pub struct SnapshotStream {
    rx: mpsc::UnboundedReceiver<SnapshotEvent>,
}

impl SnapshotStream {
    pub fn new(rx: mpsc::UnboundedReceiver<SnapshotEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next push. `None` once the provider closed the query.
    pub async fn recv(&mut self) -> Option<SnapshotEvent> {
        self.rx.recv().await
    }

    /// Take a push that has already been delivered, without waiting.
    pub fn try_recv(&mut self) -> Option<SnapshotEvent> {
        self.rx.try_recv().ok()
    }
}

impl Stream for SnapshotStream {
    type Item = SnapshotEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// A live, owner-scoped query: the push stream plus its cancel handle.
#[derive(Debug)]
pub struct LiveQuery {
    pub snapshots: SnapshotStream,
    pub handle: SubscriptionHandle,
}

/// Trait for the document store holding book records.
///
/// # Example
///
/// ```ignore
/// use bookshelf::traits::BookStore;
/// use futures::StreamExt;
///
/// let LiveQuery { mut snapshots, handle } = store.subscribe("user-1");
/// while let Some(Ok(books)) = snapshots.next().await {
///     println!("{} books", books.len());
/// }
/// drop(handle);
/// ```
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Start a live query for every record whose owner is `owner_id`.
    ///
    /// The provider pushes the current result set right away and again after
    /// every change, until the handle is cancelled or an error ends the query.
    fn subscribe(&self, owner_id: &str) -> LiveQuery;

    /// Create a record and return its new id.
    async fn create(&self, book: NewBook) -> Result<String, PersistenceError>;

    /// Replace the updatable fields of the record `id`.
    async fn update(&self, id: &str, update: BookUpdate) -> Result<(), PersistenceError>;

    /// Delete the record `id`.
    async fn delete(&self, id: &str) -> Result<(), PersistenceError>;
}
