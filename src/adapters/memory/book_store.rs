//! In-memory book store with live queries.
//!
//! Behaves like the hosted document store at the [`BookStore`] seam: every
//! live query gets the owner's full result set immediately and again after
//! each write, in insertion order. Tests can pause propagation to simulate
//! lag, inject raw snapshots, fail writes, and fail live queries.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::lock;
use crate::config::BackendConfig;
use crate::error::{PersistenceError, SubscriptionError, WriteOp};
use crate::models::{BookRecord, BookUpdate, NewBook};
use crate::traits::{
    BookStore, LiveQuery, SnapshotEvent, SnapshotStream, SubscriptionHandle, SubscriptionWatch,
};

struct Subscriber {
    owner_id: String,
    tx: mpsc::UnboundedSender<SnapshotEvent>,
    watch: SubscriptionWatch,
}

impl Subscriber {
    /// Push to this subscriber. Returns false once it should be forgotten.
    fn push(&self, event: SnapshotEvent) -> bool {
        self.watch.is_active() && self.tx.send(event).is_ok()
    }
}

#[derive(Default)]
struct StoreState {
    records: Vec<BookRecord>,
    subscribers: Vec<Subscriber>,
    paused: bool,
    dirty_while_paused: bool,
    create_should_fail: bool,
    update_should_fail: bool,
    delete_should_fail: bool,
    write_count: usize,
}

impl StoreState {
    fn snapshot_for(&self, owner_id: &str) -> Vec<BookRecord> {
        self.records
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect()
    }

    fn broadcast(&mut self) {
        if self.paused {
            self.dirty_while_paused = true;
            return;
        }
        let snapshots: Vec<Vec<BookRecord>> = self
            .subscribers
            .iter()
            .map(|s| self.snapshot_for(&s.owner_id))
            .collect();
        let mut snapshots = snapshots.into_iter();
        self.subscribers.retain(|s| match snapshots.next() {
            Some(books) => s.push(Ok(books)),
            None => false,
        });
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

/// In-memory book store.
///
/// # Example
///
/// ```ignore
/// use bookshelf::adapters::memory::InMemoryBookStore;
/// use bookshelf::traits::BookStore;
///
/// let store = InMemoryBookStore::new();
/// let mut query = store.subscribe("user-1");
/// let first = query.snapshots.recv().await; // current result set
/// store.create(NewBook::unread("Dune", "Herbert", Genre::Novel, "user-1")).await?;
/// let second = query.snapshots.recv().await; // now contains Dune
/// ```
#[derive(Clone)]
pub struct InMemoryBookStore {
    state: Arc<Mutex<StoreState>>,
    project_id: String,
    collection: String,
}

impl InMemoryBookStore {
    /// Create an empty store using default config.
    pub fn new() -> Self {
        Self::with_config(&BackendConfig::default())
    }

    pub fn with_config(config: &BackendConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            project_id: config.project_id.clone(),
            collection: config.books_collection.clone(),
        }
    }

    /// Project the store stands in for; only used to label logs.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Name of the collection this store stands in for.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Insert a record directly, notifying live queries. Returns its id.
    pub fn seed(&self, book: NewBook) -> String {
        let id = Uuid::new_v4().to_string();
        let mut state = lock(&self.state);
        state.records.push(book.into_record(id.clone()));
        state.broadcast();
        id
    }

    /// All stored records, in insertion order.
    pub fn records(&self) -> Vec<BookRecord> {
        lock(&self.state).records.clone()
    }

    pub fn record(&self, id: &str) -> Option<BookRecord> {
        let state = lock(&self.state);
        state.position(id).map(|i| state.records[i].clone())
    }

    /// Number of successful create/update/delete calls.
    pub fn write_count(&self) -> usize {
        lock(&self.state).write_count
    }

    /// Number of live queries still registered.
    pub fn subscriber_count(&self) -> usize {
        let mut state = lock(&self.state);
        state.subscribers.retain(|s| s.watch.is_active() && !s.tx.is_closed());
        state.subscribers.len()
    }

    /// Configure whether create should fail.
    pub fn set_create_should_fail(&self, should_fail: bool) {
        lock(&self.state).create_should_fail = should_fail;
    }

    /// Configure whether update should fail.
    pub fn set_update_should_fail(&self, should_fail: bool) {
        lock(&self.state).update_should_fail = should_fail;
    }

    /// Configure whether delete should fail.
    pub fn set_delete_should_fail(&self, should_fail: bool) {
        lock(&self.state).delete_should_fail = should_fail;
    }

    /// Hold back snapshot pushes; writes still apply.
    pub fn pause_propagation(&self) {
        lock(&self.state).paused = true;
    }

    /// Resume pushes, sending one catch-up snapshot if anything changed.
    pub fn resume_propagation(&self) {
        let mut state = lock(&self.state);
        state.paused = false;
        if std::mem::take(&mut state.dirty_while_paused) {
            state.broadcast();
        }
    }

    /// Push an arbitrary result set to every live query of `owner_id`,
    /// regardless of what is stored.
    pub fn push_snapshot(&self, owner_id: &str, books: Vec<BookRecord>) {
        let mut state = lock(&self.state);
        state.subscribers.retain(|s| {
            if s.owner_id != owner_id {
                return true;
            }
            s.push(Ok(books.clone()))
        });
    }

    /// End every live query with an error.
    pub fn fail_live_queries(&self, message: &str) {
        let mut state = lock(&self.state);
        for subscriber in state.subscribers.drain(..) {
            let _ = subscriber.push(Err(SubscriptionError::new(message)));
        }
        tracing::debug!(
            project_id = %self.project_id,
            collection = %self.collection,
            message,
            "live queries failed"
        );
    }
}

impl Default for InMemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    fn subscribe(&self, owner_id: &str) -> LiveQuery {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = SubscriptionHandle::new();
        let subscriber = Subscriber {
            owner_id: owner_id.to_string(),
            tx,
            watch: handle.watch(),
        };

        let mut state = lock(&self.state);
        let initial = state.snapshot_for(owner_id);
        if subscriber.push(Ok(initial)) {
            state.subscribers.push(subscriber);
        }
        tracing::debug!(
            project_id = %self.project_id,
            collection = %self.collection,
            owner_id,
            "live query opened"
        );

        LiveQuery {
            snapshots: SnapshotStream::new(rx),
            handle,
        }
    }

    async fn create(&self, book: NewBook) -> Result<String, PersistenceError> {
        let mut state = lock(&self.state);
        if state.create_should_fail {
            return Err(PersistenceError::rejected(WriteOp::Create, "mock create failure"));
        }

        let id = Uuid::new_v4().to_string();
        state.records.push(book.into_record(id.clone()));
        state.write_count += 1;
        state.broadcast();
        Ok(id)
    }

    async fn update(&self, id: &str, update: BookUpdate) -> Result<(), PersistenceError> {
        let mut state = lock(&self.state);
        if state.update_should_fail {
            return Err(PersistenceError::rejected(WriteOp::Update, "mock update failure"));
        }

        let index = state
            .position(id)
            .ok_or_else(|| PersistenceError::MissingDocument {
                op: WriteOp::Update,
                id: id.to_string(),
            })?;
        state.records[index].apply(&update);
        state.write_count += 1;
        state.broadcast();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), PersistenceError> {
        let mut state = lock(&self.state);
        if state.delete_should_fail {
            return Err(PersistenceError::rejected(WriteOp::Delete, "mock delete failure"));
        }

        let index = state
            .position(id)
            .ok_or_else(|| PersistenceError::MissingDocument {
                op: WriteOp::Delete,
                id: id.to_string(),
            })?;
        state.records.remove(index);
        state.write_count += 1;
        state.broadcast();
        Ok(())
    }
}
