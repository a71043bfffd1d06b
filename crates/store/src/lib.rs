//! Document store contract for the DriverConnect console.
//!
//! The console never talks to a concrete database directly. Everything it
//! reads or writes goes through [`DocumentStore`]: ordered and filtered
//! queries, single-document reads, merge/update writes, and realtime
//! subscriptions that deliver the full query result on every change.
//!
//! [`InMemoryStore`] is the implementation shipped with the console; it can be
//! seeded from a JSON file and is what the tests run against.

mod document;
mod error;
mod memory;
mod subscription;

use async_trait::async_trait;

pub use document::{Direction, Document, Fields, Query};
pub use error::StoreError;
pub use memory::InMemoryStore;
pub use subscription::Subscription;

/// Access to a collection-oriented document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs `query` once and returns the matching documents in query order.
    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Reads a single document.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Merges `fields` into an existing document; fails with
    /// [`StoreError::NotFound`] when it does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Merges `fields` into a document, creating it when absent.
    async fn set_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Subscribes to `query`. The first snapshot is delivered immediately,
    /// then one full snapshot per change to the queried collection.
    async fn subscribe(&self, query: Query) -> Result<Subscription, StoreError>;
}
