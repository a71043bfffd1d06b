//! In-memory [`DocumentStore`] with realtime fan-out.
//!
//! Collections keep insertion order so ordered queries stay stable for ties.
//! Every write re-evaluates the live queries on the touched collection and
//! pushes the full result to each subscriber; subscribers whose receiving end
//! has gone away are dropped on the next write.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{Document, DocumentStore, Fields, Query, StoreError, Subscription};

#[derive(Debug)]
struct Subscriber {
    query: Query,
    sender: mpsc::UnboundedSender<Vec<Document>>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, IndexMap<String, Document>>,
    subscribers: Vec<Subscriber>,
}

impl Inner {
    fn run(&self, query: &Query) -> Vec<Document> {
        self.collections
            .get(&query.collection)
            .map(|documents| query.apply(documents.values()))
            .unwrap_or_default()
    }

    fn write(&mut self, collection: &str, id: &str, fields: Fields) {
        let documents = self.collections.entry(collection.to_string()).or_default();
        match documents.get_mut(id) {
            Some(existing) => existing.fields.extend(fields),
            None => {
                documents.insert(id.to_string(), Document::new(id, fields));
            }
        }
        self.notify(collection);
    }

    fn notify(&mut self, collection: &str) {
        let subscribers = std::mem::take(&mut self.subscribers);
        self.subscribers = subscribers
            .into_iter()
            .filter(|subscriber| {
                if subscriber.query.collection == collection {
                    subscriber.sender.send(self.run(&subscriber.query)).is_ok()
                } else {
                    !subscriber.sender.is_closed()
                }
            })
            .collect();
    }
}

/// Thread-safe, cloneable in-memory document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a JSON seed of the form
    /// `{ "<collection>": [ { "id": "...", ...fields }, ... ], ... }`.
    pub fn from_seed_str(seed: &str) -> Result<Self, StoreError> {
        let collections: IndexMap<String, Vec<Fields>> = serde_json::from_str(seed)?;
        let store = Self::new();
        {
            let mut inner = store.lock()?;
            for (collection, documents) in collections {
                for mut fields in documents {
                    let id = match fields.remove("id") {
                        Some(Value::String(id)) if !id.is_empty() => id,
                        Some(Value::Number(number)) => number.to_string(),
                        _ => {
                            return Err(StoreError::InvalidSeed {
                                collection,
                                reason: "every document needs a non-empty \"id\"".to_string(),
                            });
                        }
                    };
                    inner.write(&collection, &id, fields);
                }
            }
        }
        Ok(store)
    }

    pub fn from_seed_path(path: &Path) -> Result<Self, StoreError> {
        let seed = std::fs::read_to_string(path)?;
        let store = Self::from_seed_str(&seed)?;
        info!(path = %path.display(), "Loaded document store seed");
        Ok(store)
    }

    /// Inserts or merges a document and notifies live queries.
    pub fn insert(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.lock()?.write(collection, id, fields);
        Ok(())
    }

    /// Removes a document and notifies live queries.
    pub fn remove(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let mut inner = self.lock()?;
        let removed = inner
            .collections
            .get_mut(collection)
            .and_then(|documents| documents.shift_remove(id));
        if removed.is_some() {
            inner.notify(collection);
        }
        Ok(removed)
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().map(|inner| inner.subscribers.len()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::unavailable("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        Ok(self.lock()?.run(query))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.collections.get(collection).and_then(|documents| documents.get(id)).cloned())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let exists = inner.collections.get(collection).is_some_and(|documents| documents.contains_key(id));
        if !exists {
            return Err(StoreError::not_found(collection, id));
        }
        inner.write(collection, id, fields);
        Ok(())
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.lock()?.write(collection, id, fields);
        Ok(())
    }

    async fn subscribe(&self, query: Query) -> Result<Subscription, StoreError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut inner = self.lock()?;
        // Receiver is still held here, so the initial send cannot fail.
        let _ = sender.send(inner.run(&query));
        debug!(collection = %query.collection, "Registered live query");
        inner.subscribers.push(Subscriber { query, sender });
        Ok(Subscription::new(receiver))
    }
}
