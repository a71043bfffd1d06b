use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use driverconnect_engine::{NotificationChannel, NotificationFeed, ViewMore};
use driverconnect_store::{Document, DocumentStore, Fields, InMemoryStore, Query, StoreError, Subscription};
use serde_json::json;

const SEED: &str = r#"{
    "notifications": [
        { "id": "n1", "recipientUid": "u1", "title": "Tow assigned", "read": false, "createdAt": "2024-05-01T10:00:00Z" },
        { "id": "n2", "recipientUid": "u1", "title": "Payment received", "read": false, "createdAt": "2024-05-02T10:00:00Z" },
        { "id": "n3", "recipientUid": "u1", "title": "Driver onboarded", "read": false, "createdAt": "2024-05-03T10:00:00Z" },
        { "id": "old", "recipientUid": "u1", "title": "Archived", "read": false, "archived": true, "createdAt": "2024-05-04T10:00:00Z" },
        { "id": "other", "recipientUid": "u2", "title": "Not yours", "read": false, "createdAt": "2024-05-05T10:00:00Z" }
    ]
}"#;

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().unwrap_or_default()
}

/// Delegates to an in-memory store but rejects the update numbered `fail_on`.
struct FlakyStore {
    inner: InMemoryStore,
    updates: AtomicUsize,
    fail_on: usize,
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        self.inner.query(query).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let attempt = self.updates.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(StoreError::rejected(collection, id, "permission denied"));
        }
        self.inner.update(collection, id, fields).await
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.inner.set_merge(collection, id, fields).await
    }

    async fn subscribe(&self, query: Query) -> Result<Subscription, StoreError> {
        self.inner.subscribe(query).await
    }
}

async fn read_flag(store: &InMemoryStore, id: &str) -> bool {
    store
        .get("notifications", id)
        .await
        .expect("get")
        .and_then(|doc| doc.get("read").and_then(|value| value.as_bool()))
        .unwrap_or(false)
}

#[tokio::test]
async fn subscription_feeds_only_the_users_live_notifications_newest_first() {
    let store = Arc::new(InMemoryStore::from_seed_str(SEED).expect("seed"));
    let channel = NotificationChannel::new(Arc::clone(&store), "u1");
    let mut subscription = channel.subscribe().await.expect("subscribe");
    let mut feed = NotificationFeed::new();

    let initial = subscription.next().await.expect("initial");
    assert!(feed.apply_snapshot(&initial).is_none());
    let ids: Vec<_> = feed.items().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["n3", "n2", "n1"]);
    assert_eq!(feed.unread_count(), 3);

    store
        .insert(
            "notifications",
            "n4",
            fields(json!({ "recipientUid": "u1", "title": "Tow #42 dispatched", "createdAt": "2024-05-06T10:00:00Z" })),
        )
        .expect("insert");
    let next = subscription.next().await.expect("next");
    let arrival = feed.apply_snapshot(&next).expect("arrival");
    assert_eq!(arrival.headline(), Some("Tow #42 dispatched"));
    assert_eq!(feed.unread_count(), 4);
}

#[tokio::test]
async fn mark_read_is_reflected_by_the_next_snapshot() {
    let store = Arc::new(InMemoryStore::from_seed_str(SEED).expect("seed"));
    let channel = NotificationChannel::new(Arc::clone(&store), "u1");
    let mut subscription = channel.subscribe().await.expect("subscribe");
    let mut feed = NotificationFeed::new();
    feed.apply_snapshot(&subscription.next().await.expect("initial"));

    channel.mark_read("n2").await.expect("mark read");
    feed.apply_snapshot(&subscription.next().await.expect("snapshot"));
    assert_eq!(feed.unread_count(), 2);

    channel.set_read("n2", false).await.expect("mark unread");
    feed.apply_snapshot(&subscription.next().await.expect("snapshot"));
    assert_eq!(feed.unread_count(), 3);
}

#[tokio::test]
async fn mark_read_on_a_missing_document_reports_the_error() {
    let store = Arc::new(InMemoryStore::from_seed_str(SEED).expect("seed"));
    let channel = NotificationChannel::new(store, "u1");
    let error = channel.mark_read("ghost").await.unwrap_err();
    assert!(matches!(error, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn mark_all_read_continues_past_a_failed_write() {
    let inner = InMemoryStore::from_seed_str(SEED).expect("seed");
    let store = Arc::new(FlakyStore {
        inner: inner.clone(),
        updates: AtomicUsize::new(0),
        fail_on: 2,
    });
    let channel = NotificationChannel::new(Arc::clone(&store), "u1");
    let mut subscription = channel.subscribe().await.expect("subscribe");
    let mut feed = NotificationFeed::new();
    feed.apply_snapshot(&subscription.next().await.expect("initial"));

    let report = channel.mark_all_read(feed.items()).await;
    assert_eq!(report.updated, vec!["n3".to_string(), "n1".to_string()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "n2");
    assert!(!report.is_complete());

    assert!(read_flag(&inner, "n3").await);
    assert!(!read_flag(&inner, "n2").await);
    assert!(read_flag(&inner, "n1").await);
    assert_eq!(store.updates.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn mark_all_read_skips_notifications_already_read() {
    let store = Arc::new(InMemoryStore::from_seed_str(SEED).expect("seed"));
    store
        .insert("notifications", "n1", fields(json!({ "read": true })))
        .expect("insert");
    let channel = NotificationChannel::new(Arc::clone(&store), "u1");
    let mut feed = NotificationFeed::new();
    let snapshot = store.query(&channel.query()).await.expect("query");
    feed.apply_snapshot(&snapshot);

    let report = channel.mark_all_read(feed.items()).await;
    assert_eq!(report.updated, vec!["n3".to_string(), "n2".to_string()]);
    assert!(report.is_complete());
}

#[tokio::test]
async fn view_more_pages_through_the_loaded_feed() {
    let store = Arc::new(InMemoryStore::from_seed_str(SEED).expect("seed"));
    let channel = NotificationChannel::new(Arc::clone(&store), "u1");
    let mut feed = NotificationFeed::new();
    feed.apply_snapshot(&store.query(&channel.query()).await.expect("query"));

    let mut pager = ViewMore::new(2);
    assert_eq!(pager.window(feed.items()).len(), 2);
    assert!(pager.advance(feed.items().len()));
    assert_eq!(pager.window(feed.items()).len(), 3);
    assert!(!pager.has_more(feed.items().len()));
}
