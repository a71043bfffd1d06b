use std::sync::Arc;

use driverconnect_store::{Direction, DocumentStore, Fields, Query, StoreError, Subscription};
use driverconnect_types::{Notification, collections};
use serde_json::Value;
use tracing::{error, info, warn};

/// Outcome of a mark-all-read pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkAllReport {
    pub updated: Vec<String>,
    /// Ids whose write failed, with the error message.
    pub failed: Vec<(String, String)>,
}

impl MarkAllReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Store access for one user's notifications.
pub struct NotificationChannel<S: ?Sized> {
    store: Arc<S>,
    uid: String,
}

impl<S: ?Sized> Clone for NotificationChannel<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            uid: self.uid.clone(),
        }
    }
}

impl<S> NotificationChannel<S>
where
    S: DocumentStore + ?Sized,
{
    pub fn new(store: Arc<S>, uid: impl Into<String>) -> Self {
        Self { store, uid: uid.into() }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// The live query: this user's notifications, newest first.
    pub fn query(&self) -> Query {
        Query::collection(collections::NOTIFICATIONS)
            .where_eq("recipientUid", self.uid.as_str())
            .order_by("createdAt", Direction::Descending)
    }

    pub async fn subscribe(&self) -> Result<Subscription, StoreError> {
        let subscription = self.store.subscribe(self.query()).await?;
        info!(uid = %self.uid, "Subscribed to notifications");
        Ok(subscription)
    }

    pub async fn mark_read(&self, id: &str) -> Result<(), StoreError> {
        self.set_read(id, true).await
    }

    /// Writes the `read` flag. The change reaches the UI through the next
    /// subscription snapshot, not through local state.
    pub async fn set_read(&self, id: &str, read: bool) -> Result<(), StoreError> {
        let mut fields = Fields::new();
        fields.insert("read".to_string(), Value::Bool(read));
        self.store
            .update(collections::NOTIFICATIONS, id, fields)
            .await
            .inspect_err(|error| error!(id = %id, read, error = %error, "Failed to update notification"))
    }

    /// Marks every unread notification in `notifications` as read, one write
    /// at a time. A failed write is logged and does not stop the rest.
    pub async fn mark_all_read(&self, notifications: &[Notification]) -> MarkAllReport {
        let mut report = MarkAllReport::default();
        for notification in notifications.iter().filter(|n| n.is_unread()) {
            match self.mark_read(&notification.id).await {
                Ok(()) => report.updated.push(notification.id.clone()),
                Err(error) => report.failed.push((notification.id.clone(), error.to_string())),
            }
        }
        if report.is_complete() {
            info!(updated = report.updated.len(), "Marked all notifications read");
        } else {
            warn!(
                updated = report.updated.len(),
                failed = report.failed.len(),
                "Some notifications could not be marked read"
            );
        }
        report
    }
}
