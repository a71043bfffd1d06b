use driverconnect_store::Document;
use driverconnect_types::Notification;
use tracing::{debug, warn};

use super::diff::{Arrival, diff_notifications, unread_count};

/// The materialized notification list for one subscription.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    unread: usize,
    snapshots: usize,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a raw store snapshot. Undecodable documents are logged and
    /// skipped.
    pub fn apply_snapshot(&mut self, documents: &[Document]) -> Option<Arrival> {
        let notifications = documents
            .iter()
            .filter_map(|document| match document.decode::<Notification>() {
                Ok(notification) => Some(notification),
                Err(error) => {
                    warn!(id = %document.id, error = %error, "Skipping undecodable notification");
                    None
                }
            })
            .collect();
        self.apply(notifications)
    }

    /// Replaces the list with `notifications` (minus archived ones) and
    /// returns what arrived since the previous snapshot, if anything did.
    pub fn apply(&mut self, notifications: Vec<Notification>) -> Option<Arrival> {
        let current: Vec<Notification> = notifications.into_iter().filter(|n| !n.archived).collect();
        let arrival = diff_notifications(&self.items, &current);
        self.unread = unread_count(&current);
        self.items = current;
        self.snapshots += 1;
        debug!(
            total = self.items.len(),
            unread = self.unread,
            arrived = arrival.added.len(),
            "Applied notification snapshot"
        );
        (!arrival.is_empty()).then_some(arrival)
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|notification| notification.id == id)
    }

    /// Currently visible unread notifications, newest first.
    pub fn unread(&self) -> Vec<Notification> {
        self.items.iter().filter(|n| n.is_unread()).cloned().collect()
    }

    /// Whether any snapshot has been applied yet.
    pub fn is_loaded(&self) -> bool {
        self.snapshots > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: &str) -> Notification {
        Notification {
            id: id.into(),
            recipient_uid: "u1".into(),
            title: id.to_uppercase(),
            body: String::new(),
            read: false,
            archived: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn alerts_only_after_the_first_non_empty_snapshot() {
        let mut feed = NotificationFeed::new();
        assert!(feed.apply(vec![]).is_none());
        assert!(feed.apply(vec![note("a")]).is_none());
        let arrival = feed.apply(vec![note("a"), note("b")]).expect("b arrives");
        assert_eq!(arrival.headline(), Some("B"));
    }

    #[test]
    fn archived_documents_are_excluded_entirely() {
        let mut feed = NotificationFeed::new();
        let mut archived = note("x");
        archived.archived = true;
        feed.apply(vec![note("a"), archived.clone()]);
        assert_eq!(feed.items().len(), 1);
        assert!(feed.get("x").is_none());
        assert_eq!(feed.unread_count(), 1);

        // An archived document is never an arrival either.
        let mut fresh_archived = note("y");
        fresh_archived.archived = true;
        assert!(feed.apply(vec![note("a"), archived, fresh_archived]).is_none());
    }

    #[test]
    fn toggling_read_moves_the_count_by_one() {
        let mut feed = NotificationFeed::new();
        feed.apply(vec![note("a"), note("b")]);
        assert_eq!(feed.unread_count(), 2);

        let mut read = note("a");
        read.read = true;
        feed.apply(vec![read, note("b")]);
        assert_eq!(feed.unread_count(), 1);

        feed.apply(vec![note("a"), note("b")]);
        assert_eq!(feed.unread_count(), 2);
    }
}
