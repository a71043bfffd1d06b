use std::collections::HashSet;

use driverconnect_types::Notification;

/// Notifications present in a snapshot that were absent from the one before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrival {
    pub added: Vec<Notification>,
}

impl Arrival {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }

    /// Title of the first new notification, used for the toast.
    pub fn headline(&self) -> Option<&str> {
        self.added.first().map(|notification| notification.title.as_str())
    }
}

/// Compares two consecutive snapshots by document id.
///
/// An empty `previous` (first load) never yields arrivals, so subscribing
/// does not alert for everything already in the list.
pub fn diff_notifications(previous: &[Notification], current: &[Notification]) -> Arrival {
    if previous.is_empty() {
        return Arrival::default();
    }
    let known: HashSet<&str> = previous.iter().map(|notification| notification.id.as_str()).collect();
    Arrival {
        added: current
            .iter()
            .filter(|notification| !known.contains(notification.id.as_str()))
            .cloned()
            .collect(),
    }
}

/// Unread, non-archived notifications in `notifications`.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|notification| notification.is_unread()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: &str, read: bool) -> Notification {
        Notification {
            id: id.into(),
            recipient_uid: "u1".into(),
            title: format!("title {id}"),
            body: String::new(),
            read,
            archived: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn first_snapshot_never_arrives() {
        assert!(diff_notifications(&[], &[note("a", false)]).is_empty());
    }

    #[test]
    fn new_ids_arrive_in_snapshot_order() {
        let previous = vec![note("a", false)];
        let current = vec![note("c", false), note("b", false), note("a", false)];
        let arrival = diff_notifications(&previous, &current);
        let ids: Vec<_> = arrival.added.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert_eq!(arrival.headline(), Some("title c"));
    }

    #[test]
    fn changed_fields_on_known_ids_are_not_arrivals() {
        let previous = vec![note("a", false)];
        let current = vec![note("a", true)];
        assert!(diff_notifications(&previous, &current).is_empty());
    }

    #[test]
    fn unread_count_skips_read_and_archived() {
        let mut archived = note("c", false);
        archived.archived = true;
        assert_eq!(unread_count(&[note("a", false), note("b", true), archived]), 1);
    }
}
