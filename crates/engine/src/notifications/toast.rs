use std::time::{Duration, Instant};

use super::Arrival;

/// A transient message announcing new notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    shown_at: Instant,
    ttl: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
            ttl,
        }
    }

    /// Names the first new notification; further arrivals are summarized.
    pub fn for_arrival(arrival: &Arrival, ttl: Duration) -> Option<Self> {
        let headline = arrival.headline()?;
        let headline = if headline.trim().is_empty() { "New notification" } else { headline };
        let message = match arrival.added.len() {
            1 => headline.to_string(),
            count => format!("{headline} (+{} more)", count - 1),
        };
        Some(Self::new(message, ttl))
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
