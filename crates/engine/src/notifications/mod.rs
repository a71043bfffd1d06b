//! Live notifications for the signed-in user.
//!
//! The store subscription delivers full snapshots. [`NotificationFeed`]
//! materializes each one (archived documents never enter the list), keeps the
//! unread count, and reports what arrived since the previous snapshot.
//! Arrivals drive an [`AlertPlayer`] and a [`Toast`]; [`NotificationChannel`]
//! performs the read-marking writes.

mod alert;
mod channel;
mod diff;
mod feed;
mod pager;
mod toast;

pub use alert::{AlertPlayer, AlertState, AudioSink, PlaybackError};
pub use channel::{MarkAllReport, NotificationChannel};
pub use diff::{Arrival, diff_notifications, unread_count};
pub use feed::NotificationFeed;
pub use pager::ViewMore;
pub use toast::Toast;
