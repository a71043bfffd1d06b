//! Notification bell and panel.
//!
//! The bell shows the unread count. The panel lists the loaded notifications
//! newest first, a page at a time, with a trailing "View More" row while
//! more are loaded than shown.

mod notifications_component;
mod state;

pub use notifications_component::NotificationsComponent;
pub use state::{NotificationsState, PanelRow};
