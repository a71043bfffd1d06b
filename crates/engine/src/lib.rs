//! # DriverConnect Engine
//!
//! The console's behaviour, independent of any renderer:
//!
//! - **`permissions`**: resolves a session's role claim to the pages and
//!   table actions it grants, failing closed.
//! - **`menu`**: groups menu items under their groups, filters them by page
//!   permission, and memoizes the result; async loads are guarded by a
//!   generation number so a superseded load never overwrites a newer one.
//! - **`nav`**: expand/collapse state, "toggle all", minimized-panel flyouts,
//!   and URL-based selection for the navigation tree.
//! - **`notifications`**: the live notification feed (snapshot diffing,
//!   unread counting, arrival alerts), read-marking writes, the alert sound
//!   state machine, the "View More" pager, and transient toasts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let permissions = resolve_permissions(&store, &session).await;
//! let (groups, items) = load_menu_sources(&store).await?;
//! let menu = rebuild_menu(&groups, &items, &permissions.pages);
//! let nav = NavTree::fresh(&menu);
//! ```

pub mod menu;
pub mod nav;
pub mod notifications;
pub mod permissions;

pub use menu::{MenuController, load_menu_sources, rebuild_menu, summarize};
pub use nav::{GroupState, NavTree, VisibleGroup, is_item_selected};
pub use notifications::{
    AlertPlayer, AlertState, Arrival, AudioSink, MarkAllReport, NotificationChannel, NotificationFeed, PlaybackError, Toast,
    ViewMore, diff_notifications, unread_count,
};
pub use permissions::{permissions_from_role, resolve_permissions};
