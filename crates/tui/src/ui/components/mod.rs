//! UI components: navigation tree, notification panel, toast.

pub mod component;
pub mod nav_tree;
pub mod notifications;
pub mod toast;

pub use component::*;
pub use nav_tree::NavTreeComponent;
pub use notifications::NotificationsComponent;
pub use toast::ToastComponent;
