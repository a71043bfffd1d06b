//! Shared type definitions for the DriverConnect console.
//!
//! These records mirror the documents held in the backing document store
//! (`menu`, `menugroups`, `roles`, `notifications`, `users`). Field names on
//! the wire are camelCase; Rust-side names follow snake_case.

mod icon;
mod menu;
mod notification;
mod permissions;

pub use icon::Icon;
pub use menu::{GroupedMenu, MenuGroup, MenuItem};
pub use notification::Notification;
pub use permissions::{ParseTableActionError, Permissions, RoleRecord, TableAction};

/// Collection names used by the console.
pub mod collections {
    pub const MENU: &str = "menu";
    pub const MENU_GROUPS: &str = "menugroups";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const ROLES: &str = "roles";
    pub const USERS: &str = "users";
}

/// The signed-in identity the console works on behalf of.
///
/// `role_claim` carries the raw role string from the auth provider's custom
/// claims, when the provider supplied one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub role_claim: Option<String>,
}

impl Session {
    pub fn new(uid: impl Into<String>, role_claim: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            role_claim: role_claim.filter(|role| !role.trim().is_empty()),
        }
    }
}
