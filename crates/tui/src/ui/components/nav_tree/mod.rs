//! Grouped navigation tree.
//!
//! Full mode lists every non-empty group with its items under it when
//! expanded. Minimized mode shows one icon per group; hovering an icon (or
//! pressing Enter on it) opens a flyout listing that group's items.

mod nav_tree_component;
mod state;

pub use nav_tree_component::NavTreeComponent;
pub use state::{NavRow, NavTreeState, flyout_rows, nav_rows};
