//! UI layer: components, the main view, the runtime loop, and theming.

pub mod components;
pub mod main_view;
pub mod runtime;
pub mod theme;
pub mod utils;
