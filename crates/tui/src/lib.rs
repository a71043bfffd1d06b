//! # DriverConnect Console TUI
//!
//! Terminal front end for the DriverConnect admin console: a grouped,
//! permission-filtered navigation tree that can be minimized to icons with
//! hover flyouts, and a live notification bell with toasts, an alert sound,
//! read toggling, "mark all read", and "View More" paging.
//!
//! The UI follows a component model. [`App`](app::App) holds state;
//! components handle input and return effects; the runtime executes those
//! effects against the document store on background tasks and feeds results
//! back as messages.

mod app;
mod audio;
mod ui;

use anyhow::Result;

pub use ui::runtime::ConsoleContext;

/// Runs the console until the operator quits.
///
/// # Errors
///
/// Terminal setup or drawing failures. Store errors are shown in the UI and
/// never end the session.
pub async fn run(context: ConsoleContext) -> Result<()> {
    ui::runtime::run_app(context).await
}
