use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use driverconnect_engine::{
    GroupState, NavTree, NotificationChannel, NotificationFeed, load_menu_sources, rebuild_menu, resolve_permissions,
};
use driverconnect_store::InMemoryStore;
use driverconnect_tui::ConsoleContext;
use driverconnect_types::Session;
use driverconnect_util::{ConsoleConfig, data_dir, format_relative};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "driverconnect.log";

#[derive(Debug, Parser)]
#[command(name = "driverconnect", version, about = "DriverConnect admin console")]
struct Cli {
    /// JSON seed for the in-memory document store. Overrides the config file
    /// and DRIVERCONNECT_SEED.
    #[arg(long, global = true)]
    seed: Option<PathBuf>,
    /// Signed-in user id.
    #[arg(long, global = true, default_value = "demo-user")]
    uid: String,
    /// Role claim. Without one the role is read from users/<uid>.
    #[arg(long, global = true)]
    role: Option<String>,
    /// Location the console opens at.
    #[arg(long, default_value = "/")]
    url: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the menu as the user would see it.
    Menu {
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved page and table permissions.
    Permissions,
    /// List the user's notifications, newest first.
    Notifications {
        #[arg(long)]
        json: bool,
    },
    /// Mark one notification read.
    MarkRead { id: String },
    /// Mark every unread notification read.
    MarkAllRead,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.is_none())?;

    let config = ConsoleConfig::load().context("failed to load console config")?;
    let store = open_store(cli.seed.as_deref().or(config.seed_path.as_deref()))?;
    let session = Session::new(cli.uid.clone(), cli.role.clone());

    let Some(command) = cli.command else {
        debug!(url = %cli.url, "No command given; opening the console");
        return driverconnect_tui::run(ConsoleContext {
            store: Arc::new(store),
            session,
            config,
            initial_url: cli.url,
        })
        .await;
    };

    debug!(?command, uid = %session.uid, "Running command");
    match command {
        Command::Menu { json } => print_menu(&store, &session, json).await,
        Command::Permissions => {
            let permissions = resolve_permissions(&store, &session).await;
            println!("{}", serde_json::to_string_pretty(&permissions)?);
            Ok(())
        }
        Command::Notifications { json } => print_notifications(Arc::new(store), &session, json).await,
        Command::MarkRead { id } => {
            let channel = NotificationChannel::new(Arc::new(store), session.uid.clone());
            channel
                .mark_read(&id)
                .await
                .with_context(|| format!("failed to mark {id} read"))?;
            println!("Marked {id} read");
            Ok(())
        }
        Command::MarkAllRead => {
            let store = Arc::new(store);
            let feed = current_feed(Arc::clone(&store), &session).await?;
            let channel = NotificationChannel::new(store, session.uid.clone());
            let report = channel.mark_all_read(feed.items()).await;
            println!("Marked {} read", report.updated.len());
            for (id, error) in &report.failed {
                eprintln!("{id}: {error}");
            }
            if !report.is_complete() {
                bail!("{} notifications could not be marked read", report.failed.len());
            }
            Ok(())
        }
    }
}

/// Logs go to stderr for one-shot commands and to a file while the TUI owns
/// the terminal.
fn init_tracing(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if !to_file {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return Ok(());
    }

    let dir = data_dir();
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn open_store(seed: Option<&Path>) -> Result<InMemoryStore> {
    let Some(seed) = seed else {
        bail!("no document seed configured; pass --seed or set DRIVERCONNECT_SEED");
    };
    InMemoryStore::from_seed_path(seed).with_context(|| format!("failed to load seed {}", seed.display()))
}

async fn print_menu(store: &InMemoryStore, session: &Session, json: bool) -> Result<()> {
    let permissions = resolve_permissions(store, session).await;
    let (groups, items) = load_menu_sources(store).await.context("failed to load the menu")?;
    let menu = rebuild_menu(&groups, &items, &permissions.pages);
    let nav = NavTree::fresh(&menu);
    let visible = nav.visible_groups(&menu, &permissions);

    if json {
        let groups: Vec<_> = visible
            .iter()
            .map(|group| {
                serde_json::json!({
                    "typeName": group.type_name,
                    "icon": group.icon,
                    "items": group.items,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No menu entries for {}", session.uid);
    }
    for group in visible {
        let marker = if group.state == GroupState::Expanded { "▾" } else { "▸" };
        println!("{marker} {} {}", group.icon.glyph(), group.type_name);
        for item in group.items {
            println!("    {} {}  {}", item.icon().glyph(), item.title, item.url.as_deref().unwrap_or("-"));
        }
    }
    Ok(())
}

async fn current_feed(store: Arc<InMemoryStore>, session: &Session) -> Result<NotificationFeed> {
    let channel = NotificationChannel::new(store, session.uid.clone());
    let mut subscription = channel.subscribe().await.context("failed to subscribe to notifications")?;
    let snapshot = subscription.next().await.context("notification subscription closed")?;
    let mut feed = NotificationFeed::new();
    feed.apply_snapshot(&snapshot);
    Ok(feed)
}

async fn print_notifications(store: Arc<InMemoryStore>, session: &Session, json: bool) -> Result<()> {
    let feed = current_feed(store, session).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(feed.items())?);
        return Ok(());
    }
    let now = Utc::now();
    for notification in feed.items() {
        let marker = if notification.read { "○" } else { "●" };
        println!(
            "{marker} {:<12} {}  ({})",
            notification.id,
            notification.title,
            format_relative(notification.created_at, now)
        );
    }
    println!("{} unread", feed.unread_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["driverconnect", "--uid", "u1"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.url, "/");
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::parse_from(["driverconnect", "mark-read", "n1", "--role", "dispatcher"]);
        assert_eq!(cli.role.as_deref(), Some("dispatcher"));
        assert!(matches!(cli.command, Some(Command::MarkRead { ref id }) if id == "n1"));
    }

    #[test]
    fn missing_seed_is_an_error() {
        assert!(open_store(None).is_err());
    }
}
