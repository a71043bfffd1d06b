//! Runtime: terminal lifecycle, the event loop, and effect execution.
//!
//! One `tokio::select!` loop multiplexes terminal input, messages produced by
//! background work, and a periodic tick that expires toasts. Effects returned
//! by components run as spawned tasks against the document store and report
//! back over the message channel, so the loop never waits on the store.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use driverconnect_engine::{NotificationChannel, load_menu_sources, resolve_permissions};
use driverconnect_store::DocumentStore;
use driverconnect_types::Session;
use driverconnect_util::ConsoleConfig;
use futures_util::StreamExt;
use ratatui::{Terminal, prelude::CrosstermBackend};
use tokio::{
    signal,
    sync::mpsc,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::app::{App, Effect, Msg};
use crate::ui::main_view::MainView;
use crate::ui::theme;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

type ConsoleTerminal = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Everything the console needs to start.
pub struct ConsoleContext {
    pub store: Arc<dyn DocumentStore>,
    pub session: Session,
    pub config: ConsoleConfig,
    /// Location shown at startup; selects the matching menu entry.
    pub initial_url: String,
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<ConsoleTerminal> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut ConsoleTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs effects against the store on background tasks.
struct EffectExecutor {
    store: Arc<dyn DocumentStore>,
    channel: NotificationChannel<dyn DocumentStore>,
    sender: mpsc::UnboundedSender<Msg>,
}

impl EffectExecutor {
    fn run_all(&self, app: &mut App, effects: Vec<Effect>) {
        for effect in effects {
            self.run(app, effect);
        }
    }

    fn run(&self, app: &mut App, effect: Effect) {
        debug!(?effect, "Running effect");
        match effect {
            Effect::Quit => app.should_quit = true,
            Effect::ResolvePermissions { generation } => {
                let store = Arc::clone(&self.store);
                let session = app.session.clone();
                self.spawn(async move {
                    let permissions = resolve_permissions(&*store, &session).await;
                    Msg::PermissionsResolved { generation, permissions }
                });
            }
            Effect::LoadMenu { generation } => {
                let store = Arc::clone(&self.store);
                self.spawn(async move {
                    match load_menu_sources(&*store).await {
                        Ok((groups, items)) => Msg::MenuLoaded { generation, groups, items },
                        Err(error) => Msg::MenuLoadFailed {
                            generation,
                            error: error.to_string(),
                        },
                    }
                });
            }
            Effect::SetRead { id, read } => {
                let channel = self.channel.clone();
                let sender = self.sender.clone();
                tokio::spawn(async move {
                    // Success shows up through the subscription.
                    if let Err(error) = channel.set_read(&id, read).await {
                        let _ = sender.send(Msg::NotificationWriteFailed {
                            id,
                            error: error.to_string(),
                        });
                    }
                });
            }
            Effect::MarkAllRead(notifications) => {
                let channel = self.channel.clone();
                self.spawn(async move { Msg::MarkAllFinished(channel.mark_all_read(&notifications).await) });
            }
        }
    }

    fn spawn<F>(&self, work: F)
    where
        F: Future<Output = Msg> + Send + 'static,
    {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if sender.send(work.await).is_err() {
                debug!("Console closed before background work finished");
            }
        });
    }
}

/// Forwards every notification snapshot to the event loop until either side
/// goes away.
fn spawn_notification_listener(
    channel: NotificationChannel<dyn DocumentStore>,
    sender: mpsc::UnboundedSender<Msg>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut subscription = match channel.subscribe().await {
            Ok(subscription) => subscription,
            Err(error) => {
                error!(uid = %channel.uid(), error = %error, "Notification subscription failed");
                let _ = sender.send(Msg::SubscriptionFailed(error.to_string()));
                return;
            }
        };
        while let Some(snapshot) = subscription.next().await {
            if sender.send(Msg::NotificationsSnapshot(snapshot)).is_err() {
                break;
            }
        }
        debug!("Notification listener stopped");
    })
}

/// Entry point: sets up the terminal, runs the loop, and always restores the
/// terminal on the way out.
pub async fn run_app(context: ConsoleContext) -> Result<()> {
    let ConsoleContext {
        store,
        session,
        config,
        initial_url,
    } = context;
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let channel = NotificationChannel::new(Arc::clone(&store), session.uid.clone());
    let listener = spawn_notification_listener(channel.clone(), sender.clone());
    let executor = EffectExecutor { store, channel, sender };

    info!(uid = %session.uid, "Starting console");
    let (mut app, effects) = App::new(session, &config, theme::load(), initial_url);
    executor.run_all(&mut app, effects);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &executor, &mut receiver).await;
    listener.abort();
    cleanup_terminal(&mut terminal)?;
    info!("Console closed");
    result
}

async fn event_loop(
    terminal: &mut ConsoleTerminal,
    app: &mut App,
    executor: &EffectExecutor,
    receiver: &mut mpsc::UnboundedReceiver<Msg>,
) -> Result<()> {
    let mut main_view = MainView::new();
    let mut events = EventStream::new();
    let mut ticker = time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    terminal.draw(|frame| {
        let area = frame.area();
        main_view.render(frame, area, app);
    })?;
    loop {
        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        break;
                    }
                    let effects = main_view.handle_key_events(app, key);
                    executor.run_all(app, effects);
                }
                Some(Ok(Event::Mouse(mouse))) => {
                    let effects = main_view.handle_mouse_events(app, mouse);
                    executor.run_all(app, effects);
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    warn!(error = %error, "Failed to read terminal event");
                    break;
                }
                None => break,
            },
            Some(msg) = receiver.recv() => {
                let effects = app.update(msg);
                executor.run_all(app, effects);
            }
            _ = ticker.tick() => {
                app.update(Msg::Tick);
            }
            _ = signal::ctrl_c() => break,
        }
        if app.should_quit {
            break;
        }
        terminal.draw(|frame| {
            let area = frame.area();
            main_view.render(frame, area, app);
        })?;
    }
    Ok(())
}
