//! Application state for the console.
//!
//! `App` owns everything the UI draws: the resolved permissions, the memoized
//! menu and its navigation tree, the notification feed and pager, the alert
//! player, and the active toast. Components mutate it in response to input
//! and return [`Effect`]s; the runtime performs those against the store and
//! feeds the outcomes back as [`Msg`]s through [`App::update`].

use std::sync::Arc;
use std::time::Duration;

use driverconnect_engine::menu::summarize;
use driverconnect_engine::{
    AlertPlayer, MarkAllReport, MenuController, NavTree, NotificationFeed, Toast, ViewMore,
};
use driverconnect_store::Document;
use driverconnect_types::{GroupedMenu, MenuGroup, MenuItem, Notification, Permissions, Session};
use driverconnect_util::ConsoleConfig;
use tracing::{debug, info, warn};

use crate::audio::TerminalBell;
use crate::ui::components::nav_tree::NavTreeState;
use crate::ui::components::notifications::NotificationsState;
use crate::ui::theme::Theme;

/// Outcomes delivered to the app from input handling and background work.
#[derive(Debug, Clone)]
pub enum Msg {
    Tick,
    PermissionsResolved {
        generation: u64,
        permissions: Permissions,
    },
    MenuLoaded {
        generation: u64,
        groups: Vec<MenuGroup>,
        items: Vec<MenuItem>,
    },
    MenuLoadFailed {
        generation: u64,
        error: String,
    },
    NotificationsSnapshot(Vec<Document>),
    SubscriptionFailed(String),
    NotificationWriteFailed {
        id: String,
        error: String,
    },
    MarkAllFinished(MarkAllReport),
}

/// Work the runtime performs on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ResolvePermissions { generation: u64 },
    LoadMenu { generation: u64 },
    SetRead { id: String, read: bool },
    MarkAllRead(Vec<Notification>),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Nav,
    Notifications,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub is_error: bool,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub permissions: Permissions,
    pub menu: Arc<GroupedMenu>,
    pub nav: NavTree,
    pub nav_view: NavTreeState,
    /// The location the console is showing; drives menu selection.
    pub current_url: String,
    pub feed: NotificationFeed,
    pub pager: ViewMore,
    pub notifications: NotificationsState,
    pub toast: Option<Toast>,
    pub alerts: AlertPlayer<TerminalBell>,
    pub focus: Pane,
    pub status: Option<StatusLine>,
    pub theme: Box<dyn Theme>,
    pub should_quit: bool,
    menu_controller: MenuController,
    toast_ttl: Duration,
}

impl App {
    /// Builds the app and the effects that start its initial loads.
    pub fn new(session: Session, config: &ConsoleConfig, theme: Box<dyn Theme>, initial_url: impl Into<String>) -> (Self, Vec<Effect>) {
        let mut menu_controller = MenuController::new();
        let permissions_generation = menu_controller.begin_permissions();
        let load_generation = menu_controller.begin_load();
        let menu = menu_controller.menu();
        let mut nav = NavTree::fresh(&menu);
        nav.set_minimized(config.minimized);

        let app = Self {
            session,
            permissions: Permissions::default(),
            menu,
            nav,
            nav_view: NavTreeState::default(),
            current_url: initial_url.into(),
            feed: NotificationFeed::new(),
            pager: ViewMore::new(config.page_step),
            notifications: NotificationsState::default(),
            toast: None,
            alerts: AlertPlayer::new(TerminalBell::new(config.alert_sound)),
            focus: Pane::Nav,
            status: None,
            theme,
            should_quit: false,
            menu_controller,
            toast_ttl: Duration::from_millis(config.toast_ttl_ms),
        };
        let effects = vec![
            Effect::ResolvePermissions {
                generation: permissions_generation,
            },
            Effect::LoadMenu {
                generation: load_generation,
            },
        ];
        (app, effects)
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                if self.toast.as_ref().is_some_and(Toast::is_expired) {
                    self.toast = None;
                }
            }
            Msg::PermissionsResolved { generation, permissions } => {
                if self.menu_controller.apply_permissions(generation, &permissions) {
                    info!(
                        uid = %self.session.uid,
                        pages = permissions.pages.len(),
                        tables = permissions.tables.len(),
                        "Resolved permissions"
                    );
                    self.permissions = permissions;
                    self.refresh_menu();
                }
            }
            Msg::MenuLoaded { generation, groups, items } => {
                if self.menu_controller.apply_load(generation, groups, items) {
                    self.refresh_menu();
                }
            }
            Msg::MenuLoadFailed { generation, error } => {
                warn!(generation, error = %error, "Menu load failed");
                self.set_error(format!("Menu unavailable: {error}"));
            }
            Msg::NotificationsSnapshot(documents) => self.apply_notifications(&documents),
            Msg::SubscriptionFailed(error) => self.set_error(format!("Notifications unavailable: {error}")),
            Msg::NotificationWriteFailed { id, error } => {
                self.set_error(format!("Could not update notification {id}: {error}"));
            }
            Msg::MarkAllFinished(report) => {
                if report.is_complete() {
                    self.set_info(format!("Marked {} notifications read", report.updated.len()));
                } else {
                    self.set_error(format!(
                        "Marked {} read, {} failed",
                        report.updated.len(),
                        report.failed.len()
                    ));
                }
            }
        }
        Vec::new()
    }

    /// Replays a blocked alert sound once the operator interacts.
    pub fn on_user_gesture(&mut self) {
        self.alerts.sink_mut().unlock();
        self.alerts.on_user_gesture();
    }

    /// Re-resolves permissions, for instance after the role changed.
    pub fn reload_permissions(&mut self) -> Effect {
        Effect::ResolvePermissions {
            generation: self.menu_controller.begin_permissions(),
        }
    }

    pub fn reload_menu(&mut self) -> Effect {
        Effect::LoadMenu {
            generation: self.menu_controller.begin_load(),
        }
    }

    pub fn navigate(&mut self, url: &str) {
        debug!(url, "Navigating");
        self.current_url = url.to_string();
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some(StatusLine {
            message: message.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some(StatusLine {
            message: message.into(),
            is_error: true,
        });
    }

    fn refresh_menu(&mut self) {
        let menu = self.menu_controller.menu();
        if Arc::ptr_eq(&menu, &self.menu) {
            return;
        }
        debug!(groups = ?summarize(&menu), "Menu rebuilt");
        self.nav = self.nav.rebuilt(&menu);
        self.menu = menu;
    }

    fn apply_notifications(&mut self, documents: &[Document]) {
        let Some(arrival) = self.feed.apply_snapshot(documents) else {
            self.notifications.clamp(self.feed.items().len(), &self.pager);
            return;
        };
        info!(count = arrival.added.len(), "New notifications arrived");
        self.alerts.alert();
        if let Some(toast) = Toast::for_arrival(&arrival, self.toast_ttl) {
            self.toast = Some(toast);
        }
        self.notifications.clamp(self.feed.items().len(), &self.pager);
    }
}
