//! Top-level layout and input routing.
//!
//! Header (title and bell), body (navigation tree, current page, optional
//! notification panel), footer (hints or the latest status). The flyout and
//! the toast are drawn last so they sit above everything else.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use driverconnect_engine::is_item_selected;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::components::{Component, NavTreeComponent, NotificationsComponent, ToastComponent};
use super::theme::theme_helpers as th;
use crate::app::{App, Effect, Pane};

const NAV_WIDTH: u16 = 30;
const NAV_WIDTH_MINIMIZED: u16 = 5;
const PANEL_WIDTH: u16 = 52;

#[derive(Debug, Default)]
pub struct MainView {
    nav: NavTreeComponent,
    notifications: NotificationsComponent,
    toast: ToastComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        app.on_user_gesture();
        match key.code {
            KeyCode::Char('q') => return vec![Effect::Quit],
            KeyCode::Char('n') => {
                app.focus = if app.notifications.toggle_open() { Pane::Notifications } else { Pane::Nav };
                return Vec::new();
            }
            KeyCode::Char('m') => {
                let minimized = !app.nav.is_minimized();
                app.nav.set_minimized(minimized);
                app.nav_view.cursor = 0;
                return Vec::new();
            }
            KeyCode::Char('r') => return vec![app.reload_permissions(), app.reload_menu()],
            KeyCode::Tab | KeyCode::BackTab if app.notifications.open => {
                app.focus = match app.focus {
                    Pane::Nav => Pane::Notifications,
                    Pane::Notifications => Pane::Nav,
                };
                return Vec::new();
            }
            _ => {}
        }
        match app.focus {
            Pane::Nav => self.nav.handle_key_events(app, key),
            Pane::Notifications => self.notifications.handle_key_events(app, key),
        }
    }

    pub fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            app.on_user_gesture();
        }
        let mut effects = self.notifications.handle_mouse_events(app, mouse);
        effects.extend(self.nav.handle_mouse_events(app, mouse));
        effects
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        frame.render_widget(Paragraph::new("").style(th::panel_style(&*app.theme)), area);
        let [header, body, footer] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)]).areas(area);

        self.render_header(frame, header, app);

        let nav_width = if app.nav.is_minimized() { NAV_WIDTH_MINIMIZED } else { NAV_WIDTH };
        let [nav_area, content] = Layout::horizontal([Constraint::Length(nav_width), Constraint::Min(0)]).areas(body);
        self.nav.render(frame, nav_area, app);

        if app.notifications.open {
            let [page, panel] =
                Layout::horizontal([Constraint::Min(0), Constraint::Length(PANEL_WIDTH)]).areas(content);
            render_page(frame, page, app);
            self.notifications.render(frame, panel, app);
        } else {
            render_page(frame, content, app);
        }

        self.render_footer(frame, footer, app);
        self.nav.render_flyout(frame, body, app);
        self.toast.render(frame, body, app);
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let [title, bell] = Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(area);
        let theme = &*app.theme;
        let role = app.session.role_claim.as_deref().unwrap_or("no role");
        let line = Line::from(vec![
            Span::styled(" DriverConnect ", theme.accent_emphasis_style()),
            Span::styled(format!("{} · {role}", app.session.uid), theme.text_muted_style()),
        ]);
        frame.render_widget(Paragraph::new(line), title);
        self.notifications.render_bell(frame, bell, app);
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.theme;
        let line = match &app.status {
            Some(status) if status.is_error => Line::from(Span::styled(status.message.clone(), theme.status_error())),
            Some(status) => Line::from(Span::styled(status.message.clone(), theme.status_info())),
            None => {
                let mut spans = match app.focus {
                    Pane::Nav => self.nav.get_hint_spans(app),
                    Pane::Notifications => self.notifications.get_hint_spans(app),
                };
                spans.extend(th::build_hint_spans(theme, &[(" n", " Notifications"), (" q", " Quit")]));
                Line::from(spans)
            }
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// The current location and the menu entry it belongs to.
fn render_page(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &*app.theme;
    let block = th::block(theme, Some("Page"), false);
    let current = app
        .menu
        .group_order
        .iter()
        .flat_map(|name| app.menu.items(name))
        .filter(|item| app.permissions.can_see(item))
        .find(|item| is_item_selected(item, &app.current_url));
    let lines = match current {
        Some(item) => vec![
            Line::from(Span::styled(item.title.clone(), theme.current_item_style())),
            Line::from(Span::styled(app.current_url.clone(), theme.text_muted_style())),
        ],
        None => vec![
            Line::from(Span::styled(app.current_url.clone(), theme.text_primary_style())),
            Line::from(Span::styled("No menu entry for this location", theme.text_muted_style())),
        ],
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
