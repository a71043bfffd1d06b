use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use driverconnect_util::format_relative;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{NotificationsState, PanelRow};
use crate::app::{App, Effect, Pane};
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::{find_target_index_by_mouse_position, truncate};

#[derive(Debug, Default)]
pub struct NotificationsComponent;

impl NotificationsComponent {
    fn activate(app: &mut App, index: usize) -> Vec<Effect> {
        let total = app.feed.items().len();
        match NotificationsState::row_at(index, total, &app.pager) {
            Some(PanelRow::Notification(position)) => app
                .feed
                .items()
                .get(position)
                .map(|notification| Effect::SetRead {
                    id: notification.id.clone(),
                    read: !notification.read,
                })
                .into_iter()
                .collect(),
            Some(PanelRow::ViewMore) => {
                app.pager.advance(total);
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn mark_all(app: &mut App) -> Vec<Effect> {
        let unread = app.feed.unread();
        if unread.is_empty() {
            app.set_info("Nothing unread");
            return Vec::new();
        }
        vec![Effect::MarkAllRead(unread)]
    }

    /// The bell with its unread badge, drawn in the header.
    pub fn render_bell(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.theme;
        let unread = app.feed.unread_count();
        let mut spans = vec![Span::styled("♪ ", theme.accent_style())];
        if unread > 0 {
            spans.push(Span::styled(format!(" {unread} "), theme.badge_style()));
        } else {
            spans.push(Span::styled("0", theme.text_muted_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).right_aligned(), area);
        app.notifications.bell_area = area;
    }
}

impl Component for NotificationsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let total = app.feed.items().len();
        match key.code {
            KeyCode::Down => {
                app.notifications.move_down(total, &mut app.pager);
            }
            KeyCode::Up => app.notifications.move_up(total, &app.pager),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let cursor = app.notifications.cursor;
                return Self::activate(app, cursor);
            }
            KeyCode::Char('v') => {
                app.pager.advance(total);
            }
            KeyCode::Char('a') => return Self::mark_all(app),
            KeyCode::Esc => {
                app.notifications.toggle_open();
                app.focus = Pane::Nav;
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let (x, y) = (mouse.column, mouse.row);
        let over_panel = app.notifications.open && app.notifications.last_area.contains(Position { x, y });
        match mouse.kind {
            MouseEventKind::ScrollDown if over_panel => {
                let total = app.feed.items().len();
                app.notifications.move_down(total, &mut app.pager);
                return Vec::new();
            }
            MouseEventKind::ScrollUp if over_panel => {
                app.notifications.move_up(app.feed.items().len(), &app.pager);
                return Vec::new();
            }
            MouseEventKind::Down(MouseButton::Left) => {}
            _ => return Vec::new(),
        }
        if app.notifications.bell_area.contains(Position { x, y }) {
            app.focus = if app.notifications.toggle_open() { Pane::Notifications } else { Pane::Nav };
            return Vec::new();
        }
        if !app.notifications.open {
            return Vec::new();
        }
        match find_target_index_by_mouse_position(&app.notifications.row_areas, x, y) {
            Some(drawn) => {
                let index = app.notifications.offset + drawn;
                app.focus = Pane::Notifications;
                app.notifications.cursor = index;
                Self::activate(app, index)
            }
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.theme;
        let focused = app.focus == Pane::Notifications;
        let unread = app.feed.unread_count();
        let title = format!("Notifications ({unread} unread)");
        let block = th::block(theme, Some(title.as_str()), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items = app.pager.window(app.feed.items());
        if items.is_empty() {
            let message = if app.feed.is_loaded() { "You're all caught up" } else { "Loading…" };
            frame.render_widget(Paragraph::new(message).style(theme.text_muted_style()), inner);
            app.notifications.last_area = area;
            app.notifications.row_areas.clear();
            return;
        }

        let total = app.feed.items().len();
        let row_count = NotificationsState::row_count(total, &app.pager);
        app.notifications.clamp(total, &app.pager);
        app.notifications.scroll_to_cursor(inner.height as usize);
        let (offset, cursor) = (app.notifications.offset, app.notifications.cursor);

        let now = Utc::now();
        let width = inner.width as usize;
        let mut row_areas = Vec::with_capacity(inner.height as usize);
        for (drawn, index) in (offset..row_count).take(inner.height as usize).enumerate() {
            let row_area = Rect::new(inner.x, inner.y + drawn as u16, inner.width, 1);
            let mut paragraph = match NotificationsState::row_at(index, total, &app.pager) {
                Some(PanelRow::Notification(position)) => {
                    let notification = &items[position];
                    let when = format_relative(notification.created_at, now);
                    let (marker, marker_style, title_style) = if notification.read {
                        ("○", theme.text_muted_style(), theme.text_muted_style())
                    } else {
                        ("●", theme.unread_marker_style(), theme.text_primary_style())
                    };
                    let title_width = width.saturating_sub(when.chars().count() + 4);
                    let title = truncate(&notification.title, title_width);
                    let padding = " ".repeat(title_width.saturating_sub(title.chars().count()));
                    Paragraph::new(Line::from(vec![
                        Span::styled(format!("{marker} "), marker_style),
                        Span::styled(title, title_style),
                        Span::raw(padding),
                        Span::styled(format!(" {when}"), theme.text_muted_style()),
                    ]))
                }
                Some(PanelRow::ViewMore) => {
                    let remaining = total - app.pager.visible(total);
                    Paragraph::new(format!("View More ({remaining} more)"))
                        .style(theme.accent_emphasis_style())
                        .centered()
                }
                None => break,
            };
            if focused && index == cursor {
                paragraph = paragraph.style(th::selected_style(theme));
            }
            frame.render_widget(paragraph, row_area);
            row_areas.push(row_area);
        }
        app.notifications.last_area = area;
        app.notifications.row_areas = row_areas;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(
            &*app.theme,
            &[(" Enter", " Toggle read"), (" a", " Mark all read"), (" v", " View more"), (" Esc", " Close")],
        )
    }
}
