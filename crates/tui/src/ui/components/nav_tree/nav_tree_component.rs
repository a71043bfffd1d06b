use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use driverconnect_engine::GroupState;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Borders, Clear, Paragraph},
};

use super::{NavRow, flyout_rows, nav_rows};
use crate::app::{App, Effect, Pane};
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::{clip_to, find_target_index_by_mouse_position, truncate};

const FLYOUT_WIDTH: u16 = 30;

#[derive(Debug, Default)]
pub struct NavTreeComponent;

impl NavTreeComponent {
    fn rows(app: &App) -> Vec<NavRow> {
        nav_rows(&app.nav, &app.menu, &app.permissions, &app.current_url)
    }

    fn flyout(app: &App) -> Vec<NavRow> {
        flyout_rows(&app.nav, &app.menu, &app.permissions, &app.current_url)
    }

    /// Enter on a row: groups toggle (or open their flyout when minimized),
    /// items navigate.
    fn activate(app: &mut App, row: &NavRow) {
        match row {
            NavRow::Group { type_name, .. } if app.nav.is_minimized() => {
                app.nav.hover(type_name);
                app.nav_view.flyout_cursor = 0;
            }
            NavRow::Group { type_name, .. } => {
                app.nav.toggle(type_name);
            }
            NavRow::Item { url: Some(url), .. } => app.navigate(url),
            NavRow::Item { url: None, .. } => {}
        }
    }

    fn handle_flyout_keys(app: &mut App, key: KeyEvent) -> bool {
        if app.nav.flyout().is_none() {
            return false;
        }
        let items = Self::flyout(app);
        match key.code {
            KeyCode::Down => app.nav_view.move_flyout_cursor(items.len(), true),
            KeyCode::Up => app.nav_view.move_flyout_cursor(items.len(), false),
            KeyCode::Enter => {
                if let Some(row) = items.get(app.nav_view.flyout_cursor) {
                    Self::activate(app, row);
                }
                app.nav.leave_flyout();
            }
            KeyCode::Esc | KeyCode::Left => app.nav.leave_flyout(),
            _ => return false,
        }
        true
    }

    /// Draws the flyout above everything else. Called by the main view after
    /// the other panes have rendered.
    pub fn render_flyout(&mut self, frame: &mut Frame, bounds: Rect, app: &mut App) {
        app.nav_view.flyout_area = None;
        app.nav_view.flyout_row_areas.clear();
        let Some(open) = app.nav.flyout().map(str::to_string) else {
            return;
        };
        let items = Self::flyout(app);
        let anchor_row = Self::rows(app)
            .iter()
            .position(|row| row.type_name() == open)
            .and_then(|index| app.nav_view.row_areas.get(index).copied())
            .unwrap_or(app.nav_view.last_area);
        let height = items.len() as u16 + 2;
        let area = clip_to(
            Rect::new(app.nav_view.last_area.right(), anchor_row.y, FLYOUT_WIDTH, height),
            bounds,
        );
        if area.is_empty() {
            return;
        }

        let theme = &*app.theme;
        frame.render_widget(Clear, area);
        let block = th::block(theme, Some(open.as_str()), true).style(th::overlay_style(theme));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width.saturating_sub(2) as usize;
        let mut row_areas = Vec::with_capacity(items.len());
        for (index, row) in items.iter().enumerate() {
            let row_area = Rect::new(inner.x, inner.y + index as u16, inner.width, 1).intersection(inner);
            if row_area.is_empty() {
                break;
            }
            let NavRow::Item { title, icon, selected, .. } = row else {
                continue;
            };
            let mut style = if *selected { theme.current_item_style() } else { theme.text_primary_style() };
            if index == app.nav_view.flyout_cursor {
                style = th::selected_style(theme);
            }
            let text = truncate(&format!("{} {title}", icon.glyph()), width);
            frame.render_widget(Paragraph::new(text).style(style), row_area);
            row_areas.push(row_area);
        }
        app.nav_view.flyout_area = Some(area);
        app.nav_view.flyout_row_areas = row_areas;
    }
}

impl Component for NavTreeComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if Self::handle_flyout_keys(app, key) {
            return Vec::new();
        }
        let rows = Self::rows(app);
        app.nav_view.clamp(rows.len());
        match key.code {
            KeyCode::Down => app.nav_view.move_cursor(rows.len(), true),
            KeyCode::Up => app.nav_view.move_cursor(rows.len(), false),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(row) = rows.get(app.nav_view.cursor) {
                    Self::activate(app, row);
                }
            }
            KeyCode::Right => {
                if let Some(NavRow::Group { type_name, state, .. }) = rows.get(app.nav_view.cursor) {
                    if app.nav.is_minimized() {
                        app.nav.hover(type_name);
                        app.nav_view.flyout_cursor = 0;
                    } else if *state == GroupState::Collapsed {
                        app.nav.toggle(type_name);
                    }
                }
            }
            KeyCode::Left => {
                if let Some(row) = rows.get(app.nav_view.cursor)
                    && app.nav.is_expanded(row.type_name())
                    && !app.nav.is_minimized()
                {
                    let type_name = row.type_name().to_string();
                    app.nav.toggle(&type_name);
                    // Land on the group row that just collapsed.
                    if let Some(index) = Self::rows(app)
                        .iter()
                        .position(|row| matches!(row, NavRow::Group { type_name: name, .. } if *name == type_name))
                    {
                        app.nav_view.cursor = index;
                    }
                }
            }
            KeyCode::Char('t') => {
                app.nav.toggle_all(&app.menu, &app.permissions);
            }
            _ => {}
        }
        app.nav_view.clamp(Self::rows(app).len());
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved if app.nav.is_minimized() => {
                let rows = Self::rows(app);
                if let Some(index) = find_target_index_by_mouse_position(&app.nav_view.row_areas, x, y) {
                    if let Some(row) = rows.get(index)
                        && app.nav.flyout() != Some(row.type_name())
                    {
                        app.nav.hover(row.type_name());
                        app.nav_view.flyout_cursor = 0;
                    }
                } else if !app
                    .nav_view
                    .flyout_area
                    .is_some_and(|area| area.contains(Position { x, y }))
                {
                    app.nav.leave_flyout();
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = find_target_index_by_mouse_position(&app.nav_view.flyout_row_areas, x, y) {
                    if let Some(row) = Self::flyout(app).get(index) {
                        Self::activate(app, row);
                    }
                    app.nav.leave_flyout();
                    return Vec::new();
                }
                if let Some(index) = find_target_index_by_mouse_position(&app.nav_view.row_areas, x, y) {
                    app.focus = Pane::Nav;
                    app.nav_view.cursor = index;
                    if let Some(row) = Self::rows(app).get(index) {
                        Self::activate(app, row);
                    }
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.theme;
        let focused = app.focus == Pane::Nav;
        let minimized = app.nav.is_minimized();
        let title = if minimized { "≡" } else { "Menu" };
        let block = th::block(theme, Some(title), focused).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Self::rows(app);
        if rows.is_empty() {
            if !minimized {
                frame.render_widget(Paragraph::new("No menu entries").style(theme.text_muted_style()), inner);
            }
            app.nav_view.last_area = area;
            app.nav_view.row_areas.clear();
            return;
        }

        let width = inner.width as usize;
        let mut row_areas = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row_area = Rect::new(inner.x, inner.y + index as u16, inner.width, 1).intersection(inner);
            if row_area.is_empty() {
                break;
            }
            let line = match row {
                NavRow::Group { type_name, icon, .. } if minimized => {
                    let style = if app.nav.flyout() == Some(type_name.as_str()) {
                        theme.accent_emphasis_style()
                    } else {
                        theme.text_secondary_style()
                    };
                    Line::from(Span::styled(icon.glyph(), style)).centered()
                }
                NavRow::Group { type_name, icon, state } => {
                    let marker = match state {
                        GroupState::Expanded => "▾",
                        GroupState::Collapsed => "▸",
                    };
                    Line::from(vec![
                        Span::styled(format!("{marker} {} ", icon.glyph()), theme.accent_style()),
                        Span::styled(truncate(type_name, width.saturating_sub(5)), theme.text_secondary_style()),
                    ])
                }
                NavRow::Item { title, icon, selected, .. } => {
                    let style = if *selected { theme.current_item_style() } else { theme.text_primary_style() };
                    Line::from(Span::styled(
                        truncate(&format!("    {} {title}", icon.glyph()), width),
                        style,
                    ))
                }
            };
            let mut paragraph = Paragraph::new(line);
            if focused && index == app.nav_view.cursor {
                paragraph = paragraph.style(th::selected_style(theme));
            }
            frame.render_widget(paragraph, row_area);
            row_areas.push(row_area);
        }
        app.nav_view.last_area = area;
        app.nav_view.row_areas = row_areas;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let hints: &[(&str, &str)] = if app.nav.is_minimized() {
            &[(" ↑/↓", " Move"), (" Enter", " Open flyout"), (" m", " Expand panel")]
        } else {
            &[(" ↑/↓", " Move"), (" Enter", " Open"), (" t", " Toggle all"), (" m", " Minimize")]
        };
        th::build_hint_spans(&*app.theme, hints)
    }
}
