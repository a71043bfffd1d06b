//! Transient toast announcing new notifications.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::{top_right_rect, truncate};

const TOAST_WIDTH: u16 = 44;

#[derive(Debug, Default)]
pub struct ToastComponent;

impl Component for ToastComponent {
    fn render(&mut self, frame: &mut Frame, bounds: Rect, app: &mut App) {
        let Some(toast) = app.toast.as_ref() else {
            return;
        };
        let theme = &*app.theme;
        let area = top_right_rect(TOAST_WIDTH, 3, bounds);
        if area.is_empty() {
            return;
        }
        let block = th::block(theme, Some("New notification"), true).style(th::overlay_style(theme));
        let width = block.inner(area).width as usize;
        let line = Line::from(vec![
            Span::styled("♪ ", theme.accent_style()),
            Span::styled(truncate(&toast.message, width.saturating_sub(2)), theme.text_primary_style()),
        ]);
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
