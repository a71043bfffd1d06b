use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers.
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for overlays drawn above panels (flyout, toast).
pub fn overlay_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.overlay_background_style().fg(theme.roles().text)
}

/// Style for a highlighted row.
pub fn selected_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.selection_style().add_modifier(Modifier::BOLD)
}

/// Key/description pairs for the footer hint line.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(key.to_string(), theme.accent_emphasis_style()),
                Span::styled(format!("{description} "), theme.text_muted_style()),
            ]
        })
        .collect()
}
