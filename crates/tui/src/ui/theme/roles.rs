use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Semantic color roles for the console.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub surface: Color,
    pub border: Color,
    pub focus: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    /// Group markers, the bell, hint keys.
    pub accent: Color,
    /// The menu entry matching the current location.
    pub current: Color,
    /// Dot in front of an unread notification.
    pub unread: Color,
    pub badge_bg: Color,
    pub badge_fg: Color,

    pub info: Color,
    pub error: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,

    /// Behind the flyout and the toast; darker than `surface`.
    pub overlay_bg: Color,
}

/// Semantic roles plus the style builders components draw with.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        Style::default().fg(color)
    }

    fn selection_style(&self) -> Style {
        Style::default().fg(self.roles().selection_fg).bg(self.roles().selection_bg)
    }

    fn overlay_background_style(&self) -> Style {
        Style::default().bg(self.roles().overlay_bg)
    }

    fn status_info(&self) -> Style {
        Style::default().fg(self.roles().info)
    }
    fn status_error(&self) -> Style {
        Style::default().fg(self.roles().error).add_modifier(Modifier::BOLD)
    }

    fn accent_style(&self) -> Style {
        Style::default().fg(self.roles().accent)
    }
    fn accent_emphasis_style(&self) -> Style {
        self.accent_style().add_modifier(Modifier::BOLD)
    }

    fn current_item_style(&self) -> Style {
        Style::default().fg(self.roles().current).add_modifier(Modifier::BOLD)
    }

    fn unread_marker_style(&self) -> Style {
        Style::default().fg(self.roles().unread)
    }

    fn badge_style(&self) -> Style {
        let roles = self.roles();
        Style::default().bg(roles.badge_bg).fg(roles.badge_fg).add_modifier(Modifier::BOLD)
    }
}
