//! Indexed-color rendition of the Dracula console theme, for terminals that
//! do not advertise truecolor.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

const GREY_DARK: Color = Color::Indexed(236);
const GREY: Color = Color::Indexed(239);
const GREY_LIGHT: Color = Color::Indexed(247);
const WHITE: Color = Color::Indexed(255);
const PINK: Color = Color::Indexed(212);
const CYAN: Color = Color::Indexed(117);
const GREEN: Color = Color::Indexed(84);
const RED: Color = Color::Indexed(203);

#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                surface: GREY_DARK,
                border: GREY,
                focus: CYAN,
                text: WHITE,
                text_secondary: Color::Indexed(250),
                text_muted: GREY_LIGHT,
                accent: PINK,
                current: GREEN,
                unread: CYAN,
                badge_bg: PINK,
                badge_fg: Color::Indexed(16),
                info: CYAN,
                error: RED,
                selection_bg: GREY,
                selection_fg: WHITE,
                overlay_bg: Color::Indexed(232),
            },
        }
    }
}

impl Default for Ansi256Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
