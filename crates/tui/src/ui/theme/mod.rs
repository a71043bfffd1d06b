//! Theme styling for the TUI.
//!
//! A Dracula palette for truecolor terminals and an ANSI 256-color
//! approximation for everything else, both exposed through semantic roles.
//! Prefer the helpers over hard-coded colors.

use std::env;

use tracing::debug;

pub mod ansi256;
pub mod dracula;
pub mod roles;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use dracula::DraculaTheme;
pub use roles::Theme;

/// Overrides color capability detection (`truecolor` or `ansi256`).
pub const COLOR_MODE_ENV: &str = "DRIVERCONNECT_COLOR_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Picks the palette the terminal can display.
pub fn load() -> Box<dyn Theme> {
    match detect_color_capability() {
        ColorCapability::Truecolor => Box::new(DraculaTheme::new()),
        ColorCapability::Ansi256 => {
            debug!("ANSI-only terminal detected; using the 256-color palette");
            Box::new(Ansi256Theme::new())
        }
    }
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var(COLOR_MODE_ENV).ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mode_names_are_case_insensitive() {
        assert_eq!(parse_color_mode("TrueColor"), Some(ColorCapability::Truecolor));
        assert_eq!(parse_color_mode("256"), Some(ColorCapability::Ansi256));
        assert_eq!(parse_color_mode("sixteen"), None);
    }
}
