//! ANSI 256-color fallback for terminals without truecolor support.
//!
//! Indexed approximation of the slate palette so the panel stays legible in
//! macOS Terminal and other 8-bit terminals.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(234),
                surface: Color::Indexed(235),
                border: Color::Indexed(239),

                text: Color::Indexed(255),
                text_secondary: Color::Indexed(248),
                text_muted: Color::Indexed(243),

                accent_primary: Color::Indexed(203),
                accent_secondary: Color::Indexed(209),

                selection_bg: Color::Indexed(237),
                focus: Color::Indexed(209),

                scrim_bg: Color::Indexed(232),
            },
        }
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
