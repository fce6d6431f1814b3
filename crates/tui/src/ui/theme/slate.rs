use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Slate palette, taken from the admin dashboard the menu was designed for.
pub const PANEL: Color = Color::Rgb(0x20, 0x22, 0x2A); // #20222a - side panel
pub const BASE: Color = Color::Rgb(0x17, 0x18, 0x1E); // content background
pub const RAISED: Color = Color::Rgb(0x2C, 0x2F, 0x3A); // hovered/selected rows
pub const LINE: Color = Color::Rgb(0x3A, 0x3D, 0x4A); // borders
pub const GREY: Color = Color::Rgb(0x9A, 0x9D, 0xAA); // #9a9daa - secondary copy
pub const DIM: Color = Color::Rgb(0x6B, 0x6E, 0x7B);
pub const SNOW: Color = Color::Rgb(0xF4, 0xF4, 0xF6);

// The active section uses a red to orange gradient; terminals get its ends.
pub const RED: Color = Color::Rgb(0xF3, 0x3E, 0x47); // #f33e47
pub const ORANGE: Color = Color::Rgb(0xF2, 0x59, 0x3E); // #f2593e

pub const SCRIM: Color = Color::Rgb(0x0B, 0x10, 0x1C); // dark blue backdrop

/// Default palette for truecolor terminals.
#[derive(Debug, Clone)]
pub struct SlateTheme {
    roles: ThemeRoles,
}

impl SlateTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: BASE,
                surface: PANEL,
                border: LINE,

                text: SNOW,
                text_secondary: GREY,
                text_muted: DIM,

                accent_primary: RED,
                accent_secondary: ORANGE,

                selection_bg: RAISED,
                focus: ORANGE,

                scrim_bg: SCRIM,
            },
        }
    }
}

impl Theme for SlateTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// Slate with brighter borders and body copy.
#[derive(Debug, Clone)]
pub struct SlateThemeHighContrast {
    roles: ThemeRoles,
}

impl SlateThemeHighContrast {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: BASE,
                surface: PANEL,
                border: GREY,

                text: SNOW,
                text_secondary: SNOW,
                text_muted: GREY,

                accent_primary: ORANGE,
                accent_secondary: RED,

                selection_bg: LINE,
                focus: SNOW,

                scrim_bg: Color::Rgb(0x05, 0x07, 0x0D),
            },
        }
    }
}

impl Theme for SlateThemeHighContrast {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
