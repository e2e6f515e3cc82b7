use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Linen palette: warm off-white surfaces with terracotta accents.
pub const OFF_WHITE: Color = Color::Rgb(0xFC, 0xFC, 0xFC); // #fcfcfc
pub const INPUT_BACKGROUND: Color = Color::Rgb(0xF9, 0xF9, 0xF9); // #f9f9f9
pub const LINE: Color = Color::Rgb(0xDE, 0xDE, 0xDE); // #dedede
pub const TITLE: Color = Color::Rgb(0x00, 0x00, 0x00); // #000000
pub const BODY: Color = Color::Rgb(0x33, 0x33, 0x33); // #333333
pub const LABEL: Color = Color::Rgb(0x55, 0x55, 0x55); // #555555
pub const PLACEHOLDER: Color = Color::Rgb(0x88, 0x88, 0x88); // #888888
pub const TERRACOTTA: Color = Color::Rgb(0xDD, 0x85, 0x60); // #dd8560
pub const WALNUT: Color = Color::Rgb(0xA8, 0x71, 0x5A); // #a8715a
pub const SAND: Color = Color::Rgb(0xE0, 0xCF, 0xBA); // #e0cfba
pub const SCRIM: Color = Color::Rgb(0xC8, 0xC4, 0xBE); // #c8c4be

pub const EMERALD: Color = Color::Rgb(0x05, 0x96, 0x69); // #059669
pub const ROSE: Color = Color::Rgb(0xE1, 0x1D, 0x48); // #e11d48
pub const AMBER: Color = Color::Rgb(0xF5, 0x9E, 0x0B); // #f59e0b
pub const SKY: Color = Color::Rgb(0x02, 0x84, 0xC7); // #0284c7

/// Light storefront theme.
#[derive(Debug, Clone)]
pub struct LinenTheme {
    roles: ThemeRoles,
}

impl LinenTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: OFF_WHITE,
                surface: INPUT_BACKGROUND,
                surface_muted: SAND,
                border: LINE,
                divider: LINE,

                text: TITLE,
                text_secondary: BODY,
                text_muted: PLACEHOLDER,

                accent_primary: TERRACOTTA,
                accent_secondary: WALNUT,
                accent_subtle: LABEL,

                info: SKY,
                success: EMERALD,
                warning: AMBER,
                error: ROSE,

                selection_bg: TERRACOTTA,
                selection_fg: OFF_WHITE,
                focus: TERRACOTTA,
                modal_bg: SCRIM,

                scrollbar_track: LINE,
                scrollbar_thumb: LABEL,

                chart: AMBER,
            },
        }
    }
}

impl Default for LinenTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for LinenTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
