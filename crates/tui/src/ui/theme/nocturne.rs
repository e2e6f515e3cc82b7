use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Nocturne palette: the storefront's dark mode, gray-900 surfaces.
pub const GRAY_950: Color = Color::Rgb(0x03, 0x07, 0x12); // #030712
pub const GRAY_900: Color = Color::Rgb(0x11, 0x18, 0x27); // #111827
pub const GRAY_800: Color = Color::Rgb(0x1F, 0x29, 0x37); // #1f2937
pub const GRAY_700: Color = Color::Rgb(0x37, 0x41, 0x51); // #374151
pub const GRAY_400: Color = Color::Rgb(0x9C, 0xA3, 0xAF); // #9ca3af
pub const GRAY_200: Color = Color::Rgb(0xE5, 0xE7, 0xEB); // #e5e7eb
pub const OFF_WHITE: Color = Color::Rgb(0xFC, 0xFC, 0xFC); // #fcfcfc
pub const TERRACOTTA: Color = Color::Rgb(0xDD, 0x85, 0x60); // #dd8560
pub const SAND: Color = Color::Rgb(0xE0, 0xCF, 0xBA); // #e0cfba

pub const EMERALD: Color = Color::Rgb(0x34, 0xD3, 0x99); // #34d399
pub const ROSE: Color = Color::Rgb(0xFB, 0x71, 0x85); // #fb7185
pub const AMBER: Color = Color::Rgb(0xFB, 0xBF, 0x24); // #fbbf24
pub const SKY: Color = Color::Rgb(0x38, 0xBD, 0xF8); // #38bdf8

/// Dark storefront theme.
#[derive(Debug, Clone)]
pub struct NocturneTheme {
    roles: ThemeRoles,
}

impl NocturneTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: GRAY_900,
                surface: GRAY_800,
                surface_muted: GRAY_700,
                border: GRAY_700,
                divider: GRAY_700,

                text: OFF_WHITE,
                text_secondary: GRAY_200,
                text_muted: GRAY_400,

                accent_primary: TERRACOTTA,
                accent_secondary: SAND,
                accent_subtle: GRAY_400,

                info: SKY,
                success: EMERALD,
                warning: AMBER,
                error: ROSE,

                selection_bg: TERRACOTTA,
                selection_fg: GRAY_950,
                focus: TERRACOTTA,
                modal_bg: GRAY_950,

                scrollbar_track: GRAY_700,
                scrollbar_thumb: GRAY_400,

                chart: AMBER,
            },
        }
    }
}

impl Default for NocturneTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for NocturneTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
