use gitty_core::config::{ThemeName, UiConfig};
use ratatui::style::Color;

pub struct Theme {
    pub accent: Color,
    pub secondary: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub muted: Color,
    pub border: Color,
    pub hint: Color,
    pub show_icons: bool,
}

impl Theme {
    pub fn from_config(config: &UiConfig) -> Self {
        let mut theme = Self::named(config.theme);
        theme.show_icons = config.show_icons;
        theme
    }

    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Charm => Self {
                accent: Color::Rgb(0xFF, 0x6B, 0x9D),
                secondary: Color::Rgb(0xA8, 0x55, 0xF7),
                success: Color::Rgb(0x4A, 0xDE, 0x80),
                error: Color::Rgb(0xF8, 0x71, 0x71),
                warning: Color::Rgb(0xFB, 0xBF, 0x24),
                info: Color::Rgb(0x22, 0xD3, 0xEE),
                muted: Color::Rgb(0x9C, 0xA3, 0xAF),
                border: Color::Rgb(0x6B, 0x72, 0x80),
                hint: Color::Rgb(0x60, 0xA5, 0xFA),
                show_icons: true,
            },
            ThemeName::Dracula => Self {
                accent: Color::Rgb(0xFF, 0x79, 0xC6),
                secondary: Color::Rgb(0xBD, 0x93, 0xF9),
                success: Color::Rgb(0x50, 0xFA, 0x7B),
                error: Color::Rgb(0xFF, 0x55, 0x55),
                warning: Color::Rgb(0xF1, 0xFA, 0x8C),
                info: Color::Rgb(0x8B, 0xE9, 0xFD),
                muted: Color::Rgb(0x62, 0x72, 0xA4),
                border: Color::Rgb(0x44, 0x47, 0x5A),
                hint: Color::Rgb(0x8B, 0xE9, 0xFD),
                show_icons: true,
            },
            // Mocha
            ThemeName::Catppuccin => Self {
                accent: Color::Rgb(0xF5, 0xC2, 0xE7),
                secondary: Color::Rgb(0xCB, 0xA6, 0xF7),
                success: Color::Rgb(0xA6, 0xE3, 0xA1),
                error: Color::Rgb(0xF3, 0x8B, 0xA8),
                warning: Color::Rgb(0xF9, 0xE2, 0xAF),
                info: Color::Rgb(0x89, 0xDC, 0xEB),
                muted: Color::Rgb(0x6C, 0x70, 0x86),
                border: Color::Rgb(0x45, 0x47, 0x5A),
                hint: Color::Rgb(0x89, 0xB4, 0xFA),
                show_icons: true,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::named(ThemeName::default())
    }
}
