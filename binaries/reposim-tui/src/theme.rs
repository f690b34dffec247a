//! Color schemes for the simulator TUI

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn palette(&self) -> ThemePalette {
        match self {
            Self::Dark => ThemePalette::dark(),
            Self::Light => ThemePalette::light(),
        }
    }
}

/// Color palette for a theme
#[derive(Debug, Clone)]
pub struct ThemePalette {
    pub bg: Color,
    pub fg: Color,
    pub bg_secondary: Color,

    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    pub success: Color,
    pub error: Color,

    pub border: Color,
    pub border_active: Color,
    pub border_inactive: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub status_bg: Color,
    pub status_fg: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl ThemePalette {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(13, 17, 23),
            fg: Color::Rgb(201, 209, 217),
            bg_secondary: Color::Rgb(22, 27, 34),

            primary: Color::Rgb(88, 166, 255),     // Link blue
            secondary: Color::Rgb(188, 140, 255),  // Lavender
            accent: Color::Rgb(240, 136, 62),      // Orange

            success: Color::Rgb(63, 185, 80),
            error: Color::Rgb(248, 81, 73),

            border: Color::Rgb(48, 54, 61),
            border_active: Color::Rgb(88, 166, 255),
            border_inactive: Color::Rgb(33, 38, 45),

            text_primary: Color::Rgb(240, 246, 252),
            text_secondary: Color::Rgb(160, 170, 180),
            text_muted: Color::Rgb(110, 118, 129),

            status_bg: Color::Rgb(22, 27, 34),
            status_fg: Color::Rgb(139, 148, 158),

            selection_bg: Color::Rgb(31, 111, 235),
            selection_fg: Color::Rgb(255, 255, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(255, 255, 255),
            fg: Color::Rgb(36, 41, 47),
            bg_secondary: Color::Rgb(246, 248, 250),

            primary: Color::Rgb(9, 105, 218),
            secondary: Color::Rgb(130, 80, 223),
            accent: Color::Rgb(188, 76, 0),

            success: Color::Rgb(26, 127, 55),
            error: Color::Rgb(207, 34, 46),

            border: Color::Rgb(208, 215, 222),
            border_active: Color::Rgb(9, 105, 218),
            border_inactive: Color::Rgb(234, 238, 242),

            text_primary: Color::Rgb(31, 35, 40),
            text_secondary: Color::Rgb(87, 96, 106),
            text_muted: Color::Rgb(140, 149, 159),

            status_bg: Color::Rgb(246, 248, 250),
            status_fg: Color::Rgb(87, 96, 106),

            selection_bg: Color::Rgb(9, 105, 218),
            selection_fg: Color::Rgb(255, 255, 255),
        }
    }

    // Style helpers

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border_style(&self, active: bool) -> Style {
        if active {
            Style::default().fg(self.border_active)
        } else {
            Style::default().fg(self.border_inactive)
        }
    }

    pub fn title_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text_secondary)
        }
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.status_fg).bg(self.status_bg)
    }

    pub fn input_style(&self, editing: bool) -> Style {
        if editing {
            Style::default()
                .fg(self.text_primary)
                .bg(self.bg_secondary)
        } else {
            Style::default()
                .fg(self.text_muted)
                .bg(self.bg)
        }
    }
}

/// Style presets for common UI elements
pub struct Styles;

impl Styles {
    pub fn header(palette: &ThemePalette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_key(palette: &ThemePalette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_desc(palette: &ThemePalette) -> Style {
        Style::default()
            .fg(palette.text_secondary)
    }

    pub fn technology(palette: &ThemePalette) -> Style {
        Style::default()
            .fg(palette.secondary)
            .bg(palette.bg_secondary)
    }

    pub fn directory(palette: &ThemePalette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn gauge_filled(palette: &ThemePalette) -> Style {
        Style::default()
            .fg(palette.primary)
            .bg(palette.bg_secondary)
    }
}
