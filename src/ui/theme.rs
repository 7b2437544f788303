//! Color theme definitions

use ratatui::style::{Color, Modifier, Style};

/// Application color theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_bright: Color,

    // Accent colors
    pub accent: Color,

    // Row states
    pub active_bg: Color,
    pub active_fg: Color,
    pub focus: Color,
    pub disabled: Color,
    pub error_bg: Color,
    pub error_fg: Color,
    pub rename_bg: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Base colors
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::DarkGray,
            fg_bright: Color::White,

            // Accent colors
            accent: Color::Cyan,

            // Row states
            active_bg: Color::Blue,
            active_fg: Color::White,
            focus: Color::Yellow,
            disabled: Color::DarkGray,
            error_bg: Color::Red,
            error_fg: Color::White,
            rename_bg: Color::Black,

            // UI elements
            border: Color::DarkGray,
            border_focused: Color::Cyan,
        }
    }
}

impl Theme {
    /// Theme by settings name; unknown names fall back to the default
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::default(),
        }
    }

    /// Light theme variant
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            fg_dim: Color::DarkGray,
            fg_bright: Color::Black,
            accent: Color::Blue,
            active_bg: Color::LightBlue,
            active_fg: Color::Black,
            focus: Color::Magenta,
            disabled: Color::Gray,
            error_bg: Color::LightRed,
            error_fg: Color::Black,
            rename_bg: Color::Gray,
            border: Color::Gray,
            border_focused: Color::Blue,
        }
    }

    // Style helpers
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn active_row(&self) -> Style {
        Style::default().bg(self.active_bg).fg(self.active_fg)
    }

    pub fn error_row(&self) -> Style {
        Style::default().bg(self.error_bg).fg(self.error_fg)
    }

    pub fn disabled_row(&self) -> Style {
        Style::default().fg(self.disabled)
    }

    pub fn focus_marker(&self) -> Style {
        Style::default().fg(self.focus).add_modifier(Modifier::BOLD)
    }

    pub fn rename_input(&self) -> Style {
        Style::default()
            .bg(self.rename_bg)
            .fg(self.fg_bright)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }
}
