//! Color theme definitions for the catalog browser
//!
//! Defines colors and styles used throughout the application.

use crate::ui::output::MessageLevel;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the highlighted entry
    pub selection_bg: Color,
    /// Foreground color for the highlighted entry
    pub selection_fg: Color,
    /// Color for the cursor indicator and focused borders
    pub cursor: Color,
    /// Color for success messages
    pub success: Color,
    /// Color for error messages
    pub error: Color,
    /// Color for warning messages
    pub warning: Color,
    /// Color for info messages
    pub info: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Color for selected filter values
    pub filter: Color,
    /// Color for links
    pub link: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            filter: Color::Magenta,
            link: Color::Blue,
        }
    }

    /// Style for the entry under the cursor
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for the cursor indicator (>) and focused borders
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for selected filter values and the active dimension tab
    #[must_use]
    pub fn filter_style(&self) -> Style {
        Style::default()
            .fg(self.filter)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.link)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Style for a status message of `level`
    #[must_use]
    pub fn message_style(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.success_style(),
            MessageLevel::Error => self.error_style(),
            MessageLevel::Warning => self.warning_style(),
            MessageLevel::Info => self.info_style(),
            MessageLevel::Normal => self.normal_style(),
        }
    }
}
