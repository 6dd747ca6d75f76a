//! Search bar widget showing the catalog title and search text

use crate::ui::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget
pub struct SearchBar<'a> {
    query: &'a str,
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, title: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            title,
            theme,
            focused: false,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled("Search:", self.theme.dimmed_style()), Span::raw(" ")];
        if self.query.is_empty() && !self.focused {
            spans.push(Span::styled("press / to search", self.theme.dimmed_style()));
        } else {
            spans.push(Span::raw(self.query));
        }
        if self.focused {
            spans.push(Span::styled(
                "│",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
