//! Help overlay widget for displaying the full keybind reference

use super::centered_rect;
use crate::ui::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Help overlay widget that displays a centered help screen
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn section(&self, title: &'static str) -> Line<'static> {
        Line::styled(
            title,
            self.theme.cursor_style().add_modifier(Modifier::UNDERLINED),
        )
    }

    fn help_line(&self, key: &'static str, desc: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {key:<12}"), self.theme.info_style()),
            Span::raw(desc),
        ])
    }

    fn build_content(&self) -> Vec<Line<'static>> {
        vec![
            Line::default(),
            self.section("  Results"),
            self.help_line("↑/↓", "Move cursor"),
            self.help_line("←/→", "Previous / next page"),
            self.help_line("Enter", "Open entry"),
            self.help_line("Space", "Preview entry"),
            self.help_line("w", "Open entry link"),
            Line::default(),
            self.section("  Query"),
            self.help_line("/", "Edit search"),
            self.help_line("f", "Pick filters"),
            self.help_line("s", "Sort by name / release date"),
            self.help_line("o", "Ascending / descending"),
            self.help_line("z", "Page size 12 / 24 / 48"),
            self.help_line("r", "Clear filters"),
            self.help_line("R", "Reset everything"),
            self.help_line("F5", "Retry"),
            self.help_line("y", "Copy link"),
            Line::default(),
            self.section("  Filters"),
            self.help_line("Tab", "Next dimension"),
            self.help_line("Type", "Narrow options"),
            self.help_line("Space", "Toggle option"),
            self.help_line("Del", "Clear dimension"),
            Line::default(),
            Line::styled("  Press any key to close", self.theme.dimmed_style()),
        ]
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect(60, 90, area);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Help ")
            .title_alignment(Alignment::Center);

        Paragraph::new(self.build_content())
            .block(block)
            .render(popup_area, buf);
    }
}
