//! Status bar widget: list failures, recent messages or the shareable link

use crate::browse::ListStatus;
use crate::ui::output::MessageLevel;
use crate::ui::tui::state::StatusMessage;
use crate::ui::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget
pub struct StatusBar<'a> {
    messages: &'a [&'a StatusMessage],
    status: &'a ListStatus,
    link: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(
        messages: &'a [&'a StatusMessage],
        status: &'a ListStatus,
        link: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            messages,
            status,
            link,
            theme,
        }
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }

    fn line(&self) -> Line<'a> {
        if let ListStatus::Failed(message) = self.status {
            let style = self.theme.error_style();
            return Line::from(vec![
                Span::styled(Self::prefix_for_level(MessageLevel::Error), style),
                Span::styled(message.as_str(), style),
                Span::styled("  (F5 to retry)", self.theme.dimmed_style()),
            ]);
        }

        if let Some(msg) = self.messages.last() {
            let style = self.theme.message_style(msg.level);
            return Line::from(vec![
                Span::styled(Self::prefix_for_level(msg.level), style),
                Span::styled(msg.text.as_str(), style),
            ]);
        }

        Line::from(vec![
            Span::styled("Link: ", self.theme.dimmed_style()),
            Span::styled(self.link, self.theme.link_style()),
        ])
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(self.line()).render(inner, buf);
    }
}
