//! One-line key hints for the current mode

use crate::ui::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A key and what it does in the current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    #[must_use]
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Bottom row listing the hints for the active mode
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = Span::styled(" · ", self.theme.dimmed_style());
        let spans: Vec<Span> = self
            .hints
            .iter()
            .enumerate()
            .flat_map(|(i, hint)| {
                let lead = (i > 0).then(|| separator.clone());
                lead.into_iter().chain([
                    Span::styled(hint.key, self.theme.cursor_style()),
                    Span::styled(format!(" {}", hint.action), self.theme.dimmed_style()),
                ])
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
