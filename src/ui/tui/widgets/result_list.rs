//! Result list widget for the displayed catalog page

use crate::browse::ListStatus;
use crate::ui::tui::state::App;
use crate::ui::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

/// Result list widget
pub struct ResultList<'a> {
    app: &'a App,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    #[must_use]
    pub const fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self { app, theme }
    }

    fn title(&self) -> String {
        let session = &self.app.session;
        let Some(page) = session.page() else {
            return " Results ".to_string();
        };

        let state = session.state();
        let mut title = format!(
            " Results: {} · page {} of {} · {} {} ",
            page.total,
            state.page(),
            session.last_page().unwrap_or(1),
            state.sort(),
            state.order()
        );
        if *session.status() == ListStatus::Loading {
            title.push_str("· updating ");
        }
        title
    }

    fn placeholder(&self) -> Option<Line<'static>> {
        let session = &self.app.session;
        match (session.page(), session.status()) {
            (None, ListStatus::Loading) => {
                Some(Line::styled("Loading catalog…", self.theme.dimmed_style()))
            }
            (None, ListStatus::Failed(message)) => {
                Some(Line::styled(message.clone(), self.theme.error_style()))
            }
            (Some(page), _) if page.is_empty_result() => Some(Line::styled(
                "No entries match the current search and filters.",
                self.theme.dimmed_style(),
            )),
            _ => None,
        }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if let Some(line) = self.placeholder() {
            Paragraph::new(line)
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        let entries = self.app.entries();
        let selected = self.app.session.selected_id();
        let start = self.app.scroll_offset.min(entries.len());
        let end = (start + inner.height as usize).min(entries.len());

        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let is_cursor = start + offset == self.app.cursor;
                let marker = if selected == Some(entry.id.as_str()) {
                    Span::styled("● ", self.theme.filter_style())
                } else if is_cursor {
                    Span::styled("> ", self.theme.cursor_style())
                } else {
                    Span::raw("  ")
                };

                let name_style = if is_cursor {
                    self.theme.selected_style()
                } else {
                    self.theme.normal_style().add_modifier(Modifier::BOLD)
                };
                let mut spans = vec![marker, Span::styled(entry.name.clone(), name_style)];
                if !entry.license.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", entry.license),
                        self.theme.dimmed_style(),
                    ));
                }
                if !entry.short_description.is_empty() {
                    spans.push(Span::raw(format!("  {}", entry.short_description)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}
