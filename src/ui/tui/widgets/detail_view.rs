//! Entry detail widget, used both as a side pane and as a modal

use super::centered_rect;
use crate::browse::DetailState;
use crate::catalog::CatalogDetail;
use crate::ui::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Renders a `DetailState`
pub struct DetailView<'a> {
    state: &'a DetailState,
    theme: &'a Theme,
    modal: bool,
}

impl<'a> DetailView<'a> {
    /// Detail pane rendered into the given area
    #[must_use]
    pub const fn pane(state: &'a DetailState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            modal: false,
        }
    }

    /// Detail modal centered over the given area
    #[must_use]
    pub const fn modal(state: &'a DetailState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            modal: true,
        }
    }

    fn field(&self, label: &str, value: &str) -> Option<Line<'static>> {
        if value.is_empty() {
            return None;
        }
        Some(Line::from(vec![
            Span::styled(format!("{label:<11}"), self.theme.dimmed_style()),
            Span::raw(value.to_string()),
        ]))
    }

    fn loaded(&self, detail: &CatalogDetail) -> Vec<Line<'static>> {
        let summary = &detail.summary;
        let mut lines = vec![Line::styled(
            summary.name.clone(),
            self.theme.cursor_style().add_modifier(Modifier::BOLD),
        )];
        if !summary.short_description.is_empty() {
            lines.push(Line::raw(summary.short_description.clone()));
        }
        lines.push(Line::default());

        let fields = [
            ("Version", detail.software_version.clone()),
            ("Released", summary.release_date.clone()),
            ("License", summary.license.clone()),
            ("Status", summary.development_status.clone()),
            ("Type", summary.software_type.clone()),
            ("Categories", summary.categories.join(", ")),
            ("Platforms", summary.platforms.join(", ")),
            ("Languages", detail.languages.join(", ")),
        ];
        lines.extend(
            fields
                .iter()
                .filter_map(|(label, value)| self.field(label, value)),
        );
        if let Some(link) = summary.link() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<11}", "Link"), self.theme.dimmed_style()),
                Span::styled(link.to_string(), self.theme.link_style()),
            ]));
        }
        if !detail.long_description.is_empty() {
            lines.push(Line::default());
            lines.extend(
                detail
                    .long_description
                    .lines()
                    .map(|line| Line::raw(line.to_string())),
            );
        }
        lines
    }

    fn content(&self) -> Vec<Line<'static>> {
        match self.state {
            DetailState::NoSelection => vec![Line::styled(
                "Press Space to preview an entry",
                self.theme.dimmed_style(),
            )],
            DetailState::Loading { id } => vec![Line::styled(
                format!("Loading {id}…"),
                self.theme.dimmed_style(),
            )],
            DetailState::Loaded(detail) => self.loaded(detail),
            DetailState::NotFound { id } => vec![Line::styled(
                format!("No catalog entry with id '{id}'"),
                self.theme.warning_style(),
            )],
            DetailState::Unavailable { message, .. } => vec![
                Line::styled(message.clone(), self.theme.error_style()),
                Line::styled("Press F5 to retry", self.theme.dimmed_style()),
            ],
        }
    }
}

impl Widget for DetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if self.modal {
            let popup = centered_rect(75, 80, area);
            Clear.render(popup, buf);
            popup
        } else {
            area
        };

        let border_style = if self.modal {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Entry ")
            .title_alignment(if self.modal {
                Alignment::Center
            } else {
                Alignment::Left
            });

        Paragraph::new(self.content())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
