//! Filter widgets: the active filter summary line and the picker overlay

use super::centered_rect;
use crate::query::{FilterDimension, QueryState};
use crate::ui::tui::state::FilterPicker;
use crate::ui::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget},
};

/// One-line summary of the selected filters
pub struct FilterSummary<'a> {
    state: &'a QueryState,
    theme: &'a Theme,
}

impl<'a> FilterSummary<'a> {
    #[must_use]
    pub const fn new(state: &'a QueryState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for FilterSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let filters = self.state.filters();
        if filters.is_empty() {
            Paragraph::new(Line::styled(
                " No filters (press f to pick)",
                self.theme.dimmed_style(),
            ))
            .render(area, buf);
            return;
        }

        let mut spans = vec![Span::raw(" ")];
        for (i, (dimension, values)) in filters.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(
                format!("{}: ", dimension.label()),
                self.theme.dimmed_style(),
            ));
            let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
            spans.push(Span::styled(joined, self.theme.filter_style()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Picker overlay listing one dimension's options
pub struct FilterPickerOverlay<'a> {
    picker: &'a FilterPicker,
    state: &'a QueryState,
    theme: &'a Theme,
}

impl<'a> FilterPickerOverlay<'a> {
    #[must_use]
    pub const fn new(picker: &'a FilterPicker, state: &'a QueryState, theme: &'a Theme) -> Self {
        Self {
            picker,
            state,
            theme,
        }
    }

    fn tabs(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for dimension in FilterDimension::ALL {
            let count = self.state.filters().values(dimension).count();
            let label = if count > 0 {
                format!(" {} ({count}) ", dimension.label())
            } else {
                format!(" {} ", dimension.label())
            };
            let style = if dimension == self.picker.dimension {
                self.theme.selected_style()
            } else {
                self.theme.dimmed_style()
            };
            spans.push(Span::styled(label, style));
        }
        Line::from(spans)
    }
}

impl Widget for FilterPickerOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect(70, 70, area);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Filters ")
            .title_alignment(Alignment::Center);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let [tabs_area, pattern_area, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

        Paragraph::new(self.tabs()).render(tabs_area, buf);
        Paragraph::new(Line::from(vec![
            Span::styled("Narrow: ", self.theme.dimmed_style()),
            Span::raw(self.picker.pattern.as_str()),
        ]))
        .render(pattern_area, buf);

        if self.picker.matches.is_empty() {
            Paragraph::new(Line::styled("No options", self.theme.dimmed_style()))
                .render(list_area, buf);
            return;
        }

        let height = list_area.height as usize;
        let start = self
            .picker
            .cursor
            .saturating_sub(height.saturating_sub(1));
        let items: Vec<ListItem> = self
            .picker
            .matches
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .filter_map(|(row, &idx)| {
                let option = self.picker.options.get(idx)?;
                let selected = self.state.filters().contains(self.picker.dimension, option);
                let marker = if selected {
                    Span::styled("● ", self.theme.filter_style())
                } else {
                    Span::styled("○ ", self.theme.dimmed_style())
                };
                let style = if row == self.picker.cursor {
                    self.theme.selected_style()
                } else {
                    self.theme.normal_style()
                };
                Some(ListItem::new(Line::from(vec![
                    marker,
                    Span::styled(option.clone(), style),
                ])))
            })
            .collect();

        List::new(items).render(list_area, buf);
    }
}
