//! Ratatui widgets for the catalog browser

mod detail_view;
mod filter_picker;
mod help_bar;
mod help_overlay;
mod result_list;
mod search_bar;
mod status_bar;

pub use detail_view::DetailView;
pub use filter_picker::{FilterPickerOverlay, FilterSummary};
pub use help_bar::{HelpBar, KeyHint};
pub use help_overlay::HelpOverlay;
pub use result_list::ResultList;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;

use ratatui::layout::{Constraint, Layout, Rect};

/// Centered area taking the given percentages of `area`
pub(crate) fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let width_percent = width_percent.min(100);
    let height_percent = height_percent.min(100);

    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .split(popup_layout[1])[1]
}
