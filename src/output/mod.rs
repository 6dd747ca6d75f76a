//! Output formatting for CLI display
//!
//! This module turns catalog responses into the lines printed by the one-shot
//! commands. Quiet mode prints bare identifiers so output can be piped.

use crate::catalog::{CatalogDetail, CatalogPage, CatalogSummary, FilterVocabulary};
use crate::query::{FilterDimension, QueryState};
use colored::Colorize;

/// Format one list entry
#[must_use]
pub fn entry_line(entry: &CatalogSummary, quiet: bool) -> String {
    if quiet {
        return entry.id.clone();
    }

    let mut line = format!("  {} {}", entry.name.bold(), format!("({})", entry.id).dimmed());
    if !entry.short_description.is_empty() {
        line.push_str(&format!("\n      {}", entry.short_description));
    }
    if let Some(link) = entry.link() {
        line.push_str(&format!("\n      {}", link.cyan()));
    }
    line
}

/// Summary line for a page: range shown, total and page position
#[must_use]
pub fn page_summary(page: &CatalogPage, state: &QueryState) -> String {
    if page.is_empty_result() {
        return "No entries match the current search and filters.".to_string();
    }

    let first = u64::from(state.page().saturating_sub(1)) * u64::from(state.page_size()) + 1;
    let last = first + page.items.len().saturating_sub(1) as u64;
    let pages = state.last_page(page.total).unwrap_or(1);
    format!(
        "Showing {first}-{last} of {} (page {} of {pages}, sorted by {} {})",
        page.total,
        state.page(),
        state.sort(),
        state.order()
    )
}

/// Format the active filters, one dimension per line
#[must_use]
pub fn active_filters(state: &QueryState) -> Vec<String> {
    let mut lines = Vec::new();
    if !state.search_text().is_empty() {
        lines.push(format!("  {}: {}", "Search".bold(), state.search_text()));
    }
    for (dimension, values) in state.filters().iter() {
        let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        lines.push(format!("  {}: {}", dimension.label().bold(), joined));
    }
    lines
}

/// Format a full entry
#[must_use]
pub fn detail_block(detail: &CatalogDetail) -> Vec<String> {
    let summary = &detail.summary;
    let mut lines = vec![format!("{} {}", summary.name.bold(), format!("({})", summary.id).dimmed())];

    if !summary.short_description.is_empty() {
        lines.push(summary.short_description.clone());
    }

    let fields: [(&str, String); 8] = [
        ("Version", detail.software_version.clone()),
        ("Released", summary.release_date.clone()),
        ("License", summary.license.clone()),
        ("Status", summary.development_status.clone()),
        ("Type", summary.software_type.clone()),
        ("Categories", summary.categories.join(", ")),
        ("Platforms", summary.platforms.join(", ")),
        ("Languages", detail.languages.join(", ")),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            lines.push(format!("  {:<11} {value}", format!("{label}:").bold()));
        }
    }
    if let Some(link) = summary.link() {
        lines.push(format!("  {:<11} {}", "Link:".bold(), link.cyan()));
    }
    if !detail.long_description.is_empty() {
        lines.push(String::new());
        lines.extend(detail.long_description.lines().map(str::to_string));
    }
    lines
}

/// Format the vocabulary, marking values selected in `state`
#[must_use]
pub fn vocabulary_block(vocabulary: &FilterVocabulary, state: &QueryState, quiet: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for dimension in FilterDimension::ALL {
        let options = vocabulary.options(dimension);
        if options.is_empty() {
            continue;
        }
        if quiet {
            lines.extend(options.iter().map(|option| format!("{}={option}", dimension.param())));
            continue;
        }
        lines.push(format!("{} ({})", dimension.label().bold(), dimension.param().dimmed()));
        for option in options {
            let selected = state.filters().contains(dimension, option);
            let marker = if selected { "●".green() } else { "○".dimmed() };
            lines.push(format!("  {marker} {option}"));
        }
    }
    lines
}
