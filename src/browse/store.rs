//! Query state store
//!
//! `QueryStore` is the single source of truth for everything that feeds the list
//! request. All mutations are synchronous and total: no sequence of calls can
//! produce a page below 1, a page size outside bounds, or an empty/duplicate
//! filter value.

use crate::query::{
    FilterDimension, FilterMap, PAGE_SIZE_CHOICES, QueryState, SortField, SortOrder,
    clamp_page_size,
};

/// Mutable holder of the current `QueryState`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStore {
    state: QueryState,
}

impl QueryStore {
    /// Create a store from an existing state
    #[must_use]
    pub const fn new(state: QueryState) -> Self {
        Self { state }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    /// Replace the search text
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
    }

    /// Append a character to the search text
    pub fn push_search_char(&mut self, c: char) {
        self.state.search_text.push(c);
    }

    /// Remove the last character of the search text
    ///
    /// Returns false if the search text was already empty.
    pub fn pop_search_char(&mut self) -> bool {
        self.state.search_text.pop().is_some()
    }

    /// Toggle set membership of a filter value
    ///
    /// Returns true if the value is selected afterwards.
    pub fn toggle_filter_value(&mut self, dimension: FilterDimension, value: &str) -> bool {
        self.state.filters.toggle(dimension, value)
    }

    /// Replace every filter selection at once
    pub fn replace_filters(&mut self, filters: FilterMap) {
        self.state.filters = filters;
    }

    /// Drop all selections of one dimension
    pub fn clear_dimension(&mut self, dimension: FilterDimension) {
        self.state.filters.clear_dimension(dimension);
    }

    /// Set the sort field
    pub fn set_sort(&mut self, sort: SortField) {
        self.state.sort = sort;
    }

    /// Set the sort order
    pub fn set_order(&mut self, order: SortOrder) {
        self.state.order = order;
    }

    /// Set the page; values below 1 become 1
    pub fn set_page(&mut self, page: u32) {
        self.state.page = page.max(1);
    }

    /// Advance one page
    pub fn next_page(&mut self) {
        self.set_page(self.state.page.saturating_add(1));
    }

    /// Go back one page, stopping at 1
    pub fn previous_page(&mut self) {
        self.set_page(self.state.page.saturating_sub(1));
    }

    /// Set the page size, clamped into bounds
    pub fn set_page_size(&mut self, page_size: u32) {
        self.state.page_size = clamp_page_size(page_size);
    }

    /// Switch to the next offered page size (12 → 24 → 48 → 12)
    ///
    /// A page size that is not one of the offered choices moves to the smallest
    /// choice above it, or wraps to the first.
    pub fn cycle_page_size(&mut self) {
        let current = self.state.page_size;
        let next = PAGE_SIZE_CHOICES
            .iter()
            .copied()
            .find(|choice| *choice > current)
            .unwrap_or(PAGE_SIZE_CHOICES[0]);
        self.set_page_size(next);
    }

    /// Clear search, filters, sort and order and go back to page 1
    ///
    /// The page size is kept.
    pub fn reset_all(&mut self) {
        self.state = QueryState::with_page_size(self.state.page_size);
    }

    /// Clear filters and go back to page 1, keeping the search text
    pub fn reset_filters_only(&mut self) {
        self.state.filters = FilterMap::new();
        self.state.page = 1;
    }
}

impl From<QueryState> for QueryStore {
    fn from(state: QueryState) -> Self {
        Self::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::decode;

    fn populated() -> QueryStore {
        QueryStore::new(decode(
            "q=viewer&category=tools&license=MIT&sort=releaseDate&order=desc&page=5&page_size=12",
        ))
    }

    #[test]
    fn test_toggle_filter_value_is_membership_toggle() {
        let mut store = QueryStore::default();

        assert!(store.toggle_filter_value(FilterDimension::License, "MIT"));
        assert!(store.toggle_filter_value(FilterDimension::License, "GPL-3.0"));
        assert!(!store.toggle_filter_value(FilterDimension::License, "MIT"));

        let licenses: Vec<_> = store.state().filters().values(FilterDimension::License).collect();
        assert_eq!(licenses, vec!["GPL-3.0"]);
    }

    #[test]
    fn test_toggle_ignores_blank_values() {
        let mut store = QueryStore::default();
        store.toggle_filter_value(FilterDimension::Category, "   ");
        assert!(store.state().filters().is_empty());
    }

    #[test]
    fn test_set_page_never_below_one() {
        let mut store = QueryStore::default();
        store.set_page(0);
        assert_eq!(store.state().page(), 1);

        store.previous_page();
        assert_eq!(store.state().page(), 1);

        store.next_page();
        store.next_page();
        assert_eq!(store.state().page(), 3);
    }

    #[test]
    fn test_set_page_size_is_clamped() {
        let mut store = QueryStore::default();
        store.set_page_size(500);
        assert_eq!(store.state().page_size(), 48);
        store.set_page_size(0);
        assert_eq!(store.state().page_size(), 1);
    }

    #[test]
    fn test_cycle_page_size() {
        let mut store = QueryStore::default();
        assert_eq!(store.state().page_size(), 24);
        store.cycle_page_size();
        assert_eq!(store.state().page_size(), 48);
        store.cycle_page_size();
        assert_eq!(store.state().page_size(), 12);

        store.set_page_size(30);
        store.cycle_page_size();
        assert_eq!(store.state().page_size(), 48);
    }

    #[test]
    fn test_reset_all_keeps_page_size_only() {
        let mut store = populated();
        store.reset_all();

        assert_eq!(store.state(), &QueryState::with_page_size(12));
    }

    #[test]
    fn test_reset_filters_only_keeps_search() {
        let mut store = populated();
        store.reset_filters_only();

        let state = store.state();
        assert!(state.filters().is_empty());
        assert_eq!(state.page(), 1);
        assert_eq!(state.search_text(), "viewer");
        assert_eq!(state.sort(), SortField::ReleaseDate);
        assert_eq!(state.order(), SortOrder::Desc);
        assert_eq!(state.page_size(), 12);
    }

    #[test]
    fn test_replace_filters() {
        let mut store = populated();
        let filters: FilterMap = [(FilterDimension::Platform, "linux,web")].into_iter().collect();
        store.replace_filters(filters.clone());

        assert_eq!(store.state().filters(), &filters);
    }

    #[test]
    fn test_search_char_editing() {
        let mut store = QueryStore::default();
        store.push_search_char('g');
        store.push_search_char('o');
        assert_eq!(store.state().search_text(), "go");
        assert!(store.pop_search_char());
        assert!(store.pop_search_char());
        assert!(!store.pop_search_char());
    }
}
