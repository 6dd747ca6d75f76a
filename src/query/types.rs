//! Query state data model
//!
//! `QueryState` is the value every list request is derived from. Its fields are
//! crate-private so that only the decoder and the store can build one, which keeps
//! the invariants (page >= 1, page size within bounds, no empty or duplicate
//! filter values) intact everywhere else.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Smallest accepted page size
pub const PAGE_SIZE_MIN: u32 = 1;

/// Largest accepted page size
pub const PAGE_SIZE_MAX: u32 = 48;

/// Page size used when none is configured or supplied
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Page sizes offered by the interactive browser
pub const PAGE_SIZE_CHOICES: [u32; 3] = [12, 24, 48];

/// One of the six independent facets a catalog entry can be filtered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterDimension {
    /// Entry categories
    #[default]
    Category,
    /// Supported platforms
    Platform,
    /// License identifier
    License,
    /// Development status
    Status,
    /// Software type
    Type,
    /// Available languages
    Language,
}

impl FilterDimension {
    /// All dimensions in canonical encoding order
    pub const ALL: [Self; 6] = [
        Self::Category,
        Self::Platform,
        Self::License,
        Self::Status,
        Self::Type,
        Self::Language,
    ];

    /// Query-string parameter name for this dimension
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Platform => "platform",
            Self::License => "license",
            Self::Status => "status",
            Self::Type => "type",
            Self::Language => "language",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Platform => "Platform",
            Self::License => "License",
            Self::Status => "Status",
            Self::Type => "Type",
            Self::Language => "Language",
        }
    }

    /// Look up a dimension by its query-string parameter name
    #[must_use]
    pub fn from_param(param: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dim| dim.param() == param)
    }

    /// The dimension after this one, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The dimension before this one, wrapping around
    #[must_use]
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Field the result list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Order by entry name
    #[default]
    Name,
    /// Order by release date
    ReleaseDate,
}

impl SortField {
    /// Query-string value
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ReleaseDate => "releaseDate",
        }
    }

    /// Lenient parse: `releaseDate` on exact match, `name` for anything else
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value == Self::ReleaseDate.param() {
            Self::ReleaseDate
        } else {
            Self::Name
        }
    }

    /// The other sort field
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Name => Self::ReleaseDate,
            Self::ReleaseDate => Self::Name,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Direction of the result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    /// Query-string value
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Lenient parse: `desc` on exact match, `asc` for anything else
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value == Self::Desc.param() {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// The opposite direction
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Split a comma-joined value into trimmed, non-empty tokens
///
/// Trailing or doubled commas never produce empty tokens.
///
/// # Examples
/// ```
/// use catalogr::query::split_tokens;
///
/// let tokens: Vec<_> = split_tokens(" tools, ,games,").collect();
/// assert_eq!(tokens, vec!["tools", "games"]);
/// ```
pub fn split_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Selected values per filter dimension
///
/// Values are kept in ordered sets and dimensions without a selection are not
/// stored at all, so two maps holding the same selection always compare equal
/// and always encode identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMap {
    selected: BTreeMap<FilterDimension, BTreeSet<String>>,
}

impl FilterMap {
    /// Create an empty filter map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected values for a dimension, in sorted order
    pub fn values(&self, dimension: FilterDimension) -> impl Iterator<Item = &str> {
        self.selected
            .get(&dimension)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Whether a value is selected for a dimension
    #[must_use]
    pub fn contains(&self, dimension: FilterDimension, value: &str) -> bool {
        self.selected
            .get(&dimension)
            .is_some_and(|set| set.contains(value.trim()))
    }

    /// Add a value (or several comma-joined values)
    ///
    /// Returns true if anything was added.
    pub fn insert(&mut self, dimension: FilterDimension, raw: &str) -> bool {
        let mut added = false;
        for token in split_tokens(raw) {
            added |= self
                .selected
                .entry(dimension)
                .or_default()
                .insert(token.to_string());
        }
        self.prune(dimension);
        added
    }

    /// Remove a value, returning true if it was selected
    pub fn remove(&mut self, dimension: FilterDimension, value: &str) -> bool {
        let removed = self
            .selected
            .get_mut(&dimension)
            .is_some_and(|set| set.remove(value.trim()));
        self.prune(dimension);
        removed
    }

    /// Toggle set membership of each token in `raw`
    ///
    /// Returns true if the (last) token is selected afterwards.
    pub fn toggle(&mut self, dimension: FilterDimension, raw: &str) -> bool {
        let tokens: BTreeSet<&str> = split_tokens(raw).collect();
        let mut now_selected = false;
        for token in tokens {
            now_selected = if self.contains(dimension, token) {
                self.remove(dimension, token);
                false
            } else {
                self.insert(dimension, token);
                true
            };
        }
        now_selected
    }

    /// Drop every selected value of one dimension
    pub fn clear_dimension(&mut self, dimension: FilterDimension) {
        self.selected.remove(&dimension);
    }

    /// Whether nothing is selected in any dimension
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected values across all dimensions
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    /// Iterate dimensions that have a selection, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (FilterDimension, &BTreeSet<String>)> {
        self.selected.iter().map(|(dim, set)| (*dim, set))
    }

    fn prune(&mut self, dimension: FilterDimension) {
        if self.selected.get(&dimension).is_some_and(BTreeSet::is_empty) {
            self.selected.remove(&dimension);
        }
    }
}

impl<S: AsRef<str>> FromIterator<(FilterDimension, S)> for FilterMap {
    fn from_iter<I: IntoIterator<Item = (FilterDimension, S)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (dimension, raw) in iter {
            map.insert(dimension, raw.as_ref());
        }
        map
    }
}

/// All inputs that influence the list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub(crate) search_text: String,
    pub(crate) filters: FilterMap,
    pub(crate) sort: SortField,
    pub(crate) order: SortOrder,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    /// Default state with the given page size (clamped into bounds)
    #[must_use]
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            search_text: String::new(),
            filters: FilterMap::new(),
            sort: SortField::Name,
            order: SortOrder::Asc,
            page: 1,
            page_size: clamp_page_size(page_size),
        }
    }

    /// Free-text search
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Selected filter values
    #[must_use]
    pub const fn filters(&self) -> &FilterMap {
        &self.filters
    }

    /// Sort field
    #[must_use]
    pub const fn sort(&self) -> SortField {
        self.sort
    }

    /// Sort order
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }

    /// Current page (1-based)
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Items per page
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Last page number for a result total, `None` when there are no results
    #[must_use]
    pub fn last_page(&self, total: u64) -> Option<u32> {
        if total == 0 {
            return None;
        }
        let pages = total.div_ceil(u64::from(self.page_size));
        Some(u32::try_from(pages).unwrap_or(u32::MAX))
    }

    /// Whether moving from `self` to `other` changes what the result set is
    ///
    /// Search text, filters, sort field and sort order all do; page and page
    /// size do not.
    #[must_use]
    pub fn scope_differs(&self, other: &Self) -> bool {
        self.search_text != other.search_text
            || self.filters != other.filters
            || self.sort != other.sort
            || self.order != other.order
    }
}

/// Clamp a page size into `PAGE_SIZE_MIN..=PAGE_SIZE_MAX`
#[must_use]
pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(PAGE_SIZE_MIN, PAGE_SIZE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_params_roundtrip() {
        for dim in FilterDimension::ALL {
            assert_eq!(FilterDimension::from_param(dim.param()), Some(dim));
        }
        assert_eq!(FilterDimension::from_param("licence"), None);
    }

    #[test]
    fn test_dimension_cycle_wraps() {
        assert_eq!(FilterDimension::Language.next(), FilterDimension::Category);
        assert_eq!(FilterDimension::Category.previous(), FilterDimension::Language);
    }

    #[test]
    fn test_sort_and_order_lenient_parse() {
        assert_eq!(SortField::from_param("releaseDate"), SortField::ReleaseDate);
        assert_eq!(SortField::from_param("releasedate"), SortField::Name);
        assert_eq!(SortField::from_param(""), SortField::Name);
        assert_eq!(SortOrder::from_param("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::from_param("DESC"), SortOrder::Asc);
    }

    #[test]
    fn test_filter_insert_drops_empty_and_duplicates() {
        let mut filters = FilterMap::new();
        assert!(filters.insert(FilterDimension::Category, "tools,, tools ,"));
        assert!(!filters.insert(FilterDimension::Category, "tools"));
        assert!(!filters.insert(FilterDimension::Category, "  "));

        let values: Vec<_> = filters.values(FilterDimension::Category).collect();
        assert_eq!(values, vec!["tools"]);
        assert_eq!(filters.selected_count(), 1);
    }

    #[test]
    fn test_filter_toggle_even_times_is_identity() {
        let mut filters: FilterMap = [(FilterDimension::License, "MIT")].into_iter().collect();
        let original = filters.clone();

        for _ in 0..4 {
            filters.toggle(FilterDimension::License, "Apache-2.0");
        }
        assert_eq!(filters, original);

        filters.toggle(FilterDimension::License, "MIT");
        filters.toggle(FilterDimension::License, "MIT");
        assert_eq!(filters, original);
    }

    #[test]
    fn test_filter_remove_last_value_prunes_dimension() {
        let mut filters = FilterMap::new();
        filters.insert(FilterDimension::Platform, "linux");
        filters.remove(FilterDimension::Platform, "linux");

        assert!(filters.is_empty());
        assert_eq!(filters, FilterMap::new());
    }

    #[test]
    fn test_last_page() {
        let mut state = QueryState::default();
        assert_eq!(state.last_page(0), None);
        assert_eq!(state.last_page(10), Some(1));
        assert_eq!(state.last_page(24), Some(1));
        assert_eq!(state.last_page(25), Some(2));
        assert_eq!(state.last_page(100), Some(5));

        state.page_size = 48;
        assert_eq!(state.last_page(100), Some(3));
    }

    #[test]
    fn test_scope_differs_ignores_paging() {
        let a = QueryState::default();
        let mut b = a.clone();
        b.page = 7;
        b.page_size = 12;
        assert!(!a.scope_differs(&b));

        b.order = SortOrder::Desc;
        assert!(a.scope_differs(&b));
    }
}
