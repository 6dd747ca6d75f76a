//! Query-string encoding and decoding
//!
//! Maps a `QueryState` to its canonical query string and back. The same string
//! is used for the shareable location and as the query of the list request.
//!
//! Encoding rules:
//! - `q` and the filter dimensions are omitted when empty
//! - `page`, `page_size`, `sort` and `order` are always emitted
//! - multi-valued filters are comma-joined into a single parameter
//!
//! Decoding never fails: malformed values fall back to defaults.

use super::types::{
    FilterDimension, PAGE_SIZE_MAX, PAGE_SIZE_MIN, QueryState, SortField, SortOrder,
    clamp_page_size, split_tokens,
};
use url::form_urlencoded;

/// Search text parameter
pub const PARAM_SEARCH: &str = "q";
/// Page number parameter
pub const PARAM_PAGE: &str = "page";
/// Page size parameter
pub const PARAM_PAGE_SIZE: &str = "page_size";
/// Sort field parameter
pub const PARAM_SORT: &str = "sort";
/// Sort order parameter
pub const PARAM_ORDER: &str = "order";

/// Fallbacks used while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Page size used when `page_size` is missing, unparsable or zero
    pub page_size_fallback: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            page_size_fallback: super::types::DEFAULT_PAGE_SIZE,
        }
    }
}

impl DecodeOptions {
    /// Options with a specific page size fallback
    #[must_use]
    pub const fn with_page_size(page_size_fallback: u32) -> Self {
        Self { page_size_fallback }
    }
}

/// Encode the full canonical query string (filters, search, paging, sort)
///
/// # Examples
/// ```
/// use catalogr::query::{QueryState, encode};
///
/// let state = QueryState::default();
/// assert_eq!(encode(&state), "page=1&page_size=24&sort=name&order=asc");
/// ```
#[must_use]
pub fn encode(state: &QueryState) -> String {
    let mut pairs = scope_pairs(state);
    pairs.push((PARAM_PAGE, state.page.to_string()));
    pairs.push((PARAM_PAGE_SIZE, state.page_size.to_string()));
    pairs.push((PARAM_SORT, serialize(state.sort.param())));
    pairs.push((PARAM_ORDER, serialize(state.order.param())));
    join(&pairs)
}

/// Encode only the search and filter portion
///
/// This is the query the filter vocabulary is requested with; it is unaffected by
/// paging and sorting. Empty when nothing is searched or filtered.
#[must_use]
pub fn encode_filters(state: &QueryState) -> String {
    join(&scope_pairs(state))
}

/// Decode a query string with default fallbacks
#[must_use]
pub fn decode(query: &str) -> QueryState {
    decode_with(query, &DecodeOptions::default())
}

/// Decode a query string
///
/// A leading `?` is ignored. Unknown parameters are ignored. Repeated filter
/// parameters are merged; for scalar parameters the last occurrence wins.
#[must_use]
pub fn decode_with(query: &str, options: &DecodeOptions) -> QueryState {
    let query = query.trim();
    let query = query.strip_prefix('?').unwrap_or(query);
    let page_size_fallback = clamp_page_size(options.page_size_fallback);

    let mut state = QueryState::with_page_size(page_size_fallback);

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            PARAM_SEARCH => state.search_text = value.into_owned(),
            PARAM_PAGE => state.page = parse_clamped(&value, 1, 1, u32::MAX),
            PARAM_PAGE_SIZE => {
                state.page_size =
                    parse_clamped(&value, page_size_fallback, PAGE_SIZE_MIN, PAGE_SIZE_MAX);
            }
            PARAM_SORT => state.sort = SortField::from_param(&value),
            PARAM_ORDER => state.order = SortOrder::from_param(&value),
            other => {
                if let Some(dimension) = FilterDimension::from_param(other) {
                    state.filters.insert(dimension, &value);
                }
            }
        }
    }

    state
}

/// Parse an integer parameter
///
/// Unparsable or zero values yield `fallback`; anything else is clamped into
/// `min..=max`.
fn parse_clamped(raw: &str, fallback: u32, min: u32, max: u32) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(0) | Err(_) => fallback,
        Ok(n) => {
            let clamped = n.clamp(i64::from(min), i64::from(max));
            u32::try_from(clamped).unwrap_or(fallback)
        }
    }
}

fn scope_pairs(state: &QueryState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if !state.search_text.is_empty() {
        pairs.push((PARAM_SEARCH, serialize(&state.search_text)));
    }
    for (dimension, values) in state.filters.iter() {
        let joined = values
            .iter()
            .map(|v| serialize(v))
            .collect::<Vec<_>>()
            .join(",");
        pairs.push((dimension.param(), joined));
    }
    pairs
}

fn serialize(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn join(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterMap;

    fn sample_state() -> QueryState {
        let mut state = QueryState::default();
        state.search_text = "map viewer".to_string();
        state.filters = [
            (FilterDimension::Category, "tools"),
            (FilterDimension::Category, "geo & maps"),
            (FilterDimension::License, "MIT"),
            (FilterDimension::Language, "it"),
        ]
        .into_iter()
        .collect::<FilterMap>();
        state.sort = SortField::ReleaseDate;
        state.order = SortOrder::Desc;
        state.page = 4;
        state.page_size = 12;
        state
    }

    #[test]
    fn test_encode_default_state_emits_paging_and_sort() {
        let query = encode(&QueryState::default());
        assert_eq!(query, "page=1&page_size=24&sort=name&order=asc");
    }

    #[test]
    fn test_encode_joins_filter_values_with_commas() {
        let mut state = QueryState::default();
        state.filters.insert(FilterDimension::Category, "tools");
        state.filters.insert(FilterDimension::Category, "games");

        let query = encode(&state);
        assert!(query.starts_with("category=games,tools&"));
    }

    #[test]
    fn test_encode_filters_omits_paging_and_sort() {
        let state = sample_state();
        let filter_query = encode_filters(&state);

        assert_eq!(
            filter_query,
            "q=map+viewer&category=geo+%26+maps,tools&license=MIT&language=it"
        );
        assert!(!filter_query.contains("page"));
        assert!(!filter_query.contains("sort"));
        assert_eq!(encode_filters(&QueryState::default()), "");
    }

    #[test]
    fn test_roundtrip_canonical_state() {
        let state = sample_state();
        assert_eq!(decode(&encode(&state)), state);

        let decoded = decode("category=tools&page=3");
        assert_eq!(decode(&encode(&decoded)), decoded);
    }

    #[test]
    fn test_decode_deep_link() {
        let state = decode("?category=tools&page=3");

        assert_eq!(state.page(), 3);
        assert_eq!(state.page_size(), 24);
        let categories: Vec<_> = state.filters().values(FilterDimension::Category).collect();
        assert_eq!(categories, vec!["tools"]);
    }

    #[test]
    fn test_decode_drops_phantom_filter_values() {
        let state = decode("platform=linux,,windows,&type=");

        let platforms: Vec<_> = state.filters().values(FilterDimension::Platform).collect();
        assert_eq!(platforms, vec!["linux", "windows"]);
        assert_eq!(state.filters().values(FilterDimension::Type).count(), 0);
    }

    #[test]
    fn test_decode_numeric_clamping() {
        assert_eq!(decode("page_size=999").page_size(), 48);
        assert_eq!(decode("page_size=0").page_size(), 24);
        assert_eq!(decode("page_size=-3").page_size(), 1);
        assert_eq!(decode("page_size=abc").page_size(), 24);
        assert_eq!(decode("page=abc").page(), 1);
        assert_eq!(decode("page=0").page(), 1);
        assert_eq!(decode("page=-2").page(), 1);
        assert_eq!(decode("page=4000000").page(), 4_000_000);
    }

    #[test]
    fn test_decode_uses_supplied_page_size_fallback() {
        let options = DecodeOptions::with_page_size(12);
        assert_eq!(decode_with("", &options).page_size(), 12);
        assert_eq!(decode_with("page_size=0", &options).page_size(), 12);
        assert_eq!(decode_with("page_size=48", &options).page_size(), 48);
    }

    #[test]
    fn test_decode_garbage_sort_and_order_fall_back() {
        let state = decode("sort=popularity&order=sideways");
        assert_eq!(state.sort(), SortField::Name);
        assert_eq!(state.order(), SortOrder::Asc);
    }

    #[test]
    fn test_decode_ignores_unknown_params() {
        assert_eq!(decode("utm_source=mail&foo=bar"), QueryState::default());
    }
}
