//! Browse session synchronization
//!
//! `BrowseSession` keeps the query state, the shareable location, the result
//! list and the filter vocabulary consistent with each other. It never performs
//! I/O itself: every state change returns the `Command`s the caller must run,
//! and every response is fed back through an `on_*_loaded` method.
//!
//! # Pipeline
//!
//! ```text
//! update(|store| ...)
//!     ↓
//! state unchanged? ── yes → no commands
//!     ↓ no
//! search/filters/sort/order changed and not first pass? → page = 1
//!     ↓
//! encode → PublishLocation(query)
//!        → FetchList { query }
//!        → FetchVocabulary { filter_query }   (only if the filter query changed)
//!     ↓
//! on_list_loaded(query, result)
//!     ├─ query is not current → discard
//!     ├─ page > last page     → clamp page, run pipeline again
//!     ├─ Ok                   → replace page wholesale
//!     └─ Err                  → keep last good page, report failure
//! ```

use super::detail::{DetailLoader, DetailState};
use super::store::QueryStore;
use crate::catalog::{CatalogDetail, CatalogPage, FilterVocabulary, RequestError};
use crate::query::{DecodeOptions, QueryState, decode_with, encode, encode_filters};
use tracing::{debug, warn};

/// Side effect requested by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the shareable location with this query string
    PublishLocation(String),
    /// Request the list page for this query string
    FetchList { query: String },
    /// Request the filter vocabulary for this filter query string
    FetchVocabulary { filter_query: String },
    /// Request the full entry for this id
    FetchDetail { id: String },
}

/// State of the list lane
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListStatus {
    /// No request outstanding
    #[default]
    Idle,
    /// A request for the current query is outstanding
    Loading,
    /// The last request for the current query failed
    Failed(String),
}

/// The synchronizer between query state, location and remote results
#[derive(Debug, Clone)]
pub struct BrowseSession {
    store: QueryStore,
    synced_once: bool,
    query: String,
    filter_query: String,
    page: Option<CatalogPage>,
    page_query: Option<String>,
    vocabulary: FilterVocabulary,
    status: ListStatus,
    detail: DetailLoader,
    detail_open: bool,
}

impl BrowseSession {
    /// Start a session from a hydrated query string
    ///
    /// The first synchronization pass never resets the page, so a deep link to
    /// page 5 stays on page 5.
    #[must_use]
    pub fn hydrate(query: &str, options: &DecodeOptions) -> (Self, Vec<Command>) {
        let mut session = Self {
            store: QueryStore::new(decode_with(query, options)),
            synced_once: false,
            query: String::new(),
            filter_query: String::new(),
            page: None,
            page_query: None,
            vocabulary: FilterVocabulary::default(),
            status: ListStatus::Idle,
            detail: DetailLoader::new(),
            detail_open: false,
        };
        let commands = session.synchronize();
        (session, commands)
    }

    /// Current query state
    #[must_use]
    pub const fn state(&self) -> &QueryState {
        self.store.state()
    }

    /// Canonical query string of the current state
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Search and filter portion of the current query string
    #[must_use]
    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    /// Whether the first synchronization pass has run
    #[must_use]
    pub const fn has_synced(&self) -> bool {
        self.synced_once
    }

    /// Last successfully loaded page
    #[must_use]
    pub const fn page(&self) -> Option<&CatalogPage> {
        self.page.as_ref()
    }

    /// Query string the displayed page was loaded for
    #[must_use]
    pub fn page_query(&self) -> Option<&str> {
        self.page_query.as_deref()
    }

    /// Whether the displayed page belongs to the current query
    #[must_use]
    pub fn page_is_current(&self) -> bool {
        self.page_query.as_deref() == Some(self.query.as_str())
    }

    /// Last page number for the displayed result, if known
    #[must_use]
    pub fn last_page(&self) -> Option<u32> {
        self.page
            .as_ref()
            .and_then(|page| self.state().last_page(page.total))
    }

    /// Current filter vocabulary (possibly stale)
    #[must_use]
    pub const fn vocabulary(&self) -> &FilterVocabulary {
        &self.vocabulary
    }

    /// State of the list lane
    #[must_use]
    pub const fn status(&self) -> &ListStatus {
        &self.status
    }

    /// State of the detail lane
    #[must_use]
    pub const fn detail(&self) -> &DetailState {
        self.detail.state()
    }

    /// Id of the selected entry
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.detail.selected()
    }

    /// Apply a mutation to the query state and synchronize
    ///
    /// Returns no commands when the mutation left the state unchanged.
    pub fn update(&mut self, mutate: impl FnOnce(&mut QueryStore)) -> Vec<Command> {
        let before = self.store.state().clone();
        mutate(&mut self.store);

        if self.store.state() == &before {
            return Vec::new();
        }

        if self.synced_once && before.scope_differs(self.store.state()) {
            self.store.set_page(1);
        }

        self.synchronize()
    }

    /// Issue the list and vocabulary requests for the current query again
    pub fn retry(&mut self) -> Vec<Command> {
        self.status = ListStatus::Loading;
        vec![
            Command::FetchList {
                query: self.query.clone(),
            },
            Command::FetchVocabulary {
                filter_query: self.filter_query.clone(),
            },
        ]
    }

    /// Apply a list response
    pub fn on_list_loaded(
        &mut self,
        query: &str,
        result: Result<CatalogPage, RequestError>,
    ) -> Vec<Command> {
        if query != self.query {
            debug!(query, current = %self.query, "discarding stale list response");
            return Vec::new();
        }

        match result {
            Ok(page) => {
                let requested = self.state().page();
                if let Some(last) = self.state().last_page(page.total) {
                    if requested > last {
                        debug!(requested, last, total = page.total, "page out of range, clamping");
                        return self.update(|store| store.set_page(last));
                    }
                }
                self.page = Some(page);
                self.page_query = Some(self.query.clone());
                self.status = ListStatus::Idle;
            }
            Err(err) => {
                warn!(query, error = %err, "failed to load catalog page");
                self.status = ListStatus::Failed(err.user_message());
            }
        }
        Vec::new()
    }

    /// Apply a vocabulary response
    ///
    /// Failures are logged and the previous vocabulary stays in place.
    pub fn on_vocabulary_loaded(
        &mut self,
        filter_query: &str,
        result: Result<FilterVocabulary, RequestError>,
    ) {
        if filter_query != self.filter_query {
            debug!(filter_query, current = %self.filter_query, "discarding stale vocabulary");
            return;
        }

        match result {
            Ok(vocabulary) => self.vocabulary = vocabulary,
            Err(err) => warn!(filter_query, error = %err, "failed to load filter vocabulary"),
        }
    }

    /// Open the detail view for `id`
    pub fn open_detail(&mut self, id: &str) -> Vec<Command> {
        self.detail_open = true;
        self.detail
            .select(Some(id))
            .map(|id| Command::FetchDetail { id })
            .into_iter()
            .collect()
    }

    /// Leave the detail view and republish the current query string
    ///
    /// The query may have been clamped while the view was open, so the
    /// location always gets the encoding in effect now.
    pub fn close_detail(&mut self) -> Vec<Command> {
        self.detail.select(None);
        if std::mem::take(&mut self.detail_open) {
            vec![Command::PublishLocation(self.query.clone())]
        } else {
            Vec::new()
        }
    }

    /// Toggle the local selection without entering the detail view
    pub fn toggle_selection(&mut self, id: &str) -> Vec<Command> {
        self.detail
            .toggle(id)
            .map(|id| Command::FetchDetail { id })
            .into_iter()
            .collect()
    }

    /// Fetch the selected entry again
    pub fn reload_detail(&mut self) -> Vec<Command> {
        self.detail
            .reload()
            .map(|id| Command::FetchDetail { id })
            .into_iter()
            .collect()
    }

    /// Apply a detail response
    pub fn on_detail_loaded(&mut self, id: &str, result: Result<CatalogDetail, RequestError>) {
        self.detail.apply(id, result);
    }

    fn synchronize(&mut self) -> Vec<Command> {
        let state = self.store.state();
        let query = encode(state);
        let filter_query = encode_filters(state);
        let first_pass = !self.synced_once;

        let mut commands = Vec::with_capacity(3);
        if first_pass || query != self.query {
            commands.push(Command::PublishLocation(query.clone()));
        }
        commands.push(Command::FetchList {
            query: query.clone(),
        });
        if first_pass || filter_query != self.filter_query {
            commands.push(Command::FetchVocabulary {
                filter_query: filter_query.clone(),
            });
        }

        self.query = query;
        self.filter_query = filter_query;
        self.status = ListStatus::Loading;
        self.synced_once = true;
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterDimension, SortField};
    use crate::testing::{sample_detail, sample_page};

    fn start(query: &str) -> (BrowseSession, Vec<Command>) {
        BrowseSession::hydrate(query, &DecodeOptions::default())
    }

    fn list_query(commands: &[Command]) -> Option<&str> {
        commands.iter().find_map(|cmd| match cmd {
            Command::FetchList { query } => Some(query.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_first_pass_keeps_deep_linked_page() {
        let (session, commands) = start("?category=tools&page=3");

        assert_eq!(session.state().page(), 3);
        assert_eq!(
            commands,
            vec![
                Command::PublishLocation("category=tools&page=3&page_size=24&sort=name&order=asc".into()),
                Command::FetchList {
                    query: "category=tools&page=3&page_size=24&sort=name&order=asc".into()
                },
                Command::FetchVocabulary {
                    filter_query: "category=tools".into()
                },
            ]
        );
        assert!(session.has_synced());
        assert_eq!(session.status(), &ListStatus::Loading);
    }

    #[test]
    fn test_search_change_resets_page() {
        let (mut session, _) = start("page=5");

        let commands = session.update(|store| store.set_search_text("map"));

        assert_eq!(session.state().page(), 1);
        assert_eq!(
            list_query(&commands),
            Some("q=map&page=1&page_size=24&sort=name&order=asc")
        );
    }

    #[test]
    fn test_page_size_change_keeps_page() {
        let (mut session, _) = start("page=5");

        let commands = session.update(|store| store.set_page_size(12));

        assert_eq!(session.state().page(), 5);
        assert_eq!(list_query(&commands), Some("page=5&page_size=12&sort=name&order=asc"));
        assert!(
            !commands
                .iter()
                .any(|cmd| matches!(cmd, Command::FetchVocabulary { .. }))
        );
    }

    #[test]
    fn test_sort_change_resets_page() {
        let (mut session, _) = start("page=4");
        session.update(|store| store.set_sort(SortField::ReleaseDate));
        assert_eq!(session.state().page(), 1);
    }

    #[test]
    fn test_unchanged_state_issues_nothing() {
        let (mut session, _) = start("license=MIT&page=2");
        let commands = session.update(|store| {
            store.toggle_filter_value(FilterDimension::License, "GPL-3.0");
            store.toggle_filter_value(FilterDimension::License, "GPL-3.0");
        });
        assert!(commands.is_empty());
        assert_eq!(session.state().page(), 2);
    }

    #[test]
    fn test_clamp_to_last_page() {
        let (mut session, commands) = start("page=3");
        let query = list_query(&commands).unwrap().to_string();

        let follow_up = session.on_list_loaded(&query, Ok(sample_page(3, 24, 10)));

        assert_eq!(session.state().page(), 1);
        assert!(session.page().is_none());
        assert_eq!(
            list_query(&follow_up),
            Some("page=1&page_size=24&sort=name&order=asc")
        );

        let clamped = session.query().to_string();
        session.on_list_loaded(&clamped, Ok(sample_page(1, 24, 10)));
        assert_eq!(session.page().map(|p| p.total), Some(10));
        assert!(session.page_is_current());
    }

    #[test]
    fn test_clamp_larger_total() {
        let (mut session, commands) = start("page=10");
        let query = list_query(&commands).unwrap().to_string();

        session.on_list_loaded(&query, Ok(sample_page(10, 24, 100)));

        assert_eq!(session.state().page(), 5);
    }

    #[test]
    fn test_empty_result_keeps_page() {
        let (mut session, commands) = start("q=nothing&page=1");
        let query = list_query(&commands).unwrap().to_string();

        let follow_up = session.on_list_loaded(&query, Ok(sample_page(1, 24, 0)));

        assert!(follow_up.is_empty());
        assert_eq!(session.state().page(), 1);
        assert!(session.page().is_some_and(CatalogPage::is_empty_result));
    }

    #[test]
    fn test_stale_list_response_is_discarded() {
        let (mut session, first) = start("q=a");
        let query_a = list_query(&first).unwrap().to_string();
        let second = session.update(|store| store.set_search_text("b"));
        let query_b = list_query(&second).unwrap().to_string();

        session.on_list_loaded(&query_b, Ok(sample_page(1, 24, 2)));
        session.on_list_loaded(&query_a, Ok(sample_page(1, 24, 40)));

        assert_eq!(session.page().map(|p| p.total), Some(2));
        assert!(session.page_is_current());
    }

    #[test]
    fn test_list_failure_keeps_last_good_page() {
        let (mut session, commands) = start("");
        let query = list_query(&commands).unwrap().to_string();
        session.on_list_loaded(&query, Ok(sample_page(1, 24, 30)));

        let next = session.update(QueryStore::next_page);
        let next_query = list_query(&next).unwrap().to_string();
        session.on_list_loaded(&next_query, Err(RequestError::Transport("refused".into())));

        assert_eq!(session.page().map(|p| p.total), Some(30));
        assert!(matches!(session.status(), ListStatus::Failed(_)));

        let retry = session.retry();
        assert_eq!(list_query(&retry), Some(next_query.as_str()));
        assert_eq!(session.status(), &ListStatus::Loading);
    }

    #[test]
    fn test_vocabulary_failure_keeps_previous() {
        let (mut session, _) = start("");
        let vocabulary = FilterVocabulary {
            licenses: vec!["MIT".into()],
            ..FilterVocabulary::default()
        };
        session.on_vocabulary_loaded("", Ok(vocabulary.clone()));

        session.on_vocabulary_loaded("", Err(RequestError::Transport("refused".into())));

        assert_eq!(session.vocabulary(), &vocabulary);
    }

    #[test]
    fn test_stale_vocabulary_is_discarded() {
        let (mut session, _) = start("");
        session.update(|store| {
            store.toggle_filter_value(FilterDimension::Category, "tools");
        });

        let stale = FilterVocabulary {
            categories: vec!["everything".into()],
            ..FilterVocabulary::default()
        };
        session.on_vocabulary_loaded("", Ok(stale));

        assert!(session.vocabulary().is_empty());
        assert_eq!(session.filter_query(), "category=tools");
    }

    #[test]
    fn test_detail_roundtrip_restores_query() {
        let (mut session, _) = start("license=MIT&page=2");
        let query = session.query().to_string();

        let commands = session.open_detail("geo");
        assert_eq!(commands, vec![Command::FetchDetail { id: "geo".into() }]);

        session.on_detail_loaded("geo", Ok(sample_detail("geo")));
        assert!(matches!(session.detail(), DetailState::Loaded(_)));

        let commands = session.close_detail();
        assert_eq!(commands, vec![Command::PublishLocation(query)]);
        assert_eq!(session.detail(), &DetailState::NoSelection);
    }

    #[test]
    fn test_closing_detail_publishes_clamped_query() {
        let (mut session, commands) = start("");
        let query = list_query(&commands).unwrap().to_string();
        session.on_list_loaded(&query, Ok(sample_page(1, 24, 100)));

        session.update(|store| {
            store.toggle_filter_value(FilterDimension::License, "MIT");
        });
        let commands = session.update(QueryStore::next_page);
        let page_two = list_query(&commands).unwrap().to_string();
        assert_eq!(page_two, "license=MIT&page=2&page_size=24&sort=name&order=asc");

        session.open_detail("entry-1");
        let commands = session.on_list_loaded(&page_two, Ok(sample_page(2, 24, 10)));
        let clamped = "license=MIT&page=1&page_size=24&sort=name&order=asc";
        assert!(commands.contains(&Command::PublishLocation(clamped.into())));
        assert_eq!(session.query(), clamped);

        let commands = session.close_detail();
        assert_eq!(commands, vec![Command::PublishLocation(clamped.into())]);
        assert!(session.close_detail().is_empty());
    }

    #[test]
    fn test_toggle_selection() {
        let (mut session, _) = start("");
        assert_eq!(
            session.toggle_selection("geo"),
            vec![Command::FetchDetail { id: "geo".into() }]
        );
        assert!(session.toggle_selection("geo").is_empty());
        assert_eq!(session.selected_id(), None);
    }
}
