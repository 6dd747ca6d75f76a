//! Application state for the catalog browser
//!
//! Wraps the `BrowseSession` with everything that only matters on screen:
//! the current mode, the list cursor, the filter picker and status messages.

use super::matcher::OptionMatcher;
use crate::browse::{BrowseSession, Command, QueryStore, permalink};
use crate::catalog::{CatalogSummary, FilterVocabulary};
use crate::query::{FilterDimension, QueryState};
use crate::ui::output::MessageLevel;
use std::time::{Duration, Instant};

/// Current mode of the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing the result list
    #[default]
    Normal,
    /// Typing edits the search text
    Search,
    /// Filter picker overlay is open
    Filters,
    /// Entry detail modal is open
    Detail,
    /// Help overlay is visible
    Help,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// Message level (success, error, warning, info)
    pub level: MessageLevel,
    /// Message text
    pub text: String,
    /// When the message was created
    pub created_at: Instant,
}

impl StatusMessage {
    /// Create a new status message
    #[must_use]
    pub fn new(level: MessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Filter picker: one dimension at a time, options narrowed by a typed pattern
#[derive(Debug, Default)]
pub struct FilterPicker {
    /// Dimension whose options are listed
    pub dimension: FilterDimension,
    /// Fuzzy pattern typed by the user
    pub pattern: String,
    /// Cursor within `matches`
    pub cursor: usize,
    /// Options on offer for `dimension`
    pub options: Vec<String>,
    /// Indices into `options` matching `pattern`
    pub matches: Vec<usize>,
    matcher: OptionMatcher,
}

impl FilterPicker {
    /// Recompute the listed options
    ///
    /// Values that are selected but no longer offered by the vocabulary stay
    /// listed so they can be deselected.
    pub fn refresh(&mut self, vocabulary: &FilterVocabulary, state: &QueryState) {
        let mut options = vocabulary.options(self.dimension).to_vec();
        for value in state.filters().values(self.dimension) {
            if !options.iter().any(|option| option == value) {
                options.push(value.to_string());
            }
        }

        self.matches = self.matcher.matches(&options, &self.pattern);
        self.options = options;
        self.cursor = self.cursor.min(self.matches.len().saturating_sub(1));
    }

    /// Option under the cursor
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.matches
            .get(self.cursor)
            .and_then(|&idx| self.options.get(idx))
            .map(String::as_str)
    }

    pub fn next_dimension(&mut self) {
        self.show(self.dimension.next());
    }

    pub fn previous_dimension(&mut self) {
        self.show(self.dimension.previous());
    }

    fn show(&mut self, dimension: FilterDimension) {
        self.dimension = dimension;
        self.pattern.clear();
        self.cursor = 0;
    }

    pub fn push_char(&mut self, c: char) {
        self.pattern.push(c);
        self.cursor = 0;
    }

    pub fn pop_char(&mut self) {
        self.pattern.pop();
        self.cursor = 0;
    }

    pub const fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub const fn cursor_down(&mut self) {
        if self.cursor + 1 < self.matches.len() {
            self.cursor += 1;
        }
    }
}

/// Application state for the browser
#[derive(Debug)]
pub struct App {
    /// The synchronized query session
    pub session: BrowseSession,
    /// Current UI mode
    pub mode: Mode,
    /// Cursor position in the result list
    pub cursor: usize,
    /// Scroll offset for the result list
    pub scroll_offset: usize,
    /// Number of visible result rows (updated during render)
    pub visible_height: usize,
    /// Filter picker state
    pub picker: FilterPicker,
    /// Title shown in the header
    pub title: String,
    web_url: Option<String>,
    shown_query: Option<String>,
    messages: Vec<StatusMessage>,
    message_ttl: Duration,
}

impl App {
    /// Create the state around a hydrated session
    #[must_use]
    pub fn new(session: BrowseSession, title: String, web_url: Option<String>) -> Self {
        Self {
            session,
            mode: Mode::Normal,
            cursor: 0,
            scroll_offset: 0,
            visible_height: 10,
            picker: FilterPicker::default(),
            title,
            web_url,
            shown_query: None,
            messages: Vec::new(),
            message_ttl: Duration::from_secs(4),
        }
    }

    /// Entries of the displayed page
    #[must_use]
    pub fn entries(&self) -> &[CatalogSummary] {
        self.session
            .page()
            .map_or(&[][..], |page| page.items.as_slice())
    }

    /// Entry under the cursor
    #[must_use]
    pub fn current_entry(&self) -> Option<&CatalogSummary> {
        self.entries().get(self.cursor)
    }

    /// Shareable link for the current query
    #[must_use]
    pub fn permalink(&self) -> String {
        permalink(self.web_url.as_deref(), self.session.query())
    }

    /// Apply a query mutation through the session
    pub fn update(&mut self, mutate: impl FnOnce(&mut QueryStore)) -> Vec<Command> {
        self.session.update(mutate)
    }

    /// Reset the cursor when a different page has been rendered
    pub fn sync_cursor(&mut self) {
        let page_query = self.session.page_query().map(str::to_string);
        if page_query != self.shown_query {
            self.shown_query = page_query;
            self.cursor = 0;
            self.scroll_offset = 0;
        }
        self.cursor = self.cursor.min(self.entries().len().saturating_sub(1));
        self.adjust_scroll();
    }

    /// Refresh the filter picker from the current vocabulary
    pub fn refresh_picker(&mut self) {
        self.picker
            .refresh(self.session.vocabulary(), self.session.state());
    }

    /// Move cursor up
    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor down
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.entries().len() {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor to the first entry
    pub fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    /// Move cursor to the last entry
    pub fn jump_to_end(&mut self) {
        self.cursor = self.entries().len().saturating_sub(1);
        self.adjust_scroll();
    }

    /// Adjust scroll offset to keep cursor visible
    const fn adjust_scroll(&mut self) {
        if self.visible_height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self.cursor.saturating_sub(self.visible_height - 1);
        }
    }

    /// Add a status message
    pub fn add_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text.into()));
    }

    /// Get non-expired messages
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    /// Clean up expired messages
    pub fn cleanup_messages(&mut self) {
        self.messages.retain(|m| !m.is_expired(self.message_ttl));
    }
}
