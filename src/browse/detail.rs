//! Detail loader
//!
//! Tracks the currently selected entry and the outcome of its by-id fetch.
//! Only the response for the selected id is ever applied.

use crate::catalog::{CatalogDetail, RequestError};
use tracing::{debug, warn};

/// What the detail slot currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    /// Nothing is selected
    #[default]
    NoSelection,
    /// A request for `id` is in flight
    Loading { id: String },
    /// The entry was fetched
    Loaded(Box<CatalogDetail>),
    /// The server does not know `id`
    NotFound { id: String },
    /// The fetch failed for another reason
    Unavailable { id: String, message: String },
}

impl DetailState {
    /// Id this state belongs to, if any
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::NoSelection => None,
            Self::Loading { id } | Self::NotFound { id } | Self::Unavailable { id, .. } => {
                Some(id)
            }
            Self::Loaded(detail) => Some(&detail.summary.id),
        }
    }

    /// Whether a fetch is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Selection-driven loader for `CatalogDetail`
#[derive(Debug, Clone, Default)]
pub struct DetailLoader {
    selected: Option<String>,
    state: DetailState,
}

impl DetailLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected id
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub const fn state(&self) -> &DetailState {
        &self.state
    }

    /// Change the selection
    ///
    /// Returns the id to fetch, if a request is needed. `None` clears the slot
    /// immediately. Selecting the id that is already selected does nothing.
    pub fn select(&mut self, id: Option<&str>) -> Option<String> {
        let id = id.map(str::trim).filter(|id| !id.is_empty());

        if id == self.selected.as_deref() {
            return None;
        }

        match id {
            None => {
                self.selected = None;
                self.state = DetailState::NoSelection;
                None
            }
            Some(id) => {
                self.selected = Some(id.to_string());
                self.state = DetailState::Loading { id: id.to_string() };
                Some(id.to_string())
            }
        }
    }

    /// Select `id`, or clear the selection if it is already selected
    pub fn toggle(&mut self, id: &str) -> Option<String> {
        if self.selected.as_deref() == Some(id.trim()) {
            self.select(None)
        } else {
            self.select(Some(id))
        }
    }

    /// Request the selected entry again, e.g. after a failure
    pub fn reload(&mut self) -> Option<String> {
        let id = self.selected.clone()?;
        self.state = DetailState::Loading { id: id.clone() };
        Some(id)
    }

    /// Apply a fetch result
    ///
    /// Returns false if the response was for an id that is no longer selected.
    pub fn apply(&mut self, id: &str, result: Result<CatalogDetail, RequestError>) -> bool {
        if self.selected.as_deref() != Some(id) {
            debug!(id, selected = ?self.selected, "discarding stale detail response");
            return false;
        }

        self.state = match result {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(err) if err.is_not_found() => DetailState::NotFound { id: id.to_string() },
            Err(err) => {
                warn!(id, error = %err, "failed to load catalog entry");
                DetailState::Unavailable {
                    id: id.to_string(),
                    message: err.user_message(),
                }
            }
        };
        true
    }
}
