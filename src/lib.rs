//! Catalogr - a terminal browser for software catalogs
//!
//! This library keeps a search/filter/sort/page query in sync with a remote
//! paginated catalog API and with a shareable link, so any view can be
//! bookmarked and reopened exactly.

use thiserror::Error;

pub mod browse;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod query;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum CatalogrError {
    /// Catalog request error
    #[error("Catalog error: {0}")]
    RequestError(#[from] catalog::RequestError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Shareable location error
    #[error("Location error: {0}")]
    LocationError(#[from] browse::LocationError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// The catalog answered with an error the user has to act on
    #[error("{0}")]
    Unavailable(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CatalogrError {
    /// Message to show the user
    ///
    /// Catalog failures use their short user-facing text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::RequestError(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RequestError;

    #[test]
    fn test_user_message_hides_transport_details() {
        let err = CatalogrError::from(RequestError::Transport("tcp reset by peer".into()));
        assert_eq!(
            err.user_message(),
            "Could not reach the catalog. Check your connection and try again."
        );
    }

    #[test]
    fn test_user_message_is_plain_text() {
        let err = CatalogrError::Unavailable("No catalog entry with id 'geo'".into());
        assert_eq!(err.user_message(), "No catalog entry with id 'geo'");

        let err = CatalogrError::InvalidInput("entry id must not be empty".into());
        assert_eq!(err.user_message(), "Invalid input: entry id must not be empty");
    }
}
