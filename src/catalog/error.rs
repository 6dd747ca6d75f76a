//! Catalog request errors
//!
//! - **`Transport`**: the request never produced a response (DNS, connect, TLS, timeout)
//! - **`Status`**: the server answered with a non-2xx status
//! - **`Decode`**: the body was not the expected JSON shape
//! - **`InvalidUrl`**: the configured base URL or entry id cannot form a URL
//!
//! For the user, decode failures read the same as status failures.

use thiserror::Error;

/// Errors returned by catalog requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network or transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("Request failed with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl RequestError {
    /// Whether the server reported the resource as unknown
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Short, user-facing description of the failure
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => {
                "Could not reach the catalog. Check your connection and try again.".to_string()
            }
            Self::Status { .. } | Self::Decode(_) => {
                "The catalog could not be loaded right now. Please try again.".to_string()
            }
            Self::InvalidUrl(url) => format!("The catalog address is not valid: {url}"),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
