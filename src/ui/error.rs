//! UI error types

use crate::browse::LocationError;
use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal setup, drawing or input failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Clipboard could not be accessed
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    /// The shareable location could not be read or written
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// An external browser could not be launched
    #[error("Failed to open {url}: {message}")]
    OpenLink { url: String, message: String },
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
