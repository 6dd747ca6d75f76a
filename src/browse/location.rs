//! Shareable location
//!
//! The location is the outside world's copy of the canonical query string. It
//! is read once at startup (`hydrate`) and then only written (`replace`); it is
//! never treated as a live source of state.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors raised by a location backend
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Failed to access location file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a catalog link: {0}")]
    InvalidLink(String),
}

/// Where the canonical query string is mirrored
pub trait Location {
    /// Read the query string the session should start from
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if the backing store cannot be read.
    fn hydrate(&mut self) -> Result<String, LocationError>;

    /// Replace the current entry with `query`
    ///
    /// Never adds a history entry.
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if the backing store cannot be written.
    fn replace(&mut self, query: &str) -> Result<(), LocationError>;
}

/// In-memory location with a navigation history
///
/// `replace` overwrites the newest history entry; `push` is only used to
/// model explicit navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    history: Vec<String>,
    replacements: usize,
}

impl MemoryLocation {
    /// Location whose only history entry is `query`
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            history: vec![query.into()],
            replacements: 0,
        }
    }

    /// Current query string
    #[must_use]
    pub fn current(&self) -> &str {
        self.history.last().map_or("", String::as_str)
    }

    /// All history entries, oldest first
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Number of `replace` calls so far
    #[must_use]
    pub const fn replacements(&self) -> usize {
        self.replacements
    }

    /// Navigate to a new entry
    pub fn push(&mut self, query: impl Into<String>) {
        self.history.push(query.into());
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("")
    }
}

impl Location for MemoryLocation {
    fn hydrate(&mut self) -> Result<String, LocationError> {
        Ok(self.current().to_string())
    }

    fn replace(&mut self, query: &str) -> Result<(), LocationError> {
        self.replacements += 1;
        match self.history.last_mut() {
            Some(last) => query.clone_into(last),
            None => self.history.push(query.to_string()),
        }
        Ok(())
    }
}

/// Location persisted to a file so the next session resumes the same view
///
/// An explicit link given at construction wins over the file contents.
#[derive(Debug, Clone)]
pub struct StateFileLocation {
    path: PathBuf,
    initial: Option<String>,
}

impl StateFileLocation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            initial: None,
        }
    }

    /// Start from `query` instead of the persisted one
    #[must_use]
    pub fn with_initial(mut self, query: impl Into<String>) -> Self {
        self.initial = Some(query.into());
        self
    }

    /// `<data_local_dir>/catalogr/last_query`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("catalogr").join("last_query"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> LocationError {
        LocationError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Location for StateFileLocation {
    fn hydrate(&mut self) -> Result<String, LocationError> {
        if let Some(initial) = self.initial.take() {
            return Ok(initial);
        }
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.trim().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn replace(&mut self, query: &str) -> Result<(), LocationError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, query).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), query, "location replaced");
        Ok(())
    }
}

/// Extract the query string from a shared link
///
/// Accepts a full `http(s)` URL, a `?`-prefixed query or a bare query string.
///
/// # Errors
///
/// Returns `LocationError::InvalidLink` for URLs with another scheme.
///
/// # Examples
/// ```
/// use catalogr::browse::query_from_link;
///
/// let query = query_from_link("https://catalog.example/?category=tools&page=3").unwrap();
/// assert_eq!(query, "category=tools&page=3");
/// assert_eq!(query_from_link("?page=2").unwrap(), "page=2");
/// ```
pub fn query_from_link(link: &str) -> Result<String, LocationError> {
    let link = link.trim();

    if let Some(query) = link.strip_prefix('?') {
        return Ok(query.to_string());
    }

    if link.contains("://") {
        let url = Url::parse(link).map_err(|e| LocationError::InvalidLink(format!("{link}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(LocationError::InvalidLink(link.to_string()));
        }
        return Ok(url.query().unwrap_or_default().to_string());
    }

    Ok(link.to_string())
}

/// Render the shareable link for a query string
///
/// Without a web origin (or with one that does not parse) the link is the
/// `?`-prefixed query alone.
#[must_use]
pub fn permalink(web_url: Option<&str>, query: &str) -> String {
    let Some(mut url) = web_url.and_then(|origin| Url::parse(origin.trim()).ok()) else {
        return format!("?{query}");
    };
    url.set_query((!query.is_empty()).then_some(query));
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_replace_keeps_history_length() {
        let mut location = MemoryLocation::new("page=1");
        location.push("category=tools&page=3");

        location.replace("category=tools&page=1").unwrap();
        location.replace("category=tools,games&page=1").unwrap();

        assert_eq!(location.history().len(), 2);
        assert_eq!(location.history()[0], "page=1");
        assert_eq!(location.current(), "category=tools,games&page=1");
        assert_eq!(location.replacements(), 2);
    }

    #[test]
    fn test_state_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("last_query");

        let mut location = StateFileLocation::new(&path);
        assert_eq!(location.hydrate().unwrap(), "");

        location.replace("license=MIT&page=2").unwrap();
        let mut reopened = StateFileLocation::new(&path);
        assert_eq!(reopened.hydrate().unwrap(), "license=MIT&page=2");
    }

    #[test]
    fn test_explicit_link_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_query");
        fs::write(&path, "page=9").unwrap();

        let mut location = StateFileLocation::new(&path).with_initial("page=2");
        assert_eq!(location.hydrate().unwrap(), "page=2");
        assert_eq!(location.hydrate().unwrap(), "page=9");
    }

    #[test]
    fn test_query_from_link() {
        assert_eq!(
            query_from_link(" http://localhost:3000/?q=map&page=2 ").unwrap(),
            "q=map&page=2"
        );
        assert_eq!(query_from_link("https://catalog.example/").unwrap(), "");
        assert_eq!(query_from_link("license=MIT").unwrap(), "license=MIT");
        assert!(matches!(
            query_from_link("ftp://catalog.example/?page=2"),
            Err(LocationError::InvalidLink(_))
        ));
    }

    #[test]
    fn test_permalink() {
        assert_eq!(
            permalink(Some("https://catalog.example/"), "page=1&page_size=24"),
            "https://catalog.example/?page=1&page_size=24"
        );
        assert_eq!(permalink(None, "page=1"), "?page=1");
        assert_eq!(permalink(Some("not a url"), "page=1"), "?page=1");
    }
}
