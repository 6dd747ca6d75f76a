//! Browse command - the interactive catalog browser

use crate::browse::{Location, MemoryLocation, StateFileLocation, permalink, query_from_link};
use crate::catalog::CatalogApi;
use crate::config::CatalogrConfig;
use crate::ui::{OutputWriter, tui};
use crate::CatalogrError;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::warn;

/// Pick where the browser reads its starting query and publishes changes
///
/// A given link always wins. Otherwise the last query is resumed from the state
/// file when enabled. Without a data directory the location lives in memory.
///
/// # Errors
///
/// Returns `LocationError::InvalidLink` if `link` is a URL that is not http(s).
pub fn browse_location(
    config: &CatalogrConfig,
    link: Option<&str>,
) -> Result<Box<dyn Location>, CatalogrError> {
    let initial = match link {
        Some(link) => Some(query_from_link(link)?),
        None if config.resume_last_query => None,
        None => Some(String::new()),
    };

    let Some(path) = StateFileLocation::default_path() else {
        warn!("no data directory, the last query will not be kept");
        return Ok(Box::new(MemoryLocation::new(initial.unwrap_or_default())));
    };

    let location = StateFileLocation::new(path);
    Ok(match initial {
        Some(query) => Box::new(location.with_initial(query)),
        None => Box::new(location),
    })
}

/// Execute the browse command
///
/// Prints the shareable link of the final query after the browser closes.
///
/// # Errors
///
/// Returns an error if the link is invalid or the terminal UI fails.
pub fn execute(
    runtime: Handle,
    api: Arc<dyn CatalogApi>,
    config: &CatalogrConfig,
    link: Option<&str>,
    out: &dyn OutputWriter,
) -> Result<(), CatalogrError> {
    let mut location = browse_location(config, link)?;
    let query = tui::run(runtime, api, config, location.as_mut())?;

    out.info(&permalink(config.web_url(), &query));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_wins_over_resume() {
        let config = CatalogrConfig::default();
        let mut location =
            browse_location(&config, Some("https://catalog.example/?page=3")).unwrap();
        assert_eq!(location.hydrate().unwrap(), "page=3");
    }

    #[test]
    fn test_without_resume_starts_empty() {
        let config = CatalogrConfig {
            resume_last_query: false,
            ..CatalogrConfig::default()
        };
        let mut location = browse_location(&config, None).unwrap();
        assert_eq!(location.hydrate().unwrap(), "");
    }

    #[test]
    fn test_invalid_link() {
        let config = CatalogrConfig::default();
        assert!(browse_location(&config, Some("mailto://someone")).is_err());
    }
}
