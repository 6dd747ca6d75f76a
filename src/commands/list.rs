//! List command - print one page of catalog entries
//!
//! The command runs the same session as the interactive browser, headlessly:
//! a link or query string is hydrated, flags are applied on top, and the
//! driver settles every request (including a page clamp) before printing.

use crate::browse::{
    BrowseSession, CatalogDriver, ListStatus, Location, LocationError, MemoryLocation, QueryStore,
    permalink, query_from_link,
};
use crate::catalog::CatalogApi;
use crate::cli::{FilterArgs, PageArgs};
use crate::config::CatalogrConfig;
use crate::query::{DecodeOptions, decode_with, encode};
use crate::ui::OutputWriter;
use crate::{CatalogrError, output};
use std::sync::Arc;
use tokio::runtime::Handle;

type Result<T> = std::result::Result<T, CatalogrError>;

/// Build the starting query from a link and command-line flags
///
/// Flags that change the result set send the query back to page 1 unless a
/// page was given explicitly.
///
/// # Errors
///
/// Returns `LocationError::InvalidLink` if `link` is a URL that is not http(s).
pub fn initial_query(
    link: Option<&str>,
    filters: &FilterArgs,
    paging: &PageArgs,
    options: &DecodeOptions,
) -> std::result::Result<String, LocationError> {
    let linked = link.map(query_from_link).transpose()?.unwrap_or_default();
    let mut store = QueryStore::new(decode_with(&linked, options));
    let linked_state = store.state().clone();

    filters.apply(&mut store);
    paging.apply(&mut store);
    if paging.page.is_none() && store.state().scope_differs(&linked_state) {
        store.set_page(1);
    }

    Ok(encode(store.state()))
}

/// Run a session for `query` until every request has settled
///
/// # Errors
///
/// Returns `CatalogrError::Unavailable` if the list request failed.
pub async fn settle_query(
    api: Arc<dyn CatalogApi>,
    query: &str,
    options: &DecodeOptions,
) -> Result<BrowseSession> {
    let mut location = MemoryLocation::new(query);
    let (mut session, commands) = BrowseSession::hydrate(&location.hydrate()?, options);

    let mut driver = CatalogDriver::new(Handle::current(), api);
    driver.dispatch(commands, &mut location)?;
    driver.settle(&mut session, &mut location).await?;

    match session.status() {
        ListStatus::Failed(message) => Err(CatalogrError::Unavailable(message.clone())),
        ListStatus::Idle | ListStatus::Loading => Ok(session),
    }
}

/// Execute the list command
///
/// # Errors
///
/// Returns an error if the link is invalid, the catalog cannot be loaded, or
/// JSON output fails.
pub async fn execute(
    api: Arc<dyn CatalogApi>,
    config: &CatalogrConfig,
    link: Option<&str>,
    filters: &FilterArgs,
    paging: &PageArgs,
    json: bool,
    out: &dyn OutputWriter,
) -> Result<()> {
    let options = config.decode_options();
    let query = initial_query(link, filters, paging, &options)?;
    let session = settle_query(api, &query, &options).await?;

    let Some(page) = session.page() else {
        return Err(CatalogrError::Unavailable(
            "The catalog returned no page for this query.".into(),
        ));
    };

    if json {
        out.write(&serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    let filter_lines = output::active_filters(session.state());
    if !filter_lines.is_empty() {
        out.info("Filters:");
        for line in &filter_lines {
            out.info(line);
        }
    }
    out.info(&output::page_summary(page, session.state()));
    for entry in &page.items {
        out.write(&output::entry_line(entry, config.quiet));
    }
    out.info(&format!(
        "Link: {}",
        permalink(config.web_url(), session.query())
    ));

    Ok(())
}
