//! Filters command - print the selectable filter values for a search

use crate::browse::QueryStore;
use crate::catalog::CatalogApi;
use crate::cli::FilterArgs;
use crate::query::{QueryState, encode_filters};
use crate::ui::OutputWriter;
use crate::{CatalogrError, output};

type Result<T> = std::result::Result<T, CatalogrError>;

/// Execute the filters command
///
/// The vocabulary is requested for the given search and filters, so each
/// dimension lists the values still selectable alongside them.
///
/// # Errors
///
/// Returns an error if the catalog cannot be reached or JSON output fails.
pub async fn execute(
    api: &dyn CatalogApi,
    filters: &FilterArgs,
    json: bool,
    quiet: bool,
    out: &dyn OutputWriter,
) -> Result<()> {
    let mut store = QueryStore::new(QueryState::default());
    filters.apply(&mut store);
    let filter_query = encode_filters(store.state());

    let vocabulary = api.filter_vocabulary(&filter_query).await?;

    if json {
        out.write(&serde_json::to_string_pretty(&vocabulary)?);
        return Ok(());
    }

    if vocabulary.is_empty() {
        out.info("No filter values available.");
        return Ok(());
    }
    for line in output::vocabulary_block(&vocabulary, store.state(), quiet) {
        out.write(&line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCatalog;
    use crate::ui::output::BufferedWriter;

    #[tokio::test]
    async fn test_filters_scoped_to_selection() {
        let api = FakeCatalog::with_total(3);
        let out = BufferedWriter::new();
        let args = FilterArgs {
            search: Some("map".into()),
            license: vec!["MIT".into()],
            ..FilterArgs::default()
        };

        execute(&api, &args, false, true, &out).await.unwrap();

        assert_eq!(api.requests(), vec!["filters?q=map&license=MIT"]);
        let lines = out.lines();
        assert!(lines.contains(&"license=MIT".to_string()));
        assert!(!lines.contains(&"license=Apache-2.0".to_string()));
        assert!(lines.contains(&"category=tools".to_string()));
    }

    #[tokio::test]
    async fn test_filters_failure_is_reported() {
        let api = FakeCatalog::with_total(3).failing_vocabulary();
        let out = BufferedWriter::new();

        let err = execute(&api, &FilterArgs::default(), false, false, &out)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogrError::RequestError(_)));
    }
}
