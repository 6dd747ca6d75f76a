//! Show command - print a single catalog entry

use crate::browse::{DetailLoader, DetailState};
use crate::catalog::CatalogApi;
use crate::ui::OutputWriter;
use crate::{CatalogrError, output};

type Result<T> = std::result::Result<T, CatalogrError>;

/// Execute the show command
///
/// # Errors
///
/// Returns an error if the id is blank, the entry does not exist, or the
/// catalog cannot be reached.
pub async fn execute(
    api: &dyn CatalogApi,
    id: &str,
    json: bool,
    out: &dyn OutputWriter,
) -> Result<()> {
    let mut loader = DetailLoader::new();
    let Some(id) = loader.select(Some(id)) else {
        return Err(CatalogrError::InvalidInput("No entry id provided".into()));
    };

    let result = api.catalog_entry(&id).await;
    loader.apply(&id, result);

    match loader.state() {
        DetailState::Loaded(detail) if json => {
            out.write(&serde_json::to_string_pretty(&detail.raw)?);
            Ok(())
        }
        DetailState::Loaded(detail) => {
            for line in output::detail_block(detail) {
                out.write(&line);
            }
            Ok(())
        }
        DetailState::NotFound { id } => Err(CatalogrError::Unavailable(format!(
            "No catalog entry with id '{id}'"
        ))),
        DetailState::Unavailable { message, .. } => {
            Err(CatalogrError::Unavailable(message.clone()))
        }
        DetailState::NoSelection | DetailState::Loading { .. } => Err(
            CatalogrError::Unavailable("The entry could not be loaded.".into()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCatalog;
    use crate::ui::output::BufferedWriter;

    #[tokio::test]
    async fn test_show_prints_entry() {
        colored::control::set_override(false);
        let out = BufferedWriter::new();
        execute(&FakeCatalog::with_total(1), "geo", false, &out)
            .await
            .unwrap();

        let lines = out.lines();
        assert_eq!(lines[0], "Entry geo (geo)");
        assert!(lines.iter().any(|line| line.contains("Long description of geo")));
    }

    #[tokio::test]
    async fn test_show_json_prints_raw_record() {
        let out = BufferedWriter::new();
        execute(&FakeCatalog::with_total(1), " geo ", true, &out)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out.lines()[0]).unwrap();
        assert_eq!(value["name"], "geo");
    }

    #[tokio::test]
    async fn test_show_missing_entry() {
        let out = BufferedWriter::new();
        let err = execute(&FakeCatalog::with_total(1), "missing-one", false, &out)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No catalog entry with id 'missing-one'");
    }

    #[tokio::test]
    async fn test_show_blank_id() {
        let out = BufferedWriter::new();
        let err = execute(&FakeCatalog::with_total(1), "  ", false, &out)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogrError::InvalidInput(_)));
    }
}
