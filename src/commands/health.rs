//! Health command - check that the catalog API is reachable

use crate::catalog::CatalogApi;
use crate::ui::OutputWriter;
use crate::CatalogrError;

/// Execute the health command
///
/// # Errors
///
/// Returns an error if the API cannot be reached or reports itself unhealthy.
pub async fn execute(api: &dyn CatalogApi, out: &dyn OutputWriter) -> Result<(), CatalogrError> {
    let report = api.health().await?;

    for source in &report.errors {
        out.warning(&format!("Failed to load: {source}"));
    }

    if report.is_ok() {
        out.success(&format!("Catalog is up ({} entries)", report.items));
        Ok(())
    } else {
        Err(CatalogrError::Unavailable(format!(
            "Catalog reports status '{}'",
            report.status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCatalog;
    use crate::ui::MessageLevel;
    use crate::ui::output::BufferedWriter;

    #[tokio::test]
    async fn test_health_ok() {
        let out = BufferedWriter::new();
        execute(&FakeCatalog::with_total(42), &out).await.unwrap();

        assert_eq!(
            out.messages(),
            vec![(MessageLevel::Success, "Catalog is up (42 entries)".to_string())]
        );
    }
}
