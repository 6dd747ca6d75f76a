//! Testing utilities for catalogr
//!
//! This module provides a scripted `FakeCatalog` implementing `CatalogApi` and
//! builders for sample response data.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::{
    CatalogApi, CatalogDetail, CatalogPage, CatalogSummary, FilterVocabulary, HealthReport,
    RequestError,
};
use crate::query::{FilterDimension, decode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

/// Build a summary with the given id
#[must_use]
pub fn sample_summary(id: &str) -> CatalogSummary {
    CatalogSummary {
        id: id.to_string(),
        name: format!("Entry {id}"),
        short_description: format!("Short description of {id}"),
        categories: vec!["tools".into()],
        platforms: vec!["linux".into(), "web".into()],
        license: "MIT".into(),
        development_status: "stable".into(),
        software_type: "standalone/web".into(),
        url: format!("https://code.example/{id}"),
        landing_url: String::new(),
        release_date: "2024-01-15".into(),
    }
}

/// Build a detail record with the given id
#[must_use]
pub fn sample_detail(id: &str) -> CatalogDetail {
    CatalogDetail {
        summary: sample_summary(id),
        long_description: format!("Long description of {id}"),
        software_version: "1.2.0".into(),
        languages: vec!["en".into()],
        source_file: format!("{id}.yml"),
        raw: serde_json::json!({ "name": id }),
    }
}

/// Build a page response; the number of items follows from `total`
#[must_use]
pub fn sample_page(page: u32, page_size: u32, total: u64) -> CatalogPage {
    let offset = u64::from(page.saturating_sub(1)) * u64::from(page_size);
    let count = total.saturating_sub(offset).min(u64::from(page_size));
    CatalogPage {
        page,
        page_size,
        total,
        items: (0..count)
            .map(|i| sample_summary(&format!("entry-{}", offset + i + 1)))
            .collect(),
    }
}

/// Scripted in-memory catalog
///
/// Every list request is answered with a page of `total` entries for the
/// requested page and page size. Entry ids starting with `missing` answer 404.
/// Requests are recorded as `list?<query>`, `filters?<query>` or `entry/<id>`.
pub struct FakeCatalog {
    total: u64,
    fail_vocabulary: bool,
    list_delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl FakeCatalog {
    /// A catalog with `total` matching entries for every query
    #[must_use]
    pub fn with_total(total: u64) -> Self {
        Self {
            total,
            fail_vocabulary: false,
            list_delays: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Delay list responses for one query string
    #[must_use]
    pub fn delay_list(mut self, query: &str, delay: Duration) -> Self {
        self.list_delays.insert(query.to_string(), delay);
        self
    }

    /// Make every vocabulary request fail
    #[must_use]
    pub fn failing_vocabulary(mut self) -> Self {
        self.fail_vocabulary = true;
        self
    }

    /// Requests received so far
    ///
    /// # Panics
    /// Panics if the request log lock is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

impl fmt::Debug for FakeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeCatalog")
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_catalog(&self, query: &str) -> Result<CatalogPage, RequestError> {
        self.record(format!("list?{query}"));
        if let Some(delay) = self.list_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        let state = decode(query);
        Ok(sample_page(state.page(), state.page_size(), self.total))
    }

    async fn filter_vocabulary(
        &self,
        filter_query: &str,
    ) -> Result<FilterVocabulary, RequestError> {
        self.record(format!("filters?{filter_query}"));
        if self.fail_vocabulary {
            return Err(RequestError::Status {
                status: 500,
                body: "Internal Server Error".into(),
            });
        }
        let state = decode(filter_query);
        let mut vocabulary = FilterVocabulary {
            categories: vec!["games".into(), "tools".into()],
            platforms: vec!["linux".into(), "web".into()],
            licenses: vec!["Apache-2.0".into(), "MIT".into()],
            development_statuses: vec!["stable".into()],
            software_types: vec!["standalone/web".into()],
            languages: vec!["en".into()],
        };
        // Narrowing by license leaves only the selected licenses on offer.
        let licenses: Vec<String> = state
            .filters()
            .values(FilterDimension::License)
            .map(str::to_string)
            .collect();
        if !licenses.is_empty() {
            vocabulary.licenses = licenses;
        }
        Ok(vocabulary)
    }

    async fn catalog_entry(&self, id: &str) -> Result<CatalogDetail, RequestError> {
        self.record(format!("entry/{id}"));
        if id.starts_with("missing") {
            return Err(RequestError::Status {
                status: 404,
                body: r#"{"detail":"Not found"}"#.into(),
            });
        }
        Ok(sample_detail(id))
    }

    async fn health(&self) -> Result<HealthReport, RequestError> {
        Ok(HealthReport {
            status: "ok".into(),
            items: self.total,
            errors: Vec::new(),
        })
    }
}
