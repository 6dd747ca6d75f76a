//! Catalog response models
//!
//! These mirror the JSON returned by the catalog API. Missing keys default to
//! empty values so a sparse source record still deserializes.

use crate::query::FilterDimension;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary of a catalog entry as returned by the list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSummary {
    /// Stable entry identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line description
    pub short_description: String,
    /// Categories the entry belongs to
    pub categories: Vec<String>,
    /// Supported platforms
    pub platforms: Vec<String>,
    /// License identifier
    pub license: String,
    /// Development status
    pub development_status: String,
    /// Software type
    pub software_type: String,
    /// Repository or homepage URL
    pub url: String,
    /// Landing page URL, preferred over `url`
    #[serde(rename = "landingURL")]
    pub landing_url: String,
    /// Release date as published by the source (usually `YYYY-MM-DD`)
    pub release_date: String,
}

impl CatalogSummary {
    /// The link to open for this entry
    ///
    /// `landingURL` wins when present and non-empty, then `url`.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        [self.landing_url.as_str(), self.url.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|candidate| !candidate.is_empty())
    }

    /// Parsed release date, if it is a plain calendar date
    #[must_use]
    pub fn release_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.release_date.trim(), "%Y-%m-%d").ok()
    }
}

/// Full catalog entry as returned by the by-id endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogDetail {
    /// Summary fields
    #[serde(flatten)]
    pub summary: CatalogSummary,
    /// Long-form description
    pub long_description: String,
    /// Latest released version
    pub software_version: String,
    /// Languages the entry is available in
    pub languages: Vec<String>,
    /// Name of the metadata file the entry was loaded from
    pub source_file: String,
    /// The original metadata record, passed through untouched
    pub raw: serde_json::Value,
}

/// One page of list results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    /// Page number this result is for
    pub page: u32,
    /// Page size this result was computed with
    pub page_size: u32,
    /// Number of entries matching the filters across all pages
    pub total: u64,
    /// Entries on this page
    #[serde(default)]
    pub items: Vec<CatalogSummary>,
}

impl CatalogPage {
    /// Whether the filters matched nothing at all
    #[must_use]
    pub const fn is_empty_result(&self) -> bool {
        self.total == 0
    }
}

/// Currently selectable values per filter dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterVocabulary {
    /// Selectable categories
    pub categories: Vec<String>,
    /// Selectable platforms
    pub platforms: Vec<String>,
    /// Selectable licenses
    pub licenses: Vec<String>,
    /// Selectable development statuses
    pub development_statuses: Vec<String>,
    /// Selectable software types
    pub software_types: Vec<String>,
    /// Selectable languages
    pub languages: Vec<String>,
}

impl FilterVocabulary {
    /// Options for a dimension, in server order
    #[must_use]
    pub fn options(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::Category => &self.categories,
            FilterDimension::Platform => &self.platforms,
            FilterDimension::License => &self.licenses,
            FilterDimension::Status => &self.development_statuses,
            FilterDimension::Type => &self.software_types,
            FilterDimension::Language => &self.languages,
        }
    }

    /// Whether no dimension has any option
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterDimension::ALL
            .iter()
            .all(|dim| self.options(*dim).is_empty())
    }
}

/// Service health as reported by the catalog API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthReport {
    /// `ok` when the service is up
    pub status: String,
    /// Number of loaded entries
    pub items: u64,
    /// Source files that failed to load
    pub errors: Vec<String>,
}

impl HealthReport {
    /// Whether the service reports itself healthy
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
