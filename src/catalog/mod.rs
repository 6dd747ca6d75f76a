//! Catalog API access
//!
//! - `models`: response types (`CatalogPage`, `CatalogSummary`, `CatalogDetail`,
//!   `FilterVocabulary`, `HealthReport`)
//! - `client`: the `CatalogApi` trait and its HTTP implementation
//! - `error`: `RequestError`

pub mod client;
pub mod error;
pub mod models;

pub use client::{CatalogApi, HttpCatalogClient};
pub use error::RequestError;
pub use models::{CatalogDetail, CatalogPage, CatalogSummary, FilterVocabulary, HealthReport};
