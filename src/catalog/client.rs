//! Remote catalog client
//!
//! `CatalogApi` abstracts the catalog endpoints so the browse session can be
//! driven against the HTTP client in production and a scripted fake in tests.
//! Every operation is a single GET with no retry; failures are returned to the
//! caller, which decides how to degrade.

use super::error::RequestError;
use super::models::{CatalogDetail, CatalogPage, FilterVocabulary, HealthReport};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Longest response body kept in a status error
const MAX_ERROR_BODY: usize = 200;

/// Read operations offered by the catalog API
#[async_trait]
pub trait CatalogApi: Send + Sync + Debug {
    /// `GET {base}/catalog?{query}`
    async fn list_catalog(&self, query: &str) -> Result<CatalogPage, RequestError>;

    /// `GET {base}/catalog/filters?{filter_query}`
    async fn filter_vocabulary(
        &self,
        filter_query: &str,
    ) -> Result<FilterVocabulary, RequestError>;

    /// `GET {base}/catalog/{id}`
    async fn catalog_entry(&self, id: &str) -> Result<CatalogDetail, RequestError>;

    /// `GET {base}/health`
    async fn health(&self) -> Result<HealthReport, RequestError>;
}

/// HTTP implementation of `CatalogApi`
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Create a client for the given base URL
    ///
    /// A missing scheme defaults to `http://` and trailing slashes are dropped.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::InvalidUrl` if the base URL cannot be parsed or
    /// cannot carry a path, and `RequestError::Transport` if the HTTP client
    /// cannot be initialized.
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        let normalized = normalize_base_url(base_url);
        let base_url = Url::parse(&normalized)?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::InvalidUrl(normalized));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("catalogr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        info!(base_url = %base_url, "created catalog client");

        Ok(Self { client, base_url })
    }

    /// The normalized base URL
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL below the base URL
    ///
    /// Segments are percent-encoded individually; an empty query leaves the URL
    /// without `?`.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::InvalidUrl` if the base URL cannot take path segments.
    pub fn endpoint(&self, segments: &[&str], query: &str) -> Result<Url, RequestError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RequestError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.set_query((!query.is_empty()).then_some(query));
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RequestError> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            debug!(%url, status = status.as_u16(), "request failed");
            return Err(RequestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_catalog(&self, query: &str) -> Result<CatalogPage, RequestError> {
        let url = self.endpoint(&["catalog"], query)?;
        self.get_json(url).await
    }

    async fn filter_vocabulary(
        &self,
        filter_query: &str,
    ) -> Result<FilterVocabulary, RequestError> {
        let url = self.endpoint(&["catalog", "filters"], filter_query)?;
        self.get_json(url).await
    }

    async fn catalog_entry(&self, id: &str) -> Result<CatalogDetail, RequestError> {
        let url = self.endpoint(&["catalog", id], "")?;
        self.get_json(url).await
    }

    async fn health(&self) -> Result<HealthReport, RequestError> {
        let url = self.endpoint(&["health"], "")?;
        self.get_json(url).await
    }
}

/// Normalize a user-supplied base URL
///
/// Many users type `localhost:8000`, which does not parse as a URL with a host.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    if with_scheme != raw {
        warn!(from = raw, to = %with_scheme, "normalized catalog base URL");
    }
    with_scheme
}
