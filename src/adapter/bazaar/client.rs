//! Bazaar REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::dto::parse_catalogue;
use crate::app::SourceConfig;
use crate::error::SourceError;
use crate::port::{CatalogueSnapshot, CatalogueSource};

/// HTTP client for the bazaar snapshot endpoint.
pub struct BazaarClient {
    http: HttpClient,
    url: String,
    timeout_ms: u64,
}

impl BazaarClient {
    /// Create a client with the given endpoint and default HTTP settings.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_config(&SourceConfig {
            url: url.into(),
            ..SourceConfig::default()
        })
    }

    #[must_use]
    pub fn from_config(config: &SourceConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            url: config.url.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_body(&self) -> Result<Value, SourceError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.classify(err))?;

        response.json::<Value>().await.map_err(|err| self.classify(err))
    }

    fn classify(&self, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl CatalogueSource for BazaarClient {
    async fn fetch(&self) -> Result<CatalogueSnapshot, SourceError> {
        info!(url = %self.url, "Fetching bazaar catalogue");

        let body = self.fetch_body().await?;
        let snapshot = parse_catalogue(&body)?;

        debug!(count = snapshot.len(), "Fetched bazaar products");
        Ok(snapshot)
    }

    fn source_name(&self) -> &'static str {
        "Bazaar"
    }
}
