use crate::sources::traits::ListingSource;
use crate::sources::types::SearchParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Listing search over HTTP
pub struct HttpListingSource {
    client: Client,
    url: String,
}

impl HttpListingSource {
    /// Create a source for the given search endpoint with a 30 second timeout
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(30))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch(&self, params: &SearchParams) -> Result<Value> {
        debug!("Fetching URL: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&params.query_pairs())
            .send()
            .await
            .context("Failed to fetch listings")?;

        if !response.status().is_success() {
            warn!("Listing search returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listings: {}", response.status());
        }

        let payload: Value = response
            .json()
            .await
            .context("Failed to read listing response body")?;

        match payload.as_array() {
            Some(items) => info!("Fetched {} raw listings", items.len()),
            None => warn!("Listing response is not an array"),
        }
        Ok(payload)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
