use crate::sources::traits::ListingSource;
use crate::sources::types::SearchParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Listing payload saved to disk, e.g. a captured search response
pub struct FileListingSource {
    path: PathBuf,
}

impl FileListingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ListingSource for FileListingSource {
    /// Search parameters are ignored; the file is the whole result set.
    async fn fetch(&self, _params: &SearchParams) -> Result<Value> {
        debug!("Reading listings from {}", self.path.display());

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}
