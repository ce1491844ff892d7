use crate::sources::types::SearchParams;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Common trait for anything that can hand back a raw listing search payload.
/// The payload is returned untouched; shape problems are handled by the normalizer.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the raw search response
    async fn fetch(&self, params: &SearchParams) -> Result<Value>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
