use crate::models::ResponseEnvelope;
use anyhow::Result;
use async_trait::async_trait;

/// Transport used by the search controller to fetch a listing search
/// Lets tests and alternative backends stand in for the live HTTP API
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// GET `url` and return the decoded `response` envelope
    ///
    /// Any transport, status or decoding problem is an error.
    async fn fetch(&self, url: &str) -> Result<ResponseEnvelope>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
