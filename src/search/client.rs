use crate::config::Config;
use crate::models::{ApiResponse, ResponseEnvelope};
use crate::search::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Nestoria search API client
pub struct NestoriaClient {
    client: Client,
}

impl NestoriaClient {
    /// Create a client with the default timeout and user agent
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    /// Create a client using the timeout and user agent from `config`
    pub fn with_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Decode a raw response body into its envelope
    ///
    /// The HTTP status is only reported when the body cannot be decoded; an
    /// error status carrying a valid envelope is still a response.
    fn parse_envelope(body: &str, status: StatusCode) -> Result<ResponseEnvelope> {
        let parsed: ApiResponse = serde_json::from_str(body)
            .with_context(|| format!("Failed to parse search response (status {status})"))?;
        Ok(parsed.response)
    }
}

#[async_trait]
impl ListingSource for NestoriaClient {
    async fn fetch(&self, url: &str) -> Result<ResponseEnvelope> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to reach search API")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Search API returned status: {}", status);
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        debug!("Downloaded {} bytes of JSON", body.len());

        Self::parse_envelope(&body, status)
    }

    fn source_name(&self) -> &'static str {
        "Nestoria"
    }
}
