//! Outbound page fetching.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Browser User-Agent sent with every request; both quote pages reject
/// obvious bot agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Seam between the serving layer and the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body as text.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Production fetcher. One bounded attempt per call: a timed-out or
/// failed fetch surfaces immediately, and any retrying is the caller's
/// business.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("Requesting page from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for URL: {}",
                response.status(),
                url
            ));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))
    }
}
