//! The one fetch-and-extract composition behind every scrape entry point.

use tracing::debug;

use crate::extract::{self, ExtractionResult, SourceProfile};
use crate::fetch::PageFetcher;

/// Fetch the profile's page and run extraction over it. Fetch failures
/// become [`ExtractionResult::FetchError`]; everything else is decided by
/// the extractor.
pub async fn scrape(fetcher: &dyn PageFetcher, profile: &SourceProfile) -> ExtractionResult {
    match fetcher.fetch_page(&profile.url).await {
        Ok(body) => {
            debug!(source = profile.name, bytes = body.len(), "Page fetched");
            extract::extract(&body, profile)
        }
        Err(e) => ExtractionResult::FetchError(format!(
            "Failed to fetch {} price: {e}",
            profile.name
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    struct StubFetcher(Result<String>);

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_page(&self, _url: &str) -> Result<String> {
            match &self.0 {
                Ok(body) => Ok(body.clone()),
                Err(e) => Err(anyhow!("{e}")),
            }
        }
    }

    #[tokio::test]
    async fn test_scrape_delegates_to_extractor() {
        let page = r#"
            <table>
              <tr><td>Bạc miếng Phú Quý 999</td><td>x</td><td>18.380</td></tr>
            </table>"#;
        let fetcher = StubFetcher(Ok(page.to_string()));
        let result = scrape(&fetcher, &sources::silver("http://unused")).await;
        assert_eq!(result, ExtractionResult::Found(18380));
    }

    #[tokio::test]
    async fn test_scrape_maps_fetch_failure() {
        let fetcher = StubFetcher(Err(anyhow!("connection refused")));
        let result = scrape(&fetcher, &sources::silver("http://unused")).await;
        assert_eq!(
            result,
            ExtractionResult::FetchError(
                "Failed to fetch silver price: connection refused".to_string()
            )
        );
    }
}
