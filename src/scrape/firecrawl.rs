//! Firecrawl scraping client.

use super::Scraper;
use crate::error::{PratError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Timeout for scrape requests (2 minutes).
const SCRAPE_TIMEOUT_SECS: u64 = 120;

/// Firecrawl-backed scraper.
pub struct FirecrawlScraper {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: &'a [&'a str],
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<ScrapeData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: Option<String>,
}

impl FirecrawlScraper {
    /// Create a scraper for the given API key and base URL.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SCRAPE_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Scraper for FirecrawlScraper {
    #[instrument(skip(self))]
    async fn scrape(&self, url: &str) -> Result<String> {
        let body = ScrapeRequest {
            url,
            formats: &["markdown"],
        };

        let resp = self
            .client
            .post(format!("{}/v1/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(PratError::ScrapeApi { status, message });
        }

        let response: ScrapeResponse = resp.json().await?;

        if !response.success {
            return Err(PratError::Scrape(
                response.error.unwrap_or_else(|| "scrape request was not successful".to_string()),
            ));
        }

        let markdown = response
            .data
            .and_then(|d| d.markdown)
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| PratError::Scrape(format!("no content returned for {}", url)))?;

        debug!("Scraped {} characters", markdown.chars().count());
        Ok(markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_response_parses_success_payload() {
        let json = r##"{"success": true, "data": {"markdown": "# Post\n\nBody text."}}"##;
        let parsed: ScrapeResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.data.unwrap().markdown.unwrap(), "# Post\n\nBody text.");
    }

    #[test]
    fn test_scrape_response_parses_error_payload() {
        let json = r#"{"success": false, "error": "Page not reachable"}"#;
        let parsed: ScrapeResponse = serde_json::from_str(json).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.unwrap(), "Page not reachable");
    }

    #[test]
    fn test_scrape_request_serializes_formats() {
        let req = ScrapeRequest { url: "https://example.com/post", formats: &["markdown"] };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["url"], "https://example.com/post");
        assert_eq!(json["formats"][0], "markdown");
    }
}
