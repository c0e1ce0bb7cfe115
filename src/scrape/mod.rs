//! Web scraping abstraction for Prat.
//!
//! Scraping is delegated to an external service; this module only defines the
//! seam and the Firecrawl-backed implementation.

mod firecrawl;

pub use firecrawl::FirecrawlScraper;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for scraping providers.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Fetch a page and return its readable content as markdown/plain text.
    async fn scrape(&self, url: &str) -> Result<String>;
}
