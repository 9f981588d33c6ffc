//! NAPA Auto Parts: static store page fetched with browser-like headers.

use async_trait::async_trait;
use augips_core::LocationRecord;

use super::{or_fallback, scrape_store_page, Scraper};
use crate::context::ScrapeContext;
use crate::error::ScraperError;
use crate::extract::STORE_CONTAINER_SELECTOR;

const COMPANY: &str = "NAPA Auto Parts";
const BASE_URL: &str = "https://www.napaonline.com/en/auto-parts-stores";

#[derive(Debug, Clone)]
pub struct NapaScraper {
    base_url: String,
}

impl NapaScraper {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for NapaScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for NapaScraper {
    fn name(&self) -> &'static str {
        "napa"
    }

    fn company_name(&self) -> &'static str {
        COMPANY
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        let live = scrape_store_page(
            ctx,
            self.name(),
            &self.base_url,
            STORE_CONTAINER_SELECTOR,
            true,
        )
        .await;
        let records = or_fallback(self.name(), live, fallback_locations);
        Ok(ctx.finalize(COMPANY, records))
    }
}

fn fallback_locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord::sample(
            "NAPA Auto Parts - Genuine Parts Company",
            "123 Auto Way",
            "Atlanta",
            "GA",
            "30339",
            "33.8651",
            "-84.3366",
        ),
        LocationRecord::sample(
            "NAPA Auto Parts - City Automotive",
            "456 Parts Blvd",
            "Atlanta",
            "GA",
            "30305",
            "33.8321",
            "-84.3621",
        ),
    ]
}
