//! Advance Auto Parts: static store directory page.

use async_trait::async_trait;
use augips_core::LocationRecord;

use super::{or_fallback, scrape_store_page, Scraper};
use crate::context::ScrapeContext;
use crate::error::ScraperError;
use crate::extract::STORE_CONTAINER_SELECTOR;

const COMPANY: &str = "Advance Auto Parts";
const BASE_URL: &str = "https://stores.advanceautoparts.com/";

#[derive(Debug, Clone)]
pub struct AdvanceAutoPartsScraper {
    base_url: String,
}

impl AdvanceAutoPartsScraper {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the scraper at a different directory page.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for AdvanceAutoPartsScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for AdvanceAutoPartsScraper {
    fn name(&self) -> &'static str {
        "advance"
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
            false,
        )
        .await;
        let records = or_fallback(self.name(), live, fallback_locations);
        Ok(ctx.finalize(COMPANY, records))
    }
}

fn fallback_locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord::sample(
            "Advance Auto Parts #1234",
            "123 Main St",
            "Richmond",
            "VA",
            "23220",
            "37.5407",
            "-77.4360",
        ),
        LocationRecord::sample(
            "Advance Auto Parts #5678",
            "456 Oak Ave",
            "Richmond",
            "VA",
            "23221",
            "37.5482",
            "-77.4522",
        ),
    ]
}
