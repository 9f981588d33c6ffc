//! AutoZone: store locator searched through a headless browser, then the
//! static `/locations/` directory, then sample data.

use async_trait::async_trait;
use augips_core::LocationRecord;

use super::{capture_screenshot, or_fallback, scrape_store_page, Scraper};
use crate::browser::BrowserSession;
use crate::context::ScrapeContext;
use crate::error::ScraperError;
use crate::extract::parse_store_elements;

const COMPANY: &str = "AutoZone";
const BASE_URL: &str = "https://www.autozone.com/locations/";
const STORE_LOCATOR_URL: &str = "https://www.autozone.com/store-locator";

const SEARCH_ZIP: &str = "90210";
const SEARCH_INPUT: &str = "#store-search-input";
const SEARCH_BUTTON: &str = "#store-search-button";
const RESULT_ITEM: &str = ".store-list-item";
const DIRECTORY_ITEM: &str = ".store-location";

#[derive(Debug, Clone)]
pub struct AutoZoneScraper {
    base_url: String,
    store_locator_url: String,
}

impl AutoZoneScraper {
    #[must_use]
    pub fn new() -> Self {
        Self::with_urls(BASE_URL, STORE_LOCATOR_URL)
    }

    /// `base_url` is the static directory page; `store_locator_url` is the
    /// interactive search page driven through the browser.
    #[must_use]
    pub fn with_urls(base_url: impl Into<String>, store_locator_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            store_locator_url: store_locator_url.into(),
        }
    }

    async fn scrape_with_browser(
        &self,
        ctx: &ScrapeContext,
    ) -> Result<Vec<LocationRecord>, ScraperError> {
        let session = BrowserSession::connect(&ctx.browser).await?;
        let result = self.search_locator(ctx, &session).await;
        if let Err(e) = session.close().await {
            tracing::debug!(scraper = self.name(), error = %e, "failed to close browser session");
        }
        result
    }

    async fn search_locator(
        &self,
        ctx: &ScrapeContext,
        session: &BrowserSession,
    ) -> Result<Vec<LocationRecord>, ScraperError> {
        session.goto(&self.store_locator_url).await?;

        if !session.fill(SEARCH_INPUT, SEARCH_ZIP).await? {
            tracing::warn!(
                scraper = self.name(),
                selector = SEARCH_INPUT,
                "search input not found"
            );
            capture_screenshot(ctx, session, self.name(), "no_search_input").await;
            return Ok(vec![]);
        }
        session.click(SEARCH_BUTTON).await?;

        if !session.wait_for(RESULT_ITEM).await {
            tracing::warn!(
                scraper = self.name(),
                selector = RESULT_ITEM,
                "no store results appeared"
            );
            capture_screenshot(ctx, session, self.name(), "no_results").await;
            return Ok(vec![]);
        }

        let html = session.page_source().await?;
        ctx.debug.save_html(self.name(), "results", &html);
        parse_store_elements(&html, RESULT_ITEM)
    }
}

impl Default for AutoZoneScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for AutoZoneScraper {
    fn name(&self) -> &'static str {
        "autozone"
    }

    fn company_name(&self) -> &'static str {
        COMPANY
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        match self.scrape_with_browser(ctx).await {
            Ok(records) if !records.is_empty() => {
                tracing::info!(
                    scraper = self.name(),
                    count = records.len(),
                    "extracted locations via browser"
                );
                return Ok(ctx.finalize(COMPANY, records));
            }
            Ok(_) => tracing::info!(scraper = self.name(), "browser search found no stores"),
            Err(e) => tracing::warn!(scraper = self.name(), error = %e, "browser scrape failed"),
        }

        let live = scrape_store_page(ctx, self.name(), &self.base_url, DIRECTORY_ITEM, false).await;
        let records = or_fallback(self.name(), live, fallback_locations);
        Ok(ctx.finalize(COMPANY, records))
    }
}

fn fallback_locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord::sample(
            "AutoZone #1234",
            "123 Main St",
            "Beverly Hills",
            "CA",
            "90210",
            "34.0736",
            "-118.4004",
        ),
        LocationRecord::without_coordinates(
            "AutoZone #5678",
            "456 Oak Ave",
            "Beverly Hills",
            "CA",
            "90211",
        ),
    ]
}
