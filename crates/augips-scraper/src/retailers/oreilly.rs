//! O'Reilly Auto Parts: robots.txt check, browser-driven ZIP search, then
//! the static stores page, then sample data.
//!
//! The results page has shipped under several class names, so the browser
//! path waits on each candidate selector in turn.

use std::time::Duration;

use async_trait::async_trait;
use augips_core::LocationRecord;

use super::{capture_screenshot, or_fallback, scrape_store_page, Scraper};
use crate::browser::BrowserSession;
use crate::context::ScrapeContext;
use crate::error::ScraperError;
use crate::extract::{parse_store_elements, STORE_CONTAINER_SELECTOR};
use crate::robots::check_robots_txt;

const COMPANY: &str = "O'Reilly Auto Parts";
const BASE_URL: &str = "https://www.oreillyauto.com/";
const STORES_PATH: &str = "/stores";

const SEARCH_ZIP: &str = "65801";
const ZIP_INPUT: &str = "input[type='text'][placeholder*='ZIP']";
const SUBMIT_BUTTON: &str = "button[type='submit']";
const RESULT_SELECTORS: [&str; 5] = [
    ".store-list-item",
    ".store-location",
    ".store-info",
    ".store-details",
    ".location-list",
];
const RESULT_WAIT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct OReillyScraper {
    base_url: String,
}

impl OReillyScraper {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Site root; `robots.txt` and `/stores` are resolved against it.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn scrape_with_browser(
        &self,
        ctx: &ScrapeContext,
    ) -> Result<Vec<LocationRecord>, ScraperError> {
        let session = BrowserSession::connect(&ctx.browser).await?;
        let result = self.search_stores(ctx, &session).await;
        if let Err(e) = session.close().await {
            tracing::debug!(scraper = self.name(), error = %e, "failed to close browser session");
        }
        result
    }

    async fn search_stores(
        &self,
        ctx: &ScrapeContext,
        session: &BrowserSession,
    ) -> Result<Vec<LocationRecord>, ScraperError> {
        session.goto(&self.url(STORES_PATH)).await?;
        capture_screenshot(ctx, session, self.name(), "initial").await;
        match session.title().await {
            Ok(title) => tracing::debug!(
                scraper = self.name(),
                title = %title,
                "stores page loaded"
            ),
            Err(e) => tracing::debug!(
                scraper = self.name(),
                error = %e,
                "could not read page title"
            ),
        }

        if !session.fill(ZIP_INPUT, SEARCH_ZIP).await? {
            tracing::warn!(
                scraper = self.name(),
                selector = ZIP_INPUT,
                "could not find ZIP input field"
            );
            return Ok(vec![]);
        }
        if !session.click(SUBMIT_BUTTON).await? {
            tracing::warn!(
                scraper = self.name(),
                selector = SUBMIT_BUTTON,
                "could not find submit button"
            );
            return Ok(vec![]);
        }
        capture_screenshot(ctx, session, self.name(), "before_wait").await;

        let Some(matched) = session.wait_for_any(&RESULT_SELECTORS, RESULT_WAIT).await else {
            tracing::warn!(scraper = self.name(), "none of the result selectors appeared");
            capture_screenshot(ctx, session, self.name(), "no_selectors").await;
            return Ok(vec![]);
        };

        let elements = session.elements_html(matched).await?;
        tracing::debug!(
            scraper = self.name(),
            selector = matched,
            count = elements.len(),
            "found result elements"
        );
        if let Some(first) = elements.first() {
            tracing::debug!(scraper = self.name(), html = %first, "first result element");
        }

        let html = session.page_source().await?;
        ctx.debug.save_html(self.name(), "results", &html);
        parse_store_elements(&html, STORE_CONTAINER_SELECTOR)
    }
}

impl Default for OReillyScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for OReillyScraper {
    fn name(&self) -> &'static str {
        "oreilly"
    }

    fn company_name(&self) -> &'static str {
        COMPANY
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        check_robots_txt(&ctx.fetcher, &self.url("/robots.txt"), &[STORES_PATH]).await;

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
            Err(e) => tracing::warn!(
                scraper = self.name(),
                error = %e,
                "browser scrape failed, trying static page"
            ),
        }

        let live = scrape_store_page(
            ctx,
            self.name(),
            &self.url(STORES_PATH),
            STORE_CONTAINER_SELECTOR,
            true,
        )
        .await;
        let records = or_fallback(self.name(), live, fallback_locations);
        Ok(ctx.finalize(COMPANY, records))
    }
}

fn fallback_locations() -> Vec<LocationRecord> {
    vec![LocationRecord::sample(
        "O'Reilly Auto Parts #5678",
        "456 Oak St",
        "Springfield",
        "MO",
        "65802",
        "37.2080",
        "-93.2913",
    )]
}
