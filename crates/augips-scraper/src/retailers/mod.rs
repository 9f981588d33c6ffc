//! Per-retailer scrapers.
//!
//! Every scraper follows the same shape:
//!
//! 1. **Fetch**: a plain HTTP request or a headless browser session
//! 2. **Extract**: parse store records from the response
//! 3. **Fallback**: hardcoded sample records when extraction fails or finds nothing
//! 4. **Finalize**: stamp the company name and geocode missing coordinates
//!
//! | Name | Company | Method |
//! |------|---------|--------|
//! | `simple` | Simple Test | No network |
//! | `autozone` | AutoZone | Browser session, then static HTML |
//! | `oreilly` | O'Reilly Auto Parts | robots.txt check, browser session, then static HTML |
//! | `advance` | Advance Auto Parts | Static HTML |
//! | `napa` | NAPA Auto Parts | Static HTML with browser headers |
//! | `pepboys` | Pep Boys | State directory crawl |
//! | `ikea` | IKEA | Country/store link list |
//! | `openstreetmap` | OpenStreetMap POI | Overpass API |
//! | `wikipedia` | Wikipedia Places | Wikipedia table |

pub mod advance;
pub mod autozone;
pub mod ikea;
pub mod napa;
pub mod openstreetmap;
pub mod oreilly;
pub mod pepboys;
pub mod simple;
pub mod wikipedia;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use augips_core::LocationRecord;

use crate::browser::BrowserSession;
use crate::context::ScrapeContext;
use crate::error::ScraperError;
use crate::extract::{page_title, parse_store_elements, select_count};
use crate::output::output_path;

pub use advance::AdvanceAutoPartsScraper;
pub use autozone::AutoZoneScraper;
pub use ikea::IkeaScraper;
pub use napa::NapaScraper;
pub use openstreetmap::OpenStreetMapScraper;
pub use oreilly::OReillyScraper;
pub use pepboys::PepBoysScraper;
pub use simple::SimpleScraper;
pub use wikipedia::WikipediaScraper;

/// A unit that fetches and/or fabricates location records for one site.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Registry key, lowercase (e.g. `"autozone"`).
    fn name(&self) -> &'static str;

    /// Display name written into each record's `company_name`.
    fn company_name(&self) -> &'static str;

    /// Where this scraper's CSV lands inside `data_dir`.
    fn output_file(&self, data_dir: &Path) -> PathBuf {
        output_path(data_dir, self.company_name())
    }

    /// Produce location records.
    ///
    /// Implementations fall back to sample data on their own; an `Err` here
    /// means something went wrong outside the fetch/extract path.
    async fn scrape(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError>;
}

/// Use `result` when it holds records, otherwise log why and use `fallback`.
pub(crate) fn or_fallback(
    scraper: &str,
    result: Result<Vec<LocationRecord>, ScraperError>,
    fallback: fn() -> Vec<LocationRecord>,
) -> Vec<LocationRecord> {
    match result {
        Ok(records) if !records.is_empty() => {
            tracing::info!(scraper, count = records.len(), "extracted locations");
            records
        }
        Ok(_) => {
            tracing::info!(scraper, "no locations extracted, using fallback data");
            fallback()
        }
        Err(e) => {
            tracing::warn!(scraper, error = %e, "live scrape failed, using fallback data");
            fallback()
        }
    }
}

/// Fetch `url` and parse store cards matching `container_css`.
///
/// Non-2xx responses become [`ScraperError::UnexpectedStatus`]. A reachable
/// page with no store cards yields `Ok(vec![])`.
pub(crate) async fn scrape_store_page(
    ctx: &ScrapeContext,
    scraper: &str,
    url: &str,
    container_css: &str,
    browser_headers: bool,
) -> Result<Vec<LocationRecord>, ScraperError> {
    tracing::debug!(scraper, url, "fetching store page");
    let page = if browser_headers {
        ctx.fetcher.get_with_browser_headers(url).await?
    } else {
        ctx.fetcher.get(url).await?
    };

    if !page.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: page.status,
            url: url.to_string(),
        });
    }

    ctx.debug.save_html(scraper, "page", &page.body);
    tracing::debug!(
        scraper,
        title = page_title(&page.body).as_deref().unwrap_or("No title"),
        "fetched store page"
    );

    let records = parse_store_elements(&page.body, container_css)?;
    if records.is_empty() {
        tracing::debug!(
            scraper,
            containers = select_count(&page.body, container_css)?,
            "no named store cards on page"
        );
    }
    Ok(records)
}

/// Save a screenshot of the current browser viewport when debug capture is on.
pub(crate) async fn capture_screenshot(
    ctx: &ScrapeContext,
    session: &BrowserSession,
    scraper: &str,
    label: &str,
) {
    if !ctx.debug.is_enabled() {
        return;
    }
    match session.screenshot().await {
        Ok(png) => {
            ctx.debug.save_screenshot(scraper, label, &png);
        }
        Err(e) => tracing::debug!(scraper, label, error = %e, "screenshot failed"),
    }
}

/// Join a possibly-relative `href` onto `base`.
pub(crate) fn resolve_href(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match reqwest::Url::parse(base).and_then(|b| b.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            href.trim_start_matches('/')
        ),
    }
}
