//! Places from a Wikipedia list article: the US national parks table.
//!
//! Each park row has its name in the first cell and a location cell that
//! holds the state(s) followed by coordinates. Coordinates are read from
//! the `.geo` microformat span when present, else from the decimal
//! `44.60°N 110.50°W` text.

use std::sync::LazyLock;

use async_trait::async_trait;
use augips_core::LocationRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{or_fallback, Scraper};
use crate::context::ScrapeContext;
use crate::error::ScraperError;
use crate::extract::{element_text, parse_selector};

const COMPANY: &str = "Wikipedia Places";
const OPERATOR: &str = "National Park Service";
const PAGE_URL: &str = "https://en.wikipedia.org/wiki/List_of_national_parks_of_the_United_States";

static FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\*").expect("valid regex"));
static DECIMAL_COORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)°\s*([NS])\W+(\d+(?:\.\d+)?)°\s*([EW])").expect("valid regex")
});

#[derive(Debug, Clone)]
pub struct WikipediaScraper {
    page_url: String,
}

impl WikipediaScraper {
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_url(PAGE_URL)
    }

    #[must_use]
    pub fn with_page_url(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
        }
    }

    async fn fetch_parks(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        let page = ctx.fetcher.get_with_browser_headers(&self.page_url).await?;
        if !page.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: page.status,
                url: self.page_url.clone(),
            });
        }
        ctx.debug.save_html(self.name(), "table", &page.body);
        parse_park_table(&page.body)
    }
}

impl Default for WikipediaScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for WikipediaScraper {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    fn company_name(&self) -> &'static str {
        COMPANY
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        let live = self.fetch_parks(ctx).await;
        let records = or_fallback(self.name(), live, fallback_locations);
        Ok(ctx.finalize(COMPANY, records))
    }
}

struct TableSelectors {
    table: Selector,
    row: Selector,
    cell: Selector,
    geo: Selector,
}

/// Parse the first `.wikitable` on the page. Rows without a recognizable
/// location cell (header rows, notes) are skipped.
fn parse_park_table(html: &str) -> Result<Vec<LocationRecord>, ScraperError> {
    let sel = TableSelectors {
        table: parse_selector(".wikitable")?,
        row: parse_selector("tr")?,
        cell: parse_selector("th, td")?,
        geo: parse_selector(".geo")?,
    };

    let document = Html::parse_document(html);
    let Some(table) = document.select(&sel.table).next() else {
        tracing::debug!("no wikitable on page");
        return Ok(vec![]);
    };

    Ok(table
        .select(&sel.row)
        .filter_map(|row| parse_park_row(&row, &sel))
        .collect())
}

fn parse_park_row(row: &ElementRef<'_>, sel: &TableSelectors) -> Option<LocationRecord> {
    let cells: Vec<ElementRef<'_>> = row.select(&sel.cell).collect();
    let (name_cell, rest) = cells.split_first()?;

    let name = FOOTNOTE.replace_all(&element_text(name_cell), "").trim().to_string();
    if name.is_empty() {
        return None;
    }

    let (location, (lat, lng)) = rest
        .iter()
        .find_map(|cell| cell_coordinates(cell, &sel.geo).map(|coords| (cell, coords)))?;

    Some(LocationRecord {
        store_name: Some(name),
        address: Some(String::new()),
        city: Some(String::new()),
        state: Some(state_text(&element_text(location))),
        zip_code: Some(String::new()),
        latitude: Some(lat),
        longitude: Some(lng),
        company_name: Some(OPERATOR.to_string()),
    })
}

fn cell_coordinates(cell: &ElementRef<'_>, geo: &Selector) -> Option<(String, String)> {
    if let Some(span) = cell.select(geo).next() {
        let text = element_text(&span);
        let (lat, lng) = text.split_once(';')?;
        return Some((lat.trim().to_string(), lng.trim().to_string()));
    }

    let text = element_text(cell);
    let caps = DECIMAL_COORDS.captures(&text)?;
    let signed = |value: &str, negative: bool| {
        if negative {
            format!("-{value}")
        } else {
            value.to_string()
        }
    };
    Some((
        signed(&caps[1], &caps[2] == "S"),
        signed(&caps[3], &caps[4] == "W"),
    ))
}

/// Text before the first digit, i.e. the state list ahead of the coordinates.
fn state_text(location: &str) -> String {
    let end = location.find(|c: char| c.is_ascii_digit()).unwrap_or(location.len());
    let state = FOOTNOTE.replace_all(&location[..end], "");
    state.trim().trim_end_matches(',').trim().to_string()
}

fn fallback_locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord::sample(
            "Yellowstone National Park",
            "",
            "",
            "Wyoming, Montana, Idaho",
            "",
            "44.4280",
            "-110.5885",
        )
        .with_company(OPERATOR),
        LocationRecord::sample(
            "Grand Canyon National Park",
            "",
            "",
            "Arizona",
            "",
            "36.1069",
            "-112.1129",
        )
        .with_company(OPERATOR),
        LocationRecord::sample(
            "Yosemite National Park",
            "",
            "",
            "California",
            "",
            "37.8651",
            "-119.5383",
        )
        .with_company(OPERATOR),
    ]
}
