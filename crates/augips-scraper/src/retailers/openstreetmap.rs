//! OpenStreetMap points of interest via the Overpass API.
//!
//! Queries fuel stations inside Berlin and maps each node's `addr:*` tags
//! onto a [`LocationRecord`]. The station's `brand` tag, when present,
//! becomes its company name.

use std::collections::HashMap;

use async_trait::async_trait;
use augips_core::LocationRecord;
use serde::Deserialize;

use super::{or_fallback, Scraper};
use crate::context::ScrapeContext;
use crate::error::ScraperError;

const COMPANY: &str = "OpenStreetMap POI";
const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_CITY: &str = "Berlin";
const QUERY: &str = r#"[out:json];area["name"="Berlin"]["admin_level"="4"];node["amenity"="fuel"](area);out body;"#;

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct OpenStreetMapScraper {
    api_url: String,
}

impl OpenStreetMapScraper {
    #[must_use]
    pub fn new() -> Self {
        Self::with_api_url(OVERPASS_URL)
    }

    #[must_use]
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    async fn query_overpass(
        &self,
        ctx: &ScrapeContext,
    ) -> Result<Vec<LocationRecord>, ScraperError> {
        tracing::debug!(scraper = self.name(), api_url = %self.api_url, "querying overpass");
        let page = ctx.fetcher.post_form(&self.api_url, &[("data", QUERY)]).await?;
        if !page.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: page.status,
                url: self.api_url.clone(),
            });
        }

        let response: OverpassResponse =
            serde_json::from_str(&page.body).map_err(|source| ScraperError::Deserialize {
                context: "overpass response".to_string(),
                source,
            })?;
        tracing::debug!(
            scraper = self.name(),
            elements = response.elements.len(),
            "overpass returned elements"
        );

        Ok(response.elements.iter().map(element_to_record).collect())
    }
}

impl Default for OpenStreetMapScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for OpenStreetMapScraper {
    fn name(&self) -> &'static str {
        "openstreetmap"
    }

    fn company_name(&self) -> &'static str {
        COMPANY
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        let live = self.query_overpass(ctx).await;
        let records = or_fallback(self.name(), live, fallback_locations);
        Ok(ctx.finalize(COMPANY, records))
    }
}

fn element_to_record(element: &OverpassElement) -> LocationRecord {
    let tag = |key: &str| element.tags.get(key).map(String::as_str).unwrap_or_default();

    let name = element
        .tags
        .get("name")
        .cloned()
        .unwrap_or_else(|| format!("Gas Station {}", element.id));
    let address = format!("{} {}", tag("addr:street"), tag("addr:housenumber"))
        .trim()
        .to_string();
    let city = element
        .tags
        .get("addr:city")
        .map_or(DEFAULT_CITY, String::as_str);
    let company = element.tags.get("brand").map_or(COMPANY, String::as_str);

    LocationRecord {
        store_name: Some(name),
        address: Some(address),
        city: Some(city.to_string()),
        state: Some(String::new()),
        zip_code: Some(tag("addr:postcode").to_string()),
        latitude: element.lat.map(|v| v.to_string()),
        longitude: element.lon.map(|v| v.to_string()),
        company_name: Some(company.to_string()),
    }
}

fn fallback_locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord::sample(
            "Aral Gas Station",
            "Kurfürstendamm 216",
            "Berlin",
            "",
            "10719",
            "52.5033",
            "13.3295",
        )
        .with_company("Aral"),
        LocationRecord::sample(
            "Shell Gas Station",
            "Leipziger Str. 128",
            "Berlin",
            "",
            "10117",
            "52.5099",
            "13.3823",
        )
        .with_company("Shell"),
        LocationRecord::sample(
            "Total Gas Station",
            "Friedrichstr. 147",
            "Berlin",
            "",
            "10117",
            "52.5258",
            "13.3887",
        )
        .with_company("Total"),
    ]
}
