//! Shared resources handed to every scraper invocation.

use std::path::PathBuf;

use augips_core::{AppConfig, LocationRecord};

use crate::browser::BrowserConfig;
use crate::debug::DebugArtifacts;
use crate::error::ScraperError;
use crate::fetch::HttpFetcher;
use crate::geocode::{fill_missing_coordinates, Geocoder, PlaceholderGeocoder};

pub struct ScrapeContext {
    pub fetcher: HttpFetcher,
    pub browser: BrowserConfig,
    pub geocoder: Box<dyn Geocoder>,
    pub debug: DebugArtifacts,
    pub data_dir: PathBuf,
}

impl ScrapeContext {
    /// Build a context from application config. `debug` turns on artifact
    /// capture under `config.debug_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig, debug: bool) -> Result<Self, ScraperError> {
        let debug = if debug {
            DebugArtifacts::enabled(&config.debug_dir)
        } else {
            DebugArtifacts::disabled()
        };

        Ok(Self {
            fetcher: HttpFetcher::new(config.request_timeout_secs)?,
            browser: BrowserConfig {
                webdriver_url: config.webdriver_url.clone(),
                timeout_secs: config.browser_timeout_secs,
            },
            geocoder: Box::new(PlaceholderGeocoder),
            debug,
            data_dir: config.data_dir.clone(),
        })
    }

    /// Last step of every scraper: stamp `company_name` on records that
    /// lack one, then geocode any record missing coordinates.
    #[must_use]
    pub fn finalize(
        &self,
        company_name: &str,
        mut records: Vec<LocationRecord>,
    ) -> Vec<LocationRecord> {
        for record in &mut records {
            record
                .company_name
                .get_or_insert_with(|| company_name.to_string());
        }
        let geocoded = fill_missing_coordinates(&mut records, self.geocoder.as_ref());
        if geocoded > 0 {
            tracing::debug!(company = company_name, geocoded, "filled missing coordinates");
        }
        records
    }
}
