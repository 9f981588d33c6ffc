//! Offline scraper with two fixed records. Exercises the whole pipeline
//! without touching the network.

use async_trait::async_trait;
use augips_core::LocationRecord;

use super::Scraper;
use crate::context::ScrapeContext;
use crate::error::ScraperError;

const COMPANY: &str = "Simple Test";

#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleScraper;

#[async_trait]
impl Scraper for SimpleScraper {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn company_name(&self) -> &'static str {
        COMPANY
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        tracing::info!(scraper = self.name(), "generating test locations");
        Ok(ctx.finalize(COMPANY, sample_locations()))
    }
}

fn sample_locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord::sample(
            "Test Store #1",
            "123 Test St",
            "Testville",
            "TS",
            "12345",
            "35.1234",
            "-90.5678",
        ),
        LocationRecord::sample(
            "Test Store #2",
            "456 Sample Ave",
            "Exampleburg",
            "TS",
            "67890",
            "36.5678",
            "-91.1234",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use augips_core::AppConfig;

    use super::*;

    #[tokio::test]
    async fn returns_two_stamped_records() {
        let ctx = ScrapeContext::from_config(&AppConfig::default(), false).unwrap();
        let records = SimpleScraper.scrape(&ctx).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].store_name.as_deref(), Some("Test Store #1"));
        assert_eq!(records[1].longitude.as_deref(), Some("-91.1234"));
        assert!(records
            .iter()
            .all(|r| r.company_name.as_deref() == Some("Simple Test")));
    }

    #[test]
    fn output_file_is_derived_from_company() {
        let path = SimpleScraper.output_file(std::path::Path::new("data"));
        assert_eq!(path, std::path::Path::new("data/simple_test_locations.csv"));
    }
}
