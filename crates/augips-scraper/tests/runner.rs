//! Integration tests for `run_scraper` and `run_named`.

use async_trait::async_trait;
use augips_core::{AppConfig, LocationRecord};

use augips_scraper::retailers::{AdvanceAutoPartsScraper, SimpleScraper};
use augips_scraper::{
    run_named, run_scraper, Registry, RunnerError, ScrapeContext, Scraper, ScraperError,
};

fn test_context(data_dir: &std::path::Path) -> ScrapeContext {
    let config = AppConfig {
        data_dir: data_dir.to_path_buf(),
        request_timeout_secs: 2,
        browser_timeout_secs: 2,
        ..AppConfig::default()
    };
    ScrapeContext::from_config(&config, false).expect("failed to build test context")
}

struct FailingScraper;

#[async_trait]
impl Scraper for FailingScraper {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn company_name(&self) -> &'static str {
        "Failing Co"
    }

    async fn scrape(&self, _ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        Err(ScraperError::Browser("session refused".to_string()))
    }
}

struct EmptyScraper;

#[async_trait]
impl Scraper for EmptyScraper {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn company_name(&self) -> &'static str {
        "Empty Co"
    }

    async fn scrape(&self, _ctx: &ScrapeContext) -> Result<Vec<LocationRecord>, ScraperError> {
        Ok(vec![])
    }
}

// ---------------------------------------------------------------------------
// run_scraper
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_scraper_writes_csv_into_created_data_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("nested").join("data");
    let ctx = test_context(&data_dir);

    let outcome = run_scraper(&SimpleScraper, &ctx).await;

    assert!(outcome.succeeded());
    assert_eq!(outcome.records.len(), 2);
    let path = outcome.output_file.expect("CSV should be written");
    assert_eq!(path, data_dir.join("simple_test_locations.csv"));

    let csv = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "store_name,address,city,state,zip_code,latitude,longitude,company_name"
    );
    assert_eq!(
        lines[1],
        "Test Store #1,123 Test St,Testville,TS,12345,35.1234,-90.5678,Simple Test"
    );
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn run_scraper_overwrites_previous_output() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = test_context(tmp.path());
    let path = tmp.path().join("simple_test_locations.csv");
    std::fs::write(&path, "stale\nstale\nstale\nstale\nstale\n").unwrap();

    run_scraper(&SimpleScraper, &ctx).await;

    let csv = std::fs::read_to_string(&path).unwrap();
    assert_eq!(csv.lines().count(), 3, "header plus two rows");
    assert!(!csv.contains("stale"));
}

#[tokio::test]
async fn run_scraper_captures_error_without_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = test_context(tmp.path());

    let outcome = run_scraper(&FailingScraper, &ctx).await;

    assert!(!outcome.succeeded());
    assert!(outcome.records.is_empty());
    assert!(outcome.output_file.is_none());
    assert!(outcome
        .error
        .as_deref()
        .is_some_and(|e| e.contains("session refused")));
    assert!(!tmp.path().join("failing_co_locations.csv").exists());
}

#[tokio::test]
async fn run_scraper_skips_file_for_empty_result() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = test_context(tmp.path());

    let outcome = run_scraper(&EmptyScraper, &ctx).await;

    assert!(outcome.succeeded());
    assert!(outcome.output_file.is_none());
    assert!(!tmp.path().join("empty_co_locations.csv").exists());
}

// ---------------------------------------------------------------------------
// run_named
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_named_rejects_unknown_scraper_and_lists_available() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = test_context(tmp.path());
    let registry = Registry::with_defaults();

    let err = run_named("walmart", &registry, &ctx)
        .await
        .expect_err("unknown name should fail");

    let RunnerError::UnknownScraper { name, available } = err;
    assert_eq!(name, "walmart");
    assert!(available.starts_with("simple, autozone"));
    assert!(available.ends_with("wikipedia"));
}

#[tokio::test]
async fn run_named_is_case_insensitive() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = test_context(tmp.path());
    let registry = Registry::with_defaults();

    let outcomes = run_named("SIMPLE", &registry, &ctx).await.unwrap();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].name, "simple");
}

#[tokio::test]
async fn run_all_continues_past_failures_in_registration_order() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = test_context(tmp.path());

    let mut registry = Registry::new();
    registry.register(Box::new(FailingScraper));
    registry.register(Box::new(SimpleScraper));
    registry.register(Box::new(AdvanceAutoPartsScraper::with_base_url(
        "http://127.0.0.1:1/",
    )));

    let outcomes = run_named("all", &registry, &ctx).await.unwrap();

    let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["failing", "simple", "advance"]);
    assert!(!outcomes[0].succeeded());
    assert!(outcomes[1].succeeded());
    assert_eq!(outcomes[2].records.len(), 2, "unreachable site falls back");
    assert!(tmp.path().join("advance_auto_parts_locations.csv").exists());
}
