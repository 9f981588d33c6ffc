//! Runs scrapers and persists their output.
//!
//! A failing scraper never aborts a batch: its error is captured in the
//! [`RunOutcome`] and the next scraper runs.

use std::path::PathBuf;

use augips_core::LocationRecord;
use thiserror::Error;

use crate::context::ScrapeContext;
use crate::output::write_csv;
use crate::registry::Registry;
use crate::retailers::Scraper;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("unknown scraper '{name}' (available: {available})")]
    UnknownScraper { name: String, available: String },
}

/// What `run <target>` should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    All,
    List,
    Named(String),
}

impl RunTarget {
    /// `all` and `list` are reserved words; anything else names a scraper.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else if trimmed.eq_ignore_ascii_case("list") {
            Self::List
        } else {
            Self::Named(trimmed.to_string())
        }
    }
}

/// Result of one scraper run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub name: String,
    pub company_name: String,
    pub records: Vec<LocationRecord>,
    /// Set only when a CSV was written.
    pub output_file: Option<PathBuf>,
    pub error: Option<String>,
}

impl RunOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Run one scraper and write its CSV when it produced records.
pub async fn run_scraper(scraper: &dyn Scraper, ctx: &ScrapeContext) -> RunOutcome {
    let name = scraper.name();
    let company = scraper.company_name();
    tracing::info!(scraper = name, company, "scraping store locations");

    let mut outcome = RunOutcome {
        name: name.to_string(),
        company_name: company.to_string(),
        records: Vec::new(),
        output_file: None,
        error: None,
    };

    if let Err(e) = std::fs::create_dir_all(&ctx.data_dir) {
        tracing::error!(
            scraper = name,
            data_dir = %ctx.data_dir.display(),
            error = %e,
            "cannot create data directory"
        );
        outcome.error = Some(e.to_string());
        return outcome;
    }

    match scraper.scrape(ctx).await {
        Ok(records) => outcome.records = records,
        Err(e) => {
            tracing::error!(scraper = name, error = %e, "scraper failed");
            outcome.error = Some(e.to_string());
            return outcome;
        }
    }

    if outcome.records.is_empty() {
        tracing::info!(scraper = name, "no data to save");
        return outcome;
    }

    let path = scraper.output_file(&ctx.data_dir);
    match write_csv(&path, &outcome.records) {
        Ok(rows) => {
            tracing::info!(scraper = name, rows, path = %path.display(), "saved locations");
            outcome.output_file = Some(path);
        }
        Err(e) => {
            tracing::error!(
                scraper = name,
                path = %path.display(),
                error = %e,
                "failed to write CSV"
            );
            outcome.error = Some(e.to_string());
        }
    }

    outcome
}

/// Run a single named scraper, or every registered scraper in order for
/// `"all"`.
///
/// # Errors
///
/// Returns [`RunnerError::UnknownScraper`] when `target` names no
/// registered scraper. Scraper failures are reported per outcome instead.
pub async fn run_named(
    target: &str,
    registry: &Registry,
    ctx: &ScrapeContext,
) -> Result<Vec<RunOutcome>, RunnerError> {
    match RunTarget::parse(target) {
        RunTarget::All => {
            let mut outcomes = Vec::with_capacity(registry.len());
            for scraper in registry.iter() {
                outcomes.push(run_scraper(scraper, ctx).await);
            }
            Ok(outcomes)
        }
        RunTarget::List | RunTarget::Named(_) => {
            let scraper = registry
                .get(target)
                .ok_or_else(|| RunnerError::UnknownScraper {
                    name: target.trim().to_string(),
                    available: registry.names().join(", "),
                })?;
            Ok(vec![run_scraper(scraper, ctx).await])
        }
    }
}
