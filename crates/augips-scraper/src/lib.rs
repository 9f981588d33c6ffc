pub mod browser;
pub mod context;
pub mod debug;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod geocode;
pub mod output;
pub mod registry;
pub mod retailers;
pub mod robots;
pub mod runner;

pub use context::ScrapeContext;
pub use error::ScraperError;
pub use registry::Registry;
pub use retailers::Scraper;
pub use runner::{run_named, run_scraper, RunOutcome, RunTarget, RunnerError};
