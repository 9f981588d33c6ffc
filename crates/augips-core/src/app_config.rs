use std::path::PathBuf;

/// Runtime settings shared by the CLI and every scraper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory that receives one `*_locations.csv` file per scraper.
    pub data_dir: PathBuf,
    /// Directory for HTML snapshots and screenshots written in debug mode.
    pub debug_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Page-load and element-wait budget for headless browser sessions.
    pub browser_timeout_secs: u64,
    pub webdriver_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            debug_dir: PathBuf::from("debug"),
            log_level: "info".to_string(),
            request_timeout_secs: 30,
            browser_timeout_secs: 60,
            webdriver_url: "http://localhost:4444".to_string(),
        }
    }
}
