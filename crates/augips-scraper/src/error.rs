use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser session error: {0}")]
    Browser(String),

    #[error("invalid CSS selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },
}

impl From<fantoccini::error::NewSessionError> for ScraperError {
    fn from(err: fantoccini::error::NewSessionError) -> Self {
        ScraperError::Browser(format!("could not start WebDriver session: {err}"))
    }
}

impl From<fantoccini::error::CmdError> for ScraperError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        ScraperError::Browser(err.to_string())
    }
}
