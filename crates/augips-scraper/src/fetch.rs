//! Low-level HTTP helpers shared by every scraper.
//!
//! Single attempt per request with a fixed timeout. Non-2xx statuses are
//! returned to the caller as data rather than errors because most scrapers
//! branch on the status to pick their fallback table.

use std::time::Duration;

use rand::seq::IndexedRandom;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;

use crate::error::ScraperError;

const DEFAULT_USER_AGENT: &str = "augips/0.1 (store-locations)";

const BROWSER_USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
];

/// A fetched response body together with its final status.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Thin wrapper over a configured `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests time out after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Plain GET using the client's default headers.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on network, TLS, or timeout failure.
    pub async fn get(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        self.send(self.client.get(url), url).await
    }

    /// GET with a browser-like header set and a randomly chosen user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on network, TLS, or timeout failure.
    pub async fn get_with_browser_headers(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        self.send(self.client.get(url).headers(request_headers()), url)
            .await
    }

    /// POST `fields` as `application/x-www-form-urlencoded` with browser headers.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on network, TLS, or timeout failure.
    pub async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<FetchedPage, ScraperError> {
        let request = self
            .client
            .post(url)
            .headers(request_headers())
            .form(fields);
        self.send(request, url).await
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<FetchedPage, ScraperError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        tracing::debug!(url, status, bytes = body.len(), "fetched");
        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }
}

/// Pick one of the bundled browser user-agent strings at random.
#[must_use]
pub fn random_user_agent() -> &'static str {
    BROWSER_USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(BROWSER_USER_AGENTS[0])
}

/// Headers that make a request look like an ordinary browser navigation.
#[must_use]
pub fn request_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(random_user_agent()),
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}
