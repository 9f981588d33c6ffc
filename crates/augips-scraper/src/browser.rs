//! Headless browser sessions over WebDriver, for locator pages that only
//! render stores after JavaScript runs.
//!
//! Requires a running WebDriver endpoint (chromedriver, geckodriver, or a
//! Selenium server) at [`BrowserConfig::webdriver_url`].

use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;

use crate::error::ScraperError;

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    /// Page-load budget and the default element-wait budget.
    pub timeout_secs: u64,
}

impl BrowserConfig {
    /// Headless Chrome capabilities sent on session creation.
    #[must_use]
    pub fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let caps = json!({
            "browserName": "chrome",
            "goog:chromeOptions": {
                "args": [
                    "--headless=new",
                    "--disable-gpu",
                    "--no-sandbox",
                    "--window-size=1366,900"
                ]
            }
        });
        caps.as_object().cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// One live browser window.
///
/// Call [`BrowserSession::close`] when done; dropping the session leaves
/// the remote browser running until the WebDriver server reaps it.
pub struct BrowserSession {
    client: Client,
    timeout: Duration,
}

impl BrowserSession {
    /// Start a new headless session.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the WebDriver endpoint is
    /// unreachable or refuses the session.
    pub async fn connect(config: &BrowserConfig) -> Result<Self, ScraperError> {
        tracing::debug!(webdriver_url = %config.webdriver_url, "starting browser session");
        let client = ClientBuilder::native()
            .capabilities(config.capabilities())
            .connect(&config.webdriver_url)
            .await?;

        let timeout = config.timeout();
        client
            .update_timeouts(TimeoutConfiguration::new(None, Some(timeout), None))
            .await?;

        Ok(Self { client, timeout })
    }

    /// Navigate and wait for the page load to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] on navigation failure or timeout.
    pub async fn goto(&self, url: &str) -> Result<(), ScraperError> {
        tracing::debug!(url, "navigating");
        self.client.goto(url).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the WebDriver command fails.
    pub async fn title(&self) -> Result<String, ScraperError> {
        Ok(self.client.title().await?)
    }

    /// Type `text` into the first element matching `css`.
    ///
    /// Returns `Ok(false)` when no element matches.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the lookup fails for any reason
    /// other than a missing element, or the element cannot receive input.
    pub async fn fill(&self, css: &str, text: &str) -> Result<bool, ScraperError> {
        let Some(element) = self.find_optional(css).await? else {
            return Ok(false);
        };
        element.clear().await?;
        element.send_keys(text).await?;
        Ok(true)
    }

    /// Click the first element matching `css`.
    ///
    /// Returns `Ok(false)` when no element matches.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the lookup fails for any reason
    /// other than a missing element, or the click is rejected.
    pub async fn click(&self, css: &str) -> Result<bool, ScraperError> {
        let Some(element) = self.find_optional(css).await? else {
            return Ok(false);
        };
        element.click().await?;
        Ok(true)
    }

    /// First element matching `css`; `None` only for a "no such element" reply.
    async fn find_optional(&self, css: &str) -> Result<Option<Element>, ScraperError> {
        match self.client.find(Locator::Css(css)).await {
            Ok(element) => Ok(Some(element)),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Wait for the first of `selectors` to appear, trying each in order for
    /// up to `per_selector`. Returns the selector that matched.
    pub async fn wait_for_any<'a>(
        &self,
        selectors: &[&'a str],
        per_selector: Duration,
    ) -> Option<&'a str> {
        for &selector in selectors {
            tracing::debug!(selector, "waiting for selector");
            let found = self
                .client
                .wait()
                .at_most(per_selector)
                .for_element(Locator::Css(selector))
                .await;
            if found.is_ok() {
                tracing::debug!(selector, "selector found");
                return Some(selector);
            }
        }
        None
    }

    /// Wait for `selector` using the session's default budget.
    pub async fn wait_for(&self, selector: &str) -> bool {
        self.wait_for_any(&[selector], self.timeout).await.is_some()
    }

    /// Outer HTML of every element matching `css`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the WebDriver command fails.
    pub async fn elements_html(&self, css: &str) -> Result<Vec<String>, ScraperError> {
        let elements = self.client.find_all(Locator::Css(css)).await?;
        let mut html = Vec::with_capacity(elements.len());
        for element in elements {
            html.push(element.html(false).await?);
        }
        Ok(html)
    }

    /// Current DOM serialized as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the WebDriver command fails.
    pub async fn page_source(&self) -> Result<String, ScraperError> {
        Ok(self.client.source().await?)
    }

    /// PNG screenshot of the current viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the WebDriver command fails.
    pub async fn screenshot(&self) -> Result<Vec<u8>, ScraperError> {
        Ok(self.client.screenshot().await?)
    }

    /// End the remote session.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the WebDriver server rejects
    /// the close command.
    pub async fn close(self) -> Result<(), ScraperError> {
        self.client.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BrowserConfig {
        BrowserConfig {
            webdriver_url: "http://localhost:4444".to_string(),
            timeout_secs: 60,
        }
    }

    #[test]
    fn capabilities_request_headless_chrome() {
        let caps = config().capabilities();
        assert_eq!(caps["browserName"], "chrome");
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless=new"));
    }

    #[test]
    fn timeout_uses_configured_seconds() {
        assert_eq!(config().timeout(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn connect_fails_cleanly_without_webdriver() {
        let server = wiremock::MockServer::start().await;
        let cfg = BrowserConfig {
            webdriver_url: server.uri(),
            timeout_secs: 5,
        };
        let result = BrowserSession::connect(&cfg).await;
        assert!(
            matches!(result, Err(ScraperError::Browser(_))),
            "expected Browser error"
        );
    }

    // ---------------------------------------------------------------------------
    // Element lookup against a scripted WebDriver
    // ---------------------------------------------------------------------------

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Server that accepts a session and answers element lookups with `error`.
    async fn webdriver_with_find_error(error: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": {"sessionId": "s1", "capabilities": {"browserName": "chrome"}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/session/s1/timeouts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": null})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/session/s1/element"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "value": {"error": error, "message": "scripted", "stacktrace": ""}
            })))
            .mount(&server)
            .await;
        server
    }

    async fn session_for(server: &MockServer) -> BrowserSession {
        let cfg = BrowserConfig {
            webdriver_url: server.uri(),
            timeout_secs: 5,
        };
        BrowserSession::connect(&cfg)
            .await
            .expect("scripted session should connect")
    }

    #[tokio::test]
    async fn missing_element_is_not_an_error() {
        let server = webdriver_with_find_error("no such element").await;
        let session = session_for(&server).await;

        assert!(!session.fill("#zip", "65801").await.unwrap());
        assert!(!session.click("#go").await.unwrap());
    }

    #[tokio::test]
    async fn dead_session_propagates_from_fill_and_click() {
        let server = webdriver_with_find_error("invalid session id").await;
        let session = session_for(&server).await;

        assert!(
            matches!(session.fill("#zip", "65801").await, Err(ScraperError::Browser(_))),
            "fill should surface a dead session"
        );
        assert!(
            matches!(session.click("#go").await, Err(ScraperError::Browser(_))),
            "click should surface a dead session"
        );
    }
}
