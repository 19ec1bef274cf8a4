//! HTTP fetch utilities for pagestat.
//!
//! A single blocking GET with a hard timeout. Only `200 OK` counts as a
//! successful fetch; every other outcome is a [`FetchError`]. No retries.
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::USER_AGENT;
use thiserror::Error;

use crate::warning::{info, warn_once};

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for a page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Upper bound for the whole request, body included.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Replace the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Why a fetch did not produce a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// Nothing came back within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, DNS, TLS or protocol failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with something other than `200 OK`.
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The status was fine but the body could not be read as text.
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl FetchError {
    fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Fetch a URL and return its body as text.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created, the request fails
/// or times out, the response status is not `200 OK`, or the body cannot be
/// decoded.
pub fn fetch_page(url: &str, config: &FetchConfig) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))?;

    let response = client
        .get(url)
        .header(USER_AGENT, config.user_agent.as_str())
        .send()
        .map_err(|e| FetchError::from_reqwest(&e, config.timeout))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status.as_u16()));
    }

    response.text().map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout(config.timeout)
        } else {
            FetchError::Body(e.to_string())
        }
    })
}

/// Fetch a page, folding every failure into `None`.
///
/// This is the "valid or empty" contract the analyzer relies on: the caller
/// never sees an error, only whether a document arrived. Failures are
/// reported once through the warning channel.
#[must_use]
pub fn scrape(url: &str, config: &FetchConfig) -> Option<String> {
    info("Fetch", &format!("Scraping: {url}"));
    match fetch_page(url, config) {
        Ok(body) => Some(body),
        Err(err) => {
            warn_once("Fetch", &format!("{url}: {err}"));
            None
        }
    }
}
