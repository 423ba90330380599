//! HTTP fetcher for a single web page.
//!
//! This module provides a small client that:
//! - Sends exactly one GET per call, with no retries
//! - Attaches a fixed header map (a desktop-browser `User-Agent` by default)
//! - Buffers the whole body and decodes it as strict UTF-8
//! - Classifies every failure into a [`FetchError`] variant
//!
//! ## Example
//!
//! ```no_run
//! use page_fetcher::http::PageClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = PageClient::default();
//! match client.fetch("https://example.com/data.json").await {
//!     Ok(body) => println!("{body}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Classification
//!
//! - A final response status outside 2xx is a [`FetchError::Transport`].
//!   Redirects are followed first, so only the last status counts.
//! - Connect, DNS, timeout and send failures are a [`FetchError::Network`].
//! - Anything else (malformed URL, body read failure, invalid UTF-8) is a
//!   [`FetchError::Unexpected`].
//!
//! Every failure is logged once at `error` level before it is returned.

use anyhow::{Context as _, Result};
use core::time::Duration;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, error};

/// Desktop Chrome user agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Failure of a single fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP Error: {status} - {reason}")]
    Transport { status: u16, reason: String },

    /// The server could not be reached.
    #[error("URL Error: {reason}")]
    Network { reason: String },

    /// Anything else: a malformed URL, a failed body read, or a body that is not UTF-8.
    #[error("An error occurred: {message}")]
    Unexpected { message: String },
}

impl FetchError {
    fn from_send(err: &reqwest::Error) -> Self {
        let reason = describe(err);
        if err.is_builder() {
            return Self::Unexpected { message: reason };
        }
        if err.is_connect() || err.is_timeout() || err.is_request() {
            return Self::Network { reason };
        }
        Self::Unexpected { message: reason }
    }
}

/// Flatten an error and its sources into one line
fn describe(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// Request configuration shared by every fetch made through one client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        Self {
            headers,
            timeout: None,
        }
    }
}

impl FetchConfig {
    /// Builds a config from an explicit header map.
    #[must_use]
    pub fn with_headers(headers: HeaderMap) -> Self {
        Self {
            headers,
            timeout: None,
        }
    }

    /// Replaces the `User-Agent` header.
    ///
    /// # Errors
    /// Returns an error if `user_agent` contains characters not allowed in a header value
    pub fn user_agent(mut self, user_agent: &str) -> Result<Self> {
        let value = HeaderValue::from_str(user_agent).context("Invalid User-Agent value")?;
        self.headers.insert(USER_AGENT, value);
        Ok(self)
    }

    /// Sets a total request timeout. Without one the transport default applies.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Single-shot page fetcher
pub struct PageClient {
    client: Client,
}

impl Default for PageClient {
    /// Creates a client with the default browser headers.
    ///
    /// # Panics
    /// Panics if the TLS backend cannot be initialised.
    fn default() -> Self {
        Self::new(FetchConfig::default()).expect("default HTTP client")
    }
}

impl PageClient {
    /// Creates a client that sends `config`'s headers on every request.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = Client::builder().default_headers(config.headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
        })
    }

    /// Fetches `url` once and returns the decoded body.
    ///
    /// # Errors
    /// Returns the [`FetchError`] describing why no body was obtained. The
    /// same error has already been logged when this returns.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", url);

        let result = self.fetch_once(url).await;
        match &result {
            Ok(body) => debug!("Fetched {} bytes from {}", body.len(), url),
            Err(e) => error!("{}", e),
        }
        result
    }

    /// Like [`fetch`](Self::fetch), but collapses every failure to `None`.
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        self.fetch(url).await.ok()
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_send(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Unexpected {
                message: describe(&e),
            })?;

        String::from_utf8(bytes.to_vec()).map_err(|e| FetchError::Unexpected {
            message: format!("response body is not valid UTF-8: {e}"),
        })
    }
}

#[cfg(test)]
mod tests;
