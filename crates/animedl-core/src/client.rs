//! HTTP client with rate limiting for AnimeWorld
//!
//! This module provides the page fetcher shared by every stage of a
//! session. Requests are spaced by a [`RateLimiter`], cookies persist for
//! the lifetime of the client and any non-2xx status is surfaced as
//! [`AnimeDlError::Protocol`] without retrying.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{AnimeDlError, Result};
use crate::selectors::Page;

/// Base URL of the primary site
pub const SITE_URL: &str = "https://www.animeworld.tv";

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Accept-Language header for Italian content
const DEFAULT_ACCEPT_LANGUAGE: &str = "it-IT,it;q=0.9,en;q=0.8";

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Example
    /// ```
    /// use animedl_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(4.0);
    /// assert_eq!(limiter.min_interval().as_millis(), 250);
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second.max(0.01));
        let now = Instant::now();
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(now.checked_sub(min_interval).unwrap_or(now))),
        }
    }

    /// Wait until the next request is allowed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a bare reqwest client with these settings.
    pub fn build_http(&self) -> Result<reqwest::Client> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        Ok(reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?)
    }
}

/// Page fetcher bound to one site
///
/// Create it once, pass it by reference to every component that talks to
/// the site, drop it when the session ends.
pub struct SiteClient {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl SiteClient {
    /// Client for the primary site with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(SITE_URL, ClientConfig::default())
    }

    /// Client for `base_url` with custom configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(base_url: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AnimeDlError::InvalidUrl(base_url));
        }

        Ok(Self {
            client: config.build_http()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(config.requests_per_second),
        })
    }

    /// Absolute URL for a site path; absolute inputs are returned unchanged.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') || path.starts_with('?') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Fetch raw HTML for a site path.
    ///
    /// # Errors
    /// - `AnimeDlError::Transport` - connection or timeout failure
    /// - `AnimeDlError::Protocol` - non-2xx status
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.resolve(path);
        self.rate_limiter.acquire().await;

        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnimeDlError::Protocol { status, url });
        }

        Ok(response.text().await?)
    }

    /// Fetch a site path and parse it as HTML.
    pub async fn fetch_page(&self, path: &str) -> Result<Page> {
        let html = self.fetch(path).await?;
        Ok(Page::parse(&html))
    }
}
