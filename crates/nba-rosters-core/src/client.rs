//! HTTP client with a fixed-interval rate limit for basketball-reference.com
//!
//! The site caps clients at roughly 20 requests per minute. Every fetch
//! attempt, successful or not, is followed by a fixed pause so the crawler stays
//! under that cap without any shared scheduling state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};

use crate::error::{FetchError, Result};
use crate::urls::absolute_url;

/// Base URL for basketball-reference.com
pub const DEFAULT_BASE_URL: &str = "https://www.basketball-reference.com";

/// Pause after every request; keeps the crawler at about 19 requests per minute
pub const DEFAULT_RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(3100);

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Fixed-interval pause between outbound requests
///
/// Holds no timing state: each call to [`RateLimiter::wait`] sleeps for the
/// full interval. The call counter exists for observability and tests.
pub struct RateLimiter {
    interval: Duration,
    waits: AtomicU64,
}

impl RateLimiter {
    /// Create a rate limiter that pauses for `interval` on every call
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use nba_rosters_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(Duration::from_millis(3100));
    /// assert_eq!(limiter.interval(), Duration::from_millis(3100));
    /// ```
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            waits: AtomicU64::new(0),
        }
    }

    /// Sleep for the configured interval.
    pub async fn wait(&self) {
        self.waits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Sleeping {:?} to respect rate limit", self.interval);
        tokio::time::sleep(self.interval).await;
    }

    /// Get the pause applied after each request
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of times [`RateLimiter::wait`] has been called
    pub fn waits(&self) -> u64 {
        self.waits.load(Ordering::Relaxed)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_LIMIT_INTERVAL)
    }
}

/// Anything that can return the HTML of a page
///
/// The crawler is generic over this so walks can run against canned pages.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Site base address used to absolutize hrefs
    fn base_url(&self) -> &str;

    /// Fetch the page at an absolute `url`.
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// Configuration for the roster HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site base address (default: https://www.basketball-reference.com)
    pub base_url: String,
    /// Pause after each request (default: 3.1 s)
    pub rate_limit_interval: Duration,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limit_interval: DEFAULT_RATE_LIMIT_INTERVAL,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client for basketball-reference.com
///
/// One instance per run: it owns the connection pool and the rate limiter.
/// Requests are never retried.
pub struct RosterClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Pause applied after every request
    rate_limiter: RateLimiter,
    base_url: String,
}

impl RosterClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.rate_limit_interval),
            base_url: config.base_url,
        })
    }

    /// Fetch a site-relative path, e.g. "/teams/BOS/2024.html"
    pub async fn fetch_path(&self, path: &str) -> std::result::Result<String, FetchError> {
        let url = absolute_url(&self.base_url, path);
        self.fetch(&url).await
    }

    /// Get a reference to the rate limiter
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    async fn get(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))
    }
}

impl PageSource for RosterClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        tracing::debug!("GET {}", url);
        let result = self.get(url).await;

        if let Err(e) = &result {
            tracing::warn!("{}", e);
        }

        // Pause after every attempt, success or failure
        self.rate_limiter.wait().await;

        result
    }
}
