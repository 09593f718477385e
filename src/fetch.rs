//! # Page Fetching with Retry
//!
//! Every page the finder reads comes through [`Fetcher::fetch`]. There is no
//! cache: each call is a fresh HTTP GET.
//!
//! ## Retry Policy
//!
//! Transient failures are retried up to [`FetchConfig::retries`] times:
//! - **Statuses**: 429, 500, 502, 503, 504 by default
//! - **Network errors**: timeouts, refused or reset connections
//! - **Backoff**: no sleep before the first retry, then
//!   `backoff_factor * 2^(n-1)` seconds (2s, 4s with the default factor 1),
//!   capped at two minutes
//! - **Retry-After**: a 429/503 response carrying the header sleeps for the
//!   server-requested delay instead
//!
//! Any other non-success status fails immediately.

use crate::config::FetchConfig;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Longest sleep between two attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(120);

const USER_AGENT: &str = concat!("tide-pool-finder/", env!("CARGO_PKG_VERSION"));

/// Errors that end a fetch without page content.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network, TLS or protocol failure after exhausting retries
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server responded {status} after {attempts} attempt(s)")]
    Status { status: u16, attempts: u32 },
}

/// HTTP client applying the configured retry policy to every GET.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    policy: FetchConfig,
}

impl Fetcher {
    /// Build a client with the per-attempt timeout from `policy`.
    pub fn new(policy: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(policy.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, policy })
    }

    /// GET `url` and return the body text.
    ///
    /// Failures are logged together with the URL before being returned, so
    /// callers only need to decide what to skip.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.get_with_retry(url).await.inspect_err(|error| {
            warn!(%url, "Came across error {}", error);
        })
    }

    async fn get_with_retry(&self, url: &str) -> Result<String, FetchError> {
        let mut retries = 0u32;

        loop {
            let requested_delay = match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.text().await?);
                    }

                    if !self.is_retryable(status) || retries >= self.policy.retries {
                        return Err(FetchError::Status {
                            status: status.as_u16(),
                            attempts: retries + 1,
                        });
                    }

                    debug!(%url, status = status.as_u16(), "Retryable status");
                    retry_after(status, response.headers())
                }
                Err(error) => {
                    let transient = error.is_timeout() || error.is_connect() || error.is_request();
                    if !transient || retries >= self.policy.retries {
                        return Err(error.into());
                    }

                    debug!(%url, %error, "Retryable network error");
                    None
                }
            };

            retries += 1;
            let delay = retry_delay(requested_delay, self.policy.backoff_factor, retries);
            debug!(%url, retry = retries, ?delay, "Backing off before retry");
            tokio::time::sleep(delay).await;
        }
    }

    fn is_retryable(&self, status: StatusCode) -> bool {
        self.policy.retry_statuses.contains(&status.as_u16())
    }
}

/// Sleep before retry number `retry` (1-based).
fn backoff(factor: f64, retry: u32) -> Duration {
    if retry <= 1 || factor <= 0.0 {
        return Duration::ZERO;
    }
    let secs = factor * 2f64.powi(retry as i32 - 1);
    Duration::try_from_secs_f64(secs).unwrap_or(MAX_BACKOFF)
}

/// Delay before retry `retry`: the server's request if any, else backoff.
fn retry_delay(requested: Option<Duration>, factor: f64, retry: u32) -> Duration {
    requested
        .unwrap_or_else(|| backoff(factor, retry))
        .min(MAX_BACKOFF)
}

/// Server-requested delay, honored for 429 and 503 only.
fn retry_after(status: StatusCode, headers: &HeaderMap) -> Option<Duration> {
    if !matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
    ) {
        return None;
    }

    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
