//! HTTP fetcher with bounded retries and a shared concurrency gate
//!
//! This module provides the page fetcher used for both listing and thread
//! pages, with features including:
//! - User-Agent rotation
//! - Run-wide concurrency limit via [`ConcurrencyGate`]
//! - Exponential backoff with jitter on 503 responses
//! - Flat backoff on transport failures and timeouts
//!
//! Any status other than 200 and 503 fails immediately without a retry.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CrawlerConfig;
use crate::crawler::gate::ConcurrencyGate;
use crate::crawler::headers::{build_forum_headers, random_user_agent};
use crate::crawler::stats::CrawlStats;
use crate::utils::error::FetchError;
use crate::utils::retry::{jitter, RetryPolicy};

/// Anything that can turn a URL into page HTML
///
/// An `Err` is a soft failure: callers degrade instead of aborting the run.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher for forum pages
pub struct HttpFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Gate shared with every other fetch of the run
    gate: ConcurrencyGate,

    retry: RetryPolicy,

    referer: String,

    accept_language: String,

    stats: Arc<CrawlStats>,
}

impl HttpFetcher {
    /// Create a fetcher from the crawler configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(
        config: &CrawlerConfig,
        gate: ConcurrencyGate,
        stats: Arc<CrawlStats>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            gate,
            retry: RetryPolicy::from_config(config),
            referer: config.referer.clone(),
            accept_language: config.accept_language.clone(),
            stats,
        })
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// One HTTP attempt, holding a gate slot until the body is read
    async fn attempt(&self, url: &str) -> Result<String, FetchError> {
        let headers =
            build_forum_headers(random_user_agent(), &self.referer, &self.accept_language)?;

        let _permit = self.gate.acquire().await?;
        self.stats.record_attempt();

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        match response.status() {
            StatusCode::OK => response.text().await.map_err(FetchError::from_transport),
            StatusCode::SERVICE_UNAVAILABLE => Err(FetchError::ServiceUnavailable),
            other => Err(FetchError::Status(other.as_u16())),
        }
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String, FetchError> {
        for attempt in 0..self.retry.max_attempts {
            let error = match self.attempt(url).await {
                Ok(body) => {
                    self.stats.record_page();
                    tracing::debug!(url = %url, attempt, bytes = body.len(), "Fetched page");
                    return Ok(body);
                }
                Err(e) if e.is_retryable() => e,
                Err(e) => {
                    tracing::warn!(url = %url, attempt, error = %e, "Fetch failed without retry");
                    return Err(e);
                }
            };

            if !self.retry.has_next(attempt) {
                tracing::warn!(url = %url, attempt, error = %error, "Last attempt failed");
                break;
            }

            let delay = match error {
                FetchError::ServiceUnavailable => {
                    self.retry.service_unavailable_delay(attempt, jitter())
                }
                _ => self.retry.transport_delay(jitter()),
            };

            tracing::debug!(
                url = %url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Retrying after backoff"
            );
            tokio::time::sleep(delay).await;
        }

        Err(FetchError::RetriesExhausted {
            attempts: self.retry.max_attempts,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if url::Url::parse(url).is_err() {
            self.stats.record_fetch_failure();
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let result = self.fetch_with_retry(url).await;
        if result.is_err() {
            self.stats.record_fetch_failure();
        }
        result
    }
}
