//! Error types for the forum crawler
//!
//! This module defines the domain error enums used by the fetcher,
//! the HTML parsers and the crawl orchestration.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level HTTP failure (connection refused, reset, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Server answered 503 Service Unavailable
    #[error("Service unavailable (503)")]
    ServiceUnavailable,

    /// Any other non-200 status, not retried
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// Every attempt was used up
    #[error("Gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The concurrency gate was closed while waiting for a slot
    #[error("Concurrency gate closed")]
    GateClosed,
}

impl FetchError {
    /// Classify a reqwest error, separating timeouts from other transport failures
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }

    /// Whether the fetcher retries after this error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout | Self::ServiceUnavailable)
    }
}

/// Errors that can occur during parsing operations
#[derive(Error, Debug)]
pub enum ParseError {
    /// Listing page has no thread table
    #[error("Thread table not found on listing page")]
    ThreadTableNotFound,

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A thread date could not be understood
    #[error("Unparsable date: {0}")]
    UnparsableDate(String),
}

/// General crawler errors
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// Fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The company listing page could not be fetched
    #[error("Listing page unavailable for {company}: {source}")]
    ListingUnavailable {
        company: String,
        #[source]
        source: FetchError,
    },}
