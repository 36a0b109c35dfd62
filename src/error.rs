//! Crate-level error type
//!
//! `Error` folds the fetch, parse and crawl errors of [`crate::utils::error`]
//! together with I/O, serialization and configuration failures. Components
//! keep returning their narrow error enums; this type is what the public
//! entry points (`ForumScanner::new`, `load_companies`, custom scorers)
//! hand back.
//!
//! Nothing in the crawl core is fatal to a run. [`ScanErrorTrait`] lets a
//! caller tell "no data" from "degraded data" from "worth retrying".

use std::io;
use thiserror::Error;

pub use crate::utils::error::{CrawlerError, FetchError, ParseError};

/// Classification shared by forumscan errors
pub trait ScanErrorTrait: std::error::Error {
    /// Whether trying the same operation again could succeed
    fn is_recoverable(&self) -> bool;

    /// One-line text for log lines and reports
    fn describe(&self) -> String;

    fn category(&self) -> ErrorCategory;
}

/// Broad source of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// HTTP, timeout or unexpected status
    Network,
    /// Markup or data that could not be understood
    Parsing,
    /// Rejected settings
    Config,
    Io,
    Other,
}

impl ErrorCategory {
    /// Label used in structured log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Config => "config",
            Self::Io => "io",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Crawler(#[from] CrawlerError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("Report serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Anything reported through `anyhow`, flattened to its message chain
    #[error("{0}")]
    Other(String),
}

impl ScanErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Crawler(CrawlerError::Fetch(e)) | Self::Fetch(e) => e.is_retryable(),
            Self::Crawler(CrawlerError::ListingUnavailable { source, .. }) => source.is_retryable(),
            Self::Io(_) => true,
            _ => false,
        }
    }

    fn describe(&self) -> String {
        format!("{} error: {self}", self.category())
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Crawler(CrawlerError::Parse(_)) | Self::Parse(_) | Self::Json(_) => {
                ErrorCategory::Parsing
            }
            Self::Toml(_) | Self::Config(_) => ErrorCategory::Config,
            Self::Crawler(_) | Self::Fetch(_) => ErrorCategory::Network,
            Self::Io(_) => ErrorCategory::Io,
            Self::Other(_) => ErrorCategory::Other,
        }
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
