//! Configuration management for the forum crawler
//!
//! This module handles loading and validating configuration from environment variables
//! and TOML files. Every component receives its own section at construction time.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Longest accepted recency window (about a century)
pub const MAX_RECENCY_DAYS: i64 = 36_500;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP and concurrency settings
    pub crawler: CrawlerConfig,

    /// Per-thread crawl limits
    pub thread: ThreadConfig,

    /// Thread recency filter
    pub filter: FilterConfig,

    /// Company directory markers
    pub directory: DirectoryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of simultaneous outstanding requests for the whole run
    pub max_concurrent_requests: usize,

    /// Attempts per URL, first try included
    pub max_attempts: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Backoff unit in milliseconds
    pub backoff_unit_ms: u64,

    /// Pause after each additional thread page, in milliseconds
    pub page_delay_ms: u64,

    /// Referer sent with every request
    pub referer: String,

    /// Accept-Language sent with every request
    pub accept_language: String,
}

/// Limits applied to a single forum thread
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadConfig {
    /// Pages fetched per thread, first page included
    pub max_pages: usize,

    /// Posts accumulated per thread
    pub max_posts: usize,

    /// Characters kept from the final thread text
    pub max_text_chars: usize,

    /// Posts shorter than this are treated as UI noise
    pub min_post_chars: usize,
}

/// What to do with listing rows whose date cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndatedPolicy {
    /// Drop the thread
    #[default]
    Exclude,
    /// Keep the thread with an unknown date
    Retain,
}

/// Thread recency filter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Threads posted before `now - recency_days` are skipped
    pub recency_days: i64,

    /// Handling of rows with unparsable dates
    pub undated_threads: UndatedPolicy,
}

/// Markers identifying forum links in the company directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Substring marking a forum path
    pub forum_marker: String,

    /// Substring marking the forum site's domain
    pub site_marker: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 5,
            max_attempts: 3,
            request_timeout_secs: 10,
            backoff_unit_ms: 1000,
            page_delay_ms: 300,
            referer: String::from("https://www.bankier.pl/"),
            accept_language: String::from("pl,en-US;q=0.7,en;q=0.3"),
        }
    }
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            max_posts: 100,
            max_text_chars: 20_000,
            min_post_chars: 15,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            recency_days: 14,
            undated_threads: UndatedPolicy::Exclude,
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            forum_marker: String::from("forum"),
            site_marker: String::from("bankier"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Override fields from `FORUMSCAN_*` environment variables
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse("FORUMSCAN_MAX_CONCURRENT_REQUESTS") {
            self.crawler.max_concurrent_requests = v;
        }
        if let Some(v) = env_parse("FORUMSCAN_MAX_ATTEMPTS") {
            self.crawler.max_attempts = v;
        }
        if let Some(v) = env_parse("FORUMSCAN_REQUEST_TIMEOUT") {
            self.crawler.request_timeout_secs = v;
        }
        if let Some(v) = env_parse("FORUMSCAN_BACKOFF_UNIT_MS") {
            self.crawler.backoff_unit_ms = v;
        }
        if let Some(v) = env_parse("FORUMSCAN_PAGE_DELAY_MS") {
            self.crawler.page_delay_ms = v;
        }
        if let Ok(v) = std::env::var("FORUMSCAN_REFERER") {
            self.crawler.referer = v;
        }
        if let Some(v) = env_parse("FORUMSCAN_MAX_PAGES") {
            self.thread.max_pages = v;
        }
        if let Some(v) = env_parse("FORUMSCAN_MAX_POSTS") {
            self.thread.max_posts = v;
        }
        if let Some(v) = env_parse("FORUMSCAN_MAX_TEXT_CHARS") {
            self.thread.max_text_chars = v;
        }
        if let Some(v) = env_parse("FORUMSCAN_RECENCY_DAYS") {
            self.filter.recency_days = v;
        }
        if let Ok(v) = std::env::var("FORUMSCAN_UNDATED_THREADS") {
            match v.trim().to_lowercase().as_str() {
                "retain" => self.filter.undated_threads = UndatedPolicy::Retain,
                "exclude" => self.filter.undated_threads = UndatedPolicy::Exclude,
                other => tracing::warn!(value = %other, "Ignoring unknown undated-thread policy"),
            }
        }
        if let Ok(v) = std::env::var("FORUMSCAN_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Ok(v) = std::env::var("FORUMSCAN_LOG_FORMAT") {
            self.logging.format = v;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.max_concurrent_requests == 0 {
            anyhow::bail!("max_concurrent_requests must be greater than 0");
        }

        if self.crawler.max_attempts == 0 {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        if self.crawler.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.thread.max_pages == 0 {
            anyhow::bail!("max_pages must be greater than 0");
        }

        if self.thread.max_posts == 0 {
            anyhow::bail!("max_posts must be greater than 0");
        }

        if self.thread.max_text_chars == 0 {
            anyhow::bail!("max_text_chars must be greater than 0");
        }

        if !(0..=MAX_RECENCY_DAYS).contains(&self.filter.recency_days) {
            anyhow::bail!("recency_days must be between 0 and {MAX_RECENCY_DAYS}");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }
}
