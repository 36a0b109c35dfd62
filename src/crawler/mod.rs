//! Web crawling functionality with a shared concurrency gate
//!
//! This module implements fetching of forum listing and thread pages with
//! bounded concurrency, retry/backoff and multi-page thread accumulation.

pub mod fetcher;
pub mod gate;
pub mod headers;
pub mod listing;
pub mod stats;
pub mod thread;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use gate::{ConcurrencyGate, GatePermit};
pub use listing::ListingCrawler;
pub use stats::{CrawlStats, StatsSnapshot};
pub use thread::ThreadCrawler;
