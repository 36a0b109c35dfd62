//! forumscan - Stock forum crawler with keyword sentiment and fundamental scoring
//!
//! Crawls the discussion threads of listed companies on a stock forum,
//! extracts their post text and turns it into a per-company label.
//!
//! # Modules
//!
//! - [`config`] - TOML and `FORUMSCAN_*` environment settings
//! - [`companies`] - Markdown company directory loader
//! - [`crawler`] - Fetching with retry/backoff behind a shared concurrency gate
//! - [`parser`] - HTML parsing: posts, pagination, listing rows, dates
//! - [`scoring`] - Sentiment and fundamental keyword strategies
//! - [`pipeline`] - Per-company orchestration and the run-level report
//! - [`models`] - Companies, threads, labels and report rows
//! - [`utils`] - Text helpers, domain errors and retry timing
//!
//! # Example
//!
//! ```no_run
//! use forumscan::config::Config;
//! use forumscan::models::{Company, ReportKind};
//! use forumscan::pipeline::ForumScanner;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let scanner = ForumScanner::new(&config, ReportKind::Sentiment)?;
//!     let companies = vec![Company::new(
//!         "KGHM",
//!         "https://www.bankier.pl/forum/forum_o_kghm,6,28,1.html",
//!     )];
//!     let report = scanner.run(&companies).await;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod companies;
pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod scoring;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::companies::{load_companies, parse_companies};
    pub use crate::config::Config;
    pub use crate::crawler::{ConcurrencyGate, HttpFetcher, PageFetcher, ThreadCrawler};
    pub use crate::error::{Error, ErrorCategory, Result, ScanErrorTrait};
    pub use crate::models::{Company, CompanyLabel, CompanyResult, ReportKind, ThreadRef, ThreadText};
    pub use crate::pipeline::{CompanyProcessor, ForumScanner, Report};
    pub use crate::scoring::{FundamentalScorer, Scorer, SentimentScorer};
}

// Direct re-exports for convenience
pub use models::{Company, CompanyResult, ReportKind};
