//! Run statistics shared by the fetcher, thread crawler and pipeline

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Crawl statistics (thread-safe)
#[derive(Debug, Default)]
pub struct CrawlStats {
    /// Pages returned with status 200
    pub pages_fetched: AtomicU64,

    /// URLs that ended in a fetch error
    pub fetch_failures: AtomicU64,

    /// Individual HTTP attempts, retries included
    pub attempts: AtomicU64,

    /// Threads crawled (degraded ones included)
    pub threads_crawled: AtomicU64,

    /// Threads reduced to their title
    pub threads_degraded: AtomicU64,

    /// Companies with a result row
    pub companies_processed: AtomicU64,

    /// Companies dropped from the report
    pub companies_failed: AtomicU64,
}

impl CrawlStats {
    /// Create new stats counter
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a finished thread crawl
    pub fn record_thread(&self, degraded: bool) {
        self.threads_crawled.fetch_add(1, Ordering::Relaxed);
        if degraded {
            self.threads_degraded.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_company(&self) {
        self.companies_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_company_failure(&self) {
        self.companies_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of current stats
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            attempts: self.attempts.load(Ordering::Relaxed),
            threads_crawled: self.threads_crawled.load(Ordering::Relaxed),
            threads_degraded: self.threads_degraded.load(Ordering::Relaxed),
            companies_processed: self.companies_processed.load(Ordering::Relaxed),
            companies_failed: self.companies_failed.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of crawl statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub pages_fetched: u64,
    pub fetch_failures: u64,
    pub attempts: u64,
    pub threads_crawled: u64,
    pub threads_degraded: u64,
    pub companies_processed: u64,
    pub companies_failed: u64,
}

impl StatsSnapshot {
    /// Share of threads crawled with real content (0.0 - 1.0)
    pub fn thread_success_rate(&self) -> f64 {
        if self.threads_crawled == 0 {
            return 1.0;
        }
        (self.threads_crawled - self.threads_degraded) as f64 / self.threads_crawled as f64
    }
}
