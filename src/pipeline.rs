//! Crawl-and-score pipeline
//!
//! ```text
//! companies ──▶ CompanyProcessor (one future per company)
//!                 │  listing page ──▶ recency filter
//!                 │  ThreadCrawler (one future per thread)
//!                 ▼
//!               Scorer ──▶ CompanyResult ──▶ sorted Report
//! ```
//!
//! Both fan-out levels are polled cooperatively with `join_all` on the
//! calling task. Every network fetch goes through the one
//! [`ConcurrencyGate`] owned by the fetcher, which bounds in-flight
//! requests for the whole run.

use chrono::{Local, NaiveDateTime};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, FilterConfig};
use crate::crawler::{
    ConcurrencyGate, CrawlStats, HttpFetcher, ListingCrawler, PageFetcher, StatsSnapshot,
    ThreadCrawler,
};
use crate::error::{Error, Result, ScanErrorTrait};
use crate::models::{Company, CompanyResult, ReportKind};
use crate::parser::listing::RecencyFilter;
use crate::scoring::{scorer_for, Scorer};
use crate::utils::error::CrawlerError;

/// Processes one company: listing, thread fan-out, scoring
pub struct CompanyProcessor {
    listing: ListingCrawler,
    threads: ThreadCrawler,
    scorer: Box<dyn Scorer>,
    filter: FilterConfig,
    stats: Arc<CrawlStats>,
}

impl CompanyProcessor {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        config: &Config,
        scorer: Box<dyn Scorer>,
        stats: Arc<CrawlStats>,
    ) -> Self {
        let page_delay = Duration::from_millis(config.crawler.page_delay_ms);
        Self {
            listing: ListingCrawler::new(Arc::clone(&fetcher)),
            threads: ThreadCrawler::new(fetcher, &config.thread, page_delay, Arc::clone(&stats)),
            scorer,
            filter: config.filter.clone(),
            stats,
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.scorer.kind()
    }

    /// Recency filter for a run started at `now`
    pub fn recency_filter(&self, now: NaiveDateTime) -> RecencyFilter {
        RecencyFilter::new(now, self.filter.recency_days, self.filter.undated_threads)
    }

    /// Score one company
    ///
    /// A company without recent threads gets a zero-activity row. Degraded
    /// threads are scored on their title and never fail the company.
    ///
    /// # Errors
    ///
    /// Fails only when the listing page cannot be fetched or parsed.
    pub async fn process(
        &self,
        company: &Company,
        now: NaiveDateTime,
    ) -> std::result::Result<CompanyResult, CrawlerError> {
        let filter = self.recency_filter(now);
        let threads = self.listing.recent_threads(company, &filter).await?;

        if threads.is_empty() {
            tracing::info!(company = %company.name, "No recent threads");
            return Ok(self.scorer.empty_result(&company.name));
        }

        let texts = join_all(threads.iter().map(|thread| self.threads.crawl(thread))).await;
        let degraded = texts.iter().filter(|t| t.degraded).count();

        let result = self.scorer.score_company(&company.name, &texts);
        tracing::info!(
            company = %company.name,
            threads = texts.len(),
            degraded,
            label = %result.label,
            "Company scored"
        );

        Ok(result)
    }
}

/// Label counts across a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub companies: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    /// Companies dropped because their listing failed
    pub failed: usize,
}

impl ReportSummary {
    fn from_rows(rows: &[CompanyResult], failed: usize) -> Self {
        let bullish = rows.iter().filter(|r| r.label.is_bullish()).count();
        let bearish = rows.iter().filter(|r| r.label.is_bearish()).count();
        Self {
            companies: rows.len(),
            bullish,
            bearish,
            neutral: rows.len() - bullish - bearish,
            failed,
        }
    }
}

/// Final, ordered output of a run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub generated_at: NaiveDateTime,
    /// Oldest thread date considered
    pub cutoff: NaiveDateTime,
    pub rows: Vec<CompanyResult>,
    pub summary: ReportSummary,
    pub stats: StatsSnapshot,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Order rows for a report type
///
/// Sentiment rows go by company name, fundamental rows by total score
/// (highest first, ties by name).
pub fn sort_rows(kind: ReportKind, rows: &mut [CompanyResult]) {
    match kind {
        ReportKind::Sentiment => rows.sort_by(|a, b| a.company.cmp(&b.company)),
        ReportKind::Fundamental => rows.sort_by(|a, b| {
            b.sort_score()
                .total_cmp(&a.sort_score())
                .then_with(|| a.company.cmp(&b.company))
        }),
    }
}

/// Run-level driver over a list of companies
pub struct ForumScanner {
    processor: CompanyProcessor,
    gate: Option<ConcurrencyGate>,
    stats: Arc<CrawlStats>,
}

impl ForumScanner {
    /// Scanner with an HTTP fetcher built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: &Config, kind: ReportKind) -> Result<Self> {
        config.validate()?;

        let stats = CrawlStats::new();
        let gate = ConcurrencyGate::new(config.crawler.max_concurrent_requests);
        let fetcher = HttpFetcher::new(&config.crawler, gate.clone(), Arc::clone(&stats))?;

        let processor =
            CompanyProcessor::new(Arc::new(fetcher), config, scorer_for(kind), Arc::clone(&stats));

        Ok(Self {
            processor,
            gate: Some(gate),
            stats,
        })
    }

    /// Scanner over a caller-supplied fetcher and scorer
    pub fn with_fetcher(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        scorer: Box<dyn Scorer>,
    ) -> Self {
        let stats = CrawlStats::new();
        Self {
            processor: CompanyProcessor::new(fetcher, config, scorer, Arc::clone(&stats)),
            gate: None,
            stats,
        }
    }

    /// Gate shared by every fetch, when the scanner owns its fetcher
    pub fn gate(&self) -> Option<&ConcurrencyGate> {
        self.gate.as_ref()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Scan every company against the current local time
    pub async fn run(&self, companies: &[Company]) -> Report {
        self.run_at(companies, Local::now().naive_local()).await
    }

    /// Scan every company with an explicit "now"
    pub async fn run_at(&self, companies: &[Company], now: NaiveDateTime) -> Report {
        let kind = self.processor.kind();
        let cutoff = self.processor.recency_filter(now).cutoff;

        tracing::info!(
            companies = companies.len(),
            report = kind.as_str(),
            cutoff = %cutoff,
            "Starting forum scan"
        );

        let outcomes = join_all(
            companies
                .iter()
                .map(|company| self.processor.process(company, now)),
        )
        .await;

        let mut rows = Vec::with_capacity(outcomes.len());
        let mut failed = 0;
        for (company, outcome) in companies.iter().zip(outcomes) {
            match outcome {
                Ok(row) => {
                    self.stats.record_company();
                    rows.push(row);
                }
                Err(e) => {
                    failed += 1;
                    self.stats.record_company_failure();
                    let err = Error::from(e);
                    tracing::warn!(
                        company = %company.name,
                        category = %err.category(),
                        recoverable = err.is_recoverable(),
                        error = %err,
                        "Company skipped"
                    );
                }
            }
        }

        sort_rows(kind, &mut rows);

        let stats = self.stats.snapshot();
        tracing::info!(
            rows = rows.len(),
            failed,
            pages = stats.pages_fetched,
            attempts = stats.attempts,
            threads = stats.threads_crawled,
            degraded_threads = stats.threads_degraded,
            peak_in_flight = self.gate.as_ref().map(ConcurrencyGate::peak),
            "Forum scan finished"
        );

        Report {
            kind,
            generated_at: now,
            cutoff,
            summary: ReportSummary::from_rows(&rows, failed),
            rows,
            stats,
        }
    }
}
