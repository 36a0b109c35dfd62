//! Error scenario tests
//!
//! Degraded threads, broken listings and undated rows must never crash a
//! run; they either degrade the data or drop a single company.

use std::sync::Arc;

use forumscan::config::UndatedPolicy;
use forumscan::crawler::{CrawlStats, PageFetcher};
use forumscan::models::{Company, CompanyLabel, ReportKind, ScoreBreakdown};
use forumscan::pipeline::{CompanyProcessor, ForumScanner};
use forumscan::scoring::{scorer_for, SentimentScorer};
use forumscan::utils::error::{CrawlerError, ParseError};

use crate::common::{fast_config, fixed_now, listing_page, thread_page, StubFetcher};

const LISTING: &str = "https://forum.test/forum/forum_o_omega,1.html";

fn company() -> Company {
    Company::new("Omega", LISTING)
}

#[tokio::test]
async fn test_failed_thread_is_scored_on_title() {
    let fetcher = StubFetcher::new()
        .page(
            LISTING,
            listing_page(&[("Okazja na rekordach", "/forum/temat_omega,1.html", "dziś 10:00")]),
        )
        .status("https://forum.test/forum/temat_omega,1.html", 500);

    let scanner = ForumScanner::with_fetcher(
        &fast_config(),
        Arc::new(fetcher),
        Box::new(SentimentScorer::new()),
    );
    let report = scanner.run_at(&[company()], fixed_now()).await;

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].thread_count, 1);
    assert_eq!(report.rows[0].label, CompanyLabel::Bullish);
    assert_eq!(report.stats.threads_degraded, 1);
    assert_eq!(report.summary.failed, 0);
}

#[tokio::test]
async fn test_listing_without_table_drops_company() {
    let fetcher = Arc::new(StubFetcher::new().page(LISTING, "<p>Forum w przebudowie</p>"));
    let config = fast_config();
    let processor = CompanyProcessor::new(
        fetcher,
        &config,
        scorer_for(ReportKind::Sentiment),
        CrawlStats::new(),
    );

    let err = processor.process(&company(), fixed_now()).await.unwrap_err();
    assert!(matches!(err, CrawlerError::Parse(ParseError::ThreadTableNotFound)));
}

#[tokio::test]
async fn test_all_companies_failing_yields_empty_report() {
    let scanner = ForumScanner::with_fetcher(
        &fast_config(),
        Arc::new(StubFetcher::new()),
        scorer_for(ReportKind::Fundamental),
    );

    let companies = vec![
        Company::new("A", "https://forum.test/forum/a,1.html"),
        Company::new("B", "https://forum.test/forum/b,1.html"),
    ];
    let report = scanner.run_at(&companies, fixed_now()).await;

    assert!(report.is_empty());
    assert_eq!(report.summary.failed, 2);
    assert_eq!(scanner.stats().companies_failed, 2);
}

#[tokio::test]
async fn test_empty_company_list() {
    let scanner = ForumScanner::with_fetcher(
        &fast_config(),
        Arc::new(StubFetcher::new()),
        scorer_for(ReportKind::Sentiment),
    );

    let report = scanner.run_at(&[], fixed_now()).await;
    assert!(report.is_empty());
    assert_eq!(report.summary.failed, 0);
}

fn undated_fetcher() -> Arc<StubFetcher> {
    Arc::new(
        StubFetcher::new()
            .page(
                LISTING,
                listing_page(&[("Bez daty", "/forum/temat_omega,7.html", "przypięty")]),
            )
            .page(
                "https://forum.test/forum/temat_omega,7.html",
                thread_page(&["Kupuję, to świetna okazja"], &[]),
            ),
    )
}

#[tokio::test]
async fn test_undated_threads_excluded_by_default() {
    let fetcher = undated_fetcher();
    let scanner = ForumScanner::with_fetcher(
        &fast_config(),
        Arc::clone(&fetcher) as Arc<dyn PageFetcher>,
        scorer_for(ReportKind::Sentiment),
    );

    let report = scanner.run_at(&[company()], fixed_now()).await;
    assert_eq!(report.rows[0].thread_count, 0);
    assert_eq!(report.rows[0].label, CompanyLabel::Neutral);
    assert_eq!(fetcher.calls(), vec![LISTING.to_string()]);
}

#[tokio::test]
async fn test_undated_threads_retained_when_configured() {
    let mut config = fast_config();
    config.filter.undated_threads = UndatedPolicy::Retain;

    let scanner =
        ForumScanner::with_fetcher(&config, undated_fetcher(), scorer_for(ReportKind::Sentiment));

    let report = scanner.run_at(&[company()], fixed_now()).await;
    let row = &report.rows[0];
    assert_eq!(row.thread_count, 1);
    assert_eq!(row.label, CompanyLabel::Bullish);
    match row.breakdown {
        ScoreBreakdown::Sentiment { positive_pct, .. } => assert_eq!(positive_pct, 100.0),
        ref other => panic!("unexpected breakdown: {other:?}"),
    }
}
