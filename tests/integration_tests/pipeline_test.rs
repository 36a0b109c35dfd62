//! Pipeline integration tests against a mock forum
//!
//! Tests the complete flow: listing page → recency filter → thread crawl
//! → scoring → sorted report, over real HTTP via wiremock.

use std::sync::Arc;
use std::time::Duration;

use forumscan::crawler::{ConcurrencyGate, CrawlStats, HttpFetcher, ThreadCrawler};
use forumscan::models::{Company, CompanyLabel, ReportKind, ScoreBreakdown, ThreadRef};
use forumscan::pipeline::ForumScanner;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{fast_config, fixed_now, listing_page, thread_page};

async fn mount(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Four companies: one positive, one negative, one without recent threads,
/// one whose listing is missing
async fn mock_forum(server: &MockServer, alfa_post: &str, beta_post: &str) -> Vec<Company> {
    mount(
        server,
        "/forum/forum_o_alfa,1.html",
        listing_page(&[
            ("Alfa rośnie", "/forum/temat_alfa,11.html", "2024-03-14 10:00"),
            ("Stary temat", "/forum/temat_alfa,12.html", "2023-01-01 10:00"),
        ]),
    )
    .await;
    mount(server, "/forum/temat_alfa,11.html", thread_page(&[alfa_post], &[])).await;

    Mock::given(method("GET"))
        .and(path("/forum/temat_alfa,12.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;

    mount(
        server,
        "/forum/forum_o_beta,1.html",
        listing_page(&[("Panika na sesji", "/forum/temat_beta,21.html", "wczoraj 09:00")]),
    )
    .await;
    mount(server, "/forum/temat_beta,21.html", thread_page(&[beta_post], &[])).await;

    mount(
        server,
        "/forum/forum_o_gamma,1.html",
        listing_page(&[("Archiwum", "/forum/temat_gamma,31.html", "2022-06-01 08:00")]),
    )
    .await;

    let base = server.uri();
    vec![
        Company::new("Gamma", format!("{base}/forum/forum_o_gamma,1.html")),
        Company::new("Beta", format!("{base}/forum/forum_o_beta,1.html")),
        Company::new("Delta", format!("{base}/forum/forum_o_delta,1.html")),
        Company::new("Alfa", format!("{base}/forum/forum_o_alfa,1.html")),
    ]
}

#[tokio::test]
async fn test_sentiment_report() {
    let server = MockServer::start().await;
    let companies = mock_forum(
        &server,
        "Kupuję więcej, to jest okazja życia",
        "Wszyscy sprzedają w panice, totalny krach",
    )
    .await;

    let scanner = ForumScanner::new(&fast_config(), ReportKind::Sentiment).unwrap();
    let report = scanner.run_at(&companies, fixed_now()).await;

    let names: Vec<&str> = report.rows.iter().map(|r| r.company.as_str()).collect();
    assert_eq!(names, vec!["Alfa", "Beta", "Gamma"]);

    assert_eq!(report.rows[0].label, CompanyLabel::Bullish);
    assert_eq!(report.rows[0].thread_count, 1);
    assert_eq!(report.rows[1].label, CompanyLabel::Bearish);

    let gamma = &report.rows[2];
    assert_eq!(gamma.thread_count, 0);
    assert_eq!(gamma.label, CompanyLabel::Neutral);

    assert_eq!(report.summary.companies, 3);
    assert_eq!(report.summary.bullish, 1);
    assert_eq!(report.summary.bearish, 1);
    assert_eq!(report.summary.neutral, 1);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.stats.threads_crawled, 2);
    assert_eq!(report.cutoff, fixed_now() - chrono::Duration::days(14));
}

#[tokio::test]
async fn test_fundamental_report_sorted_by_score() {
    let server = MockServer::start().await;
    let companies = mock_forum(
        &server,
        "Zarząd podpisał umowę i wygrał przetarg, zysk netto rośnie",
        "Strata netto i pozew od klienta",
    )
    .await;

    let scanner = ForumScanner::new(&fast_config(), ReportKind::Fundamental).unwrap();
    let report = scanner.run_at(&companies, fixed_now()).await;

    let names: Vec<&str> = report.rows.iter().map(|r| r.company.as_str()).collect();
    assert_eq!(names, vec!["Alfa", "Gamma", "Beta"]);

    let alfa = &report.rows[0];
    match &alfa.breakdown {
        // `zysk netto` is cancelled by `odpis` matching inside `podpisał`
        ScoreBreakdown::Fundamental { total_score, .. } => {
            assert!((total_score - 0.3).abs() < 1e-9, "total {total_score}");
        }
        other => panic!("unexpected breakdown: {other:?}"),
    }
    assert_eq!(alfa.label, CompanyLabel::Neutral);
    assert_eq!(
        alfa.highlights,
        vec![
            "+EARNINGS: zysk netto".to_string(),
            "-EARNINGS: odpis".to_string(),
            "+CONTRACTS: podpisał umowę".to_string(),
        ]
    );

    let beta = &report.rows[2];
    assert!((beta.sort_score() + 0.35).abs() < 1e-9);
    assert_eq!(beta.label, CompanyLabel::Neutral);
}

#[tokio::test]
async fn test_gate_bounds_both_fan_out_levels() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(25);
    let mut companies = Vec::new();

    for c in 0..4 {
        let rows: Vec<(String, String)> = (0..3)
            .map(|t| (format!("Wątek {t}"), format!("/forum/temat_c{c}t{t},{c}{t}.html")))
            .collect();
        let listing_rows: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|(title, href)| (title.as_str(), href.as_str(), "dziś 08:00"))
            .collect();

        Mock::given(method("GET"))
            .and(path(format!("/forum/forum_o_c{c},1.html")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_page(&listing_rows))
                    .set_delay(delay),
            )
            .mount(&server)
            .await;

        for (_, href) in &rows {
            Mock::given(method("GET"))
                .and(path(href.as_str()))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string(thread_page(&["Post o niczym konkretnym tutaj"], &[]))
                        .set_delay(delay),
                )
                .mount(&server)
                .await;
        }

        companies.push(Company::new(
            format!("Spółka {c}"),
            format!("{}/forum/forum_o_c{c},1.html", server.uri()),
        ));
    }

    let mut config = fast_config();
    config.crawler.max_concurrent_requests = 2;
    let scanner = ForumScanner::new(&config, ReportKind::Sentiment).unwrap();

    let report = scanner.run_at(&companies, fixed_now()).await;
    let gate = scanner.gate().unwrap();

    assert_eq!(report.rows.len(), 4);
    assert!(report.rows.iter().all(|r| r.thread_count == 3));
    assert!(gate.peak() <= 2, "peak {} exceeded capacity", gate.peak());
    assert!(gate.peak() >= 1);
    assert_eq!(gate.in_flight(), 0);
    assert_eq!(report.stats.pages_fetched, 16);
}

#[tokio::test]
async fn test_thread_pages_fetched_in_order_up_to_cap() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(
        &server,
        "/forum/temat_p,31.html",
        thread_page(
            &["Pierwsza strona dyskusji o spółce"],
            &[
                "/forum/temat_p,31,2.html",
                "/forum/temat_p,31,5.html",
                "/forum/temat_p,31,3.html",
            ],
        ),
    )
    .await;

    for (page, text) in [(2, "Druga strona dyskusji o spółce"), (3, "Trzecia strona dyskusji o spółce")] {
        Mock::given(method("GET"))
            .and(path(format!("/forum/temat_p,31,{page}.html")))
            .respond_with(ResponseTemplate::new(200).set_body_string(thread_page(&[text], &[])))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/forum/temat_p,31,5.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = fast_config();
    config.thread.max_pages = 3;
    let stats = CrawlStats::new();
    let fetcher =
        HttpFetcher::new(&config.crawler, ConcurrencyGate::new(2), Arc::clone(&stats)).unwrap();
    let crawler = ThreadCrawler::new(Arc::new(fetcher), &config.thread, Duration::ZERO, stats);

    let text = crawler
        .crawl(&ThreadRef {
            title: "Dyskusja".to_string(),
            url: format!("{base}/forum/temat_p,31.html"),
            posted_at: None,
        })
        .await;

    assert_eq!(text.pages_fetched, 3);
    assert_eq!(
        text.as_str(),
        "Dyskusja Pierwsza strona dyskusji o spółce Druga strona dyskusji o spółce Trzecia strona dyskusji o spółce"
    );

    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        requested,
        vec![
            "/forum/temat_p,31.html",
            "/forum/temat_p,31,2.html",
            "/forum/temat_p,31,3.html",
        ]
    );
}
