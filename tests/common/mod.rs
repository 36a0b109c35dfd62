//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::Mutex;

use forumscan::config::Config;
use forumscan::crawler::PageFetcher;
use forumscan::utils::error::FetchError;

/// Config with millisecond backoff and no politeness delay
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.crawler.backoff_unit_ms = 2;
    config.crawler.page_delay_ms = 0;
    config.crawler.request_timeout_secs = 2;
    config
}

/// Fixed "now" used by listing fixtures
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// One listing row: (title, href, date text)
pub type Row<'a> = (&'a str, &'a str, &'a str);

/// Company listing page with a `threadsList` table
pub fn listing_page(rows: &[Row<'_>]) -> String {
    let body: String = rows
        .iter()
        .map(|(title, href, date)| {
            format!(
                "<tr><td class=\"threadTitle\"><a href=\"{href}\">{title}</a></td>\
                 <td class=\"author\">anonim</td>\
                 <td class=\"createDate\">{date}</td></tr>"
            )
        })
        .collect();

    format!(
        "<html><body><table class=\"threadsList\">\
         <thead><tr><th>Temat</th><th>Autor</th><th>Data</th></tr></thead>\
         <tbody>{body}</tbody></table></body></html>"
    )
}

/// Thread page with posts and optional pagination links
pub fn thread_page(posts: &[&str], page_links: &[&str]) -> String {
    let body: String = posts
        .iter()
        .map(|p| format!("<div class=\"post\"><div class=\"post-content\">{p}</div><a>Cytuj</a></div>"))
        .collect();
    let nav: String = page_links
        .iter()
        .map(|href| format!("<li><a href=\"{href}\">strona</a></li>"))
        .collect();

    format!("<html><body>{body}<ul class=\"pagination\">{nav}</ul></body></html>")
}

/// In-memory fetcher: unknown URLs answer 404
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, Result<String, u16>>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(html.into()));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(status)) => Err(FetchError::Status(*status)),
            None => Err(FetchError::Status(404)),
        }
    }
}
