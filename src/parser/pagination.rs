//! Pagination discovery for multi-page forum threads
//!
//! Thread pages are addressed as `...,<n>.html`. Links are gathered from
//! the known pagination containers, resolved against the thread URL and
//! ordered by page index.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;
use std::collections::HashSet;

use crate::parser::selectors::PAGINATION_LINKS;
use crate::utils::error::ParseError;
use crate::utils::resolve_url;

lazy_static! {
    static ref PAGE_INDEX: Regex = Regex::new(r",(\d+)\.html").expect("Invalid page index regex");
}

/// One additional page of a thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub index: u32,
    pub url: String,
}

/// Page index embedded in a thread page URL
pub fn page_index(url: &str) -> Option<u32> {
    PAGE_INDEX
        .captures_iter(url)
        .last()
        .and_then(|caps| caps[1].parse().ok())
}

/// Discover up to `max_pages - 1` further pages of the thread at `current_url`
///
/// Links without a parsable index, links pointing at the current page and
/// repeated indexes are dropped; the rest are sorted ascending.
pub fn discover_pages(
    html: &str,
    current_url: &str,
    max_pages: usize,
) -> Result<Vec<PageLink>, ParseError> {
    if max_pages <= 1 {
        return Ok(Vec::new());
    }

    let document = Html::parse_document(html);
    let current_index = page_index(current_url);

    let mut seen = HashSet::new();
    let mut pages = Vec::new();

    for selector in PAGINATION_LINKS.iter() {
        for anchor in document.select(selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if href.trim().is_empty() || href.trim_start().starts_with('#') {
                continue;
            }

            let url = resolve_url(current_url, href)?;
            if url == current_url {
                continue;
            }

            let Some(index) = page_index(&url) else {
                continue;
            };
            if Some(index) == current_index {
                continue;
            }

            if seen.insert(index) {
                pages.push(PageLink { index, url });
            }
        }
    }

    pages.sort_by_key(|p| p.index);
    pages.truncate(max_pages - 1);

    Ok(pages)
}
