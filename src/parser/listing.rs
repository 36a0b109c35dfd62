//! Company listing page parsing
//!
//! A company's forum page lists its threads in a table with one row per
//! thread: a title cell with a link and a creation-date cell.

use chrono::NaiveDateTime;
use scraper::{ElementRef, Html};

use crate::config::UndatedPolicy;
use crate::models::ThreadRef;
use crate::parser::date::try_parse_thread_date;
use crate::parser::posts::element_text;
use crate::parser::selectors::{
    THREAD_DATE_CELL, THREAD_TABLE_ROWS, THREAD_TITLE_CELL, THREAD_TITLE_LINK,
};
use crate::utils::error::ParseError;
use crate::utils::resolve_url;

/// A raw listing row before the recency filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub title: String,
    pub url: String,
    pub date_text: String,
}

/// Parse every thread row of a listing page
///
/// Rows missing the title or date cell are skipped. Links are resolved
/// against `page_url`. A page without any thread table is an error so the
/// caller can tell "no recent threads" from "unexpected markup".
pub fn parse_listing(html: &str, page_url: &str) -> Result<Vec<ListingRow>, ParseError> {
    let document = Html::parse_document(html);

    let mut table_found = false;
    let mut rows = Vec::new();

    for selector in THREAD_TABLE_ROWS.iter() {
        let matched: Vec<ElementRef<'_>> = document.select(selector).collect();
        if matched.is_empty() {
            continue;
        }
        table_found = true;

        for tr in matched {
            match parse_row(tr, page_url) {
                Ok(Some(row)) => rows.push(row),
                Ok(None) => {}
                Err(e) => tracing::debug!(error = %e, "Skipping listing row"),
            }
        }
        break;
    }

    if !table_found {
        return Err(ParseError::ThreadTableNotFound);
    }

    Ok(rows)
}

fn parse_row(tr: ElementRef<'_>, page_url: &str) -> Result<Option<ListingRow>, ParseError> {
    let Some(title_cell) = tr.select(&THREAD_TITLE_CELL).next() else {
        return Ok(None);
    };
    let Some(date_cell) = tr.select(&THREAD_DATE_CELL).next() else {
        return Ok(None);
    };

    // A row without a thread link is an ad or a separator, not a thread
    let Some(link) = tr.select(&THREAD_TITLE_LINK).next() else {
        return Ok(None);
    };
    let Some(href) = link.value().attr("href").filter(|h| !h.trim().is_empty()) else {
        return Ok(None);
    };

    let mut title = element_text(link);
    if title.is_empty() {
        title = element_text(title_cell);
    }
    let url = resolve_url(page_url, href)?;

    Ok(Some(ListingRow {
        title,
        url,
        date_text: element_text(date_cell),
    }))
}

/// Recency filter applied to listing rows
#[derive(Debug, Clone, Copy)]
pub struct RecencyFilter {
    pub cutoff: NaiveDateTime,
    pub now: NaiveDateTime,
    pub undated: UndatedPolicy,
}

impl RecencyFilter {
    /// A window too large to represent reaches back to the earliest date
    pub fn new(now: NaiveDateTime, recency_days: i64, undated: UndatedPolicy) -> Self {
        let cutoff = chrono::Duration::try_days(recency_days)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(NaiveDateTime::MIN);

        Self {
            cutoff,
            now,
            undated,
        }
    }

    /// Keep rows posted on or after the cutoff, applying the undated policy
    pub fn apply(&self, rows: Vec<ListingRow>) -> Vec<ThreadRef> {
        rows.into_iter()
            .filter_map(|row| {
                let posted_at = match try_parse_thread_date(&row.date_text, self.now) {
                    Ok(at) => Some(at),
                    Err(e) => {
                        tracing::debug!(title = %row.title, error = %e, policy = ?self.undated, "Undated thread");
                        None
                    }
                };
                let keep = match posted_at {
                    Some(at) => at >= self.cutoff,
                    None => self.undated == UndatedPolicy::Retain,
                };
                keep.then(|| ThreadRef {
                    title: row.title,
                    url: row.url,
                    posted_at,
                })
            })
            .collect()
    }
}
