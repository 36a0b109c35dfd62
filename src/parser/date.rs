//! Thread date parsing for forum listing pages
//!
//! Listing rows show either a relative marker with a time of day
//! (`dziś 14:30`, `wczoraj 09:15`) or an absolute timestamp
//! (`2024-01-20 14:00`, legacy `20.01.2024 14:00`). All values are
//! interpreted in the forum's local time and resolved against an injected
//! `now` so the parser stays deterministic under test.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::error::ParseError;

lazy_static! {
    static ref TIME_OF_DAY: Regex =
        Regex::new(r"(\d{1,2}):(\d{2})").expect("Invalid time regex");
    static ref ISO_DATETIME: Regex =
        Regex::new(r"(\d{4})-(\d{2})-(\d{2})\s+(\d{1,2}):(\d{2})").expect("Invalid ISO regex");
    static ref DOTTED_DATETIME: Regex =
        Regex::new(r"(\d{2})\.(\d{2})\.(\d{4})\s+(\d{1,2}):(\d{2})")
            .expect("Invalid dotted regex");
}

const TODAY_MARKERS: &[&str] = &["dziś", "dzisiaj", "today"];
const YESTERDAY_MARKERS: &[&str] = &["wczoraj", "yesterday"];

/// Parse a listing date relative to `now`
///
/// Returns `None` for anything not recognised; the caller applies the
/// configured undated-thread policy.
pub fn parse_thread_date(raw: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    try_parse_thread_date(raw, now).ok()
}

/// Like [`parse_thread_date`], keeping the rejected text in the error
pub fn try_parse_thread_date(raw: &str, now: NaiveDateTime) -> Result<NaiveDateTime, ParseError> {
    resolve(raw, now).ok_or_else(|| ParseError::UnparsableDate(raw.trim().to_string()))
}

fn resolve(raw: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let lower = text.to_lowercase();

    if TODAY_MARKERS.iter().any(|m| lower.contains(m)) {
        return relative_to(now, &lower);
    }

    if YESTERDAY_MARKERS.iter().any(|m| lower.contains(m)) {
        return relative_to(now - Duration::days(1), &lower);
    }

    if let Some(caps) = ISO_DATETIME.captures(text) {
        return build(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
            caps[4].parse().ok()?,
            caps[5].parse().ok()?,
        );
    }

    if let Some(caps) = DOTTED_DATETIME.captures(text) {
        return build(
            caps[3].parse().ok()?,
            caps[2].parse().ok()?,
            caps[1].parse().ok()?,
            caps[4].parse().ok()?,
            caps[5].parse().ok()?,
        );
    }

    None
}

/// `day` at the time of day found in `text`, or `day` itself when no time is given
///
/// A time that is present but out of range (`25:99`) makes the whole value
/// unparsable.
fn relative_to(day: NaiveDateTime, text: &str) -> Option<NaiveDateTime> {
    let Some(caps) = TIME_OF_DAY.captures(text) else {
        return Some(day);
    };
    let hour = caps[1].parse().ok()?;
    let minute = caps[2].parse().ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(day.date().and_time(time))
}

fn build(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}
