//! Text and URL helpers shared by the parsers and the crawler

pub mod error;
pub mod retry;

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use crate::utils::error::ParseError;

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// Truncate text to at most `max_chars` characters
///
/// Counts Unicode scalar values, so multi-byte Polish letters are never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Resolve a possibly relative link against the page it was found on
pub fn resolve_url(base: &str, href: &str) -> Result<String, ParseError> {
    let base = Url::parse(base).map_err(|e| ParseError::InvalidUrl(format!("{base}: {e}")))?;

    base.join(href.trim())
        .map(|u| u.to_string())
        .map_err(|e| ParseError::InvalidUrl(format!("{href}: {e}")))
}
