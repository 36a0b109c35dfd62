//! HTML parsing and data extraction
//!
//! This module handles parsing forum listing and thread pages: post text
//! extraction, pagination discovery, listing rows and their dates. Parsing
//! is synchronous; `scraper::Html` never lives across an `.await`.

pub mod date;
pub mod listing;
pub mod pagination;
pub mod posts;
pub mod selectors;

pub use date::{parse_thread_date, try_parse_thread_date};
pub use listing::{parse_listing, ListingRow, RecencyFilter};
pub use pagination::{discover_pages, page_index, PageLink};
pub use posts::{PostExtractor, DEFAULT_MIN_POST_CHARS};
pub use selectors::PostSelectors;
