//! CSS selectors for forum listing and thread pages
//!
//! The forum's markup has changed several times, so post containers and
//! listing tables are matched with ordered fallback lists.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Post containers, in the order they were used by the site
    pub static ref POST_CONTENT: Vec<Selector> = vec![
        parse_selector!("div.post-content"),
        parse_selector!("div.postContent"),
        parse_selector!("div.post__content"),
        parse_selector!("div.message"),
        parse_selector!("div.messageContent"),
        parse_selector!("div.post-body"),
        parse_selector!("div.postBody"),
    ];

    pub static ref PAGINATION_LINKS: Vec<Selector> = vec![
        parse_selector!("nav.pagination a[href]"),
        parse_selector!("ul.pagination a[href]"),
        parse_selector!("div.pagination a[href]"),
        parse_selector!("a[rel='next'][href]"),
        parse_selector!("a[rel='last'][href]"),
    ];

    pub static ref THREAD_TABLE_ROWS: Vec<Selector> = vec![
        parse_selector!("table.threadsList tr"),
        parse_selector!("table#threadsList tr"),
    ];

    pub static ref THREAD_TITLE_CELL: Selector = parse_selector!("td.threadTitle");
    pub static ref THREAD_TITLE_LINK: Selector = parse_selector!("td.threadTitle a");
    pub static ref THREAD_DATE_CELL: Selector = parse_selector!("td.createDate");
}

/// Selector set used by the post extractor
pub struct PostSelectors {
    pub content: &'static [Selector],
}

impl PostSelectors {
    pub fn new() -> Self {
        Self {
            content: &POST_CONTENT,
        }
    }
}

impl Default for PostSelectors {
    fn default() -> Self {
        Self::new()
    }
}
