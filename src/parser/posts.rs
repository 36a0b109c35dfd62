//! Post text extraction from thread pages

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use crate::parser::selectors::PostSelectors;
use crate::utils::normalize_whitespace;

/// Posts shorter than this many characters are UI noise ("Odpowiedz", "Cytuj", ...)
pub const DEFAULT_MIN_POST_CHARS: usize = 15;

/// Extracts visible post texts from a forum thread page
///
/// Every selector is applied in order and every matching node contributes
/// its whitespace-normalized text. The result is deduplicated on the
/// normalized form, keeping first-seen order. Dedup scope is a single call.
pub struct PostExtractor {
    selectors: &'static [Selector],
    min_chars: usize,
}

impl PostExtractor {
    pub fn new(min_chars: usize) -> Self {
        Self {
            selectors: PostSelectors::new().content,
            min_chars,
        }
    }

    /// Extract post texts from raw page HTML
    pub fn extract(&self, html: &str) -> Vec<String> {
        if html.trim().is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(html);
        self.extract_from_document(&document)
    }

    /// Extract post texts from an already parsed document
    pub fn extract_from_document(&self, document: &Html) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut posts = Vec::new();

        for selector in self.selectors {
            for element in document.select(selector) {
                let text = element_text(element);
                if text.chars().count() < self.min_chars {
                    continue;
                }
                if seen.insert(text.clone()) {
                    posts.push(text);
                }
            }
        }

        posts
    }
}

impl Default for PostExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_POST_CHARS)
    }
}

/// Visible text of an element, text nodes joined with single spaces
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let joined = element.text().collect::<Vec<_>>().join(" ");
    normalize_whitespace(&joined)
}
