//! Keyword scoring strategies
//!
//! Both strategies are plain lowercase substring matches: no tokenizing or
//! stemming, so a multi-word keyword only counts on an exact occurrence.

pub mod fundamental;
pub mod sentiment;

pub use fundamental::{CategoryDefinition, FundamentalAnalysis, FundamentalScorer};
pub use sentiment::{SentimentScore, SentimentScorer};

use crate::models::{CompanyResult, ReportKind, ThreadText};

/// Turns a company's crawled threads into a report row
pub trait Scorer: Send + Sync {
    /// Report type this strategy produces
    fn kind(&self) -> ReportKind;

    /// Score every thread of a company
    fn score_company(&self, company: &str, threads: &[ThreadText]) -> CompanyResult;

    /// Row for a company without any recent thread
    fn empty_result(&self, company: &str) -> CompanyResult {
        self.score_company(company, &[])
    }
}

/// Build the scorer for a report type with its built-in keyword sets
pub fn scorer_for(kind: ReportKind) -> Box<dyn Scorer> {
    match kind {
        ReportKind::Sentiment => Box::new(SentimentScorer::new()),
        ReportKind::Fundamental => Box::new(FundamentalScorer::new()),
    }
}

/// Count keywords occurring anywhere in already lowercased text
pub(crate) fn count_hits<'a, I>(text_lower: &str, keywords: I) -> u32
where
    I: IntoIterator<Item = &'a String>,
{
    keywords
        .into_iter()
        .filter(|kw| text_lower.contains(kw.as_str()))
        .count() as u32
}

/// Lowercase and dedupe a keyword list, keeping first-seen order
pub(crate) fn normalize_keywords(keywords: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len());
    for kw in keywords {
        let kw = kw.trim().to_lowercase();
        if !kw.is_empty() && !out.contains(&kw) {
            out.push(kw);
        }
    }
    out
}

/// Round to two decimals for reporting
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
