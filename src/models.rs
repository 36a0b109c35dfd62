// Core data structures for the forum crawler

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A listed company and its discussion forum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub forum_url: String,
}

impl Company {
    pub fn new(name: impl Into<String>, forum_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            forum_url: forum_url.into(),
        }
    }
}

/// A thread reference read from a company's listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRef {
    pub title: String,
    pub url: String,
    /// Local time the thread was started; `None` when the listing date was unparsable
    pub posted_at: Option<NaiveDateTime>,
}

/// Accumulated text of one thread, ready for scoring
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThreadText {
    /// `title + " " + posts`, truncated to the configured character cap
    pub text: String,
    /// Pages actually fetched successfully (first page included)
    pub pages_fetched: usize,
    /// Posts accumulated across pages after per-thread dedup
    pub post_count: usize,
    /// True when the first page could not be fetched and only the title is present
    pub degraded: bool,
}

impl ThreadText {
    /// Title-only text used when the first page fetch fails
    pub fn title_only(title: &str, max_chars: usize) -> Self {
        Self {
            text: crate::utils::truncate_chars(title.trim(), max_chars),
            pages_fetched: 0,
            post_count: 0,
            degraded: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Per-thread verdict of the sentiment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreadSentiment {
    Positive,
    Negative,
    Neutral,
}

impl ThreadSentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

/// Company-level label shared by both scoring strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyLabel {
    VeryBullish,
    Bullish,
    SlightlyBullish,
    Neutral,
    SlightlyBearish,
    Bearish,
    VeryBearish,
}

impl CompanyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryBullish => "VERY BULLISH",
            Self::Bullish => "BULLISH",
            Self::SlightlyBullish => "SLIGHTLY BULLISH",
            Self::Neutral => "NEUTRAL",
            Self::SlightlyBearish => "SLIGHTLY BEARISH",
            Self::Bearish => "BEARISH",
            Self::VeryBearish => "VERY BEARISH",
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(
            self,
            Self::VeryBullish | Self::Bullish | Self::SlightlyBullish
        )
    }

    pub fn is_bearish(&self) -> bool {
        matches!(
            self,
            Self::VeryBearish | Self::Bearish | Self::SlightlyBearish
        )
    }
}

impl fmt::Display for CompanyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed categories of the fundamental strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundamentalCategory {
    Earnings,
    Outlook,
    Strategy,
    Contracts,
    MarketPosition,
    Risks,
}

impl FundamentalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Earnings => "EARNINGS",
            Self::Outlook => "OUTLOOK",
            Self::Strategy => "STRATEGY",
            Self::Contracts => "CONTRACTS",
            Self::MarketPosition => "MARKET_POSITION",
            Self::Risks => "RISKS",
        }
    }

    /// All categories in scoring order
    pub fn all() -> [Self; 6] {
        [
            Self::Earnings,
            Self::Outlook,
            Self::Strategy,
            Self::Contracts,
            Self::MarketPosition,
            Self::Risks,
        ]
    }
}

impl fmt::Display for FundamentalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword hits of one fundamental category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: FundamentalCategory,
    pub positive_hits: u32,
    pub negative_hits: u32,
    pub net_score: i32,
    pub weighted_score: f64,
}

/// Strategy-specific numbers behind a company label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreBreakdown {
    Sentiment {
        positive: usize,
        negative: usize,
        neutral: usize,
        positive_pct: f64,
        negative_pct: f64,
    },
    Fundamental {
        total_score: f64,
        categories: Vec<CategoryScore>,
    },
}

/// Final per-company row consumed by reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyResult {
    pub company: String,
    pub thread_count: usize,
    pub label: CompanyLabel,
    pub breakdown: ScoreBreakdown,
    /// Keyword hits worth showing (fundamental strategy only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

impl CompanyResult {
    /// Weighted total for fundamental rows, net label count for sentiment rows
    pub fn sort_score(&self) -> f64 {
        match &self.breakdown {
            ScoreBreakdown::Fundamental { total_score, .. } => *total_score,
            ScoreBreakdown::Sentiment {
                positive, negative, ..
            } => *positive as f64 - *negative as f64,
        }
    }
}

/// Which scoring strategy a report was built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Sentiment,
    Fundamental,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Fundamental => "fundamental",
        }
    }
}
