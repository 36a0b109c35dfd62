//! Binary keyword-count sentiment

use crate::models::{CompanyLabel, CompanyResult, ReportKind, ScoreBreakdown, ThreadSentiment, ThreadText};
use crate::scoring::{count_hits, normalize_keywords, round2, Scorer};

const POSITIVE_KEYWORDS: &[&str] = &[
    "wzrost", "zysk", "dobr", "super", "świetn", "pozytywn", "sukces", "rekord", "kupuj",
    "kupić", "kupuję", "hold", "trzyma", "rosnąć", "rośnie", "górę", "cel", "plus", "zyskown",
    "mocn", "bullish", "bull", "rally", "boom", "brać", "długi", "pięknie", "fajnie", "solidn",
    "zbiera", "wystrzał", "wzór", "rekomenduj", "okazja", "tanio", "warte", "silny",
    "dynamiczny", "perspektywy", "wzorem", "rakieta", "odpał", "pompa", "to the moon",
    "dokupuję", "long",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "spadek", "strat", "kiepsk", "słab", "negatywn", "kryzys", "problem", "sprzeda",
    "sprzedaj", "sprzedam", "sell", "ucieka", "dół", "minus", "short", "tracę", "gubi",
    "bearish", "bear", "crash", "dno", "taniec", "płacz", "najgorszy", "dziadostwo", "gniot",
    "współczuj", "zawiedziony", "dramat", "zmarnowany", "zawalisz", "blada", "panika",
    "zagrożenie", "ryzyko", "strach", "bankructwo", "utopiony", "sypać", "sypie", "krach",
    "wała",
];

/// Majority ratio above which a company is strongly bullish or bearish
const STRONG_RATIO: f64 = 1.5;

/// Verdict for one thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentScore {
    pub label: ThreadSentiment,
    /// Positive hits minus negative hits
    pub score: i32,
    pub positive_hits: u32,
    pub negative_hits: u32,
}

/// Scores each thread positive, negative or neutral and rolls the labels up
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self::with_keywords(POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS)
    }

    /// Scorer with custom keyword sets (lowercased on construction)
    pub fn with_keywords(positive: &[&str], negative: &[&str]) -> Self {
        Self {
            positive: normalize_keywords(positive),
            negative: normalize_keywords(negative),
        }
    }

    pub fn score_text(&self, text: &str) -> SentimentScore {
        let lower = text.to_lowercase();
        let positive_hits = count_hits(&lower, &self.positive);
        let negative_hits = count_hits(&lower, &self.negative);

        let label = match positive_hits.cmp(&negative_hits) {
            std::cmp::Ordering::Greater => ThreadSentiment::Positive,
            std::cmp::Ordering::Less => ThreadSentiment::Negative,
            std::cmp::Ordering::Equal => ThreadSentiment::Neutral,
        };

        SentimentScore {
            label,
            score: positive_hits as i32 - negative_hits as i32,
            positive_hits,
            negative_hits,
        }
    }

    /// Company label from per-thread label counts
    pub fn rollup(positive: usize, negative: usize) -> CompanyLabel {
        let (pos, neg) = (positive as f64, negative as f64);
        if pos > neg * STRONG_RATIO {
            CompanyLabel::Bullish
        } else if neg > pos * STRONG_RATIO {
            CompanyLabel::Bearish
        } else if positive > negative {
            CompanyLabel::SlightlyBullish
        } else if negative > positive {
            CompanyLabel::SlightlyBearish
        } else {
            CompanyLabel::Neutral
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for SentimentScorer {
    fn kind(&self) -> ReportKind {
        ReportKind::Sentiment
    }

    fn score_company(&self, company: &str, threads: &[ThreadText]) -> CompanyResult {
        let (mut positive, mut negative, mut neutral) = (0usize, 0usize, 0usize);
        for thread in threads {
            match self.score_text(thread.as_str()).label {
                ThreadSentiment::Positive => positive += 1,
                ThreadSentiment::Negative => negative += 1,
                ThreadSentiment::Neutral => neutral += 1,
            }
        }

        let total = threads.len();
        let pct = |count: usize| {
            if total == 0 {
                0.0
            } else {
                round2(count as f64 / total as f64 * 100.0)
            }
        };

        CompanyResult {
            company: company.to_string(),
            thread_count: total,
            label: Self::rollup(positive, negative),
            breakdown: ScoreBreakdown::Sentiment {
                positive,
                negative,
                neutral,
                positive_pct: pct(positive),
                negative_pct: pct(negative),
            },
            highlights: Vec::new(),
        }
    }
}
