//! Weighted multi-category fundamental scoring
//!
//! Each category contributes `(positive_hits - negative_hits) * weight` and
//! the contributions are summed. All thread texts of a company are scored
//! together as one document.

use crate::error::{Error, Result};
use crate::models::{
    CategoryScore, CompanyLabel, CompanyResult, FundamentalCategory, ReportKind, ScoreBreakdown,
    ThreadText,
};
use crate::scoring::{count_hits, normalize_keywords, round2, Scorer};

/// Highlights kept per company
const MAX_HIGHLIGHTS: usize = 3;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// One scoring category with its keyword lists
#[derive(Debug, Clone)]
pub struct CategoryDefinition {
    pub category: FundamentalCategory,
    pub weight: f64,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl CategoryDefinition {
    pub fn new(
        category: FundamentalCategory,
        weight: f64,
        positive: &[&str],
        negative: &[&str],
    ) -> Self {
        Self {
            category,
            weight,
            positive: normalize_keywords(positive),
            negative: normalize_keywords(negative),
        }
    }
}

fn default_categories() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition::new(
            FundamentalCategory::Earnings,
            0.25,
            &[
                "wzrost przychodów", "wzrost zysku", "zysk netto", "rekordowy wynik",
                "wynik finansowy", "wynik powyżej", "wzrost EBITDA", "rentowność", "marża",
                "zyskowność", "lepszy wynik", "przewyższył", "pobiła rekord",
                "przychody wzrosły", "zysk wzrósł", "dodatni wynik", "zysk operacyjny",
            ],
            &[
                "spadek przychodów", "spadek zysków", "strata netto", "strata operacyjna",
                "gorszy wynik", "spadek marży", "niższa rentowność", "wynik poniżej", "odpis",
                "utrata wartości", "pogorszenie wyniku",
            ],
        ),
        CategoryDefinition::new(
            FundamentalCategory::Outlook,
            0.20,
            &[
                "prognoza wzrostu", "perspektywy rozwoju", "optymistyczna prognoza",
                "pozytywne prognozy", "guidance wzrost", "cel wzrost", "szacuje wzrost",
                "przewiduje wzrost", "spodziewa się wzrostu", "plan rozwoju", "strategia wzrostu",
                "ambitne cele", "pozytywne outlook",
            ],
            &[
                "obniżona prognoza", "gorsze perspektywy", "negatywne prognozy",
                "obniżony guidance", "niższy cel", "oczekuje spadku", "przewiduje spadek",
                "pesymistyczne prognozy", "gorsze outlook",
            ],
        ),
        CategoryDefinition::new(
            FundamentalCategory::Strategy,
            0.20,
            &[
                "nowa strategia", "realizacja strategii", "transformacja", "reorganizacja",
                "ekspansja", "rozwój", "innowacja", "digitalizacja", "automatyzacja", "pozyskał",
                "wprowadza", "launch", "premiera", "nowy produkt", "nowa usługa",
                "zmiany organizacyjne", "nowy model biznesowy",
            ],
            &[
                "porażka strategii", "problem z realizacją", "opóźnienie projektu",
                "nieudana ekspansja", "wycofał się", "zamknął", "likwidacja",
                "restrukturyzacja przymusowa",
            ],
        ),
        CategoryDefinition::new(
            FundamentalCategory::Contracts,
            0.15,
            &[
                "nowy kontrakt", "podpisał umowę", "wygrał przetarg", "zawarł umowę",
                "pozyskał zlecenie", "nowe zamówienie", "największy kontrakt", "umowa wieloletnia",
                "wartość kontraktu", "strategiczny kontrakt", "kontrakt eksportowy",
                "rozszerzenie współpracy", "przedłużenie umowy",
            ],
            &[
                "utrata kontraktu", "rozwiązanie umowy", "anulowanie kontraktu",
                "przegrał przetarg", "kontrakt zagrożony", "spór o kontrakt",
            ],
        ),
        CategoryDefinition::new(
            FundamentalCategory::MarketPosition,
            0.10,
            &[
                "lider rynku", "wzrost udziału", "pozycja rynkowa", "dominujący",
                "przewaga konkurencyjna", "zwiększył udział", "silna pozycja", "konkurencyjność",
                "rozpoznawalność marki", "brand value",
            ],
            &[
                "utrata udziału", "spadek pozycji", "konkurencja silniejsza",
                "osłabienie pozycji", "presja konkurencyjna",
            ],
        ),
        // Risk mentions only ever count against a company
        CategoryDefinition::new(
            FundamentalCategory::Risks,
            0.10,
            &[],
            &[
                "problem", "kryzys", "zagrożenie", "ryzyko", "śledztwo", "postępowanie", "pozew",
                "kara", "sankcja", "skandal", "afera", "konflikt", "spór", "ostrzeżenie",
                "rating obniżony", "podwyższone ryzyko", "zagrożony", "problemy finansowe",
                "problemy operacyjne", "zawieszenie", "blokada",
            ],
        ),
    ]
}

/// Result of analysing one document
#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalAnalysis {
    /// Unrounded sum of weighted category scores
    pub total_score: f64,
    pub categories: Vec<CategoryScore>,
    /// First keyword hits, `+CATEGORY: keyword` or `-CATEGORY: keyword`
    pub highlights: Vec<String>,
}

/// Weighted keyword scorer over fixed categories
#[derive(Debug, Clone)]
pub struct FundamentalScorer {
    categories: Vec<CategoryDefinition>,
}

impl FundamentalScorer {
    /// Scorer with the six built-in categories
    pub fn new() -> Self {
        Self {
            categories: default_categories(),
        }
    }

    /// Scorer with custom categories
    ///
    /// # Errors
    ///
    /// Returns a config error if the list is empty, a weight is negative or
    /// the weights do not sum to 1.0.
    pub fn with_categories(categories: Vec<CategoryDefinition>) -> Result<Self> {
        if categories.is_empty() {
            return Err(Error::config("at least one scoring category is required"));
        }
        if let Some(bad) = categories.iter().find(|c| !(c.weight >= 0.0)) {
            return Err(Error::config(format!(
                "category {} has invalid weight {}",
                bad.category, bad.weight
            )));
        }

        let sum: f64 = categories.iter().map(|c| c.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::config(format!(
                "category weights must sum to 1.0, got {sum}"
            )));
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Score one document across all categories
    pub fn analyze(&self, text: &str) -> FundamentalAnalysis {
        if text.trim().is_empty() {
            return FundamentalAnalysis {
                total_score: 0.0,
                categories: Vec::new(),
                highlights: Vec::new(),
            };
        }

        let lower = text.to_lowercase();
        let mut highlights = Vec::new();
        let mut categories = Vec::with_capacity(self.categories.len());

        for def in &self.categories {
            collect_highlights(&mut highlights, &lower, '+', def.category, &def.positive);
            collect_highlights(&mut highlights, &lower, '-', def.category, &def.negative);

            let positive_hits = count_hits(&lower, &def.positive);
            let negative_hits = count_hits(&lower, &def.negative);
            let net_score = positive_hits as i32 - negative_hits as i32;

            categories.push(CategoryScore {
                category: def.category,
                positive_hits,
                negative_hits,
                net_score,
                weighted_score: f64::from(net_score) * def.weight,
            });
        }

        FundamentalAnalysis {
            total_score: categories.iter().map(|c| c.weighted_score).sum(),
            categories,
            highlights,
        }
    }

    /// Map a total score onto the rating bands
    pub fn rating(score: f64) -> CompanyLabel {
        if score >= 3.0 {
            CompanyLabel::VeryBullish
        } else if score >= 1.5 {
            CompanyLabel::Bullish
        } else if score >= 0.5 {
            CompanyLabel::SlightlyBullish
        } else if score > -0.5 {
            CompanyLabel::Neutral
        } else if score > -1.5 {
            CompanyLabel::SlightlyBearish
        } else if score > -3.0 {
            CompanyLabel::Bearish
        } else {
            CompanyLabel::VeryBearish
        }
    }
}

fn collect_highlights(
    highlights: &mut Vec<String>,
    text_lower: &str,
    sign: char,
    category: FundamentalCategory,
    keywords: &[String],
) {
    for kw in keywords {
        if highlights.len() >= MAX_HIGHLIGHTS {
            return;
        }
        if text_lower.contains(kw.as_str()) {
            highlights.push(format!("{sign}{category}: {kw}"));
        }
    }
}

impl Default for FundamentalScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for FundamentalScorer {
    fn kind(&self) -> ReportKind {
        ReportKind::Fundamental
    }

    fn score_company(&self, company: &str, threads: &[ThreadText]) -> CompanyResult {
        let combined = threads
            .iter()
            .map(ThreadText::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let analysis = self.analyze(&combined);

        CompanyResult {
            company: company.to_string(),
            thread_count: threads.len(),
            label: Self::rating(analysis.total_score),
            breakdown: ScoreBreakdown::Fundamental {
                total_score: round2(analysis.total_score),
                categories: analysis.categories,
            },
            highlights: analysis.highlights,
        }
    }
}
