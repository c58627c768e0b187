// src/relevance.rs
//! Keyword relevance scoring for headlines.
//!
//! The score is the number of configured keywords found in the lowercased title.
//! It is a ranking signal only; a zero score never removes an item by itself.

use tracing::debug;

use crate::model::{NewsItem, ScoredItem};

/// Politics / economy terms in Spanish, English and French.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    // es
    "gobierno",
    "elecciones",
    "congreso",
    "banco central",
    "bce",
    "tipos de interés",
    "inflación",
    "deuda",
    "presupuesto",
    "aranceles",
    "bolsa",
    "mercados",
    "ibex",
    // en
    "government",
    "election",
    "parliament",
    "central bank",
    "interest rate",
    "inflation",
    "debt",
    "budget",
    "tariff",
    "markets",
    "stocks",
    // fr
    "gouvernement",
    "élection",
    "banque centrale",
    "taux d'intérêt",
    "dette",
    "droits de douane",
    "marchés",
    "bourse",
];

/// Scores titles against a fixed keyword list.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    keywords: Vec<String>,
}

impl KeywordScorer {
    /// Keywords are trimmed and lowercased; empty entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Count of keyword entries occurring as substrings of the lowercased title.
    pub fn score(&self, title: &str) -> u32 {
        let lowered = title.to_lowercase();
        let hits = self
            .keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .count();
        let score = u32::try_from(hits).unwrap_or(u32::MAX);
        if score > 0 {
            debug!(target: "relevance", score, "keyword hits");
        }
        score
    }

    /// Attach a score to each deduplicated item. This is the only place
    /// `ScoredItem`s come from.
    pub fn score_items(&self, items: Vec<NewsItem>) -> Vec<ScoredItem> {
        items
            .into_iter()
            .map(|it| {
                let score = self.score(it.title());
                ScoredItem::new(it, score)
            })
            .collect()
    }

    /// Matched keywords, in list order. Useful for diagnostics.
    pub fn matched(&self, title: &str) -> Vec<&str> {
        let lowered = title.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .map(|k| k.as_str())
            .collect()
    }
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}
