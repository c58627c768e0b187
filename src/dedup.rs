// src/dedup.rs
//! Two-pass deduplication.
//!
//! 1) Identity: one item per non-empty canonical URL, first one wins.
//!    Items without a link are kept here; only pass 2 can drop them.
//! 2) Fuzzy: within a region, an item whose normalized title is more similar
//!    than `similarity_threshold` to an already accepted title is dropped.
//!
//! Input order is kept in the output. Pass 2 compares each item against every
//! accepted title of its region, which is fine for the few dozen items a run sees.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::model::{NewsItem, Region};
use crate::normalize::normalize_title;
use crate::similarity::gestalt_ratio;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.92;

/// Counts of items removed by each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub url_duplicates: usize,
    pub title_duplicates: usize,
}

pub fn dedupe(items: Vec<NewsItem>, similarity_threshold: f64) -> Vec<NewsItem> {
    dedupe_with_stats(items, similarity_threshold).0
}

pub fn dedupe_with_stats(
    items: Vec<NewsItem>,
    similarity_threshold: f64,
) -> (Vec<NewsItem>, DedupStats) {
    let (unique, url_duplicates) = dedupe_by_url(items);
    let (kept, title_duplicates) = dedupe_by_title(unique, similarity_threshold);
    (
        kept,
        DedupStats {
            url_duplicates,
            title_duplicates,
        },
    )
}

fn dedupe_by_url(items: Vec<NewsItem>) -> (Vec<NewsItem>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut keep = Vec::with_capacity(items.len());
    let mut dropped = 0usize;

    for it in items {
        let key = it.canonical_url();
        if !key.is_empty() && !seen.insert(key.to_string()) {
            debug!(target: "dedup", url = key, source = it.source(), "same canonical url");
            dropped += 1;
            continue;
        }
        keep.push(it);
    }
    (keep, dropped)
}

fn dedupe_by_title(items: Vec<NewsItem>, similarity_threshold: f64) -> (Vec<NewsItem>, usize) {
    let mut accepted: HashMap<Region, Vec<String>> = HashMap::new();
    let mut keep = Vec::with_capacity(items.len());
    let mut dropped = 0usize;

    for it in items {
        let norm = normalize_title(it.title());
        let titles = accepted.entry(it.region().clone()).or_default();
        let near = titles
            .iter()
            .map(|t| gestalt_ratio(&norm, t))
            .find(|&sim| sim > similarity_threshold);
        if let Some(sim) = near {
            debug!(
                target: "dedup",
                region = %it.region(),
                source = it.source(),
                sim,
                "near-duplicate title"
            );
            dropped += 1;
            continue;
        }
        titles.push(norm);
        keep.push(it);
    }
    (keep, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(region: &str, title: &str, url: &str) -> NewsItem {
        NewsItem::new(Region::new(region), "Test", title, url, None)
    }

    #[test]
    fn first_url_wins() {
        let items = vec![
            item("es", "Primero", "https://a.example/x?ref=1"),
            item("es", "Segundo", "https://a.example/x/"),
        ];
        let (kept, stats) = dedupe_with_stats(items, DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title(), "Primero");
        assert_eq!(stats.url_duplicates, 1);
        assert_eq!(stats.title_duplicates, 0);
    }

    #[test]
    fn missing_links_survive_url_pass() {
        let items = vec![
            item("es", "Sin enlace uno", ""),
            item("es", "Otra historia distinta", ""),
        ];
        let kept = dedupe(items, DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn punctuation_only_difference_is_a_duplicate() {
        let items = vec![
            item("eu", "ECB holds rates, signals patience", "https://ft.example/1"),
            item("eu", "ECB holds rates; signals patience!", "https://ft.example/2"),
        ];
        let (kept, stats) = dedupe_with_stats(items, DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(kept.len(), 1);
        assert_eq!(stats.title_duplicates, 1);
    }

    #[test]
    fn threshold_is_exclusive() {
        // ratio("abcd", "abce") = 6 / 8 = 0.75
        let items = vec![
            item("gl", "abcd", "https://n.example/1"),
            item("gl", "abce", "https://n.example/2"),
        ];
        assert_eq!(dedupe(items.clone(), 0.75).len(), 2);
        assert_eq!(dedupe(items, 0.74).len(), 1);
    }
}
