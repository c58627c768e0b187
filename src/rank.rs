// src/rank.rs
//! Per-region ranking and top-K link selection.

use crate::model::{Region, ScoredItem};

pub const DEFAULT_LINKS_PER_REGION: usize = 5;
pub const DEFAULT_MIN_SCORED_FLOOR: usize = 3;

/// Selection knobs. `min_scored_floor` is capped by `k` at use time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub k: usize,
    pub min_scored_floor: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            k: DEFAULT_LINKS_PER_REGION,
            min_scored_floor: DEFAULT_MIN_SCORED_FLOOR,
        }
    }
}

/// Items of `region`, score descending. Ties keep input order.
pub fn rank_region<'a>(items: &'a [ScoredItem], region: &Region) -> Vec<&'a ScoredItem> {
    let mut ranked: Vec<&ScoredItem> = items
        .iter()
        .filter(|s| s.item().region() == region)
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.score().cmp(&a.score()));
    ranked
}

/// Top `policy.k` linkable items of `region`.
///
/// Prefers items with a positive score when at least `min(floor, k)` of them
/// exist; otherwise falls back to the whole region so a quiet day still yields
/// links. Items without a URL are never selected.
pub fn rank_and_select(
    items: &[ScoredItem],
    region: &Region,
    policy: SelectionPolicy,
) -> Vec<ScoredItem> {
    let linkable: Vec<&ScoredItem> = rank_region(items, region)
        .into_iter()
        .filter(|s| s.item().has_url())
        .collect();

    let floor = policy.min_scored_floor.min(policy.k);
    let scored = linkable.iter().filter(|s| s.score() > 0).count();

    let pool: Vec<&ScoredItem> = if scored >= floor {
        linkable.into_iter().filter(|s| s.score() > 0).collect()
    } else {
        linkable
    };

    pool.into_iter().take(policy.k).cloned().collect()
}

/// `rank_and_select` for each region, in the given order.
pub fn rank_all(
    items: &[ScoredItem],
    regions: &[Region],
    policy: SelectionPolicy,
) -> Vec<(Region, Vec<ScoredItem>)> {
    regions
        .iter()
        .map(|r| (r.clone(), rank_and_select(items, r, policy)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewsItem;

    fn scored(region: &str, title: &str, url: &str, score: u32) -> ScoredItem {
        ScoredItem::new(
            NewsItem::new(Region::new(region), "Test", title, url, None),
            score,
        )
    }

    fn titles(v: &[ScoredItem]) -> Vec<&str> {
        v.iter().map(|s| s.item().title()).collect()
    }

    #[test]
    fn stable_on_equal_scores() {
        let items = vec![
            scored("es", "a", "https://x/a", 1),
            scored("es", "b", "https://x/b", 2),
            scored("es", "c", "https://x/c", 1),
        ];
        let r = rank_region(&items, &Region::new("es"));
        let t: Vec<&str> = r.iter().map(|s| s.item().title()).collect();
        assert_eq!(t, vec!["b", "a", "c"]);
    }

    #[test]
    fn prefers_scored_when_enough() {
        let items = vec![
            scored("es", "z0", "https://x/0", 0),
            scored("es", "s1", "https://x/1", 1),
            scored("es", "s2", "https://x/2", 3),
            scored("es", "s3", "https://x/3", 2),
        ];
        let out = rank_and_select(&items, &Region::new("es"), SelectionPolicy::default());
        assert_eq!(titles(&out), vec!["s2", "s3", "s1"]);
    }

    #[test]
    fn floor_is_capped_by_k() {
        let items = vec![
            scored("es", "z0", "https://x/0", 0),
            scored("es", "s1", "https://x/1", 1),
        ];
        let policy = SelectionPolicy {
            k: 1,
            min_scored_floor: 3,
        };
        let out = rank_and_select(&items, &Region::new("es"), policy);
        assert_eq!(titles(&out), vec!["s1"]);
    }

    #[test]
    fn urlless_items_are_skipped() {
        let items = vec![
            scored("gl", "no link", "", 5),
            scored("gl", "linked", "https://x/l", 0),
        ];
        let out = rank_and_select(&items, &Region::new("gl"), SelectionPolicy::default());
        assert_eq!(titles(&out), vec!["linked"]);
    }

    #[test]
    fn zero_k_selects_nothing() {
        let items = vec![scored("gl", "a", "https://x/a", 1)];
        let policy = SelectionPolicy {
            k: 0,
            min_scored_floor: 3,
        };
        assert!(rank_and_select(&items, &Region::new("gl"), policy).is_empty());
    }
}
