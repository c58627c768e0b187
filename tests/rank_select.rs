// tests/rank_select.rs
// Scores come from a small keyword list so each title's score is obvious:
// one point per "budget" / "debt" / "rates" it contains.

use regional_news_digest::{
    rank_all, rank_and_select, KeywordScorer, NewsItem, Region, ScoredItem, SelectionPolicy,
};

fn scorer() -> KeywordScorer {
    KeywordScorer::new(["budget", "debt", "rates"])
}

fn scored(rows: &[(&str, &str, &str)]) -> Vec<ScoredItem> {
    let items = rows
        .iter()
        .map(|(region, title, url)| NewsItem::new(Region::new(region), "Src", *title, *url, None))
        .collect();
    scorer().score_items(items)
}

fn titles(v: &[ScoredItem]) -> Vec<&str> {
    v.iter().map(|s| s.item().title()).collect()
}

#[test]
fn never_more_than_k() {
    let rows: Vec<(String, String)> = (0..12)
        .map(|i| (format!("budget story {i}"), format!("https://x/{i}")))
        .collect();
    let refs: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|(t, u)| ("es", t.as_str(), u.as_str()))
        .collect();
    let items = scored(&refs);
    for k in 0..8 {
        let policy = SelectionPolicy {
            k,
            ..SelectionPolicy::default()
        };
        let out = rank_and_select(&items, &Region::new("es"), policy);
        assert_eq!(out.len(), k);
    }
}

#[test]
fn two_scored_items_fall_back_to_full_region() {
    let items = scored(&[
        ("es", "weather", "https://x/1"),
        ("es", "budget vote", "https://x/2"),
        ("es", "football", "https://x/3"),
        ("es", "debt and rates", "https://x/4"),
        ("es", "cinema", "https://x/5"),
        ("es", "traffic", "https://x/6"),
    ]);
    let out = rank_and_select(&items, &Region::new("es"), SelectionPolicy::default());
    assert_eq!(
        titles(&out),
        vec!["debt and rates", "budget vote", "weather", "football", "cinema"]
    );
}

#[test]
fn enough_scored_items_exclude_zero_scores() {
    let items = scored(&[
        ("gl", "weather", "https://x/1"),
        ("gl", "budget", "https://x/2"),
        ("gl", "debt", "https://x/3"),
        ("gl", "rates", "https://x/4"),
    ]);
    let out = rank_and_select(&items, &Region::new("gl"), SelectionPolicy::default());
    assert_eq!(titles(&out), vec!["budget", "debt", "rates"]);
}

#[test]
fn empty_region_yields_empty() {
    let items = scored(&[("es", "budget", "https://x/1")]);
    assert!(rank_and_select(&items, &Region::new("eu"), SelectionPolicy::default()).is_empty());
    assert!(rank_and_select(&[], &Region::new("es"), SelectionPolicy::default()).is_empty());
}

#[test]
fn region_of_only_linkless_items_yields_empty() {
    let items = scored(&[("eu", "budget", ""), ("eu", "debt", "  ")]);
    assert!(rank_and_select(&items, &Region::new("eu"), SelectionPolicy::default()).is_empty());
}

#[test]
fn rank_all_follows_region_order() {
    let items = scored(&[
        ("gl", "rates", "https://x/1"),
        ("es", "budget", "https://x/2"),
    ]);
    let regions = vec![Region::new("es"), Region::new("eu"), Region::new("gl")];
    let out = rank_all(&items, &regions, SelectionPolicy::default());
    let shape: Vec<(&str, usize)> = out.iter().map(|(r, v)| (r.as_str(), v.len())).collect();
    assert_eq!(shape, vec![("es", 1), ("eu", 0), ("gl", 1)]);
}
