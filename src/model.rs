// src/model.rs
//! Pipeline item types.
//!
//! `NewsItem` is an admitted record: region validated, canonical URL derived once.
//! `ScoredItem` wraps a `NewsItem` with its relevance score; only the scoring
//! stage builds one, so an item is never ranked unscored or scored twice.

use serde::Serialize;
use std::fmt;

use crate::canonical::canonicalize_url;

/// Coverage bucket tag. Ids are stored trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(id: &str) -> Self {
        Self(id.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    region: Region,
    source: String,
    title: String,
    url: String,
    canonical_url: String,
    published: Option<String>,
}

impl NewsItem {
    pub fn new(
        region: Region,
        source: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        published: Option<String>,
    ) -> Self {
        let url = url.into();
        let canonical_url = canonicalize_url(&url);
        Self {
            region,
            source: source.into(),
            title: title.into(),
            url,
            canonical_url,
            published: published.filter(|p| !p.trim().is_empty()),
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn canonical_url(&self) -> &str {
        &self.canonical_url
    }

    pub fn published(&self) -> Option<&str> {
        self.published.as_deref()
    }

    /// True when the item carries a usable link.
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredItem {
    item: NewsItem,
    score: u32,
}

impl ScoredItem {
    pub(crate) fn new(item: NewsItem, score: u32) -> Self {
        Self { item, score }
    }

    pub fn item(&self) -> &NewsItem {
        &self.item
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn into_item(self) -> NewsItem {
        self.item
    }
}
