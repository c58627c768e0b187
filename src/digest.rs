// src/digest.rs
//! Output handed to the summarizer: ranked items and citation links per region.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Region, ScoredItem};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DigestItem {
    pub title: String,
    pub source: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    pub score: u32,
}

/// Link rendered as a citation next to a region's summary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CitationLink {
    pub title: String,
    pub source: String,
    pub url: String,
}

impl From<&ScoredItem> for DigestItem {
    fn from(s: &ScoredItem) -> Self {
        let it = s.item();
        Self {
            title: it.title().to_string(),
            source: it.source().to_string(),
            url: it.url().to_string(),
            published: it.published().map(str::to_string),
            score: s.score(),
        }
    }
}

impl From<&ScoredItem> for CitationLink {
    fn from(s: &ScoredItem) -> Self {
        let it = s.item();
        Self {
            title: it.title().to_string(),
            source: it.source().to_string(),
            url: it.url().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionDigest {
    pub region: Region,
    pub label: String,
    /// Every deduplicated item of the region, best score first.
    pub items: Vec<DigestItem>,
    /// Bounded top-K selection.
    pub links: Vec<CitationLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub generated_at: DateTime<Utc>,
    pub regions: Vec<RegionDigest>,
}

impl Digest {
    pub fn region(&self, region: &Region) -> Option<&RegionDigest> {
        self.regions.iter().find(|r| &r.region == region)
    }

    /// One `[REGION] title` line per item, regions in config order.
    pub fn headline_block(&self) -> String {
        let mut out = String::new();
        for rd in &self.regions {
            let tag = rd.region.as_str().to_uppercase();
            for it in &rd.items {
                out.push_str(&format!("[{}] {}\n", tag, it.title));
            }
        }
        out
    }

    /// Page date stamp, `dd/mm/YYYY`.
    pub fn edition_date(&self) -> String {
        self.generated_at.format("%d/%m/%Y").to_string()
    }

    pub fn total_links(&self) -> usize {
        self.regions.iter().map(|r| r.links.len()).sum()
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
