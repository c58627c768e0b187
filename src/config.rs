// src/config.rs
//! Digest configuration: regions and their feeds, keyword list, dedup/selection knobs.
//!
//! Lookup order for `DigestConfig::load_default`:
//! 1) $DIGEST_CONFIG_PATH (must exist)
//! 2) config/digest.toml
//! 3) built-in seed (`DigestConfig::default_seed`)
//!
//! Env overrides applied after loading:
//! - DIGEST_SIMILARITY_THRESHOLD (float, clamped to 0.0..=1.0)
//! - DIGEST_LINKS_PER_REGION (usize)

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dedup::DEFAULT_SIMILARITY_THRESHOLD;
use crate::model::Region;
use crate::rank::{SelectionPolicy, DEFAULT_LINKS_PER_REGION, DEFAULT_MIN_SCORED_FLOOR};
use crate::relevance::{KeywordScorer, DEFAULT_KEYWORDS};

pub const DEFAULT_DIGEST_CONFIG_PATH: &str = "config/digest.toml";

pub const ENV_DIGEST_CONFIG_PATH: &str = "DIGEST_CONFIG_PATH";
pub const ENV_SIMILARITY_THRESHOLD: &str = "DIGEST_SIMILARITY_THRESHOLD";
pub const ENV_LINKS_PER_REGION: &str = "DIGEST_LINKS_PER_REGION";

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    #[serde(default)]
    pub digest: DigestSection,
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    pub regions: Vec<RegionCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DigestSection {
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_links_per_region")]
    pub links_per_region: usize,
    #[serde(default = "default_min_scored_floor")]
    pub min_scored_floor: usize,
    /// Entries taken from the top of each feed.
    #[serde(default = "default_entries_per_feed")]
    pub entries_per_feed: usize,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionCfg {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub feeds: Vec<FeedCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedCfg {
    pub source: String,
    pub url: String,
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}
fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}
fn default_links_per_region() -> usize {
    DEFAULT_LINKS_PER_REGION
}
fn default_min_scored_floor() -> usize {
    DEFAULT_MIN_SCORED_FLOOR
}
fn default_entries_per_feed() -> usize {
    3
}
fn default_http_timeout_secs() -> u64 {
    20
}

impl Default for DigestSection {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            links_per_region: default_links_per_region(),
            min_scored_floor: default_min_scored_floor(),
            entries_per_feed: default_entries_per_feed(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_threshold_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn parse_links_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
}

impl DigestConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: DigestConfig = toml::from_str(s).context("parsing digest config toml")?;
        cfg.validated()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading digest config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("loading digest config {}", path.display()))
    }

    /// Resolve the config file (env, then default path, then built-in seed)
    /// and apply env overrides.
    pub fn load_default() -> Result<Self> {
        let cfg = if let Ok(p) = std::env::var(ENV_DIGEST_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_DIGEST_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_DIGEST_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from(&default_p)?
            } else {
                info!(target: "digest", "no config file found, using built-in seed");
                Self::default_seed()
            }
        };
        Ok(cfg.with_env_overrides())
    }

    /// Apply DIGEST_SIMILARITY_THRESHOLD / DIGEST_LINKS_PER_REGION when set and parseable.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(t) = parse_threshold_env(std::env::var(ENV_SIMILARITY_THRESHOLD).ok()) {
            self.digest.similarity_threshold = t;
        }
        if let Some(k) = parse_links_env(std::env::var(ENV_LINKS_PER_REGION).ok()) {
            self.digest.links_per_region = k;
        }
        self
    }

    /// The three regions and feeds the digest page was built around,
    /// with the trilingual keyword list.
    pub fn default_seed() -> Self {
        let feed = |source: &str, url: &str| FeedCfg {
            source: source.to_string(),
            url: url.to_string(),
        };
        let regions = vec![
            RegionCfg {
                id: "es".into(),
                label: "España".into(),
                feeds: vec![
                    feed("Expansión", "https://e00-expansion.uecdn.es/rss/portada.xml"),
                    feed("El Mundo", "https://e00-elmundo.uecdn.es/elmundo/rss/espana.xml"),
                ],
            },
            RegionCfg {
                id: "eu".into(),
                label: "Europa".into(),
                feeds: vec![
                    feed("Financial Times", "https://www.ft.com/?format=rss"),
                    feed("Les Echos", "https://www.lesechos.fr/rss/rss_france.xml"),
                ],
            },
            RegionCfg {
                id: "gl".into(),
                label: "Global".into(),
                feeds: vec![feed(
                    "The New York Times",
                    "https://rss.nytimes.com/services/xml/rss/nyt/World.xml",
                )],
            },
        ];
        Self {
            digest: DigestSection::default(),
            keywords: clean_keywords(default_keywords()),
            regions,
        }
    }

    fn validated(mut self) -> Result<Self> {
        if self.regions.is_empty() {
            return Err(anyhow!("digest config must define at least one region"));
        }
        let mut ids = HashSet::new();
        for r in &mut self.regions {
            let id = Region::new(&r.id);
            if id.as_str().is_empty() {
                return Err(anyhow!("region id must not be empty"));
            }
            if !ids.insert(id.clone()) {
                return Err(anyhow!("duplicate region id `{}`", id));
            }
            r.id = id.as_str().to_string();
            if r.label.trim().is_empty() {
                r.label = r.id.to_uppercase();
            }
        }
        if !self.digest.similarity_threshold.is_finite() {
            return Err(anyhow!("similarity_threshold must be a finite number"));
        }
        self.digest.similarity_threshold = self.digest.similarity_threshold.clamp(0.0, 1.0);
        self.keywords = clean_keywords(std::mem::take(&mut self.keywords));
        Ok(self)
    }

    /// Configured regions, in file order.
    pub fn regions(&self) -> Vec<Region> {
        self.regions.iter().map(|r| Region::new(&r.id)).collect()
    }

    pub fn has_region(&self, region: &Region) -> bool {
        self.regions.iter().any(|r| r.id == region.as_str())
    }

    pub fn label_for(&self, region: &Region) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| r.id == region.as_str())
            .map(|r| r.label.as_str())
    }

    pub fn policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            k: self.digest.links_per_region,
            min_scored_floor: self.digest.min_scored_floor,
        }
    }

    pub fn scorer(&self) -> KeywordScorer {
        KeywordScorer::new(&self.keywords)
    }
}

/// Trim, lowercase, drop empties and duplicates; keeps first-seen order.
fn clean_keywords(items: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && seen.insert(t.clone()) {
            out.push(t);
        }
    }
    out
}
