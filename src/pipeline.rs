// src/pipeline.rs
//! Admission -> dedup -> scoring -> per-region selection.
//!
//! Everything after admission is a pure in-memory transformation; a run keeps
//! no state for the next one.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use metrics::counter;
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::config::DigestConfig;
use crate::dedup::{dedupe_with_stats, DedupStats};
use crate::digest::{CitationLink, Digest, DigestItem, RegionDigest};
use crate::ingest::types::RawRecord;
use crate::model::{NewsItem, Region, ScoredItem};
use crate::rank::{rank_and_select, rank_region};
use crate::relevance::KeywordScorer;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        metrics::describe_counter!("digest_records_total", "Raw records offered to the pipeline.");
        metrics::describe_counter!(
            "digest_rejected_total",
            "Records rejected at admission (unknown region)."
        );
        metrics::describe_counter!(
            "digest_url_duplicates_total",
            "Items removed by the canonical URL pass."
        );
        metrics::describe_counter!(
            "digest_title_duplicates_total",
            "Items removed by the fuzzy title pass."
        );
        metrics::describe_counter!(
            "digest_links_selected_total",
            "Citation links selected across regions."
        );
    });
}

/// Scored, deduplicated items of one run plus what was removed on the way.
#[derive(Debug, Clone)]
pub struct Processed {
    pub items: Vec<ScoredItem>,
    pub dedup: DedupStats,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: DigestConfig,
    scorer: KeywordScorer,
}

impl Pipeline {
    pub fn new(config: DigestConfig) -> Self {
        let scorer = config.scorer();
        Self { config, scorer }
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    pub fn scorer(&self) -> &KeywordScorer {
        &self.scorer
    }

    /// Turn a raw record into a `NewsItem`. Regions outside the configured set
    /// are rejected rather than given a bucket of their own.
    pub fn admit(&self, raw: RawRecord) -> Result<NewsItem> {
        let region = Region::new(&raw.region);
        if !self.config.has_region(&region) {
            return Err(anyhow!(
                "record from `{}` has unknown region `{}`",
                raw.source,
                raw.region
            ));
        }
        let published = Some(raw.published).filter(|p| !p.trim().is_empty());
        Ok(NewsItem::new(region, raw.source, raw.title, raw.url, published))
    }

    /// Admit every record, skipping (and logging) rejected ones.
    /// Returns the admitted items and the rejection count.
    pub fn admit_all(&self, records: Vec<RawRecord>) -> (Vec<NewsItem>, usize) {
        let mut rejected = 0usize;
        let mut items = Vec::with_capacity(records.len());
        for raw in records {
            match self.admit(raw) {
                Ok(it) => items.push(it),
                Err(e) => {
                    warn!(target: "digest", error = %e, "record rejected");
                    rejected += 1;
                }
            }
        }
        (items, rejected)
    }

    /// Dedup, then score. Scores are only ever computed on surviving items.
    pub fn process(&self, items: Vec<NewsItem>) -> Processed {
        let (kept, dedup) = dedupe_with_stats(items, self.config.digest.similarity_threshold);
        Processed {
            items: self.scorer.score_items(kept),
            dedup,
        }
    }

    pub fn run(&self, records: Vec<RawRecord>) -> Digest {
        self.run_at(records, Utc::now())
    }

    /// Full run with an explicit timestamp for the digest.
    pub fn run_at(&self, records: Vec<RawRecord>, generated_at: DateTime<Utc>) -> Digest {
        ensure_metrics_described();
        let offered = records.len();

        let (admitted, rejected) = self.admit_all(records);
        let processed = self.process(admitted);

        let policy = self.config.policy();
        let regions: Vec<RegionDigest> = self
            .config
            .regions()
            .into_iter()
            .map(|region| {
                let items: Vec<DigestItem> = rank_region(&processed.items, &region)
                    .into_iter()
                    .map(DigestItem::from)
                    .collect();
                let links: Vec<CitationLink> =
                    rank_and_select(&processed.items, &region, policy)
                        .iter()
                        .map(CitationLink::from)
                        .collect();
                let label = self
                    .config
                    .label_for(&region)
                    .unwrap_or(region.as_str())
                    .to_string();
                RegionDigest {
                    region,
                    label,
                    items,
                    links,
                }
            })
            .collect();

        let digest = Digest {
            generated_at,
            regions,
        };

        counter!("digest_records_total").increment(offered as u64);
        counter!("digest_rejected_total").increment(rejected as u64);
        counter!("digest_url_duplicates_total").increment(processed.dedup.url_duplicates as u64);
        counter!("digest_title_duplicates_total")
            .increment(processed.dedup.title_duplicates as u64);
        counter!("digest_links_selected_total").increment(digest.total_links() as u64);

        info!(
            target: "digest",
            offered,
            rejected,
            kept = processed.items.len(),
            url_duplicates = processed.dedup.url_duplicates,
            title_duplicates = processed.dedup.title_duplicates,
            links = digest.total_links(),
            "pipeline run"
        );

        digest
    }
}
