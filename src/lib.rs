// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod canonical;
pub mod config;
pub mod dedup;
pub mod digest;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod relevance;
pub mod similarity;

// ---- Re-exports for stable public API ----
pub use crate::canonical::canonicalize_url;
pub use crate::config::DigestConfig;
pub use crate::dedup::{dedupe, dedupe_with_stats, DedupStats};
pub use crate::digest::{CitationLink, Digest, DigestItem, RegionDigest};
pub use crate::ingest::types::RawRecord;
pub use crate::model::{NewsItem, Region, ScoredItem};
pub use crate::normalize::normalize_title;
pub use crate::pipeline::Pipeline;
pub use crate::rank::{rank_all, rank_and_select, SelectionPolicy};
pub use crate::relevance::KeywordScorer;
