// src/ingest/types.rs
use anyhow::Result;

/// One syndication entry as handed over by a fetch collaborator.
/// All fields are plain strings; empty means "missing".
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct RawRecord {
    pub region: String, // e.g. "es", "eu", "gl"
    pub source: String, // publisher, e.g. "Expansión"
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published: String, // advisory, format varies by source
}

#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>>;
    fn name(&self) -> &str;
}
