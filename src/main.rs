//! Regional news digest — binary entrypoint.
//! Gathers headlines (configured feeds, or a JSON dump of raw records), runs the
//! dedup/score/select pipeline and writes the digest JSON for the summarizer.
//!
//! Env:
//!   DIGEST_CONFIG_PATH   config TOML (default config/digest.toml, else built-in seed)
//!   DIGEST_INPUT_PATH    read `[RawRecord]` JSON from this file instead of fetching
//!   DIGEST_OUTPUT_PATH   write the digest here instead of stdout
//!   RUST_LOG             tracing filter (default `regional_news_digest=info,warn`)

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use regional_news_digest::ingest::{collect_records, providers_from_config};
use regional_news_digest::{DigestConfig, Pipeline, RawRecord};

const ENV_INPUT_PATH: &str = "DIGEST_INPUT_PATH";
const ENV_OUTPUT_PATH: &str = "DIGEST_OUTPUT_PATH";

/// Compact logs on stderr; stdout is reserved for the digest.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("regional_news_digest=info,digest=info,ingest=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading raw records from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing raw records json {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = DigestConfig::load_default().context("loading digest config")?;

    let records = match std::env::var(ENV_INPUT_PATH) {
        Ok(p) => read_records(&PathBuf::from(p))?,
        Err(_) => {
            let providers = providers_from_config(&cfg)?;
            collect_records(&providers).await
        }
    };

    let pipeline = Pipeline::new(cfg);
    let digest = pipeline.run(records);
    let json = digest.to_json_pretty()?;

    match std::env::var(ENV_OUTPUT_PATH) {
        Ok(p) => {
            std::fs::write(&p, json).with_context(|| format!("writing digest to {p}"))?;
            tracing::info!(target: "digest", path = %p, edition = %digest.edition_date(), "digest written");
        }
        Err(_) => println!("{json}"),
    }
    Ok(())
}
