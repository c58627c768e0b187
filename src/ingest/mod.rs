// src/ingest/mod.rs
//! Fetch side: providers that turn feeds into `RawRecord`s for the pipeline.
//! Retry/backoff is left to the HTTP client; a failing provider is skipped.

pub mod providers;
pub mod types;

use crate::config::DigestConfig;
use crate::ingest::providers::rss::RssProvider;
use crate::ingest::types::{RawRecord, SourceProvider};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use std::time::Duration;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_events_total", "Total entries parsed from providers.");
        describe_counter!(
            "ingest_provider_errors_total",
            "Provider fetch/parse errors."
        );
        describe_histogram!("ingest_parse_ms", "Provider parse time in milliseconds.");
    });
}

/// Clean a feed headline for display: decode entities, strip tags, fold quotes,
/// collapse whitespace. This is the title the pipeline keeps as "received".
pub fn clean_headline(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ to ASCII quotes (« » are kept, they are common in es/fr titles)
    out = out
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// Fetch from every provider in turn and concatenate the records.
/// Provider errors are logged and counted; they never abort the run.
pub async fn collect_records(providers: &[Box<dyn SourceProvider>]) -> Vec<RawRecord> {
    ensure_metrics_described();

    let mut raw = Vec::new();
    for p in providers {
        match p.fetch_latest().await {
            Ok(mut v) => {
                tracing::debug!(target: "ingest", provider = p.name(), entries = v.len(), "provider ok");
                raw.append(&mut v);
            }
            Err(e) => {
                tracing::warn!(target: "ingest", error = ?e, provider = p.name(), "provider error");
                counter!("ingest_provider_errors_total").increment(1);
            }
        }
    }
    tracing::info!(target: "ingest", records = raw.len(), providers = providers.len(), "ingest done");
    raw
}

/// One HTTP RSS provider per configured feed, sharing a single client.
pub fn providers_from_config(
    cfg: &DigestConfig,
) -> anyhow::Result<Vec<Box<dyn SourceProvider>>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.digest.http_timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let mut out: Vec<Box<dyn SourceProvider>> = Vec::new();
    for region in &cfg.regions {
        for feed in &region.feeds {
            out.push(Box::new(
                RssProvider::from_url(&region.id, &feed.source, &feed.url, client.clone())
                    .with_limit(cfg.digest.entries_per_feed),
            ));
        }
    }
    Ok(out)
}
