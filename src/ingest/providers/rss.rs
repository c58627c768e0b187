// src/ingest/providers/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::ingest::clean_headline;
use crate::ingest::types::{RawRecord, SourceProvider};

/// Default number of entries taken from the top of a feed.
pub const DEFAULT_ENTRIES_PER_FEED: usize = 3;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

/// RSS 2.0 feed bound to one region and one publisher.
pub struct RssProvider {
    region: String,
    source: String,
    limit: usize,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl RssProvider {
    /// Parse a fixed XML document instead of fetching (tests, offline runs).
    pub fn from_fixture_str(region: &str, source: &str, xml: &str) -> Self {
        Self {
            region: region.to_string(),
            source: source.to_string(),
            limit: DEFAULT_ENTRIES_PER_FEED,
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    pub fn from_url(region: &str, source: &str, url: &str, client: reqwest::Client) -> Self {
        Self {
            region: region.to_string(),
            source: source.to_string(),
            limit: DEFAULT_ENTRIES_PER_FEED,
            mode: Mode::Http {
                url: url.to_string(),
                client,
            },
        }
    }

    /// Keep at most `limit` entries from the top of the feed.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn parse_items_from_str(&self, s: &str) -> Result<Vec<RawRecord>> {
        let t0 = std::time::Instant::now();
        let xml_clean = scrub_html_entities_for_xml(s);
        let rss: Rss = from_str(&xml_clean)
            .with_context(|| format!("parsing rss xml from {}", self.source))?;

        let out: Vec<RawRecord> = rss
            .channel
            .item
            .into_iter()
            .filter_map(|it| {
                let title = clean_headline(it.title.as_deref().unwrap_or_default());
                if title.is_empty() {
                    return None;
                }
                Some(RawRecord {
                    region: self.region.clone(),
                    source: self.source.clone(),
                    title,
                    url: it.link.unwrap_or_default().trim().to_string(),
                    published: it.pub_date.unwrap_or_default().trim().to_string(),
                })
            })
            .take(self.limit)
            .collect();

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("ingest_parse_ms").record(ms);
        counter!("ingest_events_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl SourceProvider for RssProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>> {
        match &self.mode {
            Mode::Fixture(s) => self.parse_items_from_str(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url.as_str())
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .with_context(|| format!("{} http get {}", self.source, url))?
                    .text()
                    .await
                    .with_context(|| format!("{} http .text()", self.source))?;
                self.parse_items_from_str(&body)
            }
        }
    }

    fn name(&self) -> &str {
        &self.source
    }
}

// Entities valid in HTML but undefined in XML.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&laquo;", "«")
        .replace("&raquo;", "»")
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Feed</title>
<item><title>Primera &laquo;noticia&raquo;</title><link> https://e.example/1 </link><pubDate>Sat, 07 Mar 2026 08:00:00 +0100</pubDate></item>
<item><title>   </title><link>https://e.example/blank</link></item>
<item><title>Segunda</title></item>
<item><title>Tercera</title><link>https://e.example/3</link></item>
<item><title>Cuarta</title><link>https://e.example/4</link></item>
</channel></rss>"#;

    #[tokio::test]
    async fn tags_region_and_source_and_applies_limit() {
        let p = RssProvider::from_fixture_str("es", "Expansión", XML);
        let recs = p.fetch_latest().await.unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].title, "Primera «noticia»");
        assert_eq!(recs[0].url, "https://e.example/1");
        assert_eq!(recs[0].published, "Sat, 07 Mar 2026 08:00:00 +0100");
        assert!(recs.iter().all(|r| r.region == "es" && r.source == "Expansión"));
        // blank title skipped, missing link kept as empty
        assert_eq!(recs[1].title, "Segunda");
        assert_eq!(recs[1].url, "");
        assert_eq!(p.name(), "Expansión");
    }

    #[tokio::test]
    async fn empty_channel_yields_nothing() {
        let xml = r#"<rss><channel><title>x</title></channel></rss>"#;
        let p = RssProvider::from_fixture_str("gl", "NYT", xml);
        assert!(p.fetch_latest().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_xml_is_an_error() {
        let xml = "<rss><channel><item><title>x</wrong></item></channel></rss>";
        let p = RssProvider::from_fixture_str("gl", "NYT", xml);
        assert!(p.fetch_latest().await.is_err());
    }
}
