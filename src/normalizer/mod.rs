use chrono::{DateTime, Utc};
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::domain::FeedEntry;

/// Timestamp layout Jenkins serves and [`crate::render`] expects.
pub const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse an RSS/Atom document into entries, in document order.
    ///
    /// Never fails: a body that isn't a feed yields no entries.
    pub fn normalize(&self, body: &[u8]) -> Vec<FeedEntry> {
        let feed = match parser::parse(body) {
            Ok(feed) => feed,
            Err(e) => {
                tracing::warn!("Response is not a parseable feed: {}", e);
                return Vec::new();
            }
        };

        let entries: Vec<FeedEntry> = feed
            .entries
            .into_iter()
            .map(|entry| FeedEntry {
                title: entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string())
                    .unwrap_or_default(),
                published: entry
                    .published
                    .or(entry.updated)
                    .map(format_timestamp)
                    .unwrap_or_default(),
                link: entry
                    .links
                    .into_iter()
                    .next()
                    .map(|l| l.href)
                    .unwrap_or_default(),
            })
            .collect();

        tracing::debug!("Parsed {} feed entries", entries.len());
        entries
    }
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format(FEED_TIMESTAMP_FORMAT).to_string()
}
