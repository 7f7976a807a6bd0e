//! News entry decoding and normalization
//!
//! The provider has shipped two response shapes for news over time: a
//! nested one where everything sits under a `content` object, and a flat
//! legacy one with a unix publish timestamp. Both decode into
//! [`RawNewsEntry`]; [`normalize_news`] folds either shape into the
//! [`NewsItem`] the rest of the pipeline consumes.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

const DEFAULT_TITLE: &str = "No title available";
const DEFAULT_PUBLISHER: &str = "Unknown source";
const DEFAULT_LINK: &str = "#";
const UNPARSEABLE_DATE: &str = "N/A";

/// One news entry as the provider sends it, either shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNewsEntry {
    /// Nested shape: everything lives under `content`
    #[serde(default)]
    pub content: Option<NewsContent>,

    // Flat legacy shape
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "providerPublishTime")]
    pub provider_publish_time: Option<i64>,
}

/// The `content` object of the nested news shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub provider: Option<NewsProvider>,
    #[serde(default, rename = "clickThroughUrl")]
    pub click_through_url: Option<ClickThroughUrl>,
    /// ISO 8601 timestamp, e.g. "2025-05-10T20:45:00Z"
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsProvider {
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClickThroughUrl {
    #[serde(default)]
    pub url: Option<String>,
}

/// A normalized news entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub publisher: String,
    pub link: String,
    /// `YYYY-MM-DD`, or "N/A" when the provider date was unparseable
    pub published: String,
}

/// Normalize raw provider entries into at most `limit` news items
///
/// Provider ordering (most recent first) is preserved. Missing fields fall
/// back to fixed placeholders rather than dropping the entry; only entries
/// that failed to decode at all are absent from the input slice.
pub fn normalize_news(entries: &[RawNewsEntry], limit: usize) -> Vec<NewsItem> {
    entries.iter().take(limit).map(normalize_entry).collect()
}

fn normalize_entry(entry: &RawNewsEntry) -> NewsItem {
    if let Some(content) = &entry.content {
        // Nested shape
        NewsItem {
            title: content
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            publisher: content
                .provider
                .as_ref()
                .and_then(|p| p.display_name.clone())
                .unwrap_or_else(|| DEFAULT_PUBLISHER.to_string()),
            link: content
                .click_through_url
                .as_ref()
                .and_then(|u| u.url.clone())
                .unwrap_or_else(|| DEFAULT_LINK.to_string()),
            published: content
                .pub_date
                .as_deref()
                .map_or_else(|| UNPARSEABLE_DATE.to_string(), format_iso_date),
        }
    } else {
        // Flat legacy shape
        NewsItem {
            title: entry
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            publisher: entry
                .publisher
                .clone()
                .unwrap_or_else(|| DEFAULT_PUBLISHER.to_string()),
            link: entry
                .link
                .clone()
                .unwrap_or_else(|| DEFAULT_LINK.to_string()),
            published: format_unix_date(entry.provider_publish_time),
        }
    }
}

/// Format an ISO 8601 timestamp as `YYYY-MM-DD`, "N/A" when unparseable
fn format_iso_date(raw: &str) -> String {
    if raw.is_empty() {
        return UNPARSEABLE_DATE.to_string();
    }
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| UNPARSEABLE_DATE.to_string(),
        |dt| dt.format("%Y-%m-%d").to_string(),
    )
}

/// Format a unix publish timestamp as `YYYY-MM-DD`, "N/A" when missing
fn format_unix_date(timestamp: Option<i64>) -> String {
    match timestamp {
        Some(t) if t > 0 => DateTime::from_timestamp(t, 0).map_or_else(
            || UNPARSEABLE_DATE.to_string(),
            |dt| dt.format("%Y-%m-%d").to_string(),
        ),
        _ => UNPARSEABLE_DATE.to_string(),
    }
}
