//! Indicator documents for Poll content blocks.
//!
//! Three sources, checked in order:
//! 1. a remote line-oriented feed configured under `poll.feeds`
//! 2. the built-in IP watch-list for `ip-watch-list` and `url-watch-list`
//! 3. otherwise an indicator carrying only its timestamp

use crate::domain::config::PollConfig;
use crate::domain::error::ContentError;
use crate::ports::outbound::ContentProvider;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use shared_types::ContentBlock;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// Collections served from [`WATCH_LIST`].
pub const WATCH_LIST_COLLECTIONS: [&str; 2] = ["ip-watch-list", "url-watch-list"];

/// Addresses published in the built-in watch-list.
pub const WATCH_LIST: [&str; 21] = [
    "176.119.3.108",
    "178.207.85.119",
    "178.63.174.153",
    "188.241.140.212",
    "14.138.73.47",
    "131.72.138.45",
    "62.84.51.39",
    "62.109.23.246",
    "5.101.113.169",
    "213.231.8.30",
    "208.43.25.52",
    "112.208.6.209",
    "115.239.248.87",
    "117.216.190.71",
    "131.72.139.233",
    "129.194.97.21",
    "162.244.35.229",
    "178.219.10.23",
    "184.154.124.203",
    "184.154.146.100",
    "184.154.146.101",
];

const PRODUCER_IDENTITY: &str = "TAXII Exchange";
const IP_WATCHLIST: &str = "IP Watchlist";
const IP_ADDRESS: &str = "IP Address";

#[derive(Serialize)]
struct IndicatorDocument<'a> {
    indicators: Vec<Indicator<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Indicator<'a> {
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    indicator_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    producer: Option<Producer<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    observable: Option<Observable>,
}

impl Indicator<'_> {
    fn bare(timestamp: String) -> Self {
        Self {
            timestamp,
            title: None,
            indicator_type: None,
            producer: None,
            observable: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Producer<'a> {
    identity: &'a str,
    produced_time: String,
    contributing_source: Source<'a>,
}

#[derive(Serialize)]
struct Source<'a> {
    identity: &'a str,
    reference: &'a str,
}

#[derive(Serialize)]
struct Observable {
    properties: ObservableProperties,
}

#[derive(Serialize)]
struct ObservableProperties {
    #[serde(rename = "type")]
    object_type: &'static str,
    equals: Vec<String>,
}

impl Observable {
    fn ip_addresses(values: Vec<String>) -> Self {
        Self {
            properties: ObservableProperties {
                object_type: IP_ADDRESS,
                equals: values,
            },
        }
    }
}

/// Builds indicator documents from the built-in list and configured feeds.
pub struct WatchListContentProvider {
    client: reqwest::Client,
    feeds: BTreeMap<String, String>,
    indent: bool,
}

impl WatchListContentProvider {
    /// Build from the `[poll]` section. `feed_timeout` bounds each feed fetch.
    pub fn new(poll: &PollConfig, feed_timeout: Duration) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder()
            .timeout(feed_timeout)
            .build()
            .map_err(ContentError::Client)?;

        Ok(Self {
            client,
            feeds: poll.feeds.clone(),
            indent: poll.indent,
        })
    }

    async fn fetch_feed(&self, url: &str) -> Result<Vec<String>, ContentError> {
        let fetch = |source| ContentError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(fetch)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::FeedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(fetch)?;
        let entries: Vec<String> = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        info!(url, entries = entries.len(), "Fetched feed");
        Ok(entries)
    }

    fn encode(&self, document: &IndicatorDocument<'_>) -> Result<String, ContentError> {
        let content = if self.indent {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(content)
    }
}

#[async_trait]
impl ContentProvider for WatchListContentProvider {
    async fn content_for(&self, collection: &str) -> Result<ContentBlock, ContentError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut indicator = Indicator::bare(now.clone());

        if let Some(url) = self.feeds.get(collection) {
            let entries = self.fetch_feed(url).await?;
            indicator.title = Some("Compromised IP Addresses");
            indicator.indicator_type = Some(IP_WATCHLIST);
            indicator.producer = Some(Producer {
                identity: PRODUCER_IDENTITY,
                produced_time: now,
                contributing_source: Source {
                    identity: collection,
                    reference: url,
                },
            });
            indicator.observable = Some(Observable::ip_addresses(entries));
        } else if WATCH_LIST_COLLECTIONS.contains(&collection) {
            indicator.title = Some("Malicious IP Addresses");
            indicator.indicator_type = Some(IP_WATCHLIST);
            indicator.observable = Some(Observable::ip_addresses(
                WATCH_LIST.iter().map(|ip| ip.to_string()).collect(),
            ));
        } else {
            debug!(collection, "No content source for collection");
        }

        let document = IndicatorDocument {
            indicators: vec![indicator],
        };
        Ok(ContentBlock::json(self.encode(&document)?))
    }
}
