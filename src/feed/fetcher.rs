use std::time::Duration;

use futures::stream::{self, StreamExt};
use thiserror::Error;

use crate::feed::listing::sort_by_published;
use crate::feed::parser::{parse_feed, FeedEntry};
use crate::storage::Source;
use crate::util::validate_url;

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Default number of feeds fetched at the same time.
pub const DEFAULT_FEED_CONCURRENCY: usize = 10;

/// Errors that can occur while fetching a single feed.
///
/// The aggregator logs these and drops the offending feed; they never abort
/// a listing.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Feed URL is not a usable http(s) URL
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),
    /// Feed XML could not be parsed as RSS or Atom
    #[error("Parse error: {0}")]
    Parse(String),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Tuning for one aggregation pass.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Per-request timeout; `None` waits as long as the connection does
    pub timeout: Option<Duration>,
    /// Maximum feeds in flight at once
    pub concurrency: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            concurrency: DEFAULT_FEED_CONCURRENCY,
        }
    }
}

/// Fetches every source and merges their entries, newest first.
///
/// Each feed gets one GET attempt. A feed that fails to download or parse is
/// logged and contributes no entries; the others are still returned. Before
/// sorting, entries keep source order, so entries with equal (or missing)
/// timestamps stay grouped by source in file order.
pub async fn list_entries(
    client: &reqwest::Client,
    sources: &[Source],
    options: &FetchOptions,
) -> Vec<FeedEntry> {
    if sources.is_empty() {
        return Vec::new();
    }

    // Clone the sources so the stream's futures hold no borrow of the slice.
    let timeout = options.timeout;
    let results: Vec<(Source, Result<Vec<FeedEntry>, FetchError>)> =
        stream::iter(sources.iter().cloned())
            .map(|source| async move {
                let result = fetch_source(client, &source, timeout).await;
                (source, result)
            })
            .buffered(options.concurrency.max(1))
            .collect()
            .await;

    let mut entries = Vec::new();
    let mut failed = 0usize;
    for (source, result) in results {
        match result {
            Ok(feed_entries) => {
                tracing::debug!(
                    source = %source.name,
                    entries = feed_entries.len(),
                    "Fetched feed"
                );
                entries.extend(feed_entries);
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(
                    source = %source.name,
                    url = %source.feed_url,
                    error = %e,
                    "Skipping feed that failed to load"
                );
            }
        }
    }

    sort_by_published(&mut entries);

    tracing::info!(
        sources = sources.len(),
        failed = failed,
        entries = entries.len(),
        "Aggregated feeds"
    );
    entries
}

/// Downloads and parses a single source's feed.
///
/// # Errors
///
/// - [`FetchError::InvalidUrl`] - The configured URL is not http(s)
/// - [`FetchError::Network`] - Connection or TLS errors
/// - [`FetchError::Timeout`] - Request exceeded `timeout`
/// - [`FetchError::HttpStatus`] - Non-2xx HTTP response
/// - [`FetchError::ResponseTooLarge`] - Response exceeded 10MB
/// - [`FetchError::Parse`] - Invalid RSS/Atom XML
pub async fn fetch_source(
    client: &reqwest::Client,
    source: &Source,
    timeout: Option<Duration>,
) -> Result<Vec<FeedEntry>, FetchError> {
    let url = validate_url(&source.feed_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    let request = client.get(url.as_str()).send();
    let response = match timeout {
        Some(limit) => tokio::time::timeout(limit, request)
            .await
            .map_err(|_| FetchError::Timeout)??,
        None => request.await?,
    };

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let bytes = read_limited_bytes(response, MAX_FEED_SIZE).await?;

    parse_feed(&source.name, &bytes).map_err(|e| FetchError::Parse(e.to_string()))
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
