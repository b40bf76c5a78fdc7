use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use thiserror::Error;

use crate::content::extractor::extract;
use crate::content::sentiment::{analyze, Sentiment};
use crate::content::summarizer::{summarize as summarize_text, DEFAULT_SUMMARY_SENTENCES};
use crate::util::{validate_url, website_name};

const MAX_ARTICLE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Identification sent with article requests; many news sites refuse
/// non-browser agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

/// Errors from summarizing an article.
///
/// Variants fall into three classes: invalid input ([`InvalidUrl`]), fetch
/// failures (see [`is_fetch_failure`]), and [`ExtractionFailed`].
///
/// [`InvalidUrl`]: SummaryError::InvalidUrl
/// [`ExtractionFailed`]: SummaryError::ExtractionFailed
/// [`is_fetch_failure`]: SummaryError::is_fetch_failure
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),
    #[error("Failed to download the content of the URL: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Access denied (403 Forbidden) for URL: {0}")]
    Forbidden(String),
    #[error("Failed to download the content of the URL: HTTP status {0}")]
    HttpStatus(u16),
    #[error("Request timed out")]
    Timeout,
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Article extraction failed: no text found")]
    ExtractionFailed,
}

impl SummaryError {
    /// True for the network/HTTP class of failures.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            SummaryError::Network(_)
                | SummaryError::Forbidden(_)
                | SummaryError::HttpStatus(_)
                | SummaryError::Timeout
                | SummaryError::ResponseTooLarge(_)
        )
    }
}

/// Knobs for [`summarize`].
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    pub user_agent: String,
    /// `None` leaves the request unbounded
    pub timeout: Option<Duration>,
    pub max_sentences: usize,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: None,
            max_sentences: DEFAULT_SUMMARY_SENTENCES,
        }
    }
}

/// Everything shown for one summarized article.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleSummary {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publication_date: Option<DateTime<Utc>>,
    /// Selected sentences, one per line
    pub summary: String,
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    /// Host of the article URL without a leading "www."
    pub website_name: String,
}

/// Downloads the article at `url`, extracts its text and summarizes it.
///
/// Runs synchronously within the request: no retries and no caching, so
/// summarizing the same URL twice fetches it twice.
///
/// # Errors
///
/// - [`SummaryError::InvalidUrl`] - Malformed URL; no request is sent
/// - [`SummaryError::Forbidden`] - Server answered 403
/// - [`SummaryError::HttpStatus`] - Any other non-2xx status
/// - [`SummaryError::Network`] / [`SummaryError::Timeout`] - Transport failure
/// - [`SummaryError::ResponseTooLarge`] - Body over 5MB
/// - [`SummaryError::ExtractionFailed`] - No article text in the page
pub async fn summarize(
    client: &reqwest::Client,
    url: &str,
    options: &SummarizeOptions,
) -> Result<ArticleSummary, SummaryError> {
    let parsed = validate_url(url).map_err(|e| SummaryError::InvalidUrl(e.to_string()))?;

    let html = fetch_html(client, &parsed, options).await?;

    let article = extract(&html, &parsed);
    if article.text.trim().is_empty() {
        tracing::warn!(url = %parsed, "No article text found");
        return Err(SummaryError::ExtractionFailed);
    }

    let summary = summarize_text(&article.title, &article.text, options.max_sentences);
    let summary_text = summary.text();
    tracing::debug!(
        url = %parsed,
        sentences = summary.sentences.len(),
        keywords = ?summary.keywords,
        "Generated summary"
    );

    let sentiment = analyze(&summary_text);

    Ok(ArticleSummary {
        url: parsed.to_string(),
        title: article.title,
        authors: article.authors,
        publication_date: article.publication_date,
        summary: summary_text,
        keywords: summary.keywords,
        sentiment,
        website_name: website_name(&parsed),
    })
}

async fn fetch_html(
    client: &reqwest::Client,
    url: &url::Url,
    options: &SummarizeOptions,
) -> Result<String, SummaryError> {
    let request = client
        .get(url.as_str())
        .header(USER_AGENT, options.user_agent.as_str())
        .send();
    let response = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, request)
            .await
            .map_err(|_| SummaryError::Timeout)??,
        None => request.await?,
    };

    let status = response.status();
    if status == StatusCode::FORBIDDEN {
        tracing::warn!(url = %url, "Article host denied access");
        return Err(SummaryError::Forbidden(url.to_string()));
    }
    if !status.is_success() {
        return Err(SummaryError::HttpStatus(status.as_u16()));
    }

    read_limited_text(response, MAX_ARTICLE_SIZE).await
}

/// Reads the body up to `limit` bytes, replacing invalid UTF-8.
async fn read_limited_text(
    response: reqwest::Response,
    limit: usize,
) -> Result<String, SummaryError> {
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(SummaryError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(SummaryError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARTICLE: &str = r#"<html><head>
        <title>Markets cheer strong jobs report - Example Wire</title>
        <meta name="author" content="Pat Kim">
    </head><body><article>
        <p>Stocks rallied on Friday after a strong jobs report showed robust hiring across the economy.</p>
        <p>Analysts said the great numbers eased fears of a slowdown, and investors welcomed the data.</p>
        <p>The report also showed wages rising at a steady pace over the past year.</p>
    </article></body></html>"#;

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let client = reqwest::Client::new();
        for bad in ["not a url", "ftp://example.com/story", "http://"] {
            let result = summarize(&client, bad, &Default::default()).await;
            assert!(
                matches!(result, Err(SummaryError::InvalidUrl(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[tokio::test]
    async fn test_forbidden_has_distinct_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let url = format!("{}/paywalled", server.uri());
        let err = summarize(&reqwest::Client::new(), &url, &Default::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SummaryError::Forbidden(_)));
        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("/paywalled"));
    }

    #[tokio::test]
    async fn test_other_status_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/broken", server.uri());
        let err = summarize(&reqwest::Client::new(), &url, &Default::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SummaryError::HttpStatus(500)));
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_page_without_text_fails_extraction() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
            .mount(&server)
            .await;

        let url = format!("{}/empty", server.uri());
        let err = summarize(&reqwest::Client::new(), &url, &Default::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SummaryError::ExtractionFailed));
        assert!(!err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_summarize_success_sends_browser_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2024/05/03/jobs"))
            .and(header_regex("user-agent", "Chrome/110"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/2024/05/03/jobs", server.uri());
        let summary = summarize(&reqwest::Client::new(), &url, &Default::default())
            .await
            .unwrap();

        assert_eq!(summary.title, "Markets cheer strong jobs report");
        assert_eq!(summary.authors, vec!["Pat Kim".to_string()]);
        assert_eq!(
            summary.publication_date.map(|d| d.date_naive().to_string()),
            Some("2024-05-03".to_string())
        );
        assert_eq!(summary.summary.lines().count(), 3);
        assert!(summary.sentiment.polarity > 0.0);
        assert_eq!(summary.website_name, "127.0.0.1");
        assert!(summary.keywords.contains(&"report".to_string()));
    }
}
