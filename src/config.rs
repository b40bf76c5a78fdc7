//! Configuration file parser for `newsbrief.toml`.
//!
//! The config file is optional. A missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged, since they are usually typos.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::content::{SummarizeOptions, BROWSER_USER_AGENT, DEFAULT_SUMMARY_SENTENCES};
use crate::feed::{FetchOptions, DEFAULT_FEED_CONCURRENCY, DEFAULT_PAGE_SIZE};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the web server listens on.
    pub bind_address: String,

    /// Path of the `"name, url"` sources file.
    pub sources_file: PathBuf,

    /// Entries per listing page.
    pub page_size: usize,

    /// `User-Agent` sent when downloading articles.
    pub user_agent: String,

    /// Per-request timeout for feed and article downloads. 0 = no timeout.
    pub request_timeout_secs: u64,

    /// Maximum sentences in an article summary.
    pub summary_sentences: usize,

    /// Maximum feeds downloaded at the same time.
    pub feed_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            sources_file: PathBuf::from("sources.txt"),
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: BROWSER_USER_AGENT.to_string(),
            request_timeout_secs: 0,
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            feed_concurrency: DEFAULT_FEED_CONCURRENCY,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 7] = [
        "bind_address",
        "sources_file",
        "page_size",
        "user_agent",
        "request_timeout_secs",
        "summary_sentences",
        "feed_concurrency",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            bind = %config.bind_address,
            sources = %config.sources_file.display(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.request_timeout(),
            concurrency: self.feed_concurrency.max(1),
        }
    }

    pub fn summarize_options(&self) -> SummarizeOptions {
        SummarizeOptions {
            user_agent: self.user_agent.clone(),
            timeout: self.request_timeout(),
            max_sentences: self.summary_sentences,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
