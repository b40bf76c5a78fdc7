use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised by the source store.
///
/// Malformed lines in the backing file are never errors; only I/O failures
/// reach the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or appending to the sources file failed
    #[error("Sources file I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Domain Types
// ============================================================================

/// A configured feed source.
///
/// Sources are identified by name, but the store does not reject duplicate
/// names: when the file lists a name twice, the later URL wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub feed_url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, feed_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feed_url: feed_url.into(),
        }
    }
}
