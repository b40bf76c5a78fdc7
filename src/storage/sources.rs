use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use super::types::{Source, StoreError};

/// Separator between a source's name and its feed URL on one line.
pub const LINE_SEPARATOR: &str = ", ";

/// File-backed list of feed sources.
///
/// The backing file holds one `"<name>, <url>"` record per line. The store
/// keeps an in-memory snapshot that is rebuilt from the file on every
/// [`load`](Self::load) and after every successful [`add`](Self::add).
///
/// Appends from one process are serialized through the snapshot's write lock.
/// The file itself is not locked, so separate processes appending at the same
/// time may interleave lines.
#[derive(Debug)]
pub struct SourceStore {
    path: PathBuf,
    sources: RwLock<Arc<Vec<Source>>>,
}

impl SourceStore {
    /// Opens the store at `path` and performs the initial load.
    ///
    /// A missing file is not an error; the store simply starts empty and the
    /// file is created on the first [`add`](Self::add).
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            sources: RwLock::new(Arc::new(Vec::new())),
        };
        store.load().await?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory snapshot, in file order.
    pub async fn sources(&self) -> Arc<Vec<Source>> {
        Arc::clone(&*self.sources.read().await)
    }

    /// Re-reads the backing file and replaces the in-memory snapshot.
    pub async fn load(&self) -> Result<Arc<Vec<Source>>, StoreError> {
        let loaded = Arc::new(self.read_file().await?);
        *self.sources.write().await = Arc::clone(&loaded);
        Ok(loaded)
    }

    /// Appends a source line and reloads the snapshot.
    ///
    /// Both values are trimmed first. Returns `Ok(false)` without touching the
    /// file when either value is empty or contains a line break, since such a
    /// record could not be read back as a single line.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the append or the reload fails.
    pub async fn add(&self, name: &str, feed_url: &str) -> Result<bool, StoreError> {
        let name = name.trim();
        let feed_url = feed_url.trim();

        if name.is_empty() || feed_url.is_empty() {
            tracing::debug!(name = %name, url = %feed_url, "Ignoring source with empty field");
            return Ok(false);
        }
        if name.contains(['\n', '\r']) || feed_url.contains(['\n', '\r']) {
            tracing::warn!(name = %name.escape_debug(), "Ignoring source containing a line break");
            return Ok(false);
        }

        // Held across append and reload so concurrent adds cannot interleave.
        let mut guard = self.sources.write().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        let line = format!("{}{}{}\n", name, LINE_SEPARATOR, feed_url);
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;
        drop(file);

        *guard = Arc::new(self.read_file().await?);
        tracing::info!(name = %name, url = %feed_url, total = guard.len(), "Source added");

        Ok(true)
    }

    async fn read_file(&self) -> Result<Vec<Source>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(parse_sources(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No sources file found, starting empty");
                Ok(Vec::new())
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Parses the contents of a sources file.
///
/// Each line is trimmed and split on the first `", "`. Blank lines are
/// ignored; lines without the separator are logged and skipped. A name that
/// appears again later keeps its original position but takes the later URL.
pub fn parse_sources(content: &str) -> Vec<Source> {
    let mut sources: Vec<Source> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some((name, feed_url)) = line.split_once(LINE_SEPARATOR) else {
            tracing::warn!(line_number = idx + 1, line = %line, "Skipping invalid line in sources file");
            continue;
        };

        match sources.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.feed_url = feed_url.to_string(),
            None => sources.push(Source::new(name, feed_url)),
        }
    }

    sources
}
