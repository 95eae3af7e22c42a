use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::domain::{Config, Document, STATE_DIR};

/// A single-slot store holding the working copy of the document.
pub trait Store {
    /// Reads the stored document.
    ///
    /// Returns `None` when nothing is stored, or when what is stored cannot
    /// be read or is not a valid document. Such failures are logged, never
    /// raised.
    fn load(&self) -> Option<Document>;

    /// Stamps `metadata.last_updated` with the current time and writes the
    /// document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written. The timestamp is
    /// updated either way.
    fn save(&mut self, document: &mut Document) -> Result<(), StoreError>;
}

/// Errors writing to a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The store does not accept writes.
    #[error("the store is read-only")]
    ReadOnly,
}

/// A [`Store`] backed by one JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// A store keeping `key` in the directory `dir`.
    #[must_use]
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{key}.json")),
        }
    }

    /// The store of the project at `root`, as configured.
    #[must_use]
    pub fn for_project(root: &Path, config: &Config) -> Self {
        Self::new(&root.join(STATE_DIR).join("store"), &config.store_key)
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // a failed write must not truncate the existing copy
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)
    }
}

impl Store for FileStore {
    fn load(&self) -> Option<Document> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No stored copy at {}", self.path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", self.path.display());
                return None;
            }
        };

        match Document::from_json(&raw) {
            Ok(document) => {
                tracing::debug!("Read stored copy from {}", self.path.display());
                Some(document)
            }
            Err(e) => {
                tracing::warn!("Ignoring stored copy at {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&mut self, document: &mut Document) -> Result<(), StoreError> {
        document.metadata.stamp();
        let json = serde_json::to_string(document)?;
        self.write(&json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!("Saved working copy to {}", self.path.display());
        Ok(())
    }
}

/// A [`Store`] held in memory.
///
/// Keeps the serialized text, exactly as a file or browser store would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    read_only: bool,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `raw`, which need not be a valid document.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            read_only: false,
        }
    }

    /// Makes every subsequent [`save`](Store::save) fail.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// The stored text, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Option<Document> {
        let raw = self.raw.as_deref()?;
        Document::from_json(raw)
            .inspect_err(|e| tracing::warn!("Ignoring stored copy: {e}"))
            .ok()
    }

    fn save(&mut self, document: &mut Document) -> Result<(), StoreError> {
        document.metadata.stamp();
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.raw = Some(serde_json::to_string(document)?);
        Ok(())
    }
}
