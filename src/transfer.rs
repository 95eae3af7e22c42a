//! Moving the whole document in and out of files.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    domain::{Document, DocumentError},
    session::{EditError, Session},
    storage::Store,
    view::View,
};

/// Default name of an exported schedule.
pub const EXPORT_FILE_NAME: &str = "horarios.json";

/// Errors moving a document in or out of a file.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The file is not a schedule document. Nothing was changed.
    #[error("{} is not a valid schedule: {source}", path.display())]
    Invalid {
        /// The file involved.
        path: PathBuf,
        /// Why the file was rejected.
        source: DocumentError,
    },

    /// The document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Applying the imported document failed.
    #[error(transparent)]
    Edit(#[from] EditError),
}

impl<S: Store, V: View> Session<S, V> {
    /// Writes the document, as indented JSON, to `path`.
    ///
    /// The document is stamped and saved to the store first. A failure to
    /// save is logged; the export still goes ahead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn export(&mut self, path: &Path) -> Result<(), TransferError> {
        if let Err(e) = self.store.save(&mut self.document) {
            tracing::warn!("Exporting without saving: {e}");
        }

        let json = self.document.to_json_pretty()?;
        fs::write(path, json).map_err(|source| TransferError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Exported schedule to {}", path.display());
        Ok(())
    }

    /// Replaces the document with the one in `path`, then saves and redraws.
    ///
    /// # Errors
    ///
    /// Fails, leaving the document untouched, if edit mode is off or the
    /// file cannot be read or is not a document with a `schedule` list.
    /// Also fails if the imported document cannot be committed.
    pub fn import(&mut self, path: &Path) -> Result<(), TransferError> {
        self.ensure_editable()?;

        let text = fs::read_to_string(path).map_err(|source| TransferError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Document::from_json(&text).map_err(|source| TransferError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;

        self.document = document;
        tracing::info!("Imported schedule from {}", path.display());
        self.commit()?;
        Ok(())
    }
}
