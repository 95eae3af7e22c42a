//! Chooses which copy of the document to work with.
//!
//! Sources are tried in rank order: the published copy, then the stored
//! working copy, then the document compiled into the binary. The first one
//! to produce a valid document wins, so loading always succeeds.

use std::fmt;

use crate::{
    domain::Document,
    storage::{Fetch, Store},
};

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The published copy.
    Remote,
    /// The stored working copy.
    Store,
    /// The document compiled into the binary.
    Fallback,
}

impl Source {
    /// Whether a document from this source is written to the store once
    /// adopted.
    #[must_use]
    pub const fn persists(self) -> bool {
        matches!(self, Self::Remote | Self::Fallback)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remote => "published copy",
            Self::Store => "stored copy",
            Self::Fallback => "built-in defaults",
        })
    }
}

/// The outcome of loading.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    /// The adopted document.
    pub document: Document,
    /// Where it came from.
    pub source: Source,
}

/// Loads the document from the best available source.
pub struct Loader<'a, S> {
    store: &'a mut S,
    fetcher: Option<&'a dyn Fetch>,
}

impl<'a, S: Store> Loader<'a, S> {
    /// A loader reading from, and saving to, `store`.
    ///
    /// Without a fetcher the published copy is not consulted.
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            fetcher: None,
        }
    }

    /// Consults `fetcher` for the published copy.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: &'a dyn Fetch) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Produces a document.
    ///
    /// Unavailable sources are logged and skipped. A document taken from the
    /// published copy or the built-in defaults is saved to the store; a
    /// failure to save is logged and does not affect the result.
    pub fn load(self) -> Loaded {
        let ranked: [(Source, fn(&Self) -> Option<Document>); 2] =
            [(Source::Remote, Self::remote), (Source::Store, Self::stored)];

        let (source, mut document) = ranked
            .into_iter()
            .find_map(|(source, attempt)| {
                tracing::debug!("Trying the {source}");
                attempt(&self).map(|document| (source, document))
            })
            .unwrap_or_else(|| (Source::Fallback, Document::fallback()));

        tracing::info!("Using {source}");

        if source.persists() {
            if let Err(e) = self.store.save(&mut document) {
                tracing::error!("Failed to save the {source}: {e}");
            }
        }

        Loaded { document, source }
    }

    fn remote(&self) -> Option<Document> {
        match self.fetcher?.fetch() {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Published copy unavailable: {e}");
                None
            }
        }
    }

    fn stored(&self) -> Option<Document> {
        self.store.load()
    }
}
