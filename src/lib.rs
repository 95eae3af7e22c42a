//! Schedules for school sports events
//!
//! A schedule is a JSON document listing the days of an event and the
//! matches played on each. This crate loads it from the best available
//! source, edits it, keeps a working copy on disk and renders it as an HTML
//! page.

pub mod domain;
pub use domain::{
    Config, Day, DayDraft, DayId, Document, DocumentError, Match, MatchDraft, MatchId,
    MatchStatus,
};

pub mod loader;
pub use loader::{Loaded, Loader, Source};

pub mod render;

pub mod session;
pub use session::{AssumeYes, Confirm, EditError, Removal, Session};

/// Persisted and published copies of the document.
pub mod storage;
pub use storage::{FileStore, MemoryStore, RemoteFetcher, Store};

pub mod transfer;
pub use transfer::TransferError;

pub mod view;
pub use view::{HtmlPage, NullView, View};
