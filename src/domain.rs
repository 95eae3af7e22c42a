//! Domain model of an event schedule.
//!
//! A [`Document`] holds an ordered list of [`Day`]s, each holding an ordered
//! list of [`Match`]es. Days and matches carry stable identifiers so that
//! edits address the entity that was selected, whatever its position.

mod config;
pub use config::{Config, ConfigError, STATE_DIR};

mod document;
pub use document::{Day, Document, DocumentError, Match, Metadata, ResolveError};

/// Raw form input and its normalisation rules.
pub mod draft;
pub use draft::{DayDraft, MatchDraft};

mod id;
pub use id::{DayId, MatchId};

mod lenient;

/// Icon lookup for modalities.
pub mod modality;

mod status;
pub use status::MatchStatus;
