use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{
    id::{DayId, MatchId},
    lenient,
};

const FALLBACK_JSON: &str = include_str!("fallback.json");

/// Namespace for the ids of days and matches that were stored without one.
const POSITIONAL_IDS: Uuid = Uuid::from_u128(0x3c1f_6b2e_9a47_4d0b_8e52_71d4_a6f0_c913);

static FALLBACK: LazyLock<Document> = LazyLock::new(|| {
    Document::from_json(FALLBACK_JSON).expect("the embedded fallback document is valid")
});

/// The complete schedule of an event, together with the text shown around
/// it.
///
/// A document always holds a (possibly empty) `schedule` and `info` list;
/// missing or malformed values are normalised when the document is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Page title.
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,

    /// Name of the event, shown as part of the subtitle.
    #[serde(default, deserialize_with = "lenient::string")]
    pub event: String,

    /// Where the event takes place, shown as part of the subtitle.
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,

    /// The event days, in display order.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub schedule: Vec<Day>,

    /// Bullet points displayed below the schedule.
    #[serde(default, deserialize_with = "lenient::strings")]
    pub info: Vec<String>,

    /// Bookkeeping fields.
    #[serde(default, deserialize_with = "lenient::record")]
    pub metadata: Metadata,

    /// Top-level fields this crate does not interpret, kept for round trips.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Document bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// When the document was last saved, as an ISO-8601 UTC timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Metadata {
    /// Sets `last_updated` to the current time.
    pub fn stamp(&mut self) {
        self.last_updated = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    /// The `last_updated` timestamp, if present and well formed.
    #[must_use]
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc))
    }

    /// Looks up a field that is not interpreted by this crate.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// One calendar day of the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Stable identifier.
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: DayId,

    /// Weekday label, e.g. "Segunda-feira".
    #[serde(default, deserialize_with = "lenient::string")]
    pub weekday: String,

    /// Free-form date, normally `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,

    /// The day's matches, in display order.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub matches: Vec<Match>,
}

impl Day {
    /// Creates an empty day with a fresh identifier.
    #[must_use]
    pub fn new(weekday: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: DayId::new(),
            weekday: weekday.into(),
            date: date.into(),
            matches: Vec::new(),
        }
    }
}

/// One scheduled game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Stable identifier.
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: MatchId,

    /// Start time.
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: String,

    /// Sport or category.
    #[serde(default, deserialize_with = "lenient::string")]
    pub modalidade: String,

    /// Who plays whom.
    #[serde(default, deserialize_with = "lenient::string")]
    pub confronto: String,

    /// Venue.
    #[serde(default, deserialize_with = "lenient::string")]
    pub local: String,

    /// Free-form status, see [`MatchStatus`](super::MatchStatus).
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,

    /// Score of the first team; empty when not played.
    #[serde(default, deserialize_with = "lenient::string")]
    pub score1: String,

    /// Score of the second team; empty when not played.
    #[serde(default, deserialize_with = "lenient::string")]
    pub score2: String,
}

impl Match {
    /// The score as displayed, `"-"` when neither score is known.
    #[must_use]
    pub fn score_line(&self) -> String {
        if self.score1.is_empty() && self.score2.is_empty() {
            return "-".to_string();
        }
        let side = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
        format!("{} x {}", side(&self.score1), side(&self.score2))
    }
}

/// Errors produced while reading a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The text is not JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON has no `schedule` array.
    #[error("missing \"schedule\" list")]
    MissingSchedule,
}

/// Failure to resolve a user-supplied identifier prefix.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Nothing starts with the prefix.
    #[error("no {kind} with id starting with '{prefix}'")]
    NotFound {
        /// "day" or "match".
        kind: &'static str,
        /// The prefix that was looked up.
        prefix: String,
    },

    /// More than one entity starts with the prefix.
    #[error("'{prefix}' is ambiguous ({count} {kind} ids match); use a longer prefix")]
    Ambiguous {
        /// "day" or "match".
        kind: &'static str,
        /// The prefix that was looked up.
        prefix: String,
        /// How many entities matched.
        count: usize,
    },
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            event: String::new(),
            location: String::new(),
            schedule: Vec::new(),
            info: Vec::new(),
            metadata: Metadata::default(),
            extra: Map::new(),
        }
    }

    /// A fresh copy of the document compiled into the binary.
    ///
    /// Mutating the returned value never affects later calls.
    #[must_use]
    pub fn fallback() -> Self {
        FALLBACK.clone()
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Fails if the text is not JSON or has no `schedule` array. Other
    /// malformed fields are normalised rather than rejected.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Builds a document from an already parsed JSON value.
    ///
    /// Days and matches without a valid id are given one derived from their
    /// position, so parsing the same text twice yields the same ids.
    ///
    /// # Errors
    ///
    /// Fails if the value has no `schedule` array.
    pub fn from_value(mut value: Value) -> Result<Self, DocumentError> {
        let Some(days) = value.get_mut("schedule").and_then(Value::as_array_mut) else {
            return Err(DocumentError::MissingSchedule);
        };
        assign_missing_ids(days);
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the document as indented JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Looks up a day by id.
    #[must_use]
    pub fn day(&self, id: DayId) -> Option<&Day> {
        self.schedule.iter().find(|day| day.id == id)
    }

    /// Looks up a day by id, mutably.
    pub fn day_mut(&mut self, id: DayId) -> Option<&mut Day> {
        self.schedule.iter_mut().find(|day| day.id == id)
    }

    /// Looks up a match by id, returning it with the day that holds it.
    #[must_use]
    pub fn find_match(&self, id: MatchId) -> Option<(&Day, &Match)> {
        self.schedule.iter().find_map(|day| {
            day.matches
                .iter()
                .find(|m| m.id == id)
                .map(|m| (day, m))
        })
    }

    /// Looks up a match by id, mutably.
    pub fn match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.schedule
            .iter_mut()
            .flat_map(|day| day.matches.iter_mut())
            .find(|m| m.id == id)
    }

    /// Iterates over every match of every day.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.schedule.iter().flat_map(|day| day.matches.iter())
    }

    /// Resolves a (possibly abbreviated) day id.
    ///
    /// # Errors
    ///
    /// Fails when no day, or more than one day, matches the prefix.
    pub fn resolve_day(&self, prefix: &str) -> Result<DayId, ResolveError> {
        resolve(
            "day",
            prefix,
            self.schedule.iter().map(|day| day.id),
            |id, p| id.matches_prefix(p),
        )
    }

    /// Resolves a (possibly abbreviated) match id.
    ///
    /// # Errors
    ///
    /// Fails when no match, or more than one match, matches the prefix.
    pub fn resolve_match(&self, prefix: &str) -> Result<MatchId, ResolveError> {
        resolve("match", prefix, self.matches().map(|m| m.id), |id, p| {
            id.matches_prefix(p)
        })
    }
}

fn resolve<T: Copy>(
    kind: &'static str,
    prefix: &str,
    ids: impl Iterator<Item = T>,
    is_match: impl Fn(T, &str) -> bool,
) -> Result<T, ResolveError> {
    let found: Vec<T> = ids.filter(|&id| is_match(id, prefix)).collect();
    match found.as_slice() {
        [id] => Ok(*id),
        [] => Err(ResolveError::NotFound {
            kind,
            prefix: prefix.to_string(),
        }),
        _ => Err(ResolveError::Ambiguous {
            kind,
            prefix: prefix.to_string(),
            count: found.len(),
        }),
    }
}

fn assign_missing_ids(days: &mut [Value]) {
    for (d, day) in days.iter_mut().enumerate() {
        let Some(day) = day.as_object_mut() else {
            continue;
        };
        fill_id(day, &format!("day/{d}"));

        let Some(matches) = day.get_mut("matches").and_then(Value::as_array_mut) else {
            continue;
        };
        for (m, entry) in matches.iter_mut().enumerate() {
            if let Some(entry) = entry.as_object_mut() {
                fill_id(entry, &format!("day/{d}/match/{m}"));
            }
        }
    }
}

fn fill_id(object: &mut Map<String, Value>, position: &str) {
    let valid = object
        .get("id")
        .and_then(Value::as_str)
        .is_some_and(|id| Uuid::parse_str(id).is_ok());
    if !valid {
        let id = Uuid::new_v5(&POSITIONAL_IDS, position.as_bytes());
        object.insert("id".to_string(), Value::String(id.to_string()));
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
