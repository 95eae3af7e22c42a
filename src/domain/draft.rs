//! Raw form input for days and matches.
//!
//! Drafts hold exactly what the user typed. Converting a draft into a domain
//! value trims every field and fills the few defaults; nothing else is
//! validated, so empty times, teams or venues are accepted.

use super::{
    document::{Day, Match},
    id::MatchId,
};

/// Status given to a match whose status was left blank.
pub const DEFAULT_STATUS: &str = "Agendado";

/// Weekday given to a day whose weekday was left blank.
pub const DEFAULT_WEEKDAY: &str = "Dia";

/// Input for creating or editing a day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayDraft {
    /// Weekday label.
    pub weekday: String,
    /// Date, normally `YYYY-MM-DD`.
    pub date: String,
}

impl DayDraft {
    /// Creates a draft from the given fields.
    #[must_use]
    pub fn new(weekday: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            weekday: weekday.into(),
            date: date.into(),
        }
    }

    /// The trimmed weekday, defaulted when blank.
    #[must_use]
    pub fn weekday(&self) -> String {
        non_blank(&self.weekday).unwrap_or(DEFAULT_WEEKDAY).to_string()
    }

    /// The trimmed date.
    #[must_use]
    pub fn date(&self) -> String {
        self.date.trim().to_string()
    }

    /// Builds a new, empty day from this draft.
    #[must_use]
    pub fn into_day(self) -> Day {
        Day::new(self.weekday(), self.date())
    }
}

impl From<&Day> for DayDraft {
    fn from(day: &Day) -> Self {
        Self::new(day.weekday.clone(), day.date.clone())
    }
}

/// Input for creating or editing a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchDraft {
    /// Start time.
    pub time: String,
    /// Sport or category.
    pub modalidade: String,
    /// Who plays whom.
    pub confronto: String,
    /// Venue.
    pub local: String,
    /// Status text; blank means [`DEFAULT_STATUS`].
    pub status: String,
    /// Score of the first team.
    pub score1: String,
    /// Score of the second team.
    pub score2: String,
}

impl MatchDraft {
    /// The form shown when adding a match.
    #[must_use]
    pub fn template() -> Self {
        Self {
            status: DEFAULT_STATUS.to_string(),
            ..Self::default()
        }
    }

    /// Builds a match with the given id from this draft.
    #[must_use]
    pub fn into_match(self, id: MatchId) -> Match {
        Match {
            id,
            time: self.time.trim().to_string(),
            modalidade: self.modalidade.trim().to_string(),
            confronto: self.confronto.trim().to_string(),
            local: self.local.trim().to_string(),
            status: non_blank(&self.status)
                .unwrap_or(DEFAULT_STATUS)
                .to_string(),
            score1: self.score1.trim().to_string(),
            score2: self.score2.trim().to_string(),
        }
    }
}

impl From<&Match> for MatchDraft {
    fn from(m: &Match) -> Self {
        Self {
            time: m.time.clone(),
            modalidade: m.modalidade.clone(),
            confronto: m.confronto.clone(),
            local: m.local.clone(),
            status: m.status.clone(),
            score1: m.score1.clone(),
            score2: m.score2.clone(),
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::{DayDraft, MatchDraft};
    use crate::domain::MatchId;

    #[test]
    fn match_fields_are_trimmed_and_status_defaults() {
        let draft = MatchDraft {
            time: " 08:00 ".to_string(),
            modalidade: "Futsal\n".to_string(),
            confronto: "  A x B".to_string(),
            local: "Quadra 1".to_string(),
            status: "   ".to_string(),
            score1: String::new(),
            score2: " 2 ".to_string(),
        };

        let m = draft.into_match(MatchId::new());
        assert_eq!(m.time, "08:00");
        assert_eq!(m.modalidade, "Futsal");
        assert_eq!(m.confronto, "A x B");
        assert_eq!(m.status, "Agendado");
        assert_eq!(m.score1, "");
        assert_eq!(m.score2, "2");
    }

    #[test]
    fn empty_fields_are_accepted() {
        let m = MatchDraft::default().into_match(MatchId::new());
        assert_eq!(m.time, "");
        assert_eq!(m.local, "");
        assert_eq!(m.status, "Agendado");
    }

    #[test]
    fn day_draft_trims_and_defaults_weekday() {
        let day = DayDraft::new("  ", " 2025-12-15 ").into_day();
        assert_eq!(day.weekday, "Dia");
        assert_eq!(day.date, "2025-12-15");
        assert!(day.matches.is_empty());
    }

    #[test]
    fn template_is_scheduled() {
        assert_eq!(MatchDraft::template().status, "Agendado");
    }
}
