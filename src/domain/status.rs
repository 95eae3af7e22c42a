use std::fmt;

/// How a match's free-form status text is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// Not started yet. Anything that is not recognised falls here.
    Scheduled,
    /// Being played.
    InProgress,
    /// Over.
    Finished,
}

impl MatchStatus {
    /// Classifies status text by keyword.
    ///
    /// The check is case-insensitive: text containing "final" is finished,
    /// text containing "andam" (as in "Em andamento") is in progress, and
    /// everything else, including the empty string, is scheduled.
    #[must_use]
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if status.contains("final") {
            Self::Finished
        } else if status.contains("andam") {
            Self::InProgress
        } else {
            Self::Scheduled
        }
    }

    /// CSS class of the status badge.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Scheduled => "status-agendado",
            Self::InProgress => "status-andamento",
            Self::Finished => "status-finalizado",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in progress",
            Self::Finished => "finished",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::MatchStatus;

    #[test_case("Finalizado", MatchStatus::Finished; "finalizado")]
    #[test_case("FINAL", MatchStatus::Finished; "upper case final")]
    #[test_case("Em andamento", MatchStatus::InProgress; "em andamento")]
    #[test_case("Andamento", MatchStatus::InProgress; "capitalised")]
    #[test_case("Agendado", MatchStatus::Scheduled; "agendado")]
    #[test_case("Adiado", MatchStatus::Scheduled; "unknown text")]
    #[test_case("", MatchStatus::Scheduled; "empty")]
    fn classification(status: &str, expected: MatchStatus) {
        assert_eq!(MatchStatus::classify(status), expected);
    }

    #[test]
    fn css_classes() {
        assert_eq!(MatchStatus::Finished.css_class(), "status-finalizado");
        assert_eq!(MatchStatus::InProgress.css_class(), "status-andamento");
        assert_eq!(MatchStatus::Scheduled.css_class(), "status-agendado");
    }
}
