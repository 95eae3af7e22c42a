//! Terminal capability detection and the plain-text schedule view

use std::fmt::Write as _;

use horarios::{Document, Match, MatchStatus};
use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
    /// Bold the text
    fn heading(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn info(&self) -> String {
        if supports_color() {
            self.fg::<css::LightBlue>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }

    fn heading(&self) -> String {
        if supports_color() {
            self.bold().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }

    fn heading(&self) -> String {
        self.as_str().heading()
    }
}

/// Colors a status label by its classification.
fn status(text: &str) -> String {
    match MatchStatus::classify(text) {
        MatchStatus::Finished => text.success(),
        MatchStatus::InProgress => text.warning(),
        MatchStatus::Scheduled => text.info(),
    }
}

/// Column widths for the matches of one day.
struct Widths {
    modality: usize,
    matchup: usize,
    score: usize,
    venue: usize,
}

impl Widths {
    fn of(matches: &[Match]) -> Self {
        let widest = |field: fn(&Match) -> String| {
            matches
                .iter()
                .map(|m| field(m).chars().count())
                .max()
                .unwrap_or(0)
        };
        Self {
            modality: widest(|m| m.modalidade.clone()),
            matchup: widest(|m| m.confronto.clone()),
            score: widest(Match::score_line),
            venue: widest(|m| m.local.clone()),
        }
    }
}

/// Renders the document for the terminal.
///
/// Every day and match is listed with its short id, which the editing
/// commands accept in place of the full id. `narrow` leaves out the venue.
pub fn schedule(document: &Document, narrow: bool) -> String {
    let mut out = String::new();

    let title = if document.title.is_empty() {
        horarios::render::DEFAULT_TITLE
    } else {
        &document.title
    };
    let _ = writeln!(out, "{}", title.heading());
    let subtitle = horarios::render::subtitle(document);
    if !subtitle.is_empty() {
        let _ = writeln!(out, "{}", subtitle.dim());
    }

    if document.schedule.is_empty() {
        let _ = writeln!(out, "\n{}", "Nenhum dia cadastrado.".dim());
    }

    for day in &document.schedule {
        let _ = writeln!(
            out,
            "\n{} {}",
            format!("{} - {}", day.weekday, day.date).heading(),
            format!("[{}]", day.id.short()).dim()
        );
        if day.matches.is_empty() {
            let _ = writeln!(out, "  {}", "Nenhum jogo.".dim());
            continue;
        }

        let widths = Widths::of(&day.matches);
        for m in &day.matches {
            let mut line = format!(
                "  {} {:<5}  {:<modality$}  {:<matchup$}  {:<score$}",
                format!("[{}]", m.id.short()).dim(),
                m.time,
                m.modalidade,
                m.confronto,
                m.score_line(),
                modality = widths.modality,
                matchup = widths.matchup,
                score = widths.score,
            );
            if !narrow {
                let _ = write!(line, "  {:<venue$}", m.local, venue = widths.venue);
            }
            let _ = writeln!(out, "{}  {}", line, status(&m.status));
        }
    }

    if !document.info.is_empty() {
        let _ = writeln!(out, "\n{}", "Informações Importantes".heading());
        for text in &document.info {
            let _ = writeln!(out, "  • {text}");
        }
    }

    if let Some(at) = document.metadata.last_updated_at() {
        let _ = writeln!(
            out,
            "\n{}",
            format!("Última atualização {}", at.format("%Y-%m-%d %H:%M UTC")).dim()
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use horarios::{DayDraft, Document, MatchDraft, MatchId};

    use super::schedule;

    fn one_match() -> Document {
        let mut document = Document::fallback();
        let mut day = DayDraft::new("Terça-feira", "2025-12-16").into_day();
        day.matches.push(
            MatchDraft {
                time: "10:30".to_string(),
                modalidade: "Handebol".to_string(),
                confronto: "3A x 1C".to_string(),
                local: "Ginásio".to_string(),
                status: "Em andamento".to_string(),
                score1: "4".to_string(),
                score2: "6".to_string(),
            }
            .into_match(MatchId::new()),
        );
        document.schedule.push(day);
        document
    }

    #[test]
    fn lists_days_matches_and_notes() {
        let document = one_match();
        let text = schedule(&document, false);

        assert!(text.contains("Tabela de Horários dos Jogos"));
        assert!(text.contains("Terça-feira - 2025-12-16"));
        assert!(text.contains(&document.schedule[0].id.short()));
        assert!(text.contains(&document.schedule[0].matches[0].id.short()));
        assert!(text.contains("3A x 1C"));
        assert!(text.contains("4 x 6"));
        assert!(text.contains("Ginásio"));
        assert!(text.contains("Em andamento"));
        assert_eq!(text.matches("  • ").count(), 7);
    }

    #[test]
    fn narrow_terminals_drop_the_venue() {
        let text = schedule(&one_match(), true);
        assert!(!text.contains("Ginásio"));
        assert!(text.contains("3A x 1C"));
    }

    #[test]
    fn empty_schedule_says_so() {
        let text = schedule(&Document::fallback(), false);
        assert!(text.contains("Nenhum dia cadastrado."));
    }
}
