//! Interactive prompts for the editing forms

use dialoguer::{Input, Select};
use horarios::{Confirm, DayDraft, DayId, Document, MatchDraft, MatchId};

/// Asks on the terminal before destructive changes, unless told to assume
/// yes.
#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    yes: bool,
}

impl Prompt {
    pub const fn new(yes: bool) -> Self {
        Self { yes }
    }
}

impl Confirm for Prompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.yes {
            return true;
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!("Confirmation failed: {e}");
                false
            })
    }
}

fn text(label: &str, initial: &str) -> anyhow::Result<String> {
    let value = Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Asks for the weekday and date of a day, starting from `initial`.
pub fn day_form(initial: &DayDraft) -> anyhow::Result<DayDraft> {
    Ok(DayDraft {
        weekday: text("Dia da semana", &initial.weekday)?,
        date: text("Data (AAAA-MM-DD)", &initial.date)?,
    })
}

/// Asks for every field of a match, starting from `initial`.
pub fn match_form(initial: &MatchDraft) -> anyhow::Result<MatchDraft> {
    Ok(MatchDraft {
        time: text("Horário", &initial.time)?,
        modalidade: text("Modalidade", &initial.modalidade)?,
        confronto: text("Confronto", &initial.confronto)?,
        local: text("Local", &initial.local)?,
        status: text("Status", &initial.status)?,
        score1: text("Placar - Time 1", &initial.score1)?,
        score2: text("Placar - Time 2", &initial.score2)?,
    })
}

/// Lets the user pick a day. `None` if there are none, or the user backed
/// out.
pub fn pick_day(document: &Document) -> anyhow::Result<Option<DayId>> {
    let labels: Vec<String> = document
        .schedule
        .iter()
        .map(|day| format!("{} - {}  [{}]", day.weekday, day.date, day.id.short()))
        .collect();
    if labels.is_empty() {
        return Ok(None);
    }

    let choice = Select::new()
        .with_prompt("Dia")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|index| document.schedule[index].id))
}

/// Lets the user pick a match from any day.
pub fn pick_match(document: &Document) -> anyhow::Result<Option<MatchId>> {
    let entries: Vec<(MatchId, String)> = document
        .schedule
        .iter()
        .flat_map(|day| {
            day.matches.iter().map(move |m| {
                (
                    m.id,
                    format!(
                        "{} {}  {}  {}  [{}]",
                        day.weekday,
                        m.time,
                        m.modalidade,
                        m.confronto,
                        m.id.short()
                    ),
                )
            })
        })
        .collect();
    if entries.is_empty() {
        return Ok(None);
    }

    let labels: Vec<&str> = entries.iter().map(|(_, label)| label.as_str()).collect();
    let choice = Select::new()
        .with_prompt("Jogo")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|index| entries[index].0))
}
