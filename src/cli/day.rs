use horarios::{DayDraft, Removal};
use tracing::instrument;

use super::{Context, prompt, terminal::Colorize};

/// Fields of a day given on the command line.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Fields {
    /// Weekday label, e.g. "Segunda-feira"
    #[arg(long)]
    pub(super) weekday: Option<String>,

    /// Date, e.g. 2025-12-15
    #[arg(long)]
    pub(super) date: Option<String>,
}

impl Fields {
    const fn is_empty(&self) -> bool {
        self.weekday.is_none() && self.date.is_none()
    }

    /// Fills `base` with the given fields, or asks for all of them when none
    /// were given.
    fn complete(self, base: DayDraft) -> anyhow::Result<DayDraft> {
        if self.is_empty() {
            return prompt::day_form(&base);
        }
        Ok(DayDraft {
            weekday: self.weekday.unwrap_or(base.weekday),
            date: self.date.unwrap_or(base.date),
        })
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Add a day to the end of the schedule
    Add(Fields),

    /// Change the weekday or date of a day
    Edit {
        /// Id (or id prefix) of the day
        day: String,

        #[command(flatten)]
        fields: Fields,
    },

    /// Remove a day and all of its matches
    Remove {
        /// Id (or id prefix) of the day
        day: String,

        /// Skip confirmation prompts
        #[arg(long, short)]
        yes: bool,
    },
}

impl Command {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut session = context.editor()?;

        match self {
            Self::Add(fields) => {
                let draft = fields.complete(DayDraft::default())?;
                let id = session.add_day(draft)?;
                println!("{}", format!("✅ Dia {} adicionado", id.short()).success());
            }
            Self::Edit { day, fields } => {
                let id = session.document().resolve_day(&day)?;
                let base = session
                    .document()
                    .day(id)
                    .map(DayDraft::from)
                    .unwrap_or_default();
                let draft = fields.complete(base)?;
                session.edit_day(id, draft)?;
                println!("{}", format!("✅ Dia {} atualizado", id.short()).success());
            }
            Self::Remove { day, yes } => {
                let id = session.document().resolve_day(&day)?;
                match session.remove_day(id, &mut prompt::Prompt::new(yes))? {
                    Removal::Removed(day) => println!(
                        "{}",
                        format!(
                            "✅ Removido {} - {} com {} jogo(s)",
                            day.weekday,
                            day.date,
                            day.matches.len()
                        )
                        .success()
                    ),
                    Removal::Cancelled => println!("Cancelado"),
                }
            }
        }

        Ok(())
    }
}
