use horarios::{MatchDraft, Removal};
use tracing::instrument;

use super::{Context, prompt, terminal::Colorize};

/// Fields of a match given on the command line.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Fields {
    /// Start time, e.g. 08:00
    #[arg(long)]
    pub(super) time: Option<String>,

    /// Sport or category
    #[arg(long)]
    pub(super) modality: Option<String>,

    /// Who plays whom, e.g. "1A x 2B"
    #[arg(long)]
    pub(super) matchup: Option<String>,

    /// Venue
    #[arg(long)]
    pub(super) venue: Option<String>,

    /// Status: "Agendado", "Em andamento" or "Finalizado"
    #[arg(long)]
    pub(super) status: Option<String>,

    /// Score of the first team
    #[arg(long)]
    pub(super) score1: Option<String>,

    /// Score of the second team
    #[arg(long)]
    pub(super) score2: Option<String>,
}

impl Fields {
    const fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.modality.is_none()
            && self.matchup.is_none()
            && self.venue.is_none()
            && self.status.is_none()
            && self.score1.is_none()
            && self.score2.is_none()
    }

    /// Fills `base` with the given fields, or asks for all of them when none
    /// were given.
    fn complete(self, base: MatchDraft) -> anyhow::Result<MatchDraft> {
        if self.is_empty() {
            return prompt::match_form(&base);
        }
        Ok(MatchDraft {
            time: self.time.unwrap_or(base.time),
            modalidade: self.modality.unwrap_or(base.modalidade),
            confronto: self.matchup.unwrap_or(base.confronto),
            local: self.venue.unwrap_or(base.local),
            status: self.status.unwrap_or(base.status),
            score1: self.score1.unwrap_or(base.score1),
            score2: self.score2.unwrap_or(base.score2),
        })
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Add a match to a day
    ///
    /// Without --day the match is placed on a new, unnamed day.
    Add {
        /// Id (or id prefix) of the day
        #[arg(long)]
        day: Option<String>,

        #[command(flatten)]
        fields: Fields,
    },

    /// Change a match
    ///
    /// Fields not given keep their current value.
    Edit {
        /// Id (or id prefix) of the match
        id: String,

        #[command(flatten)]
        fields: Fields,
    },

    /// Remove a match
    Remove {
        /// Id (or id prefix) of the match
        id: String,

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
            Self::Add { day, fields } => {
                let day = day
                    .map(|prefix| session.document().resolve_day(&prefix))
                    .transpose()?;
                let draft = fields.complete(MatchDraft::template())?;
                let id = session.add_match(day, draft)?;
                println!("{}", format!("✅ Jogo {} adicionado", id.short()).success());
            }
            Self::Edit { id, fields } => {
                let id = session.document().resolve_match(&id)?;
                let base = session
                    .document()
                    .find_match(id)
                    .map(|(_, m)| MatchDraft::from(m))
                    .unwrap_or_default();
                let draft = fields.complete(base)?;
                session.edit_match(id, draft)?;
                println!("{}", format!("✅ Jogo {} atualizado", id.short()).success());
            }
            Self::Remove { id, yes } => {
                let id = session.document().resolve_match(&id)?;
                match session.remove_match(id, &mut prompt::Prompt::new(yes))? {
                    Removal::Removed(m) => println!(
                        "{}",
                        format!("✅ Jogo {} removido ({})", id.short(), m.confronto).success()
                    ),
                    Removal::Cancelled => println!("Cancelado"),
                }
            }
        }

        Ok(())
    }
}
