use std::path::PathBuf;

use dialoguer::{Input, Select};
use horarios::{
    DayDraft, FileStore, HtmlPage, MatchDraft, Removal, Session, transfer::EXPORT_FILE_NAME,
};
use tracing::instrument;

use super::{
    Context, prompt,
    terminal::{self, Colorize},
};

/// Edit the schedule interactively
///
/// Opens a menu over the schedule. The HTML page is redrawn after every
/// change.
#[derive(Debug, Default, clap::Parser)]
pub struct Edit {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Show,
    ToggleEditMode,
    AddDay,
    EditDay,
    RemoveDay,
    AddMatch,
    EditMatch,
    RemoveMatch,
    Export,
    Import,
    Quit,
}

impl Action {
    const ALL: [Self; 11] = [
        Self::Show,
        Self::ToggleEditMode,
        Self::AddDay,
        Self::EditDay,
        Self::RemoveDay,
        Self::AddMatch,
        Self::EditMatch,
        Self::RemoveMatch,
        Self::Export,
        Self::Import,
        Self::Quit,
    ];

    /// The actions offered to the user.
    ///
    /// Without admin rights edit mode cannot be turned on, so neither the
    /// toggle nor any change is offered.
    const fn offered(admin: bool) -> &'static [Self] {
        if admin { &Self::ALL } else { &Self::READ_ONLY }
    }

    const READ_ONLY: [Self; 3] = [Self::Show, Self::Export, Self::Quit];

    const fn label(self) -> &'static str {
        match self {
            Self::Show => "Mostrar tabela",
            Self::ToggleEditMode => "Alternar modo",
            Self::AddDay => "Adicionar dia",
            Self::EditDay => "Editar dia",
            Self::RemoveDay => "Remover dia",
            Self::AddMatch => "Adicionar jogo",
            Self::EditMatch => "Editar jogo",
            Self::RemoveMatch => "Excluir jogo",
            Self::Export => "Exportar JSON",
            Self::Import => "Importar JSON",
            Self::Quit => "Sair",
        }
    }

    const fn needs_edit_mode(self) -> bool {
        !matches!(
            self,
            Self::Show | Self::ToggleEditMode | Self::Export | Self::Quit
        )
    }
}

impl Edit {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut session = context.open(context.page())?;
        println!("Página: {}", session.view().path().display());

        let actions = Action::offered(context.admin);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        loop {
            let mode = horarios::render::mode_label(session.edit_mode());
            let Some(index) = Select::new()
                .with_prompt(format!("Modo: {mode}"))
                .items(&labels)
                .default(0)
                .interact_opt()?
            else {
                break;
            };

            let action = actions[index];
            if action == Action::Quit {
                break;
            }
            if action.needs_edit_mode() && !session.edit_mode() {
                println!("{}", "⚠️  Ative o modo de edição primeiro".warning());
                continue;
            }
            if let Err(e) = Self::apply(&mut session, action) {
                eprintln!("{}", format!("⚠️  {e:#}").warning());
            }
        }

        Ok(())
    }

    fn apply(session: &mut Session<FileStore, HtmlPage>, action: Action) -> anyhow::Result<()> {
        match action {
            Action::Show => print!("{}", terminal::schedule(session.document(), terminal::is_narrow())),
            Action::ToggleEditMode => {
                let on = session.toggle_edit_mode()?;
                println!("Modo: {}", horarios::render::mode_label(on));
            }
            Action::AddDay => {
                let draft = prompt::day_form(&DayDraft::default())?;
                let id = session.add_day(draft)?;
                println!("{}", format!("✅ Dia {} adicionado", id.short()).success());
            }
            Action::EditDay => {
                let Some(id) = prompt::pick_day(session.document())? else {
                    return Ok(());
                };
                let base = session
                    .document()
                    .day(id)
                    .map(DayDraft::from)
                    .unwrap_or_default();
                session.edit_day(id, prompt::day_form(&base)?)?;
                println!("{}", "✅ Dia atualizado".success());
            }
            Action::RemoveDay => {
                let Some(id) = prompt::pick_day(session.document())? else {
                    return Ok(());
                };
                if let Removal::Removed(_) = session.remove_day(id, &mut prompt::Prompt::new(false))? {
                    println!("{}", "✅ Dia removido".success());
                }
            }
            Action::AddMatch => {
                let day = if session.document().schedule.is_empty() {
                    None
                } else {
                    let Some(id) = prompt::pick_day(session.document())? else {
                        return Ok(());
                    };
                    Some(id)
                };
                let draft = prompt::match_form(&MatchDraft::template())?;
                let id = session.add_match(day, draft)?;
                println!("{}", format!("✅ Jogo {} adicionado", id.short()).success());
            }
            Action::EditMatch => {
                let Some(id) = prompt::pick_match(session.document())? else {
                    return Ok(());
                };
                let base = session
                    .document()
                    .find_match(id)
                    .map(|(_, m)| MatchDraft::from(m))
                    .unwrap_or_default();
                session.edit_match(id, prompt::match_form(&base)?)?;
                println!("{}", "✅ Jogo atualizado".success());
            }
            Action::RemoveMatch => {
                let Some(id) = prompt::pick_match(session.document())? else {
                    return Ok(());
                };
                if let Removal::Removed(_) =
                    session.remove_match(id, &mut prompt::Prompt::new(false))?
                {
                    println!("{}", "✅ Jogo removido".success());
                }
            }
            Action::Export => {
                let path: String = Input::new()
                    .with_prompt("Exportar para")
                    .default(EXPORT_FILE_NAME.to_string())
                    .interact_text()?;
                session.export(&PathBuf::from(&path))?;
                println!("{}", format!("✅ JSON exportado para {path}").success());
            }
            Action::Import => {
                let path: String = Input::new().with_prompt("Importar de").interact_text()?;
                session.import(&PathBuf::from(&path))?;
                println!("{}", "✅ Importação concluída e salva localmente".success());
            }
            Action::Quit => {}
        }
        Ok(())
    }
}
