use std::{fs, path::PathBuf, time::Duration};

mod day;
mod edit;
mod matches;
mod prompt;
mod terminal;

use anyhow::Context as _;
use clap::ArgAction;
use edit::Edit;
use horarios::{
    Config, FileStore, HtmlPage, NullView, RemoteFetcher, Session, View,
    domain::STATE_DIR,
    storage::Fetch,
    transfer::EXPORT_FILE_NAME,
};
use indicatif::ProgressBar;
use terminal::Colorize;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the schedule project
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Turn on edit mode
    #[arg(long, global = true)]
    admin: bool,

    /// Location of the published schedule, overriding the configured one
    #[arg(long, value_name = "PATH", global = true)]
    data: Option<String>,

    /// Do not fetch the published schedule
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let context = Context::new(self.root, self.admin, self.data, self.offline);
        self.command
            .unwrap_or_else(|| Command::Show(Show::default()))
            .run(&context)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    root: PathBuf,
    config: Config,
    admin: bool,
    data: Option<String>,
    offline: bool,
}

impl Context {
    fn new(root: PathBuf, admin: bool, data: Option<String>, offline: bool) -> Self {
        let config = Config::load_or_default(&root);
        Self {
            root,
            config,
            admin,
            data,
            offline,
        }
    }

    /// The page described by the configuration.
    fn page(&self) -> HtmlPage {
        HtmlPage::new(self.root.join(&self.config.output))
    }

    /// Loads the schedule into a session drawn in `view`.
    fn open<V: View>(&self, view: V) -> anyhow::Result<Session<FileStore, V>> {
        let store = FileStore::for_project(&self.root, &self.config);
        let fetcher = if self.offline {
            None
        } else {
            RemoteFetcher::from_config(&self.config, self.data.as_deref())?
        };

        let spinner = fetcher.as_ref().map(|fetcher| {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Carregando {}", fetcher.url()));
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        });

        let (session, source) = Session::open(
            store,
            fetcher.as_ref().map(|fetcher| fetcher as &dyn Fetch),
            view,
            self.admin,
        );

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        tracing::info!("Loaded the {source}");
        Ok(session)
    }

    /// Opens a session for making changes, redrawing the page after each.
    fn editor(&self) -> anyhow::Result<Session<FileStore, HtmlPage>> {
        if !self.admin {
            anyhow::bail!(
                "Modo de edição desativado; execute novamente com --admin para fazer alterações"
            );
        }
        self.open(self.page())
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show the schedule (default)
    Show(Show),

    /// Initialize a schedule project
    Init(Init),

    /// Write the schedule page
    Render(Render),

    /// Add, change or remove days
    #[command(subcommand)]
    Day(day::Command),

    /// Add, change or remove matches
    #[command(subcommand)]
    Match(matches::Command),

    /// Write the schedule to a JSON file
    Export(Export),

    /// Replace the schedule with the contents of a JSON file
    Import(Import),

    /// Edit the schedule interactively
    Edit(Edit),
}

impl Command {
    fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Show(command) => command.run(context)?,
            Self::Init(command) => command.run(context)?,
            Self::Render(command) => command.run(context)?,
            Self::Day(command) => command.run(context)?,
            Self::Match(command) => command.run(context)?,
            Self::Export(command) => command.run(context)?,
            Self::Import(command) => command.run(context)?,
            Self::Edit(command) => command.run(context)?,
        }
        Ok(())
    }
}

#[derive(Debug, Default, clap::Parser)]
pub struct Init {
    /// Address the published schedule is served from
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

impl Init {
    #[instrument(level = "debug", skip(context))]
    fn run(self, context: &Context) -> anyhow::Result<()> {
        let state_dir = context.root.join(STATE_DIR);
        if state_dir.exists() {
            anyhow::bail!("Project already initialized (found existing {STATE_DIR} directory)");
        }

        fs::create_dir_all(&state_dir)
            .with_context(|| format!("Failed to create {STATE_DIR} directory"))?;

        let config = Config {
            base_url: self.base_url,
            ..Config::default()
        };
        config
            .save(&Config::path(&context.root))
            .context("Failed to create config.toml")?;

        println!("Projeto de horários iniciado em {}", context.root.display());
        println!("  Criado: {STATE_DIR}/config.toml");
        println!();
        println!("Próximos passos:");
        println!("  horarios --admin day add --weekday Segunda-feira --date 2025-12-15");
        println!("  horarios render");

        Ok(())
    }
}

#[derive(Debug, Default, clap::Parser)]
pub struct Show {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(context))]
    fn run(self, context: &Context) -> anyhow::Result<()> {
        let session = context.open(NullView)?;

        match self.output {
            OutputFormat::Table => print!(
                "{}",
                terminal::schedule(session.document(), terminal::is_narrow())
            ),
            OutputFormat::Json => println!("{}", session.document().to_json_pretty()?),
        }
        Ok(())
    }
}

#[derive(Debug, Default, clap::Parser)]
pub struct Render {
    /// Where to write the page, instead of the configured output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Render {
    #[instrument(level = "debug", skip(context))]
    fn run(self, context: &Context) -> anyhow::Result<()> {
        let session = context.open(NullView)?;
        let mut page = self
            .output
            .map_or_else(|| context.page(), HtmlPage::new);

        page.render(session.document(), session.edit_mode())
            .with_context(|| format!("Failed to write {}", page.path().display()))?;

        println!(
            "{}",
            format!("✅ Página gerada em {}", page.path().display()).success()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Export {
    /// The file to write
    #[arg(default_value = EXPORT_FILE_NAME)]
    path: PathBuf,
}

impl Export {
    #[instrument(level = "debug", skip(context))]
    fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut session = context.open(NullView)?;
        session.export(&self.path)?;

        println!(
            "{}",
            format!("✅ JSON exportado para {}", self.path.display()).success()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Import {
    /// The file to read
    path: PathBuf,
}

impl Import {
    #[instrument(level = "debug", skip(context))]
    fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut session = context.editor()?;
        session.import(&self.path)?;

        let days = session.document().schedule.len();
        let matches = session.document().matches().count();
        println!(
            "{}",
            format!("✅ Importação concluída: {days} dia(s) e {matches} jogo(s)").success()
        );
        Ok(())
    }
}
