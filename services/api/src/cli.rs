use crate::server;
use crate::templates::{self, TemplateCommand};
use clap::{Args, Parser, Subcommand};
use vacancy_studio::config::AppConfig;
use vacancy_studio::error::AppError;
use vacancy_studio::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Vacancy Studio",
    about = "Compose vacancy posts and manage saved templates from the command line",
    version
)]
struct Cli {
    /// Log debug output to stderr for one-shot commands
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Manage saved vacancy templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommand,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Keep templates in memory instead of the configured directory
    #[arg(long)]
    pub(crate) ephemeral: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Templates { command } => {
            telemetry::init_cli(cli.verbose)?;
            let config = AppConfig::load()?;
            templates::run(&config, command)
        }
    }
}
