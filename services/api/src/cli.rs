use crate::demo::{run_catalogue_export, run_demo, run_evaluate, CatalogueArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use qa_advisor::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "QA Tool Advisor",
    about = "Rank QA automation tools against a project questionnaire",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score the catalogue for a questionnaire stored as JSON
    Evaluate(EvaluateArgs),
    /// Inspect the tool catalogue
    Catalogue {
        #[command(subcommand)]
        command: CatalogueCommand,
    },
    /// Walk through a sample evaluation against the bundled catalogue
    Demo,
}

#[derive(Subcommand, Debug)]
enum CatalogueCommand {
    /// Print the catalogue as JSON, ordered by name
    Export(CatalogueArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the catalogue from this JSON file instead of APP_CATALOGUE_PATH or the bundled seed
    #[arg(long)]
    pub(crate) catalogue: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Catalogue {
            command: CatalogueCommand::Export(args),
        } => run_catalogue_export(args),
        Command::Demo => run_demo(),
    }
}
