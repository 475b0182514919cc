use crate::demo::{run_demo, run_ranking, DemoArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use land_mcda::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Land-Use MCDA",
    about = "Rank land-use alternatives by weighted criteria and serve the decision API",
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
    /// Rank the seed alternatives or an imported score sheet
    Rank(RankArgs),
    /// Walk through weighting, ranking, and scenario history with the seed data
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_ranking(args),
        Command::Demo(args) => run_demo(args),
    }
}
