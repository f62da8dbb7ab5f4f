use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tripsplit::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to an alternative trip file
    #[arg(short, long, global = true)]
    trip_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tripsplit::AppCommand {
    fn from(cmd: Commands) -> tripsplit::AppCommand {
        match cmd {
            Commands::Balances => tripsplit::AppCommand::Balances,
            Commands::Settle => tripsplit::AppCommand::Settle,
            Commands::Report => tripsplit::AppCommand::Report,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an example trip file
    Setup,
    /// Display who paid, who owes, and each net balance
    Balances,
    /// Display the minimal transfers that settle the trip
    Settle,
    /// Display spending breakdowns by category, day, participant and activity
    Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(cli.trip_path.as_deref()),
        Some(cmd) => tripsplit::run_command(cmd.into(), cli.trip_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup(trip_path: Option<&str>) -> Result<()> {
    match trip_path {
        Some(path) => tripsplit::cli::setup::setup_at_path(path),
        None => tripsplit::cli::setup::setup(),
    }
}
