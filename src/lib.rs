pub mod cli;
pub mod core;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::trip::Trip;

/// Top level commands the application can execute.
pub enum AppCommand {
    Balances,
    Settle,
    Report,
}

pub fn run_command(command: AppCommand, trip_path: Option<&str>) -> Result<()> {
    info!("Tripsplit starting...");

    let trip = match trip_path {
        Some(path) => Trip::load_from_path(path)?,
        None => Trip::load()?,
    };
    debug!(
        trip = %trip.name,
        participants = trip.participants.len(),
        expenses = trip.expenses.len(),
        "Loaded trip"
    );

    match command {
        AppCommand::Balances => cli::balances::run(&trip),
        AppCommand::Settle => cli::settle::run(&trip),
        AppCommand::Report => cli::report::run(&trip),
    }
}
