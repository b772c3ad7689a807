//! rWorkload library root.
//! Exposes the CLI parser, the high-level run() function, and the
//! redistribution engine modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};
use utils::clock::{Clock, FixedClock, SystemClock};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg, clock),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Employee { .. } | Commands::Task { .. } | Commands::Client { .. } => {
            cli::commands::catalog::handle(&cli.command, cfg, clock)
        }
        Commands::Schedule { .. } => cli::commands::schedule::handle(&cli.command, cfg, clock),
        Commands::Signin { .. } | Commands::Signout { .. } | Commands::Attendance => {
            cli::commands::attendance::handle(&cli.command, cfg, clock)
        }
        Commands::Redistribute { .. }
        | Commands::Restore { .. }
        | Commands::Sweep
        | Commands::Watch { .. } => cli::commands::distribution::handle(&cli.command, cfg, clock),
        Commands::Summary { .. } | Commands::Assignments { .. } => {
            cli::commands::summary::handle(&cli.command, cfg, clock)
        }
        Commands::Ledger { .. } => cli::commands::ledger::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line database override
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // 4️⃣ clock: pinned with --at, otherwise the system time
    let clock: Box<dyn Clock> = match &cli.at {
        Some(at) => Box::new(FixedClock::parse(at).ok_or_else(|| AppError::InvalidDate(at.clone()))?),
        None => Box::new(SystemClock),
    };

    dispatch(&cli, &cfg, clock.as_ref())
}
