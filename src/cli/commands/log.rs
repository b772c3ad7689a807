use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// `log --print`: dump the audit trail (migrations, sign-ins, redistributions).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Log { print: true } => {
            let pool = DbPool::new(&cfg.database, cfg.busy_timeout_ms)?;
            LogLogic::print_log(&pool)
        }
        _ => {
            info("Nothing to do: pass --print to show the internal log.");
            Ok(())
        }
    }
}
