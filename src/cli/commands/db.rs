use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::LedgerLogic;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        // opening the pool already applies pending migrations
        let pool = DbPool::new(&cfg.database, cfg.busy_timeout_ms)?;

        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let mut applied = pool.applied_migrations.clone();
            applied.extend(
                run_pending_migrations(&pool.conn).map_err(|e| AppError::Migration(e.to_string()))?,
            );
            if applied.is_empty() {
                println!("Schema already up to date.");
            }
            for version in &applied {
                println!("{}✔ Migration applied: {}{}", GREEN, version, RESET);
            }
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        if *info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            let violations = LedgerLogic::violations(&pool)?;
            if violations.is_empty() {
                println!("{}✔ Ledger exclusivity holds.{}\n", GREEN, RESET);
            } else {
                for (kind, entity, hour, n) in violations {
                    println!(
                        "{}✘ {} {} has {} active rows in slot {:02}{}",
                        RED,
                        kind.as_str(),
                        entity,
                        n,
                        hour,
                        RESET
                    );
                }
                println!();
            }
        }

        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
