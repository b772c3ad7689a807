use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::clock::Clock;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped with `--test`)
///  - the SQLite database
///  - all pending DB migrations
pub fn handle(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let db_path = cfg.init_all(cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rWorkload…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    // opening the pool runs the migrations
    let pool = DbPool::new(&db_path, cfg.busy_timeout_ms)?;
    for version in &pool.applied_migrations {
        println!("✅ Migration applied: {}", version);
    }

    println!("✅ Database initialized at {}", &db_path);

    log::audit_quiet(
        &pool.conn,
        &clock.now(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 rWorkload initialization completed!");
    Ok(())
}
