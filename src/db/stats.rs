use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, sql: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(sql, [], |row| row.get(0))
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) CATALOG
    //
    for (label, sql) in [
        ("Employees", "SELECT COUNT(*) FROM employees"),
        ("Tasks", "SELECT COUNT(*) FROM tasks"),
        ("Clients", "SELECT COUNT(*) FROM clients"),
        ("Schedule entries", "SELECT COUNT(*) FROM distribution_schedule"),
    ] {
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count(pool, sql)?, RESET);
    }

    //
    // 3) LEDGERS (active / total)
    //
    for (label, table) in [
        ("Task ledger", "task_assignments_realtime"),
        ("Client ledger", "client_assignments_realtime"),
    ] {
        let total = count(pool, &format!("SELECT COUNT(*) FROM {table}"))?;
        let active = count(
            pool,
            &format!("SELECT COUNT(*) FROM {table} WHERE is_active = 1"),
        )?;
        println!(
            "{}• {}:{} {}{}{} active / {} rows",
            CYAN, label, RESET, GREEN, active, RESET, total
        );
    }

    //
    // 4) LAST SIGN-IN DAY
    //
    let last_day: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM employee_signin_status ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!(
        "{}• Last sign-in day:{} {}",
        CYAN,
        RESET,
        last_day.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
