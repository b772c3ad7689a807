//! SQLite connection pool wrapper (lightweight for CLI usage).

use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
    /// Migration versions applied while opening this connection.
    pub applied_migrations: Vec<String>,
}

impl DbPool {
    /// Open the database, apply the busy timeout and bring the schema up to date.
    pub fn new(path: &str, busy_timeout_ms: u64) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::prepare(conn, busy_timeout_ms)
    }

    fn prepare(conn: Connection, busy_timeout_ms: u64) -> AppResult<Self> {
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let applied_migrations =
            run_pending_migrations(&conn).map_err(|e| AppError::Migration(e.to_string()))?;
        Ok(Self {
            conn,
            applied_migrations,
        })
    }

    /// Run `func` inside a `BEGIN IMMEDIATE` transaction.
    ///
    /// The write lock is taken up front so two processes cannot interleave
    /// their deactivate/insert sequences. Any error rolls the whole unit back.
    pub fn with_immediate_tx<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
