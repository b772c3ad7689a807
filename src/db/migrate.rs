use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Employees, tasks and clients referenced by schedules and the ledger.
fn ensure_catalog_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id           TEXT PRIMARY KEY,
            full_name    TEXT NOT NULL,
            role         TEXT NOT NULL DEFAULT 'employee' CHECK(role IN ('admin','employee')),
            shift_start  TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id           TEXT PRIMARY KEY,
            title        TEXT NOT NULL,
            assigned_to  TEXT REFERENCES employees(id),
            status       TEXT NOT NULL DEFAULT 'pending'
                         CHECK(status IN ('pending','in_progress','completed','cancelled')),
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS clients (
            id           TEXT PRIMARY KEY,
            name         TEXT NOT NULL,
            created_at   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Admin-authored hour windows: who owns what, when.
fn ensure_schedule_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS distribution_schedule (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            hour_start    INTEGER NOT NULL CHECK(hour_start BETWEEN 0 AND 23),
            hour_end      INTEGER NOT NULL CHECK(hour_end BETWEEN 0 AND 23),
            task_id       TEXT REFERENCES tasks(id),
            client_id     TEXT REFERENCES clients(id),
            assigned_to   TEXT NOT NULL REFERENCES employees(id),
            created_by    TEXT NOT NULL REFERENCES employees(id),
            is_recurring  INTEGER NOT NULL DEFAULT 1,
            created_at    TEXT NOT NULL,
            CHECK(hour_start <= hour_end),
            CHECK((task_id IS NULL) <> (client_id IS NULL))
        );

        CREATE INDEX IF NOT EXISTS idx_schedule_assignee_hours
            ON distribution_schedule(assigned_to, hour_start, hour_end);
        "#,
    )?;
    Ok(())
}

/// Sign-in status (one row per employee per day) and the attendance register.
fn ensure_attendance_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employee_signin_status (
            employee_id      TEXT NOT NULL REFERENCES employees(id),
            date             TEXT NOT NULL,
            is_signed_in     INTEGER NOT NULL DEFAULT 0,
            sign_in_time     TEXT,
            sign_out_time    TEXT,
            expected_sign_in TEXT NOT NULL,
            is_late          INTEGER NOT NULL DEFAULT 0,
            late_by_minutes  INTEGER NOT NULL DEFAULT 0 CHECK(late_by_minutes >= 0),
            updated_at       TEXT NOT NULL,
            PRIMARY KEY (employee_id, date)
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id      TEXT NOT NULL REFERENCES employees(id),
            date             TEXT NOT NULL,
            sign_in_time     TEXT NOT NULL,
            sign_out_time    TEXT,
            scheduled_time   TEXT NOT NULL,
            late_by_minutes  INTEGER NOT NULL DEFAULT 0,
            status           TEXT NOT NULL CHECK(status IN ('present','late')),
            UNIQUE (employee_id, date)
        );
        "#,
    )?;
    Ok(())
}

/// The two realtime ledgers share one shape; only the entity column differs.
fn ensure_ledger_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS task_assignments_realtime (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id          TEXT NOT NULL REFERENCES tasks(id),
            employee_id      TEXT NOT NULL REFERENCES employees(id),
            hour_slot        INTEGER NOT NULL CHECK(hour_slot BETWEEN 0 AND 23),
            is_active        INTEGER NOT NULL DEFAULT 1,
            reassigned_from  TEXT REFERENCES employees(id),
            is_temporary     INTEGER NOT NULL DEFAULT 0,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS client_assignments_realtime (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id        TEXT NOT NULL REFERENCES clients(id),
            employee_id      TEXT NOT NULL REFERENCES employees(id),
            hour_slot        INTEGER NOT NULL CHECK(hour_slot BETWEEN 0 AND 23),
            is_active        INTEGER NOT NULL DEFAULT 1,
            reassigned_from  TEXT REFERENCES employees(id),
            is_temporary     INTEGER NOT NULL DEFAULT 0,
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_task_rt_slot
            ON task_assignments_realtime(task_id, hour_slot, is_active);
        CREATE INDEX IF NOT EXISTS idx_task_rt_owner
            ON task_assignments_realtime(employee_id, is_active);
        CREATE INDEX IF NOT EXISTS idx_client_rt_slot
            ON client_assignments_realtime(client_id, hour_slot, is_active);
        CREATE INDEX IF NOT EXISTS idx_client_rt_owner
            ON client_assignments_realtime(employee_id, is_active);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (strftime('%Y-%m-%dT%H:%M:%S', 'now', 'localtime'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Record when a ledger row stopped being live, so history can be replayed.
/// Returns the version when it was applied by this call.
fn migrate_add_deactivated_at(conn: &Connection) -> Result<Option<&'static str>, Error> {
    let version = "20260302_0002_ledger_deactivated_at";

    if migration_applied(conn, version)? {
        return Ok(None);
    }

    for table in ["task_assignments_realtime", "client_assignments_realtime"] {
        conn.execute(
            &format!("ALTER TABLE {table} ADD COLUMN deactivated_at TEXT;"),
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'deactivated_at' to {table}: {e}")),
            )
        })?;
    }

    mark_applied(conn, version, "Added deactivated_at to realtime ledgers")?;

    Ok(Some(version))
}

/// Public entry point: run all pending migrations.
///
/// Invoked every time a `DbPool` is opened. Silent: the versions applied by
/// this call are returned for `init` and `db --migrate` to report.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    ensure_catalog_tables(conn)?;
    ensure_schedule_table(conn)?;
    ensure_attendance_tables(conn)?;
    ensure_ledger_tables(conn)?;

    let mut applied = Vec::new();
    applied.extend(migrate_add_deactivated_at(conn)?.map(str::to_string));

    Ok(applied)
}
