//! Realtime assignment ledgers.
//!
//! Rows are only ever inserted or deactivated. For a given
//! `(entity, hour_slot)` at most one row is active; [`activate`] keeps that
//! true by deactivating whatever holds the slot before inserting, so callers
//! must go through it (inside a transaction) rather than [`insert_assignment`].

use crate::models::assignment::{AssignmentKind, NewAssignment, RealtimeAssignment};
use crate::errors::AppResult;
use crate::utils::date::format_datetime;
use chrono::NaiveDateTime;
use rusqlite::{Connection, Result, Row, params};

fn map_assignment(kind: AssignmentKind) -> impl Fn(&Row) -> Result<RealtimeAssignment> {
    move |row| {
        Ok(RealtimeAssignment {
            id: row.get("id")?,
            kind,
            entity_id: row.get(kind.entity_column())?,
            employee_id: row.get("employee_id")?,
            hour_slot: row.get("hour_slot")?,
            is_active: row.get::<_, i32>("is_active")? == 1,
            reassigned_from: row.get("reassigned_from")?,
            is_temporary: row.get::<_, i32>("is_temporary")? == 1,
            created_at: row.get("created_at")?,
            deactivated_at: row.get("deactivated_at")?,
        })
    }
}

fn collect(
    conn: &Connection,
    kind: AssignmentKind,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> AppResult<Vec<RealtimeAssignment>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, map_assignment(kind))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Deactivate the active rows an employee owns in one hour slot.
pub fn deactivate_owned(
    conn: &Connection,
    kind: AssignmentKind,
    employee_id: &str,
    hour_slot: u32,
    at: &NaiveDateTime,
) -> AppResult<usize> {
    let sql = format!(
        "UPDATE {} SET is_active = 0, deactivated_at = ?1
         WHERE employee_id = ?2 AND hour_slot = ?3 AND is_active = 1",
        kind.table()
    );
    let n = conn.execute(&sql, params![format_datetime(at), employee_id, hour_slot])?;
    Ok(n)
}

/// Deactivate the active temporary rows created on behalf of `employee_id`,
/// whatever their hour slot.
pub fn deactivate_temporary_from(
    conn: &Connection,
    kind: AssignmentKind,
    employee_id: &str,
    at: &NaiveDateTime,
) -> AppResult<usize> {
    let sql = format!(
        "UPDATE {} SET is_active = 0, deactivated_at = ?1
         WHERE reassigned_from = ?2 AND is_temporary = 1 AND is_active = 1",
        kind.table()
    );
    let n = conn.execute(&sql, params![format_datetime(at), employee_id])?;
    Ok(n)
}

/// Deactivate whatever currently holds `(entity, hour_slot)`.
pub fn deactivate_slot(
    conn: &Connection,
    kind: AssignmentKind,
    entity_id: &str,
    hour_slot: u32,
    at: &NaiveDateTime,
) -> AppResult<usize> {
    let sql = format!(
        "UPDATE {} SET is_active = 0, deactivated_at = ?1
         WHERE {} = ?2 AND hour_slot = ?3 AND is_active = 1",
        kind.table(),
        kind.entity_column()
    );
    let n = conn.execute(&sql, params![format_datetime(at), entity_id, hour_slot])?;
    Ok(n)
}

pub fn insert_assignment(
    conn: &Connection,
    a: &NewAssignment<'_>,
    at: &NaiveDateTime,
) -> AppResult<i64> {
    let sql = format!(
        "INSERT INTO {} ({}, employee_id, hour_slot, is_active, reassigned_from, is_temporary, created_at)
         VALUES (?1, ?2, ?3, 1, ?4, ?5, ?6)",
        a.kind.table(),
        a.kind.entity_column()
    );
    conn.execute(
        &sql,
        params![
            a.entity_id,
            a.employee_id,
            a.hour_slot,
            a.reassigned_from,
            if a.is_temporary { 1 } else { 0 },
            format_datetime(at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Make `a` the single live row for its slot: deactivate, then insert.
pub fn activate(conn: &Connection, a: &NewAssignment<'_>, at: &NaiveDateTime) -> AppResult<i64> {
    deactivate_slot(conn, a.kind, a.entity_id, a.hour_slot, at)?;
    insert_assignment(conn, a, at)
}

pub fn active_for_slot(
    conn: &Connection,
    kind: AssignmentKind,
    entity_id: &str,
    hour_slot: u32,
) -> AppResult<Vec<RealtimeAssignment>> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ?1 AND hour_slot = ?2 AND is_active = 1 ORDER BY id ASC",
        kind.table(),
        kind.entity_column()
    );
    collect(conn, kind, &sql, &[&entity_id, &hour_slot])
}

/// Active rows owned by an employee, optionally restricted to one slot.
pub fn active_for_employee(
    conn: &Connection,
    kind: AssignmentKind,
    employee_id: &str,
    hour_slot: Option<u32>,
) -> AppResult<Vec<RealtimeAssignment>> {
    match hour_slot {
        Some(h) => {
            let sql = format!(
                "SELECT * FROM {} WHERE employee_id = ?1 AND hour_slot = ?2 AND is_active = 1
                 ORDER BY id ASC",
                kind.table()
            );
            collect(conn, kind, &sql, &[&employee_id, &h])
        }
        None => {
            let sql = format!(
                "SELECT * FROM {} WHERE employee_id = ?1 AND is_active = 1 ORDER BY id ASC",
                kind.table()
            );
            collect(conn, kind, &sql, &[&employee_id])
        }
    }
}

/// Every row, live or not, oldest first.
pub fn history(
    conn: &Connection,
    kind: AssignmentKind,
    hour_slot: Option<u32>,
) -> AppResult<Vec<RealtimeAssignment>> {
    match hour_slot {
        Some(h) => {
            let sql = format!(
                "SELECT * FROM {} WHERE hour_slot = ?1 ORDER BY id ASC",
                kind.table()
            );
            collect(conn, kind, &sql, &[&h])
        }
        None => {
            let sql = format!("SELECT * FROM {} ORDER BY id ASC", kind.table());
            collect(conn, kind, &sql, &[])
        }
    }
}

/// `(entity, hour_slot)` pairs holding more than one active row.
/// Empty whenever the ledger is consistent.
pub fn exclusivity_violations(
    conn: &Connection,
    kind: AssignmentKind,
) -> AppResult<Vec<(String, u32, i64)>> {
    let sql = format!(
        "SELECT {col}, hour_slot, COUNT(*) FROM {table}
         WHERE is_active = 1
         GROUP BY {col}, hour_slot
         HAVING COUNT(*) > 1",
        col = kind.entity_column(),
        table = kind.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
