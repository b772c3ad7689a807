use crate::errors::{AppError, AppResult};
use crate::models::schedule::{NewSchedule, ScheduleEntry, ScheduleRow, ScheduleTarget};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_schedule(row: &Row) -> Result<ScheduleEntry> {
    let task_id: Option<String> = row.get("task_id")?;
    let client_id: Option<String> = row.get("client_id")?;

    let target = match (task_id, client_id) {
        (Some(t), None) => ScheduleTarget::Task(t),
        (None, Some(c)) => ScheduleTarget::Client(c),
        _ => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidSchedule(
                    "row must reference exactly one task or client".into(),
                )),
            ));
        }
    };

    Ok(ScheduleEntry {
        id: row.get("id")?,
        hour_start: row.get("hour_start")?,
        hour_end: row.get("hour_end")?,
        target,
        assigned_to: row.get("assigned_to")?,
        created_by: row.get("created_by")?,
        is_recurring: row.get::<_, i32>("is_recurring")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_schedule(conn: &Connection, s: &NewSchedule, created_at: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO distribution_schedule
            (hour_start, hour_end, task_id, client_id, assigned_to, created_by, is_recurring, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            s.hour_start,
            s.hour_end,
            s.target.task_id(),
            s.target.client_id(),
            s.assigned_to,
            s.created_by,
            if s.is_recurring { 1 } else { 0 },
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_schedule(conn: &Connection, id: i64) -> AppResult<Option<ScheduleEntry>> {
    let entry = conn
        .query_row(
            "SELECT * FROM distribution_schedule WHERE id = ?1",
            [id],
            map_schedule,
        )
        .optional()?;
    Ok(entry)
}

pub fn delete_schedule(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM distribution_schedule WHERE id = ?1", [id])?;
    Ok(n)
}

/// Entries of one employee whose window contains `hour`, in schedule order.
pub fn schedules_for_employee_at(
    conn: &Connection,
    employee_id: &str,
    hour: u32,
) -> AppResult<Vec<ScheduleEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM distribution_schedule
         WHERE assigned_to = ?1 AND hour_start <= ?2 AND hour_end >= ?2
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![employee_id, hour], map_schedule)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every entry whose window contains `hour`.
pub fn schedules_at(conn: &Connection, hour: u32) -> AppResult<Vec<ScheduleEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM distribution_schedule
         WHERE hour_start <= ?1 AND hour_end >= ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([hour], map_schedule)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All entries joined with task title, client name and assignee name.
pub fn list_schedules(conn: &Connection) -> AppResult<Vec<ScheduleRow>> {
    let mut stmt = conn.prepare(
        "SELECT s.*, t.title AS task_title, c.name AS client_name, e.full_name AS assignee_name
         FROM distribution_schedule s
         LEFT JOIN tasks t ON t.id = s.task_id
         LEFT JOIN clients c ON c.id = s.client_id
         LEFT JOIN employees e ON e.id = s.assigned_to
         ORDER BY s.hour_start ASC, s.id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ScheduleRow {
            entry: map_schedule(row)?,
            task_title: row.get("task_title")?,
            client_name: row.get("client_name")?,
            assignee_name: row.get("assignee_name")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
