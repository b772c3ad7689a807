//! Sign-in status and attendance rows.

use crate::errors::{AppError, AppResult};
use crate::models::signin::{Attendance, AttendanceStatus, SignInStatus};
use crate::utils::date::{format_date, format_datetime, parse_date, parse_datetime};
use crate::utils::time::{format_time, parse_time};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn bad_text(msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(AppError::Other(msg)),
    )
}

fn get_date(row: &Row, col: &str) -> Result<NaiveDate> {
    let s: String = row.get(col)?;
    parse_date(&s).ok_or_else(|| bad_text(format!("Invalid date in {}: {}", col, s)))
}

fn get_time(row: &Row, col: &str) -> Result<NaiveTime> {
    let s: String = row.get(col)?;
    parse_time(&s).ok_or_else(|| bad_text(format!("Invalid time in {}: {}", col, s)))
}

fn get_opt_datetime(row: &Row, col: &str) -> Result<Option<NaiveDateTime>> {
    let s: Option<String> = row.get(col)?;
    match s {
        None => Ok(None),
        Some(s) => parse_datetime(&s)
            .map(Some)
            .ok_or_else(|| bad_text(format!("Invalid timestamp in {}: {}", col, s))),
    }
}

fn map_status(row: &Row) -> Result<SignInStatus> {
    Ok(SignInStatus {
        employee_id: row.get("employee_id")?,
        date: get_date(row, "date")?,
        is_signed_in: row.get::<_, i32>("is_signed_in")? == 1,
        sign_in_time: get_opt_datetime(row, "sign_in_time")?,
        sign_out_time: get_opt_datetime(row, "sign_out_time")?,
        expected_sign_in: get_time(row, "expected_sign_in")?,
        is_late: row.get::<_, i32>("is_late")? == 1,
        late_by_minutes: row.get("late_by_minutes")?,
    })
}

fn map_attendance(row: &Row) -> Result<Attendance> {
    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str)
        .ok_or_else(|| bad_text(format!("Invalid attendance status: {}", status_str)))?;

    let sign_in_time = get_opt_datetime(row, "sign_in_time")?
        .ok_or_else(|| bad_text("Missing sign_in_time".into()))?;

    Ok(Attendance {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        full_name: row.get("full_name")?,
        date: get_date(row, "date")?,
        sign_in_time,
        sign_out_time: get_opt_datetime(row, "sign_out_time")?,
        scheduled_time: get_time(row, "scheduled_time")?,
        late_by_minutes: row.get("late_by_minutes")?,
        status,
    })
}

pub fn load_status(
    conn: &Connection,
    employee_id: &str,
    date: &NaiveDate,
) -> AppResult<Option<SignInStatus>> {
    let status = conn
        .query_row(
            "SELECT * FROM employee_signin_status WHERE employee_id = ?1 AND date = ?2",
            params![employee_id, format_date(date)],
            map_status,
        )
        .optional()?;
    Ok(status)
}

pub fn statuses_for_date(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<SignInStatus>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM employee_signin_status WHERE date = ?1 ORDER BY employee_id ASC",
    )?;

    let rows = stmt.query_map([format_date(date)], map_status)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Employees signed in on `date`, earliest sign-in first. The order is what
/// makes round-robin targets deterministic.
pub fn active_employees(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT employee_id FROM employee_signin_status
         WHERE date = ?1 AND is_signed_in = 1
         ORDER BY sign_in_time ASC, employee_id ASC",
    )?;

    let rows = stmt.query_map([format_date(date)], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert or refresh today's status row on sign-in.
pub fn upsert_sign_in(conn: &Connection, s: &SignInStatus, updated_at: &NaiveDateTime) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employee_signin_status
            (employee_id, date, is_signed_in, sign_in_time, sign_out_time,
             expected_sign_in, is_late, late_by_minutes, updated_at)
         VALUES (?1, ?2, 1, ?3, NULL, ?4, ?5, ?6, ?7)
         ON CONFLICT(employee_id, date) DO UPDATE SET
            is_signed_in     = 1,
            sign_in_time     = excluded.sign_in_time,
            sign_out_time    = NULL,
            expected_sign_in = excluded.expected_sign_in,
            is_late          = excluded.is_late,
            late_by_minutes  = excluded.late_by_minutes,
            updated_at       = excluded.updated_at",
        params![
            s.employee_id,
            format_date(&s.date),
            s.sign_in_time.as_ref().map(format_datetime),
            format_time(&s.expected_sign_in),
            if s.is_late { 1 } else { 0 },
            s.late_by_minutes,
            format_datetime(updated_at),
        ],
    )?;
    Ok(())
}

/// Flip `is_signed_in` off; history fields stay. Returns rows changed.
pub fn mark_signed_out(
    conn: &Connection,
    employee_id: &str,
    date: &NaiveDate,
    at: &NaiveDateTime,
) -> AppResult<usize> {
    let at = format_datetime(at);
    let n = conn.execute(
        "UPDATE employee_signin_status
         SET is_signed_in = 0, sign_out_time = ?1, updated_at = ?1
         WHERE employee_id = ?2 AND date = ?3",
        params![at, employee_id, format_date(date)],
    )?;
    Ok(n)
}

pub fn load_attendance(
    conn: &Connection,
    employee_id: &str,
    date: &NaiveDate,
) -> AppResult<Option<Attendance>> {
    let att = conn
        .query_row(
            "SELECT a.*, e.full_name FROM attendance a
             LEFT JOIN employees e ON e.id = a.employee_id
             WHERE a.employee_id = ?1 AND a.date = ?2",
            params![employee_id, format_date(date)],
            map_attendance,
        )
        .optional()?;
    Ok(att)
}

/// Record the first sign-in of the day. A later sign-in on the same day
/// reopens the row (clears the sign-out) but keeps the lateness of the first one.
pub fn open_attendance(
    conn: &Connection,
    employee_id: &str,
    at: &NaiveDateTime,
    scheduled: &NaiveTime,
    late_by_minutes: i64,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO attendance
            (employee_id, date, sign_in_time, sign_out_time, scheduled_time, late_by_minutes, status)
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6)
         ON CONFLICT(employee_id, date) DO UPDATE SET sign_out_time = NULL",
        params![
            employee_id,
            format_date(&at.date()),
            format_datetime(at),
            format_time(scheduled),
            late_by_minutes,
            AttendanceStatus::from_late_minutes(late_by_minutes).to_db_str(),
        ],
    )?;
    Ok(())
}

pub fn close_attendance(
    conn: &Connection,
    employee_id: &str,
    at: &NaiveDateTime,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE attendance SET sign_out_time = ?1 WHERE employee_id = ?2 AND date = ?3",
        params![format_datetime(at), employee_id, format_date(&at.date())],
    )?;
    Ok(n)
}

pub fn attendance_for_date(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<Attendance>> {
    let mut stmt = conn.prepare(
        "SELECT a.*, e.full_name FROM attendance a
         LEFT JOIN employees e ON e.id = a.employee_id
         WHERE a.date = ?1
         ORDER BY a.sign_in_time DESC",
    )?;

    let rows = stmt.query_map([format_date(date)], map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
