use crate::db::catalog::{load_client, load_employee, load_task, require_employee};
use crate::db::ledger::active_for_employee;
use crate::db::pool::DbPool;
use crate::db::schedule::schedules_for_employee_at;
use crate::db::signin::{active_employees, load_status, statuses_for_date};
use crate::errors::AppResult;
use crate::models::assignment::AssignmentKind;
use crate::models::summary::{ActiveEmployee, AssignmentDetail, EmployeeSummary};
use crate::utils::clock::Clock;
use chrono::Timelike;
use rusqlite::Connection;

pub struct SummaryLogic;

fn active_ids(
    conn: &Connection,
    kind: AssignmentKind,
    employee_id: &str,
    hour: u32,
) -> AppResult<Vec<String>> {
    Ok(active_for_employee(conn, kind, employee_id, Some(hour))?
        .into_iter()
        .map(|r| r.entity_id)
        .collect())
}

impl SummaryLogic {
    /// One line per employee with a sign-in row today. Read only.
    pub fn build(pool: &DbPool, clock: &dyn Clock) -> AppResult<Vec<EmployeeSummary>> {
        let now = clock.now();
        let hour = now.hour();
        let conn = &pool.conn;

        let mut out = Vec::new();
        for status in statuses_for_date(conn, &now.date())? {
            let id = &status.employee_id;
            let task_ids = active_ids(conn, AssignmentKind::Task, id, hour)?;
            let client_ids = active_ids(conn, AssignmentKind::Client, id, hour)?;
            out.push(EmployeeSummary {
                full_name: load_employee(conn, id)?.map(|e| e.full_name),
                is_signed_in: status.is_signed_in,
                is_late: status.is_late,
                active_task_count: task_ids.len(),
                active_client_count: client_ids.len(),
                scheduled_count: schedules_for_employee_at(conn, id, hour)?.len(),
                task_ids,
                client_ids,
                employee_id: status.employee_id,
            });
        }

        Ok(out)
    }

    /// Live ledger rows of one employee, tasks first, with task titles and
    /// client names. `all_hours` drops the current-hour restriction.
    pub fn assignments(
        pool: &DbPool,
        clock: &dyn Clock,
        employee_id: &str,
        all_hours: bool,
    ) -> AppResult<Vec<AssignmentDetail>> {
        let conn = &pool.conn;
        require_employee(conn, employee_id)?;
        let hour = (!all_hours).then(|| clock.now().hour());

        let mut out = Vec::new();
        for kind in AssignmentKind::ALL {
            for row in active_for_employee(conn, kind, employee_id, hour)? {
                let label = match kind {
                    AssignmentKind::Task => load_task(conn, &row.entity_id)?.map(|t| t.title),
                    AssignmentKind::Client => load_client(conn, &row.entity_id)?.map(|c| c.name),
                };
                out.push(AssignmentDetail {
                    kind,
                    entity_id: row.entity_id,
                    label,
                    hour_slot: row.hour_slot,
                    is_temporary: row.is_temporary,
                    reassigned_from: row.reassigned_from,
                    created_at: row.created_at,
                });
            }
        }

        Ok(out)
    }

    /// Who is signed in today, earliest sign-in first (the round-robin order).
    pub fn active_employees(pool: &DbPool, clock: &dyn Clock) -> AppResult<Vec<ActiveEmployee>> {
        let conn = &pool.conn;
        let today = clock.today();

        let mut out = Vec::new();
        for id in active_employees(conn, &today)? {
            let status = load_status(conn, &id, &today)?;
            out.push(ActiveEmployee {
                full_name: load_employee(conn, &id)?.map(|e| e.full_name),
                sign_in_time: status.as_ref().and_then(|s| s.sign_in_time),
                is_late: status.as_ref().is_some_and(|s| s.is_late),
                late_by_minutes: status.as_ref().map_or(0, |s| s.late_by_minutes),
                employee_id: id,
            });
        }

        Ok(out)
    }
}
