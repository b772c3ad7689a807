use crate::db::catalog::{load_client, load_task, require_employee};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::schedule::{delete_schedule, insert_schedule, list_schedules, load_schedule};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{NewSchedule, ScheduleEntry, ScheduleRow, ScheduleTarget};
use crate::utils::clock::Clock;
use crate::utils::date::format_datetime;

/// Admin CRUD over the schedule store.
pub struct ScheduleLogic;

impl ScheduleLogic {
    pub fn validate(s: &NewSchedule) -> AppResult<()> {
        for h in [s.hour_start, s.hour_end] {
            if h > 23 {
                return Err(AppError::InvalidHour(h as i64));
            }
        }
        if s.hour_start > s.hour_end {
            return Err(AppError::InvalidSchedule(format!(
                "hour_start {} is after hour_end {}",
                s.hour_start, s.hour_end
            )));
        }
        Ok(())
    }

    pub fn create(pool: &mut DbPool, clock: &dyn Clock, s: NewSchedule) -> AppResult<ScheduleEntry> {
        Self::validate(&s)?;

        let conn = &pool.conn;
        require_employee(conn, &s.assigned_to)?;
        require_employee(conn, &s.created_by)?;
        match &s.target {
            ScheduleTarget::Task(id) => {
                load_task(conn, id)?.ok_or_else(|| AppError::TaskNotFound(id.clone()))?;
            }
            ScheduleTarget::Client(id) => {
                load_client(conn, id)?.ok_or_else(|| AppError::ClientNotFound(id.clone()))?;
            }
        }

        let id = insert_schedule(conn, &s, &format_datetime(&clock.now()))?;
        let entry = load_schedule(conn, id)?.ok_or(AppError::ScheduleNotFound(id))?;

        let what = match &entry.target {
            ScheduleTarget::Task(t) => format!("task {}", t),
            ScheduleTarget::Client(c) => format!("client {}", c),
        };
        audit_quiet(
            conn,
            &clock.now(),
            "schedule_add",
            &format!("#{}", id),
            &format!(
                "{} → {} from {:02}:00 to {:02}:59",
                what, entry.assigned_to, entry.hour_start, entry.hour_end
            ),
        );

        Ok(entry)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<ScheduleRow>> {
        list_schedules(&pool.conn)
    }

    pub fn delete(pool: &mut DbPool, clock: &dyn Clock, id: i64) -> AppResult<()> {
        let n = delete_schedule(&pool.conn, id)?;
        if n == 0 {
            return Err(AppError::ScheduleNotFound(id));
        }
        audit_quiet(
            &pool.conn,
            &clock.now(),
            "schedule_del",
            &format!("#{}", id),
            "Schedule entry deleted",
        );
        Ok(())
    }
}
