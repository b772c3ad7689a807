use crate::core::redistribute::RedistributeLogic;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::schedule::schedules_at;
use crate::db::signin::load_status;
use crate::errors::AppResult;
use crate::models::outcome::SweepReport;
use crate::utils::clock::Clock;
use chrono::{Duration, NaiveDateTime, Timelike};
use std::collections::HashSet;

/// Compares this hour's schedule with today's sign-ins and redistributes the
/// work of everyone scheduled but not signed in.
pub struct SweepLogic;

/// The next instant that is a whole multiple of `interval_minutes` past
/// midnight, strictly after `now`. An interval of 60 gives the next hour
/// boundary.
pub fn next_boundary(now: NaiveDateTime, interval_minutes: u64) -> NaiveDateTime {
    let interval = interval_minutes.clamp(1, 24 * 60) as i64;
    let midnight = now.date().and_hms_opt(0, 0, 0).unwrap_or(now);
    let elapsed = (now - midnight).num_minutes();
    let next = (elapsed / interval + 1) * interval;
    midnight + Duration::minutes(next)
}

impl SweepLogic {
    pub fn run(pool: &mut DbPool, clock: &dyn Clock) -> AppResult<SweepReport> {
        let now = clock.now();
        let hour = now.hour();
        let today = now.date();

        let entries = schedules_at(&pool.conn, hour)?;

        // Each absent employee is redistributed once per pass, however many
        // of their entries cover this hour.
        let mut seen = HashSet::new();
        let mut absent = Vec::new();
        for entry in &entries {
            if !seen.insert(entry.assigned_to.as_str()) {
                continue;
            }
            let signed_in = load_status(&pool.conn, &entry.assigned_to, &today)?
                .is_some_and(|s| s.is_signed_in);
            if !signed_in {
                absent.push(entry.assigned_to.clone());
            }
        }

        let mut report = SweepReport {
            hour,
            scheduled_entries: entries.len(),
            absent_employees: absent.clone(),
            ..Default::default()
        };

        for employee_id in absent {
            match RedistributeLogic::apply(pool, clock, &employee_id) {
                Ok(outcome) if outcome.success => report.redistributed += 1,
                Ok(outcome) => report.failed.push((employee_id, outcome.message)),
                Err(e) => {
                    audit_quiet(
                        &pool.conn,
                        &clock.now(),
                        "redistribute_error",
                        &employee_id,
                        &e.to_string(),
                    );
                    report.failed.push((employee_id, e.to_string()));
                }
            }
        }

        audit_quiet(
            &pool.conn,
            &clock.now(),
            "sweep",
            &format!("{:02}:00", hour),
            &format!(
                "{} entries, {} absent, {} redistributed, {} failed",
                report.scheduled_entries,
                report.absent_employees.len(),
                report.redistributed,
                report.failed.len()
            ),
        );

        Ok(report)
    }

    /// Operator-triggered pass; same work as the hourly one.
    pub fn manual(pool: &mut DbPool, clock: &dyn Clock) -> AppResult<SweepReport> {
        audit_quiet(
            &pool.conn,
            &clock.now(),
            "manual_sweep",
            "",
            "Manual redistribution requested",
        );
        Self::run(pool, clock)
    }
}
