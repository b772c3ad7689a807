use crate::core::restore::RestoreLogic;
use crate::core::sweep::SweepLogic;
use crate::db::catalog::require_employee;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::signin::{
    attendance_for_date, close_attendance, load_attendance, mark_signed_out, open_attendance,
    upsert_sign_in,
};
use crate::errors::{AppError, AppResult};
use crate::models::outcome::{RestorationOutcome, SweepReport};
use crate::models::signin::{Attendance, AttendanceStatus, SignInStatus};
use crate::ui::messages::warning;
use crate::utils::clock::Clock;
use crate::utils::date::format_date;
use crate::utils::time::{late_minutes, parse_time};
use chrono::NaiveTime;

#[derive(Debug, Clone, Default)]
pub struct SignInOptions {
    /// Explicit expected sign-in time; wins over the employee's shift start.
    pub scheduled: Option<NaiveTime>,
    /// Used when neither `scheduled` nor a shift start is known.
    pub fallback_scheduled: Option<NaiveTime>,
    /// Trigger the redistribution hook after the write.
    pub run_hook: bool,
}

#[derive(Debug, Clone)]
pub struct SignInReport {
    pub employee_id: String,
    pub scheduled: NaiveTime,
    pub late_by_minutes: i64,
    pub status: AttendanceStatus,
    pub restoration: RestorationOutcome,
    /// `None` when the hook was disabled or failed.
    pub hook: Option<SweepReport>,
}

#[derive(Debug, Clone)]
pub struct SignOutReport {
    pub employee_id: String,
    pub hook: Option<SweepReport>,
}

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Record a sign-in, give the employee their workload back, then run the
    /// redistribution hook.
    pub fn sign_in(
        pool: &mut DbPool,
        clock: &dyn Clock,
        employee_id: &str,
        opts: &SignInOptions,
    ) -> AppResult<SignInReport> {
        let emp = require_employee(&pool.conn, employee_id)?;
        let now = clock.now();
        let today = now.date();

        let shift_start = emp.shift_start.as_deref().and_then(parse_time);
        let scheduled = opts
            .scheduled
            .or(shift_start)
            .or(opts.fallback_scheduled)
            .ok_or_else(|| AppError::MissingShiftStart(employee_id.to_string()))?;

        // Lateness is decided by the first sign-in of the day.
        let late_by_minutes = match load_attendance(&pool.conn, employee_id, &today)? {
            Some(existing) => existing.late_by_minutes,
            None => late_minutes(now, scheduled),
        };
        let status = AttendanceStatus::from_late_minutes(late_by_minutes);

        pool.with_immediate_tx(|tx| {
            open_attendance(tx, employee_id, &now, &scheduled, late_by_minutes)?;
            upsert_sign_in(
                tx,
                &SignInStatus {
                    employee_id: employee_id.to_string(),
                    date: today,
                    is_signed_in: true,
                    sign_in_time: Some(now),
                    sign_out_time: None,
                    expected_sign_in: scheduled,
                    is_late: late_by_minutes > 0,
                    late_by_minutes,
                },
                &now,
            )
        })?;

        audit_quiet(
            &pool.conn,
            &clock.now(),
            "signin",
            employee_id,
            &format!(
                "Signed in at {} ({}, {} min late)",
                now.format("%H:%M"),
                status.to_db_str(),
                late_by_minutes
            ),
        );

        let restoration = RestoreLogic::apply(pool, clock, employee_id)?;

        let hook = if opts.run_hook {
            Self::redistribution_hook(pool, clock, employee_id)
        } else {
            None
        };

        Ok(SignInReport {
            employee_id: employee_id.to_string(),
            scheduled,
            late_by_minutes,
            status,
            restoration,
            hook,
        })
    }

    pub fn sign_out(
        pool: &mut DbPool,
        clock: &dyn Clock,
        employee_id: &str,
        run_hook: bool,
    ) -> AppResult<SignOutReport> {
        require_employee(&pool.conn, employee_id)?;
        let now = clock.now();

        pool.with_immediate_tx(|tx| {
            if mark_signed_out(tx, employee_id, &now.date(), &now)? == 0 {
                return Err(AppError::NotSignedIn(
                    employee_id.to_string(),
                    format_date(&now.date()),
                ));
            }
            close_attendance(tx, employee_id, &now)?;
            Ok(())
        })?;

        audit_quiet(
            &pool.conn,
            &clock.now(),
            "signout",
            employee_id,
            &format!("Signed out at {}", now.format("%H:%M")),
        );

        let hook = if run_hook {
            Self::redistribution_hook(pool, clock, employee_id)
        } else {
            None
        };

        Ok(SignOutReport {
            employee_id: employee_id.to_string(),
            hook,
        })
    }

    pub fn today(pool: &DbPool, clock: &dyn Clock) -> AppResult<Vec<Attendance>> {
        attendance_for_date(&pool.conn, &clock.today())
    }

    /// Best effort: the attendance write already succeeded, so a failing
    /// sweep is only reported.
    fn redistribution_hook(
        pool: &mut DbPool,
        clock: &dyn Clock,
        trigger: &str,
    ) -> Option<SweepReport> {
        match SweepLogic::run(pool, clock) {
            Ok(report) => Some(report),
            Err(e) => {
                warning(format!("Redistribution hook failed: {}", e));
                audit_quiet(&pool.conn, &clock.now(), "hook_failed", trigger, &e.to_string());
                None
            }
        }
    }
}
