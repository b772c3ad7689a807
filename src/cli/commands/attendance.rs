use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::{AttendanceLogic, SignInOptions};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::outcome::SweepReport;
use crate::models::signin::AttendanceStatus;
use crate::ui::messages::{info, outcome, success, warning};
use crate::utils::clock::Clock;
use crate::utils::colors::{GREEN, RESET, YELLOW};
use crate::utils::table::Table;
use crate::utils::time::{format_time, parse_optional_time, parse_time};

fn print_hook(report: &Option<SweepReport>) {
    if let Some(r) = report
        && !r.absent_employees.is_empty()
    {
        info(format!(
            "Sweep {:02}:00: {} absent, {} redistributed, {} failed",
            r.hour,
            r.absent_employees.len(),
            r.redistributed,
            r.failed.len()
        ));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database, cfg.busy_timeout_ms)?;

    match cmd {
        Commands::Signin {
            employee,
            scheduled,
            no_hook,
        } => {
            let fallback = match &cfg.default_scheduled_time {
                Some(s) => Some(parse_time(s).ok_or_else(|| AppError::InvalidTime(s.clone()))?),
                None => None,
            };
            let opts = SignInOptions {
                scheduled: parse_optional_time(scheduled.as_ref())?,
                fallback_scheduled: fallback,
                run_hook: cfg.hook_on_attendance && !*no_hook,
            };

            let report = AttendanceLogic::sign_in(&mut pool, clock, employee, &opts)?;

            let at = clock.now().format("%H:%M");
            match report.status {
                AttendanceStatus::Late => warning(format!(
                    "{} signed in at {} (late by {} minutes, expected {})",
                    employee,
                    at,
                    report.late_by_minutes,
                    format_time(&report.scheduled)
                )),
                AttendanceStatus::Present => {
                    success(format!("{} signed in at {} (on time)", employee, at))
                }
            }
            outcome(report.restoration.success, &report.restoration.message);
            print_hook(&report.hook);
        }

        Commands::Signout { employee, no_hook } => {
            let run_hook = cfg.hook_on_attendance && !*no_hook;
            let report = AttendanceLogic::sign_out(&mut pool, clock, employee, run_hook)?;
            success(format!(
                "{} signed out at {}",
                report.employee_id,
                clock.now().format("%H:%M")
            ));
            print_hook(&report.hook);
        }

        Commands::Attendance => {
            let rows = AttendanceLogic::today(&pool, clock)?;
            if rows.is_empty() {
                info(format!("No attendance for {}", clock.today()));
                return Ok(());
            }

            let mut table = Table::new(["EMPLOYEE", "NAME", "IN", "OUT", "EXPECTED", "STATUS", "LATE"]);
            for a in rows {
                let status = match a.status {
                    AttendanceStatus::Present => format!("{GREEN}present{RESET}"),
                    AttendanceStatus::Late => format!("{YELLOW}late{RESET}"),
                };
                table.add_row(vec![
                    a.employee_id,
                    a.full_name.unwrap_or_default(),
                    a.sign_in_time.format("%H:%M").to_string(),
                    a.sign_out_time
                        .map(|t| t.format("%H:%M").to_string())
                        .unwrap_or_else(|| "-".into()),
                    format_time(&a.scheduled_time),
                    status,
                    format!("{} min", a.late_by_minutes),
                ]);
            }
            print!("{}", table.render());
        }

        _ => {}
    }

    Ok(())
}
