use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::redistribute::RedistributeLogic;
use crate::core::restore::RestoreLogic;
use crate::core::sweep::{SweepLogic, next_boundary};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::outcome::SweepReport;
use crate::ui::messages::{header, info, outcome, success, warning};
use crate::utils::clock::Clock;

fn print_sweep(report: &SweepReport) {
    info(format!(
        "Hour {:02}:00: {} scheduled entries, {} absent employee(s)",
        report.hour,
        report.scheduled_entries,
        report.absent_employees.len()
    ));
    if report.redistributed > 0 {
        success(format!(
            "Redistributed the workload of {} employee(s): {}",
            report.redistributed,
            report
                .absent_employees
                .iter()
                .filter(|e| !report.failed.iter().any(|(f, _)| f == *e))
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    for (employee, reason) in &report.failed {
        warning(format!("{}: {}", employee, reason));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database, cfg.busy_timeout_ms)?;

    match cmd {
        Commands::Redistribute { employee } => {
            let out = RedistributeLogic::apply(&mut pool, clock, employee)?;
            outcome(out.success, &out.message);
        }

        Commands::Restore { employee } => {
            let out = RestoreLogic::apply(&mut pool, clock, employee)?;
            outcome(out.success, &out.message);
        }

        Commands::Sweep => {
            let report = SweepLogic::manual(&mut pool, clock)?;
            print_sweep(&report);
            success("Manual redistribution completed.");
        }

        Commands::Watch { passes } => {
            let mut done = 0usize;
            loop {
                header(format!("Sweep at {}", clock.now().format("%Y-%m-%d %H:%M")));
                match SweepLogic::run(&mut pool, clock) {
                    Ok(report) => print_sweep(&report),
                    Err(e) => warning(format!("Sweep failed: {}", e)),
                }

                done += 1;
                if passes.is_some_and(|max| done >= max) {
                    break;
                }

                let now = clock.now();
                let next = next_boundary(now, cfg.sweep_interval_minutes);
                info(format!("Next sweep at {}", next.format("%H:%M")));
                let wait = (next - now).to_std().unwrap_or_default();
                std::thread::sleep(wait);
            }
        }

        _ => {}
    }

    Ok(())
}
