use crate::cli::parser::{Commands, ScheduleAction};
use crate::config::Config;
use crate::core::schedule::ScheduleLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{NewSchedule, ScheduleTarget};
use crate::ui::messages::{info, success, warning};
use crate::utils::clock::Clock;
use crate::utils::table::Table;
use crate::utils::time::check_hour;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Schedule { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database, cfg.busy_timeout_ms)?;

    match action {
        ScheduleAction::Add {
            from,
            to,
            task,
            client,
            assign,
            by,
            once,
        } => {
            let target = match (task, client) {
                (Some(t), None) => ScheduleTarget::Task(t.clone()),
                (None, Some(c)) => ScheduleTarget::Client(c.clone()),
                _ => {
                    return Err(AppError::InvalidSchedule(
                        "give exactly one of --task or --client".into(),
                    ));
                }
            };

            let entry = ScheduleLogic::create(
                &mut pool,
                clock,
                NewSchedule {
                    hour_start: check_hour(*from)?,
                    hour_end: check_hour(*to)?,
                    target,
                    assigned_to: assign.clone(),
                    created_by: by.clone(),
                    is_recurring: !*once,
                },
            )?;

            success(format!(
                "Schedule #{} created: {:02}:00-{:02}:59 → {}",
                entry.id, entry.hour_start, entry.hour_end, entry.assigned_to
            ));
        }

        ScheduleAction::List => {
            let rows = ScheduleLogic::list(&pool)?;
            if rows.is_empty() {
                info("No schedule entries.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "HOURS", "KIND", "ITEM", "ASSIGNED TO", "RECURRING"]);
            for r in rows {
                let (kind, item) = match &r.entry.target {
                    ScheduleTarget::Task(id) => (
                        "task",
                        format!("{} {}", id, r.task_title.as_deref().unwrap_or("")),
                    ),
                    ScheduleTarget::Client(id) => (
                        "client",
                        format!("{} {}", id, r.client_name.as_deref().unwrap_or("")),
                    ),
                };
                let assignee = match &r.assignee_name {
                    Some(name) => format!("{} ({})", r.entry.assigned_to, name),
                    None => r.entry.assigned_to.clone(),
                };
                table.add_row(vec![
                    r.entry.id.to_string(),
                    format!("{:02}-{:02}", r.entry.hour_start, r.entry.hour_end),
                    kind.to_string(),
                    item.trim_end().to_string(),
                    assignee,
                    if r.entry.is_recurring { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        ScheduleAction::Del { id, yes } => {
            if !*yes
                && !ask_confirmation(&format!(
                    "Delete schedule entry #{}? This action is irreversible.",
                    id
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            ScheduleLogic::delete(&mut pool, clock, *id)?;
            success(format!("Schedule entry #{} has been deleted.", id));
        }
    }

    Ok(())
}
