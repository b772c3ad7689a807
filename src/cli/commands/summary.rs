use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::SummaryLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::clock::Clock;
use crate::utils::colors::{MAGENTA, RESET, color_for_presence, colorize_optional};
use crate::utils::table::Table;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let s = serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.to_string()))?;
    println!("{}", s);
    Ok(())
}

/// `summary` and `assignments`: read-only views of who holds what.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database, cfg.busy_timeout_ms)?;

    match cmd {
        Commands::Summary { json, detail } => {
            let rows = SummaryLogic::build(&pool, clock)?;
            if *json {
                return print_json(&rows);
            }

            if rows.is_empty() {
                info(format!("Nobody has signed in on {}", clock.today()));
                return Ok(());
            }

            let mut headers = vec!["EMPLOYEE", "NAME", "STATE", "TASKS", "CLIENTS", "SCHEDULED"];
            if *detail {
                headers.extend(["TASK IDS", "CLIENT IDS"]);
            }
            let mut table = Table::new(headers);
            for r in rows {
                let state = match (r.is_signed_in, r.is_late) {
                    (true, false) => "signed in",
                    (true, true) => "signed in (late)",
                    (false, _) => "signed out",
                };
                let mut row = vec![
                    r.employee_id,
                    r.full_name.unwrap_or_default(),
                    format!("{}{}{}", color_for_presence(r.is_signed_in, r.is_late), state, RESET),
                    r.active_task_count.to_string(),
                    r.active_client_count.to_string(),
                    r.scheduled_count.to_string(),
                ];
                if *detail {
                    row.push(colorize_optional(&or_dash(r.task_ids.join(","))));
                    row.push(colorize_optional(&or_dash(r.client_ids.join(","))));
                }
                table.add_row(row);
            }

            println!("Workload at {}:00\n", clock.now().format("%Y-%m-%d %H"));
            print!("{}", table.render());
        }

        Commands::Assignments {
            employee: Some(employee),
            all_hours,
            json,
        } => {
            let rows = SummaryLogic::assignments(&pool, clock, employee, *all_hours)?;
            if *json {
                return print_json(&rows);
            }

            if rows.is_empty() {
                info(format!("{} holds no live assignments.", employee));
                return Ok(());
            }

            let mut table = Table::new(["KIND", "ID", "NAME", "SLOT", "FROM", "SINCE"]);
            for r in rows {
                let from = match &r.reassigned_from {
                    Some(owner) if r.is_temporary => format!("{MAGENTA}{owner}{RESET}"),
                    _ => colorize_optional("-"),
                };
                table.add_row(vec![
                    r.kind.as_str().to_string(),
                    r.entity_id,
                    r.label.unwrap_or_default(),
                    format!("{:02}", r.hour_slot),
                    from,
                    r.created_at,
                ]);
            }
            print!("{}", table.render());
        }

        Commands::Assignments {
            employee: None,
            json,
            ..
        } => {
            let rows = SummaryLogic::active_employees(&pool, clock)?;
            if *json {
                return print_json(&rows);
            }

            if rows.is_empty() {
                info(format!("Nobody is signed in on {}", clock.today()));
                return Ok(());
            }

            let mut table = Table::new(["#", "EMPLOYEE", "NAME", "SIGNED IN", "LATE"]);
            for (i, r) in rows.into_iter().enumerate() {
                table.add_row(vec![
                    (i + 1).to_string(),
                    r.employee_id,
                    r.full_name.unwrap_or_default(),
                    r.sign_in_time
                        .map(|t| t.format("%H:%M").to_string())
                        .unwrap_or_else(|| "-".into()),
                    format!(
                        "{}{} min{}",
                        color_for_presence(true, r.is_late),
                        r.late_by_minutes,
                        RESET
                    ),
                ]);
            }
            print!("{}", table.render());
        }

        _ => {}
    }

    Ok(())
}

fn or_dash(s: String) -> String {
    if s.is_empty() { "-".into() } else { s }
}
