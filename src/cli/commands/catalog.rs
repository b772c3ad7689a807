use crate::cli::parser::{ClientAction, Commands, EmployeeAction, TaskAction};
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::db::catalog::{list_clients, list_employees, list_tasks};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::catalog::Role;
use crate::ui::messages::{info, success};
use crate::utils::clock::Clock;
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;
use crate::utils::time::parse_optional_time;

/// Employees, tasks and clients.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database, cfg.busy_timeout_ms)?;

    match cmd {
        Commands::Employee { action } => match action {
            EmployeeAction::Add {
                id,
                name,
                role,
                shift_start,
            } => {
                let role = Role::from_db_str(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;
                let shift = parse_optional_time(shift_start.as_ref())?;
                CatalogLogic::add_employee(&mut pool, clock, id, name, role, shift)?;
                success(format!("Employee {} ({}) added.", id, name));
            }
            EmployeeAction::List => {
                let employees = list_employees(&pool.conn)?;
                if employees.is_empty() {
                    info("No employees.");
                    return Ok(());
                }
                let mut table = Table::new(["ID", "NAME", "ROLE", "SHIFT"]);
                for e in employees {
                    table.add_row(vec![
                        e.id,
                        e.full_name,
                        e.role.to_db_str().to_string(),
                        colorize_optional(e.shift_start.as_deref().unwrap_or("-")),
                    ]);
                }
                print!("{}", table.render());
            }
        },

        Commands::Task { action } => match action {
            TaskAction::Add {
                id,
                title,
                assigned_to,
            } => {
                CatalogLogic::add_task(&mut pool, clock, id, title, assigned_to.as_deref())?;
                success(format!("Task {} added.", id));
            }
            TaskAction::List => {
                let tasks = list_tasks(&pool.conn)?;
                if tasks.is_empty() {
                    info("No tasks.");
                    return Ok(());
                }
                let mut table = Table::new(["ID", "TITLE", "ASSIGNED TO", "STATUS"]);
                for t in tasks {
                    table.add_row(vec![
                        t.id,
                        t.title,
                        colorize_optional(t.assigned_to.as_deref().unwrap_or("-")),
                        t.status.to_db_str().to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
        },

        Commands::Client { action } => match action {
            ClientAction::Add { id, name } => {
                CatalogLogic::add_client(&mut pool, clock, id, name)?;
                success(format!("Client {} added.", id));
            }
            ClientAction::List => {
                let clients = list_clients(&pool.conn)?;
                if clients.is_empty() {
                    info("No clients.");
                    return Ok(());
                }
                let mut table = Table::new(["ID", "NAME"]);
                for c in clients {
                    table.add_row(vec![c.id, c.name]);
                }
                print!("{}", table.render());
            }
        },

        _ => {}
    }

    Ok(())
}
