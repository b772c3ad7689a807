use crate::db::catalog::{insert_client, insert_employee, insert_task};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::catalog::{Client, Employee, Role, Task, TaskStatus};
use crate::utils::clock::Clock;
use crate::utils::date::format_datetime;
use crate::utils::time::format_time;
use chrono::NaiveTime;

pub struct CatalogLogic;

impl CatalogLogic {
    pub fn add_employee(
        pool: &mut DbPool,
        clock: &dyn Clock,
        id: &str,
        full_name: &str,
        role: Role,
        shift_start: Option<NaiveTime>,
    ) -> AppResult<Employee> {
        let emp = Employee {
            id: id.to_string(),
            full_name: full_name.to_string(),
            role,
            shift_start: shift_start.as_ref().map(format_time),
            created_at: format_datetime(&clock.now()),
        };
        insert_employee(&pool.conn, &emp)?;
        audit_quiet(&pool.conn, &clock.now(), "employee_add", id, full_name);
        Ok(emp)
    }

    pub fn add_task(
        pool: &mut DbPool,
        clock: &dyn Clock,
        id: &str,
        title: &str,
        assigned_to: Option<&str>,
    ) -> AppResult<Task> {
        if let Some(owner) = assigned_to {
            crate::db::catalog::require_employee(&pool.conn, owner)?;
        }
        let task = Task {
            id: id.to_string(),
            title: title.to_string(),
            assigned_to: assigned_to.map(str::to_string),
            status: TaskStatus::Pending,
            created_at: format_datetime(&clock.now()),
        };
        insert_task(&pool.conn, &task)?;
        audit_quiet(&pool.conn, &clock.now(), "task_add", id, title);
        Ok(task)
    }

    pub fn add_client(pool: &mut DbPool, clock: &dyn Clock, id: &str, name: &str) -> AppResult<Client> {
        let client = Client {
            id: id.to_string(),
            name: name.to_string(),
            created_at: format_datetime(&clock.now()),
        };
        insert_client(&pool.conn, &client)?;
        audit_quiet(&pool.conn, &clock.now(), "client_add", id, name);
        Ok(client)
    }
}
