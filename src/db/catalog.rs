use crate::errors::{AppError, AppResult};
use crate::models::catalog::{Client, Employee, Role, Task, TaskStatus};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(AppError::Other(msg)),
    )
}

fn map_employee(row: &Row) -> Result<Employee> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str)
        .ok_or_else(|| conversion_error(format!("Invalid role: {}", role_str)))?;

    Ok(Employee {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        role,
        shift_start: row.get("shift_start")?,
        created_at: row.get("created_at")?,
    })
}

fn map_task(row: &Row) -> Result<Task> {
    let status_str: String = row.get("status")?;
    let status = TaskStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(format!("Invalid task status: {}", status_str)))?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        assigned_to: row.get("assigned_to")?,
        status,
        created_at: row.get("created_at")?,
    })
}

fn map_client(row: &Row) -> Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub fn insert_employee(conn: &Connection, emp: &Employee) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employees (id, full_name, role, shift_start, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            emp.id,
            emp.full_name,
            emp.role.to_db_str(),
            emp.shift_start,
            emp.created_at
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Duplicate(format!("employee {}", emp.id))
        } else {
            AppError::Db(e)
        }
    })?;
    Ok(())
}

pub fn load_employee(conn: &Connection, id: &str) -> AppResult<Option<Employee>> {
    let emp = conn
        .query_row("SELECT * FROM employees WHERE id = ?1", [id], map_employee)
        .optional()?;
    Ok(emp)
}

pub fn require_employee(conn: &Connection, id: &str) -> AppResult<Employee> {
    load_employee(conn, id)?.ok_or_else(|| AppError::EmployeeNotFound(id.to_string()))
}

pub fn list_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_task(conn: &Connection, task: &Task) -> AppResult<()> {
    conn.execute(
        "INSERT INTO tasks (id, title, assigned_to, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            task.id,
            task.title,
            task.assigned_to,
            task.status.to_db_str(),
            task.created_at
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Duplicate(format!("task {}", task.id))
        } else {
            AppError::Db(e)
        }
    })?;
    Ok(())
}

pub fn load_task(conn: &Connection, id: &str) -> AppResult<Option<Task>> {
    let task = conn
        .query_row("SELECT * FROM tasks WHERE id = ?1", [id], map_task)
        .optional()?;
    Ok(task)
}

pub fn list_tasks(conn: &Connection) -> AppResult<Vec<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_task)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Update the canonical owner of a task.
pub fn set_task_assignee(conn: &Connection, task_id: &str, employee_id: &str) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE tasks SET assigned_to = ?1 WHERE id = ?2",
        params![employee_id, task_id],
    )?;
    if changed == 0 {
        return Err(AppError::TaskNotFound(task_id.to_string()));
    }
    Ok(())
}

pub fn insert_client(conn: &Connection, client: &Client) -> AppResult<()> {
    conn.execute(
        "INSERT INTO clients (id, name, created_at) VALUES (?1, ?2, ?3)",
        params![client.id, client.name, client.created_at],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Duplicate(format!("client {}", client.id))
        } else {
            AppError::Db(e)
        }
    })?;
    Ok(())
}

pub fn load_client(conn: &Connection, id: &str) -> AppResult<Option<Client>> {
    let client = conn
        .query_row("SELECT * FROM clients WHERE id = ?1", [id], map_client)
        .optional()?;
    Ok(client)
}

pub fn list_clients(conn: &Connection) -> AppResult<Vec<Client>> {
    let mut stmt = conn.prepare("SELECT * FROM clients ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_client)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
