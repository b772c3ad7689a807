#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveTime;
use rworkload::core::attendance::{AttendanceLogic, SignInOptions};
use rworkload::core::catalog::CatalogLogic;
use rworkload::core::schedule::ScheduleLogic;
use rworkload::db::pool::DbPool;
use rworkload::models::catalog::Role;
use rworkload::models::schedule::{NewSchedule, ScheduleTarget};
use rworkload::utils::clock::FixedClock;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DAY: &str = "2026-03-02";

pub fn rwl() -> Command {
    cargo_bin_cmd!("rworkload")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworkload.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, migrated database for library-level tests
pub fn open_pool(name: &str) -> DbPool {
    DbPool::new(&setup_test_db(name), 5000).expect("open pool")
}

/// Clock pinned to `HH:MM` on the shared test day
pub fn at(hhmm: &str) -> FixedClock {
    FixedClock::parse(&format!("{} {}", DAY, hhmm)).expect("valid test instant")
}

/// Admin `A1` plus the given employees, all with an 08:00 shift start
pub fn seed_employees(pool: &mut DbPool, ids: &[&str]) {
    let clock = at("07:00");
    let shift = NaiveTime::from_hms_opt(8, 0, 0);
    CatalogLogic::add_employee(pool, &clock, "A1", "Admin One", Role::Admin, None)
        .expect("add admin");
    for id in ids {
        CatalogLogic::add_employee(pool, &clock, id, &format!("Employee {}", id), Role::Employee, shift)
            .expect("add employee");
    }
}

pub fn schedule_task(pool: &mut DbPool, task: &str, employee: &str, from: u32, to: u32) -> i64 {
    let clock = at("07:00");
    if rworkload::db::catalog::load_task(&pool.conn, task)
        .expect("load task")
        .is_none()
    {
        CatalogLogic::add_task(pool, &clock, task, &format!("Task {}", task), None).expect("add task");
    }
    ScheduleLogic::create(
        pool,
        &clock,
        NewSchedule {
            hour_start: from,
            hour_end: to,
            target: ScheduleTarget::Task(task.to_string()),
            assigned_to: employee.to_string(),
            created_by: "A1".to_string(),
            is_recurring: true,
        },
    )
    .expect("create schedule")
    .id
}

pub fn schedule_client(pool: &mut DbPool, client: &str, employee: &str, from: u32, to: u32) -> i64 {
    let clock = at("07:00");
    if rworkload::db::catalog::load_client(&pool.conn, client)
        .expect("load client")
        .is_none()
    {
        CatalogLogic::add_client(pool, &clock, client, &format!("Client {}", client))
            .expect("add client");
    }
    ScheduleLogic::create(
        pool,
        &clock,
        NewSchedule {
            hour_start: from,
            hour_end: to,
            target: ScheduleTarget::Client(client.to_string()),
            assigned_to: employee.to_string(),
            created_by: "A1".to_string(),
            is_recurring: true,
        },
    )
    .expect("create schedule")
    .id
}

/// Sign in without the sweep hook so tests control when redistribution runs
pub fn sign_in(pool: &mut DbPool, employee: &str, hhmm: &str) {
    AttendanceLogic::sign_in(pool, &at(hhmm), employee, &SignInOptions::default())
        .expect("sign in");
}

/// Initialize a CLI database with A1, E1, E2, E3 and task T1 owned by E1 from 09 to 17
pub fn init_cli_db(db_path: &str) {
    rwl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rwl()
        .args(["--db", db_path, "employee", "add", "A1", "Admin One", "--role", "admin"])
        .assert()
        .success();

    for id in ["E1", "E2", "E3"] {
        rwl()
            .args([
                "--db",
                db_path,
                "employee",
                "add",
                id,
                &format!("Employee {}", id),
                "--shift-start",
                "09:00",
            ])
            .assert()
            .success();
    }

    rwl()
        .args(["--db", db_path, "task", "add", "T1", "Check vehicle telemetry"])
        .assert()
        .success();

    rwl()
        .args([
            "--db", db_path, "schedule", "add", "--from", "9", "--to", "17", "--task", "T1",
            "--assign", "E1", "--by", "A1",
        ])
        .assert()
        .success();
}
