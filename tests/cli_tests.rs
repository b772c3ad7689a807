use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_cli_db, rwl, setup_test_db, temp_out};

const AT_0800: &str = "2026-03-02 08:00";
const AT_0805: &str = "2026-03-02 08:05";
const AT_1000: &str = "2026-03-02 10:00";

fn sign_in_e2_e3(db_path: &str) {
    rwl()
        .args(["--db", db_path, "--at", AT_0800, "signin", "E2", "--scheduled", "08:00"])
        .assert()
        .success()
        .stdout(contains("E2 signed in at 08:00 (on time)"));

    rwl()
        .args(["--db", db_path, "--at", AT_0805, "signin", "E3", "--scheduled", "08:00"])
        .assert()
        .success()
        .stdout(contains("late by 5 minutes"));
}

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    rwl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied").and(contains("Database initialized")));

    rwl()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed."));
}

#[test]
fn test_catalog_and_schedule_listing() {
    let db_path = setup_test_db("cli_catalog");
    init_cli_db(&db_path);

    rwl()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Employee E1").and(contains("Admin One")));

    rwl()
        .args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(contains("Check vehicle telemetry"));

    rwl()
        .args(["--db", &db_path, "schedule", "list"])
        .assert()
        .success()
        .stdout(contains("09-17").and(contains("E1 (Employee E1)")));
}

#[test]
fn test_schedule_rejects_bad_hours() {
    let db_path = setup_test_db("cli_schedule_hours");
    init_cli_db(&db_path);

    rwl()
        .args([
            "--db", &db_path, "schedule", "add", "--from", "9", "--to", "25", "--task", "T1",
            "--assign", "E1", "--by", "A1",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid hour: 25"));

    rwl()
        .args([
            "--db", &db_path, "schedule", "add", "--from", "12", "--to", "10", "--task", "T1",
            "--assign", "E1", "--by", "A1",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid schedule"));
}

#[test]
fn test_schedule_del_with_yes() {
    let db_path = setup_test_db("cli_schedule_del");
    init_cli_db(&db_path);

    rwl()
        .args(["--db", &db_path, "schedule", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Schedule entry #1 has been deleted."));

    rwl()
        .args(["--db", &db_path, "schedule", "list"])
        .assert()
        .success()
        .stdout(contains("No schedule entries."));
}

#[test]
fn test_redistribute_then_restore() {
    let db_path = setup_test_db("cli_redistribute");
    init_cli_db(&db_path);
    sign_in_e2_e3(&db_path);

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "redistribute", "E1"])
        .assert()
        .success()
        .stdout(contains("Redistributed 1 tasks and 0 clients from E1 across 2 employee(s)"));

    rwl()
        .args(["--db", &db_path, "ledger", "--kind", "task", "--active"])
        .assert()
        .success()
        .stdout(contains("T1").and(contains("E2")).and(contains("active (temporary)")));

    rwl()
        .args(["--db", &db_path, "--at", "2026-03-02 10:20", "signin", "E1", "--no-hook"])
        .assert()
        .success()
        .stdout(contains("late by 80 minutes"))
        .stdout(contains("Restored 1 tasks and 0 clients to E1 (1 temporary row(s) revoked)"));

    rwl()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Ledger exclusivity holds.").and(contains("active rows in slot").not()));
}

#[test]
fn test_redistribute_without_schedule_is_noop() {
    let db_path = setup_test_db("cli_noop");
    init_cli_db(&db_path);

    rwl()
        .args(["--db", &db_path, "--at", "2026-03-02 20:00", "redistribute", "E1"])
        .assert()
        .success()
        .stdout(contains("No assignments to redistribute for E1 at 20:00"));
}

#[test]
fn test_redistribute_with_nobody_signed_in_warns() {
    let db_path = setup_test_db("cli_empty_pool");
    init_cli_db(&db_path);

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "redistribute", "E1"])
        .assert()
        .success()
        .stdout(contains("No active employees"));
}

#[test]
fn test_sweep_and_summary_json() {
    let db_path = setup_test_db("cli_sweep");
    init_cli_db(&db_path);
    sign_in_e2_e3(&db_path);

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "sweep"])
        .assert()
        .success()
        .stdout(contains("1 absent employee(s)"))
        .stdout(contains("Manual redistribution completed."));

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "summary", "--json"])
        .assert()
        .success()
        .stdout(contains("\"employee_id\": \"E2\""))
        .stdout(contains("\"active_task_count\": 1"));

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "summary"])
        .assert()
        .success()
        .stdout(contains("Workload at 2026-03-02 10:00"));
}

#[test]
fn test_watch_single_pass() {
    let db_path = setup_test_db("cli_watch");
    init_cli_db(&db_path);
    sign_in_e2_e3(&db_path);

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "watch", "--passes", "1"])
        .assert()
        .success()
        .stdout(contains("Sweep at 2026-03-02 10:00"));
}

#[test]
fn test_signout_and_attendance() {
    let db_path = setup_test_db("cli_attendance");
    init_cli_db(&db_path);
    sign_in_e2_e3(&db_path);

    rwl()
        .args(["--db", &db_path, "--at", "2026-03-02 12:00", "signout", "E2", "--no-hook"])
        .assert()
        .success()
        .stdout(contains("E2 signed out at 12:00"));

    rwl()
        .args(["--db", &db_path, "--at", "2026-03-02 12:30", "attendance"])
        .assert()
        .success()
        .stdout(contains("E3").and(contains("5 min")).and(contains("12:00")));

    rwl()
        .args(["--db", &db_path, "--at", "2026-03-02 12:30", "signout", "E1"])
        .assert()
        .failure()
        .stderr(contains("has no sign-in record"));
}

#[test]
fn test_ledger_csv_export() {
    let db_path = setup_test_db("cli_ledger_csv");
    let out = temp_out("cli_ledger_csv", "csv");
    init_cli_db(&db_path);
    sign_in_e2_e3(&db_path);

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "redistribute", "E1"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "ledger", "--csv", &out])
        .assert()
        .success()
        .stdout(contains("Exported 1 ledger rows"));

    let content = fs::read_to_string(&out).expect("csv written");
    assert!(content.starts_with("id,kind,entity_id,employee_id,hour_slot"));
    assert!(content.contains("task,T1,E2,10,true,E1,true"));
}

#[test]
fn test_ledger_rejects_unknown_kind() {
    let db_path = setup_test_db("cli_ledger_kind");
    init_cli_db(&db_path);

    rwl()
        .args(["--db", &db_path, "ledger", "--kind", "vehicle"])
        .assert()
        .failure()
        .stderr(contains("Invalid assignment kind: vehicle"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_cli_db(&db_path);
    sign_in_e2_e3(&db_path);

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "redistribute", "E1"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("schedule_add").and(contains("signin")).and(contains("redistribute")));
}

#[test]
fn test_summary_json_parses_on_fresh_database() {
    let db_path = setup_test_db("cli_summary_fresh");

    // first command against the file: migrations run silently
    let out = rwl()
        .args(["--db", &db_path, "--at", AT_1000, "summary", "--json"])
        .output()
        .expect("run summary");
    assert!(out.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(parsed, serde_json::json!([]));

    let db_path = setup_test_db("cli_migrate_report");
    rwl()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migration applied: 20260302_0002_ledger_deactivated_at"));

    rwl()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Schema already up to date.").and(contains("Migration applied").not()));
}

#[test]
fn test_assignments_views() {
    let db_path = setup_test_db("cli_assignments");
    init_cli_db(&db_path);
    sign_in_e2_e3(&db_path);

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "redistribute", "E1"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "assignments", "E2"])
        .assert()
        .success()
        .stdout(contains("T1").and(contains("Check vehicle telemetry")).and(contains("E1")));

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "assignments", "E1"])
        .assert()
        .success()
        .stdout(contains("E1 holds no live assignments."));

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "assignments", "E2", "--json"])
        .assert()
        .success()
        .stdout(contains("\"entity_id\": \"T1\"").and(contains("\"reassigned_from\": \"E1\"")));

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "assignments"])
        .assert()
        .success()
        .stdout(contains("Employee E2").and(contains("Employee E3")).and(contains("5 min")));

    rwl()
        .args(["--db", &db_path, "--at", AT_1000, "summary", "--detail"])
        .assert()
        .success()
        .stdout(contains("TASK IDS").and(contains("T1")));

    rwl()
        .args(["--db", &db_path, "assignments", "ghost"])
        .assert()
        .failure();
}
