use chrono::NaiveDateTime;
use rworkload::core::attendance::AttendanceLogic;
use rworkload::core::summary::SummaryLogic;
use rworkload::core::sweep::{SweepLogic, next_boundary};
use rworkload::db::ledger::active_for_slot;
use rworkload::db::log::load_log;
use rworkload::models::assignment::AssignmentKind;
use rworkload::utils::date::parse_datetime;

mod common;
use common::{at, open_pool, schedule_client, schedule_task, seed_employees, sign_in};

fn dt(s: &str) -> NaiveDateTime {
    parse_datetime(s).expect("valid datetime")
}

#[test]
fn test_next_boundary() {
    assert_eq!(next_boundary(dt("2026-03-02 10:17"), 60), dt("2026-03-02 11:00"));
    assert_eq!(next_boundary(dt("2026-03-02 10:00"), 60), dt("2026-03-02 11:00"));
    assert_eq!(next_boundary(dt("2026-03-02 23:30"), 60), dt("2026-03-03 00:00"));
    assert_eq!(next_boundary(dt("2026-03-02 10:15"), 15), dt("2026-03-02 10:30"));
}

#[test]
fn test_sweep_redistributes_each_absent_employee_once() {
    let mut pool = open_pool("sweep_absent");
    seed_employees(&mut pool, &["E1", "E2", "E3"]);
    schedule_task(&mut pool, "T1", "E1", 9, 17);
    schedule_task(&mut pool, "T2", "E1", 10, 11);
    schedule_client(&mut pool, "C1", "E2", 9, 17);
    sign_in(&mut pool, "E2", "08:00");
    sign_in(&mut pool, "E3", "08:05");

    let report = SweepLogic::run(&mut pool, &at("10:00")).expect("sweep");
    assert_eq!(report.hour, 10);
    assert_eq!(report.scheduled_entries, 3);
    assert_eq!(report.absent_employees, vec!["E1"]);
    assert_eq!(report.redistributed, 1);
    assert!(report.failed.is_empty());

    let t1 = active_for_slot(&pool.conn, AssignmentKind::Task, "T1", 10).expect("t1");
    let t2 = active_for_slot(&pool.conn, AssignmentKind::Task, "T2", 10).expect("t2");
    assert_eq!(t1[0].employee_id, "E2");
    assert_eq!(t2[0].employee_id, "E3");

    // E2 is signed in, so C1 is not touched
    assert!(active_for_slot(&pool.conn, AssignmentKind::Client, "C1", 10).expect("c1").is_empty());
}

#[test]
fn test_sweep_treats_signed_out_as_absent() {
    let mut pool = open_pool("sweep_signed_out");
    seed_employees(&mut pool, &["E1", "E2"]);
    schedule_task(&mut pool, "T1", "E1", 9, 17);
    sign_in(&mut pool, "E1", "08:00");
    sign_in(&mut pool, "E2", "08:00");
    AttendanceLogic::sign_out(&mut pool, &at("13:40"), "E1", false).expect("sign out");

    let report = SweepLogic::run(&mut pool, &at("14:00")).expect("sweep");
    assert_eq!(report.absent_employees, vec!["E1"]);

    let t1 = active_for_slot(&pool.conn, AssignmentKind::Task, "T1", 14).expect("t1");
    assert_eq!(t1.len(), 1);
    assert_eq!(t1[0].employee_id, "E2");
}

#[test]
fn test_sweep_reports_failures_and_keeps_going() {
    let mut pool = open_pool("sweep_nobody");
    seed_employees(&mut pool, &["E1", "E2"]);
    schedule_task(&mut pool, "T1", "E1", 9, 17);
    schedule_task(&mut pool, "T2", "E2", 9, 17);

    let report = SweepLogic::manual(&mut pool, &at("09:30")).expect("sweep");
    assert_eq!(report.absent_employees.len(), 2);
    assert_eq!(report.redistributed, 0);
    assert_eq!(report.failed.len(), 2);

    let ops: Vec<String> = load_log(&pool.conn)
        .expect("log")
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert!(ops.iter().any(|o| o == "manual_sweep"));
    assert!(ops.iter().any(|o| o == "sweep"));
}

#[test]
fn test_summary_counts_current_hour() {
    let mut pool = open_pool("summary_hour");
    seed_employees(&mut pool, &["E1", "E2"]);
    schedule_task(&mut pool, "T1", "E1", 9, 17);
    schedule_task(&mut pool, "T2", "E2", 9, 17);
    schedule_client(&mut pool, "C1", "E2", 10, 10);

    sign_in(&mut pool, "E2", "08:30");
    sign_in(&mut pool, "E1", "08:40");
    AttendanceLogic::sign_out(&mut pool, &at("09:50"), "E1", false).expect("sign out");
    SweepLogic::run(&mut pool, &at("10:00")).expect("sweep");
    // E2 restores their own 10:00 schedule
    rworkload::core::restore::RestoreLogic::apply(&mut pool, &at("10:01"), "E2").expect("restore");

    let rows = SummaryLogic::build(&pool, &at("10:05")).expect("summary");
    assert_eq!(rows.len(), 2);

    let e1 = rows.iter().find(|r| r.employee_id == "E1").expect("E1 row");
    assert!(!e1.is_signed_in);
    assert!(e1.is_late);
    assert_eq!(e1.active_task_count, 0);
    assert_eq!(e1.scheduled_count, 1);

    let e2 = rows.iter().find(|r| r.employee_id == "E2").expect("E2 row");
    assert!(e2.is_signed_in);
    assert_eq!(e2.full_name.as_deref(), Some("Employee E2"));
    assert_eq!(e2.active_task_count, 2);
    assert_eq!(e2.active_client_count, 1);
    assert_eq!(e2.scheduled_count, 2);
}

#[test]
fn test_summary_lists_ids_behind_counts() {
    let mut pool = open_pool("summary_ids");
    seed_employees(&mut pool, &["E1", "E2"]);
    schedule_task(&mut pool, "T1", "E1", 9, 17);
    schedule_task(&mut pool, "T2", "E1", 9, 17);
    schedule_client(&mut pool, "C1", "E1", 9, 17);
    sign_in(&mut pool, "E2", "08:00");

    SweepLogic::run(&mut pool, &at("10:00")).expect("sweep");

    let rows = SummaryLogic::build(&pool, &at("10:10")).expect("summary");
    let e2 = rows.iter().find(|r| r.employee_id == "E2").expect("E2 row");
    assert_eq!(e2.task_ids, vec!["T1", "T2"]);
    assert_eq!(e2.client_ids, vec!["C1"]);
    assert_eq!(e2.active_task_count, 2);
}

#[test]
fn test_assignments_detail_and_active_employees() {
    let mut pool = open_pool("summary_assignments");
    seed_employees(&mut pool, &["E1", "E2", "E3"]);
    schedule_task(&mut pool, "T1", "E1", 9, 17);
    schedule_client(&mut pool, "C1", "E1", 9, 17);
    schedule_task(&mut pool, "T2", "E2", 11, 11);
    sign_in(&mut pool, "E3", "08:00");
    sign_in(&mut pool, "E2", "08:30");

    SweepLogic::run(&mut pool, &at("10:00")).expect("sweep");
    rworkload::core::restore::RestoreLogic::apply(&mut pool, &at("11:00"), "E2").expect("restore");

    // at 10 E3 heads the rotation and gets both of E1's items
    let now = SummaryLogic::assignments(&pool, &at("10:30"), "E3", false).expect("detail");
    assert_eq!(now.len(), 2);
    assert_eq!(now[0].kind, AssignmentKind::Task);
    assert_eq!(now[0].label.as_deref(), Some("Task T1"));
    assert_eq!(now[0].reassigned_from.as_deref(), Some("E1"));
    assert!(now[0].is_temporary);
    assert_eq!(now[1].kind, AssignmentKind::Client);
    assert_eq!(now[1].label.as_deref(), Some("Client C1"));

    // E2's own 11:00 task only shows when every slot is included
    assert!(SummaryLogic::assignments(&pool, &at("10:30"), "E2", false).expect("detail").is_empty());
    let all = SummaryLogic::assignments(&pool, &at("10:30"), "E2", true).expect("detail");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].hour_slot, 11);
    assert!(!all[0].is_temporary);

    assert!(SummaryLogic::assignments(&pool, &at("10:30"), "ghost", true).is_err());

    let active = SummaryLogic::active_employees(&pool, &at("10:30")).expect("active");
    let ids: Vec<&str> = active.iter().map(|a| a.employee_id.as_str()).collect();
    assert_eq!(ids, vec!["E3", "E2"]);
    assert_eq!(active[1].full_name.as_deref(), Some("Employee E2"));
    assert_eq!(active[1].late_by_minutes, 30);
}
