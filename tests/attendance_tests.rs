use chrono::NaiveTime;
use rworkload::core::attendance::{AttendanceLogic, SignInOptions};
use rworkload::core::catalog::CatalogLogic;
use rworkload::db::ledger::active_for_slot;
use rworkload::db::signin::{active_employees, load_status};
use rworkload::errors::AppError;
use rworkload::models::assignment::AssignmentKind;
use rworkload::models::catalog::Role;
use rworkload::models::signin::AttendanceStatus;
use rworkload::utils::clock::Clock;
use rworkload::utils::time::late_minutes;

mod common;
use common::{at, open_pool, schedule_task, seed_employees, sign_in};

fn nine() -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(9, 0, 0)
}

#[test]
fn test_late_minutes_counts_whole_minutes() {
    let scheduled = NaiveTime::from_hms_opt(9, 0, 0).expect("time");
    assert_eq!(late_minutes(at("09:15").0, scheduled), 15);
    assert_eq!(late_minutes(at("08:55").0, scheduled), 0);
    assert_eq!(late_minutes(at("09:00").0, scheduled), 0);

    let partial = at("09:15").0 + chrono::Duration::seconds(40);
    assert_eq!(late_minutes(partial, scheduled), 15);
}

#[test]
fn test_sign_in_late_and_on_time() {
    let mut pool = open_pool("attendance_lateness");
    let clock = at("07:00");
    CatalogLogic::add_employee(&mut pool, &clock, "E1", "Late Lara", Role::Employee, nine())
        .expect("add");
    CatalogLogic::add_employee(&mut pool, &clock, "E2", "Early Eddie", Role::Employee, nine())
        .expect("add");

    let late = AttendanceLogic::sign_in(&mut pool, &at("09:15"), "E1", &SignInOptions::default())
        .expect("sign in");
    assert_eq!(late.late_by_minutes, 15);
    assert_eq!(late.status, AttendanceStatus::Late);

    let early = AttendanceLogic::sign_in(&mut pool, &at("08:55"), "E2", &SignInOptions::default())
        .expect("sign in");
    assert_eq!(early.late_by_minutes, 0);
    assert_eq!(early.status, AttendanceStatus::Present);

    let status = load_status(&pool.conn, "E1", &at("09:15").today())
        .expect("status")
        .expect("row exists");
    assert!(status.is_signed_in);
    assert!(status.is_late);
    assert_eq!(status.late_by_minutes, 15);
}

#[test]
fn test_explicit_scheduled_time_overrides_shift_start() {
    let mut pool = open_pool("attendance_override");
    CatalogLogic::add_employee(&mut pool, &at("07:00"), "E1", "Ann", Role::Employee, nine())
        .expect("add");

    let opts = SignInOptions {
        scheduled: NaiveTime::from_hms_opt(9, 30, 0),
        ..Default::default()
    };
    let r = AttendanceLogic::sign_in(&mut pool, &at("09:20"), "E1", &opts).expect("sign in");
    assert_eq!(r.late_by_minutes, 0);
}

#[test]
fn test_missing_shift_start_is_an_error() {
    let mut pool = open_pool("attendance_no_shift");
    CatalogLogic::add_employee(&mut pool, &at("07:00"), "E1", "Ann", Role::Employee, None)
        .expect("add");

    let err = AttendanceLogic::sign_in(&mut pool, &at("09:00"), "E1", &SignInOptions::default())
        .unwrap_err();
    assert!(matches!(err, AppError::MissingShiftStart(_)));

    let opts = SignInOptions {
        fallback_scheduled: nine(),
        ..Default::default()
    };
    let r = AttendanceLogic::sign_in(&mut pool, &at("09:05"), "E1", &opts).expect("fallback");
    assert_eq!(r.late_by_minutes, 5);
}

#[test]
fn test_second_sign_in_keeps_first_lateness() {
    let mut pool = open_pool("attendance_resign");
    seed_employees(&mut pool, &["E1"]);

    sign_in(&mut pool, "E1", "08:20");
    AttendanceLogic::sign_out(&mut pool, &at("12:00"), "E1", false).expect("sign out");
    let again = AttendanceLogic::sign_in(&mut pool, &at("13:00"), "E1", &SignInOptions::default())
        .expect("sign in again");

    assert_eq!(again.late_by_minutes, 20);
    let rows = AttendanceLogic::today(&pool, &at("13:00")).expect("attendance");
    assert_eq!(rows.len(), 1);
    assert!(rows[0].sign_out_time.is_none());
}

#[test]
fn test_sign_out_requires_sign_in() {
    let mut pool = open_pool("attendance_signout_missing");
    seed_employees(&mut pool, &["E1"]);

    let err = AttendanceLogic::sign_out(&mut pool, &at("12:00"), "E1", false).unwrap_err();
    assert!(matches!(err, AppError::NotSignedIn(_, _)));
}

#[test]
fn test_unknown_employee_is_rejected() {
    let mut pool = open_pool("attendance_unknown");
    let err = AttendanceLogic::sign_in(&mut pool, &at("09:00"), "ghost", &SignInOptions::default())
        .unwrap_err();
    assert!(matches!(err, AppError::EmployeeNotFound(_)));
}

#[test]
fn test_signed_out_employee_leaves_active_set() {
    let mut pool = open_pool("attendance_active_set");
    seed_employees(&mut pool, &["E1", "E2"]);
    sign_in(&mut pool, "E2", "08:10");
    sign_in(&mut pool, "E1", "08:00");

    let day = at("09:00").today();
    assert_eq!(active_employees(&pool.conn, &day).expect("active"), vec!["E1", "E2"]);

    AttendanceLogic::sign_out(&mut pool, &at("09:00"), "E1", false).expect("sign out");
    assert_eq!(active_employees(&pool.conn, &day).expect("active"), vec!["E2"]);
}

#[test]
fn test_sign_in_restores_and_hook_redistributes_others() {
    let mut pool = open_pool("attendance_hook");
    seed_employees(&mut pool, &["E1", "E2"]);
    schedule_task(&mut pool, "T1", "E1", 9, 17);
    schedule_task(&mut pool, "T2", "E2", 9, 17);

    // E2 arrives at 10 while E1 is still missing: E2 gets T2 back and the
    // hook hands E1's T1 over to E2
    let opts = SignInOptions {
        run_hook: true,
        ..Default::default()
    };
    let r = AttendanceLogic::sign_in(&mut pool, &at("10:00"), "E2", &opts).expect("sign in");
    assert_eq!(r.restoration.restored_tasks, 1);

    let hook = r.hook.expect("hook ran");
    assert_eq!(hook.absent_employees, vec!["E1"]);
    assert_eq!(hook.redistributed, 1);

    let t1 = active_for_slot(&pool.conn, AssignmentKind::Task, "T1", 10).expect("t1");
    assert_eq!(t1[0].employee_id, "E2");
    let t2 = active_for_slot(&pool.conn, AssignmentKind::Task, "T2", 10).expect("t2");
    assert_eq!(t2[0].employee_id, "E2");
    assert!(!t2[0].is_temporary);
}

#[test]
fn test_failing_hook_does_not_undo_attendance() {
    let mut pool = open_pool("attendance_hook_failure");
    seed_employees(&mut pool, &["E1", "E2"]);
    schedule_task(&mut pool, "T1", "E1", 9, 17);
    sign_in(&mut pool, "E1", "08:00");

    // an unreadable status row makes the sweep fail on E1
    pool.conn
        .execute(
            "UPDATE employee_signin_status SET expected_sign_in = 'bad' WHERE employee_id = 'E1'",
            [],
        )
        .expect("corrupt row");

    let opts = SignInOptions {
        run_hook: true,
        ..Default::default()
    };
    let r = AttendanceLogic::sign_in(&mut pool, &at("10:00"), "E2", &opts).expect("sign in");
    assert!(r.hook.is_none());

    let day = at("10:00").today();
    let status = load_status(&pool.conn, "E2", &day).expect("status").expect("row");
    assert!(status.is_signed_in);

    let out = AttendanceLogic::sign_out(&mut pool, &at("11:00"), "E2", true).expect("sign out");
    assert!(out.hook.is_none());
    let status = load_status(&pool.conn, "E2", &day).expect("status").expect("row");
    assert!(!status.is_signed_in);

    let failures = rworkload::db::log::load_log(&pool.conn)
        .expect("log")
        .into_iter()
        .filter(|e| e.operation == "hook_failed")
        .count();
    assert_eq!(failures, 2);
}
