use crate::db::catalog::set_task_assignee;
use crate::db::ledger::{activate, deactivate_owned};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::schedule::schedules_for_employee_at;
use crate::db::signin::active_employees;
use crate::errors::AppResult;
use crate::models::assignment::{AssignmentKind, NewAssignment};
use crate::models::outcome::RedistributionOutcome;
use crate::models::schedule::{ScheduleEntry, ScheduleTarget};
use crate::utils::clock::Clock;
use chrono::Timelike;
use rusqlite::Connection;

/// Hands an absent employee's current-hour workload to the active employees.
pub struct RedistributeLogic;

/// Pair each item with `targets[i % targets.len()]`.
///
/// Every target ends up with `floor(M/N)` or `ceil(M/N)` items and the
/// result only depends on the order of both slices. Empty `targets` yields
/// an empty plan.
pub fn round_robin<'a, T>(items: &'a [T], targets: &'a [String]) -> Vec<(&'a T, &'a str)> {
    if targets.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (item, targets[i % targets.len()].as_str()))
        .collect()
}

/// Split schedule entries into task ids and client ids, keeping schedule order.
///
/// Overlapping windows can list the same item twice; each id is kept once,
/// at its first position.
pub fn partition_targets(entries: &[ScheduleEntry]) -> (Vec<String>, Vec<String>) {
    let mut tasks: Vec<String> = Vec::new();
    let mut clients: Vec<String> = Vec::new();
    for e in entries {
        let (list, id) = match &e.target {
            ScheduleTarget::Task(id) => (&mut tasks, id),
            ScheduleTarget::Client(id) => (&mut clients, id),
        };
        if !list.contains(id) {
            list.push(id.clone());
        }
    }
    (tasks, clients)
}

impl RedistributeLogic {
    /// Redistribute inside one immediate transaction and audit the result.
    pub fn apply(
        pool: &mut DbPool,
        clock: &dyn Clock,
        absent_employee_id: &str,
    ) -> AppResult<RedistributionOutcome> {
        let outcome = pool.with_immediate_tx(|tx| Self::apply_in(tx, clock, absent_employee_id))?;

        let is_noop = outcome.success
            && outcome.redistributed_tasks == 0
            && outcome.redistributed_clients == 0;
        if !is_noop {
            let op = if outcome.success {
                "redistribute"
            } else {
                "redistribute_failed"
            };
            audit_quiet(&pool.conn, &clock.now(), op, absent_employee_id, &outcome.message);
        }

        Ok(outcome)
    }

    /// The redistribution sequence against an open connection or transaction.
    pub fn apply_in(
        conn: &Connection,
        clock: &dyn Clock,
        absent_employee_id: &str,
    ) -> AppResult<RedistributionOutcome> {
        let now = clock.now();
        let hour = now.hour();

        //
        // 1. What did the absent employee own this hour?
        //
        let entries = schedules_for_employee_at(conn, absent_employee_id, hour)?;
        if entries.is_empty() {
            return Ok(RedistributionOutcome::noop(format!(
                "No assignments to redistribute for {} at {:02}:00",
                absent_employee_id, hour
            )));
        }

        //
        // 2. Who can take it?
        //
        let targets: Vec<String> = active_employees(conn, &now.date())?
            .into_iter()
            .filter(|e| e != absent_employee_id)
            .collect();

        //
        // 3. The absent employee stops owning anything in this slot
        //
        for kind in AssignmentKind::ALL {
            deactivate_owned(conn, kind, absent_employee_id, hour, &now)?;
        }

        if targets.is_empty() {
            return Ok(RedistributionOutcome::failed(format!(
                "No active employees to redistribute {}'s {} item(s) to; workload left unassigned",
                absent_employee_id,
                entries.len()
            )));
        }

        //
        // 4. Round-robin, tasks and clients each starting from index 0
        //
        let (tasks, clients) = partition_targets(&entries);

        for (task_id, target) in round_robin(&tasks, &targets) {
            activate(
                conn,
                &NewAssignment {
                    kind: AssignmentKind::Task,
                    entity_id: task_id,
                    employee_id: target,
                    hour_slot: hour,
                    reassigned_from: Some(absent_employee_id),
                    is_temporary: true,
                },
                &now,
            )?;
            set_task_assignee(conn, task_id, target)?;
        }

        for (client_id, target) in round_robin(&clients, &targets) {
            activate(
                conn,
                &NewAssignment {
                    kind: AssignmentKind::Client,
                    entity_id: client_id,
                    employee_id: target,
                    hour_slot: hour,
                    reassigned_from: Some(absent_employee_id),
                    is_temporary: true,
                },
                &now,
            )?;
        }

        Ok(RedistributionOutcome {
            success: true,
            message: format!(
                "Redistributed {} tasks and {} clients from {} across {} employee(s)",
                tasks.len(),
                clients.len(),
                absent_employee_id,
                targets.len()
            ),
            redistributed_tasks: tasks.len(),
            redistributed_clients: clients.len(),
            target_count: targets.len(),
        })
    }
}
