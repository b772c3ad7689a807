use crate::core::redistribute::partition_targets;
use crate::db::catalog::set_task_assignee;
use crate::db::ledger::{activate, deactivate_temporary_from};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::schedule::schedules_for_employee_at;
use crate::errors::AppResult;
use crate::models::assignment::{AssignmentKind, NewAssignment};
use crate::models::outcome::RestorationOutcome;
use crate::utils::clock::Clock;
use chrono::Timelike;
use rusqlite::Connection;

/// Gives a signed-in employee their scheduled workload back.
///
/// Runs on every sign-in, late or not, so stale temporary rows never survive
/// the owner's return.
pub struct RestoreLogic;

impl RestoreLogic {
    pub fn apply(
        pool: &mut DbPool,
        clock: &dyn Clock,
        employee_id: &str,
    ) -> AppResult<RestorationOutcome> {
        let outcome = pool.with_immediate_tx(|tx| Self::apply_in(tx, clock, employee_id))?;

        if outcome.revoked > 0 || outcome.restored_tasks > 0 || outcome.restored_clients > 0 {
            audit_quiet(&pool.conn, &clock.now(), "restore", employee_id, &outcome.message);
        }

        Ok(outcome)
    }

    pub fn apply_in(
        conn: &Connection,
        clock: &dyn Clock,
        employee_id: &str,
    ) -> AppResult<RestorationOutcome> {
        let now = clock.now();
        let hour = now.hour();

        //
        // 1. Revoke exactly the temporary rows created on this employee's behalf
        //
        let mut revoked = 0;
        for kind in AssignmentKind::ALL {
            revoked += deactivate_temporary_from(conn, kind, employee_id, &now)?;
        }

        //
        // 2. Current-hour schedule
        //
        let entries = schedules_for_employee_at(conn, employee_id, hour)?;
        if entries.is_empty() {
            return Ok(RestorationOutcome {
                success: true,
                message: format!(
                    "No scheduled assignments to restore for {} at {:02}:00 ({} temporary row(s) revoked)",
                    employee_id, hour, revoked
                ),
                revoked,
                ..Default::default()
            });
        }

        //
        // 3. Reinstate ownership
        //
        let (tasks, clients) = partition_targets(&entries);
        let items = tasks
            .iter()
            .map(|id| (AssignmentKind::Task, id))
            .chain(clients.iter().map(|id| (AssignmentKind::Client, id)));

        for (kind, entity_id) in items {
            activate(
                conn,
                &NewAssignment {
                    kind,
                    entity_id,
                    employee_id,
                    hour_slot: hour,
                    reassigned_from: None,
                    is_temporary: false,
                },
                &now,
            )?;

            if kind == AssignmentKind::Task {
                set_task_assignee(conn, entity_id, employee_id)?;
            }
        }

        let restored_tasks = tasks.len();
        let restored_clients = clients.len();

        Ok(RestorationOutcome {
            success: true,
            message: format!(
                "Restored {} tasks and {} clients to {} ({} temporary row(s) revoked)",
                restored_tasks, restored_clients, employee_id, revoked
            ),
            restored_tasks,
            restored_clients,
            revoked,
        })
    }
}
