use crate::models::assignment::AssignmentKind;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Per-employee projection of the ledger for the current hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    pub employee_id: String,
    pub full_name: Option<String>,
    pub is_signed_in: bool,
    pub is_late: bool,
    pub active_task_count: usize,
    pub active_client_count: usize,
    pub scheduled_count: usize,
    /// Ids behind `active_task_count`, ledger order.
    pub task_ids: Vec<String>,
    /// Ids behind `active_client_count`, ledger order.
    pub client_ids: Vec<String>,
}

/// One live ledger row with the name of what it points at.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentDetail {
    pub kind: AssignmentKind,
    pub entity_id: String,
    /// Task title or client name; `None` if the catalog row is gone.
    pub label: Option<String>,
    pub hour_slot: u32,
    pub is_temporary: bool,
    pub reassigned_from: Option<String>,
    pub created_at: String,
}

/// Someone currently able to receive work.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveEmployee {
    pub employee_id: String,
    pub full_name: Option<String>,
    pub sign_in_time: Option<NaiveDateTime>,
    pub is_late: bool,
    pub late_by_minutes: i64,
}
