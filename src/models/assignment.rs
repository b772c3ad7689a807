use serde::Serialize;

/// The two realtime ledgers. They share one lifecycle; only the table and
/// the entity column differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    Task,
    Client,
}

impl AssignmentKind {
    pub const ALL: [AssignmentKind; 2] = [AssignmentKind::Task, AssignmentKind::Client];

    pub fn table(&self) -> &'static str {
        match self {
            AssignmentKind::Task => "task_assignments_realtime",
            AssignmentKind::Client => "client_assignments_realtime",
        }
    }

    pub fn entity_column(&self) -> &'static str {
        match self {
            AssignmentKind::Task => "task_id",
            AssignmentKind::Client => "client_id",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentKind::Task => "task",
            AssignmentKind::Client => "client",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "task" | "tasks" | "t" => Some(AssignmentKind::Task),
            "client" | "clients" | "c" => Some(AssignmentKind::Client),
            _ => None,
        }
    }
}

/// One row of a realtime ledger: who actually owns an entity in an hour slot.
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeAssignment {
    pub id: i64,
    pub kind: AssignmentKind,
    pub entity_id: String,
    pub employee_id: String,
    pub hour_slot: u32,
    pub is_active: bool,
    pub reassigned_from: Option<String>,
    pub is_temporary: bool,
    pub created_at: String,
    pub deactivated_at: Option<String>,
}

/// Values for a ledger row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewAssignment<'a> {
    pub kind: AssignmentKind,
    pub entity_id: &'a str,
    pub employee_id: &'a str,
    pub hour_slot: u32,
    pub reassigned_from: Option<&'a str>,
    pub is_temporary: bool,
}
