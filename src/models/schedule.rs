use serde::Serialize;

/// What a schedule entry hands out: exactly one task or one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ScheduleTarget {
    Task(String),
    Client(String),
}

impl ScheduleTarget {
    pub fn task_id(&self) -> Option<&str> {
        match self {
            ScheduleTarget::Task(id) => Some(id),
            ScheduleTarget::Client(_) => None,
        }
    }

    pub fn client_id(&self) -> Option<&str> {
        match self {
            ScheduleTarget::Client(id) => Some(id),
            ScheduleTarget::Task(_) => None,
        }
    }
}

/// Intended ownership of a task or client for an inclusive hour window.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub hour_start: u32,
    pub hour_end: u32,
    pub target: ScheduleTarget,
    pub assigned_to: String,
    pub created_by: String,
    pub is_recurring: bool,
    pub created_at: String,
}

impl ScheduleEntry {
    pub fn covers(&self, hour: u32) -> bool {
        self.hour_start <= hour && hour <= self.hour_end
    }
}

/// Input for `ScheduleLogic::create`.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub hour_start: u32,
    pub hour_end: u32,
    pub target: ScheduleTarget,
    pub assigned_to: String,
    pub created_by: String,
    pub is_recurring: bool,
}

/// A schedule entry joined with the display names of what it references.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub entry: ScheduleEntry,
    pub task_title: Option<String>,
    pub client_name: Option<String>,
    pub assignee_name: Option<String>,
}
