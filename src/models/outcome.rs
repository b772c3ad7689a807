use serde::Serialize;

/// Result of redistributing an absent employee's current-hour workload.
///
/// `success == false` is a business condition (nobody to hand work to),
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedistributionOutcome {
    pub success: bool,
    pub message: String,
    pub redistributed_tasks: usize,
    pub redistributed_clients: usize,
    pub target_count: usize,
}

impl RedistributionOutcome {
    pub fn noop(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Result of giving a signed-in employee their scheduled workload back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestorationOutcome {
    pub success: bool,
    pub message: String,
    pub restored_tasks: usize,
    pub restored_clients: usize,
    /// Temporary rows revoked on this employee's behalf.
    pub revoked: usize,
}

/// What one sweep pass did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    pub hour: u32,
    pub scheduled_entries: usize,
    pub absent_employees: Vec<String>,
    pub redistributed: usize,
    pub failed: Vec<(String, String)>,
}
