use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
}

impl AttendanceStatus {
    pub fn from_late_minutes(late_by_minutes: i64) -> Self {
        if late_by_minutes > 0 {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "late" => Some(AttendanceStatus::Late),
            _ => None,
        }
    }
}

/// Per employee, per day: whether they are signed in right now.
#[derive(Debug, Clone, Serialize)]
pub struct SignInStatus {
    pub employee_id: String,
    pub date: NaiveDate,
    pub is_signed_in: bool,
    pub sign_in_time: Option<NaiveDateTime>,
    pub sign_out_time: Option<NaiveDateTime>,
    pub expected_sign_in: NaiveTime,
    pub is_late: bool,
    pub late_by_minutes: i64,
}

/// Attendance register row, one per employee per day.
#[derive(Debug, Clone, Serialize)]
pub struct Attendance {
    pub id: i64,
    pub employee_id: String,
    pub full_name: Option<String>,
    pub date: NaiveDate,
    pub sign_in_time: NaiveDateTime,
    pub sign_out_time: Option<NaiveDateTime>,
    pub scheduled_time: NaiveTime,
    pub late_by_minutes: i64,
    pub status: AttendanceStatus,
}
