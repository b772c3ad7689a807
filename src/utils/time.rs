//! Time utilities: parsing HH:MM, lateness, hour slots.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, NaiveTime};

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn format_time(t: &NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Whole minutes between the scheduled time on the sign-in day and the
/// sign-in instant; early or on-time sign-ins count as zero.
pub fn late_minutes(signed_in_at: NaiveDateTime, scheduled: NaiveTime) -> i64 {
    let expected = signed_in_at.date().and_time(scheduled);
    let diff = signed_in_at - expected;
    if diff.num_milliseconds() > 0 {
        diff.num_minutes()
    } else {
        0
    }
}

/// Validate an hour of day for schedule windows and ledger slots.
pub fn check_hour(hour: i64) -> AppResult<u32> {
    if (0..=23).contains(&hour) {
        Ok(hour as u32)
    } else {
        Err(AppError::InvalidHour(hour))
    }
}
