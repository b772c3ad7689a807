//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid hour: {0} (expected 0-23)")]
    InvalidHour(i64),

    #[error("Invalid assignment kind: {0}")]
    InvalidKind(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Schedule / catalog errors
    // ---------------------------
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Schedule not found: {0}")]
    ScheduleNotFound(i64),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Duplicate id: {0}")]
    Duplicate(String),

    // ---------------------------
    // Attendance errors
    // ---------------------------
    #[error("Employee {0} has no sign-in record for {1}")]
    NotSignedIn(String, String),

    #[error("Employee {0} has no shift start; pass --scheduled HH:MM")]
    MissingShiftStart(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
