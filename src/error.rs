//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during attendance aggregation,
//! salary computation, and the salary record lifecycle.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Month, SalaryStatus};

/// The main error type for the Payroll Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The referenced employee has no salary structure.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee that was looked up.
        employee_id: String,
    },

    /// A salary record already exists for the requested period.
    #[error(
        "Salary for employee '{employee_id}' for {month} {year} was already generated (record {existing_record_id})"
    )]
    DuplicateGeneration {
        /// The employee the generation was requested for.
        employee_id: String,
        /// The requested month.
        month: Month,
        /// The requested year.
        year: i32,
        /// Identity of the record that already covers the period.
        existing_record_id: Uuid,
    },

    /// An illegal status change was attempted on a salary record.
    #[error("Cannot {action} salary record {record_id} with status {status}")]
    InvalidTransition {
        /// The record the transition was attempted on.
        record_id: Uuid,
        /// The record's current status.
        status: SalaryStatus,
        /// The attempted action (e.g. "mark paid", "delete").
        action: String,
    },

    /// No salary record exists with the given identity.
    #[error("Salary record not found: {record_id}")]
    RecordNotFound {
        /// The record identity that was looked up.
        record_id: Uuid,
    },

    /// The underlying storage failed. Nothing was committed.
    #[error("Persistence error: {message}")]
    Persistence {
        /// A description of the storage failure.
        message: String,
    },

    /// An attendance row supplied by the time-tracking source was invalid.
    #[error("Invalid attendance on {date}: {message}")]
    InvalidAttendance {
        /// The date of the offending row.
        date: NaiveDate,
        /// A description of what made the row invalid.
        message: String,
    },

    /// A caller-supplied value was invalid.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns true if retrying the same request may succeed.
    ///
    /// Only storage failures are retryable: they never leave a partial record behind.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::Persistence { .. })
    }

    /// An `InvalidInput` for a value too large for decimal arithmetic.
    pub fn overflow(field: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: "value is too large to compute".to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
