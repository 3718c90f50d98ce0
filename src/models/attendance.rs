//! Attendance models.
//!
//! This module defines the per-day attendance facts supplied by the
//! time-tracking collaborator and the [`AttendanceSummary`] derived from them.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The status recorded for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AttendanceStatus {
    /// Worked a full day.
    Present,
    /// Worked half a day.
    HalfDay,
    /// Did not work.
    Absent,
    /// Company or public holiday.
    Holiday,
    /// Approved leave.
    Leave,
}

/// One calendar date of attendance for one employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AttendanceDay, AttendanceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = AttendanceDay::new(
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     AttendanceStatus::Present,
///     Decimal::from(11),
/// );
/// assert_eq!(day.overtime_hours(Decimal::from(9)), Decimal::from(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// The recorded status.
    pub status: AttendanceStatus,
    /// Hours worked on the day.
    #[serde(default)]
    pub hours_worked: Decimal,
    /// Clock-in time, if captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDateTime>,
    /// Clock-out time, if captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDateTime>,
}

impl AttendanceDay {
    /// Creates an attendance day without clock times.
    pub fn new(date: NaiveDate, status: AttendanceStatus, hours_worked: Decimal) -> Self {
        Self {
            date,
            status,
            hours_worked,
            check_in: None,
            check_out: None,
        }
    }

    /// Hours worked beyond `threshold`, or zero.
    pub fn overtime_hours(&self, threshold: Decimal) -> Decimal {
        if self.hours_worked > threshold {
            self.hours_worked - threshold
        } else {
            Decimal::ZERO
        }
    }

    /// Rejects negative hours and clock-out before clock-in.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hours_worked < Decimal::ZERO {
            return Err(EngineError::InvalidAttendance {
                date: self.date,
                message: format!("hours worked cannot be negative, got {}", self.hours_worked),
            });
        }
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out < check_in {
                return Err(EngineError::InvalidAttendance {
                    date: self.date,
                    message: "check-out is before check-in".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Summary statistics for one employee's attendance over one calendar month.
///
/// Derived on every request and never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    /// Days worked; a half day counts 0.5.
    pub present_days: Decimal,
    /// Days counted against the employee.
    pub absent_days: Decimal,
    /// Calendar days in the month.
    pub total_days: u32,
    /// Sum of hours beyond the daily overtime threshold.
    pub total_overtime_hours: Decimal,
    /// Number of days recorded as half days.
    #[serde(default)]
    pub half_days: u32,
    /// Number of days recorded as holidays.
    #[serde(default)]
    pub holiday_days: u32,
    /// Number of days recorded as leave.
    #[serde(default)]
    pub leave_days: u32,
    /// Days of the month with no attendance row at all.
    #[serde(default)]
    pub unmarked_days: u32,
    /// The classified rows, keyed by date.
    #[serde(default)]
    pub daily_stats: BTreeMap<NaiveDate, AttendanceDay>,
}

impl AttendanceSummary {
    /// A zero-valued summary for a month with no attendance rows.
    pub fn empty(total_days: u32, absent_days: Decimal) -> Self {
        Self {
            present_days: Decimal::ZERO,
            absent_days,
            total_days,
            total_overtime_hours: Decimal::ZERO,
            half_days: 0,
            holiday_days: 0,
            leave_days: 0,
            unmarked_days: total_days,
            daily_stats: BTreeMap::new(),
        }
    }

    /// Returns true if at least one attendance row was recorded.
    pub fn has_attendance(&self) -> bool {
        !self.daily_stats.is_empty()
    }
}
