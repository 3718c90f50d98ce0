//! Request types for the Payroll Engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceSummary, PayrollAdjustments, SalaryStructure};

/// Request body for `POST /payroll/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    /// The salary structure to compute from.
    pub structure: SalaryStructure,
    /// The attendance summary to compute from.
    pub summary: AttendanceSummary,
    /// Approved overtime hours; omitted means `summary.totalOvertimeHours`.
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
    /// Incentives.
    #[serde(default)]
    pub incentives: Decimal,
    /// Manual deductions.
    #[serde(default)]
    pub deductions: Decimal,
}

impl PreviewRequest {
    /// The manual adjustments carried by this request.
    pub fn adjustments(&self) -> PayrollAdjustments {
        PayrollAdjustments {
            overtime_hours: self.overtime_hours,
            incentives: self.incentives,
            deductions: self.deductions,
        }
    }
}

/// Request body for `POST /payroll/records/:record_id/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    /// The date the salary was paid.
    pub payment_date: NaiveDate,
}

/// Query string for `GET /payroll/records`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsQuery {
    /// Month name, abbreviation or number.
    pub month: Option<String>,
    /// Calendar year.
    pub year: Option<i32>,
    /// Restricts the listing to one employee across all periods.
    pub employee_id: Option<String>,
}
