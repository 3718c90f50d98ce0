//! Input types for the payroll workflow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Month, PayrollAdjustments};

/// A request to generate one employee's salary record for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// The employee to pay.
    pub employee_id: String,
    /// The month to pay.
    pub month: Month,
    /// The year to pay.
    pub year: i32,
    /// Approved overtime hours; omitted means the aggregated figure.
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
    /// Incentives.
    #[serde(default)]
    pub incentives: Decimal,
    /// Manual deductions.
    #[serde(default)]
    pub deductions: Decimal,
    /// Explicit working days, replacing the configured convention.
    #[serde(default)]
    pub working_days: Option<u32>,
    /// Free-text remarks stored on the record.
    #[serde(default)]
    pub remarks: Option<String>,
}

impl GenerationRequest {
    /// Creates a request with no adjustments.
    pub fn new(employee_id: impl Into<String>, month: Month, year: i32) -> Self {
        Self {
            employee_id: employee_id.into(),
            month,
            year,
            overtime_hours: None,
            incentives: Decimal::ZERO,
            deductions: Decimal::ZERO,
            working_days: None,
            remarks: None,
        }
    }

    /// The manual adjustments carried by this request.
    pub fn adjustments(&self) -> PayrollAdjustments {
        PayrollAdjustments {
            overtime_hours: self.overtime_hours,
            incentives: self.incentives,
            deductions: self.deductions,
        }
    }
}
