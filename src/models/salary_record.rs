//! Salary record model.
//!
//! A [`SalaryRecord`] is the system of record for one employee's pay for one
//! calendar month. It embeds a snapshot of the salary structure it was computed
//! from and only ever changes through the Draft to Paid transition.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{Month, PayPeriod, SalaryStructure};

/// Lifecycle status of a salary record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalaryStatus {
    /// Generated, not yet paid. May be deleted.
    Draft,
    /// Paid. Terminal and immutable.
    Paid,
}

impl fmt::Display for SalaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalaryStatus::Draft => f.write_str("Draft"),
            SalaryStatus::Paid => f.write_str("Paid"),
        }
    }
}

/// Overtime paid on a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeDetails {
    /// Overtime hours paid.
    pub hours: Decimal,
    /// Hourly overtime rate.
    pub rate: Decimal,
    /// `hours * rate`.
    pub amount: Decimal,
}

/// One employee's finalized pay for one month.
///
/// Unique per `(employee_id, month, year)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    /// Record identity.
    pub id: Uuid,
    /// The employee paid.
    pub employee_id: String,
    /// The month paid.
    pub month: Month,
    /// The year paid.
    pub year: i32,
    /// Working days in the month.
    pub working_days: u32,
    /// Days present; a half day counts 0.5.
    pub present_days: Decimal,
    /// Salary structure as it was at generation time.
    pub salary_components: SalaryStructure,
    /// Overtime paid.
    pub overtime: OvertimeDetails,
    /// Manual deductions, in addition to PF and professional tax.
    pub deductions: Decimal,
    /// Incentives.
    pub incentives: Decimal,
    /// Sum of prorated earnings, excluding overtime and incentives.
    pub gross_salary: Decimal,
    /// Net payable.
    pub net_salary: Decimal,
    /// Lifecycle status.
    pub status: SalaryStatus,
    /// Set when the record is marked paid.
    pub payment_date: Option<NaiveDate>,
    /// Free-text remarks.
    pub remarks: Option<String>,
}

impl SalaryRecord {
    /// The period this record covers.
    pub fn period(&self) -> PayPeriod {
        PayPeriod {
            year: self.year,
            month: self.month,
        }
    }

    /// Transitions Draft to Paid, recording the payment date.
    pub fn mark_paid(&mut self, payment_date: NaiveDate) -> EngineResult<()> {
        match self.status {
            SalaryStatus::Draft => {
                self.status = SalaryStatus::Paid;
                self.payment_date = Some(payment_date);
                Ok(())
            }
            SalaryStatus::Paid => Err(EngineError::InvalidTransition {
                record_id: self.id,
                status: self.status,
                action: "mark paid".to_string(),
            }),
        }
    }

    /// Fails unless the record is still a draft.
    pub fn ensure_deletable(&self) -> EngineResult<()> {
        match self.status {
            SalaryStatus::Draft => Ok(()),
            SalaryStatus::Paid => Err(EngineError::InvalidTransition {
                record_id: self.id,
                status: self.status,
                action: "delete".to_string(),
            }),
        }
    }
}
