//! Salary computation models.
//!
//! This module contains the [`SalaryComputation`] type and its associated structures
//! that capture every output of a payroll computation: prorated earnings, overtime,
//! deductions, the rounded net figure, and an audit trail of the steps taken.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::OvertimeDetails;

/// A single step in the computation audit trail.
///
/// Each step records which rule was applied, its inputs and outputs,
/// and a human-readable explanation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "proration".to_string(),
///     rule_name: "Attendance Proration".to_string(),
///     input: serde_json::json!({"present_days": "15", "base_days": "30"}),
///     output: serde_json::json!({"factor": "0.5"}),
///     reasoning: "15 present days over a 30 day base".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number in the computation.
    pub step_number: u32,
    /// The unique identifier for the rule applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input values used in this step.
    pub input: serde_json::Value,
    /// The output values produced by this step.
    pub output: serde_json::Value,
    /// A human-readable explanation of the step.
    pub reasoning: String,
}

/// Manual adjustments entered by the approver before generation.
///
/// `overtime_hours` overrides the automatically aggregated overtime when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayrollAdjustments {
    /// Approved overtime hours; `None` uses the aggregated figure.
    pub overtime_hours: Option<Decimal>,
    /// Incentives added after gross.
    pub incentives: Decimal,
    /// Deductions in addition to PF and professional tax.
    pub deductions: Decimal,
}

impl PayrollAdjustments {
    /// Rejects negative overtime, incentives or deductions.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("overtimeHours", self.overtime_hours.unwrap_or_default()),
            ("incentives", self.incentives),
            ("deductions", self.deductions),
        ];

        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("cannot be negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// The five earning components after proration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedComponents {
    /// Earned basic pay.
    pub basic: Decimal,
    /// Earned house rent allowance.
    pub hra: Decimal,
    /// Earned conveyance allowance.
    pub conveyance: Decimal,
    /// Earned medical allowance.
    pub medical: Decimal,
    /// Earned special allowance.
    pub special_allowance: Decimal,
}

impl EarnedComponents {
    /// Sum of all earned components.
    pub fn total(&self) -> EngineResult<Decimal> {
        [self.hra, self.conveyance, self.medical, self.special_allowance]
            .into_iter()
            .try_fold(self.basic, |sum, amount| sum.checked_add(amount))
            .ok_or_else(|| EngineError::overflow("grossEarned"))
    }
}

/// The complete, non-persisted result of a payroll computation.
///
/// Identical inputs always produce an identical `SalaryComputation`,
/// including its audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryComputation {
    /// `presentDays / prorationBaseDays`.
    pub prorate_factor: Decimal,
    /// Earning components scaled by the prorate factor.
    pub earned: EarnedComponents,
    /// Sum of the earned components.
    pub gross_earned: Decimal,
    /// Overtime hours, hourly rate and amount.
    pub overtime: OvertimeDetails,
    /// Incentives added after gross.
    pub incentives: Decimal,
    /// Provident fund deducted.
    pub pf: Decimal,
    /// Professional tax deducted.
    pub professional_tax: Decimal,
    /// Manual deductions.
    pub manual_deductions: Decimal,
    /// PF plus professional tax plus manual deductions.
    pub total_deductions: Decimal,
    /// Net payable, rounded to a whole currency unit.
    pub net_salary: Decimal,
    /// Ordered trail of the rules applied.
    pub audit_steps: Vec<AuditStep>,
}
