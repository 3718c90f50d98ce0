//! Salary computation.
//!
//! This module turns a salary structure, an attendance summary and the
//! approver's manual adjustments into a [`SalaryComputation`]. The computation
//! is pure: it reads nothing but its arguments and persists nothing, so it can
//! back a live preview and reproduce a stored record exactly.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceSummary, AuditStep, PayrollAdjustments, SalaryComputation, SalaryStructure,
};

use super::overtime::{OvertimeSource, calculate_overtime};
use super::proration::prorate_structure;

/// Rounds a monetary amount to a whole currency unit, halves away from zero.
pub fn round_to_currency_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes earnings, deductions and net salary.
///
/// # Steps
///
/// 1. Prorate basic, HRA, conveyance, medical and special allowance by
///    `present_days / proration_base_days`.
/// 2. Sum the earned components into the gross.
/// 3. Pay overtime at `(basic / base) / standard_workday_hours`; the manual
///    override, when given, replaces the aggregated hours.
/// 4. Deduct PF, professional tax and manual deductions.
/// 5. Round `gross + overtime + incentives - deductions` to a whole unit.
///
/// # Errors
///
/// Returns `InvalidInput` for negative structure components, negative
/// adjustments, negative present days, invalid rules, or amounts too large
/// for `Decimal` arithmetic.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_salary;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{AttendanceSummary, PayrollAdjustments, SalaryStructure};
/// use rust_decimal::Decimal;
///
/// let structure = SalaryStructure {
///     basic: Decimal::from(20000),
///     hra: Decimal::from(8000),
///     conveyance: Decimal::from(1600),
///     medical: Decimal::from(1250),
///     special_allowance: Decimal::ZERO,
///     pf: Decimal::from(1800),
///     professional_tax: Decimal::from(200),
/// };
/// let mut summary = AttendanceSummary::empty(30, Decimal::ZERO);
/// summary.present_days = Decimal::from(30);
///
/// let result = compute_salary(
///     &structure,
///     &summary,
///     &PayrollAdjustments::default(),
///     &PayrollRules::default(),
/// ).unwrap();
///
/// assert_eq!(result.gross_earned, Decimal::from(30850));
/// assert_eq!(result.net_salary, Decimal::from(28850));
/// ```
pub fn compute_salary(
    structure: &SalaryStructure,
    summary: &AttendanceSummary,
    adjustments: &PayrollAdjustments,
    rules: &PayrollRules,
) -> EngineResult<SalaryComputation> {
    rules.validate()?;
    structure.validate()?;
    adjustments.validate()?;
    if summary.present_days < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "presentDays".to_string(),
            message: format!("cannot be negative, got {}", summary.present_days),
        });
    }

    let mut audit_steps: Vec<AuditStep> = Vec::with_capacity(5);
    let mut step_number: u32 = 1;

    let proration = prorate_structure(structure, summary.present_days, rules, step_number)?;
    audit_steps.push(proration.audit_step);
    step_number += 1;

    let earned = proration.earned;
    let gross_earned = earned.total()?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "gross_earnings".to_string(),
        rule_name: "Gross Earnings".to_string(),
        input: serde_json::json!({
            "basic": earned.basic.normalize().to_string(),
            "hra": earned.hra.normalize().to_string(),
            "conveyance": earned.conveyance.normalize().to_string(),
            "medical": earned.medical.normalize().to_string(),
            "special_allowance": earned.special_allowance.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_earned": gross_earned.normalize().to_string()
        }),
        reasoning: "Gross is the sum of the prorated earning components".to_string(),
    });
    step_number += 1;

    let (overtime_hours, source) = match adjustments.overtime_hours {
        Some(hours) => (hours, OvertimeSource::ManualOverride),
        None => (summary.total_overtime_hours, OvertimeSource::Attendance),
    };
    let overtime =
        calculate_overtime(structure.basic, overtime_hours, source, rules, step_number)?;
    audit_steps.push(overtime.audit_step);
    step_number += 1;

    let total_deductions = structure
        .statutory_deductions()?
        .checked_add(adjustments.deductions)
        .ok_or_else(|| EngineError::overflow("deductions"))?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Deductions".to_string(),
        input: serde_json::json!({
            "pf": structure.pf.normalize().to_string(),
            "professional_tax": structure.professional_tax.normalize().to_string(),
            "manual_deductions": adjustments.deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.normalize().to_string()
        }),
        reasoning: format!(
            "PF {} + professional tax {} + manual {}",
            structure.pf.normalize(),
            structure.professional_tax.normalize(),
            adjustments.deductions.normalize()
        ),
    });
    step_number += 1;

    let unrounded = gross_earned
        .checked_add(overtime.details.amount)
        .and_then(|sum| sum.checked_add(adjustments.incentives))
        .and_then(|sum| sum.checked_sub(total_deductions))
        .ok_or_else(|| EngineError::overflow("netSalary"))?;
    let net_salary = round_to_currency_unit(unrounded);
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_earned": gross_earned.normalize().to_string(),
            "overtime_amount": overtime.details.amount.normalize().to_string(),
            "incentives": adjustments.incentives.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "unrounded": unrounded.normalize().to_string(),
            "net_salary": net_salary.to_string()
        }),
        reasoning: format!(
            "Net {} rounded to {}",
            unrounded.round_dp(4).normalize(),
            net_salary
        ),
    });

    Ok(SalaryComputation {
        prorate_factor: proration.factor,
        earned,
        gross_earned,
        overtime: overtime.details,
        incentives: adjustments.incentives,
        pf: structure.pf,
        professional_tax: structure.professional_tax,
        manual_deductions: adjustments.deductions,
        total_deductions,
        net_salary,
        audit_steps,
    })
}
