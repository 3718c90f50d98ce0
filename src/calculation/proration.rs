//! Attendance proration of fixed salary components.
//!
//! Every earning component is scaled by `presentDays / prorationBaseDays`.
//! The base is fixed (30 by default) regardless of the month's actual length,
//! so a day is worth the same in February as in March.

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EarnedComponents, SalaryStructure};

/// The result of prorating a salary structure, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProrationResult {
    /// `present_days / proration_base_days`.
    pub factor: Decimal,
    /// The prorated earning components.
    pub earned: EarnedComponents,
    /// The audit step recording the proration.
    pub audit_step: AuditStep,
}

/// Prorates each earning component by attendance.
///
/// Each component is computed as `amount * present_days / base` so that no
/// intermediate factor is truncated; nothing is rounded here.
///
/// # Errors
///
/// Returns `InvalidInput` naming the component whose prorated amount does
/// not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::prorate_structure;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::SalaryStructure;
/// use rust_decimal::Decimal;
///
/// let structure = SalaryStructure { basic: Decimal::from(30000), ..Default::default() };
/// let result = prorate_structure(&structure, Decimal::from(15), &PayrollRules::default(), 1).unwrap();
///
/// assert_eq!(result.earned.basic, Decimal::from(15000));
/// ```
pub fn prorate_structure(
    structure: &SalaryStructure,
    present_days: Decimal,
    rules: &PayrollRules,
    step_number: u32,
) -> EngineResult<ProrationResult> {
    let base = rules.proration_base_days;
    let prorate = |field: &str, amount: Decimal| {
        amount
            .checked_mul(present_days)
            .and_then(|scaled| scaled.checked_div(base))
            .ok_or_else(|| EngineError::overflow(format!("salaryStructure.{}", field)))
    };

    let factor = present_days
        .checked_div(base)
        .ok_or_else(|| EngineError::overflow("presentDays"))?;
    let earned = EarnedComponents {
        basic: prorate("basic", structure.basic)?,
        hra: prorate("hra", structure.hra)?,
        conveyance: prorate("conveyance", structure.conveyance)?,
        medical: prorate("medical", structure.medical)?,
        special_allowance: prorate("specialAllowance", structure.special_allowance)?,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_proration".to_string(),
        rule_name: "Attendance Proration".to_string(),
        input: serde_json::json!({
            "present_days": present_days.normalize().to_string(),
            "proration_base_days": base.normalize().to_string(),
            "basic": structure.basic.normalize().to_string(),
            "hra": structure.hra.normalize().to_string(),
            "conveyance": structure.conveyance.normalize().to_string(),
            "medical": structure.medical.normalize().to_string(),
            "special_allowance": structure.special_allowance.normalize().to_string()
        }),
        output: serde_json::json!({
            "factor": factor.normalize().to_string(),
            "basic": earned.basic.normalize().to_string(),
            "hra": earned.hra.normalize().to_string(),
            "conveyance": earned.conveyance.normalize().to_string(),
            "medical": earned.medical.normalize().to_string(),
            "special_allowance": earned.special_allowance.normalize().to_string()
        }),
        reasoning: format!(
            "{} present days over a {} day base gives factor {}",
            present_days.normalize(),
            base.normalize(),
            factor.round_dp(4).normalize()
        ),
    };

    Ok(ProrationResult {
        factor,
        earned,
        audit_step,
    })
}
