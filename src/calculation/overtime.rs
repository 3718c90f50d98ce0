//! Overtime pay calculation.
//!
//! Overtime is paid at the basic daily rate spread over a standard workday:
//! `hourlyRate = (basic / prorationBaseDays) / standardWorkdayHours`.

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, OvertimeDetails};

/// Where the overtime hours came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvertimeSource {
    /// Aggregated from attendance rows.
    Attendance,
    /// Entered by an approver, replacing the aggregated figure.
    ManualOverride,
}

impl OvertimeSource {
    fn as_str(self) -> &'static str {
        match self {
            OvertimeSource::Attendance => "attendance",
            OvertimeSource::ManualOverride => "manual_override",
        }
    }
}

/// The result of an overtime calculation, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimeResult {
    /// Hours, rate and amount.
    pub details: OvertimeDetails,
    /// The audit step recording the calculation.
    pub audit_step: AuditStep,
}

/// Hourly overtime rate for a basic salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::overtime_hourly_rate;
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rate = overtime_hourly_rate(Decimal::from(24000), &PayrollRules::default()).unwrap();
/// assert_eq!(rate, Decimal::from(100));
/// ```
pub fn overtime_hourly_rate(basic: Decimal, rules: &PayrollRules) -> EngineResult<Decimal> {
    basic
        .checked_div(rules.proration_base_days)
        .and_then(|daily| daily.checked_div(rules.standard_workday_hours))
        .ok_or_else(|| EngineError::overflow("salaryStructure.basic"))
}

/// Calculates overtime pay for the given hours.
///
/// Returns `InvalidInput` if the rate or the amount does not fit in a `Decimal`.
pub fn calculate_overtime(
    basic: Decimal,
    hours: Decimal,
    source: OvertimeSource,
    rules: &PayrollRules,
    step_number: u32,
) -> EngineResult<OvertimeResult> {
    let rate = overtime_hourly_rate(basic, rules)?;
    let amount = rate
        .checked_mul(hours)
        .ok_or_else(|| EngineError::overflow("overtimeHours"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "basic": basic.normalize().to_string(),
            "hours": hours.normalize().to_string(),
            "source": source.as_str(),
            "proration_base_days": rules.proration_base_days.normalize().to_string(),
            "standard_workday_hours": rules.standard_workday_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} overtime hours ({}) at ({} / {}) / {} per hour",
            hours.normalize(),
            source.as_str(),
            basic.normalize(),
            rules.proration_base_days.normalize(),
            rules.standard_workday_hours.normalize()
        ),
    };

    Ok(OvertimeResult {
        details: OvertimeDetails {
            hours,
            rate,
            amount,
        },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_hourly_rate_for_24000_basic_is_100() {
        assert_eq!(
            overtime_hourly_rate(dec("24000"), &PayrollRules::default()).unwrap(),
            dec("100")
        );
    }

    #[test]
    fn test_five_hours_at_100_is_500() {
        let result = calculate_overtime(
            dec("24000"),
            dec("5"),
            OvertimeSource::ManualOverride,
            &PayrollRules::default(),
            1,
        )
        .unwrap();

        assert_eq!(result.details.rate, dec("100"));
        assert_eq!(result.details.hours, dec("5"));
        assert_eq!(result.details.amount, dec("500"));
    }

    #[test]
    fn test_zero_hours_pay_nothing() {
        let result = calculate_overtime(
            dec("24000"),
            Decimal::ZERO,
            OvertimeSource::Attendance,
            &PayrollRules::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.details.amount, Decimal::ZERO);
    }

    #[test]
    fn test_rate_follows_configured_workday() {
        let rules = PayrollRules {
            standard_workday_hours: dec("10"),
            ..Default::default()
        };
        assert_eq!(overtime_hourly_rate(dec("24000"), &rules).unwrap(), dec("80"));
    }

    #[test]
    fn test_audit_step_records_source() {
        let result = calculate_overtime(
            dec("24000"),
            dec("2"),
            OvertimeSource::Attendance,
            &PayrollRules::default(),
            4,
        )
        .unwrap();

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.input["source"], "attendance");
        assert_eq!(result.audit_step.output["amount"], "200");
    }

    #[test]
    fn test_overflowing_amount_is_rejected() {
        let result = calculate_overtime(
            dec("24000"),
            Decimal::MAX,
            OvertimeSource::ManualOverride,
            &PayrollRules::default(),
            1,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "overtimeHours"
        ));
    }
}
