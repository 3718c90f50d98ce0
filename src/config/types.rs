//! Configuration types for payroll generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceDay, SalaryStructure};

/// How the `workingDays` figure of a salary record is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingDaysPolicy {
    /// Every calendar day of the month.
    #[default]
    Calendar,
    /// Monday to Friday only.
    Weekdays,
}

/// How days with no attendance row are classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmarkedDayPolicy {
    /// Counted as absent against the calendar month.
    #[default]
    Absent,
    /// Counted neither present nor absent.
    Excluded,
}

/// The numeric policy applied by aggregation and computation.
///
/// Missing keys fall back to the defaults: a 30 day proration base,
/// an 8 hour workday for the overtime rate, overtime after 9 hours,
/// and half days weighted 0.5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollRules {
    /// Days every fixed component is prorated against, whatever the month length.
    pub proration_base_days: Decimal,
    /// Hours in the standard workday used to derive the overtime hourly rate.
    pub standard_workday_hours: Decimal,
    /// Daily hours after which worked time counts as overtime.
    pub overtime_threshold_hours: Decimal,
    /// Present-day weight of a half day.
    pub half_day_weight: Decimal,
    /// Working-days convention.
    pub working_days: WorkingDaysPolicy,
    /// Classification of unmarked days.
    pub unmarked_days: UnmarkedDayPolicy,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            proration_base_days: Decimal::from(30),
            standard_workday_hours: Decimal::from(8),
            overtime_threshold_hours: Decimal::from(9),
            half_day_weight: Decimal::new(5, 1),
            working_days: WorkingDaysPolicy::Calendar,
            unmarked_days: UnmarkedDayPolicy::Absent,
        }
    }
}

impl PayrollRules {
    /// Rejects non-positive divisors and a half-day weight outside 0..=1.
    pub fn validate(&self) -> EngineResult<()> {
        let positive = [
            ("proration_base_days", self.proration_base_days),
            ("standard_workday_hours", self.standard_workday_hours),
        ];
        for (field, value) in positive {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must be greater than zero, got {}", value),
                });
            }
        }

        if self.overtime_threshold_hours < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "overtime_threshold_hours".to_string(),
                message: format!("cannot be negative, got {}", self.overtime_threshold_hours),
            });
        }

        if self.half_day_weight < Decimal::ZERO || self.half_day_weight > Decimal::ONE {
            return Err(EngineError::InvalidInput {
                field: "half_day_weight".to_string(),
                message: format!("must be between 0 and 1, got {}", self.half_day_weight),
            });
        }
        Ok(())
    }
}

/// An employee seeded into the in-memory directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSeed {
    /// Employee identity.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Current salary structure.
    #[serde(default)]
    pub salary_structure: SalaryStructure,
    /// Attendance rows across any number of months.
    #[serde(default)]
    pub attendance: Vec<AttendanceDay>,
}

/// Employees configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeesConfig {
    /// Seeded employees.
    #[serde(default)]
    pub employees: Vec<EmployeeSeed>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct PayrollConfig {
    /// Payroll rules.
    rules: PayrollRules,
    /// Seeded employees.
    employees: Vec<EmployeeSeed>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(rules: PayrollRules, employees: Vec<EmployeeSeed>) -> Self {
        Self { rules, employees }
    }

    /// Returns the payroll rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Returns the seeded employees.
    pub fn employees(&self) -> &[EmployeeSeed] {
        &self.employees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = PayrollRules::default();
        assert_eq!(rules.proration_base_days, Decimal::from(30));
        assert_eq!(rules.standard_workday_hours, Decimal::from(8));
        assert_eq!(rules.overtime_threshold_hours, Decimal::from(9));
        assert_eq!(rules.half_day_weight.to_string(), "0.5");
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let rules: PayrollRules = serde_yaml::from_str("working_days: weekdays\n").unwrap();
        assert_eq!(rules.working_days, WorkingDaysPolicy::Weekdays);
        assert_eq!(rules.proration_base_days, Decimal::from(30));
        assert_eq!(rules.unmarked_days, UnmarkedDayPolicy::Absent);
    }

    #[test]
    fn test_zero_proration_base_is_rejected() {
        let rules = PayrollRules {
            proration_base_days: Decimal::ZERO,
            ..Default::default()
        };
        match rules.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "proration_base_days")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_half_day_weight_above_one_is_rejected() {
        let rules = PayrollRules {
            half_day_weight: Decimal::from(2),
            ..Default::default()
        };
        assert!(rules.validate().is_err());
    }
}
