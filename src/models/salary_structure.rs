//! Salary structure model.
//!
//! The fixed monthly compensation components owned by the employee master.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An employee's fixed monthly compensation components.
///
/// Every field defaults to zero when absent from the payload.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SalaryStructure;
/// use rust_decimal::Decimal;
///
/// let structure = SalaryStructure {
///     basic: Decimal::from(20000),
///     pf: Decimal::from(1800),
///     ..Default::default()
/// };
/// assert!(structure.validate().is_ok());
/// assert_eq!(structure.statutory_deductions().unwrap(), Decimal::from(1800));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryStructure {
    /// Basic pay.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Conveyance allowance.
    pub conveyance: Decimal,
    /// Medical allowance.
    pub medical: Decimal,
    /// Special allowance.
    pub special_allowance: Decimal,
    /// Provident fund contribution, deducted.
    pub pf: Decimal,
    /// Professional tax, deducted.
    pub professional_tax: Decimal,
}

impl SalaryStructure {
    /// Sum of the five earning components at full attendance.
    pub fn monthly_earnings(&self) -> EngineResult<Decimal> {
        [self.hra, self.conveyance, self.medical, self.special_allowance]
            .into_iter()
            .try_fold(self.basic, |sum, amount| sum.checked_add(amount))
            .ok_or_else(|| EngineError::overflow("salaryStructure"))
    }

    /// Provident fund plus professional tax.
    pub fn statutory_deductions(&self) -> EngineResult<Decimal> {
        self.pf
            .checked_add(self.professional_tax)
            .ok_or_else(|| EngineError::overflow("salaryStructure"))
    }

    /// Rejects any negative component.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("basic", self.basic),
            ("hra", self.hra),
            ("conveyance", self.conveyance),
            ("medical", self.medical),
            ("specialAllowance", self.special_allowance),
            ("pf", self.pf),
            ("professionalTax", self.professional_tax),
        ];

        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: format!("salaryStructure.{}", field),
                    message: format!("cannot be negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}
