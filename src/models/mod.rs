//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod computation;
mod period;
mod salary_record;
mod salary_structure;

pub use attendance::{AttendanceDay, AttendanceStatus, AttendanceSummary};
pub use computation::{AuditStep, EarnedComponents, PayrollAdjustments, SalaryComputation};
pub use period::{Month, PayPeriod};
pub use salary_record::{OvertimeDetails, SalaryRecord, SalaryStatus};
pub use salary_structure::SalaryStructure;
