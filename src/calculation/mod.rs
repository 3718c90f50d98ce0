//! Calculation logic for the Payroll Engine.
//!
//! This module contains the pure calculation functions: calendar helpers,
//! attendance aggregation, proration of fixed salary components, overtime pay,
//! and the end-to-end salary computation.

mod attendance_aggregation;
mod calendar;
mod overtime;
mod proration;
mod salary;

pub use attendance_aggregation::aggregate_attendance;
pub use calendar::{days_in_month, is_leap_year, working_days_in_month};
pub use overtime::{OvertimeResult, OvertimeSource, calculate_overtime, overtime_hourly_rate};
pub use proration::{ProrationResult, prorate_structure};
pub use salary::{compute_salary, round_to_currency_unit};
