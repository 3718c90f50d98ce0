//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides functionality to load payroll rules and seed
//! employee data from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Overtime after {} hours", config.rules().overtime_threshold_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EmployeeSeed, EmployeesConfig, PayrollConfig, PayrollRules, UnmarkedDayPolicy,
    WorkingDaysPolicy,
};
