//! Salary generation workflow and record lifecycle.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use payroll_engine::config::PayrollRules;
//! use payroll_engine::models::{Month, SalaryStructure};
//! use payroll_engine::store::InMemoryEmployeeDirectory;
//! use payroll_engine::workflow::{GenerationRequest, PayrollService};
//! use rust_decimal::Decimal;
//!
//! let directory = Arc::new(InMemoryEmployeeDirectory::new());
//! directory
//!     .upsert_structure("emp_001", SalaryStructure { basic: Decimal::from(15000), ..Default::default() })
//!     .unwrap();
//!
//! let service = PayrollService::in_memory(directory, PayrollRules::default());
//! let record = service
//!     .generate(&GenerationRequest::new("emp_001", Month::March, 2025))
//!     .unwrap();
//! assert_eq!(record.net_salary, Decimal::ZERO);
//! ```

mod request;
mod service;

pub use request::GenerationRequest;
pub use service::PayrollService;
