//! Payroll Generation and Attendance Aggregation Engine
//!
//! This crate turns a month of daily attendance into a finalized, auditable
//! salary record for one employee: it aggregates attendance, prorates fixed
//! salary components, computes overtime, and guards record generation against
//! duplicates and illegal status changes.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod workflow;
