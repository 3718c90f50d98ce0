//! Collaborator interfaces consumed by the payroll workflow.
//!
//! Employee master data, time tracking and salary record persistence live
//! outside this crate. The workflow only depends on the traits below;
//! [`InMemoryEmployeeDirectory`] and [`InMemorySalaryRecordStore`] are the
//! implementations used by the server binary and the tests.

mod memory;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AttendanceDay, PayPeriod, SalaryRecord, SalaryStructure};

pub use memory::{InMemoryEmployeeDirectory, InMemorySalaryRecordStore};

/// Source of current salary structures.
pub trait SalaryStructureSource: Send + Sync {
    /// Returns the employee's current structure, or `EmployeeNotFound`.
    fn salary_structure(&self, employee_id: &str) -> EngineResult<SalaryStructure>;
}

/// Source of per-day attendance rows.
pub trait AttendanceSource: Send + Sync {
    /// Returns the rows recorded for the employee in the period.
    ///
    /// An employee without tracked attendance yields an empty list, not an error.
    fn attendance_records(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> EngineResult<Vec<AttendanceDay>>;
}

/// Durable storage for salary records.
///
/// Implementations must enforce the `(employee_id, month, year)` uniqueness
/// invariant inside [`insert`](SalaryRecordStore::insert) itself, atomically
/// with the write, and must apply status changes atomically with their checks.
pub trait SalaryRecordStore: Send + Sync {
    /// Finds the record for an employee and period.
    fn find_by_period(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> EngineResult<Option<SalaryRecord>>;

    /// Finds a record by identity.
    fn get(&self, record_id: Uuid) -> EngineResult<Option<SalaryRecord>>;

    /// Stores a new record, failing with `DuplicateGeneration` if the period is taken.
    fn insert(&self, record: SalaryRecord) -> EngineResult<SalaryRecord>;

    /// Transitions a Draft record to Paid.
    fn mark_paid(&self, record_id: Uuid, payment_date: NaiveDate) -> EngineResult<SalaryRecord>;

    /// Removes a Draft record, returning it.
    fn delete_draft(&self, record_id: Uuid) -> EngineResult<SalaryRecord>;

    /// All records for a period, ordered by employee id.
    fn list_by_period(&self, period: &PayPeriod) -> EngineResult<Vec<SalaryRecord>>;

    /// All records for an employee, ordered by period.
    fn list_by_employee(&self, employee_id: &str) -> EngineResult<Vec<SalaryRecord>>;
}
