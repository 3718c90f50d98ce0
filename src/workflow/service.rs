//! The payroll service.
//!
//! [`PayrollService`] orchestrates the collaborators: it aggregates attendance,
//! previews computations, generates salary records exactly once per employee
//! and month, and drives the Draft to Paid lifecycle.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{aggregate_attendance, compute_salary, working_days_in_month};
use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceSummary, Month, PayPeriod, PayrollAdjustments, SalaryComputation, SalaryRecord,
    SalaryStatus, SalaryStructure,
};
use crate::store::{
    AttendanceSource, InMemoryEmployeeDirectory, InMemorySalaryRecordStore, SalaryRecordStore,
    SalaryStructureSource,
};

use super::request::GenerationRequest;

/// Payroll operations over a set of collaborators.
#[derive(Clone)]
pub struct PayrollService {
    structures: Arc<dyn SalaryStructureSource>,
    attendance: Arc<dyn AttendanceSource>,
    records: Arc<dyn SalaryRecordStore>,
    rules: PayrollRules,
}

impl PayrollService {
    /// Creates a service over the given collaborators.
    pub fn new(
        structures: Arc<dyn SalaryStructureSource>,
        attendance: Arc<dyn AttendanceSource>,
        records: Arc<dyn SalaryRecordStore>,
        rules: PayrollRules,
    ) -> Self {
        Self {
            structures,
            attendance,
            records,
            rules,
        }
    }

    /// Creates a service backed by an in-memory directory and an empty record store.
    pub fn in_memory(directory: Arc<InMemoryEmployeeDirectory>, rules: PayrollRules) -> Self {
        Self::new(
            directory.clone(),
            directory,
            Arc::new(InMemorySalaryRecordStore::new()),
            rules,
        )
    }

    /// Returns the payroll rules in force.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Aggregates an employee's attendance for a month.
    ///
    /// An employee without tracked attendance gets a zero-valued summary.
    /// A failure of the attendance source is returned as an error.
    pub fn attendance_summary(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> EngineResult<AttendanceSummary> {
        let period = PayPeriod::new(month, year)?;
        self.summarize(employee_id, &period)
    }

    fn summarize(&self, employee_id: &str, period: &PayPeriod) -> EngineResult<AttendanceSummary> {
        let rows = self.attendance.attendance_records(employee_id, period)?;
        let summary = aggregate_attendance(period, &rows, &self.rules)?;
        if !summary.has_attendance() {
            debug!(employee_id, period = %period, "No attendance recorded, using zero summary");
        }
        Ok(summary)
    }

    /// Computes a salary without persisting anything.
    pub fn preview(
        &self,
        structure: &SalaryStructure,
        summary: &AttendanceSummary,
        adjustments: &PayrollAdjustments,
    ) -> EngineResult<SalaryComputation> {
        compute_salary(structure, summary, adjustments, &self.rules)
    }

    /// Generates and stores the salary record for one employee and month.
    ///
    /// # Errors
    ///
    /// - `DuplicateGeneration` if a record already exists for the period
    /// - `EmployeeNotFound` if the employee has no salary structure
    /// - `InvalidInput` / `InvalidAttendance` for bad inputs
    /// - `Persistence` if a collaborator fails; nothing is stored in that case
    pub fn generate(&self, request: &GenerationRequest) -> EngineResult<SalaryRecord> {
        let period = PayPeriod::new(request.month, request.year)?;
        let employee_id = request.employee_id.as_str();
        let adjustments = request.adjustments();
        adjustments.validate()?;

        if let Some(existing) = self.records.find_by_period(employee_id, &period)? {
            warn!(
                employee_id,
                period = %period,
                record_id = %existing.id,
                "Salary already generated for period"
            );
            return Err(EngineError::DuplicateGeneration {
                employee_id: employee_id.to_string(),
                month: period.month,
                year: period.year,
                existing_record_id: existing.id,
            });
        }

        let structure = self.structures.salary_structure(employee_id)?;
        let summary = self.summarize(employee_id, &period)?;
        let working_days = self.resolve_working_days(&period, summary.total_days, request.working_days)?;
        let computation = compute_salary(&structure, &summary, &adjustments, &self.rules)?;

        let record = SalaryRecord {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            month: period.month,
            year: period.year,
            working_days,
            present_days: summary.present_days,
            salary_components: structure,
            overtime: computation.overtime,
            deductions: computation.manual_deductions,
            incentives: computation.incentives,
            gross_salary: computation.gross_earned,
            net_salary: computation.net_salary,
            status: SalaryStatus::Draft,
            payment_date: None,
            remarks: request
                .remarks
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        };

        let record = self.records.insert(record)?;
        info!(
            employee_id,
            period = %period,
            record_id = %record.id,
            net_salary = %record.net_salary,
            "Salary record generated"
        );
        Ok(record)
    }

    fn resolve_working_days(
        &self,
        period: &PayPeriod,
        total_days: u32,
        requested: Option<u32>,
    ) -> EngineResult<u32> {
        match requested {
            Some(days) if days == 0 || days > total_days => Err(EngineError::InvalidInput {
                field: "workingDays".to_string(),
                message: format!("must be between 1 and {}, got {}", total_days, days),
            }),
            Some(days) => Ok(days),
            None => working_days_in_month(period, self.rules.working_days),
        }
    }

    /// Recomputes a stored record from its own snapshot under the rules in force.
    ///
    /// While the payroll rules are unchanged, the result reproduces the
    /// record's gross, overtime and net figures regardless of later edits to
    /// the live salary structure. Records do not carry the rules they were
    /// generated under, so a changed proration base or workday length yields
    /// the figures those new rules would give.
    pub fn reproduce(&self, record_id: Uuid) -> EngineResult<SalaryComputation> {
        let record = self.get_record(record_id)?;
        let mut summary = AttendanceSummary::empty(record.working_days, Decimal::ZERO);
        summary.present_days = record.present_days;
        let adjustments = PayrollAdjustments {
            overtime_hours: Some(record.overtime.hours),
            incentives: record.incentives,
            deductions: record.deductions,
        };
        compute_salary(&record.salary_components, &summary, &adjustments, &self.rules)
    }

    /// Marks a Draft record as paid.
    pub fn mark_paid(&self, record_id: Uuid, payment_date: NaiveDate) -> EngineResult<SalaryRecord> {
        let record = self.records.mark_paid(record_id, payment_date)?;
        info!(record_id = %record_id, payment_date = %payment_date, "Salary record marked paid");
        Ok(record)
    }

    /// Deletes a Draft record so its period can be regenerated.
    pub fn delete_draft(&self, record_id: Uuid) -> EngineResult<()> {
        let record = self.records.delete_draft(record_id)?;
        info!(
            record_id = %record_id,
            employee_id = %record.employee_id,
            period = %record.period(),
            "Draft salary record deleted"
        );
        Ok(())
    }

    /// Returns a record by identity.
    pub fn get_record(&self, record_id: Uuid) -> EngineResult<SalaryRecord> {
        self.records
            .get(record_id)?
            .ok_or(EngineError::RecordNotFound { record_id })
    }

    /// Returns every record for a month, ordered by employee id.
    pub fn list_records(&self, month: Month, year: i32) -> EngineResult<Vec<SalaryRecord>> {
        let period = PayPeriod::new(month, year)?;
        self.records.list_by_period(&period)
    }

    /// Returns every record for an employee, oldest period first.
    pub fn list_employee_records(&self, employee_id: &str) -> EngineResult<Vec<SalaryRecord>> {
        self.records.list_by_employee(employee_id)
    }
}
