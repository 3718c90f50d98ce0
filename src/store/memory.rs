//! In-memory collaborator implementations.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, RwLock};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::EmployeeSeed;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceDay, PayPeriod, SalaryRecord, SalaryStructure};

use super::{AttendanceSource, SalaryRecordStore, SalaryStructureSource};

fn poisoned(what: &str) -> EngineError {
    EngineError::Persistence {
        message: format!("{} lock poisoned", what),
    }
}

/// Salary structures and attendance rows held in memory.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    structures: RwLock<HashMap<String, SalaryStructure>>,
    attendance: RwLock<HashMap<String, Vec<AttendanceDay>>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from configured seed employees.
    pub fn from_seeds(seeds: &[EmployeeSeed]) -> EngineResult<Self> {
        let directory = Self::new();
        for seed in seeds {
            directory.upsert_structure(&seed.id, seed.salary_structure.clone())?;
            for day in &seed.attendance {
                directory.record_attendance(&seed.id, day.clone())?;
            }
        }
        Ok(directory)
    }

    /// Inserts or replaces an employee's salary structure.
    pub fn upsert_structure(&self, employee_id: &str, structure: SalaryStructure) -> EngineResult<()> {
        structure.validate()?;
        self.structures
            .write()
            .map_err(|_| poisoned("structure"))?
            .insert(employee_id.to_string(), structure);
        Ok(())
    }

    /// Appends an attendance row for an employee.
    pub fn record_attendance(&self, employee_id: &str, day: AttendanceDay) -> EngineResult<()> {
        self.attendance
            .write()
            .map_err(|_| poisoned("attendance"))?
            .entry(employee_id.to_string())
            .or_default()
            .push(day);
        Ok(())
    }
}

impl SalaryStructureSource for InMemoryEmployeeDirectory {
    fn salary_structure(&self, employee_id: &str) -> EngineResult<SalaryStructure> {
        self.structures
            .read()
            .map_err(|_| poisoned("structure"))?
            .get(employee_id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}

impl AttendanceSource for InMemoryEmployeeDirectory {
    fn attendance_records(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> EngineResult<Vec<AttendanceDay>> {
        let attendance = self.attendance.read().map_err(|_| poisoned("attendance"))?;
        Ok(attendance
            .get(employee_id)
            .map(|days| {
                days.iter()
                    .filter(|d| period.contains_date(d.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PeriodKey {
    employee_id: String,
    period: PayPeriod,
}

impl PeriodKey {
    fn of(record: &SalaryRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            period: record.period(),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<Uuid, SalaryRecord>,
    by_period: HashMap<PeriodKey, Uuid>,
}

/// Salary records held in memory.
///
/// One mutex guards both the records and the period index, so the uniqueness
/// check and the write in [`insert`](SalaryRecordStore::insert) are a single
/// atomic step.
#[derive(Debug, Default)]
pub struct InMemorySalaryRecordStore {
    tables: Mutex<Tables>,
}

impl InMemorySalaryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> EngineResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| poisoned("salary record"))
    }
}

impl SalaryRecordStore for InMemorySalaryRecordStore {
    fn find_by_period(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> EngineResult<Option<SalaryRecord>> {
        let tables = self.tables()?;
        let key = PeriodKey {
            employee_id: employee_id.to_string(),
            period: *period,
        };
        Ok(tables
            .by_period
            .get(&key)
            .and_then(|id| tables.records.get(id))
            .cloned())
    }

    fn get(&self, record_id: Uuid) -> EngineResult<Option<SalaryRecord>> {
        Ok(self.tables()?.records.get(&record_id).cloned())
    }

    fn insert(&self, record: SalaryRecord) -> EngineResult<SalaryRecord> {
        let mut tables = self.tables()?;
        let key = PeriodKey::of(&record);

        if let Some(existing) = tables.by_period.get(&key) {
            return Err(EngineError::DuplicateGeneration {
                employee_id: record.employee_id.clone(),
                month: record.month,
                year: record.year,
                existing_record_id: *existing,
            });
        }
        if tables.records.contains_key(&record.id) {
            return Err(EngineError::Persistence {
                message: format!("record id {} already in use", record.id),
            });
        }

        tables.by_period.insert(key, record.id);
        tables.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn mark_paid(&self, record_id: Uuid, payment_date: NaiveDate) -> EngineResult<SalaryRecord> {
        let mut tables = self.tables()?;
        let record = tables
            .records
            .get_mut(&record_id)
            .ok_or(EngineError::RecordNotFound { record_id })?;

        record.mark_paid(payment_date)?;
        Ok(record.clone())
    }

    fn delete_draft(&self, record_id: Uuid) -> EngineResult<SalaryRecord> {
        let mut tables = self.tables()?;
        let record = tables
            .records
            .get(&record_id)
            .ok_or(EngineError::RecordNotFound { record_id })?;
        record.ensure_deletable()?;

        let key = PeriodKey::of(record);
        tables.by_period.remove(&key);
        tables
            .records
            .remove(&record_id)
            .ok_or(EngineError::RecordNotFound { record_id })
    }

    fn list_by_period(&self, period: &PayPeriod) -> EngineResult<Vec<SalaryRecord>> {
        let tables = self.tables()?;
        let mut records: Vec<SalaryRecord> = tables
            .records
            .values()
            .filter(|r| r.period() == *period)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(records)
    }

    fn list_by_employee(&self, employee_id: &str) -> EngineResult<Vec<SalaryRecord>> {
        let tables = self.tables()?;
        let mut records: Vec<SalaryRecord> = tables
            .records
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.period());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, Month, OvertimeDetails, SalaryStatus};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::thread;

    fn period(month: Month) -> PayPeriod {
        PayPeriod::new(month, 2025).unwrap()
    }

    fn draft(employee_id: &str, month: Month) -> SalaryRecord {
        SalaryRecord {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            month,
            year: 2025,
            working_days: 30,
            present_days: Decimal::from(30),
            salary_components: SalaryStructure::default(),
            overtime: OvertimeDetails::default(),
            deductions: Decimal::ZERO,
            incentives: Decimal::ZERO,
            gross_salary: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            status: SalaryStatus::Draft,
            payment_date: None,
            remarks: None,
        }
    }

    fn paid_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[test]
    fn test_directory_returns_structure_or_not_found() {
        let directory = InMemoryEmployeeDirectory::new();
        directory
            .upsert_structure(
                "emp_001",
                SalaryStructure {
                    basic: Decimal::from(1000),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(
            directory.salary_structure("emp_001").unwrap().basic,
            Decimal::from(1000)
        );
        assert!(matches!(
            directory.salary_structure("emp_404"),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_directory_filters_attendance_by_period() {
        let directory = InMemoryEmployeeDirectory::new();
        for (month, day) in [(3, 3), (3, 4), (4, 1)] {
            directory
                .record_attendance(
                    "emp_001",
                    AttendanceDay::new(
                        NaiveDate::from_ymd_opt(2025, month, day).unwrap(),
                        AttendanceStatus::Present,
                        Decimal::from(8),
                    ),
                )
                .unwrap();
        }

        let march = directory
            .attendance_records("emp_001", &period(Month::March))
            .unwrap();
        assert_eq!(march.len(), 2);

        let untracked = directory
            .attendance_records("emp_002", &period(Month::March))
            .unwrap();
        assert!(untracked.is_empty());
    }

    #[test]
    fn test_insert_rejects_second_record_for_period() {
        let store = InMemorySalaryRecordStore::new();
        let first = store.insert(draft("emp_001", Month::March)).unwrap();

        match store.insert(draft("emp_001", Month::March)) {
            Err(EngineError::DuplicateGeneration {
                existing_record_id, ..
            }) => assert_eq!(existing_record_id, first.id),
            other => panic!("Expected DuplicateGeneration, got {:?}", other),
        }
        assert_eq!(store.list_by_period(&period(Month::March)).unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_for_same_period_admit_one() {
        let store = Arc::new(InMemorySalaryRecordStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.insert(draft("emp_001", Month::March)).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.list_by_employee("emp_001").unwrap().len(), 1);
    }

    #[test]
    fn test_mark_paid_then_delete_is_rejected() {
        let store = InMemorySalaryRecordStore::new();
        let record = store.insert(draft("emp_001", Month::March)).unwrap();

        let paid = store.mark_paid(record.id, paid_on()).unwrap();
        assert_eq!(paid.status, SalaryStatus::Paid);

        assert!(matches!(
            store.mark_paid(record.id, paid_on()),
            Err(EngineError::InvalidTransition { .. })
        ));
        assert!(matches!(
            store.delete_draft(record.id),
            Err(EngineError::InvalidTransition { .. })
        ));
        assert!(store.get(record.id).unwrap().is_some());
    }

    #[test]
    fn test_delete_draft_frees_the_period() {
        let store = InMemorySalaryRecordStore::new();
        let record = store.insert(draft("emp_001", Month::March)).unwrap();

        store.delete_draft(record.id).unwrap();
        assert!(store.get(record.id).unwrap().is_none());
        assert!(
            store
                .find_by_period("emp_001", &period(Month::March))
                .unwrap()
                .is_none()
        );
        assert!(store.insert(draft("emp_001", Month::March)).is_ok());
    }

    #[test]
    fn test_unknown_record_is_not_found() {
        let store = InMemorySalaryRecordStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.mark_paid(id, paid_on()),
            Err(EngineError::RecordNotFound { record_id }) if record_id == id
        ));
        assert!(matches!(
            store.delete_draft(id),
            Err(EngineError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_listings_are_ordered() {
        let store = InMemorySalaryRecordStore::new();
        store.insert(draft("emp_b", Month::March)).unwrap();
        store.insert(draft("emp_a", Month::March)).unwrap();
        store.insert(draft("emp_a", Month::January)).unwrap();

        let march: Vec<String> = store
            .list_by_period(&period(Month::March))
            .unwrap()
            .into_iter()
            .map(|r| r.employee_id)
            .collect();
        assert_eq!(march, vec!["emp_a", "emp_b"]);

        let months: Vec<Month> = store
            .list_by_employee("emp_a")
            .unwrap()
            .into_iter()
            .map(|r| r.month)
            .collect();
        assert_eq!(months, vec![Month::January, Month::March]);
    }
}
