//! Attendance aggregation functionality.
//!
//! This module reduces one month of per-day attendance rows for one employee
//! to an [`AttendanceSummary`]: present, absent and calendar day counts,
//! automatic overtime, and a date-indexed map of the rows.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::{PayrollRules, UnmarkedDayPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceDay, AttendanceStatus, AttendanceSummary, PayPeriod};

use super::days_in_month;

/// Aggregates attendance rows into a monthly summary.
///
/// Rows dated outside `period` are ignored. When a date appears more than once
/// the later row wins. Holiday and Leave days count as neither present nor
/// absent; days without any row are classified by `rules.unmarked_days`.
///
/// A month with no rows at all yields a zero-valued summary rather than an error.
///
/// # Errors
///
/// Returns `InvalidAttendance` for a row with negative hours or a check-out
/// before its check-in.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_attendance;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{AttendanceDay, AttendanceStatus, Month, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::new(Month::April, 2025).unwrap();
/// let rows = vec![
///     AttendanceDay::new(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), AttendanceStatus::Present, Decimal::from(12)),
///     AttendanceDay::new(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(), AttendanceStatus::HalfDay, Decimal::from(4)),
/// ];
///
/// let summary = aggregate_attendance(&period, &rows, &PayrollRules::default()).unwrap();
/// assert_eq!(summary.total_days, 30);
/// assert_eq!(summary.present_days, Decimal::new(15, 1));
/// assert_eq!(summary.total_overtime_hours, Decimal::from(3));
/// ```
pub fn aggregate_attendance(
    period: &PayPeriod,
    rows: &[AttendanceDay],
    rules: &PayrollRules,
) -> EngineResult<AttendanceSummary> {
    let total_days = days_in_month(period.month, period.year);
    let total = Decimal::from(total_days);

    let mut daily_stats: BTreeMap<_, AttendanceDay> = BTreeMap::new();
    for row in rows {
        if !period.contains_date(row.date) {
            warn!(date = %row.date, period = %period, "Ignoring attendance row outside period");
            continue;
        }
        row.validate()?;
        if daily_stats.insert(row.date, row.clone()).is_some() {
            warn!(date = %row.date, "Duplicate attendance row replaced earlier entry");
        }
    }

    if daily_stats.is_empty() {
        let absent_days = match rules.unmarked_days {
            UnmarkedDayPolicy::Absent => total,
            UnmarkedDayPolicy::Excluded => Decimal::ZERO,
        };
        return Ok(AttendanceSummary::empty(total_days, absent_days));
    }

    let mut full_days: u32 = 0;
    let mut half_days: u32 = 0;
    let mut marked_absent: u32 = 0;
    let mut holiday_days: u32 = 0;
    let mut leave_days: u32 = 0;
    let mut total_overtime_hours = Decimal::ZERO;

    for day in daily_stats.values() {
        match day.status {
            AttendanceStatus::Present => full_days += 1,
            AttendanceStatus::HalfDay => half_days += 1,
            AttendanceStatus::Absent => marked_absent += 1,
            AttendanceStatus::Holiday => holiday_days += 1,
            AttendanceStatus::Leave => leave_days += 1,
        }
        total_overtime_hours = total_overtime_hours
            .checked_add(day.overtime_hours(rules.overtime_threshold_hours))
            .ok_or_else(|| EngineError::InvalidAttendance {
                date: day.date,
                message: "overtime hours are too large to total".to_string(),
            })?;
    }

    let present_days = Decimal::from(full_days) + Decimal::from(half_days) * rules.half_day_weight;
    let unmarked_days = total_days - daily_stats.len() as u32;

    let absent_days = match rules.unmarked_days {
        UnmarkedDayPolicy::Absent => {
            total - present_days - Decimal::from(holiday_days) - Decimal::from(leave_days)
        }
        UnmarkedDayPolicy::Excluded => {
            Decimal::from(marked_absent)
                + Decimal::from(half_days) * (Decimal::ONE - rules.half_day_weight)
        }
    };

    Ok(AttendanceSummary {
        present_days,
        absent_days,
        total_days,
        total_overtime_hours,
        half_days,
        holiday_days,
        leave_days,
        unmarked_days,
        daily_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn march() -> PayPeriod {
        PayPeriod::new(Month::March, 2025).unwrap()
    }

    fn day(d: u32, status: AttendanceStatus, hours: &str) -> AttendanceDay {
        AttendanceDay::new(
            NaiveDate::from_ymd_opt(2025, 3, d).unwrap(),
            status,
            dec(hours),
        )
    }

    #[test]
    fn test_no_rows_yields_zero_valued_summary() {
        let summary = aggregate_attendance(&march(), &[], &PayrollRules::default()).unwrap();

        assert_eq!(summary.present_days, Decimal::ZERO);
        assert_eq!(summary.total_days, 31);
        assert_eq!(summary.absent_days, dec("31"));
        assert_eq!(summary.total_overtime_hours, Decimal::ZERO);
        assert!(summary.daily_stats.is_empty());
        assert!(!summary.has_attendance());
    }

    #[test]
    fn test_february_leap_year_total_days() {
        let period = PayPeriod::new(Month::February, 2024).unwrap();
        let summary = aggregate_attendance(&period, &[], &PayrollRules::default()).unwrap();
        assert_eq!(summary.total_days, 29);
    }

    #[test]
    fn test_present_and_half_days() {
        let rows = vec![
            day(3, AttendanceStatus::Present, "8"),
            day(4, AttendanceStatus::Present, "8"),
            day(5, AttendanceStatus::HalfDay, "4"),
        ];
        let summary = aggregate_attendance(&march(), &rows, &PayrollRules::default()).unwrap();

        assert_eq!(summary.present_days, dec("2.5"));
        assert_eq!(summary.half_days, 1);
        assert_eq!(summary.absent_days, dec("28.5"));
        assert_eq!(summary.unmarked_days, 28);
        assert_eq!(summary.daily_stats.len(), 3);
    }

    #[test]
    fn test_holiday_and_leave_are_neither_present_nor_absent() {
        let rows = vec![
            day(3, AttendanceStatus::Present, "8"),
            day(4, AttendanceStatus::Holiday, "0"),
            day(5, AttendanceStatus::Leave, "0"),
            day(6, AttendanceStatus::Absent, "0"),
        ];
        let summary = aggregate_attendance(&march(), &rows, &PayrollRules::default()).unwrap();

        assert_eq!(summary.present_days, dec("1"));
        assert_eq!(summary.holiday_days, 1);
        assert_eq!(summary.leave_days, 1);
        // 31 - 1 present - 1 holiday - 1 leave
        assert_eq!(summary.absent_days, dec("28"));
    }

    #[test]
    fn test_excluded_unmarked_days_only_count_marked_absences() {
        let rules = PayrollRules {
            unmarked_days: UnmarkedDayPolicy::Excluded,
            ..Default::default()
        };
        let rows = vec![
            day(3, AttendanceStatus::Present, "8"),
            day(4, AttendanceStatus::HalfDay, "4"),
            day(6, AttendanceStatus::Absent, "0"),
        ];
        let summary = aggregate_attendance(&march(), &rows, &rules).unwrap();

        assert_eq!(summary.present_days, dec("1.5"));
        assert_eq!(summary.absent_days, dec("1.5"));
        assert_eq!(summary.unmarked_days, 28);
    }

    #[test]
    fn test_overtime_accumulates_hours_beyond_nine() {
        let rows = vec![
            day(3, AttendanceStatus::Present, "9"),
            day(4, AttendanceStatus::Present, "10.5"),
            day(5, AttendanceStatus::Present, "12"),
            day(6, AttendanceStatus::HalfDay, "4"),
        ];
        let summary = aggregate_attendance(&march(), &rows, &PayrollRules::default()).unwrap();

        assert_eq!(summary.total_overtime_hours, dec("4.5"));
    }

    #[test]
    fn test_rows_outside_period_are_ignored() {
        let rows = vec![
            day(3, AttendanceStatus::Present, "8"),
            AttendanceDay::new(
                NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                AttendanceStatus::Present,
                dec("14"),
            ),
        ];
        let summary = aggregate_attendance(&march(), &rows, &PayrollRules::default()).unwrap();

        assert_eq!(summary.present_days, dec("1"));
        assert_eq!(summary.total_overtime_hours, Decimal::ZERO);
        assert_eq!(summary.daily_stats.len(), 1);
    }

    #[test]
    fn test_duplicate_date_keeps_later_row() {
        let rows = vec![
            day(3, AttendanceStatus::Absent, "0"),
            day(3, AttendanceStatus::Present, "10"),
        ];
        let summary = aggregate_attendance(&march(), &rows, &PayrollRules::default()).unwrap();

        assert_eq!(summary.present_days, dec("1"));
        assert_eq!(summary.total_overtime_hours, dec("1"));
        assert_eq!(
            summary.daily_stats[&NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()].status,
            AttendanceStatus::Present
        );
    }

    #[test]
    fn test_negative_hours_fail_aggregation() {
        let rows = vec![day(3, AttendanceStatus::Present, "-2")];
        let result = aggregate_attendance(&march(), &rows, &PayrollRules::default());

        assert!(matches!(result, Err(EngineError::InvalidAttendance { .. })));
    }

    #[test]
    fn test_overtime_total_overflow_is_rejected() {
        let rows = vec![
            AttendanceDay::new(
                NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                AttendanceStatus::Present,
                Decimal::MAX,
            ),
            AttendanceDay::new(
                NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
                AttendanceStatus::Present,
                Decimal::MAX,
            ),
        ];

        let result = aggregate_attendance(&march(), &rows, &PayrollRules::default());
        match result {
            Err(EngineError::InvalidAttendance { date, .. }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
            }
            other => panic!("Expected InvalidAttendance, got {:?}", other),
        }
    }
}
