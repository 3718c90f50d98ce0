//! Calendar helpers for month lengths and working days.

use chrono::{Datelike, Weekday};

use crate::config::WorkingDaysPolicy;
use crate::error::EngineResult;
use crate::models::{Month, PayPeriod};

/// Returns true for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of calendar days in `month` of `year` (28 to 31).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::days_in_month;
/// use payroll_engine::models::Month;
///
/// assert_eq!(days_in_month(Month::February, 2024), 29);
/// assert_eq!(days_in_month(Month::February, 2025), 28);
/// assert_eq!(days_in_month(Month::April, 2025), 30);
/// assert_eq!(days_in_month(Month::December, 2025), 31);
/// ```
pub fn days_in_month(month: Month, year: i32) -> u32 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Working days in the period under the given convention.
pub fn working_days_in_month(period: &PayPeriod, policy: WorkingDaysPolicy) -> EngineResult<u32> {
    let total = days_in_month(period.month, period.year);
    match policy {
        WorkingDaysPolicy::Calendar => Ok(total),
        WorkingDaysPolicy::Weekdays => {
            let first = period.first_day()?;
            let weekdays = first
                .iter_days()
                .take(total as usize)
                .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
                .count();
            Ok(weekdays as u32)
        }
    }
}
