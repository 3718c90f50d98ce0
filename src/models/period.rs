//! Payroll month and period models.
//!
//! This module contains the [`Month`] enum and the [`PayPeriod`] type that
//! identifies the calendar month a salary record covers.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month.
///
/// Serializes as the full English month name (e.g. `"March"`). Parsing via
/// [`FromStr`] or deserializing also accepts any letter case, three-letter
/// abbreviations and month numbers.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Month;
///
/// let month: Month = "mar".parse().unwrap();
/// assert_eq!(month, Month::March);
/// assert_eq!(month.number(), 3);
/// assert_eq!("12".parse::<Month>().unwrap(), Month::December);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Month {
    /// January.
    January,
    /// February.
    February,
    /// March.
    March,
    /// April.
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Returns the month number, 1 for January through 12 for December.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Returns the month for a 1-based month number.
    pub fn from_number(number: u32) -> Option<Month> {
        number
            .checked_sub(1)
            .and_then(|index| Month::ALL.get(index as usize).copied())
    }

    /// Returns the full English name of the month.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(number) = trimmed.parse::<u32>() {
            return Month::from_number(number).ok_or_else(|| EngineError::InvalidInput {
                field: "month".to_string(),
                message: format!("month number must be between 1 and 12, got {}", number),
            });
        }

        let lower = trimmed.to_lowercase();
        Month::ALL
            .iter()
            .copied()
            .find(|m| {
                let name = m.name().to_lowercase();
                name == lower || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| EngineError::InvalidInput {
                field: "month".to_string(),
                message: format!("unknown month '{}'", trimmed),
            })
    }
}

struct MonthVisitor;

impl Visitor<'_> for MonthVisitor {
    type Value = Month;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a month name, three-letter abbreviation or number 1-12")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Month, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Month, E> {
        u32::try_from(value)
            .ok()
            .and_then(Month::from_number)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Month, E> {
        match u64::try_from(value) {
            Ok(unsigned) => self.visit_u64(unsigned),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MonthVisitor)
    }
}

/// The calendar month a salary record or attendance summary covers.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Month, PayPeriod};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(Month::February, 2024).unwrap();
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The calendar year.
    pub year: i32,
    /// The calendar month.
    pub month: Month,
}

impl PayPeriod {
    /// Creates a pay period, rejecting years outside 1..=9999.
    pub fn new(month: Month, year: i32) -> EngineResult<Self> {
        if !(1..=9999).contains(&year) {
            return Err(EngineError::InvalidInput {
                field: "year".to_string(),
                message: format!("year must be between 1 and 9999, got {}", year),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the first calendar day of the period.
    pub fn first_day(&self) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number(), 1).ok_or_else(|| {
            EngineError::InvalidInput {
                field: "year".to_string(),
                message: format!("{} {} is not a representable date", self.month, self.year),
            }
        })
    }

    /// Checks if a date falls inside this calendar month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month.number()
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_numbers_round_trip() {
        for (index, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.number(), index as u32 + 1);
            assert_eq!(Month::from_number(month.number()), Some(*month));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_month_parses_names_abbreviations_and_numbers() {
        assert_eq!("March".parse::<Month>().unwrap(), Month::March);
        assert_eq!("march".parse::<Month>().unwrap(), Month::March);
        assert_eq!("SEP".parse::<Month>().unwrap(), Month::September);
        assert_eq!(" 2 ".parse::<Month>().unwrap(), Month::February);
    }

    #[test]
    fn test_month_deserializes_like_it_parses() {
        let months: Vec<Month> =
            serde_json::from_str(r#"["March", "march", "Sep", "SEP", "3", 12]"#).unwrap();
        assert_eq!(
            months,
            vec![
                Month::March,
                Month::March,
                Month::September,
                Month::September,
                Month::March,
                Month::December
            ]
        );

        assert!(serde_json::from_str::<Month>(r#""Smarch""#).is_err());
        assert!(serde_json::from_str::<Month>("13").is_err());
        assert!(serde_json::from_str::<Month>("-1").is_err());
    }

    #[test]
    fn test_month_rejects_unknown_values() {
        assert!(matches!(
            "Smarch".parse::<Month>(),
            Err(EngineError::InvalidInput { ref field, .. }) if field == "month"
        ));
        assert!("13".parse::<Month>().is_err());
        assert!("ma".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_serializes_as_full_name() {
        assert_eq!(serde_json::to_string(&Month::March).unwrap(), "\"March\"");
        let parsed: Month = serde_json::from_str("\"Aug\"").unwrap();
        assert_eq!(parsed, Month::August);
    }

    #[test]
    fn test_pay_period_rejects_out_of_range_year() {
        assert!(PayPeriod::new(Month::January, 0).is_err());
        assert!(PayPeriod::new(Month::January, 10_000).is_err());
        assert!(PayPeriod::new(Month::January, 2025).is_ok());
    }

    #[test]
    fn test_pay_period_first_day_and_display() {
        let period = PayPeriod::new(Month::November, 2025).unwrap();
        assert_eq!(
            period.first_day().unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
        );
        assert_eq!(period.to_string(), "November 2025");
    }
}
