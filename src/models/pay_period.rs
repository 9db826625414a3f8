//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type describing the date window a
//! payroll computation covers, and the calendar-month helpers the ETI and
//! certificate logic depend on.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A pay period with its inclusive date range.
///
/// # Example
///
/// ```
/// use za_payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 7, 31).unwrap(),
/// };
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()));
/// assert_eq!(period.months_spanned(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period covering the full calendar month of `date`.
    pub fn calendar_month(date: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .expect("first of month is always valid");
        let end = if date.month() == 12 {
            NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        }
        .expect("first of month is always valid")
        .pred_opt()
        .expect("day before first of month is always valid");
        Self {
            start_date: start,
            end_date: end,
        }
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar months this period touches, counting partial
    /// months as whole months.
    ///
    /// A window from March 1 to August 31 spans 6 months; a window from
    /// March 15 to April 2 spans 2.
    pub fn months_spanned(&self) -> u32 {
        if self.end_date < self.start_date {
            return 0;
        }
        let years = self.end_date.year() - self.start_date.year();
        let months =
            years * 12 + self.end_date.month() as i32 - self.start_date.month() as i32 + 1;
        months.max(0) as u32
    }

    /// The key used for monthly declarations, e.g. "2024-07".
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.start_date.year(), self.start_date.month())
    }
}
