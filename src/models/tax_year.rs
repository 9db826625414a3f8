//! South African tax year model.
//!
//! The SA tax year runs from March 1 to the last day of February of the
//! following calendar year. A [`TaxYear`] is identified by the calendar year
//! it starts in.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A South African tax year (March 1 to the last day of February).
///
/// Leap years are handled by chrono: the end date is computed as the day
/// before March 1 of the following year, so February 29 falls out naturally.
///
/// # Example
///
/// ```
/// use za_payroll_engine::models::TaxYear;
/// use chrono::NaiveDate;
///
/// let year = TaxYear::starting(2024);
/// assert_eq!(year.start(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert_eq!(year.end(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
/// assert_eq!(year.label(), "2024-2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxYear {
    start_year: i32,
}

impl TaxYear {
    /// Creates the tax year starting on March 1 of the given calendar year.
    pub fn starting(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Returns the tax year containing the given date.
    ///
    /// January and February belong to the tax year that started the
    /// previous March.
    ///
    /// # Example
    ///
    /// ```
    /// use za_payroll_engine::models::TaxYear;
    /// use chrono::NaiveDate;
    ///
    /// let feb = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();
    /// assert_eq!(TaxYear::containing(feb), TaxYear::starting(2024));
    ///
    /// let mar = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    /// assert_eq!(TaxYear::containing(mar), TaxYear::starting(2025));
    /// ```
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() < 3 {
            Self::starting(date.year() - 1)
        } else {
            Self::starting(date.year())
        }
    }

    /// The calendar year this tax year starts in.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// The first day of the tax year (March 1).
    pub fn start(&self) -> NaiveDate {
        // March 1 exists in every year.
        NaiveDate::from_ymd_opt(self.start_year, 3, 1).expect("March 1 is always valid")
    }

    /// The last day of the tax year (February 28 or 29 of the next year).
    pub fn end(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year + 1, 3, 1)
            .expect("March 1 is always valid")
            .pred_opt()
            .expect("the day before March 1 is always valid")
    }

    /// Checks if a date falls within this tax year (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// The display label for this tax year, e.g. "2024-2025".
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_year, self.start_year + 1)
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_end_dates() {
        let year = TaxYear::starting(2024);
        assert_eq!(year.start(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(year.end(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_leap_year_end_date() {
        // The 2023-2024 tax year ends on February 29, 2024.
        let year = TaxYear::starting(2023);
        assert_eq!(year.end(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_century_year_is_not_leap() {
        // 2100 is divisible by 4 but is not a leap year.
        let year = TaxYear::starting(2099);
        assert_eq!(year.end(), NaiveDate::from_ymd_opt(2100, 2, 28).unwrap());
    }

    #[test]
    fn test_containing_january_belongs_to_previous_year() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(TaxYear::containing(date), TaxYear::starting(2024));
    }

    #[test]
    fn test_containing_march_starts_new_year() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(TaxYear::containing(date), TaxYear::starting(2025));
    }

    #[test]
    fn test_containing_last_day_of_february() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        let year = TaxYear::containing(date);
        assert_eq!(year, TaxYear::starting(2024));
        assert!(year.contains(date));
    }

    #[test]
    fn test_contains_is_inclusive_of_bounds() {
        let year = TaxYear::starting(2024);
        assert!(year.contains(year.start()));
        assert!(year.contains(year.end()));
        assert!(!year.contains(year.start().pred_opt().unwrap()));
        assert!(!year.contains(year.end().succ_opt().unwrap()));
    }

    #[test]
    fn test_label_format() {
        assert_eq!(TaxYear::starting(2024).label(), "2024-2025");
        assert_eq!(TaxYear::starting(2024).to_string(), "2024-2025");
    }

    #[test]
    fn test_serde_round_trip() {
        let year = TaxYear::starting(2024);
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "2024");
        let back: TaxYear = serde_json::from_str(&json).unwrap();
        assert_eq!(back, year);
    }
}
