//! Age-based rebates and medical scheme fees tax credits.
//!
//! Rebates are annual, cumulative by age threshold, and applied after the
//! bracket calculation. Medical credits are configured monthly and
//! annualised before application. Neither may push tax below zero.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::{MedicalCreditSchedule, RebateSchedule};

/// The outcome of applying age-based rebates to annual gross tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebateOutcome {
    /// The total annual rebate applied.
    pub rebate: Decimal,
    /// Annual tax after rebates, clamped at zero.
    pub tax_after_rebates: Decimal,
}

/// Calculates a person's age in completed years on a given date.
///
/// The year difference is reduced by one when the birthday's (month, day)
/// has not yet been reached, so an employee turning 65 on the last day of
/// the tax year counts as 65 for that year.
pub fn age_on(date_of_birth: NaiveDate, date: NaiveDate) -> u32 {
    let mut age = date.year() - date_of_birth.year();
    if (date.month(), date.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Returns the cumulative annual rebate for an age.
///
/// Everyone receives the primary rebate; the secondary is added from age
/// 65 and the tertiary from age 75.
pub fn total_rebate(schedule: &RebateSchedule, age: u32) -> Decimal {
    let mut rebate = schedule.primary;
    if age >= 65 {
        rebate += schedule.secondary;
    }
    if age >= 75 {
        rebate += schedule.tertiary;
    }
    rebate
}

/// Applies age-based rebates to annual gross tax.
///
/// Age is determined at the tax year end. A missing date of birth gets the
/// primary rebate only; the caller records the degraded input separately.
///
/// # Arguments
///
/// * `schedule` - Rebate amounts for the tax year
/// * `gross_tax` - Annual tax from the bracket calculation
/// * `date_of_birth` - The employee's date of birth, if recorded
/// * `year_end` - The last day of the tax year
pub fn apply_rebates(
    schedule: &RebateSchedule,
    gross_tax: Decimal,
    date_of_birth: Option<NaiveDate>,
    year_end: NaiveDate,
) -> RebateOutcome {
    let rebate = match date_of_birth {
        Some(dob) => total_rebate(schedule, age_on(dob, year_end)),
        None => schedule.primary,
    };
    RebateOutcome {
        rebate,
        tax_after_rebates: (gross_tax - rebate).max(Decimal::ZERO),
    }
}

/// Returns the monthly medical scheme fees tax credit for a dependant
/// count.
///
/// Zero dependants earns the main member credit only; the first dependant
/// adds its own amount and each further dependant adds the additional
/// amount. A missing count (`None`) yields zero; the caller emits a
/// `DATA_INCOMPLETE` warning rather than guessing a household size.
pub fn monthly_medical_credit(
    schedule: &MedicalCreditSchedule,
    dependants: Option<u32>,
) -> Decimal {
    match dependants {
        None => Decimal::ZERO,
        Some(0) => schedule.main_member,
        Some(1) => schedule.main_member + schedule.first_dependant,
        Some(n) => {
            schedule.main_member
                + schedule.first_dependant
                + schedule.additional_dependant * Decimal::from(n - 1)
        }
    }
}

/// Applies an annual medical credit to tax already net of rebates,
/// clamping at zero.
pub fn apply_medical_credit(tax_after_rebates: Decimal, annual_credit: Decimal) -> Decimal {
    (tax_after_rebates - annual_credit).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rebate_schedule() -> RebateSchedule {
        RebateSchedule {
            primary: dec("17235"),
            secondary: dec("9444"),
            tertiary: dec("3145"),
        }
    }

    fn medical_schedule() -> MedicalCreditSchedule {
        MedicalCreditSchedule {
            main_member: dec("364"),
            first_dependant: dec("364"),
            additional_dependant: dec("246"),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = ymd(1960, 6, 15);
        assert_eq!(age_on(dob, ymd(2025, 6, 14)), 64);
        assert_eq!(age_on(dob, ymd(2025, 6, 15)), 65);
    }

    #[test]
    fn test_age_birthday_on_tax_year_end() {
        // Turning 65 exactly on 28 February counts for that tax year.
        let dob = ymd(1960, 2, 28);
        assert_eq!(age_on(dob, ymd(2025, 2, 28)), 65);
    }

    #[test]
    fn test_rebates_cumulative_by_age() {
        let schedule = rebate_schedule();
        assert_eq!(total_rebate(&schedule, 40), dec("17235"));
        assert_eq!(total_rebate(&schedule, 65), dec("26679"));
        assert_eq!(total_rebate(&schedule, 75), dec("29824"));
    }

    #[test]
    fn test_net_tax_ordering_across_age_thresholds() {
        let schedule = rebate_schedule();
        let year_end = ymd(2025, 2, 28);
        let gross = dec("100000");
        // Same income, ages 64 / 65 / 75 at the tax year end.
        let at_64 = apply_rebates(&schedule, gross, Some(ymd(1960, 3, 1)), year_end);
        let at_65 = apply_rebates(&schedule, gross, Some(ymd(1960, 1, 1)), year_end);
        let at_75 = apply_rebates(&schedule, gross, Some(ymd(1950, 1, 1)), year_end);

        assert!(at_75.tax_after_rebates <= at_65.tax_after_rebates);
        assert!(at_65.tax_after_rebates <= at_64.tax_after_rebates);
        assert_eq!(
            at_64.tax_after_rebates - at_65.tax_after_rebates,
            schedule.secondary
        );
    }

    #[test]
    fn test_apply_rebates_clamps_at_zero() {
        let schedule = rebate_schedule();
        let outcome = apply_rebates(
            &schedule,
            dec("10000"),
            Some(ymd(1990, 1, 1)),
            ymd(2025, 2, 28),
        );
        assert_eq!(outcome.rebate, dec("17235"));
        assert_eq!(outcome.tax_after_rebates, dec("0"));
    }

    #[test]
    fn test_apply_rebates_missing_dob_uses_primary_only() {
        let schedule = rebate_schedule();
        let outcome = apply_rebates(&schedule, dec("66000"), None, ymd(2025, 2, 28));
        assert_eq!(outcome.rebate, dec("17235"));
        assert_eq!(outcome.tax_after_rebates, dec("48765"));
    }

    #[test]
    fn test_medical_credit_tiers() {
        let schedule = medical_schedule();
        assert_eq!(monthly_medical_credit(&schedule, Some(0)), dec("364"));
        assert_eq!(monthly_medical_credit(&schedule, Some(1)), dec("728"));
        // Main + first + 2 additional: 364 + 364 + 492
        assert_eq!(monthly_medical_credit(&schedule, Some(3)), dec("1220"));
    }

    #[test]
    fn test_medical_credit_missing_count_is_zero() {
        let schedule = medical_schedule();
        assert_eq!(monthly_medical_credit(&schedule, None), dec("0"));
    }

    #[test]
    fn test_apply_medical_credit_clamps_at_zero() {
        assert_eq!(apply_medical_credit(dec("4000"), dec("4368")), dec("0"));
        assert_eq!(apply_medical_credit(dec("48765"), dec("4368")), dec("44397"));
    }
}
