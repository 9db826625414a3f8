//! Employment Tax Incentive eligibility.
//!
//! Eligibility is an ordered short-circuit filter chain; the first failing
//! check determines the recorded reason. The outcome is never an error:
//! an ineligible employee simply earns no incentive.

use chrono::{Datelike, NaiveDate};

use crate::models::EmployeeTaxProfile;

use super::rebates::age_on;

/// The date the Employment Tax Incentive programme came into effect.
/// Employees hired before this date never qualify.
pub const ETI_PROGRAM_START: NaiveDate = match NaiveDate::from_ymd_opt(2013, 10, 1) {
    Some(date) => date,
    None => unreachable!(),
};

/// The outcome of an ETI eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtiEvaluation {
    /// Whether the employee qualifies this period.
    pub eligible: bool,
    /// The first failing check, or a confirmation when eligible.
    pub reason: String,
    /// Qualifying months employed at the period end (1-based).
    pub months_employed: u32,
}

impl EtiEvaluation {
    fn ineligible(reason: impl Into<String>, months_employed: u32) -> Self {
        Self {
            eligible: false,
            reason: reason.into(),
            months_employed,
        }
    }
}

/// Counts qualifying employment months at a reference date.
///
/// The count is the calendar month difference plus one once the joining
/// day-of-month has been reached, so the first month of employment counts
/// as month 1. A joining date after the reference date yields zero.
pub fn months_employed(date_of_joining: NaiveDate, reference: NaiveDate) -> u32 {
    if date_of_joining > reference {
        return 0;
    }
    let months = (reference.year() - date_of_joining.year()) * 12
        + reference.month() as i32
        - date_of_joining.month() as i32;
    let completed = if reference.day() >= date_of_joining.day() {
        months + 1
    } else {
        months
    };
    completed.max(0) as u32
}

/// Evaluates the ETI eligibility filter chain for one employee and period.
///
/// Checks, in order: the company-level enablement flag, a recorded date of
/// birth, the 18-29 age window at the period end (a special economic zone
/// employer waives the upper bound only), hiring on or after the programme
/// start, at most 24 qualifying months, and a recorded ID number.
///
/// # Arguments
///
/// * `employee` - The employee's tax profile
/// * `period_end` - The last day of the pay period
/// * `incentive_enabled` - The company-level ETI flag
pub fn evaluate_eti(
    employee: &EmployeeTaxProfile,
    period_end: NaiveDate,
    incentive_enabled: bool,
) -> EtiEvaluation {
    if !incentive_enabled {
        return EtiEvaluation::ineligible(
            "Employment Tax Incentive is disabled for the company",
            0,
        );
    }

    let Some(date_of_birth) = employee.date_of_birth else {
        return EtiEvaluation::ineligible("Employee has no date of birth recorded", 0);
    };

    let age = age_on(date_of_birth, period_end);
    if age < 18 {
        return EtiEvaluation::ineligible(
            format!("Employee age ({}) not within 18-29 range", age),
            0,
        );
    }
    if age > 29 && !employee.special_economic_zone {
        return EtiEvaluation::ineligible(
            format!("Employee age ({}) not within 18-29 range", age),
            0,
        );
    }

    let Some(date_of_joining) = employee.date_of_joining else {
        return EtiEvaluation::ineligible("Employee has no date of joining recorded", 0);
    };
    if date_of_joining < ETI_PROGRAM_START {
        return EtiEvaluation::ineligible(
            format!(
                "Employee joined before the incentive programme start ({})",
                ETI_PROGRAM_START
            ),
            0,
        );
    }

    let months = months_employed(date_of_joining, period_end);
    if months > 24 {
        return EtiEvaluation::ineligible(
            format!("Employee has exhausted the 24-month incentive window ({} months)", months),
            months,
        );
    }

    if !employee.has_id_number() {
        return EtiEvaluation::ineligible("Employee has no ID number recorded", months);
    }

    EtiEvaluation {
        eligible: true,
        reason: "Eligible".to_string(),
        months_employed: months,
    }
}
