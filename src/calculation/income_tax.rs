//! Progressive income tax calculation.
//!
//! Annual tax is computed from the bracket schedule using precomputed
//! cumulative base amounts; the monthly withholding divides the annual net
//! figure over the sub-periods remaining in the tax year.

use rust_decimal::Decimal;

use crate::config::BracketSchedule;
use crate::error::{EngineError, EngineResult};

/// Calculates annual gross tax on a projected annual taxable income.
///
/// Finds the bracket whose `[lower, upper)` range contains the income and
/// applies `base_amount + rate * (income - lower)`. Incomes at a bracket
/// boundary fall into the upper bracket, which yields the same value at the
/// boundary because the schedule is contiguous.
///
/// # Arguments
///
/// * `brackets` - The validated bracket schedule for the tax year
/// * `income` - Projected annual taxable income
///
/// # Returns
///
/// The annual tax before rebates and credits. Zero or negative income
/// yields zero tax.
pub fn compute_annual_tax(brackets: &BracketSchedule, income: Decimal) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let bracket = brackets.bracket_for(income);
    bracket.base_amount + bracket.rate * (income - bracket.lower)
}

/// Divides an annual net tax over the sub-periods remaining in the tax
/// year, including the current one.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when `remaining_periods` is
/// zero; the caller derives it from the pay period and a zero means the
/// period fell outside the tax year.
pub fn compute_monthly_tax(annual_net_tax: Decimal, remaining_periods: u32) -> EngineResult<Decimal> {
    if remaining_periods == 0 {
        return Err(EngineError::CalculationError {
            message: "cannot spread annual tax over zero remaining periods".to_string(),
        });
    }
    Ok((annual_net_tax / Decimal::from(remaining_periods)).round_dp(2))
}
