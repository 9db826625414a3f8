//! UIF and SDL levy calculations.
//!
//! Both levies run off the same remuneration base: the period gross pay.
//! UIF is 1% from each side, capped at a monthly remuneration ceiling; SDL
//! is an uncapped employer-only levy.

use rust_decimal::Decimal;

use crate::config::LevyRates;

/// The two sides of the Unemployment Insurance Fund contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UifContribution {
    /// Amount withheld from the employee.
    pub employee: Decimal,
    /// Matching amount paid by the employer.
    pub employer: Decimal,
}

/// Calculates both sides of the UIF contribution for a period.
///
/// The contribution base is the gross pay capped at the monthly ceiling;
/// each side contributes the configured rate on that base.
pub fn uif_contribution(rates: &LevyRates, gross_pay: Decimal) -> UifContribution {
    let base = gross_pay.min(rates.uif_monthly_ceiling).max(Decimal::ZERO);
    let amount = (rates.uif_rate * base).round_dp(2);
    UifContribution {
        employee: amount,
        employer: amount,
    }
}

/// Calculates the Skills Development Levy for a period.
///
/// Employer-only and uncapped.
pub fn sdl_contribution(rates: &LevyRates, gross_pay: Decimal) -> Decimal {
    (rates.sdl_rate * gross_pay.max(Decimal::ZERO)).round_dp(2)
}
