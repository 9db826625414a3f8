//! Property tests for the statutory arithmetic: monotonicity and
//! continuity of the progressive tax, the UIF ceiling, and ETI bounds.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use za_payroll_engine::calculation::{
    compute_annual_tax, compute_eti_amount, uif_contribution,
};
use za_payroll_engine::config::ScheduleLoader;
use za_payroll_engine::models::TaxYear;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn loader() -> ScheduleLoader {
    ScheduleLoader::load("./config/za").unwrap()
}

/// Rand amounts in cents up to R3,000,000, covering every bracket.
fn income() -> impl Strategy<Value = Decimal> {
    (0i64..300_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Monthly remuneration in cents up to R10,000, covering every ETI band
/// and both sides of the floor.
fn remuneration() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn annual_tax_is_monotone(a in income(), b in income()) {
        let loader = loader();
        let schedule = loader.schedule(TaxYear::starting(2024)).unwrap();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            compute_annual_tax(&schedule.brackets, low)
                <= compute_annual_tax(&schedule.brackets, high)
        );
    }

    #[test]
    fn annual_tax_never_exceeds_income(income in income()) {
        let loader = loader();
        let schedule = loader.schedule(TaxYear::starting(2024)).unwrap();
        let tax = compute_annual_tax(&schedule.brackets, income);
        prop_assert!(tax >= Decimal::ZERO);
        prop_assert!(tax <= income);
    }

    #[test]
    fn annual_tax_has_no_jumps_at_small_steps(income in income()) {
        // A one-cent raise can never cost more than one cent in tax
        // (marginal rates are all below 100%).
        let loader = loader();
        let schedule = loader.schedule(TaxYear::starting(2024)).unwrap();
        let step = dec("0.01");
        let here = compute_annual_tax(&schedule.brackets, income);
        let there = compute_annual_tax(&schedule.brackets, income + step);
        prop_assert!(there >= here);
        prop_assert!(there - here <= step);
    }

    #[test]
    fn uif_sides_match_and_respect_ceiling(gross in income()) {
        let loader = loader();
        let schedule = loader.schedule(TaxYear::starting(2024)).unwrap();
        let uif = uif_contribution(&schedule.levies, gross);
        prop_assert_eq!(uif.employee, uif.employer);
        prop_assert!(uif.employee >= Decimal::ZERO);
        // 1% of the 17712 ceiling.
        prop_assert!(uif.employee <= dec("177.12"));
    }

    #[test]
    fn eti_amount_is_bounded(remuneration in remuneration(), months in 0u32..30) {
        let loader = loader();
        let schedule = loader.schedule(TaxYear::starting(2024)).unwrap();
        let amount = compute_eti_amount(&schedule.eti, remuneration, months, None);
        prop_assert!(amount >= Decimal::ZERO);
        // The flat first-year band is the schedule maximum.
        prop_assert!(amount <= dec("1000"));
        if months == 0 || months > 24 {
            prop_assert_eq!(amount, Decimal::ZERO);
        }
    }

    #[test]
    fn eti_below_floor_is_zero(cents in 0i64..200_000, months in 1u32..25) {
        let loader = loader();
        let schedule = loader.schedule(TaxYear::starting(2024)).unwrap();
        let below_floor = Decimal::new(cents, 2);
        prop_assume!(below_floor < schedule.eti.minimum_monthly_remuneration);
        prop_assert_eq!(
            compute_eti_amount(&schedule.eti, below_floor, months, None),
            Decimal::ZERO
        );
    }
}
