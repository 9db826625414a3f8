//! Statutory calculation functions.
//!
//! Pure functions over resolved schedules: progressive income tax, rebates
//! and medical credits, UIF/SDL levies, and the two halves of the
//! Employment Tax Incentive (eligibility and amount), tied together by the
//! pay period orchestrator.

mod eti_amount;
mod eti_eligibility;
mod income_tax;
mod levies;
mod payroll_run;
mod rebates;

pub use eti_amount::{compute_eti_amount, compute_eti_for_window};
pub use eti_eligibility::{ETI_PROGRAM_START, EtiEvaluation, evaluate_eti, months_employed};
pub use income_tax::{compute_annual_tax, compute_monthly_tax};
pub use levies::{UifContribution, sdl_contribution, uif_contribution};
pub use payroll_run::{
    PAYE_COMPONENT, SDL_COMPONENT, UIF_EMPLOYEE_COMPONENT, UIF_EMPLOYER_COMPONENT,
    calculate_pay_period,
};
pub use rebates::{
    RebateOutcome, age_on, apply_medical_credit, apply_rebates, monthly_medical_credit,
    total_rebate,
};
