//! Pay period orchestration.
//!
//! Runs the full statutory sequence for one employee and one pay period:
//! annualised PAYE with rebates and medical credits, UIF on both sides,
//! SDL, and the ETI evaluation, producing a [`PayPeriodResult`] with the
//! statutory component lines appended.

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::StatutorySchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculationWarning, ComponentKind, EmployeeTaxProfile, PayComponent, PayPeriod,
    PayPeriodResult,
};

use super::eti_amount::compute_eti_amount;
use super::eti_eligibility::evaluate_eti;
use super::income_tax::{compute_annual_tax, compute_monthly_tax};
use super::levies::{sdl_contribution, uif_contribution};
use super::rebates::{apply_medical_credit, apply_rebates, monthly_medical_credit};

/// Component name for the PAYE deduction line.
pub const PAYE_COMPONENT: &str = "PAYE";
/// Component name for the employee-side UIF deduction line.
pub const UIF_EMPLOYEE_COMPONENT: &str = "UIF Employee Contribution";
/// Component name for the employer-side UIF contribution line.
pub const UIF_EMPLOYER_COMPONENT: &str = "UIF Employer Contribution";
/// Component name for the SDL contribution line.
pub const SDL_COMPONENT: &str = "SDL Contribution";

/// Months per year for annualisation and the monthly sub-period count.
const PERIODS_PER_YEAR: u32 = 12;

/// Sub-periods remaining in the tax year at a pay period, including the
/// period itself. March is 12, February is 1.
fn remaining_periods(period: &PayPeriod) -> u32 {
    let month = period.end_date.month();
    if month >= 3 { 15 - month } else { 3 - month }
}

/// Runs the complete statutory calculation for one employee and period.
///
/// Gross pay is the sum of the supplied earning components. Payroll may
/// supply a projected annual taxable income (year-to-date actuals plus
/// expected remaining earnings); when it does not, the projection defaults
/// to twelve times the period gross. The annual net tax (after rebates and
/// medical credits, each clamped at zero) is spread over the sub-periods
/// remaining in the tax year. The projection actually used is recorded on
/// the result.
///
/// The returned result carries every supplied component plus the four
/// statutory lines the engine appends, and a warning for each degraded
/// input (missing dependant count or date of birth).
///
/// # Arguments
///
/// * `schedule` - The statutory schedule for the tax year
/// * `employee` - The employee's tax profile
/// * `period` - The pay period being calculated
/// * `components` - The pay components supplied by payroll (earnings and
///   any non-statutory deductions)
/// * `projected_annual_income` - Payroll's own annual taxable projection,
///   when it has one
/// * `incentive_enabled` - The company-level ETI flag
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] when the period is inverted
/// or falls outside the schedule's tax year.
pub fn calculate_pay_period(
    schedule: &StatutorySchedule,
    employee: &EmployeeTaxProfile,
    period: &PayPeriod,
    components: &[PayComponent],
    projected_annual_income: Option<Decimal>,
    incentive_enabled: bool,
) -> EngineResult<PayPeriodResult> {
    if period.end_date < period.start_date {
        return Err(EngineError::InvalidDateRange {
            message: format!(
                "period end {} precedes start {}",
                period.end_date, period.start_date
            ),
        });
    }
    if !schedule.tax_year.contains(period.start_date) || !schedule.tax_year.contains(period.end_date)
    {
        return Err(EngineError::InvalidDateRange {
            message: format!(
                "period {} to {} falls outside tax year {}",
                period.start_date,
                period.end_date,
                schedule.tax_year.label()
            ),
        });
    }

    let mut warnings = Vec::new();

    let gross_pay: Decimal = components
        .iter()
        .filter(|c| c.kind == ComponentKind::Earning)
        .map(|c| c.amount)
        .sum();

    // Annualised (non-cumulative) PAYE projection.
    let annual_taxable_income =
        projected_annual_income.unwrap_or_else(|| gross_pay * Decimal::from(PERIODS_PER_YEAR));
    let annual_gross_tax = compute_annual_tax(&schedule.brackets, annual_taxable_income);

    if employee.date_of_birth.is_none() {
        warnings.push(CalculationWarning {
            code: "DATA_INCOMPLETE".to_string(),
            message: "No date of birth recorded; primary rebate assumed".to_string(),
        });
    }
    let rebate_outcome = apply_rebates(
        &schedule.rebates,
        annual_gross_tax,
        employee.date_of_birth,
        schedule.tax_year.end(),
    );

    if employee.medical_dependants.is_none() {
        warnings.push(CalculationWarning {
            code: "DATA_INCOMPLETE".to_string(),
            message: "No dependant count recorded; medical credit defaulted to zero".to_string(),
        });
    }
    let annual_medical_credit =
        monthly_medical_credit(&schedule.medical_credits, employee.medical_dependants)
            * Decimal::from(PERIODS_PER_YEAR);
    let annual_net_tax =
        apply_medical_credit(rebate_outcome.tax_after_rebates, annual_medical_credit);

    let remaining = remaining_periods(period);
    let monthly_tax = compute_monthly_tax(annual_net_tax, remaining)?;

    let uif = uif_contribution(&schedule.levies, gross_pay);
    let sdl = sdl_contribution(&schedule.levies, gross_pay);

    let evaluation = evaluate_eti(employee, period.end_date, incentive_enabled);
    let eti_amount = if evaluation.eligible {
        compute_eti_amount(
            &schedule.eti,
            gross_pay,
            evaluation.months_employed,
            employee.monthly_hours,
        )
    } else {
        Decimal::ZERO
    };

    debug!(
        employee = %employee.id,
        period = %period.month_key(),
        %gross_pay,
        %monthly_tax,
        eti = %eti_amount,
        "pay period calculated"
    );

    let mut all_components = components.to_vec();
    all_components.push(PayComponent::new(
        PAYE_COMPONENT,
        ComponentKind::Deduction,
        monthly_tax,
    ));
    all_components.push(PayComponent::new(
        UIF_EMPLOYEE_COMPONENT,
        ComponentKind::Deduction,
        uif.employee,
    ));
    all_components.push(PayComponent::new(
        UIF_EMPLOYER_COMPONENT,
        ComponentKind::EmployerContribution,
        uif.employer,
    ));
    all_components.push(PayComponent::new(
        SDL_COMPONENT,
        ComponentKind::EmployerContribution,
        sdl,
    ));

    Ok(PayPeriodResult {
        id: Uuid::new_v4(),
        employee_id: employee.id.clone(),
        period: *period,
        gross_pay,
        annual_taxable_income,
        remaining_periods: remaining,
        annual_gross_tax,
        rebate_applied: rebate_outcome.rebate,
        medical_credit_applied: annual_medical_credit.min(rebate_outcome.tax_after_rebates),
        monthly_tax,
        uif_employee: uif.employee,
        uif_employer: uif.employer,
        sdl,
        eti_eligible: evaluation.eligible,
        eti_reason: evaluation.reason,
        eti_months_employed: evaluation.months_employed,
        eti_amount,
        components: all_components,
        warnings,
        finalized: false,
    })
}
