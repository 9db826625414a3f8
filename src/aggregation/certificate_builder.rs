//! Certificate generation from finalized pay period results.
//!
//! Builds an employee tax certificate for a reconciliation window by
//! bucketing component amounts under SARS codes and reconstructing the
//! window's ETI from qualifying income. Generation is deterministic, so
//! regenerating from the same results yields identical buckets.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::calculation::{compute_eti_for_window, months_employed};
use crate::config::EtiSchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Certificate, CertificateStatus, CodeBucket, ComponentKind, EmployeeTaxProfile, PayPeriod,
    PayPeriodResult, TaxYear,
};

use super::codes::map_component;

/// The deterministic certificate number for an employee and tax year.
pub fn certificate_number(tax_year: TaxYear, employee_id: &str) -> String {
    format!("IRP5-{}-{}", tax_year.label(), employee_id)
}

/// Code-keyed accumulators for the three certificate sections. BTreeMaps
/// keep bucket ordering deterministic across regenerations.
#[derive(Debug, Default)]
struct BucketAccumulator {
    income: BTreeMap<&'static str, (&'static str, Decimal)>,
    deductions: BTreeMap<&'static str, (&'static str, Decimal)>,
    contributions: BTreeMap<&'static str, (&'static str, Decimal)>,
}

impl BucketAccumulator {
    fn add(&mut self, result: &PayPeriodResult) {
        for component in &result.components {
            let Some(code) = map_component(&component.name, component.kind) else {
                warn!(
                    employee = %result.employee_id,
                    component = %component.name,
                    "pay component has no SARS code mapping, dropped from certificate"
                );
                continue;
            };
            let section = match component.kind {
                ComponentKind::Earning => &mut self.income,
                ComponentKind::Deduction => &mut self.deductions,
                ComponentKind::EmployerContribution => &mut self.contributions,
            };
            let entry = section
                .entry(code.code())
                .or_insert((code.description(), Decimal::ZERO));
            entry.1 += component.amount;
        }
    }

    fn into_buckets(
        self,
    ) -> (Vec<CodeBucket>, Vec<CodeBucket>, Vec<CodeBucket>) {
        fn collect(map: BTreeMap<&'static str, (&'static str, Decimal)>) -> Vec<CodeBucket> {
            map.into_iter()
                .map(|(code, (description, amount))| CodeBucket {
                    code: code.to_string(),
                    description: description.to_string(),
                    amount,
                })
                .collect()
        }
        (
            collect(self.income),
            collect(self.deductions),
            collect(self.contributions),
        )
    }
}

/// Selects the finalized results for an employee inside the window.
fn window_results<'a>(
    employee_id: &str,
    window: &PayPeriod,
    results: &'a [PayPeriodResult],
) -> Vec<&'a PayPeriodResult> {
    results
        .iter()
        .filter(|r| {
            r.finalized
                && r.employee_id == employee_id
                && window.contains_date(r.period.start_date)
                && window.contains_date(r.period.end_date)
        })
        .collect()
}

/// Reconstructs the window ETI from the qualifying income of eligible
/// periods. The formula half is fixed by the month count at the window
/// start.
fn window_eti(
    employee: &EmployeeTaxProfile,
    window: &PayPeriod,
    results: &[&PayPeriodResult],
    eti: &EtiSchedule,
) -> Decimal {
    let qualifying_income: Decimal = results
        .iter()
        .filter(|r| r.eti_eligible)
        .map(|r| r.gross_pay)
        .sum();
    if qualifying_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let months_at_start = employee
        .date_of_joining
        .map(|joining| months_employed(joining, window.start_date))
        .unwrap_or(0);
    compute_eti_for_window(eti, qualifying_income, window, months_at_start)
}

/// Builds a certificate for one employee over a reconciliation window.
///
/// Only finalized results whose period falls inside the window contribute.
/// Components with no SARS code mapping are dropped with a warning.
///
/// # Arguments
///
/// * `employee` - The employee the certificate is for
/// * `tax_year` - The tax year being certified
/// * `window` - The reporting window (interim or full year)
/// * `results` - The pool of pay period results to aggregate
/// * `eti` - The ETI schedule used for the window reconstruction
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when the employee has no
/// finalized results inside the window.
pub fn build_certificate(
    employee: &EmployeeTaxProfile,
    tax_year: TaxYear,
    window: PayPeriod,
    results: &[PayPeriodResult],
    eti: &EtiSchedule,
) -> EngineResult<Certificate> {
    let selected = window_results(&employee.id, &window, results);
    if selected.is_empty() {
        return Err(EngineError::CalculationError {
            message: format!(
                "no finalized pay periods for {} in window {} to {}",
                employee.id, window.start_date, window.end_date
            ),
        });
    }

    let mut accumulator = BucketAccumulator::default();
    for result in &selected {
        accumulator.add(result);
    }
    let (income_details, deduction_details, contribution_details) = accumulator.into_buckets();

    let eti_amount = window_eti(employee, &window, &selected, eti);

    let mut certificate = Certificate {
        id: Uuid::new_v4(),
        certificate_number: certificate_number(tax_year, &employee.id),
        employee_id: employee.id.clone(),
        tax_year,
        window,
        income_details,
        deduction_details,
        contribution_details,
        paye: Decimal::ZERO,
        uif: Decimal::ZERO,
        sdl: Decimal::ZERO,
        eti: eti_amount,
        total_tax_payable: Decimal::ZERO,
        status: CertificateStatus::DataGenerated,
    };
    certificate.calculate_totals();
    Ok(certificate)
}

/// Regenerates an existing certificate's data in place.
///
/// The certificate keeps its identity and number; buckets, ETI, and totals
/// are rebuilt from the current results. Because bucketing is
/// deterministic, regenerating from unchanged results is idempotent.
///
/// # Errors
///
/// Returns [`EngineError::CertificateFinalized`] when the certificate is
/// finalized (it must be cancelled first), or
/// [`EngineError::CalculationError`] when no finalized results remain in
/// the window.
pub fn regenerate_certificate(
    certificate: &mut Certificate,
    employee: &EmployeeTaxProfile,
    results: &[PayPeriodResult],
    eti: &EtiSchedule,
) -> EngineResult<()> {
    certificate.ensure_mutable()?;

    let rebuilt = build_certificate(
        employee,
        certificate.tax_year,
        certificate.window,
        results,
        eti,
    )?;
    certificate.income_details = rebuilt.income_details;
    certificate.deduction_details = rebuilt.deduction_details;
    certificate.contribution_details = rebuilt.contribution_details;
    certificate.eti = rebuilt.eti;
    certificate.status = CertificateStatus::DataGenerated;
    certificate.calculate_totals();
    Ok(())
}
