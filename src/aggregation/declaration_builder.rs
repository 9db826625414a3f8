//! Monthly employer declaration generation.
//!
//! Aggregates finalized pay period results for one company and calendar
//! month into the monthly return, running the ETI utilisation chain: the
//! incentive offsets PAYE up to the gross amount and the remainder is
//! carried forward.

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::models::{DeclarationStatus, EmployerDeclaration, PayPeriodResult};

/// Builds the monthly declaration for a company.
///
/// Only finalized results whose period starts in the declaration month
/// contribute. The ETI utilisation chain caps the offset at gross PAYE so
/// net PAYE never goes negative; unused incentive is carried forward.
///
/// # Arguments
///
/// * `company` - The employer the declaration is for
/// * `month_key` - The declaration month, e.g. "2024-07"
/// * `results` - The pool of pay period results to aggregate
/// * `eti_brought_forward` - Unused ETI from the previous declaration
pub fn build_declaration(
    company: &str,
    month_key: &str,
    results: &[PayPeriodResult],
    eti_brought_forward: Decimal,
) -> EmployerDeclaration {
    let mut gross_paye = Decimal::ZERO;
    let mut eti_generated = Decimal::ZERO;
    let mut uif_payable = Decimal::ZERO;
    let mut sdl_payable = Decimal::ZERO;

    for result in results
        .iter()
        .filter(|r| r.finalized && r.period.month_key() == month_key)
    {
        gross_paye += result.monthly_tax;
        eti_generated += result.eti_amount;
        uif_payable += result.uif_employee + result.uif_employer;
        sdl_payable += result.sdl;
    }

    let total_eti_available = eti_generated + eti_brought_forward;
    let eti_utilized = total_eti_available.min(gross_paye);
    let net_paye = gross_paye - eti_utilized;
    let eti_carried_forward = total_eti_available - eti_utilized;

    debug!(
        %company,
        period = %month_key,
        %gross_paye,
        %eti_utilized,
        %eti_carried_forward,
        "declaration built"
    );

    EmployerDeclaration {
        id: Uuid::new_v4(),
        company: company.to_string(),
        period: month_key.to_string(),
        gross_paye,
        eti_generated,
        eti_brought_forward,
        total_eti_available,
        eti_utilized,
        net_paye,
        eti_carried_forward,
        uif_payable,
        sdl_payable,
        status: DeclarationStatus::Draft,
    }
}
