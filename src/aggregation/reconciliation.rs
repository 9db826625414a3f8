//! Interim and annual reconciliation.
//!
//! Compares what the monthly declarations said was payable against what
//! the certificates certify over the same window. Mismatches are findings,
//! not failures: every discrepancy above the tolerance is collected into
//! the report and nothing is thrown.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Certificate, EmployerDeclaration, PayPeriod, TaxYear};

/// Which reconciliation window is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationKind {
    /// March through August of the tax year.
    Interim,
    /// The full tax year.
    Annual,
}

impl ReconciliationKind {
    /// The date window this reconciliation covers within a tax year.
    pub fn window(&self, tax_year: TaxYear) -> PayPeriod {
        let start = tax_year.start();
        let end = match self {
            ReconciliationKind::Interim => {
                NaiveDate::from_ymd_opt(tax_year.start_year(), 8, 31)
                    .expect("August 31 is always valid")
            }
            ReconciliationKind::Annual => tax_year.end(),
        };
        PayPeriod {
            start_date: start,
            end_date: end,
        }
    }
}

/// One discrepancy between declared and certified totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationMismatch {
    /// The statutory total that disagrees (e.g. "paye").
    pub field: String,
    /// The total across the window's declarations.
    pub declared: Decimal,
    /// The total across the window's certificates.
    pub certified: Decimal,
    /// `declared - certified`.
    pub difference: Decimal,
}

/// The outcome of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// The employer reconciled.
    pub company: String,
    /// The tax year reconciled.
    pub tax_year: TaxYear,
    /// Interim or annual.
    pub kind: ReconciliationKind,
    /// The date window covered.
    pub window: PayPeriod,
    /// Declared PAYE before the ETI offset.
    pub declared_paye: Decimal,
    /// Declared UIF (both sides).
    pub declared_uif: Decimal,
    /// Declared SDL.
    pub declared_sdl: Decimal,
    /// ETI utilised across the declarations.
    pub declared_eti: Decimal,
    /// Certified PAYE.
    pub certified_paye: Decimal,
    /// Certified UIF.
    pub certified_uif: Decimal,
    /// Certified SDL.
    pub certified_sdl: Decimal,
    /// Certified ETI.
    pub certified_eti: Decimal,
    /// All discrepancies above the tolerance.
    pub mismatches: Vec<ReconciliationMismatch>,
}

impl ReconciliationReport {
    /// True when every total agrees within the tolerance.
    pub fn balanced(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// First day of a declaration's month, parsed from its "YYYY-MM" key.
/// Malformed keys fall outside every window.
fn month_start(period: &str) -> Option<NaiveDate> {
    let (year, month) = period.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Reconciles a company's declarations against its certificates.
///
/// Sums active declarations whose month falls inside the window and
/// active certificates for the same employer pool, then compares PAYE,
/// UIF, SDL, and ETI. Differences at or below `tolerance` (absolute) are
/// treated as rounding and ignored.
pub fn reconcile(
    company: &str,
    tax_year: TaxYear,
    kind: ReconciliationKind,
    declarations: &[EmployerDeclaration],
    certificates: &[Certificate],
    tolerance: Decimal,
) -> ReconciliationReport {
    let window = kind.window(tax_year);

    let mut declared_paye = Decimal::ZERO;
    let mut declared_uif = Decimal::ZERO;
    let mut declared_sdl = Decimal::ZERO;
    let mut declared_eti = Decimal::ZERO;

    for declaration in declarations.iter().filter(|d| {
        d.is_active()
            && d.company == company
            && month_start(&d.period).is_some_and(|date| window.contains_date(date))
    }) {
        declared_paye += declaration.gross_paye;
        declared_uif += declaration.uif_payable;
        declared_sdl += declaration.sdl_payable;
        declared_eti += declaration.eti_utilized;
    }

    let mut certified_paye = Decimal::ZERO;
    let mut certified_uif = Decimal::ZERO;
    let mut certified_sdl = Decimal::ZERO;
    let mut certified_eti = Decimal::ZERO;

    for certificate in certificates
        .iter()
        .filter(|c| c.is_active() && c.tax_year == tax_year && c.window == window)
    {
        certified_paye += certificate.paye;
        certified_uif += certificate.uif;
        certified_sdl += certificate.sdl;
        certified_eti += certificate.eti;
    }

    let mut mismatches = Vec::new();
    let mut compare = |field: &str, declared: Decimal, certified: Decimal| {
        let difference = declared - certified;
        if difference.abs() > tolerance {
            mismatches.push(ReconciliationMismatch {
                field: field.to_string(),
                declared,
                certified,
                difference,
            });
        }
    };
    compare("paye", declared_paye, certified_paye);
    compare("uif", declared_uif, certified_uif);
    compare("sdl", declared_sdl, certified_sdl);
    compare("eti", declared_eti, certified_eti);

    info!(
        %company,
        tax_year = %tax_year.label(),
        ?kind,
        mismatches = mismatches.len(),
        "reconciliation complete"
    );

    ReconciliationReport {
        company: company.to_string(),
        tax_year,
        kind,
        window,
        declared_paye,
        declared_uif,
        declared_sdl,
        declared_eti,
        certified_paye,
        certified_uif,
        certified_sdl,
        certified_eti,
        mismatches,
    }
}
