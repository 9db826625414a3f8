//! Employee tax certificate model.
//!
//! This module defines the [`Certificate`] aggregate: per-employee totals
//! over a reconciliation window, bucketed into SARS income, deduction, and
//! employer-contribution codes, with the submission lifecycle the revenue
//! authority expects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{PayPeriod, TaxYear};

/// The lifecycle state of a certificate.
///
/// Finalized certificates are submission-locked. Cancellation reverts to
/// draft semantics but never nulls already-computed amounts, preserving the
/// audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    /// Freshly created, no data generated yet.
    Draft,
    /// Code buckets have been generated from payroll results.
    DataGenerated,
    /// Totals recomputed and locked for submission.
    Finalized,
    /// Cancelled after finalization; amounts are retained.
    Cancelled,
}

/// One SARS code bucket on a certificate: a code, its official description,
/// and the summed amount over the certificate window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBucket {
    /// The four-digit SARS code (e.g. "3601").
    pub code: String,
    /// The official description for the code.
    pub description: String,
    /// The summed amount across all periods in the window.
    pub amount: Decimal,
}

/// An employee tax certificate over a from/to window.
///
/// Built by the certificate builder from finalized [`PayPeriodResult`]s;
/// the model itself only knows how to total its buckets and walk its
/// lifecycle.
///
/// [`PayPeriodResult`]: super::PayPeriodResult
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// Unique identifier for this certificate.
    pub id: Uuid,
    /// The certificate number, e.g. "IRP5-2024-2025-EMP-0001".
    pub certificate_number: String,
    /// The employee the certificate is for.
    pub employee_id: String,
    /// The tax year being certified.
    pub tax_year: TaxYear,
    /// The reporting window (interim: March-August; final: full tax year).
    pub window: PayPeriod,
    /// Income buckets, ordered by SARS code.
    pub income_details: Vec<CodeBucket>,
    /// Employee deduction buckets, ordered by SARS code.
    pub deduction_details: Vec<CodeBucket>,
    /// Employer contribution buckets, ordered by SARS code.
    pub contribution_details: Vec<CodeBucket>,
    /// Total PAYE over the window (code 4102).
    pub paye: Decimal,
    /// Total UIF over the window, employee and employer sides (code 4141).
    pub uif: Decimal,
    /// Total SDL over the window (code 4142).
    pub sdl: Decimal,
    /// ETI for the window, reconstructed from qualifying income.
    pub eti: Decimal,
    /// `paye + uif + sdl - eti`.
    pub total_tax_payable: Decimal,
    /// Current lifecycle state.
    pub status: CertificateStatus,
}

impl Certificate {
    /// Recomputes the statutory totals from the code buckets.
    ///
    /// PAYE comes from deduction code 4102; UIF from code 4141 on both the
    /// deduction and contribution side; SDL from code 4142 (normally an
    /// employer contribution, but a deduction-side 4142 is honoured too).
    pub fn calculate_totals(&mut self) {
        let mut paye = Decimal::ZERO;
        let mut uif = Decimal::ZERO;
        let mut sdl = Decimal::ZERO;

        for bucket in &self.deduction_details {
            match bucket.code.as_str() {
                "4102" => paye += bucket.amount,
                "4141" => uif += bucket.amount,
                "4142" => sdl += bucket.amount,
                _ => {}
            }
        }
        for bucket in &self.contribution_details {
            match bucket.code.as_str() {
                "4141" => uif += bucket.amount,
                "4142" => sdl += bucket.amount,
                _ => {}
            }
        }

        self.paye = paye;
        self.uif = uif;
        self.sdl = sdl;
        self.total_tax_payable = self.paye + self.uif + self.sdl - self.eti;
    }

    /// Recomputes totals one last time and locks the certificate.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CertificateFinalized`] if already finalized.
    pub fn finalize(&mut self) -> EngineResult<()> {
        if self.status == CertificateStatus::Finalized {
            return Err(EngineError::CertificateFinalized {
                certificate: self.certificate_number.clone(),
            });
        }
        self.calculate_totals();
        self.status = CertificateStatus::Finalized;
        Ok(())
    }

    /// Cancels the certificate, reverting it to draft semantics.
    ///
    /// Amounts already computed are retained for the audit trail.
    pub fn cancel(&mut self) {
        self.status = CertificateStatus::Cancelled;
    }

    /// True when the certificate counts toward declarations (not cancelled).
    pub fn is_active(&self) -> bool {
        self.status != CertificateStatus::Cancelled
    }

    /// Guard for regeneration: finalized certificates must be cancelled
    /// before their data can be rebuilt.
    pub fn ensure_mutable(&self) -> EngineResult<()> {
        if self.status == CertificateStatus::Finalized {
            return Err(EngineError::CertificateFinalized {
                certificate: self.certificate_number.clone(),
            });
        }
        Ok(())
    }
}
