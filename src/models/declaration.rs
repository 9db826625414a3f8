//! Monthly employer declaration model.
//!
//! This module defines the [`EmployerDeclaration`] aggregate (the monthly
//! PAYE/UIF/SDL/ETI return) and the [`DeclarationSet`] that enforces the
//! one-active-declaration-per-period invariant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The lifecycle state of an employer declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationStatus {
    /// Figures computed but not yet submitted.
    Draft,
    /// Submitted to the revenue authority.
    Submitted,
    /// Cancelled; does not count toward reconciliation.
    Cancelled,
}

/// A monthly employer declaration for one company.
///
/// Carries the ETI utilisation chain: ETI generated in the month plus the
/// balance brought forward is offset against gross PAYE, capped so net PAYE
/// never goes negative; the unused remainder is carried forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerDeclaration {
    /// Unique identifier for this declaration.
    pub id: Uuid,
    /// The employer the declaration belongs to.
    pub company: String,
    /// The declaration period as a month key, e.g. "2024-07".
    pub period: String,
    /// PAYE withheld across all employees before ETI offset.
    pub gross_paye: Decimal,
    /// ETI generated by qualifying employees this month.
    pub eti_generated: Decimal,
    /// ETI balance brought forward from the previous declaration.
    pub eti_brought_forward: Decimal,
    /// `eti_generated + eti_brought_forward`.
    pub total_eti_available: Decimal,
    /// ETI actually offset this month: `min(gross_paye, total_eti_available)`.
    pub eti_utilized: Decimal,
    /// PAYE payable after the ETI offset.
    pub net_paye: Decimal,
    /// Unused ETI carried into the next month.
    pub eti_carried_forward: Decimal,
    /// UIF payable (employee and employer sides).
    pub uif_payable: Decimal,
    /// SDL payable.
    pub sdl_payable: Decimal,
    /// Current lifecycle state.
    pub status: DeclarationStatus,
}

impl EmployerDeclaration {
    /// True when the declaration counts toward the period (not cancelled).
    pub fn is_active(&self) -> bool {
        self.status != DeclarationStatus::Cancelled
    }

    /// Marks the declaration as submitted.
    pub fn submit(&mut self) {
        self.status = DeclarationStatus::Submitted;
    }

    /// Cancels the declaration, freeing its (company, period) slot.
    pub fn cancel(&mut self) {
        self.status = DeclarationStatus::Cancelled;
    }

    /// Total amount remitted for the month: `net_paye + uif + sdl`.
    pub fn total_payable(&self) -> Decimal {
        self.net_paye + self.uif_payable + self.sdl_payable
    }
}

/// An in-memory collection of declarations enforcing the uniqueness
/// invariant: at most one active (non-cancelled) declaration per
/// (company, period) key.
#[derive(Debug, Default)]
pub struct DeclarationSet {
    declarations: Vec<EmployerDeclaration>,
}

impl DeclarationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a declaration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateDeclaration`] if an active
    /// declaration already exists for the same company and period.
    pub fn insert(&mut self, declaration: EmployerDeclaration) -> EngineResult<()> {
        let duplicate = self.declarations.iter().any(|d| {
            d.is_active() && d.company == declaration.company && d.period == declaration.period
        });
        if duplicate {
            return Err(EngineError::DuplicateDeclaration {
                company: declaration.company,
                period: declaration.period,
            });
        }
        self.declarations.push(declaration);
        Ok(())
    }

    /// Returns the active declaration for a company and period, if any.
    pub fn active(&self, company: &str, period: &str) -> Option<&EmployerDeclaration> {
        self.declarations
            .iter()
            .find(|d| d.is_active() && d.company == company && d.period == period)
    }

    /// Cancels the active declaration for a company and period, returning
    /// true if one was found.
    pub fn cancel(&mut self, company: &str, period: &str) -> bool {
        if let Some(declaration) = self
            .declarations
            .iter_mut()
            .find(|d| d.is_active() && d.company == company && d.period == period)
        {
            declaration.cancel();
            true
        } else {
            false
        }
    }

    /// All declarations in the set, including cancelled ones.
    pub fn all(&self) -> &[EmployerDeclaration] {
        &self.declarations
    }
}
