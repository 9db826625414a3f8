//! Pay period result models.
//!
//! This module contains the [`PayPeriodResult`] type and its associated
//! structures capturing all outputs of one statutory computation for one
//! employee in one pay period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// The kind of a pay component line.
///
/// Deduction and employer-contribution lines carry different SARS codes for
/// the same component name (e.g. pension), so the kind travels with the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// An earning paid to the employee.
    Earning,
    /// A deduction withheld from the employee.
    Deduction,
    /// A contribution paid by the employer on top of gross pay.
    EmployerContribution,
}

/// A single named amount on a payroll record.
///
/// # Example
///
/// ```
/// use za_payroll_engine::models::{ComponentKind, PayComponent};
/// use rust_decimal::Decimal;
///
/// let line = PayComponent {
///     name: "Basic Salary".to_string(),
///     kind: ComponentKind::Earning,
///     amount: Decimal::new(2500000, 2),
/// };
/// assert_eq!(line.amount.to_string(), "25000.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponent {
    /// The component name as configured in payroll (e.g. "Basic Salary").
    pub name: String,
    /// Whether this is an earning, deduction, or employer contribution.
    pub kind: ComponentKind,
    /// The amount for this period.
    pub amount: Decimal,
}

impl PayComponent {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, kind: ComponentKind, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            kind,
            amount,
        }
    }
}

/// A non-fatal data problem encountered during a computation.
///
/// Warnings record degraded inputs (e.g. a missing dependant count) that
/// were replaced with a conservative default rather than failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationWarning {
    /// A code identifying the type of warning (e.g. "DATA_INCOMPLETE").
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete statutory result for one employee in one pay period.
///
/// Created at payroll-run time; immutable once the pay period is finalized.
/// The aggregator only consumes finalized results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayPeriodResult {
    /// Unique identifier for this result.
    pub id: Uuid,
    /// The employee this result belongs to.
    pub employee_id: String,
    /// The pay period covered.
    pub period: PayPeriod,
    /// Gross pay for the period.
    pub gross_pay: Decimal,
    /// Projected annual taxable earnings used for the bracket lookup.
    pub annual_taxable_income: Decimal,
    /// Sub-periods remaining in the tax year, including this one.
    pub remaining_periods: u32,
    /// Annual tax before rebates and credits.
    pub annual_gross_tax: Decimal,
    /// Annual rebate applied (age-based, cumulative).
    pub rebate_applied: Decimal,
    /// Annual medical credit applied.
    pub medical_credit_applied: Decimal,
    /// PAYE withheld for this period.
    pub monthly_tax: Decimal,
    /// UIF withheld from the employee.
    pub uif_employee: Decimal,
    /// UIF contributed by the employer.
    pub uif_employer: Decimal,
    /// Skills Development Levy (employer-only).
    pub sdl: Decimal,
    /// Whether the employee qualified for ETI this period.
    pub eti_eligible: bool,
    /// Human-readable reason for the eligibility outcome.
    pub eti_reason: String,
    /// Qualifying months employed at the period end.
    pub eti_months_employed: u32,
    /// ETI amount for the period (zero when ineligible).
    pub eti_amount: Decimal,
    /// All component lines: the earnings supplied to the run plus the
    /// statutory deduction/contribution lines the engine appended.
    pub components: Vec<PayComponent>,
    /// Non-fatal data problems encountered during the computation.
    pub warnings: Vec<CalculationWarning>,
    /// Whether the pay period has been finalized (submitted).
    pub finalized: bool,
}

impl PayPeriodResult {
    /// Marks the result as finalized. Finalized results are the only ones
    /// the certificate builder aggregates.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    /// Sum of component amounts of the given kind.
    pub fn total_of_kind(&self, kind: ComponentKind) -> Decimal {
        self.components
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.amount)
            .sum()
    }
}
