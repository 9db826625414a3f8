//! Employee tax profile model.
//!
//! This module defines the [`EmployeeTaxProfile`] struct, the read-only
//! demographic subset of an employee record that the statutory calculations
//! consume. The engine never writes to it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The demographic fields of an employee record that drive statutory
/// calculations.
///
/// Optional fields model genuinely missing master data: the engine degrades
/// gracefully (zero credit, ETI ineligibility with a reason) rather than
/// failing the whole computation.
///
/// # Example
///
/// ```
/// use za_payroll_engine::models::EmployeeTaxProfile;
/// use chrono::NaiveDate;
///
/// let employee = EmployeeTaxProfile {
///     id: "EMP-0001".to_string(),
///     date_of_birth: Some(NaiveDate::from_ymd_opt(1999, 6, 12).unwrap()),
///     date_of_joining: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
///     id_number: Some("9906125800087".to_string()),
///     special_economic_zone: false,
///     medical_dependants: Some(2),
///     monthly_hours: None,
/// };
/// assert!(employee.has_id_number());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeTaxProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's date of birth, if recorded.
    pub date_of_birth: Option<NaiveDate>,
    /// The date the employee started employment, if recorded.
    pub date_of_joining: Option<NaiveDate>,
    /// The South African ID number (or permit number), if recorded.
    pub id_number: Option<String>,
    /// Whether the employee works in a designated special economic zone.
    #[serde(default)]
    pub special_economic_zone: bool,
    /// Number of medical aid dependants, if recorded.
    pub medical_dependants: Option<u32>,
    /// Contracted monthly hours, if the employee is not full-time.
    pub monthly_hours: Option<Decimal>,
}

impl EmployeeTaxProfile {
    /// Returns true if a non-empty national identifier is on record.
    pub fn has_id_number(&self) -> bool {
        self.id_number
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}
