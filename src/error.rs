//! Error types for the payroll calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during statutory calculations
//! and aggregation.
//!
//! ETI ineligibility and reconciliation mismatches are deliberately *not*
//! errors: they are ordinary outcomes carried on result values.

use thiserror::Error;

/// The main error type for the payroll calculation engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use za_payroll_engine::error::EngineError;
///
/// let error = EngineError::ScheduleNotFound {
///     tax_year: "2019-2020".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "No statutory schedule configured for tax year 2019-2020"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No statutory schedule is configured for the requested tax year.
    ///
    /// This is never silently defaulted: a wrong default would produce a
    /// wrong statutory figure.
    #[error("No statutory schedule configured for tax year {tax_year}")]
    ScheduleNotFound {
        /// The tax year label (e.g. "2024-2025").
        tax_year: String,
    },

    /// A loaded schedule violates a structural invariant.
    #[error("Invalid statutory schedule: {message}")]
    InvalidSchedule {
        /// A description of the violated invariant.
        message: String,
    },

    /// A date range was inconsistent or outside the expected tax period.
    #[error("Invalid date range: {message}")]
    InvalidDateRange {
        /// A description of what made the range invalid.
        message: String,
    },

    /// An attempt was made to modify a finalized certificate.
    #[error("Certificate '{certificate}' is finalized and cannot be modified")]
    CertificateFinalized {
        /// The certificate number.
        certificate: String,
    },

    /// An active declaration already exists for the company and period.
    #[error("An active declaration already exists for '{company}' in period {period}")]
    DuplicateDeclaration {
        /// The company the declaration belongs to.
        company: String,
        /// The declaration period (e.g. "2024-07").
        period: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
