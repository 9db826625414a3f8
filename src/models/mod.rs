//! Domain models for the payroll calculation engine.
//!
//! This module contains the value types the engine operates on: tax years,
//! employee tax profiles, pay periods, per-period statutory results,
//! certificates, and employer declarations.

mod certificate;
mod declaration;
mod employee;
mod pay_period;
mod pay_result;
mod tax_year;

pub use certificate::{Certificate, CertificateStatus, CodeBucket};
pub use declaration::{DeclarationSet, DeclarationStatus, EmployerDeclaration};
pub use employee::EmployeeTaxProfile;
pub use pay_period::PayPeriod;
pub use pay_result::{CalculationWarning, ComponentKind, PayComponent, PayPeriodResult};
pub use tax_year::TaxYear;
