//! Aggregation over finalized pay period results.
//!
//! Everything downstream of the per-period calculations: SARS code
//! mapping, certificate generation, monthly employer declarations,
//! interim/annual reconciliation, and concurrent batch generation.

mod batch;
mod certificate_builder;
mod codes;
mod declaration_builder;
mod reconciliation;

pub use batch::{BatchFailure, BatchSummary, generate_certificates};
pub use certificate_builder::{build_certificate, certificate_number, regenerate_certificate};
pub use codes::{SarsCode, map_component};
pub use declaration_builder::build_declaration;
pub use reconciliation::{
    ReconciliationKind, ReconciliationMismatch, ReconciliationReport, reconcile,
};
