//! Concurrent batch certificate generation.
//!
//! Generates certificates for an employee population by fanning one task
//! out per employee on a [`tokio::task::JoinSet`]. Each unit of work is
//! independent; a failure for one employee is collected into the summary
//! and never aborts the rest of the batch.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::EtiSchedule;
use crate::models::{Certificate, EmployeeTaxProfile, PayPeriod, PayPeriodResult, TaxYear};

use super::certificate_builder::build_certificate;

/// A per-employee failure collected during a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// The employee whose certificate could not be generated.
    pub employee_id: String,
    /// Why generation failed.
    pub message: String,
}

/// The outcome of a batch run: the certificates that generated plus every
/// per-employee failure.
#[derive(Debug)]
pub struct BatchSummary {
    /// Successfully generated certificates, ordered by employee id.
    pub certificates: Vec<Certificate>,
    /// Employees whose generation failed, ordered by employee id.
    pub failures: Vec<BatchFailure>,
}

/// Generates certificates for a set of employees concurrently.
///
/// Spawns one task per employee (up to `limit` when given) over a shared
/// pool of pay period results. Output ordering is by employee id, so a
/// batch over unchanged inputs is deterministic regardless of task
/// completion order.
///
/// # Arguments
///
/// * `employees` - The employees to certify
/// * `tax_year` - The tax year being certified
/// * `window` - The reporting window for every certificate
/// * `results` - The shared pool of pay period results
/// * `eti` - The ETI schedule for the window reconstruction
/// * `limit` - Optional cap on how many employees to process
pub async fn generate_certificates(
    employees: Vec<EmployeeTaxProfile>,
    tax_year: TaxYear,
    window: PayPeriod,
    results: Vec<PayPeriodResult>,
    eti: EtiSchedule,
    limit: Option<usize>,
) -> BatchSummary {
    let results = Arc::new(results);
    let eti = Arc::new(eti);

    let mut set = JoinSet::new();
    for employee in employees.into_iter().take(limit.unwrap_or(usize::MAX)) {
        let results = Arc::clone(&results);
        let eti = Arc::clone(&eti);
        set.spawn(async move {
            let outcome = build_certificate(&employee, tax_year, window, &results, &eti);
            (employee.id, outcome)
        });
    }

    let mut certificates = Vec::new();
    let mut failures = Vec::new();

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((_, Ok(certificate))) => certificates.push(certificate),
            Ok((employee_id, Err(error))) => {
                warn!(employee = %employee_id, %error, "certificate generation failed");
                failures.push(BatchFailure {
                    employee_id,
                    message: error.to_string(),
                });
            }
            Err(join_error) => {
                warn!(%join_error, "certificate generation task panicked");
                failures.push(BatchFailure {
                    employee_id: String::new(),
                    message: join_error.to_string(),
                });
            }
        }
    }

    certificates.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
    failures.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

    info!(
        generated = certificates.len(),
        failed = failures.len(),
        "batch certificate generation complete"
    );

    BatchSummary {
        certificates,
        failures,
    }
}
