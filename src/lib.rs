//! Statutory Payroll Tax & Incentive Calculation Engine for South Africa
//!
//! This crate computes South African statutory payroll obligations (PAYE with
//! rebates and medical credits, UIF, SDL, and the Employment Tax Incentive)
//! and rolls per-period results into employee tax certificates and employer
//! declarations in the SARS reporting shape.

#![warn(missing_docs)]

pub mod aggregation;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
