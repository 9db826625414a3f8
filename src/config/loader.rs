//! Configuration loading functionality.
//!
//! This module provides the [`ScheduleLoader`] type for loading statutory
//! schedules from YAML files.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxYear;

use super::types::{ScheduleFile, ScheduleSet, StatutorySchedule};

/// Metadata describing the statutory configuration bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryMetadata {
    /// The jurisdiction code (e.g. "ZA").
    pub jurisdiction: String,
    /// The currency the amounts are denominated in (e.g. "ZAR").
    pub currency: String,
    /// Where the published values came from.
    pub source: String,
}

/// Loads and provides access to statutory schedules.
///
/// The `ScheduleLoader` reads YAML configuration files from a directory
/// and builds a [`ScheduleSet`] of validated per-tax-year schedules.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/za/
/// ├── statutory.yaml      # Jurisdiction metadata
/// └── years/
///     └── 2024-2025.yaml  # Schedule for the tax year starting March 2024
/// ```
///
/// # Example
///
/// ```no_run
/// use za_payroll_engine::config::ScheduleLoader;
/// use za_payroll_engine::models::TaxYear;
///
/// let loader = ScheduleLoader::load("./config/za").unwrap();
///
/// let schedule = loader.schedule(TaxYear::starting(2024)).unwrap();
/// println!("Primary rebate: {}", schedule.rebates.primary);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleLoader {
    metadata: StatutoryMetadata,
    schedules: ScheduleSet,
}

impl ScheduleLoader {
    /// Loads all schedules from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/za")
    ///
    /// # Returns
    ///
    /// Returns a `ScheduleLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any schedule fails validation (malformed brackets or ETI bands)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use za_payroll_engine::config::ScheduleLoader;
    ///
    /// let loader = ScheduleLoader::load("./config/za")?;
    /// # Ok::<(), za_payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata_path = path.join("statutory.yaml");
        let metadata = Self::load_yaml::<StatutoryMetadata>(&metadata_path)?;

        let years_dir = path.join("years");
        let schedules = Self::load_years(&years_dir)?;

        Ok(Self {
            metadata,
            schedules,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates every schedule file in the years directory.
    fn load_years(years_dir: &Path) -> EngineResult<ScheduleSet> {
        let years_dir_str = years_dir.display().to_string();

        if !years_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: years_dir_str,
            });
        }

        let entries = fs::read_dir(years_dir).map_err(|_| EngineError::ConfigNotFound {
            path: years_dir_str.clone(),
        })?;

        let mut schedules = ScheduleSet::new();
        let mut loaded = 0usize;

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: years_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<ScheduleFile>(&path)?;
                schedules.insert(StatutorySchedule::from_file(file)?);
                loaded += 1;
            }
        }

        if loaded == 0 {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no schedule files found)", years_dir_str),
            });
        }

        Ok(schedules)
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &StatutoryMetadata {
        &self.metadata
    }

    /// Returns the loaded schedule set.
    pub fn schedules(&self) -> &ScheduleSet {
        &self.schedules
    }

    /// Gets the schedule for a tax year.
    ///
    /// # Arguments
    ///
    /// * `tax_year` - The tax year to look up
    ///
    /// # Returns
    ///
    /// Returns the schedule if configured, or `ScheduleNotFound` error.
    pub fn schedule(&self, tax_year: TaxYear) -> EngineResult<&StatutorySchedule> {
        self.schedules.get(tax_year)
    }
}
