//! Statutory configuration loading and schedule types.
//!
//! Statutory values (brackets, rebates, credits, levy rates, ETI bands) are
//! versioned per tax year and loaded from YAML files; nothing is hard-coded
//! in the calculation functions.

mod loader;
mod types;

pub use loader::{ScheduleLoader, StatutoryMetadata};
pub use types::{
    BracketSchedule, EtiBand, EtiFormula, EtiSchedule, EtiScheduleSpec, LevyRates,
    MedicalCreditSchedule, RebateSchedule, ScheduleFile, ScheduleSet, StatutorySchedule,
    TaxBracket, TaxBracketSpec,
};
