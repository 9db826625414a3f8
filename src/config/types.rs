//! Statutory schedule types.
//!
//! This module contains the strongly-typed schedule structures deserialized
//! from the per-tax-year YAML configuration files: tax brackets, rebates,
//! medical credits, levy rates, and ETI bands.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxYear;

/// A tax bracket as written in the configuration file.
///
/// The cumulative base amount is not part of the file format; it is
/// precomputed once when the schedule is constructed.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracketSpec {
    /// Lower bound of the bracket (inclusive).
    pub lower: Decimal,
    /// Upper bound of the bracket (exclusive); `None` for the top bracket.
    pub upper: Option<Decimal>,
    /// Marginal rate applied within the bracket.
    pub rate: Decimal,
}

/// A validated tax bracket with its precomputed cumulative base amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxBracket {
    /// Lower bound of the bracket (inclusive).
    pub lower: Decimal,
    /// Upper bound of the bracket (exclusive); `None` for the top bracket.
    pub upper: Option<Decimal>,
    /// Marginal rate applied within the bracket.
    pub rate: Decimal,
    /// Cumulative tax on all lower brackets.
    pub base_amount: Decimal,
}

/// An ordered, validated progressive bracket schedule.
///
/// Invariants enforced at construction: bounds start at zero, are
/// contiguous and strictly increasing, and only the last bracket is
/// open-ended. Base amounts are precomputed so each tax lookup is O(n)
/// in bracket count without re-summation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates the bracket specs and precomputes cumulative base amounts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] if the bracket list is
    /// empty, does not start at zero, has gaps/overlaps, or has a bounded
    /// final bracket.
    pub fn new(specs: Vec<TaxBracketSpec>) -> EngineResult<Self> {
        if specs.is_empty() {
            return Err(EngineError::InvalidSchedule {
                message: "bracket schedule is empty".to_string(),
            });
        }
        if specs[0].lower != Decimal::ZERO {
            return Err(EngineError::InvalidSchedule {
                message: format!("first bracket must start at 0, found {}", specs[0].lower),
            });
        }

        let mut brackets = Vec::with_capacity(specs.len());
        let mut cumulative = Decimal::ZERO;

        for (index, spec) in specs.iter().enumerate() {
            let is_last = index == specs.len() - 1;
            match spec.upper {
                Some(upper) => {
                    if is_last {
                        return Err(EngineError::InvalidSchedule {
                            message: "last bracket must be open-ended".to_string(),
                        });
                    }
                    if upper <= spec.lower {
                        return Err(EngineError::InvalidSchedule {
                            message: format!(
                                "bracket upper bound {} is not above lower bound {}",
                                upper, spec.lower
                            ),
                        });
                    }
                    if specs[index + 1].lower != upper {
                        return Err(EngineError::InvalidSchedule {
                            message: format!(
                                "brackets are not contiguous at {}: next lower bound is {}",
                                upper,
                                specs[index + 1].lower
                            ),
                        });
                    }
                    brackets.push(TaxBracket {
                        lower: spec.lower,
                        upper: Some(upper),
                        rate: spec.rate,
                        base_amount: cumulative,
                    });
                    cumulative += spec.rate * (upper - spec.lower);
                }
                None => {
                    if !is_last {
                        return Err(EngineError::InvalidSchedule {
                            message: format!(
                                "only the last bracket may be open-ended, bracket {} is not last",
                                index + 1
                            ),
                        });
                    }
                    brackets.push(TaxBracket {
                        lower: spec.lower,
                        upper: None,
                        rate: spec.rate,
                        base_amount: cumulative,
                    });
                }
            }
        }

        Ok(Self { brackets })
    }

    /// Returns the validated brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the bracket whose `[lower, upper)` range contains `income`.
    ///
    /// Negative incomes fall into the first bracket; anything at or above
    /// the top bound falls into the open-ended last bracket.
    pub fn bracket_for(&self, income: Decimal) -> &TaxBracket {
        self.brackets
            .iter()
            .rev()
            .find(|b| income >= b.lower)
            .unwrap_or(&self.brackets[0])
    }
}

/// Annual rebate amounts for a tax year.
///
/// Rebates are cumulative: a 65-year-old receives primary + secondary; a
/// 75-year-old receives all three.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RebateSchedule {
    /// Primary rebate (all taxpayers).
    pub primary: Decimal,
    /// Secondary rebate, added from age 65.
    pub secondary: Decimal,
    /// Tertiary rebate, added from age 75.
    pub tertiary: Decimal,
}

/// Monthly medical scheme fees tax credit amounts for a tax year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MedicalCreditSchedule {
    /// Monthly credit for the main member.
    pub main_member: Decimal,
    /// Additional monthly credit once there is at least one dependant.
    pub first_dependant: Decimal,
    /// Monthly credit for each dependant beyond the first.
    pub additional_dependant: Decimal,
}

/// UIF and SDL rates for a tax year.
///
/// Both levies share a single remuneration base: the period gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LevyRates {
    /// UIF rate, each side (employee and employer).
    pub uif_rate: Decimal,
    /// Monthly remuneration ceiling for UIF.
    pub uif_monthly_ceiling: Decimal,
    /// SDL rate (employer-only, uncapped).
    pub sdl_rate: Decimal,
}

/// The formula applied within an ETI remuneration band.
///
/// An explicit discriminant replaces formula inference from which optional
/// fields happen to be set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EtiFormula {
    /// A fixed monthly amount.
    Flat {
        /// The flat monthly incentive amount.
        amount: Decimal,
    },
    /// A simple percentage of monthly remuneration.
    Percentage {
        /// The fraction of remuneration (e.g. 0.5 for 50%).
        rate: Decimal,
    },
    /// A declining amount: `cap - rate * (remuneration - band_lower)`,
    /// clamped at zero.
    Declining {
        /// The amount at the band's lower bound.
        cap: Decimal,
        /// The reduction per unit of remuneration above the lower bound.
        rate: Decimal,
    },
}

impl EtiFormula {
    /// Evaluates the formula for a monthly remuneration within a band
    /// starting at `band_lower`. Never returns a negative amount.
    pub fn evaluate(&self, remuneration: Decimal, band_lower: Decimal) -> Decimal {
        let amount = match self {
            EtiFormula::Flat { amount } => *amount,
            EtiFormula::Percentage { rate } => *rate * remuneration,
            EtiFormula::Declining { cap, rate } => *cap - *rate * (remuneration - band_lower),
        };
        amount.max(Decimal::ZERO)
    }
}

/// One ETI remuneration band with a formula for each half of the 24-month
/// incentive window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EtiBand {
    /// Lower bound of the band (inclusive).
    pub lower: Decimal,
    /// Upper bound of the band (exclusive); `None` for an open top band.
    pub upper: Option<Decimal>,
    /// Formula for qualifying months 1-12.
    pub first_period: EtiFormula,
    /// Formula for qualifying months 13-24.
    pub second_period: EtiFormula,
}

/// The ETI band table for a tax year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtiSchedule {
    /// Remuneration below this floor earns no incentive.
    pub minimum_monthly_remuneration: Decimal,
    bands: Vec<EtiBand>,
}

/// The raw ETI section of a schedule file.
#[derive(Debug, Clone, Deserialize)]
pub struct EtiScheduleSpec {
    /// Remuneration below this floor earns no incentive.
    pub minimum_monthly_remuneration: Decimal,
    /// The remuneration bands in ascending order.
    pub bands: Vec<EtiBand>,
}

impl EtiSchedule {
    /// Validates band ordering and constructs the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] if the band list is empty,
    /// bands are out of order, or a non-final band is open-ended.
    pub fn new(spec: EtiScheduleSpec) -> EngineResult<Self> {
        if spec.bands.is_empty() {
            return Err(EngineError::InvalidSchedule {
                message: "ETI schedule has no bands".to_string(),
            });
        }
        for (index, band) in spec.bands.iter().enumerate() {
            let is_last = index == spec.bands.len() - 1;
            match band.upper {
                Some(upper) => {
                    if upper <= band.lower {
                        return Err(EngineError::InvalidSchedule {
                            message: format!(
                                "ETI band upper bound {} is not above lower bound {}",
                                upper, band.lower
                            ),
                        });
                    }
                    if !is_last && spec.bands[index + 1].lower < upper {
                        return Err(EngineError::InvalidSchedule {
                            message: format!("ETI bands overlap at {}", upper),
                        });
                    }
                }
                None => {
                    if !is_last {
                        return Err(EngineError::InvalidSchedule {
                            message: "only the last ETI band may be open-ended".to_string(),
                        });
                    }
                }
            }
        }
        Ok(Self {
            minimum_monthly_remuneration: spec.minimum_monthly_remuneration,
            bands: spec.bands,
        })
    }

    /// Returns the bands in ascending order.
    pub fn bands(&self) -> &[EtiBand] {
        &self.bands
    }

    /// Returns the band containing the given monthly remuneration, if any.
    ///
    /// Remuneration above the highest bounded band (and with no open band
    /// configured) earns no incentive.
    pub fn band_for(&self, remuneration: Decimal) -> Option<&EtiBand> {
        self.bands
            .iter()
            .find(|b| remuneration >= b.lower && b.upper.is_none_or(|u| remuneration < u))
    }
}

/// A raw per-tax-year schedule file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleFile {
    /// The calendar year the tax year starts in.
    pub tax_year: i32,
    /// Bracket table in ascending order.
    pub brackets: Vec<TaxBracketSpec>,
    /// Annual rebate amounts.
    pub rebates: RebateSchedule,
    /// Monthly medical credit amounts.
    pub medical_credits: MedicalCreditSchedule,
    /// UIF/SDL rates.
    pub levies: LevyRates,
    /// ETI floor and bands.
    pub eti: EtiScheduleSpec,
}

/// All statutory values for one tax year, validated and ready for the
/// calculation functions.
#[derive(Debug, Clone)]
pub struct StatutorySchedule {
    /// The tax year these values apply to.
    pub tax_year: TaxYear,
    /// Validated progressive bracket schedule.
    pub brackets: BracketSchedule,
    /// Annual rebate amounts.
    pub rebates: RebateSchedule,
    /// Monthly medical credit amounts.
    pub medical_credits: MedicalCreditSchedule,
    /// UIF/SDL rates.
    pub levies: LevyRates,
    /// ETI floor and bands.
    pub eti: EtiSchedule,
}

impl StatutorySchedule {
    /// Validates a raw schedule file into a usable schedule.
    pub fn from_file(file: ScheduleFile) -> EngineResult<Self> {
        Ok(Self {
            tax_year: TaxYear::starting(file.tax_year),
            brackets: BracketSchedule::new(file.brackets)?,
            rebates: file.rebates,
            medical_credits: file.medical_credits,
            levies: file.levies,
            eti: EtiSchedule::new(file.eti)?,
        })
    }
}

/// Versioned, immutable schedules keyed by tax year.
///
/// Lookup happens once at the call boundary; the arithmetic functions take
/// a resolved [`StatutorySchedule`] and stay free of time-dependent I/O.
#[derive(Debug, Clone, Default)]
pub struct ScheduleSet {
    schedules: HashMap<TaxYear, StatutorySchedule>,
}

impl ScheduleSet {
    /// Creates an empty schedule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a schedule, replacing any existing one for the same tax year.
    pub fn insert(&mut self, schedule: StatutorySchedule) {
        self.schedules.insert(schedule.tax_year, schedule);
    }

    /// Returns the schedule for a tax year.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ScheduleNotFound`] if no schedule is
    /// configured for that year. Never silently defaults.
    pub fn get(&self, tax_year: TaxYear) -> EngineResult<&StatutorySchedule> {
        self.schedules
            .get(&tax_year)
            .ok_or_else(|| EngineError::ScheduleNotFound {
                tax_year: tax_year.label(),
            })
    }

    /// Returns the schedule for the tax year containing `date`.
    pub fn for_date(&self, date: chrono::NaiveDate) -> EngineResult<&StatutorySchedule> {
        self.get(TaxYear::containing(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn two_bracket_specs() -> Vec<TaxBracketSpec> {
        vec![
            TaxBracketSpec {
                lower: dec("0"),
                upper: Some(dec("150000")),
                rate: dec("0.18"),
            },
            TaxBracketSpec {
                lower: dec("150000"),
                upper: None,
                rate: dec("0.26"),
            },
        ]
    }

    #[test]
    fn test_base_amounts_precomputed() {
        let schedule = BracketSchedule::new(two_bracket_specs()).unwrap();
        assert_eq!(schedule.brackets()[0].base_amount, dec("0"));
        assert_eq!(schedule.brackets()[1].base_amount, dec("27000"));
    }

    #[test]
    fn test_bracket_for_boundary_uses_upper_bracket() {
        let schedule = BracketSchedule::new(two_bracket_specs()).unwrap();
        let bracket = schedule.bracket_for(dec("150000"));
        assert_eq!(bracket.lower, dec("150000"));
    }

    #[test]
    fn test_bracket_for_negative_income_uses_first_bracket() {
        let schedule = BracketSchedule::new(two_bracket_specs()).unwrap();
        let bracket = schedule.bracket_for(dec("-1"));
        assert_eq!(bracket.lower, dec("0"));
    }

    #[test]
    fn test_empty_brackets_rejected() {
        let result = BracketSchedule::new(vec![]);
        assert!(matches!(
            result,
            Err(EngineError::InvalidSchedule { .. })
        ));
    }

    #[test]
    fn test_non_zero_start_rejected() {
        let specs = vec![TaxBracketSpec {
            lower: dec("100"),
            upper: None,
            rate: dec("0.18"),
        }];
        assert!(BracketSchedule::new(specs).is_err());
    }

    #[test]
    fn test_gap_between_brackets_rejected() {
        let specs = vec![
            TaxBracketSpec {
                lower: dec("0"),
                upper: Some(dec("100000")),
                rate: dec("0.18"),
            },
            TaxBracketSpec {
                lower: dec("150000"),
                upper: None,
                rate: dec("0.26"),
            },
        ];
        let err = BracketSchedule::new(specs).unwrap_err();
        assert!(err.to_string().contains("not contiguous"));
    }

    #[test]
    fn test_bounded_last_bracket_rejected() {
        let specs = vec![TaxBracketSpec {
            lower: dec("0"),
            upper: Some(dec("100000")),
            rate: dec("0.18"),
        }];
        let err = BracketSchedule::new(specs).unwrap_err();
        assert!(err.to_string().contains("open-ended"));
    }

    #[test]
    fn test_open_middle_bracket_rejected() {
        let specs = vec![
            TaxBracketSpec {
                lower: dec("0"),
                upper: None,
                rate: dec("0.18"),
            },
            TaxBracketSpec {
                lower: dec("150000"),
                upper: None,
                rate: dec("0.26"),
            },
        ];
        assert!(BracketSchedule::new(specs).is_err());
    }

    #[test]
    fn test_eti_formula_flat() {
        let formula = EtiFormula::Flat { amount: dec("1000") };
        assert_eq!(formula.evaluate(dec("3000"), dec("2000")), dec("1000"));
    }

    #[test]
    fn test_eti_formula_percentage() {
        let formula = EtiFormula::Percentage { rate: dec("0.5") };
        assert_eq!(formula.evaluate(dec("1500"), dec("0")), dec("750"));
    }

    #[test]
    fn test_eti_formula_declining_clamps_at_zero() {
        let formula = EtiFormula::Declining {
            cap: dec("1000"),
            rate: dec("0.5"),
        };
        assert_eq!(formula.evaluate(dec("5000"), dec("4500")), dec("750"));
        assert_eq!(formula.evaluate(dec("6500"), dec("4500")), dec("0"));
        // Beyond the cap point the amount stays clamped, never negative.
        assert_eq!(formula.evaluate(dec("9000"), dec("4500")), dec("0"));
    }

    #[test]
    fn test_eti_formula_deserializes_tagged() {
        let yaml = r#"
type: declining
cap: 1000
rate: 0.5
"#;
        let formula: EtiFormula = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            formula,
            EtiFormula::Declining {
                cap: dec("1000"),
                rate: dec("0.5"),
            }
        );
    }

    fn test_eti_spec() -> EtiScheduleSpec {
        EtiScheduleSpec {
            minimum_monthly_remuneration: dec("2000"),
            bands: vec![
                EtiBand {
                    lower: dec("2000"),
                    upper: Some(dec("4500")),
                    first_period: EtiFormula::Flat { amount: dec("1000") },
                    second_period: EtiFormula::Flat { amount: dec("500") },
                },
                EtiBand {
                    lower: dec("4500"),
                    upper: Some(dec("6500")),
                    first_period: EtiFormula::Declining {
                        cap: dec("1000"),
                        rate: dec("0.5"),
                    },
                    second_period: EtiFormula::Declining {
                        cap: dec("500"),
                        rate: dec("0.25"),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_eti_band_lookup() {
        let schedule = EtiSchedule::new(test_eti_spec()).unwrap();
        assert_eq!(schedule.band_for(dec("3000")).unwrap().lower, dec("2000"));
        assert_eq!(schedule.band_for(dec("4500")).unwrap().lower, dec("4500"));
        assert!(schedule.band_for(dec("6500")).is_none());
        assert!(schedule.band_for(dec("1000")).is_none());
    }

    #[test]
    fn test_eti_overlapping_bands_rejected() {
        let mut spec = test_eti_spec();
        spec.bands[1].lower = dec("4000");
        assert!(EtiSchedule::new(spec).is_err());
    }

    #[test]
    fn test_schedule_set_lookup_miss() {
        let set = ScheduleSet::new();
        let err = set.get(TaxYear::starting(2019)).unwrap_err();
        match err {
            EngineError::ScheduleNotFound { tax_year } => assert_eq!(tax_year, "2019-2020"),
            other => panic!("Expected ScheduleNotFound, got {:?}", other),
        }
    }
}
