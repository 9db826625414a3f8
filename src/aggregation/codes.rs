//! SARS code mapping.
//!
//! Certificates report amounts under four-digit SARS codes. This module
//! maps pay component names (trimmed, case-insensitive) and their kind to
//! the code they are certified under. The same code can appear on both
//! sides of the return: UIF code 4141 is both an employee deduction and an
//! employer contribution.

use crate::models::ComponentKind;

/// A SARS reporting code with its official description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SarsCode {
    /// 3601 - Income (taxable remuneration).
    GrossRemuneration,
    /// 3605 - Annual payment (bonus, thirteenth cheque).
    AnnualBonus,
    /// 3607 - Overtime.
    Overtime,
    /// 3701 - Travel allowance.
    TravelAllowance,
    /// 3702 - Reimbursive travel allowance.
    ReimbursiveTravel,
    /// 3704 - Subsistence allowance.
    SubsistenceAllowance,
    /// 3713 - Other allowances.
    OtherAllowances,
    /// 3802 - Use of motor vehicle.
    VehicleBenefit,
    /// 4001 - Pension fund contributions.
    PensionFund,
    /// 4005 - Medical scheme contributions.
    MedicalAid,
    /// 4006 - Retirement annuity fund contributions.
    RetirementAnnuity,
    /// 4102 - PAYE.
    Paye,
    /// 4141 - UIF contribution (employee and employer).
    Uif,
    /// 4142 - Skills Development Levy.
    Sdl,
    /// 4472 - Employer pension fund contributions.
    EmployerPensionFund,
    /// 4474 - Employer medical scheme contributions.
    EmployerMedicalAid,
}

impl SarsCode {
    /// The four-digit code as it appears on the certificate.
    pub fn code(&self) -> &'static str {
        match self {
            SarsCode::GrossRemuneration => "3601",
            SarsCode::AnnualBonus => "3605",
            SarsCode::Overtime => "3607",
            SarsCode::TravelAllowance => "3701",
            SarsCode::ReimbursiveTravel => "3702",
            SarsCode::SubsistenceAllowance => "3704",
            SarsCode::OtherAllowances => "3713",
            SarsCode::VehicleBenefit => "3802",
            SarsCode::PensionFund => "4001",
            SarsCode::MedicalAid => "4005",
            SarsCode::RetirementAnnuity => "4006",
            SarsCode::Paye => "4102",
            SarsCode::Uif => "4141",
            SarsCode::Sdl => "4142",
            SarsCode::EmployerPensionFund => "4472",
            SarsCode::EmployerMedicalAid => "4474",
        }
    }

    /// The official description for the code.
    pub fn description(&self) -> &'static str {
        match self {
            SarsCode::GrossRemuneration => "Income (Gross Remuneration)",
            SarsCode::AnnualBonus => "Annual Payment (Bonus)",
            SarsCode::Overtime => "Overtime",
            SarsCode::TravelAllowance => "Travel Allowance",
            SarsCode::ReimbursiveTravel => "Reimbursive Travel Allowance",
            SarsCode::SubsistenceAllowance => "Subsistence Allowance",
            SarsCode::OtherAllowances => "Other Allowances",
            SarsCode::VehicleBenefit => "Use of Motor Vehicle",
            SarsCode::PensionFund => "Pension Fund Contributions",
            SarsCode::MedicalAid => "Medical Scheme Contributions",
            SarsCode::RetirementAnnuity => "Retirement Annuity Fund Contributions",
            SarsCode::Paye => "PAYE",
            SarsCode::Uif => "UIF Contribution",
            SarsCode::Sdl => "SDL (Skills Development Levy)",
            SarsCode::EmployerPensionFund => "Employer Pension Fund Contributions",
            SarsCode::EmployerMedicalAid => "Employer Medical Scheme Contributions",
        }
    }
}

/// Maps a pay component name and kind to its SARS code.
///
/// Matching is on the trimmed, case-folded name; the kind disambiguates
/// names that certify under different codes on each side (pension, medical
/// aid, UIF). Unmapped components return `None` and are dropped by the
/// certificate builder with a warning.
pub fn map_component(name: &str, kind: ComponentKind) -> Option<SarsCode> {
    let normalized = name.trim().to_lowercase();
    match kind {
        ComponentKind::Earning => match normalized.as_str() {
            "basic salary" | "basic" | "salary" | "gross pay" => Some(SarsCode::GrossRemuneration),
            "bonus" | "annual bonus" | "13th cheque" => Some(SarsCode::AnnualBonus),
            "overtime" | "overtime pay" => Some(SarsCode::Overtime),
            "travel allowance" => Some(SarsCode::TravelAllowance),
            "reimbursive travel" | "reimbursive travel allowance" => {
                Some(SarsCode::ReimbursiveTravel)
            }
            "subsistence allowance" => Some(SarsCode::SubsistenceAllowance),
            "use of motor vehicle" | "company car" => Some(SarsCode::VehicleBenefit),
            "commission" | "cellphone allowance" | "other allowance" | "other allowances" => {
                Some(SarsCode::OtherAllowances)
            }
            _ => None,
        },
        ComponentKind::Deduction => match normalized.as_str() {
            "paye" => Some(SarsCode::Paye),
            "uif" | "uif contribution" | "uif employee contribution" => Some(SarsCode::Uif),
            "pension" | "pension fund" => Some(SarsCode::PensionFund),
            "medical aid" => Some(SarsCode::MedicalAid),
            "retirement annuity" | "retirement annuity fund" => Some(SarsCode::RetirementAnnuity),
            _ => None,
        },
        ComponentKind::EmployerContribution => match normalized.as_str() {
            "uif" | "uif contribution" | "uif employer contribution" => Some(SarsCode::Uif),
            "sdl" | "sdl contribution" | "skills development levy" => Some(SarsCode::Sdl),
            "pension" | "pension fund" | "provident fund" => Some(SarsCode::EmployerPensionFund),
            "medical aid" => Some(SarsCode::EmployerMedicalAid),
            _ => None,
        },
    }
}
