//! Program-wide overview figures for the landing dashboard.

use super::aggregate::{condition_control, screening_coverage, ConditionControl};
use super::average;
use super::stratification::{stratify_patients, RiskStratification};
use crate::core::{Condition, ControlStatus, GeoUnit, Patient};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationOverview {
    pub total_population: u64,
    pub total_registered: u64,
    /// Registered share of the whole population.
    pub screening_coverage_percent: f64,
    /// Mean of the per-unit screened percentages.
    pub average_unit_screening_percent: f64,
    pub total_uncontrolled: u64,
    pub htn_control: ConditionControl,
    pub dm_control: ConditionControl,
    pub htn_stratification: RiskStratification,
    pub dm_stratification: RiskStratification,
    pub high_risk_patients: usize,
    pub flagged_for_follow_up: usize,
}

/// Control summary for a condition from patient-level control status.
pub fn patient_condition_control(patients: &[Patient], condition: Condition) -> ConditionControl {
    let (eligible, uncontrolled) = patients
        .iter()
        .filter(|p| p.has_condition(condition))
        .fold((0u32, 0u32), |(eligible, uncontrolled), p| {
            let not_controlled = p.control_status != ControlStatus::Controlled;
            (
                eligible.saturating_add(1),
                uncontrolled.saturating_add(u32::from(not_controlled)),
            )
        });
    condition_control(eligible, uncontrolled)
}

pub fn population_overview(units: &[GeoUnit], patients: &[Patient]) -> PopulationOverview {
    let total_population: u64 = units.iter().map(|u| u64::from(u.population)).sum();
    let total_registered: u64 = units.iter().map(|u| u64::from(u.registered)).sum();
    let total_uncontrolled: u64 = units.iter().map(|u| u64::from(u.total_uncontrolled())).sum();
    let unit_screening: Vec<f64> = units.iter().map(|u| u.screened_percent).collect();

    PopulationOverview {
        total_population,
        total_registered,
        screening_coverage_percent: screening_coverage(
            u32::try_from(total_registered).unwrap_or(u32::MAX),
            u32::try_from(total_population).unwrap_or(u32::MAX),
        ),
        average_unit_screening_percent: average(&unit_screening),
        total_uncontrolled,
        htn_control: patient_condition_control(patients, Condition::Hypertension),
        dm_control: patient_condition_control(patients, Condition::Diabetes),
        htn_stratification: stratify_patients(patients, Condition::Hypertension),
        dm_stratification: stratify_patients(patients, Condition::Diabetes),
        high_risk_patients: patients.iter().filter(|p| p.risk.is_high_risk()).count(),
        flagged_for_follow_up: patients.iter().filter(|p| p.flagged_for_follow_up).count(),
    }
}
