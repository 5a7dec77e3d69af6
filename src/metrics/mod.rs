//! Population-level metrics: control rates, coverage, risk stratification,
//! per-unit heat-map values and clinical classification helpers.

pub mod aggregate;
pub mod clinical;
pub mod geo;
pub mod overview;
pub mod stratification;

pub use aggregate::{
    condition_control, percent_of, screening_coverage, uncontrolled_rate, ConditionControl,
};
pub use geo::{metric_value, outreach_targets, HeatMapMetric, OutreachTarget, Prevalence};
pub use overview::{population_overview, PopulationOverview};
pub use stratification::{
    stratify, stratify_patients, RiskStratification, RiskTier, TierCounts, TierShare,
};

pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

pub fn minimum(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .reduce(f64::min)
        .unwrap_or(0.0)
}

pub fn maximum(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
