//! Per-unit metric values for the heat-map layers and outreach targeting.

use super::aggregate::{condition_control, uncontrolled_rate};
use crate::core::{Condition, GeoUnit};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Heat-map layer selectable on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeatMapMetric {
    HtnControl,
    DmControl,
    Screening,
    #[serde(rename = "missed")]
    #[value(name = "missed")]
    MissedFollowUp,
}

impl HeatMapMetric {
    pub const ALL: [HeatMapMetric; 4] = [
        HeatMapMetric::HtnControl,
        HeatMapMetric::DmControl,
        HeatMapMetric::Screening,
        HeatMapMetric::MissedFollowUp,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HeatMapMetric::HtnControl => "HTN Control",
            HeatMapMetric::DmControl => "DM Control",
            HeatMapMetric::Screening => "Screening",
            HeatMapMetric::MissedFollowUp => "Missed Follow-up",
        }
    }
}

/// Share of registered patients estimated to carry each condition.
///
/// Unit records only carry total registrations, so the eligible count for
/// each condition's control rate is estimated from program-wide prevalence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prevalence {
    #[serde(default = "default_htn_prevalence")]
    pub htn: f64,
    #[serde(default = "default_dm_prevalence")]
    pub dm: f64,
}

impl Default for Prevalence {
    fn default() -> Self {
        Self {
            htn: default_htn_prevalence(),
            dm: default_dm_prevalence(),
        }
    }
}

impl Prevalence {
    pub fn for_condition(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Hypertension => self.htn,
            Condition::Diabetes => self.dm,
        }
    }

    /// Both shares must lie in `[0, 1]`.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("htn", self.htn), ("dm", self.dm)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} prevalence must be within 0.0-1.0, got {value}"));
            }
        }
        Ok(())
    }
}

fn default_htn_prevalence() -> f64 {
    0.42
}
fn default_dm_prevalence() -> f64 {
    0.305
}

/// Estimated number of registered patients carrying the condition.
pub fn estimated_eligible(unit: &GeoUnit, condition: Condition, prevalence: &Prevalence) -> u32 {
    let estimate = (f64::from(unit.registered) * prevalence.for_condition(condition)).round();
    if estimate.is_finite() && estimate > 0.0 {
        estimate as u32
    } else {
        0
    }
}

/// Whole-number value of a heat-map layer for one unit.
pub fn metric_value(unit: &GeoUnit, metric: HeatMapMetric, prevalence: &Prevalence) -> f64 {
    match metric {
        HeatMapMetric::HtnControl => {
            let eligible = estimated_eligible(unit, Condition::Hypertension, prevalence);
            condition_control(eligible, unit.uncontrolled_htn)
                .control_rate_percent
                .round()
        }
        HeatMapMetric::DmControl => {
            let eligible = estimated_eligible(unit, Condition::Diabetes, prevalence);
            condition_control(eligible, unit.uncontrolled_dm)
                .control_rate_percent
                .round()
        }
        HeatMapMetric::Screening => {
            if unit.screened_percent.is_finite() {
                unit.screened_percent.max(0.0)
            } else {
                0.0
            }
        }
        HeatMapMetric::MissedFollowUp => {
            uncontrolled_rate(unit.total_uncontrolled(), unit.registered).round()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutreachTarget {
    pub unit_id: String,
    pub name: String,
    pub uncontrolled: u32,
    pub registered: u32,
}

/// Units with the most uncontrolled patients for a condition, most first.
///
/// Ties keep input order.
pub fn outreach_targets(units: &[GeoUnit], condition: Condition, limit: usize) -> Vec<OutreachTarget> {
    let mut targets: Vec<OutreachTarget> = units
        .iter()
        .map(|unit| OutreachTarget {
            unit_id: unit.id.clone(),
            name: unit.name.clone(),
            uncontrolled: match condition {
                Condition::Hypertension => unit.uncontrolled_htn,
                Condition::Diabetes => unit.uncontrolled_dm,
            },
            registered: unit.registered,
        })
        .collect();
    targets.sort_by_key(|t| std::cmp::Reverse(t.uncontrolled));
    targets.truncate(limit);
    targets
}
