//! Composite field-visit priority per geographic unit.
//!
//! `priority_score = control_rate - staleness_weight * days_since_last_clinic`.
//! Lower scores are more urgent.

use super::tiers::{classify_level, PriorityConfig, PriorityLevel};
use crate::core::GeoUnit;
use crate::metrics::condition_control;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitPriority {
    pub unit_id: String,
    pub unit_name: String,
    pub control_rate: f64,
    pub days_since_last_clinic: i64,
    pub priority_score: f64,
    pub level: PriorityLevel,
    pub color: &'static str,
}

/// Share of registered patients with neither condition uncontrolled.
///
/// `0.0` when nobody is registered.
pub fn unit_control_rate(unit: &GeoUnit) -> f64 {
    condition_control(unit.registered, unit.total_uncontrolled()).control_rate_percent
}

/// Whole days since the unit's last clinic.
///
/// A missing or unparseable date counts as a clinic today (0 days). This
/// under-prioritizes units with absent data rather than guessing a staleness.
pub fn days_since_last_clinic(unit: &GeoUnit, now: DateTime<Utc>) -> i64 {
    match unit.last_clinic_date.days_since(now) {
        Some(days) => days,
        None => {
            debug!(
                unit = %unit.id,
                raw = unit.last_clinic_date.raw(),
                "No usable last clinic date; treating as 0 days stale"
            );
            0
        }
    }
}

pub fn priority_score(control_rate: f64, days_since_last_clinic: i64, config: &PriorityConfig) -> f64 {
    control_rate - config.staleness_weight * days_since_last_clinic as f64
}

pub fn score_unit(unit: &GeoUnit, now: DateTime<Utc>, config: &PriorityConfig) -> UnitPriority {
    let control_rate = unit_control_rate(unit);
    let days = days_since_last_clinic(unit, now);
    let score = priority_score(control_rate, days, config);
    let level = classify_level(score, config);

    UnitPriority {
        unit_id: unit.id.clone(),
        unit_name: unit.name.clone(),
        control_rate,
        days_since_last_clinic: days,
        priority_score: score,
        level,
        color: level.color(),
    }
}

/// Most urgent first: ascending score, ties broken by unit id.
pub fn compare_priority(a: &UnitPriority, b: &UnitPriority) -> Ordering {
    a.priority_score
        .total_cmp(&b.priority_score)
        .then_with(|| a.unit_id.cmp(&b.unit_id))
}

/// Score and rank every unit, most urgent first.
pub fn rank_units(units: &[GeoUnit], now: DateTime<Utc>, config: &PriorityConfig) -> Vec<UnitPriority> {
    let mut ranked: Vec<UnitPriority> = units
        .iter()
        .map(|unit| score_unit(unit, now, config))
        .collect();
    ranked.sort_by(compare_priority);
    ranked
}

/// Number of units at each level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub urgent: usize,
    pub high: usize,
    pub moderate: usize,
    pub routine: usize,
}

impl PriorityCounts {
    pub fn get(&self, level: PriorityLevel) -> usize {
        match level {
            PriorityLevel::Urgent => self.urgent,
            PriorityLevel::High => self.high,
            PriorityLevel::Moderate => self.moderate,
            PriorityLevel::Routine => self.routine,
        }
    }
}

pub fn level_counts(priorities: &[UnitPriority]) -> PriorityCounts {
    priorities
        .iter()
        .fold(PriorityCounts::default(), |mut counts, p| {
            match p.level {
                PriorityLevel::Urgent => counts.urgent += 1,
                PriorityLevel::High => counts.high += 1,
                PriorityLevel::Moderate => counts.moderate += 1,
                PriorityLevel::Routine => counts.routine += 1,
            }
            counts
        })
}

/// The `n` most urgent units.
pub fn top_priorities(units: &[GeoUnit], now: DateTime<Utc>, config: &PriorityConfig, n: usize) -> Vec<UnitPriority> {
    let mut ranked = rank_units(units, now, config);
    ranked.truncate(n);
    ranked
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn higher_control_rate_is_less_urgent(
            rate in 0.0..100.0f64,
            delta in 0.001..50.0f64,
            days in 0i64..365,
        ) {
            let config = PriorityConfig::default();
            prop_assert!(priority_score(rate + delta, days, &config) > priority_score(rate, days, &config));
        }
    }
}
