//! Risk stratification of a condition's patient population.
//!
//! Patients are classified into tiers upstream by clinical rule; this module
//! only turns per-tier counts into counts and whole-number percentages.

use super::aggregate::percent_of;
use crate::core::{Condition, Patient, RiskLevel};
use serde::Serialize;

/// Ordered severity tier used in stratification charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::VeryHigh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::VeryHigh => "Very High",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskTier::Low => "Stage 1, no other risk factors",
            RiskTier::Moderate => "Stage 1-2 with 1-2 risk factors",
            RiskTier::High => "Stage 2 or multiple risk factors",
            RiskTier::VeryHigh => "Stage 3 or complications",
        }
    }

    pub fn is_high_risk(self) -> bool {
        matches!(self, RiskTier::High | RiskTier::VeryHigh)
    }

    /// Stratification tier for a patient risk level. `Normal` is not a tier.
    pub fn from_risk_level(level: RiskLevel) -> Option<Self> {
        match level {
            RiskLevel::Normal => None,
            RiskLevel::Low => Some(RiskTier::Low),
            RiskLevel::Medium => Some(RiskTier::Moderate),
            RiskLevel::High => Some(RiskTier::High),
            RiskLevel::VeryHigh => Some(RiskTier::VeryHigh),
        }
    }
}

/// Per-tier patient counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub low: u32,
    pub moderate: u32,
    pub high: u32,
    pub very_high: u32,
}

impl TierCounts {
    pub fn new(low: u32, moderate: u32, high: u32, very_high: u32) -> Self {
        Self {
            low,
            moderate,
            high,
            very_high,
        }
    }

    pub fn get(&self, tier: RiskTier) -> u32 {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Moderate => self.moderate,
            RiskTier::High => self.high,
            RiskTier::VeryHigh => self.very_high,
        }
    }

    fn increment(&mut self, tier: RiskTier) {
        let slot = match tier {
            RiskTier::Low => &mut self.low,
            RiskTier::Moderate => &mut self.moderate,
            RiskTier::High => &mut self.high,
            RiskTier::VeryHigh => &mut self.very_high,
        };
        *slot = slot.saturating_add(1);
    }

    /// Summed in `u64` so four full `u32` tiers cannot overflow.
    pub fn total(&self) -> u64 {
        RiskTier::ALL.iter().map(|&tier| u64::from(self.get(tier))).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierShare {
    pub tier: RiskTier,
    pub count: u32,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskStratification {
    pub tiers: Vec<TierShare>,
    pub total: u64,
    /// Patients in the High and Very High tiers.
    pub high_risk: u64,
}

impl RiskStratification {
    pub fn share(&self, tier: RiskTier) -> Option<&TierShare> {
        self.tiers.iter().find(|share| share.tier == tier)
    }
}

/// Counts and rounded percentages for each tier, in severity order.
///
/// ```
/// use healthhive::metrics::{stratify, RiskTier, TierCounts};
///
/// let strata = stratify(&TierCounts::new(50, 30, 15, 5));
/// assert_eq!(strata.share(RiskTier::Moderate).unwrap().percent, 30);
/// assert_eq!(strata.high_risk, 20);
/// ```
pub fn stratify(counts: &TierCounts) -> RiskStratification {
    let total = counts.total();
    let tiers = RiskTier::ALL
        .iter()
        .map(|&tier| {
            let count = counts.get(tier);
            TierShare {
                tier,
                count,
                percent: percent_of(f64::from(count), total as f64).round() as u32,
            }
        })
        .collect();

    RiskStratification {
        tiers,
        total,
        high_risk: u64::from(counts.high) + u64::from(counts.very_high),
    }
}

/// Stratify the patients carrying `condition` by their assigned risk level.
pub fn stratify_patients(patients: &[Patient], condition: Condition) -> RiskStratification {
    let counts = patients
        .iter()
        .filter(|p| p.has_condition(condition))
        .filter_map(|p| RiskTier::from_risk_level(p.risk))
        .fold(TierCounts::default(), |mut counts, tier| {
            counts.increment(tier);
            counts
        });
    stratify(&counts)
}
