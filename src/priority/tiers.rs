/// Urgency levels for field-visit prioritization
///
/// Geographic units are classified into ordinal levels from their composite
/// priority score so that mobile clinic deployment can be planned most-urgent first.
use serde::{Deserialize, Serialize};

/// Urgency level of a geographic unit, most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityLevel {
    /// Poor control and/or long since the last clinic; deploy first
    Urgent,

    /// Below target; schedule soon
    High,

    /// Approaching target; monitor
    Moderate,

    /// On target; routine schedule
    Routine,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 4] = [
        PriorityLevel::Urgent,
        PriorityLevel::High,
        PriorityLevel::Moderate,
        PriorityLevel::Routine,
    ];

    /// Get level label for display
    pub fn label(&self) -> &'static str {
        match self {
            PriorityLevel::Urgent => "Urgent",
            PriorityLevel::High => "High",
            PriorityLevel::Moderate => "Moderate",
            PriorityLevel::Routine => "Routine",
        }
    }

    /// Get display color
    pub fn color(&self) -> &'static str {
        match self {
            PriorityLevel::Urgent => "#DC2626",
            PriorityLevel::High => "#F97316",
            PriorityLevel::Moderate => "#FCD34D",
            PriorityLevel::Routine => "#10B981",
        }
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration for priority cutoffs and the staleness penalty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityConfig {
    /// Scores below this are Urgent
    #[serde(default = "default_urgent_below")]
    pub urgent_below: f64,

    /// Scores below this (and not Urgent) are High
    #[serde(default = "default_high_below")]
    pub high_below: f64,

    /// Scores below this (and not High) are Moderate
    #[serde(default = "default_moderate_below")]
    pub moderate_below: f64,

    /// Points subtracted per day since the last clinic
    #[serde(default = "default_staleness_weight")]
    pub staleness_weight: f64,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            urgent_below: default_urgent_below(),
            high_below: default_high_below(),
            moderate_below: default_moderate_below(),
            staleness_weight: default_staleness_weight(),
        }
    }
}

impl PriorityConfig {
    /// Create strict configuration (more units flagged)
    pub fn strict() -> Self {
        Self {
            urgent_below: 50.0,
            high_below: 65.0,
            moderate_below: 80.0,
            ..Default::default()
        }
    }

    /// Create balanced configuration (default)
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Create lenient configuration
    pub fn lenient() -> Self {
        Self {
            urgent_below: 30.0,
            high_below: 45.0,
            moderate_below: 60.0,
            ..Default::default()
        }
    }

    /// Cutoffs must be finite and strictly increasing; weight non-negative.
    pub fn validate(&self) -> Result<(), String> {
        let cutoffs = [self.urgent_below, self.high_below, self.moderate_below];
        if cutoffs.iter().any(|c| !c.is_finite()) {
            return Err("priority cutoffs must be finite".to_string());
        }
        if !(self.urgent_below < self.high_below && self.high_below < self.moderate_below) {
            return Err(format!(
                "priority cutoffs must increase: urgent_below={} high_below={} moderate_below={}",
                self.urgent_below, self.high_below, self.moderate_below
            ));
        }
        if !self.staleness_weight.is_finite() || self.staleness_weight < 0.0 {
            return Err(format!(
                "staleness_weight must be non-negative, got {}",
                self.staleness_weight
            ));
        }
        Ok(())
    }
}

fn default_urgent_below() -> f64 {
    40.0
}
fn default_high_below() -> f64 {
    55.0
}
fn default_moderate_below() -> f64 {
    70.0
}
fn default_staleness_weight() -> f64 {
    0.5
}

/// Classify a priority score into a level
pub fn classify_level(score: f64, config: &PriorityConfig) -> PriorityLevel {
    if score < config.urgent_below {
        PriorityLevel::Urgent
    } else if score < config.high_below {
        PriorityLevel::High
    } else if score < config.moderate_below {
        PriorityLevel::Moderate
    } else {
        PriorityLevel::Routine
    }
}
