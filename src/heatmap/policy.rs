//! Metric bucketing policy.
//!
//! A `MetricPolicy` declares whether higher values of a metric are favorable
//! and which (threshold, label, color) bands it is bucketed into. Every
//! bucketing call receives its policy explicitly.

use super::palette::{DEFAULT_CUTOFFS, FAVORABLE_HIGH_RAMP, FAVORABLE_LOW_RAMP};
use crate::metrics::HeatMapMetric;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Higher values are better (control rate, screening coverage).
    FavorableHigh,
    /// Lower values are better (missed follow-up rate).
    FavorableLow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Inclusive lower bound of the band.
    pub threshold: f64,
    pub label: String,
    pub color: String,
}

impl Band {
    pub fn new(threshold: f64, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            threshold,
            label: label.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy")]
pub struct MetricPolicy {
    pub metric: String,
    pub direction: Direction,
    /// Bands ascending by threshold; never empty.
    bands: Vec<Band>,
}

/// Unchecked wire form; deserialization goes through `MetricPolicy::new`.
#[derive(Deserialize)]
struct RawPolicy {
    metric: String,
    direction: Direction,
    bands: Vec<Band>,
}

impl TryFrom<RawPolicy> for MetricPolicy {
    type Error = String;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        let metric = raw.metric.clone();
        MetricPolicy::new(raw.metric, raw.direction, raw.bands).ok_or_else(|| {
            format!("policy for {metric} needs at least one band with finite thresholds")
        })
    }
}

impl MetricPolicy {
    /// Build a policy; bands are sorted ascending by threshold.
    ///
    /// Returns `None` when no bands are given or a threshold is not finite.
    pub fn new(metric: impl Into<String>, direction: Direction, mut bands: Vec<Band>) -> Option<Self> {
        if bands.is_empty() || bands.iter().any(|b| !b.threshold.is_finite()) {
            return None;
        }
        bands.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Some(Self {
            metric: metric.into(),
            direction,
            bands,
        })
    }

    /// Five-band green-to-red policy for metrics where high is good.
    pub fn favorable_high(metric: impl Into<String>) -> Self {
        Self::from_ramp(metric, Direction::FavorableHigh, &DEFAULT_CUTOFFS, &FAVORABLE_HIGH_RAMP)
    }

    /// Five-band light-to-dark policy for metrics where low is good.
    pub fn favorable_low(metric: impl Into<String>) -> Self {
        Self::from_ramp(metric, Direction::FavorableLow, &DEFAULT_CUTOFFS, &FAVORABLE_LOW_RAMP)
    }

    /// Built-in palette for `direction` with custom ascending cutoffs.
    pub fn with_cutoffs(metric: impl Into<String>, direction: Direction, cutoffs: &[f64; 5]) -> Self {
        let ramp = match direction {
            Direction::FavorableHigh => &FAVORABLE_HIGH_RAMP,
            Direction::FavorableLow => &FAVORABLE_LOW_RAMP,
        };
        Self::from_ramp(metric, direction, cutoffs, ramp)
    }

    /// Default policy for a dashboard heat-map layer.
    pub fn for_metric(metric: HeatMapMetric, cutoffs: &[f64; 5]) -> Self {
        let direction = match metric {
            HeatMapMetric::HtnControl | HeatMapMetric::DmControl | HeatMapMetric::Screening => {
                Direction::FavorableHigh
            }
            HeatMapMetric::MissedFollowUp => Direction::FavorableLow,
        };
        Self::with_cutoffs(metric.label(), direction, cutoffs)
    }

    fn from_ramp(
        metric: impl Into<String>,
        direction: Direction,
        cutoffs: &[f64; 5],
        ramp: &[(&str, &str); 5],
    ) -> Self {
        let mut bands: Vec<Band> = cutoffs
            .iter()
            .zip(ramp.iter())
            .map(|(&threshold, &(label, color))| Band::new(threshold, label, color))
            .collect();
        bands.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self {
            metric: metric.into(),
            direction,
            bands,
        }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Favorability of the band at `level` (ascending index); larger is better.
    pub fn favorability(&self, level: usize) -> usize {
        match self.direction {
            Direction::FavorableHigh => level,
            Direction::FavorableLow => self.bands.len().saturating_sub(1 + level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_sorted_ascending() {
        let policy = MetricPolicy::new(
            "custom",
            Direction::FavorableHigh,
            vec![Band::new(50.0, "Good", "#0F0"), Band::new(0.0, "Bad", "#F00")],
        )
        .unwrap();
        let thresholds: Vec<f64> = policy.bands().iter().map(|b| b.threshold).collect();
        assert_eq!(thresholds, vec![0.0, 50.0]);
    }

    #[test]
    fn rejects_empty_or_non_finite_bands() {
        assert!(MetricPolicy::new("x", Direction::FavorableLow, vec![]).is_none());
        assert!(MetricPolicy::new(
            "x",
            Direction::FavorableLow,
            vec![Band::new(f64::NAN, "a", "#000")]
        )
        .is_none());
    }

    #[test]
    fn deserialized_bands_are_validated_and_sorted() {
        let empty = r#"{"metric":"x","direction":"favorable-high","bands":[]}"#;
        assert!(serde_json::from_str::<MetricPolicy>(empty).is_err());

        let unsorted = r##"{"metric":"x","direction":"favorable-high","bands":[
            {"threshold":80.0,"label":"Excellent","color":"#10B981"},
            {"threshold":0.0,"label":"Critical","color":"#DC2626"}
        ]}"##;
        let policy: MetricPolicy = serde_json::from_str(unsorted).unwrap();
        let labels: Vec<&str> = policy.bands().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Critical", "Excellent"]);
    }

    #[test]
    fn layer_direction_is_declared_per_metric() {
        let missed = MetricPolicy::for_metric(HeatMapMetric::MissedFollowUp, &DEFAULT_CUTOFFS);
        assert_eq!(missed.direction, Direction::FavorableLow);
        let screening = MetricPolicy::for_metric(HeatMapMetric::Screening, &DEFAULT_CUTOFFS);
        assert_eq!(screening.direction, Direction::FavorableHigh);
    }

    #[test]
    fn favorability_reverses_for_low_policies() {
        let low = MetricPolicy::favorable_low("missed");
        assert_eq!(low.favorability(0), 4);
        assert_eq!(low.favorability(4), 0);
        let high = MetricPolicy::favorable_high("control");
        assert_eq!(high.favorability(4), 4);
    }
}
