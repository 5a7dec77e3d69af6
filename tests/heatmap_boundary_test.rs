//! Heat-map layers over the fixture units, including exact cutoff hits.

mod common;

use healthhive::config::HeatMapConfig;
use healthhive::heatmap::{annotate_units, map_to_bucket, Direction, MetricPolicy};
use healthhive::metrics::{HeatMapMetric, Prevalence};
use pretty_assertions::assert_eq;

fn labels(metric: HeatMapMetric, config: &HeatMapConfig) -> Vec<(String, f64, String)> {
    let snapshot = common::load_fixture();
    let policy = config.policy_for(metric);
    annotate_units(&snapshot.barangays, metric, &policy, &Prevalence::default())
        .into_iter()
        .map(|a| (a.unit_name, a.value, a.bucket.bucket_label))
        .collect()
}

#[test]
fn missed_follow_up_value_on_cutoff_takes_upper_band() {
    // Alejawan: 28 of 142 uncontrolled rounds to exactly 20
    let rows = labels(HeatMapMetric::MissedFollowUp, &HeatMapConfig::default());
    assert_eq!(rows[0], ("Alejawan".to_string(), 20.0, "Low Concern".to_string()));
    assert_eq!(rows[1], ("Balili".to_string(), 19.0, "Okay".to_string()));
    assert_eq!(rows[4], ("Naatang".to_string(), 26.0, "Low Concern".to_string()));
}

#[test]
fn screening_layer_is_favorable_high() {
    let rows = labels(HeatMapMetric::Screening, &HeatMapConfig::default());
    let excellent: Vec<&str> = rows
        .iter()
        .filter(|(_, _, label)| label == "Excellent")
        .map(|(name, _, _)| name.as_str())
        .collect();
    assert_eq!(excellent, vec!["Cantagay", "Tubod Monte"]);
    assert!(rows.iter().all(|(_, value, _)| *value >= 60.0));
}

#[test]
fn htn_control_uses_estimated_eligible() {
    let rows = labels(HeatMapMetric::HtnControl, &HeatMapConfig::default());
    // 142 registered * 0.42 = 60 eligible, 16 uncontrolled
    assert_eq!(rows[0], ("Alejawan".to_string(), 73.0, "Good".to_string()));
}

#[test]
fn custom_cutoffs_shift_bands() {
    let config = HeatMapConfig {
        cutoffs: [0.0, 10.0, 15.0, 19.0, 25.0],
    };
    let rows = labels(HeatMapMetric::MissedFollowUp, &config);
    assert_eq!(rows[0].2, "Urgent");
    assert_eq!(rows[4].2, "Critical");
}

#[test]
fn every_cutoff_is_inclusive() {
    for direction in [Direction::FavorableHigh, Direction::FavorableLow] {
        let policy = MetricPolicy::with_cutoffs("layer", direction, &[0.0, 20.0, 40.0, 60.0, 80.0]);
        for (level, cutoff) in [0.0, 20.0, 40.0, 60.0, 80.0].into_iter().enumerate() {
            assert_eq!(map_to_bucket(cutoff, &policy).level, level);
            if level > 0 {
                assert_eq!(map_to_bucket(cutoff - 0.001, &policy).level, level - 1);
            }
        }
    }
}
