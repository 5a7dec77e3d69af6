//! Heat-map color classification.
//!
//! `map_to_bucket` scans a policy's bands from the highest cutoff down and
//! returns the first band whose cutoff the value meets (`value >= cutoff`).
//! A value sitting exactly on a cutoff therefore belongs to the band that
//! starts there.

pub mod palette;
pub mod policy;

pub use palette::text_color_for;
pub use policy::{Band, Direction, MetricPolicy};

use crate::core::GeoUnit;
use crate::metrics::{metric_value, HeatMapMetric, Prevalence};
use serde::Serialize;

const NO_DATA_LABEL: &str = "No Data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatBucket {
    pub bucket_label: String,
    pub color: String,
    pub text_color: &'static str,
    /// Index of the band in the policy, lowest cutoff first.
    pub level: usize,
}

/// Classify `value` under `policy`.
///
/// Values below the lowest cutoff, and `NaN`, fall into the lowest band.
/// A policy without bands yields a neutral "No Data" bucket.
///
/// ```
/// use healthhive::heatmap::{map_to_bucket, MetricPolicy};
///
/// let control = MetricPolicy::favorable_high("HTN Control");
/// assert_eq!(map_to_bucket(80.0, &control).bucket_label, "Excellent");
/// assert_eq!(map_to_bucket(79.999, &control).bucket_label, "Good");
///
/// let missed = MetricPolicy::favorable_low("Missed Follow-up");
/// assert_eq!(map_to_bucket(85.0, &missed).color, "#B14F22");
/// ```
pub fn map_to_bucket(value: f64, policy: &MetricPolicy) -> HeatBucket {
    let bands = policy.bands();
    let level = bands
        .iter()
        .rposition(|band| value >= band.threshold)
        .unwrap_or(0);
    let Some(band) = bands.get(level) else {
        return HeatBucket {
            bucket_label: NO_DATA_LABEL.to_string(),
            color: palette::NO_DATA_COLOR.to_string(),
            text_color: text_color_for(palette::NO_DATA_COLOR),
            level: 0,
        };
    };

    HeatBucket {
        bucket_label: band.label.clone(),
        color: band.color.clone(),
        text_color: text_color_for(&band.color),
        level,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitAnnotation {
    pub unit_id: String,
    pub unit_name: String,
    pub metric: HeatMapMetric,
    pub value: f64,
    #[serde(flatten)]
    pub bucket: HeatBucket,
}

/// Annotate every unit with its layer value and color bucket, in input order.
pub fn annotate_units(
    units: &[GeoUnit],
    metric: HeatMapMetric,
    policy: &MetricPolicy,
    prevalence: &Prevalence,
) -> Vec<UnitAnnotation> {
    units
        .iter()
        .map(|unit| {
            let value = metric_value(unit, metric, prevalence);
            UnitAnnotation {
                unit_id: unit.id.clone(),
                unit_name: unit.name.clone(),
                metric,
                value,
                bucket: map_to_bucket(value, policy),
            }
        })
        .collect()
}
