use serde::{Deserialize, Serialize};

use crate::heatmap::palette::DEFAULT_CUTOFFS;
use crate::heatmap::MetricPolicy;
use crate::metrics::HeatMapMetric;

/// Heat-map band cutoffs shared by every layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatMapConfig {
    /// Lower bound of each of the five bands, ascending
    #[serde(default = "default_cutoffs")]
    pub cutoffs: [f64; 5],
}

impl Default for HeatMapConfig {
    fn default() -> Self {
        Self {
            cutoffs: default_cutoffs(),
        }
    }
}

impl HeatMapConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.cutoffs.iter().any(|c| !c.is_finite()) {
            return Err("heat-map cutoffs must be finite".to_string());
        }
        if self.cutoffs.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(format!(
                "heat-map cutoffs must be strictly increasing, got {:?}",
                self.cutoffs
            ));
        }
        Ok(())
    }

    pub fn policy_for(&self, metric: HeatMapMetric) -> MetricPolicy {
        MetricPolicy::for_metric(metric, &self.cutoffs)
    }
}

fn default_cutoffs() -> [f64; 5] {
    DEFAULT_CUTOFFS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cutoffs_validate() {
        assert!(HeatMapConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unordered_cutoffs_rejected() {
        let config = HeatMapConfig {
            cutoffs: [0.0, 40.0, 20.0, 60.0, 80.0],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_cutoffs_shift_bands() {
        let config = HeatMapConfig {
            cutoffs: [0.0, 30.0, 50.0, 70.0, 90.0],
        };
        let policy = config.policy_for(HeatMapMetric::HtnControl);
        assert_eq!(crate::heatmap::map_to_bucket(85.0, &policy).bucket_label, "Good");
    }
}
