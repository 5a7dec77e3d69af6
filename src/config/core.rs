use serde::{Deserialize, Serialize};

use super::thresholds::HeatMapConfig;
use crate::metrics::Prevalence;
use crate::priority::PriorityConfig;
use crate::schedule::RouteConfig;

/// Contents of `.healthhive.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthHiveConfig {
    #[serde(default)]
    pub priority: PriorityConfig,

    #[serde(default)]
    pub heatmap: HeatMapConfig,

    #[serde(default)]
    pub route: RouteConfig,

    #[serde(default)]
    pub prevalence: Prevalence,
}

impl HealthHiveConfig {
    /// Replace each invalid section with its defaults, logging why.
    ///
    /// Returns the number of sections that were reset.
    pub fn sanitize(&mut self) -> usize {
        let mut reset = 0;

        if let Err(e) = self.priority.validate() {
            tracing::warn!("Invalid [priority] settings: {}. Using defaults.", e);
            self.priority = PriorityConfig::default();
            reset += 1;
        }
        if let Err(e) = self.heatmap.validate() {
            tracing::warn!("Invalid [heatmap] settings: {}. Using defaults.", e);
            self.heatmap = HeatMapConfig::default();
            reset += 1;
        }
        if self.route.minutes_per_visit == 0 {
            tracing::warn!("[route] minutes_per_visit must be positive. Using defaults.");
            self.route = RouteConfig::default();
            reset += 1;
        }
        if let Err(e) = self.prevalence.validate() {
            tracing::warn!("Invalid [prevalence] settings: {}. Using defaults.", e);
            self.prevalence = Prevalence::default();
            reset += 1;
        }

        reset
    }
}
