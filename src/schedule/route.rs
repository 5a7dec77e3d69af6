//! Daily route rollups for the field team.

use crate::core::Visit;
use crate::priority::{UrgencyClassifier, VisitUrgency};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Time budgeted per home visit, including travel within a unit.
    #[serde(default = "default_minutes_per_visit")]
    pub minutes_per_visit: u32,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            minutes_per_visit: default_minutes_per_visit(),
        }
    }
}

fn default_minutes_per_visit() -> u32 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteGroup {
    pub unit_name: String,
    pub visit_count: usize,
    pub urgent_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub total_distance_km: f64,
    pub estimated_minutes: u64,
    pub total_urgent: usize,
    pub visit_count: usize,
    pub groups: Vec<RouteGroup>,
}

impl RouteSummary {
    pub fn estimated_hours(&self) -> f64 {
        self.estimated_minutes as f64 / 60.0
    }
}

/// Group visits by geo-unit, in order of first appearance.
pub fn group_visits<C: UrgencyClassifier + ?Sized>(visits: &[Visit], classifier: &C) -> Vec<RouteGroup> {
    let mut groups: Vec<RouteGroup> = Vec::new();
    let mut index_by_unit: HashMap<&str, usize> = HashMap::new();

    for visit in visits {
        let urgent = usize::from(classifier.classify(visit) == VisitUrgency::Urgent);
        let index = *index_by_unit
            .entry(visit.barangay.as_str())
            .or_insert_with(|| {
                groups.push(RouteGroup {
                    unit_name: visit.barangay.clone(),
                    visit_count: 0,
                    urgent_count: 0,
                });
                groups.len() - 1
            });
        let group = &mut groups[index];
        group.visit_count += 1;
        group.urgent_count += urgent;
    }
    groups
}

pub fn summarize_route<C: UrgencyClassifier + ?Sized>(
    visits: &[Visit],
    classifier: &C,
    config: &RouteConfig,
) -> RouteSummary {
    let groups = group_visits(visits, classifier);
    let total_distance_km = visits.iter().filter_map(|v| v.distance_km).sum();

    RouteSummary {
        total_distance_km,
        estimated_minutes: u64::from(config.minutes_per_visit) * visits.len() as u64,
        total_urgent: groups.iter().map(|g| g.urgent_count).sum(),
        visit_count: visits.len(),
        groups,
    }
}
