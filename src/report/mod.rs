//! Report assembly: runs the engine over a snapshot and collects the
//! values each CLI view renders.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::HealthHiveConfig;
use crate::core::{Condition, Patient, Snapshot};
use crate::heatmap::{annotate_units, Band, Direction, UnitAnnotation};
use crate::metrics::clinical::{
    age_distribution, bmi_distribution, bp_distribution, glucose_distribution, DistributionBucket,
    GlucoseTest,
};
use crate::metrics::{
    average, maximum, minimum, outreach_targets, population_overview, HeatMapMetric,
    OutreachTarget, PopulationOverview,
};
use crate::priority::{
    annotate_visits, level_counts, rank_units, PriorityCounts, ReasonKeywordClassifier,
    UnitPriority, VisitAnnotation,
};
use crate::registry::{self, SortField, SortState};
use crate::schedule::{summarize_route, RouteSummary};

const OUTREACH_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    Overview(OverviewReport),
    Priority(PriorityReport),
    HeatMap(HeatMapReport),
    Registry(RegistryReport),
    Route(RouteReport),
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewReport {
    pub as_of: DateTime<Utc>,
    pub overview: PopulationOverview,
    pub data_quality_issues: usize,
    pub priority_counts: PriorityCounts,
    pub htn_outreach: Vec<OutreachTarget>,
    pub dm_outreach: Vec<OutreachTarget>,
    pub age_distribution: Vec<DistributionBucket>,
    pub bp_distribution: Vec<DistributionBucket>,
    pub bmi_distribution: Vec<DistributionBucket>,
    pub fbg_distribution: Vec<DistributionBucket>,
    pub rbg_distribution: Vec<DistributionBucket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityReport {
    pub as_of: DateTime<Utc>,
    pub total_units: usize,
    pub counts: PriorityCounts,
    /// Most urgent first; truncated when a top-N limit was requested.
    pub units: Vec<UnitPriority>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatMapReport {
    pub metric: HeatMapMetric,
    pub direction: Direction,
    pub bands: Vec<Band>,
    pub stats: LayerStats,
    pub units: Vec<UnitAnnotation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryReport {
    pub sort: SortState,
    pub search: Option<String>,
    pub total: usize,
    pub patients: Vec<Patient>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub as_of: DateTime<Utc>,
    pub summary: RouteSummary,
    pub visits: Vec<VisitAnnotation>,
}

pub fn build_overview(snapshot: &Snapshot, config: &HealthHiveConfig, now: DateTime<Utc>) -> OverviewReport {
    let patients = &snapshot.patients;
    let priorities = rank_units(&snapshot.barangays, now, &config.priority);
    let fbg: Vec<f64> = patients.iter().filter_map(|p| p.latest_fbg).collect();
    let rbg: Vec<f64> = patients.iter().filter_map(|p| p.latest_rbg).collect();

    OverviewReport {
        as_of: now,
        overview: population_overview(&snapshot.barangays, patients),
        data_quality_issues: snapshot.data_quality_issues(),
        priority_counts: level_counts(&priorities),
        htn_outreach: outreach_targets(&snapshot.barangays, Condition::Hypertension, OUTREACH_LIMIT),
        dm_outreach: outreach_targets(&snapshot.barangays, Condition::Diabetes, OUTREACH_LIMIT),
        age_distribution: age_distribution(patients),
        bp_distribution: bp_distribution(patients),
        bmi_distribution: bmi_distribution(patients),
        fbg_distribution: glucose_distribution(GlucoseTest::Fasting, &fbg),
        rbg_distribution: glucose_distribution(GlucoseTest::Random, &rbg),
    }
}

pub fn build_priority(
    snapshot: &Snapshot,
    config: &HealthHiveConfig,
    now: DateTime<Utc>,
    top: Option<usize>,
) -> PriorityReport {
    let mut units = rank_units(&snapshot.barangays, now, &config.priority);
    let counts = level_counts(&units);
    let total_units = units.len();
    if let Some(n) = top {
        units.truncate(n);
    }

    PriorityReport {
        as_of: now,
        total_units,
        counts,
        units,
    }
}

pub fn build_heatmap(snapshot: &Snapshot, config: &HealthHiveConfig, metric: HeatMapMetric) -> HeatMapReport {
    let policy = config.heatmap.policy_for(metric);
    let units = annotate_units(&snapshot.barangays, metric, &policy, &config.prevalence);
    let values: Vec<f64> = units.iter().map(|u| u.value).collect();

    HeatMapReport {
        metric,
        direction: policy.direction,
        bands: policy.bands().to_vec(),
        stats: LayerStats {
            min: minimum(&values),
            max: maximum(&values),
            average: average(&values),
        },
        units,
    }
}

/// Apply the search filter, then replay `clicks` header clicks on `field`.
pub fn build_registry(
    snapshot: &Snapshot,
    search: Option<&str>,
    field: Option<SortField>,
    clicks: usize,
) -> RegistryReport {
    let matches: Vec<Patient> = match search {
        Some(term) => registry::search(&snapshot.patients, term)
            .into_iter()
            .cloned()
            .collect(),
        None => snapshot.patients.clone(),
    };

    // Clicks on one field cycle back to the default state every third click.
    let state = match field {
        Some(field) => (0..clicks % 3).fold(SortState::default(), |state, _| state.click(field)),
        None => SortState::default(),
    };

    RegistryReport {
        sort: state,
        search: search.map(str::to_string),
        total: matches.len(),
        patients: registry::apply(&matches, &state),
    }
}

pub fn build_route(snapshot: &Snapshot, config: &HealthHiveConfig, now: DateTime<Utc>) -> RouteReport {
    let classifier = ReasonKeywordClassifier::default();
    RouteReport {
        as_of: now,
        summary: summarize_route(&snapshot.visits, &classifier, &config.route),
        visits: annotate_visits(&snapshot.visits, &classifier),
    }
}
