//! HealthHive: population-health metrics and field-visit prioritization for
//! community hypertension and diabetes programs.
//!
//! The engine modules (`metrics`, `heatmap`, `priority`, `registry`,
//! `schedule`) are pure functions over snapshot records; the current time is
//! always passed in. `config`, `io`, `commands` and `observability` make up
//! the CLI shell around them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod heatmap;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod priority;
pub mod registry;
pub mod report;
pub mod schedule;

// Re-export commonly used types
pub use crate::core::{
    Condition, ControlStatus, Error, GeoUnit, Patient, RecordDate, RiskLevel, Sex, Snapshot, Visit,
};

pub use crate::config::HealthHiveConfig;

pub use crate::heatmap::{map_to_bucket, HeatBucket, MetricPolicy};

pub use crate::metrics::{
    condition_control, population_overview, stratify, ConditionControl, HeatMapMetric,
    RiskStratification, TierCounts,
};

pub use crate::priority::{
    classify_visit, rank_units, score_unit, PriorityConfig, PriorityLevel, UnitPriority,
    VisitUrgency,
};

pub use crate::registry::{find_unit, SortDirection, SortField, SortState};

pub use crate::schedule::{summarize_route, RouteConfig, RouteSummary};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
