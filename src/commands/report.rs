use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::cli::{Commands, ReportArgs, ThresholdPreset};
use crate::config::{self, HealthHiveConfig};
use crate::core::Snapshot;
use crate::io::{create_writer, open_destination};
use crate::metrics::HeatMapMetric;
use crate::observability;
use crate::priority::PriorityConfig;
use crate::registry::SortField;
use crate::report::{self, Report};

/// A report to build, stripped of output concerns.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRequest {
    Overview,
    Priority {
        top: Option<usize>,
        preset: Option<ThresholdPreset>,
    },
    HeatMap {
        metric: HeatMapMetric,
    },
    Registry {
        sort: Option<SortField>,
        clicks: usize,
        search: Option<String>,
    },
    Route,
}

impl ReportRequest {
    pub fn from_command(command: &Commands) -> Option<Self> {
        match command {
            Commands::Overview { .. } => Some(ReportRequest::Overview),
            Commands::Priority { top, preset, .. } => Some(ReportRequest::Priority {
                top: *top,
                preset: *preset,
            }),
            Commands::Heatmap { metric, .. } => Some(ReportRequest::HeatMap { metric: *metric }),
            Commands::Registry {
                sort,
                clicks,
                search,
                ..
            } => Some(ReportRequest::Registry {
                sort: *sort,
                clicks: *clicks,
                search: search.clone(),
            }),
            Commands::Route { .. } => Some(ReportRequest::Route),
            Commands::Init { .. } => None,
        }
    }

    /// Run the engine over `snapshot`.
    pub fn build(&self, snapshot: &Snapshot, config: &HealthHiveConfig, now: DateTime<Utc>) -> Report {
        match self {
            ReportRequest::Overview => Report::Overview(report::build_overview(snapshot, config, now)),
            ReportRequest::Priority { top, preset } => {
                let config = with_preset(config, *preset);
                Report::Priority(report::build_priority(snapshot, &config, now, *top))
            }
            ReportRequest::HeatMap { metric } => {
                Report::HeatMap(report::build_heatmap(snapshot, config, *metric))
            }
            ReportRequest::Registry {
                sort,
                clicks,
                search,
            } => Report::Registry(report::build_registry(
                snapshot,
                search.as_deref(),
                *sort,
                *clicks,
            )),
            ReportRequest::Route => Report::Route(report::build_route(snapshot, config, now)),
        }
    }
}

fn with_preset(config: &HealthHiveConfig, preset: Option<ThresholdPreset>) -> HealthHiveConfig {
    let mut config = config.clone();
    if let Some(preset) = preset {
        let weight = config.priority.staleness_weight;
        config.priority = PriorityConfig {
            staleness_weight: weight,
            ..match preset {
                ThresholdPreset::Strict => PriorityConfig::strict(),
                ThresholdPreset::Balanced => PriorityConfig::balanced(),
                ThresholdPreset::Lenient => PriorityConfig::lenient(),
            }
        };
    }
    config
}

/// Explicit `--config` must load; otherwise discover from the working directory.
pub fn resolve_config(explicit: Option<&Path>) -> Result<HealthHiveConfig> {
    match explicit {
        Some(path) => Ok(config::load_config_from_path(path)?),
        None => Ok(config::load_config()),
    }
}

pub fn run_report(request: &ReportRequest, args: &ReportArgs) -> Result<()> {
    observability::set_snapshot(&args.data);

    let config = resolve_config(args.config.as_deref())?;
    let snapshot = Snapshot::load(&args.data)
        .with_context(|| format!("Failed to load snapshot {}", args.data.display()))?;
    let now = args.now.unwrap_or_else(Utc::now);
    tracing::info!(?request, %now, "Building report");

    let report = request.build(&snapshot, &config, now);

    let destination = open_destination(args.output.as_deref())?;
    let mut writer = create_writer(args.format, destination);
    writer.write_report(&report)?;
    writer
        .flush()
        .context("Failed to write report output")?;

    if let Some(path) = &args.output {
        tracing::info!("Report written to {}", path.display());
    }
    Ok(())
}
