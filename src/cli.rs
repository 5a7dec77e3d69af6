use crate::io::OutputFormat;
use crate::metrics::HeatMapMetric;
use crate::registry::SortField;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThresholdPreset {
    /// Higher cutoffs; more units flagged urgent
    Strict,
    /// Standard program cutoffs (default)
    Balanced,
    /// Lower cutoffs for districts still ramping up
    Lenient,
}

#[derive(Parser, Debug)]
#[command(name = "healthhive")]
#[command(
    about = "Population health metrics and field-visit prioritization",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every report command
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Snapshot JSON with patients, barangays and visits
    #[arg(short, long, env = "HEALTHHIVE_DATA")]
    pub data: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to .healthhive.toml in this or a parent directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Evaluate as of this time (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Disable colored terminal output
    #[arg(long)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Program-wide coverage, control and risk summary
    Overview {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Rank barangays by field-visit priority, most urgent first
    Priority {
        #[command(flatten)]
        args: ReportArgs,

        /// Show only the N most urgent units
        #[arg(long)]
        top: Option<usize>,

        /// Use a preset instead of the configured priority cutoffs
        #[arg(long, value_enum)]
        preset: Option<ThresholdPreset>,
    },

    /// Color-code barangays for a heat-map layer
    Heatmap {
        #[command(flatten)]
        args: ReportArgs,

        /// Layer to compute
        #[arg(short, long, value_enum, default_value = "htn-control")]
        metric: HeatMapMetric,
    },

    /// List registry patients, optionally filtered and sorted
    Registry {
        #[command(flatten)]
        args: ReportArgs,

        /// Column header to click
        #[arg(short, long, value_enum)]
        sort: Option<SortField>,

        /// Number of clicks on the sort column (1 ascending, 2 descending, 3 unsorted)
        #[arg(long, default_value = "1")]
        clicks: usize,

        /// Case-insensitive filter on id, name or barangay
        #[arg(long)]
        search: Option<String>,
    },

    /// Group today's visit queue into a route
    Route {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Initialize a .healthhive.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Overview { .. } => "overview",
            Commands::Priority { .. } => "priority",
            Commands::Heatmap { .. } => "heatmap",
            Commands::Registry { .. } => "registry",
            Commands::Route { .. } => "route",
            Commands::Init { .. } => "init",
        }
    }

    pub fn report_args(&self) -> Option<&ReportArgs> {
        match self {
            Commands::Overview { args }
            | Commands::Priority { args, .. }
            | Commands::Heatmap { args, .. }
            | Commands::Registry { args, .. }
            | Commands::Route { args } => Some(args),
            Commands::Init { .. } => None,
        }
    }
}

/// Accept RFC 3339 timestamps or bare dates (midnight UTC).
pub fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid time '{}': expected RFC 3339 or YYYY-MM-DD", value))
}
