//! CLI command implementations.
//!
//! - **overview**, **priority**, **heatmap**, **registry**, **route**: load a
//!   snapshot, run the engine, render a report
//! - **init**: write a default `.healthhive.toml`

pub mod init;
pub mod report;

pub use init::{init_config, init_config_at};
pub use report::{resolve_config, run_report, ReportRequest};
