//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use healthhive::Snapshot;
use std::path::PathBuf;

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/fixtures/snapshot.json")
}

pub fn load_fixture() -> Snapshot {
    Snapshot::load(&fixture_path()).expect("fixture snapshot should load")
}

/// Evaluation time matching the fixture data.
pub fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap()
}
