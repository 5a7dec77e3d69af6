//! Input snapshot: the complete set of records fetched from the data source.

use super::errors::{Error, Result};
use super::{GeoUnit, Patient, Visit};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// A complete (non-delta) snapshot of registry data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default, alias = "geoUnits")]
    pub barangays: Vec<GeoUnit>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(contents: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(contents)?;
        snapshot.log_data_quality();
        Ok(snapshot)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::snapshot(format!("failed to read: {e}"), path))?;
        let snapshot = Self::from_json(&contents)
            .map_err(|e| Error::snapshot(e.to_string(), path))?;
        debug!(
            patients = snapshot.patients.len(),
            barangays = snapshot.barangays.len(),
            visits = snapshot.visits.len(),
            "Loaded snapshot from {}",
            path.display()
        );
        Ok(snapshot)
    }

    /// Number of records that violate a data-quality invariant.
    pub fn data_quality_issues(&self) -> usize {
        let inconsistent_units = self.barangays.iter().filter(|u| !u.is_consistent()).count();
        let bad_clinic_dates = self
            .barangays
            .iter()
            .filter(|u| !u.last_clinic_date.is_valid())
            .count();
        let bad_patient_dates = self
            .patients
            .iter()
            .filter(|p| !p.last_visit.is_valid())
            .count();
        inconsistent_units + bad_clinic_dates + bad_patient_dates
    }

    fn log_data_quality(&self) {
        for unit in self.barangays.iter().filter(|u| !u.is_consistent()) {
            warn!(
                unit = %unit.id,
                registered = unit.registered,
                population = unit.population,
                "Registered count exceeds population"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert!(snapshot.patients.is_empty());
        assert!(snapshot.barangays.is_empty());
        assert!(snapshot.visits.is_empty());
    }

    #[test]
    fn counts_data_quality_issues() {
        let json = r#"{
            "barangays": [
                {"id": "a", "name": "A", "population": 10, "registered": 20, "lastClinicDate": "2025-10-01"},
                {"id": "b", "name": "B", "population": 10, "registered": 5, "lastClinicDate": "unknown"}
            ]
        }"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.data_quality_issues(), 2);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Snapshot::from_json("[1, 2"), Err(Error::Json(_))));
    }
}
