//! Patient registry views and geo-unit lookup.

pub mod sort;

pub use sort::{apply, sort, SortDirection, SortField, SortKey, SortState, Sortable};

use crate::core::{GeoUnit, Patient};
use tracing::{debug, warn};

/// Find a unit by id, then by name.
///
/// An unknown key falls back to the first unit so a detail view always has
/// something to show. `None` only when `units` is empty.
pub fn find_unit<'a>(units: &'a [GeoUnit], key: &str) -> Option<&'a GeoUnit> {
    if let Some(unit) = units.iter().find(|u| u.id == key) {
        return Some(unit);
    }
    if let Some(unit) = units.iter().find(|u| u.name == key) {
        debug!(key, unit = %unit.id, "Matched geo-unit by name");
        return Some(unit);
    }
    let fallback = units.first();
    match fallback {
        Some(unit) => warn!(key, fallback = %unit.id, "Unknown geo-unit; falling back to first unit"),
        None => debug!(key, "Geo-unit lookup on empty collection"),
    }
    fallback
}

/// Case-insensitive substring filter over id, name and geo-unit.
pub fn search<'a>(patients: &'a [Patient], term: &str) -> Vec<&'a Patient> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return patients.iter().collect();
    }
    patients
        .iter()
        .filter(|p| {
            [&p.id, &p.name, &p.barangay]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
