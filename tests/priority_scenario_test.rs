//! Field-visit priority end to end: control rate, staleness and ranking.

mod common;

use chrono::Duration;
use healthhive::priority::{level_counts, rank_units, score_unit, PriorityConfig, PriorityLevel};
use healthhive::{GeoUnit, RecordDate};
use pretty_assertions::assert_eq;

fn unit(id: &str, registered: u32, dm: u32, htn: u32, clinic: RecordDate) -> GeoUnit {
    GeoUnit {
        population: registered.max(1) * 10,
        registered,
        uncontrolled_dm: dm,
        uncontrolled_htn: htn,
        last_clinic_date: clinic,
        ..GeoUnit::new(id, id)
    }
}

#[test]
fn three_unit_scenario() {
    let now = common::as_of();
    let today = RecordDate::from_timestamp(now);
    let month_ago = RecordDate::from_timestamp(now - Duration::days(30));
    let config = PriorityConfig::default();

    let units = [
        unit("u1", 100, 5, 5, today.clone()),
        unit("u2", 100, 20, 20, month_ago),
        unit("u3", 0, 0, 0, today),
    ];
    let scored: Vec<_> = units.iter().map(|u| score_unit(u, now, &config)).collect();

    let rates: Vec<f64> = scored.iter().map(|s| s.control_rate).collect();
    let scores: Vec<f64> = scored.iter().map(|s| s.priority_score).collect();
    let levels: Vec<PriorityLevel> = scored.iter().map(|s| s.level).collect();

    assert_eq!(rates, vec![90.0, 60.0, 0.0]);
    assert_eq!(scores, vec![90.0, 45.0, 0.0]);
    assert_eq!(
        levels,
        vec![PriorityLevel::Routine, PriorityLevel::High, PriorityLevel::Urgent]
    );
}

#[test]
fn fixture_ranking_is_most_urgent_first() {
    let snapshot = common::load_fixture();
    let ranked = rank_units(&snapshot.barangays, common::as_of(), &PriorityConfig::default());

    let order: Vec<&str> = ranked.iter().map(|p| p.unit_name.as_str()).collect();
    assert_eq!(
        order,
        vec!["Odiong", "Naatang", "Balili", "Alejawan", "Looc", "Tubod Monte", "Cantagay"]
    );

    let odiong = &ranked[0];
    assert_eq!(odiong.days_since_last_clinic, 120);
    assert_eq!(odiong.level, PriorityLevel::Urgent);
    assert_eq!(odiong.color, "#DC2626");

    let counts = level_counts(&ranked);
    assert_eq!((counts.urgent, counts.high, counts.moderate, counts.routine), (1, 0, 3, 3));
}

#[test]
fn ranking_is_sorted_ascending() {
    let snapshot = common::load_fixture();
    let ranked = rank_units(&snapshot.barangays, common::as_of(), &PriorityConfig::strict());
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].priority_score <= pair[1].priority_score));
}

#[test]
fn unknown_clinic_date_is_not_stale() {
    let now = common::as_of();
    let scored = score_unit(
        &unit("u", 100, 10, 10, RecordDate::parse("not recorded")),
        now,
        &PriorityConfig::default(),
    );
    assert_eq!(scored.days_since_last_clinic, 0);
    assert_eq!(scored.priority_score, 80.0);
}
