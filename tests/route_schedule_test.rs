//! Today's visit queue from the fixture: urgency and route rollup.

mod common;

use healthhive::priority::{annotate_visits, ReasonKeywordClassifier, VisitUrgency};
use healthhive::schedule::{summarize_route, RouteConfig, RouteGroup};
use pretty_assertions::assert_eq;

#[test]
fn visits_are_annotated_in_queue_order() {
    let snapshot = common::load_fixture();
    let annotated = annotate_visits(&snapshot.visits, &ReasonKeywordClassifier::default());

    let urgencies: Vec<VisitUrgency> = annotated.iter().map(|a| a.urgency).collect();
    assert_eq!(
        urgencies,
        vec![
            VisitUrgency::Medium,
            VisitUrgency::Urgent,
            VisitUrgency::Urgent,
            VisitUrgency::Medium
        ]
    );
    assert_eq!(annotated[1].patient_name, "Maria Cruz");
    assert_eq!(annotated[1].color, VisitUrgency::Urgent.color());
}

#[test]
fn route_summary_groups_by_first_appearance() {
    let snapshot = common::load_fixture();
    let summary = summarize_route(
        &snapshot.visits,
        &ReasonKeywordClassifier::default(),
        &RouteConfig::default(),
    );

    assert_eq!(
        summary.groups,
        vec![
            RouteGroup {
                unit_name: "Tubod Monte".to_string(),
                visit_count: 2,
                urgent_count: 1,
            },
            RouteGroup {
                unit_name: "Naatang".to_string(),
                visit_count: 1,
                urgent_count: 1,
            },
            RouteGroup {
                unit_name: "Cabungaan".to_string(),
                visit_count: 1,
                urgent_count: 0,
            },
        ]
    );
    assert_eq!(summary.visit_count, 4);
    assert_eq!(summary.total_urgent, 2);
    assert!((summary.total_distance_km - 14.7).abs() < 1e-9);
    assert_eq!(summary.estimated_minutes, 120);
    assert_eq!(summary.estimated_hours(), 2.0);
}

#[test]
fn custom_keywords_change_classification() {
    let snapshot = common::load_fixture();
    let classifier = ReasonKeywordClassifier {
        urgent_keywords: vec!["BP 164".to_string()],
        high_keywords: vec!["HbA1c".to_string()],
    };
    let summary = summarize_route(&snapshot.visits, &classifier, &RouteConfig { minutes_per_visit: 45 });

    assert_eq!(summary.total_urgent, 1);
    assert_eq!(summary.groups[2].urgent_count, 1);
    assert_eq!(summary.estimated_minutes, 180);
}

#[test]
fn empty_queue_has_empty_summary() {
    let summary = summarize_route(&[], &ReasonKeywordClassifier::default(), &RouteConfig::default());
    assert!(summary.groups.is_empty());
    assert_eq!(summary.total_distance_km, 0.0);
    assert_eq!(summary.estimated_minutes, 0);
}
