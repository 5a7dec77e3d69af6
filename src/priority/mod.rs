//! Operational prioritization: which units to visit first, and how urgent
//! each scheduled visit is.

pub mod scorer;
pub mod tiers;
pub mod urgency;

pub use scorer::{
    compare_priority, days_since_last_clinic, level_counts, priority_score, rank_units, score_unit,
    top_priorities, unit_control_rate, PriorityCounts, UnitPriority,
};
pub use tiers::{classify_level, PriorityConfig, PriorityLevel};
pub use urgency::{
    annotate_visits, classify_visit, ReasonKeywordClassifier, UrgencyClassifier, VisitAnnotation,
    VisitUrgency,
};
