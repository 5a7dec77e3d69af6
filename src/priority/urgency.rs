//! Per-visit urgency for the daily field schedule.
//!
//! The default classifier is a keyword match over the upstream-generated
//! visit reason. Matching is case-sensitive.

use crate::core::Visit;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum VisitUrgency {
    Urgent,
    High,
    #[default]
    Medium,
}

impl VisitUrgency {
    pub fn label(&self) -> &'static str {
        match self {
            VisitUrgency::Urgent => "Urgent",
            VisitUrgency::High => "High",
            VisitUrgency::Medium => "Medium",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            VisitUrgency::Urgent => "#DC2626",
            VisitUrgency::High => "#F97316",
            VisitUrgency::Medium => "#FCD34D",
        }
    }
}

impl std::fmt::Display for VisitUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derives an urgency level for a scheduled visit.
pub trait UrgencyClassifier {
    fn classify(&self, visit: &Visit) -> VisitUrgency;
}

/// Substring match on `Visit::reason`.
#[derive(Debug, Clone)]
pub struct ReasonKeywordClassifier {
    pub urgent_keywords: Vec<String>,
    pub high_keywords: Vec<String>,
}

impl Default for ReasonKeywordClassifier {
    fn default() -> Self {
        Self {
            urgent_keywords: vec!["overdue".to_string(), "Very High".to_string()],
            high_keywords: vec!["High".to_string()],
        }
    }
}

impl UrgencyClassifier for ReasonKeywordClassifier {
    fn classify(&self, visit: &Visit) -> VisitUrgency {
        let reason = visit.reason.as_str();
        let contains_any = |keywords: &[String]| keywords.iter().any(|k| reason.contains(k.as_str()));

        if contains_any(&self.urgent_keywords) {
            VisitUrgency::Urgent
        } else if contains_any(&self.high_keywords) {
            VisitUrgency::High
        } else {
            VisitUrgency::Medium
        }
    }
}

/// Classify with the default keyword rules.
pub fn classify_visit(visit: &Visit) -> VisitUrgency {
    ReasonKeywordClassifier::default().classify(visit)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitAnnotation {
    pub patient_id: String,
    pub patient_name: String,
    pub barangay: String,
    pub reason: String,
    pub urgency: VisitUrgency,
    pub color: &'static str,
}

pub fn annotate_visits<C: UrgencyClassifier + ?Sized>(visits: &[Visit], classifier: &C) -> Vec<VisitAnnotation> {
    visits
        .iter()
        .map(|visit| {
            let urgency = classifier.classify(visit);
            VisitAnnotation {
                patient_id: visit.patient_id.clone(),
                patient_name: visit.patient_name.clone(),
                barangay: visit.barangay.clone(),
                reason: visit.reason.clone(),
                urgency,
                color: urgency.color(),
            }
        })
        .collect()
}
