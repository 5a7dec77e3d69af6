//! Tri-state registry sorting.
//!
//! Clicking the same column cycles `None -> Ascending -> Descending -> None`;
//! clicking another column starts over at `Ascending`. `None` shows records in
//! the order they were supplied.

use crate::core::Patient;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    None,
}

impl SortDirection {
    /// Next direction when the active column is clicked again.
    pub fn cycle(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
            SortDirection::None => "",
        }
    }
}

/// A typed value extracted from a record for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(Option<f64>),
    /// Position in a fixed severity table.
    Rank(u8),
    /// Milliseconds since the epoch; unparseable dates carry `i64::MIN`.
    Date(i64),
    Flag(bool),
}

impl SortKey<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            (SortKey::Rank(a), SortKey::Rank(b)) => a.cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Flag(a), SortKey::Flag(b)) => a.cmp(b),
            _ => self.variant_index().cmp(&other.variant_index()),
        }
    }

    fn variant_index(&self) -> u8 {
        match self {
            SortKey::Text(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Rank(_) => 2,
            SortKey::Date(_) => 3,
            SortKey::Flag(_) => 4,
        }
    }
}

/// A record that can be ordered by any of its sortable columns.
pub trait Sortable {
    type Field: Copy + Eq;

    fn sort_key(&self, field: Self::Field) -> SortKey<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
#[value(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    Age,
    Sex,
    Barangay,
    LastVisit,
    NextDue,
    Risk,
    ControlStatus,
    FlaggedForFollowUp,
}

impl SortField {
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Id => "ID",
            SortField::Name => "Name",
            SortField::Age => "Age",
            SortField::Sex => "Sex",
            SortField::Barangay => "Barangay",
            SortField::LastVisit => "Last Visit",
            SortField::NextDue => "Next Due",
            SortField::Risk => "Risk",
            SortField::ControlStatus => "Control",
            SortField::FlaggedForFollowUp => "Follow-up",
        }
    }
}

impl Sortable for Patient {
    type Field = SortField;

    fn sort_key(&self, field: SortField) -> SortKey<'_> {
        match field {
            SortField::Id => SortKey::Text(&self.id),
            SortField::Name => SortKey::Text(&self.name),
            SortField::Age => SortKey::Number(self.age.map(f64::from)),
            SortField::Sex => SortKey::Text(self.sex.map(|s| s.as_str()).unwrap_or("")),
            SortField::Barangay => SortKey::Text(&self.barangay),
            SortField::LastVisit => SortKey::Date(self.last_visit.sort_key()),
            SortField::NextDue => SortKey::Date(self.next_due.sort_key()),
            SortField::Risk => SortKey::Rank(self.risk.rank()),
            SortField::ControlStatus => SortKey::Rank(self.control_status.rank()),
            SortField::FlaggedForFollowUp => SortKey::Flag(self.flagged_for_follow_up),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<F = SortField> {
    pub field: Option<F>,
    pub direction: SortDirection,
}

impl<F> Default for SortState<F> {
    fn default() -> Self {
        Self {
            field: None,
            direction: SortDirection::None,
        }
    }
}

impl<F: Copy + Eq> SortState<F> {
    /// State after a click on `field`.
    ///
    /// Leaving the descending state clears the active column.
    pub fn click(&self, field: F) -> Self {
        if self.field != Some(field) {
            return Self {
                field: Some(field),
                direction: SortDirection::Ascending,
            };
        }
        match self.direction.cycle() {
            SortDirection::None => Self::default(),
            direction => Self {
                field: Some(field),
                direction,
            },
        }
    }

    pub fn is_active(&self) -> bool {
        self.field.is_some() && self.direction != SortDirection::None
    }
}

/// Order `records` under `state`, leaving the input untouched.
///
/// Stable: records with equal keys keep their input order in both directions.
pub fn apply<T: Sortable + Clone>(records: &[T], state: &SortState<T::Field>) -> Vec<T> {
    let mut sorted = records.to_vec();
    let Some(field) = state.field else {
        return sorted;
    };
    match state.direction {
        SortDirection::Ascending => {
            sorted.sort_by(|a, b| a.sort_key(field).compare(&b.sort_key(field)));
        }
        SortDirection::Descending => {
            sorted.sort_by(|a, b| b.sort_key(field).compare(&a.sort_key(field)));
        }
        SortDirection::None => {}
    }
    sorted
}

/// Handle a click on `field`: returns the reordered records and the new state.
pub fn sort<T: Sortable + Clone>(
    records: &[T],
    field: T::Field,
    current: &SortState<T::Field>,
) -> (Vec<T>, SortState<T::Field>) {
    let next = current.click(field);
    (apply(records, &next), next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ControlStatus, RecordDate, RiskLevel};

    fn patient(id: &str) -> Patient {
        Patient::new(id, "Alejawan")
    }

    fn ids(records: &[Patient]) -> Vec<&str> {
        records.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn same_field_cycles_through_three_states() {
        let state = SortState::default();
        let s1 = state.click(SortField::Age);
        assert_eq!(s1.direction, SortDirection::Ascending);
        let s2 = s1.click(SortField::Age);
        assert_eq!(s2.direction, SortDirection::Descending);
        let s3 = s2.click(SortField::Age);
        assert_eq!(s3, SortState::default());
        assert!(!s3.is_active());
    }

    #[test]
    fn other_field_resets_to_ascending() {
        let state = SortState {
            field: Some(SortField::Name),
            direction: SortDirection::Descending,
        };
        let next = state.click(SortField::Risk);
        assert_eq!(next.field, Some(SortField::Risk));
        assert_eq!(next.direction, SortDirection::Ascending);
    }

    #[test]
    fn risk_sorts_by_severity_not_alphabet() {
        let mut very_high = patient("a");
        very_high.risk = RiskLevel::VeryHigh;
        let mut normal = patient("b");
        normal.risk = RiskLevel::Normal;
        let mut low = patient("c");
        low.risk = RiskLevel::Low;

        let (sorted, _) = sort(&[very_high, normal, low], SortField::Risk, &SortState::default());
        assert_eq!(ids(&sorted), vec!["b", "c", "a"]);
    }

    #[test]
    fn control_status_rank_table() {
        let statuses = [
            ControlStatus::Uncontrolled,
            ControlStatus::Unknown,
            ControlStatus::Controlled,
            ControlStatus::NotApplicable,
        ];
        let records: Vec<Patient> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Patient {
                control_status: *status,
                ..patient(&i.to_string())
            })
            .collect();
        let (sorted, _) = sort(&records, SortField::ControlStatus, &SortState::default());
        assert_eq!(ids(&sorted), vec!["3", "2", "1", "0"]);
    }

    #[test]
    fn unparseable_dates_sort_first() {
        let records = vec![
            Patient {
                last_visit: RecordDate::parse("2025-10-01"),
                ..patient("oct")
            },
            Patient {
                last_visit: RecordDate::parse("Never"),
                ..patient("never")
            },
            Patient {
                last_visit: RecordDate::parse("2025-03-15"),
                ..patient("mar")
            },
        ];
        let (sorted, _) = sort(&records, SortField::LastVisit, &SortState::default());
        assert_eq!(ids(&sorted), vec!["never", "mar", "oct"]);
    }

    #[test]
    fn flagged_is_greater_than_unflagged() {
        let records = vec![
            Patient {
                flagged_for_follow_up: true,
                ..patient("flagged")
            },
            patient("clear"),
        ];
        let (sorted, _) = sort(&records, SortField::FlaggedForFollowUp, &SortState::default());
        assert_eq!(ids(&sorted), vec!["clear", "flagged"]);
    }

    #[test]
    fn descending_keeps_ties_in_input_order() {
        let records = vec![
            Patient { age: Some(50), ..patient("x") },
            Patient { age: Some(60), ..patient("y") },
            Patient { age: Some(50), ..patient("z") },
        ];
        let state = SortState {
            field: Some(SortField::Age),
            direction: SortDirection::Ascending,
        };
        let (sorted, next) = sort(&records, SortField::Age, &state);
        assert_eq!(next.direction, SortDirection::Descending);
        assert_eq!(ids(&sorted), vec!["y", "x", "z"]);
    }

    #[test]
    fn missing_age_sorts_first() {
        let records = vec![Patient { age: Some(40), ..patient("a") }, patient("b")];
        let (sorted, _) = sort(&records, SortField::Age, &SortState::default());
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn three_clicks_restore_input_order(ages in prop::collection::vec(proptest::option::of(0u32..100), 0..30)) {
            let records: Vec<Patient> = ages
                .iter()
                .enumerate()
                .map(|(i, age)| Patient { age: *age, ..Patient::new(i.to_string(), "x") })
                .collect();

            let (_, ascending) = sort(&records, SortField::Age, &SortState::default());
            let (_, descending) = sort(&records, SortField::Age, &ascending);
            let (view, cleared) = sort(&records, SortField::Age, &descending);
            prop_assert_eq!(cleared, SortState::default());
            prop_assert_eq!(view, records);
        }
    }
}
