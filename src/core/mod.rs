pub mod dates;
pub mod errors;
pub mod snapshot;

pub use dates::RecordDate;
pub use errors::Error;
pub use snapshot::Snapshot;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Chronic condition tracked by the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "HTN", alias = "Hypertension")]
    Hypertension,
    #[serde(
        rename = "DM",
        alias = "Diabetes",
        alias = "Diabetes Mellitus Type 2"
    )]
    Diabetes,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Hypertension => "HTN",
            Condition::Diabetes => "DM",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M", alias = "Male")]
    Male,
    #[serde(rename = "F", alias = "Female")]
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

/// Patient risk level as assigned upstream by clinical rule.
///
/// Ordered by severity; `rank` is the value used for sorting.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    #[default]
    Normal,
    Low,
    #[serde(alias = "Moderate", alias = "Elevated")]
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    pub const fn rank(self) -> u8 {
        match self {
            RiskLevel::Normal => 0,
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
            RiskLevel::VeryHigh => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Normal => "Normal",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }

    pub fn is_high_risk(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::VeryHigh)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the patient's condition currently meets its clinical target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlStatus {
    Controlled,
    Uncontrolled,
    #[default]
    #[serde(alias = "Unassigned")]
    Unknown,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl ControlStatus {
    /// Severity rank: N/A < Controlled < Unknown < Uncontrolled.
    pub const fn rank(self) -> u8 {
        match self {
            ControlStatus::NotApplicable => 0,
            ControlStatus::Controlled => 1,
            ControlStatus::Unknown => 2,
            ControlStatus::Uncontrolled => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ControlStatus::Controlled => "Controlled",
            ControlStatus::Uncontrolled => "Uncontrolled",
            ControlStatus::Unknown => "Unknown",
            ControlStatus::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PatientRecord")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub sex: Option<Sex>,
    pub age: Option<u32>,
    /// Geo-unit reference, by name.
    pub barangay: String,
    pub conditions: BTreeSet<Condition>,
    pub last_visit: RecordDate,
    pub next_due: RecordDate,
    pub risk: RiskLevel,
    pub control_status: ControlStatus,
    pub flagged_for_follow_up: bool,
    pub follow_up_reason: Option<String>,
    #[serde(rename = "latestBP")]
    pub latest_bp: Option<String>,
    #[serde(rename = "latestHbA1c")]
    pub latest_hba1c: Option<String>,
    /// Random blood glucose, mg/dL.
    #[serde(rename = "latestRBG")]
    pub latest_rbg: Option<f64>,
    /// Fasting blood glucose, mg/dL.
    #[serde(rename = "latestFBG")]
    pub latest_fbg: Option<f64>,
    #[serde(rename = "latestBMI")]
    pub latest_bmi: Option<f64>,
    #[serde(rename = "height", skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(rename = "weight", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

/// Patient as sent by the data source. Unrecognized enum values fall back
/// to their defaults instead of failing the whole snapshot.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatientRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "or_default")]
    sex: Option<Sex>,
    #[serde(default, deserialize_with = "or_default")]
    age: Option<u32>,
    barangay: String,
    #[serde(default)]
    conditions: BTreeSet<Condition>,
    #[serde(default)]
    last_visit: RecordDate,
    #[serde(default)]
    next_due: RecordDate,
    #[serde(default, alias = "riskLevel", deserialize_with = "or_default")]
    risk: RiskLevel,
    #[serde(default, deserialize_with = "or_default")]
    control_status: ControlStatus,
    #[serde(default, deserialize_with = "or_default")]
    flagged_for_follow_up: Option<bool>,
    #[serde(default)]
    follow_up_reason: Option<String>,
    #[serde(default, rename = "latestBP")]
    latest_bp: Option<String>,
    #[serde(default, rename = "latestHbA1c")]
    latest_hba1c: Option<String>,
    #[serde(default, rename = "latestRBG")]
    latest_rbg: Option<f64>,
    #[serde(default, rename = "latestFBG")]
    latest_fbg: Option<f64>,
    #[serde(default, rename = "latestBMI")]
    latest_bmi: Option<f64>,
    #[serde(default, rename = "height")]
    height_cm: Option<f64>,
    #[serde(default, rename = "weight")]
    weight_kg: Option<f64>,
}

impl From<PatientRecord> for Patient {
    fn from(record: PatientRecord) -> Self {
        // Without an explicit flag, high-risk patients are flagged.
        let flagged_for_follow_up = record
            .flagged_for_follow_up
            .unwrap_or_else(|| record.risk.is_high_risk());

        Self {
            id: record.id,
            name: record.name,
            sex: record.sex,
            age: record.age,
            barangay: record.barangay,
            conditions: record.conditions,
            last_visit: record.last_visit,
            next_due: record.next_due,
            risk: record.risk,
            control_status: record.control_status,
            flagged_for_follow_up,
            follow_up_reason: record.follow_up_reason,
            latest_bp: record.latest_bp,
            latest_hba1c: record.latest_hba1c,
            latest_rbg: record.latest_rbg,
            latest_fbg: record.latest_fbg,
            latest_bmi: record.latest_bmi,
            height_cm: record.height_cm,
            weight_kg: record.weight_kg,
        }
    }
}

impl Patient {
    pub fn new(id: impl Into<String>, barangay: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            sex: None,
            age: None,
            barangay: barangay.into(),
            conditions: BTreeSet::new(),
            last_visit: RecordDate::missing(),
            next_due: RecordDate::missing(),
            risk: RiskLevel::default(),
            control_status: ControlStatus::default(),
            flagged_for_follow_up: false,
            follow_up_reason: None,
            latest_bp: None,
            latest_hba1c: None,
            latest_rbg: None,
            latest_fbg: None,
            latest_bmi: None,
            height_cm: None,
            weight_kg: None,
        }
    }

    pub fn has_condition(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }
}

/// A barangay: the smallest administrative unit in the service area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoUnit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub population: u32,
    #[serde(default)]
    pub registered: u32,
    #[serde(default)]
    pub screened_percent: f64,
    #[serde(default, rename = "uncontrolledDM")]
    pub uncontrolled_dm: u32,
    #[serde(default, rename = "uncontrolledHTN")]
    pub uncontrolled_htn: u32,
    #[serde(default)]
    pub last_clinic_date: RecordDate,
}

impl GeoUnit {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            population: 0,
            registered: 0,
            screened_percent: 0.0,
            uncontrolled_dm: 0,
            uncontrolled_htn: 0,
            last_clinic_date: RecordDate::missing(),
        }
    }

    pub fn total_uncontrolled(&self) -> u32 {
        self.uncontrolled_dm.saturating_add(self.uncontrolled_htn)
    }

    /// `registered <= population` holds for well-formed source data.
    pub fn is_consistent(&self) -> bool {
        self.registered <= self.population
    }
}

/// A field visit scheduled for today's route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub patient_id: String,
    #[serde(default)]
    pub patient_name: String,
    pub barangay: String,
    #[serde(default)]
    pub reason: String,
    #[serde(
        default,
        rename = "distance",
        deserialize_with = "distance_km",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_km: Option<f64>,
    #[serde(default, rename = "lastBP")]
    pub last_bp: Option<String>,
    #[serde(default, rename = "lastHbA1c")]
    pub last_hba1c: Option<String>,
}

impl Visit {
    pub fn new(
        patient_id: impl Into<String>,
        barangay: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            patient_name: String::new(),
            barangay: barangay.into(),
            reason: reason.into(),
            distance_km: None,
            last_bp: None,
            last_hba1c: None,
        }
    }

    pub fn with_distance(mut self, km: f64) -> Self {
        self.distance_km = Some(km);
        self
    }
}

/// Deserialize `T`, or fall back to `T::default()` for null or
/// unrecognized values.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Known(T),
        Unknown(IgnoredAny),
    }

    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Known(value)) => value,
        Some(Lenient::Unknown(_)) | None => T::default(),
    })
}

/// Accepts `2.3`, `"2.3 km"` or `"2.3"`; anything else becomes `None`.
fn distance_km<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Distance {
        Km(f64),
        Text(String),
    }

    let value = Option::<Distance>::deserialize(deserializer)?;
    Ok(value.and_then(|distance| match distance {
        Distance::Km(km) => Some(km),
        Distance::Text(text) => parse_distance_text(&text),
    }))
}

fn parse_distance_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number = trimmed
        .strip_suffix("km")
        .or_else(|| trimmed.strip_suffix("KM"))
        .unwrap_or(trimmed)
        .trim();
    number.parse::<f64>().ok().filter(|km| km.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_rank_follows_severity() {
        assert!(RiskLevel::Normal.rank() < RiskLevel::Low.rank());
        assert!(RiskLevel::High.rank() < RiskLevel::VeryHigh.rank());
        assert!(RiskLevel::VeryHigh.is_high_risk());
        assert!(!RiskLevel::Medium.is_high_risk());
    }

    #[test]
    fn deserializes_upstream_patient_shape() {
        let json = r#"{
            "id": "JAG-000123",
            "name": "Ana Reyes",
            "sex": "F",
            "age": 58,
            "barangay": "Tubod Monte",
            "conditions": ["HTN", "DM"],
            "lastVisit": "2025-09-12",
            "nextDue": "not set",
            "risk": "Very High",
            "controlStatus": "N/A",
            "latestBP": "156/92",
            "latestRBG": 212
        }"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.risk, RiskLevel::VeryHigh);
        assert_eq!(patient.control_status, ControlStatus::NotApplicable);
        assert!(patient.has_condition(Condition::Diabetes));
        assert!(patient.last_visit.is_valid());
        assert!(!patient.next_due.is_valid());
        assert!(patient.flagged_for_follow_up);
        assert_eq!(patient.latest_rbg, Some(212.0));
    }

    #[test]
    fn normalizes_backend_spellings() {
        let json = r#"{
            "id": "p1", "barangay": "Looc",
            "sex": "Male", "risk": "Elevated", "controlStatus": "Pending",
            "flaggedForFollowUp": null
        }"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.sex, Some(Sex::Male));
        assert_eq!(patient.risk, RiskLevel::Medium);
        assert_eq!(patient.control_status, ControlStatus::Unknown);
        assert!(!patient.flagged_for_follow_up);

        let female: Patient =
            serde_json::from_str(r#"{"id": "p2", "barangay": "Looc", "sex": "Female"}"#).unwrap();
        assert_eq!(female.sex, Some(Sex::Female));
    }

    #[test]
    fn unknown_values_fall_back_instead_of_failing() {
        let json = r#"{"id": "p1", "barangay": "Looc", "sex": "X", "risk": "Extreme", "age": "n/a"}"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.sex, None);
        assert_eq!(patient.risk, RiskLevel::Normal);
        assert_eq!(patient.age, None);
    }

    #[test]
    fn missing_flag_follows_risk() {
        let flag = |body: &str| -> bool {
            let json = format!(r#"{{"id": "p1", "barangay": "Looc", {body}}}"#);
            serde_json::from_str::<Patient>(&json).unwrap().flagged_for_follow_up
        };
        assert!(flag(r#""risk": "Very High""#));
        assert!(flag(r#""risk": "High""#));
        assert!(!flag(r#""risk": "Medium""#));
        assert!(!flag(r#""risk": "Very High", "flaggedForFollowUp": false"#));
        assert!(flag(r#""risk": "Low", "flaggedForFollowUp": true"#));
    }

    #[test]
    fn serialized_patient_reads_back() {
        let mut patient = Patient::new("p1", "Looc");
        patient.risk = RiskLevel::VeryHigh;
        patient.flagged_for_follow_up = false;
        let json = serde_json::to_string(&patient).unwrap();
        assert_eq!(serde_json::from_str::<Patient>(&json).unwrap(), patient);
    }

    #[test]
    fn deserializes_geo_unit_counts() {
        let json = r#"{
            "id": "bg-001", "name": "Alejawan", "population": 1845,
            "registered": 142, "screenedPercent": 73,
            "uncontrolledDM": 12, "uncontrolledHTN": 16,
            "lastClinicDate": "2025-10-05"
        }"#;
        let unit: GeoUnit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.total_uncontrolled(), 28);
        assert!(unit.is_consistent());
    }

    #[test]
    fn visit_distance_accepts_text_and_numbers() {
        let text: Visit = serde_json::from_str(
            r#"{"patientId": "p1", "barangay": "Looc", "reason": "x", "distance": "2.3 km"}"#,
        )
        .unwrap();
        assert_eq!(text.distance_km, Some(2.3));

        let number: Visit = serde_json::from_str(
            r#"{"patientId": "p1", "barangay": "Looc", "distance": 1.5}"#,
        )
        .unwrap();
        assert_eq!(number.distance_km, Some(1.5));

        let garbage: Visit = serde_json::from_str(
            r#"{"patientId": "p1", "barangay": "Looc", "distance": "far"}"#,
        )
        .unwrap();
        assert_eq!(garbage.distance_km, None);
    }
}
