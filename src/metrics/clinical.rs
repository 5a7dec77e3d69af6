//! Clinical classification helpers used by the analytics distributions.

use super::aggregate::percent_of;
use super::round_to;
use crate::core::Patient;
use serde::Serialize;

/// Blood pressure category from a systolic/diastolic pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BpCategory {
    Normal,
    Elevated,
    Stage1,
    Stage2,
}

impl BpCategory {
    pub const ALL: [BpCategory; 4] = [
        BpCategory::Normal,
        BpCategory::Elevated,
        BpCategory::Stage1,
        BpCategory::Stage2,
    ];

    pub fn classify(systolic: u16, diastolic: u16) -> Self {
        if systolic < 120 && diastolic < 80 {
            BpCategory::Normal
        } else if (120..130).contains(&systolic) && diastolic < 80 {
            BpCategory::Elevated
        } else if (130..140).contains(&systolic) || (80..90).contains(&diastolic) {
            BpCategory::Stage1
        } else {
            BpCategory::Stage2
        }
    }

    /// Classify a "156/92" style reading. Returns `None` for unparseable text.
    pub fn from_reading(reading: &str) -> Option<Self> {
        parse_bp(reading).map(|(sys, dia)| Self::classify(sys, dia))
    }

    pub fn label(self) -> &'static str {
        match self {
            BpCategory::Normal => "Normal",
            BpCategory::Elevated => "Elevated",
            BpCategory::Stage1 => "Stage 1",
            BpCategory::Stage2 => "Stage 2",
        }
    }
}

/// Parse "sys/dia" text, tolerating whitespace and a trailing unit.
pub fn parse_bp(reading: &str) -> Option<(u16, u16)> {
    let (sys, dia) = reading.split_once('/')?;
    let dia = dia.trim().trim_end_matches("mmHg").trim();
    Some((sys.trim().parse().ok()?, dia.parse().ok()?))
}

/// BMI category using the Asia-Pacific cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    ObeseI,
    ObeseII,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 5] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::ObeseI,
        BmiCategory::ObeseII,
    ];

    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 23.0 {
            BmiCategory::Normal
        } else if bmi < 25.0 {
            BmiCategory::Overweight
        } else if bmi < 30.0 {
            BmiCategory::ObeseI
        } else {
            BmiCategory::ObeseII
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight (<18.5)",
            BmiCategory::Normal => "Normal (18.5-22.9)",
            BmiCategory::Overweight => "Overweight (23-24.9)",
            BmiCategory::ObeseI => "Obese I (25-29.9)",
            BmiCategory::ObeseII => "Obese II (≥30)",
        }
    }
}

/// Body-mass index from weight (kg) and height (cm), one decimal.
pub fn bmi_from(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let meters = height_cm / 100.0;
    Some(round_to(weight_kg / (meters * meters), 1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GlucoseTest {
    /// Fasting blood glucose
    Fasting,
    /// Random blood glucose
    Random,
}

impl GlucoseTest {
    /// Upper bounds (inclusive except the first) and labels for each bucket.
    fn buckets(self) -> [(&'static str, f64); 5] {
        match self {
            GlucoseTest::Fasting => [
                ("<100", 100.0),
                ("100-125", 125.0),
                ("126-180", 180.0),
                ("181-250", 250.0),
                (">250", f64::INFINITY),
            ],
            GlucoseTest::Random => [
                ("<140", 140.0),
                ("140-199", 199.0),
                ("200-250", 250.0),
                ("251-350", 350.0),
                (">350", f64::INFINITY),
            ],
        }
    }

    /// Index of the bucket a reading falls into.
    pub fn bucket_index(self, mg_dl: f64) -> usize {
        let buckets = self.buckets();
        if mg_dl < buckets[0].1 {
            return 0;
        }
        buckets[1..]
            .iter()
            .position(|&(_, upper)| mg_dl <= upper)
            .map(|i| i + 1)
            .unwrap_or(buckets.len() - 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBucket {
    pub label: String,
    pub count: u32,
    pub percent: f64,
}

/// Distribution of glucose readings into the test's five ranges.
pub fn glucose_distribution(test: GlucoseTest, readings: &[f64]) -> Vec<DistributionBucket> {
    let mut counts = [0u32; 5];
    for &reading in readings.iter().filter(|r| r.is_finite()) {
        counts[test.bucket_index(reading)] += 1;
    }
    let total: u32 = counts.iter().sum();

    test.buckets()
        .iter()
        .zip(counts)
        .map(|(&(label, _), count)| bucket(label, count, total))
        .collect()
}

/// Recorded BMI, else computed from height and weight.
pub fn patient_bmi(patient: &Patient) -> Option<f64> {
    patient.latest_bmi.or_else(|| match (patient.weight_kg, patient.height_cm) {
        (Some(weight), Some(height)) => bmi_from(weight, height),
        _ => None,
    })
}

/// Distribution of patients with a known BMI into categories.
pub fn bmi_distribution(patients: &[Patient]) -> Vec<DistributionBucket> {
    let categories: Vec<BmiCategory> = patients
        .iter()
        .filter_map(patient_bmi)
        .map(BmiCategory::classify)
        .collect();
    let total = categories.len() as u32;

    BmiCategory::ALL
        .iter()
        .map(|&category| {
            let count = categories.iter().filter(|&&c| c == category).count() as u32;
            bucket(category.label(), count, total)
        })
        .collect()
}

/// Distribution of patients with a parseable latest BP reading.
pub fn bp_distribution(patients: &[Patient]) -> Vec<DistributionBucket> {
    let categories: Vec<BpCategory> = patients
        .iter()
        .filter_map(|p| p.latest_bp.as_deref())
        .filter_map(BpCategory::from_reading)
        .collect();
    let total = categories.len() as u32;

    BpCategory::ALL
        .iter()
        .map(|&category| {
            let count = categories.iter().filter(|&&c| c == category).count() as u32;
            bucket(category.label(), count, total)
        })
        .collect()
}

const AGE_GROUPS: [(&str, u32, u32); 6] = [
    ("18-29", 18, 29),
    ("30-39", 30, 39),
    ("40-49", 40, 49),
    ("50-59", 50, 59),
    ("60-69", 60, 69),
    ("70+", 70, u32::MAX),
];

/// Age-group distribution. Percentages are of all patients, including
/// those without a recorded age.
pub fn age_distribution(patients: &[Patient]) -> Vec<DistributionBucket> {
    let total = patients.len() as u32;
    AGE_GROUPS
        .iter()
        .map(|&(label, min, max)| {
            let count = patients
                .iter()
                .filter_map(|p| p.age)
                .filter(|age| (min..=max).contains(age))
                .count() as u32;
            bucket(label, count, total)
        })
        .collect()
}

fn bucket(label: &str, count: u32, total: u32) -> DistributionBucket {
    DistributionBucket {
        label: label.to_string(),
        count,
        percent: round_to(percent_of(f64::from(count), f64::from(total)), 1),
    }
}
