//! Ratio metrics with degenerate-input guards.
//!
//! Every function here is total: a zero or negative denominator yields `0.0`,
//! never `NaN` or infinity.

use serde::Serialize;

/// Control summary for one condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionControl {
    pub eligible: u32,
    pub controlled: u32,
    pub control_rate_percent: f64,
}

/// Controlled count and control rate from eligible/uncontrolled counts.
///
/// ```
/// use healthhive::metrics::condition_control;
///
/// let htn = condition_control(120, 30);
/// assert_eq!(htn.controlled, 90);
/// assert_eq!(htn.control_rate_percent, 75.0);
///
/// assert_eq!(condition_control(0, 0).control_rate_percent, 0.0);
/// ```
pub fn condition_control(eligible: u32, uncontrolled: u32) -> ConditionControl {
    let controlled = eligible.saturating_sub(uncontrolled);
    ConditionControl {
        eligible,
        controlled,
        control_rate_percent: percent_of(f64::from(controlled), f64::from(eligible)),
    }
}

/// Share of the population registered in the program.
pub fn screening_coverage(registered: u32, population: u32) -> f64 {
    percent_of(f64::from(registered), f64::from(population))
}

/// Share of eligible patients whose condition is not controlled.
pub fn uncontrolled_rate(uncontrolled: u32, eligible: u32) -> f64 {
    percent_of(f64::from(uncontrolled), f64::from(eligible))
}

/// `part / whole * 100`, or `0.0` when the ratio is undefined.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 || !whole.is_finite() || !part.is_finite() {
        return 0.0;
    }

    let percent = part / whole * 100.0;
    if percent.is_finite() {
        percent.max(0.0)
    } else {
        0.0
    }
}
