//! Color ramps for heat-map layers.

/// Five-band ramp for metrics where higher values are better, worst band first.
pub const FAVORABLE_HIGH_RAMP: [(&str, &str); 5] = [
    ("Critical", "#DC2626"),
    ("Urgent", "#F97316"),
    ("Needs Attention", "#FCD34D"),
    ("Good", "#34D399"),
    ("Excellent", "#10B981"),
];

/// Five-band ramp for metrics where lower values are better, best band first.
pub const FAVORABLE_LOW_RAMP: [(&str, &str); 5] = [
    ("Okay", "#F9FAFB"),
    ("Low Concern", "#FCEFE8"),
    ("Moderate", "#E6B99B"),
    ("Urgent", "#CD5E31"),
    ("Critical", "#B14F22"),
];

/// Band cutoffs shared by both ramps, lowest first.
pub const DEFAULT_CUTOFFS: [f64; 5] = [0.0, 20.0, 40.0, 60.0, 80.0];

pub const LIGHT_TEXT: &str = "#FFFFFF";
pub const DARK_TEXT: &str = "#1E1E1E";

/// Neutral fill for a layer with no bands to classify against.
pub const NO_DATA_COLOR: &str = "#E5E7EB";

/// Union of the dark fills across both ramps and the priority palette.
const DARK_BACKGROUNDS: [&str; 6] = [
    "#DC2626", "#F97316", "#B14F22", "#CD5E31", "#274492", "#3F5FF1",
];

/// Foreground text color readable on the given background.
pub fn text_color_for(background: &str) -> &'static str {
    if DARK_BACKGROUNDS
        .iter()
        .any(|dark| dark.eq_ignore_ascii_case(background))
    {
        LIGHT_TEXT
    } else {
        DARK_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_backgrounds_get_light_text() {
        assert_eq!(text_color_for("#DC2626"), LIGHT_TEXT);
        assert_eq!(text_color_for("#b14f22"), LIGHT_TEXT);
        assert_eq!(text_color_for("#FCD34D"), DARK_TEXT);
    }

    #[test]
    fn red_and_orange_bands_get_light_text_on_both_ramps() {
        for (_, color) in FAVORABLE_HIGH_RAMP.iter().take(2) {
            assert_eq!(text_color_for(color), LIGHT_TEXT);
        }
        for (_, color) in FAVORABLE_LOW_RAMP.iter().skip(3) {
            assert_eq!(text_color_for(color), LIGHT_TEXT);
        }
        assert_eq!(text_color_for(NO_DATA_COLOR), DARK_TEXT);
    }
}
