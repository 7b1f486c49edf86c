//! Classification of a delay probability into a discrete risk band.

use crate::domain::RiskCategory;

/// Probabilities below this are Low risk.
pub const LOW_UPPER: f64 = 0.33;
/// Probabilities below this (and at/above `LOW_UPPER`) are Moderate risk.
pub const MODERATE_UPPER: f64 = 0.66;

/// Presentation tokens for one risk category.
///
/// The tokens identify a color/gradient family; what they look like is the
/// presentation layer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskBand {
    pub category: RiskCategory,
    pub color: &'static str,
    pub gradient: &'static str,
}

/// Category -> presentation tokens, one entry per category.
const BANDS: [RiskBand; 3] = [
    RiskBand {
        category: RiskCategory::Low,
        color: "white",
        gradient: "white",
    },
    RiskBand {
        category: RiskCategory::Moderate,
        color: "yellow",
        gradient: "amber-yellow",
    },
    RiskBand {
        category: RiskCategory::High,
        color: "red",
        gradient: "orange-red",
    },
];

/// Classify a mean delay probability.
///
/// Brackets are closed below and open above: `[0, 0.33)` Low,
/// `[0.33, 0.66)` Moderate, `[0.66, 1]` High. Out-of-range input is clamped
/// first, so anything below 0 is Low and anything above 1 is High. NaN falls
/// through the comparisons to High; an unreadable probability is treated as
/// the conservative category.
pub fn classify(mean_probability: f64) -> RiskCategory {
    let p = mean_probability.clamp(0.0, 1.0);
    if p < LOW_UPPER {
        RiskCategory::Low
    } else if p < MODERATE_UPPER {
        RiskCategory::Moderate
    } else {
        RiskCategory::High
    }
}

/// Look up the presentation band for a category.
pub fn band(category: RiskCategory) -> &'static RiskBand {
    match category {
        RiskCategory::Low => &BANDS[0],
        RiskCategory::Moderate => &BANDS[1],
        RiskCategory::High => &BANDS[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_closed_below_open_above() {
        assert_eq!(classify(0.10), RiskCategory::Low);
        assert_eq!(classify(0.33), RiskCategory::Moderate);
        assert_eq!(classify(0.65), RiskCategory::Moderate);
        assert_eq!(classify(0.66), RiskCategory::High);
    }

    #[test]
    fn out_of_range_probabilities_clamp() {
        assert_eq!(classify(-0.2), RiskCategory::Low);
        assert_eq!(classify(1.5), RiskCategory::High);
    }

    #[test]
    fn nan_classifies_as_high() {
        assert_eq!(classify(f64::NAN), RiskCategory::High);
    }

    #[test]
    fn every_category_has_a_band() {
        for category in [RiskCategory::Low, RiskCategory::Moderate, RiskCategory::High] {
            assert_eq!(band(category).category, category);
        }
        assert_eq!(band(RiskCategory::High).color, "red");
    }
}
