//! Normalization of predictor responses into the canonical result record.
//!
//! The predictor's response schema has drifted over time, so each canonical
//! field resolves from a list of accepted key names. Missing fields fall
//! back to documented defaults so the caller always has a renderable
//! result; `AdaptedResult` records which fields were defaulted so the
//! presentation layer can label the result as estimated rather than real.

use serde_json::Value;

use crate::domain::PredictionResult;
use crate::risk;

/// One canonical field: accepted source keys (tried in order) and the
/// fallback value. Keeping this table data-driven means new aliases are a
/// one-line addition.
struct FieldSpec {
    canonical: &'static str,
    aliases: &'static [&'static str],
    default: f64,
}

const MEAN_PROBABILITY: FieldSpec = FieldSpec {
    canonical: "mean_probability",
    aliases: &["mean_prob", "mean_probability"],
    default: 0.72,
};

const STANDARD_DEVIATION: FieldSpec = FieldSpec {
    canonical: "standard_deviation",
    aliases: &["std", "standard_deviation_of_probability"],
    default: 0.15,
};

const CI_5: FieldSpec = FieldSpec {
    canonical: "ci_5",
    aliases: &["ci_5"],
    default: 0.53,
};

const CI_95: FieldSpec = FieldSpec {
    canonical: "ci_95",
    aliases: &["ci_95"],
    default: 0.87,
};

/// A canonical result plus provenance: which fields came from defaults
/// rather than the response.
#[derive(Debug, Clone)]
pub struct AdaptedResult {
    pub result: PredictionResult,
    pub defaulted_fields: Vec<&'static str>,
}

impl AdaptedResult {
    /// True when any canonical field was filled from a default.
    pub fn is_estimated(&self) -> bool {
        !self.defaulted_fields.is_empty()
    }
}

/// The fully-defaulted record, used when the predictor is unreachable.
pub fn default_result() -> PredictionResult {
    build_result(
        MEAN_PROBABILITY.default,
        STANDARD_DEVIATION.default,
        CI_5.default,
        CI_95.default,
    )
}

/// Normalize a loosely-shaped response into the canonical record.
///
/// Accepts any JSON value; everything that is not a numeric field under a
/// known key resolves to its default. Probabilities clamp to `[0, 1]` and
/// the standard deviation to `>= 0`; a `ci_5 > mean > ci_95` violation is
/// passed through untouched beyond that. Extra response fields (e.g. the
/// raw sample array) are ignored. The risk category is always recomputed
/// from the canonical mean, never trusted from the response.
pub fn adapt(response: &Value) -> AdaptedResult {
    let mut defaulted_fields = Vec::new();
    let mut resolve = |spec: &FieldSpec| match lookup(response, spec.aliases) {
        Some(value) => value,
        None => {
            defaulted_fields.push(spec.canonical);
            spec.default
        }
    };

    let mean = resolve(&MEAN_PROBABILITY);
    let std = resolve(&STANDARD_DEVIATION);
    let ci_5 = resolve(&CI_5);
    let ci_95 = resolve(&CI_95);

    AdaptedResult {
        result: build_result(mean, std, ci_5, ci_95),
        defaulted_fields,
    }
}

fn build_result(mean: f64, std: f64, ci_5: f64, ci_95: f64) -> PredictionResult {
    let mean_probability = mean.clamp(0.0, 1.0);
    PredictionResult {
        mean_probability,
        standard_deviation: std.max(0.0),
        ci_5: ci_5.clamp(0.0, 1.0),
        ci_95: ci_95.clamp(0.0, 1.0),
        risk_category: risk::classify(mean_probability),
    }
}

/// First finite number found under any accepted key.
fn lookup(response: &Value, aliases: &[&str]) -> Option<f64> {
    let object = response.as_object()?;
    for key in aliases {
        if let Some(number) = object.get(*key).and_then(Value::as_f64) {
            if number.is_finite() {
                return Some(number);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskCategory;
    use serde_json::json;

    #[test]
    fn empty_response_yields_documented_defaults() {
        let adapted = adapt(&json!({}));
        assert!(adapted.is_estimated());
        assert_eq!(adapted.result.mean_probability, 0.72);
        assert_eq!(adapted.result.standard_deviation, 0.15);
        assert_eq!(adapted.result.ci_5, 0.53);
        assert_eq!(adapted.result.ci_95, 0.87);
        assert_eq!(adapted.result.risk_category, RiskCategory::High);
        assert_eq!(adapted.defaulted_fields.len(), 4);
    }

    #[test]
    fn primary_key_names_resolve() {
        let adapted = adapt(&json!({
            "mean_prob": 0.2,
            "std": 0.05,
            "ci_5": 0.1,
            "ci_95": 0.3,
        }));
        assert!(!adapted.is_estimated());
        assert_eq!(adapted.result.mean_probability, 0.2);
        assert_eq!(adapted.result.risk_category, RiskCategory::Low);
    }

    #[test]
    fn alternate_key_names_resolve() {
        let adapted = adapt(&json!({
            "mean_probability": 0.2,
            "standard_deviation_of_probability": 0.05,
            "ci_5": 0.1,
            "ci_95": 0.3,
        }));
        assert!(!adapted.is_estimated());
        assert_eq!(adapted.result.mean_probability, 0.2);
        assert_eq!(adapted.result.standard_deviation, 0.05);
        assert_eq!(adapted.result.risk_category, RiskCategory::Low);
    }

    #[test]
    fn partial_responses_default_the_gaps() {
        let adapted = adapt(&json!({"mean_prob": 0.4}));
        assert!(adapted.is_estimated());
        assert_eq!(adapted.result.mean_probability, 0.4);
        assert_eq!(adapted.result.ci_5, 0.53);
        assert_eq!(
            adapted.defaulted_fields,
            vec!["standard_deviation", "ci_5", "ci_95"]
        );
    }

    #[test]
    fn values_clamp_but_are_not_reordered() {
        let adapted = adapt(&json!({
            "mean_prob": 1.4,
            "std": -0.1,
            "ci_5": 0.9,
            "ci_95": 0.2,
        }));
        assert_eq!(adapted.result.mean_probability, 1.0);
        assert_eq!(adapted.result.standard_deviation, 0.0);
        // An inverted interval passes through; the adapter only clamps.
        assert_eq!(adapted.result.ci_5, 0.9);
        assert_eq!(adapted.result.ci_95, 0.2);
        assert_eq!(adapted.result.risk_category, RiskCategory::High);
    }

    #[test]
    fn non_numeric_and_non_object_responses_fall_back() {
        let adapted = adapt(&json!({"mean_prob": "high"}));
        assert!(adapted.defaulted_fields.contains(&"mean_probability"));

        let adapted = adapt(&json!("not an object"));
        assert_eq!(adapted.defaulted_fields.len(), 4);

        let adapted = adapt(&Value::Null);
        assert_eq!(adapted.result.mean_probability, 0.72);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let adapted = adapt(&json!({
            "mean_prob": 0.5,
            "std": 0.1,
            "ci_5": 0.4,
            "ci_95": 0.6,
            "risk_category": "Low",
            "all_samples": [0.1, 0.9],
        }));
        assert!(!adapted.is_estimated());
        // Category is recomputed from the mean, not read from the response.
        assert_eq!(adapted.result.risk_category, RiskCategory::Moderate);
    }
}
