//! Offline synthetic predictor responses.
//!
//! When no predictor is reachable (or `--offline` is set), this module
//! stands in for it: a seeded Monte Carlo draw around a heuristic base
//! probability, summarized with the same statistics the real predictor
//! reports (mean, sample std, 5th/95th percentiles). The response uses the
//! predictor's primary field names so it flows through the normal
//! adaptation path.
//!
//! The heuristic is a stand-in, not a model: a logistic squash of a few
//! workload ratios, tuned so mid-range forms land near the middle of the
//! probability scale.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde_json::{Value, json};

use crate::domain::DerivedFeatureSet;
use crate::error::AppError;
use crate::features;
use crate::math::{mean, percentile, sample_std};

/// Story points per engineer considered a heavy load.
const POINTS_PER_ENGINEER_PIVOT: f64 = 40.0;
/// Hours per story above which completion time reads as slow.
const COMPLETION_HOURS_PIVOT: f64 = 48.0;
/// Team size above which coordination overhead starts to bite.
const MEMBERS_PER_TEAM_PIVOT: f64 = 9.0;
/// Spread of the per-draw noise around the base probability.
const NOISE_STD: f64 = 0.12;

/// Generate a synthetic predictor response from the derived features.
///
/// Deterministic for a given `(features, samples, seed)` triple: the RNG
/// seed mixes the caller's seed with the feature bits, so changing any
/// input changes the draw while reruns reproduce it exactly.
pub fn synthetic_response(
    features: &DerivedFeatureSet,
    samples: usize,
    seed: u64,
) -> Result<Value, AppError> {
    if samples == 0 {
        return Err(AppError::config("Sample count must be > 0."));
    }

    let base = base_probability(features)?;
    let mut rng = StdRng::seed_from_u64(response_seed(features, samples, seed));
    let normal = Normal::new(0.0, NOISE_STD)
        .map_err(|e| AppError::data(format!("Noise distribution error: {e}")))?;

    let mut draws = Vec::with_capacity(samples);
    for _ in 0..samples {
        let p: f64 = base + normal.sample(&mut rng);
        draws.push(p.clamp(0.0, 1.0));
    }

    Ok(json!({
        "mean_prob": mean(&draws),
        "std": sample_std(&draws),
        "ci_5": percentile(&draws, 5.0),
        "ci_95": percentile(&draws, 95.0),
    }))
}

/// Heuristic base probability of delay from workload ratios.
fn base_probability(features: &DerivedFeatureSet) -> Result<f64, AppError> {
    let points_per_engineer = feature(features, features::AVERAGE_STORY_POINTS_PER_ENGINEER)?;
    let completion_hours = feature(features, features::AVERAGE_STORY_COMPLETION_HOURS)?;
    let members_per_team = feature(features, features::AVERAGE_MEMBERS_PER_TEAM)?;

    let z = 0.9 * (points_per_engineer / POINTS_PER_ENGINEER_PIVOT - 1.0)
        + 0.6 * (completion_hours / COMPLETION_HOURS_PIVOT - 1.0)
        + 0.4 * (members_per_team / MEMBERS_PER_TEAM_PIVOT - 1.0);

    Ok(logistic(z))
}

fn feature(features: &DerivedFeatureSet, key: &str) -> Result<f64, AppError> {
    match features.get(key) {
        Some(v) if v.is_finite() => Ok(*v),
        _ => Err(AppError::data(format!(
            "Synthetic response needs a finite '{key}' feature."
        ))),
    }
}

fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Mix the caller's seed with the feature values for reproducibility.
fn response_seed(features: &DerivedFeatureSet, samples: usize, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    for (key, value) in features {
        key.hash(&mut hasher);
        value.to_bits().hash(&mut hasher);
    }
    samples.hash(&mut hasher);
    seed.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawParameterSet;

    fn derived_fixture() -> DerivedFeatureSet {
        let mut raw = RawParameterSet::new();
        for (key, value) in [
            (features::TOTAL_PROJECT_MEMBERS, 20.0),
            (features::NUMBER_OF_DIFFERENT_TEAMS, 4.0),
            (features::TOTAL_PROJECT_STORIES, 200.0),
            (features::TOTAL_STORY_POINTS, 800.0),
            (features::NUMBER_OF_EPICS, 8.0),
            (features::AVERAGE_SENIORITY_YEARS, 3.0),
            (features::AVERAGE_STORY_COMPLETION_HOURS, 48.0),
            (features::AVERAGE_IN_PROGRESS_HOURS, 24.0),
            (features::ESTIMATED_PROJECT_DURATION_IN_DAYS, 120.0),
        ] {
            raw.insert(key.to_string(), value);
        }
        features::derive(&raw)
    }

    #[test]
    fn responses_are_deterministic_per_seed() {
        let derived = derived_fixture();
        let a = synthetic_response(&derived, 200, 42).unwrap();
        let b = synthetic_response(&derived, 200, 42).unwrap();
        assert_eq!(a, b);

        let c = synthetic_response(&derived, 200, 43).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn summary_statistics_are_coherent() {
        let derived = derived_fixture();
        let value = synthetic_response(&derived, 500, 42).unwrap();
        let object = value.as_object().unwrap();

        let mean_prob = object["mean_prob"].as_f64().unwrap();
        let std = object["std"].as_f64().unwrap();
        let ci_5 = object["ci_5"].as_f64().unwrap();
        let ci_95 = object["ci_95"].as_f64().unwrap();

        assert!((0.0..=1.0).contains(&mean_prob));
        assert!(std >= 0.0);
        assert!(ci_5 <= mean_prob && mean_prob <= ci_95);
    }

    #[test]
    fn zero_samples_is_a_config_error() {
        let err = synthetic_response(&derived_fixture(), 0, 42).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn non_finite_features_are_rejected() {
        let mut derived = derived_fixture();
        derived.insert(
            features::AVERAGE_STORY_POINTS_PER_ENGINEER.to_string(),
            f64::INFINITY,
        );
        assert!(synthetic_response(&derived, 100, 42).is_err());
    }

    #[test]
    fn synthetic_response_flows_through_the_adapter() {
        let value = synthetic_response(&derived_fixture(), 300, 7).unwrap();
        let adapted = crate::data::response::adapt(&value);
        assert!(!adapted.is_estimated());
    }
}
