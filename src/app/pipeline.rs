//! Shared assessment pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! form -> raw values -> feature derivation -> predictor -> adaptation -> band
//!
//! The front-end can then focus on presentation (printing vs widgets).

use serde_json::{Value, json};

use crate::data::response::AdaptedResult;
use crate::data::{PredictorClient, adapt, predictor, synthetic_response};
use crate::domain::{DerivedFeatureSet, RawParameterSet};
use crate::error::AppError;
use crate::features;
use crate::params::FormState;
use crate::risk::{self, RiskBand};

/// Configuration for one assessment run, derived from CLI flags plus defaults.
#[derive(Debug, Clone)]
pub struct AssessConfig {
    /// Answer from the synthetic predictor instead of the network.
    pub offline: bool,
    /// Seed the form from the predictor's example payload first.
    pub use_template: bool,
    /// Real-value overrides applied through the inverse scale transform.
    pub overrides: Vec<(String, f64)>,
    /// Predictor base URL override (falls back to the environment).
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    /// Synthetic predictor draw count and seed.
    pub samples: usize,
    pub seed: u64,
}

impl Default for AssessConfig {
    fn default() -> Self {
        Self {
            offline: false,
            use_template: false,
            overrides: Vec::new(),
            base_url: None,
            timeout_secs: predictor::DEFAULT_TIMEOUT_SECS,
            samples: 500,
            seed: 42,
        }
    }
}

/// All computed outputs of a single assessment run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub form: FormState,
    pub raw: RawParameterSet,
    pub features: DerivedFeatureSet,
    pub adapted: AdaptedResult,
    pub band: &'static RiskBand,
    /// Set when the live predictor could not be used and the run degraded
    /// to the documented defaults.
    pub transport_error: Option<String>,
}

/// Build the form and derived features without touching the predictor.
///
/// Shared by `assess` and `derive`; enforces the finite-features policy so
/// degenerate configurations never reach the wire.
pub fn prepare_features(
    config: &AssessConfig,
) -> Result<(FormState, RawParameterSet, DerivedFeatureSet), AppError> {
    let mut form = FormState::new()?;

    if config.use_template {
        let client = PredictorClient::from_env(config.base_url.as_deref(), config.timeout_secs)?;
        let template = client.fetch_template()?;
        form.apply_raw(&template);
    }

    for (id, value) in &config.overrides {
        form.set_real(id, *value)?;
    }

    let raw = form.raw_values();
    let derived = features::derive(&raw);
    features::validate_finite(&derived)?;

    Ok((form, raw, derived))
}

/// Execute the full assessment pipeline and return the computed outputs.
///
/// One blocking predictor request per call, applied synchronously, so at
/// most one request is ever in flight and results cannot arrive out of
/// order. Transport failures degrade to the adapter's defaults instead of
/// aborting the run.
pub fn run_assess(config: &AssessConfig) -> Result<RunOutcome, AppError> {
    let (form, raw, derived) = prepare_features(config)?;

    let (response, transport_error) = if config.offline {
        (synthetic_response(&derived, config.samples, config.seed)?, None)
    } else {
        fetch_prediction(config, &derived)
    };

    let adapted = adapt(&response);
    let band = risk::band(adapted.result.risk_category);

    Ok(RunOutcome {
        form,
        raw,
        features: derived,
        adapted,
        band,
        transport_error,
    })
}

/// Query the live predictor, degrading to an empty response on failure.
fn fetch_prediction(config: &AssessConfig, derived: &DerivedFeatureSet) -> (Value, Option<String>) {
    let attempt = PredictorClient::from_env(config.base_url.as_deref(), config.timeout_secs)
        .and_then(|client| client.predict(derived));

    match attempt {
        Ok(response) => (response, None),
        Err(error) => (json!({}), Some(error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> AssessConfig {
        AssessConfig {
            offline: true,
            samples: 200,
            ..AssessConfig::default()
        }
    }

    #[test]
    fn offline_run_produces_a_complete_outcome() {
        let outcome = run_assess(&offline_config()).unwrap();
        assert_eq!(outcome.raw.len(), 17);
        assert!(outcome.features.len() > outcome.raw.len());
        assert!(!outcome.adapted.is_estimated());
        assert!(outcome.transport_error.is_none());
        assert_eq!(outcome.band.category, outcome.adapted.result.risk_category);
    }

    #[test]
    fn overrides_flow_into_raw_values() {
        let mut config = offline_config();
        config
            .overrides
            .push(("number_of_epics".to_string(), 12.0));
        let outcome = run_assess(&config).unwrap();
        assert_eq!(outcome.raw["number_of_epics"], 12.0);
    }

    #[test]
    fn unknown_override_ids_fail_before_any_request() {
        let mut config = offline_config();
        config.overrides.push(("no_such_parameter".to_string(), 1.0));
        let err = run_assess(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn offline_runs_are_reproducible() {
        let a = run_assess(&offline_config()).unwrap();
        let b = run_assess(&offline_config()).unwrap();
        assert_eq!(
            a.adapted.result.mean_probability,
            b.adapted.result.mean_probability
        );
    }
}
