//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while the form is edited
//! - sent to / received from the external predictor as JSON
//! - bundled into downstream payloads (e.g. the chat-augmentation request)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Real-world values keyed by parameter id, one entry per catalog parameter.
///
/// Always derived from normalized positions via `math::scale`; never stored
/// alongside them.
pub type RawParameterSet = BTreeMap<String, f64>;

/// The feature map sent to the predictor: every raw parameter plus the
/// computed ratio/conversion features.
///
/// `BTreeMap` keeps the wire payload key order deterministic.
pub type DerivedFeatureSet = BTreeMap<String, f64>;

/// How a control position maps onto a parameter's real range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Even spacing across `[min, max]`.
    Linear,
    /// Even spacing in log-space; suits ranges spanning orders of magnitude.
    Log,
}

impl ScaleKind {
    /// Short label for catalog tables.
    pub fn display_name(self) -> &'static str {
        match self {
            ScaleKind::Linear => "linear",
            ScaleKind::Log => "log",
        }
    }
}

/// Static configuration for one form control.
///
/// Constructed once per parameter; `new` enforces every invariant the scale
/// transforms rely on, so the transform functions themselves never validate.
/// No `Deserialize` on purpose: every spec goes through `new`.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    id: String,
    min: f64,
    max: f64,
    step: f64,
    scale: ScaleKind,
    unit: String,
}

impl ParameterSpec {
    /// Build a validated spec.
    ///
    /// Rejected configurations:
    /// - non-finite or inverted range (`min >= max`)
    /// - non-positive or non-finite `step`
    /// - logarithmic scale with `min <= 0` (logarithm undefined)
    /// - `min`/`max` not aligned to `step` (quantized positions could
    ///   otherwise land outside the range)
    pub fn new(
        id: impl Into<String>,
        min: f64,
        max: f64,
        step: f64,
        scale: ScaleKind,
        unit: impl Into<String>,
    ) -> Result<Self, crate::error::AppError> {
        let id = id.into();
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(crate::error::AppError::config(format!(
                "Parameter '{id}': range [{min}, {max}] is invalid."
            )));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(crate::error::AppError::config(format!(
                "Parameter '{id}': step {step} must be positive."
            )));
        }
        if scale == ScaleKind::Log && min <= 0.0 {
            return Err(crate::error::AppError::config(format!(
                "Parameter '{id}': logarithmic scale requires min > 0, got {min}."
            )));
        }
        if !aligned(min, step) || !aligned(max, step) {
            return Err(crate::error::AppError::config(format!(
                "Parameter '{id}': min/max must be multiples of step {step}."
            )));
        }
        Ok(Self {
            id,
            min,
            max,
            step,
            scale,
            unit: unit.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn scale(&self) -> ScaleKind {
        self.scale
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// True when `value` sits on the quantization grid (within float tolerance).
fn aligned(value: f64, step: f64) -> bool {
    let nearest = (value / step).round() * step;
    (value - nearest).abs() <= step * 1e-9 + 1e-12
}

/// Discrete delay-risk category derived from the mean probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
        }
    }
}

/// Canonical prediction record, normalized from whatever the predictor sent.
///
/// Invariants after adaptation: probabilities clamped to `[0, 1]`,
/// `standard_deviation >= 0`. `ci_5 <= mean_probability <= ci_95` is expected
/// but not enforced; upstream violations pass through (clamping aside).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub mean_probability: f64,
    pub standard_deviation: f64,
    pub ci_5: f64,
    pub ci_95: f64,
    pub risk_category: RiskCategory,
}
