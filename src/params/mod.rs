//! Parameter catalog and normalized form state.
//!
//! The form's single source of truth is one id -> normalized-position map.
//! Real values are derived on read through `math::scale` and are never
//! stored alongside the positions, so the two representations cannot drift.

use std::collections::BTreeMap;

use crate::domain::{ParameterSpec, RawParameterSet};
use crate::error::AppError;
use crate::math::{to_position, to_real};

pub mod catalog;

pub use catalog::catalog;

/// Default position for every control: the middle of the range.
const DEFAULT_POSITION: f64 = 50.0;

/// Normalized positions for every catalog parameter.
#[derive(Debug, Clone)]
pub struct FormState {
    specs: Vec<ParameterSpec>,
    positions: BTreeMap<String, f64>,
}

impl FormState {
    /// A form over the standard catalog, every control centered.
    pub fn new() -> Result<Self, AppError> {
        Ok(Self::with_specs(catalog()?))
    }

    /// A form over an explicit spec list (used by tests and embedders).
    pub fn with_specs(specs: Vec<ParameterSpec>) -> Self {
        let positions = specs
            .iter()
            .map(|spec| (spec.id().to_string(), DEFAULT_POSITION))
            .collect();
        Self { specs, positions }
    }

    pub fn specs(&self) -> &[ParameterSpec] {
        &self.specs
    }

    fn spec(&self, id: &str) -> Result<&ParameterSpec, AppError> {
        self.specs
            .iter()
            .find(|spec| spec.id() == id)
            .ok_or_else(|| AppError::config(format!("Unknown parameter '{id}'.")))
    }

    /// Current normalized position of a control.
    pub fn position(&self, id: &str) -> Result<f64, AppError> {
        self.spec(id)?;
        Ok(self.positions.get(id).copied().unwrap_or(DEFAULT_POSITION))
    }

    /// Move a control. Positions are UI state, so they clamp to `[0, 100]`.
    pub fn set_position(&mut self, id: &str, position: f64) -> Result<(), AppError> {
        self.spec(id)?;
        let clamped = if position.is_nan() {
            DEFAULT_POSITION
        } else {
            position.clamp(0.0, 100.0)
        };
        self.positions.insert(id.to_string(), clamped);
        Ok(())
    }

    /// Set a control from a typed-in real value, routed through the inverse
    /// scale transform (clamping and NaN tolerance come with it).
    pub fn set_real(&mut self, id: &str, real: f64) -> Result<(), AppError> {
        let spec = self.spec(id)?;
        let position = to_position(real, spec);
        self.positions.insert(id.to_string(), position);
        Ok(())
    }

    /// Real (quantized) value of a control, derived from its position.
    pub fn real_value(&self, id: &str) -> Result<f64, AppError> {
        let spec = self.spec(id)?;
        Ok(to_real(self.position(id)?, spec))
    }

    /// Derive the full raw parameter set from current positions.
    pub fn raw_values(&self) -> RawParameterSet {
        self.specs
            .iter()
            .map(|spec| {
                let position = self.positions.get(spec.id()).copied().unwrap_or(DEFAULT_POSITION);
                (spec.id().to_string(), to_real(position, spec))
            })
            .collect()
    }

    /// Seed the form from a raw payload (e.g. the predictor's template).
    ///
    /// Unknown keys are ignored; known keys go through `set_real` so the
    /// form stays on the quantization grid.
    pub fn apply_raw(&mut self, raw: &RawParameterSet) {
        let known: Vec<(String, f64)> = raw
            .iter()
            .filter(|(id, _)| self.specs.iter().any(|spec| spec.id() == *id))
            .map(|(id, value)| (id.clone(), *value))
            .collect();
        for (id, value) in known {
            // Known id, so set_real cannot fail.
            let _ = self.set_real(&id, value);
        }
    }
}
