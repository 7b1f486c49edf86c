//! Bidirectional mapping between normalized control positions and real values.
//!
//! A position lives in UI space, nominally `[0, 100]`, independent of the
//! parameter's real range. The forward map picks the real value for a
//! position; the inverse recovers a position when the user types a real value
//! directly.
//!
//! Numerical notes:
//! - `to_real` quantizes to the nearest multiple of `step`; `to_position`
//!   rounds to an integer position but does not re-quantize, so round-trips
//!   agree only to within one step.
//! - Positions outside `[0, 100]` are not rejected: the map extrapolates and
//!   callers clamp before display.
//! - `to_position` never returns NaN; non-finite input collapses to the
//!   nearest boundary position.

use crate::domain::{ParameterSpec, ScaleKind};

/// Map a normalized position to a quantized real value.
pub fn to_real(position: f64, spec: &ParameterSpec) -> f64 {
    let raw = match spec.scale() {
        ScaleKind::Linear => spec.min() + (spec.max() - spec.min()) * (position / 100.0),
        ScaleKind::Log => {
            let lo = spec.min().ln();
            let hi = spec.max().ln();
            let scale = (hi - lo) / 100.0;
            (lo + scale * position).exp()
        }
    };
    quantize(raw, spec.step())
}

/// Map a real value back to an integer-valued normalized position.
///
/// The input is clamped to `[min, max]` first, so values below the range map
/// to 0 and values above it map to 100. NaN maps to 0.
pub fn to_position(real: f64, spec: &ParameterSpec) -> f64 {
    let clamped = if real.is_nan() {
        spec.min()
    } else {
        real.clamp(spec.min(), spec.max())
    };

    match spec.scale() {
        ScaleKind::Linear => (((clamped - spec.min()) / (spec.max() - spec.min())) * 100.0).round(),
        ScaleKind::Log => {
            let lo = spec.min().ln();
            let hi = spec.max().ln();
            let scale = (hi - lo) / 100.0;
            ((clamped.ln() - lo) / scale).round()
        }
    }
}

/// Round to the nearest multiple of `step`.
fn quantize(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
