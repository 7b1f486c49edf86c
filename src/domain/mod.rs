//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - control configuration (`ParameterSpec`, `ScaleKind`)
//! - the raw/derived feature maps exchanged with the predictor
//! - canonical prediction outputs (`PredictionResult`, `RiskCategory`)

pub mod types;

pub use types::*;
