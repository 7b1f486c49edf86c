//! Predictor boundary: HTTP client, response adaptation, offline synthesis.

pub mod predictor;
pub mod response;
pub mod sample;

pub use predictor::PredictorClient;
pub use response::{AdaptedResult, adapt, default_result};
pub use sample::synthetic_response;
