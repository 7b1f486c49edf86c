//! HTTP client for the external delay predictor.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::domain::{DerivedFeatureSet, RawParameterSet};
use crate::error::AppError;

/// Used when `PREDICTOR_URL` is not configured.
const DEFAULT_BASE_URL: &str = "http://localhost:5001/";

/// Default request timeout; every call is bounded so a dead predictor cannot
/// hang a submission.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct PredictorClient {
    client: Client,
    base_url: String,
}

impl PredictorClient {
    /// Build a client from the environment (`.env` honored via dotenvy).
    ///
    /// `base_url` overrides `PREDICTOR_URL`; both fall back to the local
    /// development default.
    pub fn from_env(base_url: Option<&str>, timeout_secs: u64) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = match base_url {
            Some(url) => url.to_string(),
            None => std::env::var("PREDICTOR_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = normalize_base_url(&base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .map_err(|e| AppError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the derived feature map and return the raw (unadapted) response.
    ///
    /// The response is parsed only as far as `serde_json::Value`; shape
    /// normalization is `data::response`'s job.
    pub fn predict(&self, features: &DerivedFeatureSet) -> Result<Value, AppError> {
        let url = format!("{}api/endpoint", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(features)
            .send()
            .map_err(|e| AppError::transport(format!("Predictor request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::transport(format!(
                "Predictor request failed with status {}.",
                resp.status()
            )));
        }

        resp.json()
            .map_err(|e| AppError::transport(format!("Failed to parse predictor response: {e}")))
    }

    /// GET the example project payload the form can be seeded from.
    ///
    /// Non-numeric fields (e.g. `project_name`) are dropped; the form
    /// ignores ids it does not know.
    pub fn fetch_template(&self) -> Result<RawParameterSet, AppError> {
        let url = format!("{}api/jira", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::transport(format!("Template request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::transport(format!(
                "Template request failed with status {}.",
                resp.status()
            )));
        }

        let body: Value = resp
            .json()
            .map_err(|e| AppError::transport(format!("Failed to parse template response: {e}")))?;

        template_from_value(&body)
    }
}

/// Extract the numeric fields of a template payload.
fn template_from_value(body: &Value) -> Result<RawParameterSet, AppError> {
    let Some(object) = body.as_object() else {
        return Err(AppError::data("Template payload is not a JSON object."));
    };

    let mut raw = RawParameterSet::new();
    for (key, value) in object {
        if let Some(number) = value.as_f64() {
            raw.insert(key.clone(), number);
        }
    }

    if raw.is_empty() {
        return Err(AppError::data("Template payload contains no numeric fields."));
    }
    Ok(raw)
}

/// Ensure the base URL ends with a single `/` so path joins stay simple.
fn normalize_base_url(url: &str) -> Result<String, AppError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(AppError::config("Predictor base URL is empty."));
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}
