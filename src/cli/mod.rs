//! Command-line parsing for the delay risk estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the transform/derivation code.

use clap::{Parser, Subcommand};

use crate::error::AppError;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "radar", version, about = "Project Delay Risk Estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full assessment: derive features, query the predictor, print the result.
    Assess(AssessArgs),
    /// Print the derived feature table without contacting the predictor.
    Derive(AssessArgs),
    /// Print the parameter catalog.
    Params,
}

/// Common options for assessing and deriving.
#[derive(Debug, Parser, Clone)]
pub struct AssessArgs {
    /// Skip the network and answer from the built-in synthetic predictor.
    #[arg(long)]
    pub offline: bool,

    /// Seed the form from the predictor's example project payload.
    #[arg(long)]
    pub template: bool,

    /// Override a parameter's real value (repeatable), e.g. --set number_of_epics=12.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Predictor base URL (defaults to PREDICTOR_URL, then localhost).
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = crate::data::predictor::DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Monte Carlo draw count for the synthetic predictor.
    #[arg(long, default_value_t = 500)]
    pub samples: usize,

    /// Random seed for the synthetic predictor.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write a markdown debug bundle of the full run to debug/.
    #[arg(long)]
    pub debug_bundle: bool,
}

/// Parse repeated `KEY=VALUE` overrides into (id, real value) pairs.
pub fn parse_overrides(pairs: &[String]) -> Result<Vec<(String, f64)>, AppError> {
    let mut out = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(AppError::config(format!(
                "Override '{pair}' must look like KEY=VALUE."
            )));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::config(format!("Override '{pair}' has an empty key.")));
        }
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("Override '{pair}' has a non-numeric value.")))?;
        out.push((key.to_string(), value));
    }
    Ok(out)
}
