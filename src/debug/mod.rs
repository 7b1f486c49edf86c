//! Debug bundle writer for inspecting a full assessment run.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::app::pipeline::{AssessConfig, RunOutcome};
use crate::error::AppError;

/// Write a markdown bundle of everything the run saw and produced.
///
/// The bundle is the project's answer to "what exactly went to the
/// predictor, and what came back": positions, raw values, derived features,
/// defaulted fields, and the final classification.
pub fn write_debug_bundle(outcome: &RunOutcome, config: &AssessConfig) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir).map_err(|e| AppError::data(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("radar_debug_seed{}_{ts}.md", config.seed));

    let mut file =
        File::create(&path).map_err(|e| AppError::data(format!("Failed to create debug file: {e}")))?;

    write_bundle(&mut file, outcome, config)
        .map_err(|e| AppError::data(format!("Failed to write debug bundle: {e}")))?;

    Ok(path)
}

fn write_bundle(
    file: &mut File,
    outcome: &RunOutcome,
    config: &AssessConfig,
) -> std::io::Result<()> {
    writeln!(file, "# radar debug bundle")?;
    writeln!(file, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(file, "- offline: {}", config.offline)?;
    writeln!(file, "- template: {}", config.use_template)?;
    writeln!(file, "- samples: {}", config.samples)?;
    writeln!(file, "- seed: {}", config.seed)?;
    writeln!(file, "- timeout_secs: {}", config.timeout_secs)?;

    writeln!(file, "\n## Form")?;
    writeln!(file, "| id | position | real | unit |")?;
    writeln!(file, "| - | - | - | - |")?;
    for spec in outcome.form.specs() {
        let position = outcome.form.position(spec.id()).unwrap_or(f64::NAN);
        let real = outcome.raw.get(spec.id()).copied().unwrap_or(f64::NAN);
        writeln!(
            file,
            "| {} | {position:.0} | {real} | {} |",
            spec.id(),
            spec.unit()
        )?;
    }

    writeln!(file, "\n## Derived features")?;
    writeln!(file, "| feature | value |")?;
    writeln!(file, "| - | - |")?;
    for (key, value) in &outcome.features {
        writeln!(file, "| {key} | {value} |")?;
    }

    writeln!(file, "\n## Result")?;
    let result = &outcome.adapted.result;
    writeln!(file, "- mean_probability: {}", result.mean_probability)?;
    writeln!(file, "- standard_deviation: {}", result.standard_deviation)?;
    writeln!(file, "- ci_5: {}", result.ci_5)?;
    writeln!(file, "- ci_95: {}", result.ci_95)?;
    writeln!(file, "- risk_category: {}", result.risk_category.display_name())?;
    writeln!(file, "- band_color: {}", outcome.band.color)?;

    if let Some(error) = &outcome.transport_error {
        writeln!(file, "- transport_error: {error}")?;
    }
    if outcome.adapted.is_estimated() {
        writeln!(
            file,
            "- defaulted_fields: {}",
            outcome.adapted.defaulted_fields.join(", ")
        )?;
    }

    Ok(())
}
