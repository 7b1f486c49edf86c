//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the transform/derivation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::data::AdaptedResult;
use crate::domain::{DerivedFeatureSet, ParameterSpec};
use crate::risk::RiskBand;

/// Format the assessment summary (probability, band, uncertainty, caveats).
pub fn format_assessment(
    adapted: &AdaptedResult,
    band: &RiskBand,
    transport_error: Option<&str>,
) -> String {
    let result = &adapted.result;
    let mut out = String::new();

    out.push_str("=== radar - Project Delay Risk Assessment ===\n");
    out.push_str(&format!(
        "Delay probability: {} (+/- {})\n",
        fmt_pct(result.mean_probability),
        fmt_pct(result.standard_deviation),
    ));
    out.push_str(&format!(
        "Risk category: {} (color={}, gradient={})\n",
        result.risk_category.display_name(),
        band.color,
        band.gradient,
    ));
    out.push_str(&format!(
        "90% credible interval: {} - {}\n",
        fmt_pct(result.ci_5),
        fmt_pct(result.ci_95),
    ));

    if let Some(error) = transport_error {
        out.push_str(&format!("\nPredictor unreachable: {error}\n"));
    }
    if adapted.is_estimated() {
        out.push_str(&format!(
            "Using estimated data for: {}\n",
            adapted.defaulted_fields.join(", ")
        ));
    }

    out
}

/// Format the derived feature table.
pub fn format_features(features: &DerivedFeatureSet) -> String {
    let mut out = String::new();

    out.push_str(format!("{:<48} {:>14}\n", "feature", "value").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<48} {:-<14}\n", "", "").trim_end());
    out.push('\n');

    for (key, value) in features {
        out.push_str(format!("{:<48} {:>14}\n", truncate(key, 48), fmt_value(*value)).trim_end());
        out.push('\n');
    }

    out
}

/// Format the parameter catalog table.
pub fn format_params(specs: &[ParameterSpec]) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<48} {:>12} {:>12} {:>8} {:<7} {:<8}\n",
            "id", "min", "max", "step", "scale", "unit"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<48} {:-<12} {:-<12} {:-<8} {:-<7} {:-<8}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for spec in specs {
        out.push_str(
            format!(
                "{:<48} {:>12} {:>12} {:>8} {:<7} {:<8}\n",
                truncate(spec.id(), 48),
                fmt_value(spec.min()),
                fmt_value(spec.max()),
                fmt_value(spec.step()),
                spec.scale().display_name(),
                truncate(spec.unit(), 8),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_pct(v: f64) -> String {
    format!("{:.1}%", v * 100.0)
}

/// Compact numeric formatting: integers without a fraction, everything else
/// with three decimals, non-finite values spelled out.
fn fmt_value(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if (v - v.round()).abs() < 1e-9 && v.abs() < 1e12 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.3}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{adapt, response};
    use crate::risk;
    use serde_json::json;

    #[test]
    fn assessment_summary_contains_the_headline_numbers() {
        let adapted = adapt(&json!({
            "mean_prob": 0.72,
            "std": 0.15,
            "ci_5": 0.53,
            "ci_95": 0.87,
        }));
        let band = risk::band(adapted.result.risk_category);
        let text = format_assessment(&adapted, band, None);

        assert!(text.contains("72.0%"));
        assert!(text.contains("High"));
        assert!(text.contains("53.0% - 87.0%"));
        assert!(!text.contains("estimated data"));
    }

    #[test]
    fn degraded_assessment_is_labeled() {
        let adapted = response::adapt(&json!({}));
        let band = risk::band(adapted.result.risk_category);
        let text = format_assessment(&adapted, band, Some("connection refused"));

        assert!(text.contains("Predictor unreachable: connection refused"));
        assert!(text.contains("Using estimated data for: mean_probability"));
    }

    #[test]
    fn feature_table_lists_every_entry() {
        let mut features = DerivedFeatureSet::new();
        features.insert("number_of_epics".to_string(), 10.0);
        features.insert("average_story_points_per_epic".to_string(), 50.5);
        let text = format_features(&features);

        assert!(text.contains("number_of_epics"));
        assert!(text.contains("10"));
        assert!(text.contains("50.500"));
    }

    #[test]
    fn params_table_shows_scale_and_unit() {
        let specs = crate::params::catalog().unwrap();
        let text = format_params(&specs);
        assert!(text.contains("total_story_points"));
        assert!(text.contains("log"));
        assert!(text.contains("years"));
    }

    #[test]
    fn value_formatting_handles_non_finite() {
        assert_eq!(fmt_value(f64::INFINITY), "inf");
        assert_eq!(fmt_value(50.0), "50");
        assert_eq!(fmt_value(4.25), "4.250");
    }
}
