//! The static control catalog: one entry per raw predictor feature.
//!
//! Ranges and steps are tuned for usable sliders rather than hard limits;
//! wide-spanning counts and durations use the log scale so the low end gets
//! real resolution. `min`/`max` sit on the step grid (a `ParameterSpec`
//! construction requirement).

use crate::domain::{ParameterSpec, ScaleKind};
use crate::error::AppError;
use crate::features;

/// Build the standard 17-parameter catalog.
pub fn catalog() -> Result<Vec<ParameterSpec>, AppError> {
    use ScaleKind::{Linear, Log};

    let entries: [(&str, f64, f64, f64, ScaleKind, &str); 17] = [
        (features::TOTAL_PROJECT_MEMBERS, 1.0, 200.0, 1.0, Linear, "people"),
        (features::NUMBER_OF_DIFFERENT_TEAMS, 1.0, 50.0, 1.0, Linear, "teams"),
        (features::TOTAL_PROJECT_STORIES, 10.0, 5_000.0, 10.0, Log, "stories"),
        (features::TOTAL_STORY_POINTS, 50.0, 50_000.0, 50.0, Log, "points"),
        (features::NUMBER_OF_EPICS, 1.0, 100.0, 1.0, Linear, "epics"),
        (features::NUMBER_OF_LOW_PRIORITY_STORIES, 0.0, 1_000.0, 5.0, Linear, "stories"),
        (features::NUMBER_OF_MEDIUM_PRIORITY_STORIES, 0.0, 1_000.0, 5.0, Linear, "stories"),
        (features::NUMBER_OF_HIGH_PRIORITY_STORIES, 0.0, 1_000.0, 5.0, Linear, "stories"),
        (features::NUMBER_OF_STORIES_IN_PROGRESS, 0.0, 500.0, 5.0, Linear, "stories"),
        (features::NUMBER_OF_STORIES_COMPLETED, 0.0, 1_000.0, 5.0, Linear, "stories"),
        (features::NUMBER_OF_STORIES_TODO, 0.0, 1_000.0, 5.0, Linear, "stories"),
        (features::NUMBER_OF_STORIES_IN_REVIEW, 0.0, 500.0, 5.0, Linear, "stories"),
        (features::NUMBER_OF_TESTING_STORIES, 0.0, 500.0, 5.0, Linear, "stories"),
        (features::ESTIMATED_PROJECT_DURATION_IN_DAYS, 5.0, 1_825.0, 5.0, Log, "days"),
        (features::AVERAGE_SENIORITY_YEARS, 0.5, 30.0, 0.5, Log, "years"),
        (features::AVERAGE_STORY_COMPLETION_HOURS, 1.0, 500.0, 1.0, Linear, "hours"),
        (features::AVERAGE_IN_PROGRESS_HOURS, 1.0, 500.0, 1.0, Linear, "hours"),
    ];

    entries
        .into_iter()
        .map(|(id, min, max, step, scale, unit)| ParameterSpec::new(id, min, max, step, scale, unit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::to_real;

    #[test]
    fn catalog_constructs_cleanly() {
        let specs = catalog().unwrap();
        assert_eq!(specs.len(), 17);
    }

    #[test]
    fn catalog_ids_are_unique() {
        let specs = catalog().unwrap();
        for (i, a) in specs.iter().enumerate() {
            for b in &specs[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
    }

    #[test]
    fn log_entries_have_positive_minimums() {
        for spec in catalog().unwrap() {
            if spec.scale() == crate::domain::ScaleKind::Log {
                assert!(spec.min() > 0.0, "log spec '{}' has min <= 0", spec.id());
            }
        }
    }

    #[test]
    fn every_entry_quantizes_within_its_range() {
        for spec in catalog().unwrap() {
            for p in [0.0, 25.0, 50.0, 75.0, 100.0] {
                let real = to_real(p, &spec);
                assert!(
                    real >= spec.min() - 1e-9 && real <= spec.max() + 1e-9,
                    "'{}' at position {p} gave {real}",
                    spec.id()
                );
            }
        }
    }
}
