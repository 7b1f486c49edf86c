//! Derivation of the feature map sent to the external predictor.
//!
//! The predictor's schema is a superset of the form's raw parameters: it
//! also expects ratio features (members per team, story points per epic,
//! per engineer, per story) and the seniority unit conversion. `derive`
//! computes those from the raw values and passes every raw field through
//! unchanged, so the output keys are always the raw keys plus the derived
//! keys.
//!
//! `derive` is deliberately pure IEEE-754: a zero denominator yields
//! `Infinity`/`NaN` rather than an error. Submission paths call
//! `validate_finite` before the payload leaves the process.

use crate::domain::{DerivedFeatureSet, RawParameterSet};
use crate::error::AppError;

pub const TOTAL_PROJECT_MEMBERS: &str = "total_project_members";
pub const TOTAL_PROJECT_STORIES: &str = "total_project_stories";
pub const TOTAL_STORY_POINTS: &str = "total_story_points";
pub const NUMBER_OF_LOW_PRIORITY_STORIES: &str = "number_of_low_priority_stories";
pub const NUMBER_OF_MEDIUM_PRIORITY_STORIES: &str = "number_of_medium_priority_stories";
pub const NUMBER_OF_HIGH_PRIORITY_STORIES: &str = "number_of_high_priority_stories";
pub const NUMBER_OF_STORIES_IN_PROGRESS: &str = "number_of_stories_in_progress";
pub const NUMBER_OF_STORIES_COMPLETED: &str = "number_of_stories_completed";
pub const NUMBER_OF_STORIES_TODO: &str = "number_of_stories_todo";
pub const NUMBER_OF_STORIES_IN_REVIEW: &str = "number_of_stories_in_review";
pub const NUMBER_OF_DIFFERENT_TEAMS: &str = "number_of_different_teams";
pub const NUMBER_OF_TESTING_STORIES: &str = "number_of_testing_stories";
pub const ESTIMATED_PROJECT_DURATION_IN_DAYS: &str = "estimated_project_duration_in_days";
pub const NUMBER_OF_EPICS: &str = "number_of_epics";
pub const AVERAGE_SENIORITY_YEARS: &str = "average_seniority_level_per_engineer_in_years";
pub const AVERAGE_STORY_COMPLETION_HOURS: &str = "average_time_of_story_completion_in_hours";
pub const AVERAGE_IN_PROGRESS_HOURS: &str = "average_time_of_stories_in_progress_in_hours";

pub const AVERAGE_MEMBERS_PER_TEAM: &str = "average_members_per_team";
pub const AVERAGE_STORY_POINTS: &str = "average_story_points";
pub const AVERAGE_STORY_POINTS_PER_EPIC: &str = "average_story_points_per_epic";
pub const AVERAGE_STORY_POINTS_PER_ENGINEER: &str = "average_story_points_per_engineer";
pub const AVERAGE_SENIORITY_DAYS: &str = "average_seniority_level_per_engineer_in_days";

/// Days per year for the seniority unit conversion.
const DAYS_PER_YEAR: f64 = 365.0;

/// Build the predictor feature map from raw parameter values.
///
/// Pure and deterministic; no field is mutated or removed. Missing raw
/// fields read as NaN and flow through the arithmetic unchanged.
pub fn derive(raw: &RawParameterSet) -> DerivedFeatureSet {
    let get = |key: &str| raw.get(key).copied().unwrap_or(f64::NAN);

    let mut out: DerivedFeatureSet = raw.clone();
    out.insert(
        AVERAGE_MEMBERS_PER_TEAM.to_string(),
        get(TOTAL_PROJECT_MEMBERS) / get(NUMBER_OF_DIFFERENT_TEAMS),
    );
    out.insert(
        AVERAGE_STORY_POINTS.to_string(),
        get(TOTAL_STORY_POINTS) / get(TOTAL_PROJECT_STORIES),
    );
    out.insert(
        AVERAGE_STORY_POINTS_PER_EPIC.to_string(),
        get(TOTAL_STORY_POINTS) / get(NUMBER_OF_EPICS),
    );
    out.insert(
        AVERAGE_STORY_POINTS_PER_ENGINEER.to_string(),
        get(TOTAL_STORY_POINTS) / get(TOTAL_PROJECT_MEMBERS),
    );
    out.insert(
        AVERAGE_SENIORITY_DAYS.to_string(),
        get(AVERAGE_SENIORITY_YEARS) * DAYS_PER_YEAR,
    );
    out
}

/// Reject feature maps containing non-finite values.
///
/// This is the submission-time guard for degenerate configurations (zero
/// teams, zero epics, missing fields): `derive` propagates them as
/// `Infinity`/`NaN`, and this check stops them from reaching the wire.
pub fn validate_finite(features: &DerivedFeatureSet) -> Result<(), AppError> {
    let bad: Vec<&str> = features
        .iter()
        .filter(|(_, v)| !v.is_finite())
        .map(|(k, _)| k.as_str())
        .collect();

    if bad.is_empty() {
        Ok(())
    } else {
        Err(AppError::data(format!(
            "Non-finite derived features ({}); check denominators such as team/epic/story counts.",
            bad.join(", ")
        )))
    }
}
