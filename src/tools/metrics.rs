//! Metrics tools
//!
//! Validate a dashboard submission, compute its metrics and publish the result as
//! the live profile.

use std::sync::Arc;

use serde::Serialize;

use crate::metrics::{calculate_all_metrics, validate, RawBiometrics, ValidationError};
use crate::models::{ProfileStore, UserProfile};

/// Formatted values as the dashboard cards display them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsDisplay {
    pub bmi: String,
    pub bmi_category: &'static str,
    pub calories: String,
    pub goal: String,
    pub body_fat: String,
    pub water: String,
    pub zinc: String,
    pub iron: String,
    pub magnesium: String,
    pub calcium: String,
}

impl MetricsDisplay {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let metrics = &profile.metrics;
        let nutrients = &metrics.micronutrients;
        Self {
            bmi: metrics.bmi_display(),
            bmi_category: metrics.bmi_category.display_name(),
            calories: metrics.calories.to_string(),
            goal: format!("Goal: {}", profile.input.goal.display_name()),
            body_fat: metrics.body_fat_display(),
            water: format!("{} L", metrics.water_display()),
            zinc: format!("{} mg", nutrients.zinc),
            iron: format!("{} mg", nutrients.iron),
            magnesium: format!("{} mg", nutrients.magnesium),
            calcium: format!("{} mg", nutrients.calcium),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculateMetricsResponse {
    pub profile: Arc<UserProfile>,
    pub display: MetricsDisplay,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentProfileResponse {
    pub loaded: bool,
    pub profile: Option<Arc<UserProfile>>,
    pub display: Option<MetricsDisplay>,
}

/// Validate, compute and publish a submission
///
/// On a validation failure the previously published profile stays live.
pub fn calculate_health_metrics(
    store: &ProfileStore,
    raw: &RawBiometrics,
) -> Result<CalculateMetricsResponse, ValidationError> {
    let input = validate(raw)?;
    let metrics = calculate_all_metrics(&input);
    let profile = store.publish(UserProfile::new(input, metrics));

    tracing::info!(
        name = %profile.input.name,
        bmi = profile.metrics.bmi,
        calories = profile.metrics.calories,
        "Published new profile"
    );

    Ok(CalculateMetricsResponse {
        display: MetricsDisplay::from_profile(&profile),
        profile,
    })
}

/// The live profile, if one has been published
pub fn get_current_profile(store: &ProfileStore) -> CurrentProfileResponse {
    match store.current() {
        Some(profile) => CurrentProfileResponse {
            loaded: true,
            display: Some(MetricsDisplay::from_profile(&profile)),
            profile: Some(profile),
        },
        None => CurrentProfileResponse {
            loaded: false,
            profile: None,
            display: None,
        },
    }
}
