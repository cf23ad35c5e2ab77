//! Biometric input validation
//!
//! Turns raw form fields (metric or imperial) into a canonical `BiometricInput`.
//! Checks run in a fixed order and the first failure is returned.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::units::{
    feet_inches_to_cm, pounds_to_kg, AGE_YEARS, HEIGHT_CM, HEIGHT_FT, HEIGHT_IN, WEIGHT_KG,
    WEIGHT_LBS,
};
use crate::models::{ActivityLevel, BiometricInput, Gender, Goal, UnitSystem};

/// Name used when the user leaves the name field blank
pub const DEFAULT_NAME: &str = "User";

/// A user-correctable input problem
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Offending input field
    pub field: &'static str,
    /// Human-readable constraint
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// A raw form value: either a JSON number or the text typed into an input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Parse as a finite real number, reading text up to the first non-numeric
    /// character ("180cm" is 180)
    pub fn as_float(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => parse_leading_float(s)?,
        };
        value.is_finite().then_some(value)
    }

    /// Parse as a whole number, dropping any fractional part ("30.7" is 30)
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => parse_leading_int(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let digits_start = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..digits_start + digits_len].parse().ok()
}

fn parse_leading_float(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(trimmed.starts_with(['-', '+']));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'-' | b'+')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    trimmed[..end].parse().ok()
}

/// Raw dashboard form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBiometrics {
    #[serde(default)]
    pub unit: UnitSystem,
    pub name: Option<String>,
    pub age: Option<FieldValue>,
    pub height_cm: Option<FieldValue>,
    pub weight_kg: Option<FieldValue>,
    pub height_ft: Option<FieldValue>,
    pub height_in: Option<FieldValue>,
    pub weight_lbs: Option<FieldValue>,
    pub gender: Option<String>,
    pub activity_level: Option<FieldValue>,
    pub goal: Option<String>,
}

fn float_in(value: &Option<FieldValue>, range: &std::ops::RangeInclusive<f64>) -> Option<f64> {
    value
        .as_ref()
        .and_then(FieldValue::as_float)
        .filter(|v| range.contains(v))
}

/// Validate a raw submission and normalize it to metric units
pub fn validate(raw: &RawBiometrics) -> Result<BiometricInput, ValidationError> {
    let result = validate_fields(raw);
    if let Err(ref e) = result {
        tracing::debug!(field = e.field, "Biometric validation failed: {}", e.message);
    }
    result
}

fn validate_fields(raw: &RawBiometrics) -> Result<BiometricInput, ValidationError> {
    let age_years = raw
        .age
        .as_ref()
        .and_then(FieldValue::as_int)
        .filter(|age| AGE_YEARS.contains(age))
        .ok_or(ValidationError::new("age", "Please enter a valid age (10-120)."))?;

    let (height_cm, weight_kg) = match raw.unit {
        UnitSystem::Metric => {
            let height = float_in(&raw.height_cm, &HEIGHT_CM).ok_or(ValidationError::new(
                "height_cm",
                "Please enter a valid height (100-250 cm).",
            ))?;
            let weight = float_in(&raw.weight_kg, &WEIGHT_KG).ok_or(ValidationError::new(
                "weight_kg",
                "Please enter a valid weight (30-300 kg).",
            ))?;
            (height, weight)
        }
        UnitSystem::Imperial => {
            let height_error =
                ValidationError::new("height_ft", "Please enter a valid height (3-8 ft, 0-11 in).");
            let feet = float_in(&raw.height_ft, &HEIGHT_FT).ok_or(height_error.clone())?;
            let inches = match raw.height_in {
                None => 0.0,
                Some(_) => float_in(&raw.height_in, &HEIGHT_IN).ok_or(height_error)?,
            };
            let pounds = float_in(&raw.weight_lbs, &WEIGHT_LBS).ok_or(ValidationError::new(
                "weight_lbs",
                "Please enter a valid weight (66-660 lbs).",
            ))?;
            (feet_inches_to_cm(feet, inches), pounds_to_kg(pounds))
        }
    };

    let gender = raw
        .gender
        .as_deref()
        .and_then(Gender::from_str)
        .ok_or(ValidationError::new("gender", "Please select a gender (male or female)."))?;

    let activity_level = raw
        .activity_level
        .as_ref()
        .and_then(|v| match v {
            FieldValue::Number(f) => ActivityLevel::from_factor(*f),
            FieldValue::Text(s) => ActivityLevel::from_str(s),
        })
        .ok_or(ValidationError::new(
            "activity_level",
            "Please select an activity level (1.2, 1.375, 1.55, 1.725 or 1.9).",
        ))?;

    let goal = raw
        .goal
        .as_deref()
        .and_then(Goal::from_str)
        .ok_or(ValidationError::new("goal", "Please select a goal (lose, maintain or gain)."))?;

    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_NAME)
        .to_string();

    Ok(BiometricInput {
        name,
        height_cm,
        weight_kg,
        age_years: age_years as u32,
        gender,
        activity_level,
        goal,
        unit: raw.unit,
    })
}
