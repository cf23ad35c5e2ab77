//! Metrics engine
//!
//! Validation of raw form input and the closed-form health metric formulas.

pub mod calculator;
pub mod units;
pub mod validator;

pub use calculator::{
    adjust_calories_for_goal, calculate_all_metrics, calculate_bmi, calculate_bmr,
    calculate_body_fat, calculate_micronutrients, calculate_tdee, calculate_water_intake,
};
pub use units::{feet_inches_to_cm, pounds_to_kg, CM_PER_FOOT, CM_PER_INCH, KG_PER_LB};
pub use validator::{validate, FieldValue, RawBiometrics, ValidationError, DEFAULT_NAME};
