//! Data models
//!
//! Biometric inputs, derived metrics, and the live profile snapshot.

mod biometrics;
mod metrics;
mod profile;

pub use biometrics::{ActivityLevel, BiometricInput, Gender, Goal, UnitSystem};
pub use metrics::{BmiCategory, Micronutrients, MetricsResult};
pub use profile::{ProfileStore, UserProfile};
