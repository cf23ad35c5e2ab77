//! Biometric input model
//!
//! Canonical, validated inputs to the metrics engine. Heights are always centimeters
//! and weights always kilograms, whatever unit system the user entered them in.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Biological sex used by the BMR and body-fat formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "lose" | "lose_weight" | "cut" => Some(Goal::Lose),
            "maintain" | "maintain_weight" | "maintenance" => Some(Goal::Maintain),
            "gain" | "gain_weight" | "bulk" => Some(Goal::Gain),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Goal::Lose => "Lose Weight",
            Goal::Maintain => "Maintain Weight",
            Goal::Gain => "Gain Weight",
        }
    }

    /// Daily kcal added to TDEE for this goal
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            Goal::Lose => -500.0,
            Goal::Maintain => 0.0,
            Goal::Gain => 300.0,
        }
    }
}

/// Self-reported activity level, encoded as a TDEE multiplier
///
/// Serialized as the bare factor (e.g. `1.55`), which is what the dashboard form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    VeryActive,
    Extreme,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::VeryActive,
        ActivityLevel::Extreme,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::Extreme => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::Extreme => "extreme",
        }
    }

    /// Match one of the five discrete factors
    pub fn from_factor(factor: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| (level.factor() - factor).abs() < 1e-9)
    }

    /// Parse a level name or a numeric factor
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" | "lightly_active" => Some(ActivityLevel::Light),
            "moderate" | "moderately_active" => Some(ActivityLevel::Moderate),
            "very_active" | "active" => Some(ActivityLevel::VeryActive),
            "extreme" | "extra_active" => Some(ActivityLevel::Extreme),
            other => other.parse::<f64>().ok().and_then(Self::from_factor),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Light => "Light Activity (exercise 1-3 days/week)",
            ActivityLevel::Moderate => "Moderate Activity (exercise 3-5 days/week)",
            ActivityLevel::VeryActive => "Very Active (exercise 6-7 days/week)",
            ActivityLevel::Extreme => "Extreme Activity (very hard exercise/physical job)",
        }
    }
}

impl Serialize for ActivityLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.factor())
    }
}

impl<'de> Deserialize<'de> for ActivityLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Factor(f64),
            Name(String),
        }

        let level = match Repr::deserialize(deserializer)? {
            Repr::Factor(f) => ActivityLevel::from_factor(f),
            Repr::Name(s) => ActivityLevel::from_str(&s),
        };
        level.ok_or_else(|| serde::de::Error::custom("unknown activity level"))
    }
}

/// Unit system the user entered height and weight in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

/// Validated biometric input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricInput {
    pub name: String,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(rename = "age")]
    pub age_years: u32,
    pub gender: Gender,
    #[serde(rename = "activityLevel")]
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    /// Unit system originally selected, kept for context only
    #[serde(default)]
    pub unit: UnitSystem,
}
