//! Derived health metrics
//!
//! Output of the metrics engine. Immutable once computed.

use serde::{Deserialize, Serialize};

/// BMI category with fixed thresholds at 18.5, 25 and 30
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Estimated daily micronutrient needs in mg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Micronutrients {
    pub zinc: u32,
    pub iron: u32,
    pub magnesium: u32,
    pub calcium: u32,
}

/// Metrics derived from a validated `BiometricInput`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResult {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    /// Not clamped; pathological inputs can make it negative
    pub bmr: f64,
    pub tdee: f64,
    /// Goal-adjusted target, never below 1200
    pub calories: u32,
    /// Percent, clamped to [3, 60]
    pub body_fat: f64,
    /// Liters per day, one decimal place
    pub water: f64,
    pub micronutrients: Micronutrients,
}

impl MetricsResult {
    pub fn bmi_display(&self) -> String {
        format!("{:.1}", self.bmi)
    }

    pub fn body_fat_display(&self) -> String {
        format!("{:.1}%", self.body_fat)
    }

    pub fn water_display(&self) -> String {
        format!("{:.1}", self.water)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(0.0), BmiCategory::Underweight);
    }

    #[test]
    fn test_display_formatting() {
        let metrics = MetricsResult {
            bmi: 23.148,
            bmi_category: BmiCategory::Normal,
            bmr: 1692.5,
            tdee: 2623.375,
            calories: 2623,
            body_fat: 18.4778,
            water: 2.6,
            micronutrients: Micronutrients { zinc: 11, iron: 8, magnesium: 420, calcium: 1000 },
        };
        assert_eq!(metrics.bmi_display(), "23.1");
        assert_eq!(metrics.body_fat_display(), "18.5%");
        assert_eq!(metrics.water_display(), "2.6");

        let value = serde_json::to_value(&metrics).unwrap();
        assert_eq!(value["bmiCategory"], "Normal");
        assert_eq!(value["bodyFat"], 18.4778);
        assert_eq!(value["micronutrients"]["magnesium"], 420);
    }
}
