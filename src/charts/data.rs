//! Chart datasets
//!
//! Values the dashboard plots: BMI gauge, body-fat bar, macronutrient split of the
//! goal calories, and the BMR / TDEE / goal calorie levels.

use serde::Serialize;

use crate::models::{BmiCategory, MetricsResult};

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

pub const COLOR_UNDERWEIGHT: (u8, u8, u8) = (52, 152, 219); // Blue
pub const COLOR_NORMAL: (u8, u8, u8) = (46, 204, 113); // Green
pub const COLOR_OVERWEIGHT: (u8, u8, u8) = (243, 156, 18); // Orange
pub const COLOR_OBESE: (u8, u8, u8) = (231, 76, 60); // Red
pub const COLOR_BODY_FAT: (u8, u8, u8) = (93, 173, 226);
pub const COLOR_PROTEIN: (u8, u8, u8) = (52, 152, 219);
pub const COLOR_CARBS: (u8, u8, u8) = (46, 204, 113);
pub const COLOR_FAT: (u8, u8, u8) = (241, 196, 15);
pub const COLOR_CALORIE_LINE: (u8, u8, u8) = (231, 76, 60);

/// Upper end of the BMI gauge
pub const BMI_GAUGE_MAX: f64 = 40.0;
/// Upper end of the body-fat axis
pub const BODY_FAT_AXIS_MAX: f64 = 45.0;

const PROTEIN_SHARE: f64 = 0.30;
const CARBS_SHARE: f64 = 0.40;
const FAT_SHARE: f64 = 0.30;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Gauge color for a BMI category
pub fn bmi_color(category: BmiCategory) -> (u8, u8, u8) {
    match category {
        BmiCategory::Underweight => COLOR_UNDERWEIGHT,
        BmiCategory::Normal => COLOR_NORMAL,
        BmiCategory::Overweight => COLOR_OVERWEIGHT,
        BmiCategory::Obese => COLOR_OBESE,
    }
}

/// Half-circle gauge: the BMI and the remainder up to `BMI_GAUGE_MAX`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiGauge {
    pub value: f64,
    pub remainder: f64,
    pub category: BmiCategory,
    pub color: (u8, u8, u8),
}

impl BmiGauge {
    pub fn new(bmi: f64) -> Self {
        let category = BmiCategory::from_bmi(bmi);
        Self {
            value: bmi,
            remainder: (BMI_GAUGE_MAX - bmi).max(0.0),
            category,
            color: bmi_color(category),
        }
    }
}

/// Calorie and gram split of the goal calories (30% protein, 40% carbs, 30% fat)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroSplit {
    pub protein_kcal: f64,
    pub carbs_kcal: f64,
    pub fat_kcal: f64,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl MacroSplit {
    pub fn from_calories(calories: u32) -> Self {
        let calories = f64::from(calories);
        let protein_kcal = calories * PROTEIN_SHARE;
        let carbs_kcal = calories * CARBS_SHARE;
        let fat_kcal = calories * FAT_SHARE;
        Self {
            protein_kcal,
            carbs_kcal,
            fat_kcal,
            protein_g: (protein_kcal / KCAL_PER_G_PROTEIN).round() as u32,
            carbs_g: (carbs_kcal / KCAL_PER_G_CARBS).round() as u32,
            fat_g: (fat_kcal / KCAL_PER_G_FAT).round() as u32,
        }
    }

    /// Percentage of total calories for a macro's kcal, rounded
    pub fn percent_of_total(&self, kcal: f64) -> u32 {
        let total = self.protein_kcal + self.carbs_kcal + self.fat_kcal;
        if total <= 0.0 {
            return 0;
        }
        (kcal / total * 100.0).round() as u32
    }
}

/// BMR, maintenance (TDEE) and goal calories, in the order they are plotted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieLevels {
    pub bmr: i64,
    pub tdee: i64,
    pub goal: u32,
}

impl CalorieLevels {
    pub fn labels() -> [&'static str; 3] {
        ["BMR", "Maintenance (TDEE)", "Your Goal"]
    }

    pub fn values(&self) -> [f64; 3] {
        [self.bmr as f64, self.tdee as f64, f64::from(self.goal)]
    }
}

/// Everything needed to draw the dashboard charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub bmi_gauge: BmiGauge,
    /// Body-fat percent rounded to one decimal
    pub body_fat: f64,
    pub macros: MacroSplit,
    pub calorie_levels: CalorieLevels,
}

impl ChartData {
    pub fn from_metrics(metrics: &MetricsResult) -> Self {
        Self {
            bmi_gauge: BmiGauge::new(metrics.bmi),
            body_fat: (metrics.body_fat * 10.0).round() / 10.0,
            macros: MacroSplit::from_calories(metrics.calories),
            calorie_levels: CalorieLevels {
                bmr: metrics.bmr.round() as i64,
                tdee: metrics.tdee.round() as i64,
                goal: metrics.calories,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Micronutrients;

    #[test]
    fn test_bmi_gauge_remainder() {
        let gauge = BmiGauge::new(23.0);
        assert_eq!(gauge.remainder, 17.0);
        assert_eq!(gauge.color, COLOR_NORMAL);

        let gauge = BmiGauge::new(45.0);
        assert_eq!(gauge.remainder, 0.0);
        assert_eq!(gauge.category, BmiCategory::Obese);
        assert_eq!(gauge.color, COLOR_OBESE);
    }

    #[test]
    fn test_macro_split() {
        let split = MacroSplit::from_calories(2000);
        assert_eq!(split.protein_kcal, 600.0);
        assert_eq!(split.carbs_kcal, 800.0);
        assert_eq!(split.fat_kcal, 600.0);
        assert_eq!(split.protein_g, 150);
        assert_eq!(split.carbs_g, 200);
        assert_eq!(split.fat_g, 67);
        assert_eq!(split.percent_of_total(split.carbs_kcal), 40);
    }

    #[test]
    fn test_chart_data_from_metrics() {
        let metrics = MetricsResult {
            bmi: 27.3,
            bmi_category: BmiCategory::Overweight,
            bmr: 1650.4,
            tdee: 2557.9,
            calories: 2058,
            body_fat: 24.46,
            water: 2.9,
            micronutrients: Micronutrients { zinc: 11, iron: 8, magnesium: 420, calcium: 1000 },
        };
        let data = ChartData::from_metrics(&metrics);
        assert_eq!(data.bmi_gauge.color, COLOR_OVERWEIGHT);
        assert_eq!(data.body_fat, 24.5);
        assert_eq!(data.calorie_levels, CalorieLevels { bmr: 1650, tdee: 2558, goal: 2058 });
        assert_eq!(data.calorie_levels.values(), [1650.0, 2558.0, 2058.0]);
    }
}
