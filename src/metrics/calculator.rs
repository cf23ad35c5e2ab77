//! Health metrics calculations
//!
//! Pure functions over validated inputs: no I/O, no shared state. Apart from the
//! BMR → TDEE → calories chain and body fat depending on BMI, every derivation is
//! independent.

use crate::models::{
    BiometricInput, BmiCategory, Gender, Goal, Micronutrients, MetricsResult,
};

/// Hard floor for the goal-adjusted calorie target
pub const MIN_DAILY_CALORIES: f64 = 1200.0;
/// Lower bound of the body-fat estimate (percent)
pub const MIN_BODY_FAT: f64 = 3.0;
/// Upper bound of the body-fat estimate (percent)
pub const MAX_BODY_FAT: f64 = 60.0;
/// Recommended water per kilogram of body weight
pub const WATER_ML_PER_KG: f64 = 35.0;

/// Body Mass Index: weight (kg) / height (m)²
///
/// Returns 0 for a non-positive height.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Basal Metabolic Rate (Mifflin-St Jeor)
///
/// `10 × kg + 6.25 × cm − 5 × age + s`, with `s = +5` for men and `−161` for women.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let sex_offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years) + sex_offset
}

/// Total Daily Energy Expenditure
pub fn calculate_tdee(bmr: f64, activity_factor: f64) -> f64 {
    bmr * activity_factor
}

/// Goal-adjusted daily calorie target, rounded and floored at 1200 kcal
pub fn adjust_calories_for_goal(tdee: f64, goal: Goal) -> u32 {
    let target = (tdee + goal.calorie_adjustment()).round();
    target.max(MIN_DAILY_CALORIES) as u32
}

/// BMI-based body fat estimate, clamped to [3, 60] percent
///
/// `1.20 × BMI + 0.23 × age − 10.8 × sex − 5.4`, where `sex` is 1 for men and 0 for women.
pub fn calculate_body_fat(bmi: f64, age_years: u32, gender: Gender) -> f64 {
    let sex_factor = match gender {
        Gender::Male => 1.0,
        Gender::Female => 0.0,
    };
    let estimate = 1.20 * bmi + 0.23 * f64::from(age_years) - 10.8 * sex_factor - 5.4;
    estimate.clamp(MIN_BODY_FAT, MAX_BODY_FAT)
}

/// Daily water intake in liters, rounded to one decimal place
pub fn calculate_water_intake(weight_kg: f64) -> f64 {
    let ml = weight_kg * WATER_ML_PER_KG;
    (ml / 100.0).round() / 10.0
}

/// Simplified daily RDAs (mg) for zinc, iron, magnesium and calcium
pub fn calculate_micronutrients(gender: Gender, age_years: u32) -> Micronutrients {
    let young_adult = (19..=30).contains(&age_years);
    let adult = (19..=50).contains(&age_years);

    let (zinc, iron, magnesium) = match gender {
        Gender::Male => (11, 8, if young_adult { 400 } else { 420 }),
        Gender::Female => (
            8,
            if adult { 18 } else { 8 },
            if young_adult { 310 } else { 320 },
        ),
    };

    let calcium = match age_years {
        19..=50 => 1000,
        51..=70 => match gender {
            Gender::Male => 1000,
            Gender::Female => 1200,
        },
        71.. => 1200,
        // Under 19 uses the adolescent figure without further tiers
        _ => 1300,
    };

    Micronutrients {
        zinc,
        iron,
        magnesium,
        calcium,
    }
}

/// Run the full derivation for one validated input
pub fn calculate_all_metrics(input: &BiometricInput) -> MetricsResult {
    let bmi = calculate_bmi(input.height_cm, input.weight_kg);
    let bmr = calculate_bmr(input.weight_kg, input.height_cm, input.age_years, input.gender);
    let tdee = calculate_tdee(bmr, input.activity_level.factor());
    let calories = adjust_calories_for_goal(tdee, input.goal);

    let metrics = MetricsResult {
        bmi,
        bmi_category: BmiCategory::from_bmi(bmi),
        bmr,
        tdee,
        calories,
        body_fat: calculate_body_fat(bmi, input.age_years, input.gender),
        water: calculate_water_intake(input.weight_kg),
        micronutrients: calculate_micronutrients(input.gender, input.age_years),
    };

    tracing::debug!(
        bmi = metrics.bmi,
        tdee = metrics.tdee,
        calories = metrics.calories,
        "Calculated metrics for {}",
        input.name
    );

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, UnitSystem};

    fn input(
        height_cm: f64,
        weight_kg: f64,
        age_years: u32,
        gender: Gender,
        activity_level: ActivityLevel,
        goal: Goal,
    ) -> BiometricInput {
        BiometricInput {
            name: "Test".to_string(),
            height_cm,
            weight_kg,
            age_years,
            gender,
            activity_level,
            goal,
            unit: UnitSystem::Metric,
        }
    }

    #[test]
    fn test_bmi() {
        assert_eq!(calculate_bmi(200.0, 80.0), 80.0 / (2.0 * 2.0));
        assert!((calculate_bmi(180.0, 75.0) - 23.148148).abs() < 1e-5);
        assert_eq!(calculate_bmi(0.0, 80.0), 0.0);
        assert_eq!(calculate_bmi(-10.0, 80.0), 0.0);
    }

    #[test]
    fn test_bmr_sex_offsets() {
        assert_eq!(calculate_bmr(75.0, 180.0, 30, Gender::Male), 1730.0);
        assert_eq!(calculate_bmr(75.0, 180.0, 30, Gender::Female), 1564.0);
    }

    #[test]
    fn test_bmr_can_go_negative() {
        assert!(calculate_bmr(1.0, 1.0, 120, Gender::Female) < 0.0);
    }

    #[test]
    fn test_calories_per_goal() {
        let tdee = 2623.375;
        assert_eq!(adjust_calories_for_goal(tdee, Goal::Maintain), 2623);
        assert_eq!(adjust_calories_for_goal(tdee, Goal::Lose), 2123);
        assert_eq!(adjust_calories_for_goal(tdee, Goal::Gain), 2923);
        assert_eq!(adjust_calories_for_goal(2000.5, Goal::Maintain), 2001);
    }

    #[test]
    fn test_calorie_floor_always_wins() {
        assert_eq!(adjust_calories_for_goal(1500.0, Goal::Lose), 1200);
        assert_eq!(adjust_calories_for_goal(1699.6, Goal::Lose), 1200);
        assert_eq!(adjust_calories_for_goal(800.0, Goal::Gain), 1200);
        assert_eq!(adjust_calories_for_goal(-5000.0, Goal::Maintain), 1200);
        assert_eq!(adjust_calories_for_goal(-5000.0, Goal::Gain), 1200);
    }

    #[test]
    fn test_body_fat_clamps() {
        assert_eq!(calculate_body_fat(5.0, 10, Gender::Male), MIN_BODY_FAT);
        assert_eq!(calculate_body_fat(5.0, 10, Gender::Female), MIN_BODY_FAT);
        assert_eq!(calculate_body_fat(60.0, 90, Gender::Female), MAX_BODY_FAT);
        assert_eq!(calculate_body_fat(60.0, 90, Gender::Male), MAX_BODY_FAT);
        for bmi in [0.0, 10.0, 25.0, 45.0, 80.0] {
            for age in [10, 35, 70, 120] {
                for gender in [Gender::Male, Gender::Female] {
                    let bf = calculate_body_fat(bmi, age, gender);
                    assert!((MIN_BODY_FAT..=MAX_BODY_FAT).contains(&bf));
                }
            }
        }
    }

    #[test]
    fn test_body_fat_formula() {
        let expected = 1.2 * 22.0 + 0.23 * 40.0 - 5.4;
        assert!((calculate_body_fat(22.0, 40, Gender::Female) - expected).abs() < 1e-9);
        assert!((calculate_body_fat(22.0, 40, Gender::Male) - (expected - 10.8)).abs() < 1e-9);
    }

    #[test]
    fn test_water_intake() {
        assert_eq!(calculate_water_intake(70.0), 2.5);
        assert_eq!(calculate_water_intake(75.0), 2.6);
        assert_eq!(calculate_water_intake(60.0), 2.1);
        assert_eq!(calculate_water_intake(72.57472), 2.5);
    }

    #[test]
    fn test_micronutrients_male() {
        let m = calculate_micronutrients(Gender::Male, 25);
        assert_eq!(m, Micronutrients { zinc: 11, iron: 8, magnesium: 400, calcium: 1000 });

        let m = calculate_micronutrients(Gender::Male, 60);
        assert_eq!(m, Micronutrients { zinc: 11, iron: 8, magnesium: 420, calcium: 1000 });

        let m = calculate_micronutrients(Gender::Male, 75);
        assert_eq!(m.calcium, 1200);
    }

    #[test]
    fn test_micronutrients_female() {
        let m = calculate_micronutrients(Gender::Female, 25);
        assert_eq!(m, Micronutrients { zinc: 8, iron: 18, magnesium: 310, calcium: 1000 });

        // 51-70: iron drops, calcium rises
        let m = calculate_micronutrients(Gender::Female, 55);
        assert_eq!(m.iron, 8);
        assert_eq!(m.calcium, 1200);
        assert_eq!(m.magnesium, 320);

        let m = calculate_micronutrients(Gender::Female, 50);
        assert_eq!(m.iron, 18);
        assert_eq!(m.calcium, 1000);
    }

    #[test]
    fn test_micronutrients_teenagers() {
        let m = calculate_micronutrients(Gender::Female, 15);
        assert_eq!(m.iron, 8);
        assert_eq!(m.magnesium, 320);
        assert_eq!(m.calcium, 1300);

        let m = calculate_micronutrients(Gender::Male, 18);
        assert_eq!(m.magnesium, 420);
        assert_eq!(m.calcium, 1300);
    }

    #[test]
    fn test_full_metric_scenario() {
        let metrics = calculate_all_metrics(&input(
            180.0,
            75.0,
            30,
            Gender::Male,
            ActivityLevel::Moderate,
            Goal::Maintain,
        ));
        assert!((metrics.bmi - 23.15).abs() < 0.01);
        assert_eq!(metrics.bmi_category, BmiCategory::Normal);
        // 10 × 75 + 6.25 × 180 − 5 × 30 + 5
        assert_eq!(metrics.bmr, 1730.0);
        assert!((metrics.tdee - 2681.5).abs() < 1e-9);
        assert_eq!(metrics.calories, 2682);
        // 1.2 × 23.148 + 0.23 × 30 − 10.8 − 5.4
        assert!((metrics.body_fat - 18.478).abs() < 0.01);
        assert_eq!(metrics.water, 2.6);
        assert_eq!(metrics.micronutrients.magnesium, 400);
    }

    #[test]
    fn test_imperial_scenario_metrics() {
        let metrics = calculate_all_metrics(&input(
            177.8,
            72.57472,
            55,
            Gender::Female,
            ActivityLevel::Light,
            Goal::Lose,
        ));
        assert_eq!(metrics.micronutrients.iron, 8);
        assert_eq!(metrics.micronutrients.calcium, 1200);
        assert_eq!(metrics.micronutrients.magnesium, 320);
        assert_eq!(metrics.water, 2.5);
        let expected_calories = ((metrics.bmr * 1.375) - 500.0).round().max(1200.0) as u32;
        assert_eq!(metrics.calories, expected_calories);
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let data = input(165.0, 58.0, 42, Gender::Female, ActivityLevel::VeryActive, Goal::Gain);
        let first = calculate_all_metrics(&data);
        let second = calculate_all_metrics(&data);
        assert_eq!(first, second);
        assert_eq!(first.bmi.to_bits(), second.bmi.to_bits());
        assert_eq!(first.tdee.to_bits(), second.tdee.to_bits());
    }
}
