//! Unit conversion constants and accepted input ranges
//!
//! Imperial values are converted to metric exactly once, at validation time.

use std::ops::RangeInclusive;

// ============================================================================
// Conversion Constants
// ============================================================================

/// Centimeters per foot
pub const CM_PER_FOOT: f64 = 30.48;
/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

// ============================================================================
// Accepted Ranges
// ============================================================================

pub const AGE_YEARS: RangeInclusive<i64> = 10..=120;
pub const HEIGHT_CM: RangeInclusive<f64> = 100.0..=250.0;
pub const WEIGHT_KG: RangeInclusive<f64> = 30.0..=300.0;
pub const HEIGHT_FT: RangeInclusive<f64> = 3.0..=8.0;
pub const HEIGHT_IN: RangeInclusive<f64> = 0.0..=11.99;
pub const WEIGHT_LBS: RangeInclusive<f64> = 66.0..=660.0;

/// Convert feet and inches to centimeters
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    feet * CM_PER_FOOT + inches * CM_PER_INCH
}

/// Convert pounds to kilograms
pub fn pounds_to_kg(pounds: f64) -> f64 {
    pounds * KG_PER_LB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_inches_to_cm() {
        assert!((feet_inches_to_cm(5.0, 10.0) - 177.8).abs() < 1e-9);
        assert!((feet_inches_to_cm(6.0, 0.0) - 182.88).abs() < 1e-9);
    }

    #[test]
    fn test_pounds_to_kg() {
        assert!((pounds_to_kg(160.0) - 72.57472).abs() < 1e-9);
        assert!((pounds_to_kg(66.0) - 29.937072).abs() < 1e-9);
    }

    #[test]
    fn test_ranges_are_inclusive() {
        assert!(AGE_YEARS.contains(&10) && AGE_YEARS.contains(&120));
        assert!(HEIGHT_IN.contains(&11.99));
        assert!(!HEIGHT_IN.contains(&12.0));
        assert!(WEIGHT_LBS.contains(&660.0));
    }
}
