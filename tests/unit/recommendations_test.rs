//! Tests for BMI advice and tip lists.

use fittrack::recommendations::{
    body_mass_index, weight_recommendation, TipCategory, WeightAdvice, EXERCISE_TIPS,
    HYDRATION_TIPS, MEDITATION_TIPS,
};

#[test]
fn test_underweight_example() {
    // 50 kg, 175 cm -> BMI about 16.3
    let advice = weight_recommendation(50.0, 175.0).unwrap();
    assert_eq!(advice, WeightAdvice::Increase);
    assert!(advice.message().contains("augmenter"));
}

#[test]
fn test_boundary_24_9_is_reduce() {
    assert_eq!(WeightAdvice::from_bmi(24.9), WeightAdvice::Reduce);
    assert_eq!(WeightAdvice::from_bmi(24.899), WeightAdvice::Normal);
}

#[test]
fn test_boundary_18_5_is_normal() {
    assert_eq!(WeightAdvice::from_bmi(18.5), WeightAdvice::Normal);
}

#[test]
fn test_zero_height_has_no_advice() {
    assert_eq!(body_mass_index(70.0, 0.0), None);
    assert_eq!(weight_recommendation(70.0, 0.0), None);
    assert_eq!(weight_recommendation(f64::NAN, 170.0), None);
}

#[test]
fn test_tip_lists_are_fixed() {
    assert_eq!(TipCategory::Hydration.tips(), &HYDRATION_TIPS[..]);
    assert_eq!(TipCategory::Meditation.tips(), &MEDITATION_TIPS[..]);
    assert_eq!(TipCategory::Exercise.tips(), &EXERCISE_TIPS[..]);

    let total: usize = TipCategory::ALL.iter().map(|c| c.tips().len()).sum();
    assert_eq!(total, 18);
}
