//! Body mass index and the weight recommendation derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this BMI the advice is to gain weight.
pub const UNDERWEIGHT_BELOW: f64 = 18.5;

/// From this BMI upwards the advice is to lose weight.
pub const OVERWEIGHT_FROM: f64 = 24.9;

/// BMI from weight in kilograms and height in centimeters.
///
/// Returns `None` when the inputs cannot describe a person (non-positive or
/// non-finite values).
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg.is_finite() && height_cm.is_finite()) || weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// Weight recommendation bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightAdvice {
    /// BMI under 18.5
    Increase,
    /// 18.5 <= BMI < 24.9
    Normal,
    /// BMI of 24.9 and above
    Reduce,
}

impl WeightAdvice {
    /// Band for a BMI value.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            WeightAdvice::Increase
        } else if bmi < OVERWEIGHT_FROM {
            WeightAdvice::Normal
        } else {
            WeightAdvice::Reduce
        }
    }

    /// Message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            WeightAdvice::Increase => "Vous devez augmenter votre poids (IMC inférieur à 18.5).",
            WeightAdvice::Normal => {
                "Votre poids est dans la plage normale (IMC entre 18.5 et 24.9)."
            }
            WeightAdvice::Reduce => "Vous devez réduire votre poids (IMC supérieur à 24.9).",
        }
    }
}

impl fmt::Display for WeightAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Weight recommendation for a weight/height pair.
pub fn weight_recommendation(weight_kg: f64, height_cm: f64) -> Option<WeightAdvice> {
    body_mass_index(weight_kg, height_cm).map(WeightAdvice::from_bmi)
}
