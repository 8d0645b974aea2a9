//! Lifestyle recommendations.
//!
//! Three fixed tip lists (hydration, meditation, exercise) and a weight
//! recommendation derived from the body mass index.

pub mod bmi;
pub mod tips;

pub use bmi::{body_mass_index, weight_recommendation, WeightAdvice};
pub use tips::{TipCategory, EXERCISE_TIPS, HYDRATION_TIPS, MEDITATION_TIPS};
