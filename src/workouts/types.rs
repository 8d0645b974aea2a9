//! Workout and workout type records.

use serde::{Deserialize, Serialize};

use crate::users::UserId;

/// Row id of a logged workout.
pub type WorkoutId = i64;

/// Row id of a workout type.
pub type WorkoutTypeId = i64;

/// Workout types seeded when the store is created: (name, description).
pub const DEFAULT_WORKOUT_TYPES: [(&str, &str); 3] = [
    ("Course", "Entraînement de course à pied"),
    ("Cyclisme", "Entraînement de vélo"),
    ("Natation", "Entraînement de natation"),
];

/// A category label for workouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutType {
    pub id: WorkoutTypeId,
    pub name: String,
    pub description: Option<String>,
}

/// A logged exercise session.
///
/// Start and end times are free text and are not validated or ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Generated identifier
    pub id: WorkoutId,
    /// User who logged the session
    pub user_id: UserId,
    /// Category of the session
    pub workout_type_id: WorkoutTypeId,
    /// Name of the category, for display
    pub workout_type_name: Option<String>,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Calories burned
    pub calories: f64,
    /// Start time as entered
    pub start_time: String,
    /// End time as entered
    pub end_time: String,
}

/// Fields written on insert and on update of a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutInput {
    pub user_id: UserId,
    pub workout_type_id: WorkoutTypeId,
    pub duration_minutes: u32,
    pub distance_km: f64,
    pub calories: f64,
    pub start_time: String,
    pub end_time: String,
}

impl WorkoutInput {
    /// Build the stored record, given its id and the resolved type name.
    pub fn into_workout(self, id: WorkoutId, workout_type_name: Option<String>) -> Workout {
        Workout {
            id,
            user_id: self.user_id,
            workout_type_id: self.workout_type_id,
            workout_type_name,
            duration_minutes: self.duration_minutes,
            distance_km: self.distance_km,
            calories: self.calories,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}
