//! Logged workouts, workout types and export.

pub mod export;
pub mod types;

pub use export::{export_csv, export_csv_to_file, ExportError, CSV_HEADER};
pub use types::{
    Workout, WorkoutId, WorkoutInput, WorkoutType, WorkoutTypeId, DEFAULT_WORKOUT_TYPES,
};
