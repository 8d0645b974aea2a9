//! FitTrack - Personal Fitness Tracker
//!
//! A self-hosted fitness tracker backed by SQLite. Records workouts, goals
//! and progress for registered users, exports workouts as CSV, and offers
//! BMI-based weight advice and lifestyle tips.

pub mod goals;
pub mod recommendations;
pub mod session;
pub mod storage;
pub mod users;
pub mod validation;
pub mod vocabulary;
pub mod workouts;

// Re-export commonly used types
pub use goals::{Goal, NewGoal, Progress};
pub use session::Session;
pub use storage::{AppConfig, Database, DatabaseError, MemoryRepository, Repository};
pub use users::{NewUser, ProfileUpdate, User};
pub use workouts::{Workout, WorkoutInput, WorkoutType};
