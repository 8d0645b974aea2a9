//! Goals and the progress measurements recorded against them.

pub mod types;

pub use types::{Goal, GoalId, NewGoal, Progress, ProgressId};
