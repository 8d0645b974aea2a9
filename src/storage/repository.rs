//! Repository traits consumed by the command handlers.
//!
//! `Database` implements them over SQLite and `MemoryRepository` keeps
//! everything in process memory for tests.

use crate::goals::{Goal, GoalId, NewGoal, Progress, ProgressId};
use crate::storage::database::DatabaseError;
use crate::users::{NewUser, ProfileUpdate, User, UserId};
use crate::workouts::{Workout, WorkoutId, WorkoutInput, WorkoutType};

/// Account storage. Users are never deleted.
pub trait UserRepository {
    /// Register a user and return the generated id.
    fn insert_user(&self, user: &NewUser) -> Result<UserId, DatabaseError>;

    fn get_user(&self, id: UserId) -> Result<Option<User>, DatabaseError>;

    /// Update age, gender, weight and height. `false` when the id is unknown.
    fn update_user(&self, id: UserId, update: &ProfileUpdate) -> Result<bool, DatabaseError>;

    /// First user with this email whose password matches.
    fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, DatabaseError>;
}

pub trait GoalRepository {
    fn insert_goal(&self, goal: &NewGoal) -> Result<GoalId, DatabaseError>;

    fn get_goal(&self, id: GoalId) -> Result<Option<Goal>, DatabaseError>;

    /// Goals owned by `user_id`, oldest first.
    fn list_goals(&self, user_id: UserId) -> Result<Vec<Goal>, DatabaseError>;

    /// Overwrite the goal with the same id. Returns the affected row count.
    fn update_goal(&self, goal: &Goal) -> Result<usize, DatabaseError>;

    /// Delete a goal and its progress entries. Returns the goals removed.
    fn delete_goal(&self, id: GoalId) -> Result<usize, DatabaseError>;
}

pub trait ProgressRepository {
    fn get_progress(&self, id: ProgressId) -> Result<Option<Progress>, DatabaseError>;

    /// Entries recorded against `goal_id`, oldest first.
    fn list_progress(&self, goal_id: GoalId) -> Result<Vec<Progress>, DatabaseError>;

    fn insert_progress(
        &self,
        goal_id: GoalId,
        value: f64,
        date: &str,
    ) -> Result<ProgressId, DatabaseError>;

    fn update_progress(
        &self,
        id: ProgressId,
        goal_id: GoalId,
        value: f64,
        date: &str,
    ) -> Result<bool, DatabaseError>;

    fn delete_progress(&self, id: ProgressId) -> Result<usize, DatabaseError>;
}

pub trait WorkoutRepository {
    fn list_workout_types(&self) -> Result<Vec<WorkoutType>, DatabaseError>;

    fn get_workout(&self, id: WorkoutId) -> Result<Option<Workout>, DatabaseError>;

    /// Workouts logged by `user_id`, oldest first, with type names resolved.
    fn list_workouts(&self, user_id: UserId) -> Result<Vec<Workout>, DatabaseError>;

    fn insert_workout(&self, workout: &WorkoutInput) -> Result<WorkoutId, DatabaseError>;

    fn update_workout(&self, id: WorkoutId, workout: &WorkoutInput) -> Result<bool, DatabaseError>;

    /// Returns 0 when nothing matched.
    fn delete_workout(&self, id: WorkoutId) -> Result<usize, DatabaseError>;
}

/// Everything the application needs from storage.
pub trait Repository:
    UserRepository + GoalRepository + ProgressRepository + WorkoutRepository
{
}

impl<T> Repository for T where
    T: UserRepository + GoalRepository + ProgressRepository + WorkoutRepository + ?Sized
{
}
