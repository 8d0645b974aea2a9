//! In-memory repository used by handler tests and anywhere a throwaway
//! store is enough.
//!
//! Mirrors the SQLite store: ids are generated monotonically and never
//! reused, references are checked on insert and update, and deleting a goal
//! removes its progress entries.

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::{SubsecRound, Utc};

use crate::goals::{Goal, GoalId, NewGoal, Progress, ProgressId};
use crate::storage::database::DatabaseError;
use crate::storage::repository::{
    GoalRepository, ProgressRepository, UserRepository, WorkoutRepository,
};
use crate::users::{hash_password, verify_password, NewUser, ProfileUpdate, User, UserId};
use crate::workouts::{
    Workout, WorkoutId, WorkoutInput, WorkoutType, WorkoutTypeId, DEFAULT_WORKOUT_TYPES,
};

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<UserId, (User, String)>,
    workout_types: BTreeMap<WorkoutTypeId, WorkoutType>,
    workouts: BTreeMap<WorkoutId, WorkoutInput>,
    goals: BTreeMap<GoalId, Goal>,
    progress: BTreeMap<ProgressId, Progress>,
    last_id: i64,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn check_user(&self, id: UserId) -> Result<(), DatabaseError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DatabaseError::ConstraintViolation(format!(
                "user {} does not exist",
                id
            )))
        }
    }

    fn check_goal(&self, id: GoalId) -> Result<(), DatabaseError> {
        if self.goals.contains_key(&id) {
            Ok(())
        } else {
            Err(DatabaseError::ConstraintViolation(format!(
                "goal {} does not exist",
                id
            )))
        }
    }

    fn check_workout(&self, workout: &WorkoutInput) -> Result<(), DatabaseError> {
        self.check_user(workout.user_id)?;
        if self.workout_types.contains_key(&workout.workout_type_id) {
            Ok(())
        } else {
            Err(DatabaseError::ConstraintViolation(format!(
                "workout type {} does not exist",
                workout.workout_type_id
            )))
        }
    }

    fn resolve_workout(&self, id: WorkoutId, input: &WorkoutInput) -> Workout {
        let type_name = self
            .workout_types
            .get(&input.workout_type_id)
            .map(|t| t.name.clone());
        input.clone().into_workout(id, type_name)
    }
}

/// Repository backed by ordered maps behind a `RefCell`.
#[derive(Debug)]
pub struct MemoryRepository {
    state: RefCell<MemoryState>,
}

impl MemoryRepository {
    /// Create an empty repository with the default workout types.
    pub fn new() -> Self {
        let mut state = MemoryState::default();
        for (name, description) in DEFAULT_WORKOUT_TYPES {
            let id = state.next_id();
            state.workout_types.insert(
                id,
                WorkoutType {
                    id,
                    name: name.to_string(),
                    description: Some(description.to_string()),
                },
            );
        }
        // Entity ids start at 1 like SQLite's AUTOINCREMENT columns.
        state.last_id = 0;

        Self {
            state: RefCell::new(state),
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for MemoryRepository {
    fn insert_user(&self, user: &NewUser) -> Result<UserId, DatabaseError> {
        let password_hash = hash_password(&user.password)?;
        let mut state = self.state.borrow_mut();
        let id = state.next_id();

        let record = User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            age: user.age,
            gender: user.gender.clone(),
            weight_kg: user.weight_kg,
            height_cm: user.height_cm,
            created_at: Utc::now().trunc_subsecs(0),
        };
        state.users.insert(id, (record, password_hash));
        Ok(id)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        Ok(self.state.borrow().users.get(&id).map(|(u, _)| u.clone()))
    }

    fn update_user(&self, id: UserId, update: &ProfileUpdate) -> Result<bool, DatabaseError> {
        let mut state = self.state.borrow_mut();
        match state.users.get_mut(&id) {
            Some((user, _)) => {
                update.apply_to(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, DatabaseError> {
        let state = self.state.borrow();
        for (user, hash) in state.users.values().filter(|(u, _)| u.email == email) {
            if verify_password(password, hash)? {
                return Ok(Some(user.clone()));
            }
        }
        Ok(None)
    }
}

impl GoalRepository for MemoryRepository {
    fn insert_goal(&self, goal: &NewGoal) -> Result<GoalId, DatabaseError> {
        let mut state = self.state.borrow_mut();
        state.check_user(goal.user_id)?;

        let id = state.next_id();
        state.goals.insert(id, goal.clone().into_goal(id));
        Ok(id)
    }

    fn get_goal(&self, id: GoalId) -> Result<Option<Goal>, DatabaseError> {
        Ok(self.state.borrow().goals.get(&id).cloned())
    }

    fn list_goals(&self, user_id: UserId) -> Result<Vec<Goal>, DatabaseError> {
        Ok(self
            .state
            .borrow()
            .goals
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update_goal(&self, goal: &Goal) -> Result<usize, DatabaseError> {
        let mut state = self.state.borrow_mut();
        match state.goals.get_mut(&goal.id) {
            Some(existing) => {
                let user_id = existing.user_id;
                *existing = goal.clone();
                existing.user_id = user_id;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_goal(&self, id: GoalId) -> Result<usize, DatabaseError> {
        let mut state = self.state.borrow_mut();
        state.progress.retain(|_, p| p.goal_id != id);
        Ok(state.goals.remove(&id).map_or(0, |_| 1))
    }
}

impl ProgressRepository for MemoryRepository {
    fn get_progress(&self, id: ProgressId) -> Result<Option<Progress>, DatabaseError> {
        Ok(self.state.borrow().progress.get(&id).cloned())
    }

    fn list_progress(&self, goal_id: GoalId) -> Result<Vec<Progress>, DatabaseError> {
        Ok(self
            .state
            .borrow()
            .progress
            .values()
            .filter(|p| p.goal_id == goal_id)
            .cloned()
            .collect())
    }

    fn insert_progress(
        &self,
        goal_id: GoalId,
        value: f64,
        date: &str,
    ) -> Result<ProgressId, DatabaseError> {
        let mut state = self.state.borrow_mut();
        state.check_goal(goal_id)?;

        let id = state.next_id();
        state.progress.insert(
            id,
            Progress {
                id,
                goal_id,
                value,
                date: date.to_string(),
            },
        );
        Ok(id)
    }

    fn update_progress(
        &self,
        id: ProgressId,
        goal_id: GoalId,
        value: f64,
        date: &str,
    ) -> Result<bool, DatabaseError> {
        let mut state = self.state.borrow_mut();
        if !state.progress.contains_key(&id) {
            return Ok(false);
        }
        state.check_goal(goal_id)?;

        if let Some(entry) = state.progress.get_mut(&id) {
            entry.goal_id = goal_id;
            entry.value = value;
            entry.date = date.to_string();
        }
        Ok(true)
    }

    fn delete_progress(&self, id: ProgressId) -> Result<usize, DatabaseError> {
        Ok(self
            .state
            .borrow_mut()
            .progress
            .remove(&id)
            .map_or(0, |_| 1))
    }
}

impl WorkoutRepository for MemoryRepository {
    fn list_workout_types(&self) -> Result<Vec<WorkoutType>, DatabaseError> {
        Ok(self.state.borrow().workout_types.values().cloned().collect())
    }

    fn get_workout(&self, id: WorkoutId) -> Result<Option<Workout>, DatabaseError> {
        let state = self.state.borrow();
        Ok(state
            .workouts
            .get(&id)
            .map(|input| state.resolve_workout(id, input)))
    }

    fn list_workouts(&self, user_id: UserId) -> Result<Vec<Workout>, DatabaseError> {
        let state = self.state.borrow();
        Ok(state
            .workouts
            .iter()
            .filter(|(_, w)| w.user_id == user_id)
            .map(|(id, w)| state.resolve_workout(*id, w))
            .collect())
    }

    fn insert_workout(&self, workout: &WorkoutInput) -> Result<WorkoutId, DatabaseError> {
        let mut state = self.state.borrow_mut();
        state.check_workout(workout)?;

        let id = state.next_id();
        state.workouts.insert(id, workout.clone());
        Ok(id)
    }

    fn update_workout(&self, id: WorkoutId, workout: &WorkoutInput) -> Result<bool, DatabaseError> {
        let mut state = self.state.borrow_mut();
        if !state.workouts.contains_key(&id) {
            return Ok(false);
        }
        state.check_workout(workout)?;

        state.workouts.insert(id, workout.clone());
        Ok(true)
    }

    fn delete_workout(&self, id: WorkoutId) -> Result<usize, DatabaseError> {
        Ok(self
            .state
            .borrow_mut()
            .workouts
            .remove(&id)
            .map_or(0, |_| 1))
    }
}
