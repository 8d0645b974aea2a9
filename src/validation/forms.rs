//! Raw form input and its conversion into typed records.

use super::{one_of, parse_decimal, parse_number, required, InputError};
use crate::goals::{Goal, NewGoal};
use crate::users::{NewUser, ProfileUpdate, User, UserId};
use crate::workouts::{Workout, WorkoutInput, WorkoutType};

/// Registration form, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
}

impl RegistrationForm {
    /// Validate the form against the allowed gender labels.
    pub fn validate(&self, genders: &[String]) -> Result<NewUser, InputError> {
        let username = required("Username", &self.username)?;
        let email = required("Email", &self.email)?;
        let password = required("Password", &self.password)?;
        let confirm_password = required("Password confirmation", &self.confirm_password)?;

        if password != confirm_password {
            return Err(InputError::PasswordMismatch);
        }

        Ok(NewUser {
            username,
            email,
            password,
            age: parse_number("Age", &self.age)?,
            gender: one_of("Gender", &self.gender, genders)?,
            weight_kg: parse_decimal("Weight", &self.weight)?,
            height_cm: parse_decimal("Height", &self.height)?,
        })
    }
}

/// Login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Trimmed (email, password) pair.
    pub fn validate(&self) -> Result<(String, String), InputError> {
        Ok((
            required("Email", &self.email)?,
            required("Password", &self.password)?,
        ))
    }
}

/// Settings form.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
}

impl ProfileForm {
    /// Form prefilled with the stored profile.
    pub fn from_user(user: &User) -> Self {
        Self {
            age: user.age.to_string(),
            gender: user.gender.clone(),
            weight: user.weight_kg.to_string(),
            height: user.height_cm.to_string(),
        }
    }

    pub fn validate(&self, genders: &[String]) -> Result<ProfileUpdate, InputError> {
        Ok(ProfileUpdate {
            age: parse_number("Age", &self.age)?,
            gender: one_of("Gender", &self.gender, genders)?,
            weight_kg: parse_decimal("Weight", &self.weight)?,
            height_cm: parse_decimal("Height", &self.height)?,
        })
    }
}

/// Goal creation and edit form.
#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub goal_type: String,
    pub target_value: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl GoalForm {
    /// Form prefilled with a stored goal, for editing.
    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            goal_type: goal.goal_type.clone(),
            target_value: goal.target_value.to_string(),
            start_date: goal.start_date.clone(),
            end_date: goal.end_date.clone(),
            status: goal.status.clone(),
        }
    }

    pub fn validate(&self, user_id: UserId, statuses: &[String]) -> Result<NewGoal, InputError> {
        self.build(user_id, |status| one_of("Status", status, statuses))
    }

    /// Validate an edit of `goal`.
    ///
    /// A status left as stored is kept even if the vocabulary no longer
    /// lists it; a changed status must be one of `statuses`.
    pub fn validate_edit(&self, goal: &Goal, statuses: &[String]) -> Result<NewGoal, InputError> {
        self.build(goal.user_id, |status| {
            if status.trim() == goal.status.trim() {
                Ok(goal.status.clone())
            } else {
                one_of("Status", status, statuses)
            }
        })
    }

    fn build(
        &self,
        user_id: UserId,
        status: impl FnOnce(&str) -> Result<String, InputError>,
    ) -> Result<NewGoal, InputError> {
        Ok(NewGoal {
            user_id,
            goal_type: required("Goal type", &self.goal_type)?,
            target_value: parse_decimal("Target value", &self.target_value)?,
            start_date: required("Start date", &self.start_date)?,
            end_date: required("End date", &self.end_date)?,
            status: status(&self.status)?,
        })
    }
}

/// Workout creation and edit form.
///
/// The workout type may be given by id or by name.
#[derive(Debug, Clone, Default)]
pub struct WorkoutForm {
    pub workout_type: String,
    pub duration: String,
    pub distance: String,
    pub calories: String,
    pub start_time: String,
    pub end_time: String,
}

impl WorkoutForm {
    /// Form prefilled with a stored workout, for editing.
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            workout_type: workout.workout_type_id.to_string(),
            duration: workout.duration_minutes.to_string(),
            distance: workout.distance_km.to_string(),
            calories: workout.calories.to_string(),
            start_time: workout.start_time.clone(),
            end_time: workout.end_time.clone(),
        }
    }

    pub fn validate(
        &self,
        user_id: UserId,
        types: &[WorkoutType],
    ) -> Result<WorkoutInput, InputError> {
        let type_ref = required("Workout type", &self.workout_type)?;
        let duration_minutes = parse_number("Duration", &self.duration)?;
        let distance_km = parse_decimal("Distance", &self.distance)?;
        let calories = parse_decimal("Calories", &self.calories)?;
        let start_time = required("Start time", &self.start_time)?;
        let end_time = required("End time", &self.end_time)?;

        let workout_type = types
            .iter()
            .find(|t| t.id.to_string() == type_ref || t.name.eq_ignore_ascii_case(&type_ref))
            .ok_or(InputError::UnknownWorkoutType(type_ref))?;

        Ok(WorkoutInput {
            user_id,
            workout_type_id: workout_type.id,
            duration_minutes,
            distance_km,
            calories,
            start_time,
            end_time,
        })
    }
}

/// Progress entry form.
#[derive(Debug, Clone, Default)]
pub struct ProgressForm {
    pub value: String,
    pub date: String,
}

impl ProgressForm {
    /// Validated (value, date) pair.
    pub fn validate(&self) -> Result<(f64, String), InputError> {
        Ok((
            parse_decimal("Progress value", &self.value)?,
            required("Date", &self.date)?,
        ))
    }
}
