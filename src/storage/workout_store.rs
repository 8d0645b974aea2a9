//! Workout and workout type storage operations.

use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::database::DatabaseError;
use crate::users::UserId;
use crate::workouts::{Workout, WorkoutId, WorkoutInput, WorkoutType};

const WORKOUT_SELECT: &str = "SELECT w.workout_id, w.user_id, w.workout_type_id, t.name,
        w.duration, w.distance, w.calories, w.start_time, w.end_time
    FROM workouts w
    LEFT JOIN workout_types t ON t.workout_type_id = w.workout_type_id";

/// Store for logged workouts and the workout type catalog.
pub struct WorkoutStore<'a> {
    conn: &'a Connection,
}

impl<'a> WorkoutStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The workout type catalog, by id.
    pub fn list_types(&self) -> Result<Vec<WorkoutType>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT workout_type_id, name, description FROM workout_types ORDER BY workout_type_id",
        )?;

        let types = stmt
            .query_map([], |row| {
                Ok(WorkoutType {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(types)
    }

    pub fn get(&self, id: WorkoutId) -> Result<Option<Workout>, DatabaseError> {
        let workout = self
            .conn
            .query_row(
                &format!("{} WHERE w.workout_id = ?1", WORKOUT_SELECT),
                params![id],
                parse_workout_row,
            )
            .optional()?;

        Ok(workout)
    }

    /// All workouts logged by a user, oldest first.
    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<Workout>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE w.user_id = ?1 ORDER BY w.workout_id",
            WORKOUT_SELECT
        ))?;

        let workouts = stmt
            .query_map(params![user_id], parse_workout_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(workouts)
    }

    pub fn insert(&self, workout: &WorkoutInput) -> Result<WorkoutId, DatabaseError> {
        self.conn.execute(
            "INSERT INTO workouts (user_id, workout_type_id, duration, distance, calories, start_time, end_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                workout.user_id,
                workout.workout_type_id,
                workout.duration_minutes,
                workout.distance_km,
                workout.calories,
                workout.start_time,
                workout.end_time,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!("Inserted workout {} for user {}", id, workout.user_id);
        Ok(id)
    }

    /// Overwrite a workout by id. Returns whether a row changed.
    pub fn update(&self, id: WorkoutId, workout: &WorkoutInput) -> Result<bool, DatabaseError> {
        let rows_affected = self.conn.execute(
            "UPDATE workouts SET user_id = ?2, workout_type_id = ?3, duration = ?4, distance = ?5,
                calories = ?6, start_time = ?7, end_time = ?8
             WHERE workout_id = ?1",
            params![
                id,
                workout.user_id,
                workout.workout_type_id,
                workout.duration_minutes,
                workout.distance_km,
                workout.calories,
                workout.start_time,
                workout.end_time,
            ],
        )?;

        Ok(rows_affected > 0)
    }

    pub fn delete(&self, id: WorkoutId) -> Result<usize, DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM workouts WHERE workout_id = ?1", params![id])?;

        Ok(rows_affected)
    }
}

fn parse_workout_row(row: &rusqlite::Row) -> rusqlite::Result<Workout> {
    Ok(Workout {
        id: row.get(0)?,
        user_id: row.get(1)?,
        workout_type_id: row.get(2)?,
        workout_type_name: row.get(3)?,
        duration_minutes: row.get::<_, Option<u32>>(4)?.unwrap_or_default(),
        distance_km: row.get::<_, Option<f64>>(5)?.unwrap_or_default(),
        calories: row.get::<_, Option<f64>>(6)?.unwrap_or_default(),
        start_time: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        end_time: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
    })
}
