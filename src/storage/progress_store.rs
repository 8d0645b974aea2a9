//! Progress entry storage operations.

use rusqlite::{params, Connection, OptionalExtension};

use crate::goals::{GoalId, Progress, ProgressId};
use crate::storage::database::DatabaseError;

/// Store for progress entries recorded against goals.
pub struct ProgressStore<'a> {
    conn: &'a Connection,
}

impl<'a> ProgressStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, id: ProgressId) -> Result<Option<Progress>, DatabaseError> {
        let progress = self
            .conn
            .query_row(
                "SELECT progress_id, goal_id, current_value, date FROM progress WHERE progress_id = ?1",
                params![id],
                parse_progress_row,
            )
            .optional()?;

        Ok(progress)
    }

    /// Entries for a goal, oldest first.
    pub fn list_for_goal(&self, goal_id: GoalId) -> Result<Vec<Progress>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT progress_id, goal_id, current_value, date FROM progress
             WHERE goal_id = ?1 ORDER BY progress_id",
        )?;

        let entries = stmt
            .query_map(params![goal_id], parse_progress_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    pub fn insert(&self, goal_id: GoalId, value: f64, date: &str) -> Result<ProgressId, DatabaseError> {
        self.conn.execute(
            "INSERT INTO progress (goal_id, current_value, date) VALUES (?1, ?2, ?3)",
            params![goal_id, value, date],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!("Recorded progress {} for goal {}", id, goal_id);
        Ok(id)
    }

    /// Overwrite an entry by id. Returns whether a row changed.
    pub fn update(
        &self,
        id: ProgressId,
        goal_id: GoalId,
        value: f64,
        date: &str,
    ) -> Result<bool, DatabaseError> {
        let rows_affected = self.conn.execute(
            "UPDATE progress SET goal_id = ?2, current_value = ?3, date = ?4 WHERE progress_id = ?1",
            params![id, goal_id, value, date],
        )?;

        Ok(rows_affected > 0)
    }

    pub fn delete(&self, id: ProgressId) -> Result<usize, DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM progress WHERE progress_id = ?1", params![id])?;

        Ok(rows_affected)
    }
}

fn parse_progress_row(row: &rusqlite::Row) -> rusqlite::Result<Progress> {
    Ok(Progress {
        id: row.get(0)?,
        goal_id: row.get(1)?,
        value: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
        date: row.get(3)?,
    })
}
