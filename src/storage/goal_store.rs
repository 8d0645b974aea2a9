//! Goal storage operations.

use rusqlite::{params, Connection, OptionalExtension};

use crate::goals::{Goal, GoalId, NewGoal};
use crate::storage::database::DatabaseError;
use crate::users::UserId;

const GOAL_COLUMNS: &str = "goal_id, user_id, goal_type, target_value, start_date, end_date, status";

/// Store for user goals.
pub struct GoalStore<'a> {
    conn: &'a Connection,
}

impl<'a> GoalStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a goal and return its generated id.
    pub fn insert(&self, goal: &NewGoal) -> Result<GoalId, DatabaseError> {
        self.conn.execute(
            "INSERT INTO goals (user_id, goal_type, target_value, start_date, end_date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                goal.user_id,
                goal.goal_type,
                goal.target_value,
                goal.start_date,
                goal.end_date,
                goal.status,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!("Inserted goal {} for user {}", id, goal.user_id);
        Ok(id)
    }

    pub fn get(&self, id: GoalId) -> Result<Option<Goal>, DatabaseError> {
        let goal = self
            .conn
            .query_row(
                &format!("SELECT {} FROM goals WHERE goal_id = ?1", GOAL_COLUMNS),
                params![id],
                parse_goal_row,
            )
            .optional()?;

        Ok(goal)
    }

    /// All goals owned by a user, oldest first.
    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<Goal>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM goals WHERE user_id = ?1 ORDER BY goal_id",
            GOAL_COLUMNS
        ))?;

        let goals = stmt
            .query_map(params![user_id], parse_goal_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    /// Overwrite a goal's fields by id. Returns the affected row count.
    pub fn update(&self, goal: &Goal) -> Result<usize, DatabaseError> {
        let rows_affected = self.conn.execute(
            "UPDATE goals SET goal_type = ?2, target_value = ?3, start_date = ?4,
                end_date = ?5, status = ?6
             WHERE goal_id = ?1",
            params![
                goal.id,
                goal.goal_type,
                goal.target_value,
                goal.start_date,
                goal.end_date,
                goal.status,
            ],
        )?;

        Ok(rows_affected)
    }

    /// Delete a goal together with its progress entries.
    ///
    /// Returns the number of goals removed (0 or 1).
    pub fn delete(&self, id: GoalId) -> Result<usize, DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let progress_removed = tx.execute("DELETE FROM progress WHERE goal_id = ?1", params![id])?;
        let goals_removed = tx.execute("DELETE FROM goals WHERE goal_id = ?1", params![id])?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        if goals_removed > 0 {
            tracing::debug!(
                "Deleted goal {} and {} progress entries",
                id,
                progress_removed
            );
        }
        Ok(goals_removed)
    }
}

fn parse_goal_row(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        goal_type: row.get(2)?,
        target_value: row.get(3)?,
        start_date: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        end_date: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        status: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
    })
}
