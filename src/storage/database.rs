//! Database operations using rusqlite.
//!
//! `Database` owns the connection, creates and upgrades the schema, and
//! implements the repository traits by delegating to the per-entity stores.

use crate::goals::{Goal, GoalId, NewGoal, Progress, ProgressId};
use crate::storage::config::UpgradePolicy;
use crate::storage::goal_store::GoalStore;
use crate::storage::progress_store::ProgressStore;
use crate::storage::repository::{
    GoalRepository, ProgressRepository, UserRepository, WorkoutRepository,
};
use crate::storage::schema::{
    CURRENT_VERSION, DROP_ALL, MIGRATION_V1_TO_V2, SCHEMA, SCHEMA_VERSION_TABLE,
};
use crate::storage::user_store::UserStore;
use crate::storage::workout_store::WorkoutStore;
use crate::users::{NewUser, PasswordError, ProfileUpdate, User, UserId};
use crate::workouts::{Workout, WorkoutId, WorkoutInput, WorkoutType, DEFAULT_WORKOUT_TYPES};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path, migrating older schemas.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Self::open_with_policy(path, UpgradePolicy::default())
    }

    /// Open or create a database, upgrading older schemas with `policy`.
    pub fn open_with_policy(path: &Path, policy: UpgradePolicy) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::IoError(e.to_string()))?;
            }
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        tracing::debug!("Opened database at {}", path.display());
        Self::from_connection(conn, policy)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        Self::from_connection(conn, UpgradePolicy::default())
    }

    fn from_connection(conn: Connection, policy: UpgradePolicy) -> Result<Self, DatabaseError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize(policy)?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self, policy: UpgradePolicy) -> Result<(), DatabaseError> {
        // Create schema version table
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        // Check current version
        let current_version = self.schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version, policy)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32, policy: UpgradePolicy) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        if from_version < 1 {
            // Initial schema
            create_schema(&tx)?;
            tracing::info!("Database created at version {}", CURRENT_VERSION);
        } else {
            match policy {
                UpgradePolicy::Recreate => {
                    tx.execute_batch(DROP_ALL)
                        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
                    create_schema(&tx)?;
                    tracing::warn!(
                        "Recreated all tables while upgrading from version {}; previous data discarded",
                        from_version
                    );
                }
                UpgradePolicy::Migrate => {
                    if from_version < 2 {
                        tx.execute_batch(MIGRATION_V1_TO_V2)
                            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
                    }
                    tracing::info!(
                        "Database migrated from version {} to {}",
                        from_version,
                        CURRENT_VERSION
                    );
                }
            }
        }

        record_version(&tx, CURRENT_VERSION)?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }

    /// Drop every table and recreate the schema with its seed rows.
    ///
    /// All users, workouts, goals and progress are lost.
    pub fn recreate(&self) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tx.execute_batch(DROP_ALL)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        create_schema(&tx)?;
        record_version(&tx, CURRENT_VERSION)?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::warn!("Database recreated; all data discarded");
        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn users(&self) -> UserStore<'_> {
        UserStore::new(&self.conn)
    }

    pub fn goals(&self) -> GoalStore<'_> {
        GoalStore::new(&self.conn)
    }

    pub fn progress(&self) -> ProgressStore<'_> {
        ProgressStore::new(&self.conn)
    }

    pub fn workouts(&self) -> WorkoutStore<'_> {
        WorkoutStore::new(&self.conn)
    }
}

/// Create all tables and seed the default workout types.
fn create_schema(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(SCHEMA)
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

    for (name, description) in DEFAULT_WORKOUT_TYPES {
        conn.execute(
            "INSERT INTO workout_types (name, description) VALUES (?1, ?2)",
            params![name, description],
        )
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    }

    Ok(())
}

fn record_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )
    .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    Ok(())
}

impl UserRepository for Database {
    fn insert_user(&self, user: &NewUser) -> Result<UserId, DatabaseError> {
        self.users().insert(user)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        self.users().get(id)
    }

    fn update_user(&self, id: UserId, update: &ProfileUpdate) -> Result<bool, DatabaseError> {
        self.users().update_profile(id, update)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, DatabaseError> {
        self.users().find_by_credentials(email, password)
    }
}

impl GoalRepository for Database {
    fn insert_goal(&self, goal: &NewGoal) -> Result<GoalId, DatabaseError> {
        self.goals().insert(goal)
    }

    fn get_goal(&self, id: GoalId) -> Result<Option<Goal>, DatabaseError> {
        self.goals().get(id)
    }

    fn list_goals(&self, user_id: UserId) -> Result<Vec<Goal>, DatabaseError> {
        self.goals().list_for_user(user_id)
    }

    fn update_goal(&self, goal: &Goal) -> Result<usize, DatabaseError> {
        self.goals().update(goal)
    }

    fn delete_goal(&self, id: GoalId) -> Result<usize, DatabaseError> {
        self.goals().delete(id)
    }
}

impl ProgressRepository for Database {
    fn get_progress(&self, id: ProgressId) -> Result<Option<Progress>, DatabaseError> {
        self.progress().get(id)
    }

    fn list_progress(&self, goal_id: GoalId) -> Result<Vec<Progress>, DatabaseError> {
        self.progress().list_for_goal(goal_id)
    }

    fn insert_progress(
        &self,
        goal_id: GoalId,
        value: f64,
        date: &str,
    ) -> Result<ProgressId, DatabaseError> {
        self.progress().insert(goal_id, value, date)
    }

    fn update_progress(
        &self,
        id: ProgressId,
        goal_id: GoalId,
        value: f64,
        date: &str,
    ) -> Result<bool, DatabaseError> {
        self.progress().update(id, goal_id, value, date)
    }

    fn delete_progress(&self, id: ProgressId) -> Result<usize, DatabaseError> {
        self.progress().delete(id)
    }
}

impl WorkoutRepository for Database {
    fn list_workout_types(&self) -> Result<Vec<WorkoutType>, DatabaseError> {
        self.workouts().list_types()
    }

    fn get_workout(&self, id: WorkoutId) -> Result<Option<Workout>, DatabaseError> {
        self.workouts().get(id)
    }

    fn list_workouts(&self, user_id: UserId) -> Result<Vec<Workout>, DatabaseError> {
        self.workouts().list_for_user(user_id)
    }

    fn insert_workout(&self, workout: &WorkoutInput) -> Result<WorkoutId, DatabaseError> {
        self.workouts().insert(workout)
    }

    fn update_workout(&self, id: WorkoutId, workout: &WorkoutInput) -> Result<bool, DatabaseError> {
        self.workouts().update(id, workout)
    }

    fn delete_workout(&self, id: WorkoutId) -> Result<usize, DatabaseError> {
        self.workouts().delete(id)
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(err, message)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DatabaseError::ConstraintViolation(message.unwrap_or_else(|| err.to_string()))
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}
