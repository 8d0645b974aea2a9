//! Database schema definitions.

/// SQL schema for creating all database tables at the current version.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    age INTEGER,
    gender TEXT,
    weight REAL,
    height REAL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- Workout types table
CREATE TABLE IF NOT EXISTS workout_types (
    workout_type_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT
);

-- Workouts table
CREATE TABLE IF NOT EXISTS workouts (
    workout_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(user_id),
    workout_type_id INTEGER NOT NULL REFERENCES workout_types(workout_type_id),
    duration INTEGER,
    distance REAL,
    calories REAL,
    start_time TEXT,
    end_time TEXT
);

CREATE INDEX IF NOT EXISTS idx_workouts_user_id ON workouts(user_id);

-- Goals table
CREATE TABLE IF NOT EXISTS goals (
    goal_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(user_id),
    goal_type TEXT NOT NULL,
    target_value REAL NOT NULL,
    start_date TEXT,
    end_date TEXT,
    status TEXT
);

CREATE INDEX IF NOT EXISTS idx_goals_user_id ON goals(user_id);

-- Progress table
CREATE TABLE IF NOT EXISTS progress (
    progress_id INTEGER PRIMARY KEY AUTOINCREMENT,
    goal_id INTEGER NOT NULL REFERENCES goals(goal_id),
    date TEXT NOT NULL,
    current_value REAL
);

CREATE INDEX IF NOT EXISTS idx_progress_goal_id ON progress(goal_id);
"#;

/// Drops every data table, children first so foreign keys never dangle.
pub const DROP_ALL: &str = r#"
DROP TABLE IF EXISTS progress;
DROP TABLE IF EXISTS goals;
DROP TABLE IF EXISTS workouts;
DROP TABLE IF EXISTS workout_types;
DROP TABLE IF EXISTS users;
"#;

/// SQL for schema version tracking (migrations)
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 2;

/// SQL for migration from v1 to v2 (lookup indexes)
pub const MIGRATION_V1_TO_V2: &str = r#"
CREATE INDEX IF NOT EXISTS idx_workouts_user_id ON workouts(user_id);
CREATE INDEX IF NOT EXISTS idx_goals_user_id ON goals(user_id);
CREATE INDEX IF NOT EXISTS idx_progress_goal_id ON progress(goal_id);
"#;

/// Names of the data tables, in creation order.
pub const TABLES: [&str; 5] = ["users", "workout_types", "workouts", "goals", "progress"];
