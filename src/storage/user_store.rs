//! User account storage operations.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::database::DatabaseError;
use crate::users::{hash_password, verify_password, NewUser, ProfileUpdate, User, UserId};

const USER_COLUMNS: &str = "user_id, username, email, age, gender, weight, height, created_at";

/// Store for user accounts.
pub struct UserStore<'a> {
    conn: &'a Connection,
}

impl<'a> UserStore<'a> {
    /// Create a new user store with a database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Register a user; the password is hashed before it is written.
    pub fn insert(&self, user: &NewUser) -> Result<UserId, DatabaseError> {
        let password_hash = hash_password(&user.password)?;

        self.conn.execute(
            "INSERT INTO users (username, email, password_hash, age, gender, weight, height)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.username,
                user.email,
                password_hash,
                user.age,
                user.gender,
                user.weight_kg,
                user.height_cm,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!("Inserted user {} ({})", id, user.username);
        Ok(id)
    }

    /// Get a user by ID.
    pub fn get(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM users WHERE user_id = ?1", USER_COLUMNS),
                params![id],
                map_user_row,
            )
            .optional()?;

        row.map(UserRow::into_user).transpose()
    }

    /// Update the settings fields of a user. Returns whether a row changed.
    pub fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> Result<bool, DatabaseError> {
        let rows_affected = self.conn.execute(
            "UPDATE users SET age = ?2, gender = ?3, weight = ?4, height = ?5 WHERE user_id = ?1",
            params![
                id,
                update.age,
                update.gender,
                update.weight_kg,
                update.height_cm
            ],
        )?;

        Ok(rows_affected > 0)
    }

    /// Find the first user registered with `email` whose password matches.
    ///
    /// Emails are not unique, so every account with that email is tried in
    /// registration order.
    pub fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {}, password_hash FROM users WHERE email = ?1 ORDER BY user_id",
            USER_COLUMNS
        ))?;

        let rows = stmt.query_map(params![email], |row| {
            Ok((map_user_row(row)?, row.get::<_, String>(8)?))
        })?;

        for row in rows {
            let (user_row, password_hash) = row?;
            if verify_password(password, &password_hash)? {
                return user_row.into_user().map(Some);
            }
        }

        Ok(None)
    }
}

/// Intermediate struct for reading user rows from database.
struct UserRow {
    id: i64,
    username: String,
    email: String,
    age: Option<u32>,
    gender: Option<String>,
    weight: Option<f64>,
    height: Option<f64>,
    created_at: Option<String>,
}

fn map_user_row(row: &rusqlite::Row) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
        gender: row.get(4)?,
        weight: row.get(5)?,
        height: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl UserRow {
    fn into_user(self) -> Result<User, DatabaseError> {
        let created_at = self
            .created_at
            .as_deref()
            .map(parse_sqlite_timestamp)
            .transpose()?
            .ok_or_else(|| {
                DatabaseError::DeserializationError(format!("User {} has no created_at", self.id))
            })?;

        Ok(User {
            id: self.id,
            username: self.username,
            email: self.email,
            age: self.age.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
            weight_kg: self.weight.unwrap_or_default(),
            height_cm: self.height.unwrap_or_default(),
            created_at,
        })
    }
}

/// Parse SQLite's `CURRENT_TIMESTAMP` format (UTC, second precision).
fn parse_sqlite_timestamp(value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid created date: {}", e)))
}
