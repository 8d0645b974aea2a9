//! User account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row id of a user.
pub type UserId = i64;

/// A registered user.
///
/// The password hash never leaves the storage layer, so it is not part of
/// this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Generated identifier
    pub id: UserId,
    /// Display name
    pub username: String,
    /// Login email (not unique)
    pub email: String,
    /// Age in years
    pub age: u32,
    /// Gender, one of the configured gender labels
    pub gender: String,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Body mass index from the stored weight and height.
    pub fn bmi(&self) -> Option<f64> {
        crate::recommendations::body_mass_index(self.weight_kg, self.height_cm)
    }
}

/// Fields captured at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Plain-text password; hashed before it reaches the store.
    pub password: String,
    pub age: u32,
    pub gender: String,
    pub weight_kg: f64,
    pub height_cm: f64,
}

/// The subset of a profile that the settings screen may change.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub age: u32,
    pub gender: String,
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl ProfileUpdate {
    /// Apply this update to an in-memory copy of a user.
    pub fn apply_to(&self, user: &mut User) {
        user.age = self.age;
        user.gender = self.gender.clone();
        user.weight_kg = self.weight_kg;
        user.height_cm = self.height_cm;
    }
}
