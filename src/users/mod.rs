//! User accounts: registration data, profile updates and credentials.

pub mod password;
pub mod types;

pub use password::{hash_password, verify_password, PasswordError};
pub use types::{NewUser, ProfileUpdate, User, UserId};
