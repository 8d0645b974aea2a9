//! Storage module for database, repositories and configuration.

pub mod config;
pub mod database;
pub mod goal_store;
pub mod memory;
pub mod progress_store;
pub mod repository;
pub mod schema;
pub mod user_store;
pub mod workout_store;

pub use config::{AppConfig, ConfigError, UpgradePolicy};
pub use database::{Database, DatabaseError};
pub use goal_store::GoalStore;
pub use memory::MemoryRepository;
pub use progress_store::ProgressStore;
pub use repository::{
    GoalRepository, ProgressRepository, Repository, UserRepository, WorkoutRepository,
};
pub use user_store::UserStore;
pub use workout_store::WorkoutStore;
