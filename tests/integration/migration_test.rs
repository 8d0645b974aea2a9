//! Integration tests for schema upgrades.

use std::path::Path;

use fittrack::storage::config::UpgradePolicy;
use fittrack::storage::schema::CURRENT_VERSION;
use fittrack::storage::{Database, UserRepository};
use fittrack::users::{NewUser, UserId};

fn register(db: &Database) -> UserId {
    db.insert_user(&NewUser {
        username: "Sarah".to_string(),
        email: "sarah@example.com".to_string(),
        password: "pw".to_string(),
        age: 36,
        gender: "Femme".to_string(),
        weight_kg: 64.0,
        height_cm: 170.0,
    })
    .unwrap()
}

/// Rewind a database file to look like a version 1 store.
fn downgrade_to_v1(path: &Path) -> UserId {
    let db = Database::open(path).unwrap();
    let user_id = register(&db);
    db.connection()
        .execute_batch(
            "DROP INDEX idx_workouts_user_id;
             DROP INDEX idx_goals_user_id;
             DROP INDEX idx_progress_goal_id;
             DELETE FROM schema_version;
             INSERT INTO schema_version (version, applied_at) VALUES (1, datetime('now'));",
        )
        .unwrap();
    user_id
}

fn index_count(db: &Database) -> i64 {
    db.connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'",
            [],
            |row| row.get(0),
        )
        .unwrap()
}

#[test]
fn test_migrate_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fitness.db");
    let user_id = downgrade_to_v1(&path);

    let db = Database::open_with_policy(&path, UpgradePolicy::Migrate).unwrap();

    assert_eq!(db.schema_version().unwrap(), CURRENT_VERSION);
    assert_eq!(index_count(&db), 3);
    assert!(db.get_user(user_id).unwrap().is_some());
}

#[test]
fn test_recreate_discards_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fitness.db");
    let user_id = downgrade_to_v1(&path);

    let db = Database::open_with_policy(&path, UpgradePolicy::Recreate).unwrap();

    assert_eq!(db.schema_version().unwrap(), CURRENT_VERSION);
    assert_eq!(index_count(&db), 3);
    assert!(db.get_user(user_id).unwrap().is_none());
}

#[test]
fn test_current_version_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fitness.db");
    let user_id = {
        let db = Database::open(&path).unwrap();
        register(&db)
    };

    let db = Database::open_with_policy(&path, UpgradePolicy::Recreate).unwrap();
    assert!(db.get_user(user_id).unwrap().is_some());
}
