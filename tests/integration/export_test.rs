//! Integration tests for CSV export.

use fittrack::storage::{Database, UserRepository, WorkoutRepository};
use fittrack::users::{NewUser, UserId};
use fittrack::workouts::{export_csv_to_file, ExportError, WorkoutInput, CSV_HEADER};

fn register(db: &Database) -> UserId {
    db.insert_user(&NewUser {
        username: "Louis".to_string(),
        email: "louis@example.com".to_string(),
        password: "pw".to_string(),
        age: 45,
        gender: "Homme".to_string(),
        weight_kg: 85.0,
        height_cm: 178.0,
    })
    .unwrap()
}

fn workout(user_id: UserId, start: &str) -> WorkoutInput {
    WorkoutInput {
        user_id,
        workout_type_id: 1,
        duration_minutes: 30,
        distance_km: 5.0,
        calories: 310.0,
        start_time: start.to_string(),
        end_time: "2025-02-01 07:30".to_string(),
    }
}

#[test]
fn test_export_line_count_matches_workouts() {
    let db = Database::open_in_memory().unwrap();
    let louis = register(&db);
    for day in 1..=4 {
        db.insert_workout(&workout(louis, &format!("2025-02-0{} 07:00", day)))
            .unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    let written = export_csv_to_file(&db, louis, &path).unwrap();
    assert_eq!(written, 4);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "30,5.0,310.0,2025-02-01 07:00,2025-02-01 07:30");
}

#[test]
fn test_export_with_no_workouts_is_header_only() {
    let db = Database::open_in_memory().unwrap();
    let louis = register(&db);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    assert_eq!(export_csv_to_file(&db, louis, &path).unwrap(), 0);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Duration,Distance,Calories,StartTime,EndTime\n");
}

#[test]
fn test_export_only_includes_owner() {
    let db = Database::open_in_memory().unwrap();
    let louis = register(&db);
    let other = register(&db);
    db.insert_workout(&workout(louis, "2025-02-01 07:00")).unwrap();
    db.insert_workout(&workout(other, "2025-02-02 07:00")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("louis.csv");
    assert_eq!(export_csv_to_file(&db, louis, &path).unwrap(), 1);
    assert_eq!(db.list_workouts(other).unwrap().len(), 1);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let db = Database::open_in_memory().unwrap();
    let louis = register(&db);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("export.csv");
    let result = export_csv_to_file(&db, louis, &path);

    assert!(matches!(result, Err(ExportError::FileCreationFailed(_))));
}

#[test]
fn test_export_fails_when_workouts_cannot_be_read() {
    let db = Database::open_in_memory().unwrap();
    let louis = register(&db);
    db.connection().execute_batch("DROP TABLE workouts;").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    let result = export_csv_to_file(&db, louis, &path);

    assert!(matches!(result, Err(ExportError::Database(_))));
    assert!(!path.exists());
}
