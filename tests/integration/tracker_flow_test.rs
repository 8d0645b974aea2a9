//! Integration tests for the SQLite store.
//!
//! Covers a full user journey against a database file on disk.

use fittrack::goals::NewGoal;
use fittrack::storage::{
    Database, DatabaseError, GoalRepository, ProgressRepository, UserRepository,
    WorkoutRepository,
};
use fittrack::users::{NewUser, ProfileUpdate, UserId};
use fittrack::vocabulary::default_goal_statuses;
use fittrack::workouts::WorkoutInput;

fn register(db: &Database, name: &str, email: &str) -> UserId {
    db.insert_user(&NewUser {
        username: name.to_string(),
        email: email.to_string(),
        password: "motdepasse".to_string(),
        age: 27,
        gender: "Femme".to_string(),
        weight_kg: 50.0,
        height_cm: 175.0,
    })
    .expect("Failed to register")
}

fn goal(user_id: UserId, goal_type: &str, status: &str) -> NewGoal {
    NewGoal {
        user_id,
        goal_type: goal_type.to_string(),
        target_value: 200.0,
        start_date: "2025-01-01".to_string(),
        end_date: "2025-06-30".to_string(),
        status: status.to_string(),
    }
}

fn ride(user_id: UserId, minutes: u32) -> WorkoutInput {
    WorkoutInput {
        user_id,
        workout_type_id: 2,
        duration_minutes: minutes,
        distance_km: 30.0,
        calories: 750.0,
        start_time: "2025-01-20 10:00".to_string(),
        end_time: "2025-01-20 11:30".to_string(),
    }
}

#[test]
fn test_register_login_and_update_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fitness_tracker.db");

    let user_id = {
        let db = Database::open(&path).unwrap();
        register(&db, "Emma", "emma@example.com")
    };

    let db = Database::open(&path).unwrap();
    let user = db
        .authenticate("emma@example.com", "motdepasse")
        .unwrap()
        .expect("Login failed");
    assert_eq!(user.id, user_id);
    assert!(user.bmi().unwrap() < 18.5);

    let update = ProfileUpdate {
        age: 28,
        gender: "Femme".to_string(),
        weight_kg: 62.0,
        height_cm: 175.0,
    };
    assert!(db.update_user(user_id, &update).unwrap());

    let user = db.get_user(user_id).unwrap().unwrap();
    assert_eq!(user.age, 28);
    assert_eq!(user.weight_kg, 62.0);
}

#[test]
fn test_duplicate_email_registration_allowed() {
    let db = Database::open_in_memory().unwrap();
    let first = register(&db, "Emma", "shared@example.com");
    let second = register(&db, "Emma bis", "shared@example.com");

    assert_ne!(first, second);
    // Both accounts share the password, so the first registered wins.
    let user = db
        .authenticate("shared@example.com", "motdepasse")
        .unwrap()
        .unwrap();
    assert_eq!(user.id, first);
}

#[test]
fn test_goals_for_user_exact_set() {
    let db = Database::open_in_memory().unwrap();
    let emma = register(&db, "Emma", "emma@example.com");
    let noah = register(&db, "Noah", "noah@example.com");

    let mut expected = Vec::new();
    for goal_type in ["Distance", "Poids", "Calories"] {
        expected.push(db.insert_goal(&goal(emma, goal_type, "En cours")).unwrap());
        db.insert_goal(&goal(noah, goal_type, "En cours")).unwrap();
    }

    let goals = db.list_goals(emma).unwrap();
    let ids: Vec<_> = goals.iter().map(|g| g.id).collect();
    assert_eq!(ids, expected);
    assert!(goals.iter().all(|g| g.user_id == emma));
}

#[test]
fn test_progress_round_trip() {
    let db = Database::open_in_memory().unwrap();
    let emma = register(&db, "Emma", "emma@example.com");
    let goal_id = db.insert_goal(&goal(emma, "Distance", "En cours")).unwrap();

    let id = db.insert_progress(goal_id, 12.5, "2025-01-12").unwrap();
    let entry = db.get_progress(id).unwrap().unwrap();

    assert_eq!(entry.goal_id, goal_id);
    assert_eq!(entry.value, 12.5);
    assert_eq!(entry.date, "2025-01-12");
}

#[test]
fn test_status_outside_vocabulary_persists() {
    let db = Database::open_in_memory().unwrap();
    let emma = register(&db, "Emma", "emma@example.com");
    let goal_id = db.insert_goal(&goal(emma, "Distance", "En cours")).unwrap();

    let mut stored = db.get_goal(goal_id).unwrap().unwrap();
    stored.status = "En pause".to_string();
    assert_eq!(db.update_goal(&stored).unwrap(), 1);

    let reloaded = db.get_goal(goal_id).unwrap().unwrap();
    assert_eq!(reloaded.status, "En pause");
    assert_eq!(reloaded.status_index(&default_goal_statuses()), None);
}

#[test]
fn test_goal_delete_cascades_to_progress() {
    let db = Database::open_in_memory().unwrap();
    let emma = register(&db, "Emma", "emma@example.com");
    let goal_id = db.insert_goal(&goal(emma, "Distance", "En cours")).unwrap();
    let kept_goal = db.insert_goal(&goal(emma, "Poids", "En cours")).unwrap();

    let removed = db.insert_progress(goal_id, 3.0, "2025-01-03").unwrap();
    let kept = db.insert_progress(kept_goal, 61.0, "2025-01-03").unwrap();

    assert_eq!(db.delete_goal(goal_id).unwrap(), 1);
    assert!(db.get_progress(removed).unwrap().is_none());
    assert!(db.get_progress(kept).unwrap().is_some());
}

#[test]
fn test_workout_lifecycle() {
    let db = Database::open_in_memory().unwrap();
    let emma = register(&db, "Emma", "emma@example.com");

    let id = db.insert_workout(&ride(emma, 90)).unwrap();
    let workout = db.get_workout(id).unwrap().unwrap();
    assert_eq!(workout.workout_type_name.as_deref(), Some("Cyclisme"));

    assert!(db.update_workout(id, &ride(emma, 95)).unwrap());
    assert_eq!(db.list_workouts(emma).unwrap()[0].duration_minutes, 95);

    assert_eq!(db.delete_workout(id).unwrap(), 1);
    assert!(db.list_workouts(emma).unwrap().is_empty());
}

#[test]
fn test_delete_nonexistent_workout_returns_zero() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.delete_workout(12345).unwrap(), 0);
}

#[test]
fn test_references_enforced() {
    let db = Database::open_in_memory().unwrap();
    let result = db.insert_workout(&ride(77, 30));
    assert!(matches!(result, Err(DatabaseError::ConstraintViolation(_))));
}
